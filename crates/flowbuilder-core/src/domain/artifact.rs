use serde::{Deserialize, Serialize};

/// Source of a code step or dynamic dropdown script
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artifact {
    /// Code of the entry file
    #[serde(default)]
    pub content: String,

    /// Dependency manifest
    #[serde(default)]
    pub package: String,
}

impl Artifact {
    /// Create an artifact from code and manifest
    pub fn new(content: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            package: package.into(),
        }
    }

    /// An artifact without code is treated as absent
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// An artifact paired with the multipart part name it travels under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArtifact {
    /// Part name: the step name or the config key
    pub name: String,

    /// The artifact itself
    pub artifact: Artifact,
}

impl NamedArtifact {
    /// Pair an artifact with its part name
    pub fn new(name: impl Into<String>, artifact: Artifact) -> Self {
        Self {
            name: name.into(),
            artifact,
        }
    }
}
