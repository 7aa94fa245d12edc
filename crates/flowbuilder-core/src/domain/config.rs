use crate::domain::artifact::{Artifact, NamedArtifact};
use serde::{Deserialize, Serialize};

/// Kind of value a config entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigType {
    /// Single line of text
    ShortText,
    /// Multi-line text
    LongText,
    /// Numeric value
    Number,
    /// Boolean
    Checkbox,
    /// Key-value map
    Dictionary,
    /// Choice from a list of options
    Dropdown,
    /// OAuth2 connection
    #[serde(rename = "OAUTH2")]
    OAuth2,
}

/// Where dropdown options come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropdownType {
    /// Options listed in the settings
    Static,
    /// Options computed by a script artifact
    Dynamic,
}

/// Scope a config entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigScope {
    /// Shared by every flow of the collection
    #[default]
    Collection,
    /// Local to a single flow
    Flow,
}

/// Settings of a config entry
///
/// Only the dropdown fields are typed; anything else is kept as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSettings {
    /// Whether a value is mandatory
    #[serde(default)]
    pub required: bool,

    /// Dropdown sub-kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown_type: Option<DropdownType>,

    /// Script computing the options of a dynamic dropdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_content: Option<Artifact>,

    /// Remaining settings
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A named configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Key, unique within its scope
    pub key: String,

    /// Label shown in the builder
    #[serde(default)]
    pub label: String,

    /// Kind of value
    #[serde(rename = "type")]
    pub config_type: ConfigType,

    /// Current value
    #[serde(default)]
    pub value: serde_json::Value,

    /// Type-specific settings
    #[serde(default)]
    pub settings: ConfigSettings,
}

impl Config {
    /// The script artifact of a dynamic dropdown, if it has any code
    pub fn dynamic_dropdown_artifact(&self) -> Option<NamedArtifact> {
        if self.config_type != ConfigType::Dropdown
            || self.settings.dropdown_type != Some(DropdownType::Dynamic)
        {
            return None;
        }

        self.settings
            .artifact_content
            .as_ref()
            .filter(|artifact| !artifact.is_empty())
            .map(|artifact| NamedArtifact::new(self.key.clone(), artifact.clone()))
    }
}
