use crate::domain::config::Config;
use crate::domain::step::Trigger;
use crate::CoreError;
use serde::{Deserialize, Serialize};

/// Trigger and configs a new flow starts from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVersion {
    /// Access level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,

    /// Pre-filled configs
    #[serde(default)]
    pub configs: Vec<Config>,

    /// Pre-built trigger and step chain
    #[serde(default)]
    pub trigger: Option<Trigger>,
}

/// A pre-built flow offered by the "create new flow" dialog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTemplate {
    /// Template name
    pub name: String,

    /// Description shown in the dialog
    #[serde(default)]
    pub description: String,

    /// Content of the flow version to create
    pub version: TemplateVersion,
}

impl FlowTemplate {
    /// The blank template: an empty trigger and nothing else
    pub fn blank() -> Self {
        Self {
            name: "Blank".to_string(),
            description: "Start from scratch".to_string(),
            version: TemplateVersion {
                access: None,
                configs: Vec::new(),
                trigger: Some(Trigger::empty()),
            },
        }
    }

    /// Copy detached from the caller's value through a JSON round trip
    ///
    /// Anything the wire format cannot express is dropped.
    pub fn detached(&self) -> Result<Self, CoreError> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }
}
