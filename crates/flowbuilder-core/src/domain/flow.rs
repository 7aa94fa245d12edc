use crate::domain::config::Config;
use crate::domain::ids::{CollectionId, CollectionVersionId, FlowId, FlowVersionId};
use crate::domain::step::{Action, Trigger};
use crate::domain::template::TemplateVersion;
use serde::{Deserialize, Serialize};

/// Edit state of a flow version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionEditState {
    /// Still editable
    #[default]
    Draft,
    /// Published, immutable
    Locked,
}

/// A snapshot of a flow's trigger, configs and steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowVersion {
    /// ID of this version
    pub id: FlowVersionId,

    /// ID of the owning flow
    pub flow_id: FlowId,

    /// Human-readable name
    pub display_name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// The trigger, if one has been chosen
    #[serde(default)]
    pub trigger: Option<Trigger>,

    /// Flow-scoped configs
    #[serde(default)]
    pub configs: Vec<Config>,

    /// Whether the whole version is valid
    #[serde(default)]
    pub valid: bool,

    /// Draft or locked
    #[serde(default)]
    pub state: VersionEditState,

    /// Access level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,

    /// Creation time, epoch seconds
    #[serde(default)]
    pub epoch_creation_time: i64,

    /// Last update time, epoch seconds
    #[serde(default)]
    pub epoch_update_time: i64,
}

impl FlowVersion {
    /// Build a fresh draft from a template
    ///
    /// Ids are newly generated; the backend assigns its own on creation.
    pub fn draft_from_template(display_name: &str, template: TemplateVersion) -> Self {
        Self {
            id: FlowVersionId::new(),
            flow_id: FlowId::new(),
            display_name: display_name.to_string(),
            description: format!("{} description", display_name),
            trigger: template.trigger,
            configs: template.configs,
            valid: false,
            state: VersionEditState::Draft,
            access: template.access,
            epoch_creation_time: 0,
            epoch_update_time: 0,
        }
    }

    /// All code steps, in chain order
    pub fn code_actions(&self) -> Vec<&Action> {
        self.trigger
            .iter()
            .flat_map(|trigger| trigger.actions())
            .filter(|action| action.is_code())
            .collect()
    }

    /// Whether the version starts with the placeholder trigger
    pub fn has_empty_trigger(&self) -> bool {
        self.trigger
            .as_ref()
            .map(|trigger| trigger.is_empty())
            .unwrap_or(false)
    }
}

/// A named automation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// ID of the flow
    pub id: FlowId,

    /// Owning collection
    pub collection_id: CollectionId,

    /// Most recent version
    pub last_version: FlowVersion,

    /// Creation time, epoch seconds
    #[serde(default)]
    pub epoch_creation_time: i64,

    /// Last update time, epoch seconds
    #[serde(default)]
    pub epoch_update_time: i64,
}

impl Flow {
    /// Display name of the latest version
    pub fn display_name(&self) -> &str {
        &self.last_version.display_name
    }
}

/// A container of flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// ID of the collection
    pub id: CollectionId,

    /// Human-readable name
    #[serde(default)]
    pub display_name: String,
}

/// A published collection version and the flow versions it pins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionVersion {
    /// ID of this collection version
    pub id: CollectionVersionId,

    /// Owning collection
    pub collection_id: CollectionId,

    /// Flow versions included in this collection version
    #[serde(default)]
    pub flows_version_id: Vec<FlowVersionId>,
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekPage<T> {
    /// Items on this page
    pub data: Vec<T>,

    /// Cursor for the following page
    #[serde(default)]
    pub next: Option<String>,

    /// Cursor for the preceding page
    #[serde(default)]
    pub previous: Option<String>,
}
