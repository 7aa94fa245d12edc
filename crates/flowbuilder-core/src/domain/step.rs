use serde::{Deserialize, Serialize};

/// Kind of event that starts a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    /// Placeholder trigger of a flow that has not picked one yet
    Empty,
    /// HTTP webhook
    Webhook,
    /// Cron schedule
    Schedule,
    /// Fired when the collection is deployed
    CollectionDeployed,
    /// Fired when the collection is disabled
    CollectionDisabled,
    /// Named event
    Event,
    /// Started by hand from the builder
    Manual,
}

/// Kind of step in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Runs user code packaged as an artifact
    Code,
    /// Reads or writes the key-value storage
    Storage,
    /// Calls another flow
    RemoteFlow,
    /// Iterates over a list
    LoopOnItems,
    /// Calls a built-in component
    Component,
    /// Returns a response to the caller
    Response,
}

/// The trigger of a flow version
///
/// Steps form a singly linked chain starting at `next_action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// Type of trigger
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,

    /// Unique name within the flow version
    pub name: String,

    /// Human-readable name
    #[serde(default)]
    pub display_name: String,

    /// Whether the trigger settings are complete
    #[serde(default)]
    pub valid: bool,

    /// Trigger-specific settings
    #[serde(default)]
    pub settings: serde_json::Value,

    /// First step after the trigger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<Box<Action>>,
}

/// A step in the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Type of step
    #[serde(rename = "type")]
    pub action_type: ActionType,

    /// Unique name within the flow version
    pub name: String,

    /// Human-readable name
    #[serde(default)]
    pub display_name: String,

    /// Whether the step settings are complete
    #[serde(default)]
    pub valid: bool,

    /// Step-specific settings
    #[serde(default)]
    pub settings: serde_json::Value,

    /// Following step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<Box<Action>>,
}

impl Trigger {
    /// Create a placeholder trigger
    pub fn empty() -> Self {
        Self {
            trigger_type: TriggerType::Empty,
            name: "trigger".to_string(),
            display_name: "Select a trigger".to_string(),
            valid: false,
            settings: serde_json::Value::Null,
            next_action: None,
        }
    }

    /// Whether this is the placeholder trigger
    pub fn is_empty(&self) -> bool {
        self.trigger_type == TriggerType::Empty
    }

    /// Iterate over the step chain in order
    pub fn actions(&self) -> ActionIter<'_> {
        ActionIter {
            next: self.next_action.as_deref(),
        }
    }
}

impl Action {
    /// Create a step with default display name and settings
    pub fn new(action_type: ActionType, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            action_type,
            display_name: name.clone(),
            name,
            valid: false,
            settings: serde_json::Value::Null,
            next_action: None,
        }
    }

    /// Attach the following step, returning self
    pub fn then(mut self, next: Action) -> Self {
        self.next_action = Some(Box::new(next));
        self
    }

    /// Whether this step carries a code artifact
    pub fn is_code(&self) -> bool {
        self.action_type == ActionType::Code
    }
}

/// Iterator over a step chain
pub struct ActionIter<'a> {
    next: Option<&'a Action>,
}

impl<'a> Iterator for ActionIter<'a> {
    type Item = &'a Action;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_action.as_deref();
        Some(current)
    }
}
