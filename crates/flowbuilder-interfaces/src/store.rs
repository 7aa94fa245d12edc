//! Builder store interface
//!
//! The store is the single source of UI truth. Callers read snapshots or
//! subscribe to watch channels and mutate it only by dispatching actions.

use flowbuilder_core::{Collection, Flow, FlowId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

/// Panel shown in the right sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RightSideBarType {
    /// Hidden
    None,
    /// Trigger type selection
    TriggerType,
    /// New step selection
    NewStep,
    /// Step editor
    EditStep,
}

/// Panel shown in the left sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeftSideBarType {
    /// Hidden
    None,
    /// Configs sidebar
    Configs,
    /// Run history
    Runs,
}

/// Per-flow editor tab state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabState {
    /// Flow shown in the tab
    pub flow_id: FlowId,

    /// Step focused in the canvas
    #[serde(default)]
    pub focused_step: Option<String>,
}

/// Actions accepted by the store
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderAction {
    /// Add a flow to the collection's flow list
    AddFlow {
        /// The flow
        flow: Flow,
    },
    /// Make a flow the active tab
    SelectFlow {
        /// ID of the flow
        flow_id: FlowId,
    },
    /// Replace the active tab state
    SetTabState {
        /// New tab state
        tab: TabState,
    },
    /// Show a right sidebar panel
    SetRightSidebar {
        /// Panel to show
        sidebar_type: RightSideBarType,
        /// Panel properties
        props: Value,
    },
    /// Show a left sidebar panel
    SetLeftSidebar {
        /// Panel to show
        sidebar_type: LeftSideBarType,
        /// Panel properties
        props: Value,
    },
    /// Toggle read-only mode
    SetReadOnly {
        /// Whether the builder is read-only
        read_only: bool,
    },
}

/// Global builder store
pub trait BuilderStore: Send + Sync {
    /// Collection currently open in the builder
    fn current_collection(&self) -> Option<Collection>;

    /// Flows of the current collection
    fn flows(&self) -> Vec<Flow>;

    /// Subscribe to the active flow id
    fn current_flow_id(&self) -> watch::Receiver<Option<FlowId>>;

    /// Subscribe to the active tab state
    fn current_tab_state(&self) -> watch::Receiver<Option<TabState>>;

    /// Subscribe to the read-only flag
    fn read_only(&self) -> watch::Receiver<bool>;

    /// Dispatch an action
    fn dispatch(&self, action: BuilderAction);
}
