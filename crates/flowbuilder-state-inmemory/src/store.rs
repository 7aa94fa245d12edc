//! In-memory implementation of the BuilderStore interface

use flowbuilder_core::{Collection, Flow, FlowId};
use flowbuilder_interfaces::{BuilderAction, BuilderStore, LeftSideBarType, RightSideBarType, TabState};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::debug;

/// Plain state applied by the reducer
struct StoreState {
    collection: Option<Collection>,
    flows: Vec<Flow>,
    right_sidebar: RightSideBarType,
    left_sidebar: LeftSideBarType,
    dispatched: Vec<BuilderAction>,
}

/// In-memory builder store
///
/// Applies dispatched actions with a minimal reducer and records every
/// action in dispatch order.
pub struct InMemoryBuilderStore {
    state: RwLock<StoreState>,
    current_flow_id: watch::Sender<Option<FlowId>>,
    current_tab_state: watch::Sender<Option<TabState>>,
    read_only: watch::Sender<bool>,
}

impl InMemoryBuilderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                collection: None,
                flows: Vec::new(),
                right_sidebar: RightSideBarType::None,
                left_sidebar: LeftSideBarType::None,
                dispatched: Vec::new(),
            }),
            current_flow_id: watch::channel(None).0,
            current_tab_state: watch::channel(None).0,
            read_only: watch::channel(false).0,
        }
    }

    /// Create a store with a collection open and its flows loaded
    pub fn with_collection(collection: Collection, flows: Vec<Flow>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write();
            state.collection = Some(collection);
            state.flows = flows;
        }
        store
    }

    /// Every action dispatched so far
    pub fn dispatched(&self) -> Vec<BuilderAction> {
        self.state.read().dispatched.clone()
    }

    /// Panel currently shown in the right sidebar
    pub fn right_sidebar(&self) -> RightSideBarType {
        self.state.read().right_sidebar
    }

    /// Panel currently shown in the left sidebar
    pub fn left_sidebar(&self) -> LeftSideBarType {
        self.state.read().left_sidebar
    }

    fn reduce(&self, action: &BuilderAction) {
        match action {
            BuilderAction::AddFlow { flow } => {
                let mut state = self.state.write();
                state.flows.retain(|existing| existing.id != flow.id);
                state.flows.push(flow.clone());
            }
            BuilderAction::SelectFlow { flow_id } => {
                let previous = self.current_flow_id.send_replace(Some(*flow_id));
                if previous != Some(*flow_id) {
                    self.current_tab_state.send_replace(None);
                }
            }
            BuilderAction::SetTabState { tab } => {
                self.current_tab_state.send_replace(Some(tab.clone()));
            }
            BuilderAction::SetRightSidebar { sidebar_type, .. } => {
                self.state.write().right_sidebar = *sidebar_type;
            }
            BuilderAction::SetLeftSidebar { sidebar_type, .. } => {
                self.state.write().left_sidebar = *sidebar_type;
            }
            BuilderAction::SetReadOnly { read_only } => {
                self.read_only.send_replace(*read_only);
            }
        }
    }
}

impl Default for InMemoryBuilderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderStore for InMemoryBuilderStore {
    fn current_collection(&self) -> Option<Collection> {
        self.state.read().collection.clone()
    }

    fn flows(&self) -> Vec<Flow> {
        self.state.read().flows.clone()
    }

    fn current_flow_id(&self) -> watch::Receiver<Option<FlowId>> {
        self.current_flow_id.subscribe()
    }

    fn current_tab_state(&self) -> watch::Receiver<Option<TabState>> {
        self.current_tab_state.subscribe()
    }

    fn read_only(&self) -> watch::Receiver<bool> {
        self.read_only.subscribe()
    }

    fn dispatch(&self, action: BuilderAction) {
        debug!(?action, "Dispatching builder action");
        // Recorded before the reducer runs so watchers woken by it see the action
        self.state.write().dispatched.push(action.clone());
        self.reduce(&action);
    }
}
