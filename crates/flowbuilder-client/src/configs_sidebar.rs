//! Configs sidebar
//!
//! View state behind the left sidebar that lists collection and flow
//! configs. Editing happens in the config modal; the sidebar only decides
//! which scope is shown and what the modal starts with.

use std::sync::Arc;

use flowbuilder_core::{Config, ConfigScope};
use flowbuilder_interfaces::{
    BuilderAction, BuilderStore, ConfigModalState, LeftSideBarType, ModalContent, ModalOptions,
    ModalRef, ModalRequest, ModalService,
};
use serde_json::json;
use tokio::sync::watch;
use tracing::debug;

/// CSS class of the config dialog
pub const CONFIG_MODAL_CLASS: &str = "modal-dialog-centered";

/// Tab index of the flow scope
const FLOW_TAB_INDEX: usize = 1;

/// An existing config picked for editing
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSelection {
    /// The config
    pub value: Config,
    /// Its position in the scope's config list
    pub index: usize,
}

/// Configs sidebar state
pub struct ConfigsSidebar {
    current_tab: ConfigScope,
    view_mode: watch::Receiver<bool>,
    store: Arc<dyn BuilderStore>,
    modals: Arc<dyn ModalService>,
    config_modal: Option<ModalRef>,
}

impl ConfigsSidebar {
    /// Create the sidebar on the collection tab
    pub fn new(store: Arc<dyn BuilderStore>, modals: Arc<dyn ModalService>) -> Self {
        let view_mode = store.read_only();
        Self {
            current_tab: ConfigScope::Collection,
            view_mode,
            store,
            modals,
            config_modal: None,
        }
    }

    /// Scope of the active tab
    pub fn current_tab(&self) -> ConfigScope {
        self.current_tab
    }

    /// Whether the builder is read-only
    pub fn view_mode(&self) -> watch::Receiver<bool> {
        self.view_mode.clone()
    }

    /// The last opened config modal
    pub fn config_modal(&self) -> Option<&ModalRef> {
        self.config_modal.as_ref()
    }

    /// Hide the left sidebar
    pub fn close_sidebar(&self) {
        self.store.dispatch(BuilderAction::SetLeftSidebar {
            sidebar_type: LeftSideBarType::None,
            props: json!({}),
        });
    }

    /// Open the config modal, editing `selection` or creating a new config
    pub fn open_config_modal(&mut self, selection: Option<ConfigSelection>, scope: ConfigScope) {
        let (config_index_in_configs_list, config_to_update) = match selection {
            Some(ConfigSelection { value, index }) => (Some(index), Some(value)),
            None => (None, None),
        };
        debug!(?scope, editing = config_to_update.is_some(), "Opening config modal");

        let modal = self.modals.show(ModalRequest {
            content: ModalContent::CreateEditConfig(ConfigModalState {
                config_index_in_configs_list,
                config_to_update,
                config_scope: scope,
            }),
            options: ModalOptions {
                ignore_backdrop_click: true,
                class: Some(CONFIG_MODAL_CLASS.to_string()),
            },
        });
        self.config_modal = Some(modal);
    }

    /// Switch tabs by index
    pub fn change_tab(&mut self, index: Option<usize>) {
        self.current_tab = match index {
            Some(FLOW_TAB_INDEX) => ConfigScope::Flow,
            _ => ConfigScope::Collection,
        };
    }
}
