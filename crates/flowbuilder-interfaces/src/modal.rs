//! Modal service interface

use flowbuilder_core::{Config, ConfigScope, FlowTemplate};
use tokio::sync::oneshot;

/// Initial state of the create/edit config modal
///
/// Both fields are set when editing and both are empty when creating.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigModalState {
    /// Position of the edited config in its list
    pub config_index_in_configs_list: Option<usize>,

    /// The config being edited
    pub config_to_update: Option<Config>,

    /// Scope the config belongs to
    pub config_scope: ConfigScope,
}

/// What a modal shows
#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    /// Template picker for a new flow
    CreateNewFlow,
    /// Create or edit a single config entry
    CreateEditConfig(ConfigModalState),
}

/// Presentation options
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalOptions {
    /// Keep the modal open on backdrop clicks
    pub ignore_backdrop_click: bool,

    /// Extra CSS class of the dialog
    pub class: Option<String>,
}

/// Request to show a modal
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    /// Content
    pub content: ModalContent,

    /// Options
    pub options: ModalOptions,
}

/// Handle to a shown modal
#[derive(Debug)]
pub struct ModalRef {
    content: ModalContent,
    selected_template: Option<oneshot::Receiver<FlowTemplate>>,
}

impl ModalRef {
    /// Handle to a modal that yields nothing
    pub fn new(content: ModalContent) -> Self {
        Self {
            content,
            selected_template: None,
        }
    }

    /// Handle to a template picker, plus the sender the dialog answers on
    pub fn with_template_channel(content: ModalContent) -> (Self, oneshot::Sender<FlowTemplate>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                content,
                selected_template: Some(rx),
            },
            tx,
        )
    }

    /// What the modal shows
    pub fn content(&self) -> &ModalContent {
        &self.content
    }

    /// Wait for the first selected template
    ///
    /// Resolves to `None` when the dialog closes without a selection or has
    /// already been asked.
    pub async fn selected_template(&mut self) -> Option<FlowTemplate> {
        let rx = self.selected_template.take()?;
        rx.await.ok()
    }
}

/// Shows modal dialogs
pub trait ModalService: Send + Sync {
    /// Show a modal
    fn show(&self, request: ModalRequest) -> ModalRef;
}
