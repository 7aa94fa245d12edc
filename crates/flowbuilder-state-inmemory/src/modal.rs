//! In-memory implementation of the ModalService interface

use std::collections::VecDeque;

use flowbuilder_core::FlowTemplate;
use flowbuilder_interfaces::{ModalContent, ModalRef, ModalRequest, ModalService};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

/// Records shown modals and answers template pickers
///
/// Answers queued with [`queue_template`](Self::queue_template) are consumed
/// by the next template pickers in order; a queued `None` closes the picker
/// without a selection. Pickers shown with no queued answer stay open until
/// [`select_template`](Self::select_template) is called.
#[derive(Default)]
pub struct InMemoryModalService {
    shown: Mutex<Vec<ModalRequest>>,
    queued: Mutex<VecDeque<Option<FlowTemplate>>>,
    open_pickers: Mutex<VecDeque<oneshot::Sender<FlowTemplate>>>,
}

impl InMemoryModalService {
    /// Create a service with nothing queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer of the next template picker
    pub fn queue_template(&self, template: Option<FlowTemplate>) {
        self.queued.lock().push_back(template);
    }

    /// Answer the oldest open template picker
    ///
    /// Returns false when no picker is waiting.
    pub fn select_template(&self, template: FlowTemplate) -> bool {
        match self.open_pickers.lock().pop_front() {
            Some(tx) => tx.send(template).is_ok(),
            None => false,
        }
    }

    /// Every request shown so far
    pub fn shown(&self) -> Vec<ModalRequest> {
        self.shown.lock().clone()
    }
}

impl ModalService for InMemoryModalService {
    fn show(&self, request: ModalRequest) -> ModalRef {
        debug!(content = ?request.content, "Showing modal");
        self.shown.lock().push(request.clone());

        match request.content {
            ModalContent::CreateNewFlow => {
                let (modal, tx) = ModalRef::with_template_channel(request.content);
                match self.queued.lock().pop_front() {
                    Some(Some(template)) => {
                        let _ = tx.send(template);
                    }
                    Some(None) => drop(tx),
                    None => self.open_pickers.lock().push_back(tx),
                }
                modal
            }
            content => ModalRef::new(content),
        }
    }
}
