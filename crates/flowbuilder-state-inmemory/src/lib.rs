//! In-memory collaborators for the Flowbuilder client
//!
//! This crate provides in-memory implementations of the store and modal
//! interfaces defined in the flowbuilder-interfaces crate. They are used by
//! tests and by headless tools that drive the flow service without a UI.

pub mod modal;
pub mod store;

pub use modal::InMemoryModalService;
pub use store::InMemoryBuilderStore;
