//! Flowbuilder Interfaces
//!
//! This crate provides the interfaces of the collaborators the flow service
//! and the builder components are wired to: the global builder store, the
//! modal service and the code artifact cache.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Global builder store
pub mod store;

/// Modal dialogs
pub mod modal;

/// Code artifact cache
pub mod code;

pub use code::CodeArtifactCache;
pub use modal::{ConfigModalState, ModalContent, ModalOptions, ModalRef, ModalRequest, ModalService};
pub use store::{BuilderAction, BuilderStore, LeftSideBarType, RightSideBarType, TabState};
