//!
//! Flowbuilder Core - domain model for the Flowbuilder client
//!
//! This crate defines the entities exchanged with the flow backend
//! (flows, flow versions, triggers, step chains, configs, runs) and the
//! small amount of logic that lives on them. It is the foundation for
//! all other crates in the workspace.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - entities and identifiers
pub mod domain;

/// Error types
pub mod error;

/// Naming helpers for new flows
pub mod naming;

pub use domain::artifact::{Artifact, NamedArtifact};
pub use domain::config::{Config, ConfigScope, ConfigSettings, ConfigType, DropdownType};
pub use domain::flow::{Collection, CollectionVersion, Flow, FlowVersion, SeekPage, VersionEditState};
pub use domain::ids::{CollectionId, CollectionVersionId, FlowId, FlowVersionId, InstanceRunId};
pub use domain::instance_run::{InstanceRun, InstanceRunState, InstanceRunStatus};
pub use domain::step::{Action, ActionType, Trigger, TriggerType};
pub use domain::template::{FlowTemplate, TemplateVersion};
pub use error::CoreError;
pub use naming::find_default_flow_display_name;
