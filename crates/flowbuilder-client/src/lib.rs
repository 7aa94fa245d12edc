//! Flowbuilder Client
//!
//! This crate provides the flow management client used by the builder and
//! the configs sidebar component:
//!
//! - [`FlowService`] wraps the flow REST endpoints and sequences the calls
//!   that depend on each other or on builder store state
//! - [`ConfigsSidebar`] holds the view state of the configs sidebar
//! - [`ClientConfig`] loads client settings from the environment

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Client configuration
pub mod config;

/// Configs sidebar component
pub mod configs_sidebar;

/// Client error types
pub mod error;

/// Flow management service
pub mod flow_service;

mod http;

pub use config::ClientConfig;
pub use configs_sidebar::{ConfigSelection, ConfigsSidebar, CONFIG_MODAL_CLASS};
pub use error::{ClientError, ClientResult};
pub use flow_service::{CreateFlowRequest, CreatedFlow, ExecuteFlowRequest, FlowService};
pub use http::FLOW_PART;
