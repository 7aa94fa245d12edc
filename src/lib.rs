//! Flowbuilder
//!
//! Client-side service layer of the flow builder: the flow management
//! client, the configs sidebar state and the collaborators they are wired
//! to. The member crates are re-exported here:
//!
//! - [`domain`]: flows, versions, steps, configs and runs
//! - [`interfaces`]: builder store, modal service and code artifact cache
//! - [`artifacts`]: artifact packaging and the dirty code cache
//! - [`client`]: `FlowService`, `ConfigsSidebar` and client configuration
//! - [`monitoring`]: logging setup
//! - [`inmemory`]: in-memory store and modal service (feature `inmemory`)
//!
//! [`init_from_env`] loads the client configuration and starts logging.

#![forbid(unsafe_code)]

pub use flowbuilder_artifacts as artifacts;
pub use flowbuilder_client as client;
pub use flowbuilder_core as domain;
pub use flowbuilder_interfaces as interfaces;
pub use flowbuilder_monitoring as monitoring;

#[cfg(feature = "inmemory")]
pub use flowbuilder_state_inmemory as inmemory;

pub use flowbuilder_client::{ClientConfig, ClientError, ClientResult, ConfigsSidebar, FlowService};

use anyhow::Context;

/// Load the client configuration from the environment and start logging
///
/// Logging can only be initialized once per process; a second call fails.
pub fn init_from_env() -> anyhow::Result<ClientConfig> {
    let config = ClientConfig::load().context("Failed to load configuration")?;

    monitoring::init_logging(&config.logging()).context("Failed to initialize logging")?;

    Ok(config)
}
