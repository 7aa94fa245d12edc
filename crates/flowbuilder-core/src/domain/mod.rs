/// Typed identifiers
pub mod ids;

/// Flows, flow versions and collection versions
pub mod flow;

/// Triggers and the step chain hanging off them
pub mod step;

/// Configuration entries
pub mod config;

/// Code artifacts
pub mod artifact;

/// Flow templates
pub mod template;

/// Instance runs
pub mod instance_run;
