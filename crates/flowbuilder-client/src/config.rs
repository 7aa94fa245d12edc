//! Configuration for the Flowbuilder client
//!
//! Defaults can be overridden from environment variables.

use flowbuilder_monitoring::LoggingConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the flow backend API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log filter
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON logs
    #[serde(default)]
    pub json_logging: bool,
}

fn default_api_url() -> String {
    "http://localhost:3000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ClientConfig {
    /// Configuration pointing at the given API base URL, other fields defaulted
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    pub fn load() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_url) = lookup("FLOWBUILDER_API_URL") {
            config.api_url = api_url;
        }

        if let Some(timeout) = lookup("FLOWBUILDER_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => warn!("Invalid FLOWBUILDER_TIMEOUT_SECS value: {}", timeout),
            }
        }

        if let Some(filter) = lookup("FLOWBUILDER_LOG") {
            config.log_filter = filter;
        }

        if let Some(json_logs) = lookup("FLOWBUILDER_JSON_LOGS") {
            config.json_logging = json_logs.to_lowercase() == "true" || json_logs == "1";
        }

        config.validate()?;

        info!(api_url = %config.api_url, "Loaded client configuration");
        Ok(config)
    }

    /// Check that the API URL is usable
    pub fn validate(&self) -> ClientResult<()> {
        if self.api_url.is_empty() {
            return Err(ClientError::Configuration("API URL is required".to_string()));
        }

        let url = Url::parse(&self.api_url)
            .map_err(|e| ClientError::Configuration(format!("Invalid API URL {}: {}", self.api_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "API URL must use http or https: {}",
                self.api_url
            )));
        }

        Ok(())
    }

    /// Logging settings derived from this configuration
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            service_name: "flowbuilder-client".to_string(),
            log_filter: self.log_filter.clone(),
            enable_json_logging: self.json_logging,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            log_filter: default_log_filter(),
            json_logging: false,
        }
    }
}
