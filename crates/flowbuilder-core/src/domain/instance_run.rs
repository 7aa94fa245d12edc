use crate::domain::ids::{CollectionVersionId, FlowVersionId, InstanceRunId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceRunStatus {
    /// Still executing
    Running,
    /// Finished without error
    Succeeded,
    /// A step failed
    Failed,
    /// Exceeded the execution time limit
    Timeout,
}

/// Step outputs and return value of a run, as reported by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceRunState(pub serde_json::Value);

/// One execution of a flow version
///
/// The backend either inlines `state` or hands out `state_url` to fetch it from.
/// An explicit `"state": null` counts as inlined: the run has no state and
/// nothing is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRun {
    /// ID of the run
    pub id: InstanceRunId,

    /// Collection version the run belongs to
    pub collection_version_id: CollectionVersionId,

    /// Flow version that was executed
    pub flow_version_id: FlowVersionId,

    /// Status
    pub status: InstanceRunStatus,

    /// Start time
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub start_time: Option<DateTime<Utc>>,

    /// Finish time
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub finish_time: Option<DateTime<Utc>>,

    /// Inline state; `Some(None)` when the backend sent `null`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub state: Option<Option<InstanceRunState>>,

    /// Where to fetch the state from when it is not inlined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_url: Option<String>,
}

impl InstanceRun {
    /// State of the run, if any
    pub fn state(&self) -> Option<&InstanceRunState> {
        self.state.as_ref().and_then(Option::as_ref)
    }

    /// URL to fetch the state from, when the state field is absent
    pub fn pending_state_url(&self) -> Option<&str> {
        match self.state {
            Some(_) => None,
            None => self.state_url.as_deref(),
        }
    }
}
