//! In-memory implementation of the CodeArtifactCache interface

use std::collections::BTreeMap;

use dashmap::DashMap;
use flowbuilder_core::{Artifact, FlowId, NamedArtifact};
use flowbuilder_interfaces::CodeArtifactCache;
use tracing::debug;

/// Code of the placeholder artifact given to new code steps
pub const HELLO_WORLD_CODE: &str = "exports.codePiece = async (params) => {\n    return true;\n};\n";

/// Manifest of the placeholder artifact
pub const HELLO_WORLD_PACKAGE: &str = "{\n  \"dependencies\": {}\n}\n";

/// Dirty step code, keyed by flow then step name
#[derive(Debug, Default)]
pub struct InMemoryCodeArtifactCache {
    dirty: DashMap<FlowId, BTreeMap<String, Artifact>>,
}

impl InMemoryCodeArtifactCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flow has unsaved step code
    pub fn has_dirty_artifacts(&self, flow_id: FlowId) -> bool {
        self.dirty
            .get(&flow_id)
            .map(|steps| !steps.is_empty())
            .unwrap_or(false)
    }
}

impl CodeArtifactCache for InMemoryCodeArtifactCache {
    fn hello_world(&self) -> Artifact {
        Artifact::new(HELLO_WORLD_CODE, HELLO_WORLD_PACKAGE)
    }

    fn mark_dirty(&self, flow_id: FlowId, step_name: &str, artifact: Artifact) {
        debug!(%flow_id, step = step_name, "Marking step artifact dirty");
        self.dirty
            .entry(flow_id)
            .or_default()
            .insert(step_name.to_string(), artifact);
    }

    fn dirty_artifacts_for_flow_steps(&self, flow_id: FlowId) -> Vec<NamedArtifact> {
        self.dirty
            .get(&flow_id)
            .map(|steps| {
                steps
                    .iter()
                    .map(|(name, artifact)| NamedArtifact::new(name.clone(), artifact.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn unmark_dirty_artifacts(&self, flow_id: FlowId) {
        if let Some((_, steps)) = self.dirty.remove(&flow_id) {
            debug!(%flow_id, cleared = steps.len(), "Cleared dirty step artifacts");
        }
    }
}
