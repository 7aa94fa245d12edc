//! Code artifact cache interface

use flowbuilder_core::{Artifact, FlowId, NamedArtifact};

/// Tracks step code edited in the builder but not yet saved
pub trait CodeArtifactCache: Send + Sync {
    /// Placeholder artifact for a new code step
    fn hello_world(&self) -> Artifact;

    /// Record edited code for a step
    fn mark_dirty(&self, flow_id: FlowId, step_name: &str, artifact: Artifact);

    /// Edited code of the flow's steps, named after the steps
    fn dirty_artifacts_for_flow_steps(&self, flow_id: FlowId) -> Vec<NamedArtifact>;

    /// Forget the flow's edited code once it has been saved
    fn unmark_dirty_artifacts(&self, flow_id: FlowId);
}
