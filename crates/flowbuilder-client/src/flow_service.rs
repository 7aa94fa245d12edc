//! Flow management client
//!
//! Wraps the flow REST endpoints, assembles the multipart payloads that carry
//! code artifacts next to the flow JSON, and sequences the calls that depend
//! on each other or on builder store state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use flowbuilder_artifacts::{package_artifacts, PackagedArtifact};
use flowbuilder_core::{
    find_default_flow_display_name, CollectionId, CollectionVersion, CollectionVersionId, Flow,
    FlowId, FlowTemplate, FlowVersion, FlowVersionId, InstanceRun, InstanceRunState, NamedArtifact,
    SeekPage,
};
use flowbuilder_interfaces::{
    BuilderAction, BuilderStore, CodeArtifactCache, ModalContent, ModalOptions, ModalRequest,
    ModalService, RightSideBarType,
};
use flowbuilder_monitoring::LogExt;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{check_status, flow_form, map_http_error, read_json};

/// Input of [`FlowService::create`]
#[derive(Debug, Clone)]
pub struct CreateFlowRequest {
    /// Display name of the new flow
    pub flow_display_name: String,
    /// Template to start from
    pub template: FlowTemplate,
}

/// Body of [`FlowService::execute`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecuteFlowRequest {
    /// Config values keyed by config key
    pub configs: BTreeMap<String, Value>,
    /// Trigger payload
    pub trigger: Value,
}

/// A flow created from a template
#[derive(Debug)]
pub struct CreatedFlow {
    /// The created flow
    pub flow: Flow,
    /// Task that opens the trigger panel once the flow's tab is active
    pub trigger_panel: JoinHandle<()>,
}

#[derive(Serialize)]
struct CreateFlowPayload<'a> {
    version: &'a FlowVersion,
}

/// Client for the flow management endpoints
pub struct FlowService {
    config: ClientConfig,
    client: Client,
    store: Arc<dyn BuilderStore>,
    modals: Arc<dyn ModalService>,
    code: Arc<dyn CodeArtifactCache>,
}

impl FlowService {
    /// Create a flow service wired to its collaborators
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn BuilderStore>,
        modals: Arc<dyn ModalService>,
        code: Arc<dyn CodeArtifactCache>,
    ) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            store,
            modals,
            code,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Show the template picker and create a flow from the chosen template
    ///
    /// Closing the picker without a choice is not an error.
    pub async fn show_modal_flow(&self) -> ClientResult<Option<CreatedFlow>> {
        let mut modal = self.modals.show(ModalRequest {
            content: ModalContent::CreateNewFlow,
            options: ModalOptions {
                ignore_backdrop_click: true,
                class: None,
            },
        });

        match modal.selected_template().await {
            Some(template) => self.create_flow_template(template).await.map(Some),
            None => {
                debug!("Template picker closed without a selection");
                Ok(None)
            }
        }
    }

    /// Create a flow in the open collection from a template
    ///
    /// The flow is added to the store right away. For a template with an
    /// empty trigger the trigger panel is opened once the store has made the
    /// new flow the active tab and its tab state exists.
    #[instrument(skip(self, template), fields(template = %template.name))]
    pub async fn create_flow_template(&self, template: FlowTemplate) -> ClientResult<CreatedFlow> {
        let collection = self
            .store
            .current_collection()
            .ok_or(ClientError::NoCurrentCollection)?;
        let flow_display_name = find_default_flow_display_name(&self.store.flows());

        let flow = self
            .create(
                collection.id,
                CreateFlowRequest {
                    flow_display_name,
                    template,
                },
            )
            .await?;

        let trigger_panel = self.open_trigger_panel_when_active(&flow);
        self.store.dispatch(BuilderAction::AddFlow { flow: flow.clone() });

        Ok(CreatedFlow {
            flow,
            trigger_panel,
        })
    }

    fn open_trigger_panel_when_active(&self, flow: &Flow) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let flow_id = flow.id;
        let empty_trigger = flow.last_version.has_empty_trigger();
        let mut current_flow_id = store.current_flow_id();
        let mut current_tab_state = store.current_tab_state();

        tokio::spawn(async move {
            if current_flow_id.wait_for(|id| *id == Some(flow_id)).await.is_err() {
                debug!(%flow_id, "Store closed before the flow became active");
                return;
            }
            if current_tab_state.wait_for(Option::is_some).await.is_err() {
                debug!(%flow_id, "Store closed before the tab state was ready");
                return;
            }

            if empty_trigger {
                debug!(%flow_id, "Opening trigger selection");
                store.dispatch(BuilderAction::SetRightSidebar {
                    sidebar_type: RightSideBarType::TriggerType,
                    props: json!({}),
                });
            }
        })
    }

    /// Create a flow from a template in a collection
    ///
    /// Every code step gets the placeholder artifact; artifacts are packaged
    /// before the request is sent.
    #[instrument(skip(self, request), fields(collection_id = %collection_id))]
    pub async fn create(&self, collection_id: CollectionId, request: CreateFlowRequest) -> ClientResult<Flow> {
        let template = request.template.detached()?;
        let version = FlowVersion::draft_from_template(&request.flow_display_name, template.version);

        let placeholder = self.code.hello_world();
        let artifacts: Vec<NamedArtifact> = version
            .code_actions()
            .into_iter()
            .map(|action| NamedArtifact::new(action.name.clone(), placeholder.clone()))
            .collect();
        let packaged = package_artifacts(&artifacts)?;

        let body = serde_json::to_vec(&CreateFlowPayload { version: &version })?;
        let form = flow_form(&body, &packaged)?;

        debug!(artifacts = packaged.len(), "Creating flow");
        let response = self
            .client
            .post(self.url(&format!("/collections/{}/flows", collection_id)))
            .multipart(form)
            .send()
            .await
            .map_err(map_http_error)?;

        let flow: Flow = read_json(response).await?;
        info!(flow_id = %flow.id, "Flow created");
        Ok(flow)
    }

    /// Fetch a flow
    #[instrument(skip(self))]
    pub async fn get(&self, flow_id: FlowId) -> ClientResult<Flow> {
        self.get_json(&self.url(&format!("/flows/{}", flow_id))).await
    }

    /// Fetch a single flow version
    #[instrument(skip(self))]
    pub async fn get_version(&self, flow_version_id: FlowVersionId) -> ClientResult<FlowVersion> {
        self.get_json(&self.url(&format!("/flows/versions/{}", flow_version_id)))
            .await
    }

    /// List the flows of a collection
    #[instrument(skip(self))]
    pub async fn list_by_collection(
        &self,
        collection_id: CollectionId,
        limit: usize,
    ) -> ClientResult<SeekPage<Flow>> {
        self.get_json(&self.url(&format!(
            "/collections/{}/flows?limit={}",
            collection_id, limit
        )))
        .await
    }

    /// List every version of a flow
    #[instrument(skip(self))]
    pub async fn list_versions_by_flow_id(&self, flow_id: FlowId) -> ClientResult<Vec<FlowVersion>> {
        self.get_json(&self.url(&format!("/flows/{}/versions", flow_id)))
            .await
    }

    /// Fetch the flow versions pinned by a collection version
    ///
    /// Lookups run concurrently; the result follows the order of
    /// `flows_version_id` and the first failure fails the call.
    #[instrument(skip(self, collection_version), fields(collection_version_id = %collection_version.id))]
    pub async fn list_by_collection_version(
        &self,
        collection_version: &CollectionVersion,
    ) -> ClientResult<Vec<FlowVersion>> {
        try_join_all(
            collection_version
                .flows_version_id
                .iter()
                .map(|id| self.get_version(*id)),
        )
        .await
    }

    /// Number of flows in a collection
    #[instrument(skip(self))]
    pub async fn count(&self, collection_id: CollectionId) -> ClientResult<u64> {
        self.get_json(&self.url(&format!("/collections/{}/flows/count", collection_id)))
            .await
    }

    /// Delete a flow
    #[instrument(skip(self))]
    pub async fn delete(&self, flow_id: FlowId) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/flows/{}", flow_id)))
            .send()
            .await
            .map_err(map_http_error)?;
        check_status(response).await.log_err("Failed to delete flow")?;
        info!(%flow_id, "Flow deleted");
        Ok(())
    }

    /// Save a flow version as the flow's latest version
    ///
    /// Dynamic dropdown scripts and the flow's dirty step code travel with
    /// the version. Without any, one request is sent. Otherwise the version
    /// is submitted on its own and then again with the packaged artifacts,
    /// and the dirty step code is forgotten once the second request succeeds.
    #[instrument(skip(self, version), fields(flow_version_id = %version.id))]
    pub async fn update(&self, flow_id: FlowId, version: &FlowVersion) -> ClientResult<Flow> {
        let version = version.clone();
        let body = serde_json::to_vec(&version)?;
        let url = self.url(&format!("/flows/{}/versions/latest", flow_id));

        let mut artifacts = Self::dynamic_dropdown_configs_artifacts(&version);
        artifacts.extend(self.code.dirty_artifacts_for_flow_steps(flow_id));

        if artifacts.is_empty() {
            return self.put_flow(&url, &body, &[]).await;
        }

        let packaged = package_artifacts(&artifacts)?;
        debug!(artifacts = packaged.len(), "Submitting flow before attaching artifacts");
        self.put_flow(&url, &body, &[]).await?;

        let flow = self
            .put_flow(&url, &body, &packaged)
            .await
            .log_err("Failed to attach artifacts")?;
        self.code.unmark_dirty_artifacts(flow_id);
        info!(%flow_id, artifacts = packaged.len(), "Flow updated with artifacts");
        Ok(flow)
    }

    async fn put_flow(&self, url: &str, body: &[u8], artifacts: &[PackagedArtifact]) -> ClientResult<Flow> {
        let form = flow_form(body, artifacts)?;
        let response = self
            .client
            .put(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_http_error)?;
        read_json(response).await
    }

    /// Run a flow version
    ///
    /// When the backend does not inline the run state it hands out a URL;
    /// the state is then fetched from there once and merged into the run.
    #[instrument(skip(self, request))]
    pub async fn execute(
        &self,
        collection_version_id: CollectionVersionId,
        flow_version_id: FlowVersionId,
        request: &ExecuteFlowRequest,
    ) -> ClientResult<InstanceRun> {
        let response = self
            .client
            .post(self.url(&format!(
                "/collection-versions/{}/flow-versions/{}/runs",
                collection_version_id, flow_version_id
            )))
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;

        let mut run: InstanceRun = read_json(response).await?;

        if let Some(state_url) = run.pending_state_url().map(str::to_string) {
            debug!(run_id = %run.id, %state_url, "Fetching run state");
            run.state = Some(Some(self.logs(&state_url).await?));
        }

        info!(run_id = %run.id, status = ?run.status, "Flow executed");
        Ok(run)
    }

    async fn logs(&self, url: &str) -> ClientResult<InstanceRunState> {
        self.get_json(url).await
    }

    /// Script artifacts of the version's dynamic dropdown configs, named by config key
    pub fn dynamic_dropdown_configs_artifacts(version: &FlowVersion) -> Vec<NamedArtifact> {
        version
            .configs
            .iter()
            .filter_map(|config| config.dynamic_dropdown_artifact())
            .collect()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_http_error)?;
        read_json(response).await
    }
}
