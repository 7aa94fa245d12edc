//! Flowbuilder end-to-end test support
//!
//! Provides a stateful in-process flow backend served through wiremock, a
//! multipart reader for inspecting uploads and a builder session that wires
//! the flow service to the in-memory collaborators.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

use bytes::Bytes;
use flowbuilder_artifacts::InMemoryCodeArtifactCache;
use flowbuilder_client::{ClientConfig, ConfigsSidebar, FlowService, FLOW_PART};
use flowbuilder_core::{
    Collection, CollectionId, Flow, FlowId, FlowVersion, FlowVersionId, InstanceRunId, SeekPage,
};
use flowbuilder_monitoring::init_test_tracing;
use flowbuilder_state_inmemory::{InMemoryBuilderStore, InMemoryModalService};
use futures::executor::block_on;
use multer::Multipart;
use parking_lot::Mutex;
use serde_json::{json, Value};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use zip::ZipArchive;

/// Base path of the API on the mock server
pub const API_PREFIX: &str = "/api/v1";

/// One part of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedPart {
    /// Part name
    pub name: String,
    /// File name, when the part is a file
    pub file_name: Option<String>,
    /// Declared content type
    pub content_type: Option<String>,
    /// Raw part content
    pub data: Vec<u8>,
}

impl UploadedPart {
    /// Files of a zip part, keyed by path
    pub fn unpack(&self) -> BTreeMap<String, String> {
        let mut archive =
            ZipArchive::new(Cursor::new(self.data.as_slice())).expect("Failed to read archive");
        let mut files = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).expect("Failed to read archive entry");
            let mut content = String::new();
            file.read_to_string(&mut content)
                .expect("Archive entry is not UTF-8");
            files.insert(file.name().to_string(), content);
        }
        files
    }
}

/// Read every part of a multipart/form-data body
pub async fn read_multipart(content_type: &str, body: Vec<u8>) -> multer::Result<Vec<UploadedPart>> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(Bytes::from(body)) });
    let mut multipart = Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());
        let data = field.bytes().await?.to_vec();
        parts.push(UploadedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    Ok(parts)
}

fn content_type(request: &Request) -> Option<String> {
    request
        .headers
        .iter()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("content-type"))
        .map(|(_, values)| values.last().as_str().to_string())
}

/// Parts of a multipart request, empty when the body is not multipart
fn multipart_parts(request: &Request) -> Vec<UploadedPart> {
    let content_type = match content_type(request) {
        Some(content_type) => content_type,
        None => return Vec::new(),
    };
    block_on(read_multipart(&content_type, request.body.clone())).unwrap_or_default()
}

/// A multipart upload received by the backend
#[derive(Debug, Clone)]
pub struct Upload {
    /// Method of the request
    pub method: String,
    /// Path of the request
    pub path: String,
    /// Parts of the body
    pub parts: Vec<UploadedPart>,
}

impl Upload {
    /// Names of the artifact parts, in order
    pub fn artifact_names(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter(|part| part.name != FLOW_PART)
            .map(|part| part.name.clone())
            .collect()
    }

    /// The flow JSON part
    pub fn flow_json(&self) -> Value {
        let part = self
            .parts
            .iter()
            .find(|part| part.name == FLOW_PART)
            .expect("Upload has no flow part");
        serde_json::from_slice(&part.data).expect("Flow part is not JSON")
    }

    /// An artifact part by name
    pub fn artifact(&self, name: &str) -> Option<&UploadedPart> {
        self.parts.iter().find(|part| part.name == name)
    }
}

#[derive(Default)]
struct BackendState {
    flows: Vec<Flow>,
    uploads: Vec<Upload>,
    run_states: BTreeMap<String, Value>,
    executions: Vec<Value>,
}

/// In-process flow backend
///
/// Keeps flows in memory and answers the flow endpoints the client uses.
/// Run states are served from a separate file URL so that clients must
/// follow `stateUrl`.
#[derive(Clone)]
pub struct FlowBackend {
    base_uri: String,
    state: Arc<Mutex<BackendState>>,
}

impl FlowBackend {
    /// Start a backend on a fresh mock server
    pub async fn start() -> (MockServer, Self) {
        let server = MockServer::start().await;
        let backend = Self {
            base_uri: server.uri(),
            state: Arc::new(Mutex::new(BackendState::default())),
        };
        Mock::given(any())
            .respond_with(backend.clone())
            .mount(&server)
            .await;
        (server, backend)
    }

    /// API base URL to configure the client with
    pub fn api_url(&self) -> String {
        format!("{}{}", self.base_uri, API_PREFIX)
    }

    /// Seed a flow
    pub fn insert_flow(&self, flow: Flow) {
        self.state.lock().flows.push(flow);
    }

    /// Flows currently stored
    pub fn flows(&self) -> Vec<Flow> {
        self.state.lock().flows.clone()
    }

    /// Every multipart upload received, in order
    pub fn uploads(&self) -> Vec<Upload> {
        self.state.lock().uploads.clone()
    }

    /// Bodies of every run request, in order
    pub fn executions(&self) -> Vec<Value> {
        self.state.lock().executions.clone()
    }

    fn record_upload(&self, request: &Request, parts: &[UploadedPart]) {
        self.state.lock().uploads.push(Upload {
            method: request.method.to_string(),
            path: request.url.path().to_string(),
            parts: parts.to_vec(),
        });
    }

    fn flow_part(parts: &[UploadedPart]) -> Option<Value> {
        parts
            .iter()
            .find(|part| part.name == FLOW_PART)
            .and_then(|part| serde_json::from_slice(&part.data).ok())
    }

    fn create_flow(&self, request: &Request, collection_id: &str) -> ResponseTemplate {
        let parts = multipart_parts(request);
        self.record_upload(request, &parts);

        let collection_id: CollectionId = match collection_id.parse() {
            Ok(id) => id,
            Err(_) => return ResponseTemplate::new(400),
        };
        let mut version: FlowVersion = match Self::flow_part(&parts)
            .and_then(|body| serde_json::from_value(body["version"].clone()).ok())
        {
            Some(version) => version,
            None => return ResponseTemplate::new(400),
        };

        let flow_id = FlowId::new();
        version.id = FlowVersionId::new();
        version.flow_id = flow_id;
        let flow = Flow {
            id: flow_id,
            collection_id,
            last_version: version,
            epoch_creation_time: 1_700_000_000,
            epoch_update_time: 1_700_000_000,
        };
        self.state.lock().flows.push(flow.clone());
        ResponseTemplate::new(201).set_body_json(&flow)
    }

    fn update_flow(&self, request: &Request, flow_id: &str) -> ResponseTemplate {
        let parts = multipart_parts(request);
        self.record_upload(request, &parts);

        let version: FlowVersion = match Self::flow_part(&parts)
            .and_then(|body| serde_json::from_value(body).ok())
        {
            Some(version) => version,
            None => return ResponseTemplate::new(400),
        };

        let mut state = self.state.lock();
        match state.flows.iter_mut().find(|flow| flow.id.to_string() == flow_id) {
            Some(flow) => {
                flow.last_version = version;
                flow.epoch_update_time += 1;
                ResponseTemplate::new(200).set_body_json(&*flow)
            }
            None => ResponseTemplate::new(404),
        }
    }

    fn execute(&self, request: &Request, collection_version_id: &str, flow_version_id: &str) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };

        let run_id = InstanceRunId::new();
        let state_path = format!("/files/runs/{}/state.json", run_id);
        let mut state = self.state.lock();
        state.run_states.insert(
            state_path.clone(),
            json!({"trigger": body["trigger"].clone(), "steps": {}}),
        );
        state.executions.push(body);

        ResponseTemplate::new(201).set_body_json(json!({
            "id": run_id,
            "collectionVersionId": collection_version_id,
            "flowVersionId": flow_version_id,
            "status": "SUCCEEDED",
            "startTime": 1_700_000_000,
            "finishTime": 1_700_000_001,
            "stateUrl": format!("{}{}", self.base_uri, state_path)
        }))
    }

    fn route(&self, request: &Request) -> ResponseTemplate {
        let method = request.method.to_string();
        let path = request.url.path().to_string();

        if method == "GET" {
            if let Some(state) = self.state.lock().run_states.get(&path) {
                return ResponseTemplate::new(200).set_body_json(state);
            }
        }

        let segments: Vec<&str> = match path.strip_prefix(API_PREFIX) {
            Some(rest) => rest.trim_start_matches('/').split('/').collect(),
            None => return ResponseTemplate::new(404),
        };

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["collections", collection_id, "flows"]) => {
                self.create_flow(request, collection_id)
            }
            ("GET", ["collections", collection_id, "flows"]) => {
                let limit = request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "limit")
                    .and_then(|(_, value)| value.parse::<usize>().ok())
                    .unwrap_or(usize::MAX);
                let data: Vec<Flow> = self
                    .flows()
                    .into_iter()
                    .filter(|flow| flow.collection_id.to_string() == *collection_id)
                    .take(limit)
                    .collect();
                ResponseTemplate::new(200).set_body_json(SeekPage {
                    data,
                    next: None,
                    previous: None,
                })
            }
            ("GET", ["collections", collection_id, "flows", "count"]) => {
                let count = self
                    .flows()
                    .iter()
                    .filter(|flow| flow.collection_id.to_string() == *collection_id)
                    .count();
                ResponseTemplate::new(200).set_body_json(count)
            }
            ("GET", ["flows", "versions", version_id]) => {
                match self
                    .flows()
                    .into_iter()
                    .find(|flow| flow.last_version.id.to_string() == *version_id)
                {
                    Some(flow) => ResponseTemplate::new(200).set_body_json(&flow.last_version),
                    None => ResponseTemplate::new(404),
                }
            }
            ("GET", ["flows", flow_id, "versions"]) => {
                let versions: Vec<FlowVersion> = self
                    .flows()
                    .into_iter()
                    .filter(|flow| flow.id.to_string() == *flow_id)
                    .map(|flow| flow.last_version)
                    .collect();
                ResponseTemplate::new(200).set_body_json(versions)
            }
            ("GET", ["flows", flow_id]) => {
                match self.flows().into_iter().find(|flow| flow.id.to_string() == *flow_id) {
                    Some(flow) => ResponseTemplate::new(200).set_body_json(&flow),
                    None => ResponseTemplate::new(404),
                }
            }
            ("DELETE", ["flows", flow_id]) => {
                let mut state = self.state.lock();
                let before = state.flows.len();
                state.flows.retain(|flow| flow.id.to_string() != *flow_id);
                if state.flows.len() < before {
                    ResponseTemplate::new(204)
                } else {
                    ResponseTemplate::new(404)
                }
            }
            ("PUT", ["flows", flow_id, "versions", "latest"]) => self.update_flow(request, flow_id),
            ("POST", ["collection-versions", cv_id, "flow-versions", fv_id, "runs"]) => {
                self.execute(request, cv_id, fv_id)
            }
            _ => ResponseTemplate::new(404),
        }
    }
}

impl Respond for FlowBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.route(request)
    }
}

/// A builder session against a [`FlowBackend`]
pub struct BuilderSession {
    /// Mock server hosting the backend; dropping it stops the backend
    pub server: MockServer,
    /// The backend
    pub backend: FlowBackend,
    /// Flow service under test
    pub service: FlowService,
    /// Builder store
    pub store: Arc<InMemoryBuilderStore>,
    /// Modal service
    pub modals: Arc<InMemoryModalService>,
    /// Dirty code cache
    pub code: Arc<InMemoryCodeArtifactCache>,
    /// Configs sidebar
    pub sidebar: ConfigsSidebar,
    /// The open collection
    pub collection: Collection,
}

impl BuilderSession {
    /// Start a backend and open an empty collection
    pub async fn start() -> Self {
        init_test_tracing();

        let (server, backend) = FlowBackend::start().await;
        let collection = Collection {
            id: CollectionId::new(),
            display_name: "Integration collection".to_string(),
        };
        let store = Arc::new(InMemoryBuilderStore::with_collection(collection.clone(), Vec::new()));
        let modals = Arc::new(InMemoryModalService::new());
        let code = Arc::new(InMemoryCodeArtifactCache::new());

        let service = FlowService::new(
            ClientConfig::with_api_url(backend.api_url()),
            store.clone(),
            modals.clone(),
            code.clone(),
        )
        .expect("Failed to create flow service");
        let sidebar = ConfigsSidebar::new(store.clone(), modals.clone());

        Self {
            server,
            backend,
            service,
            store,
            modals,
            code,
            sidebar,
            collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_multipart() {
        let body = b"--b0undary\r\n\
Content-Disposition: form-data; name=\"flow\"; filename=\"blob\"\r\n\
Content-Type: application/json\r\n\
\r\n\
{\"a\":1}\r\n\
--b0undary\r\n\
Content-Disposition: form-data; name=\"regions/eu\"; filename=\"regions_eu.zip\"\r\n\
\r\n\
xyz\r\n\
--b0undary--\r\n";

        let parts = read_multipart("multipart/form-data; boundary=b0undary", body.to_vec())
            .await
            .unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "flow");
        assert_eq!(parts[0].file_name.as_deref(), Some("blob"));
        assert_eq!(parts[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(parts[0].data, b"{\"a\":1}".to_vec());
        assert_eq!(parts[1].name, "regions/eu");
        assert_eq!(parts[1].file_name.as_deref(), Some("regions_eu.zip"));
        assert_eq!(parts[1].content_type, None);
        assert_eq!(parts[1].data, b"xyz".to_vec());
    }
}
