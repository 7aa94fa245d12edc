//! HTTP plumbing shared by the client operations

use flowbuilder_artifacts::PackagedArtifact;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Name of the multipart part carrying the flow JSON
pub const FLOW_PART: &str = "flow";

/// Maps a transport error to a ClientError
pub(crate) fn map_http_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Communication(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ClientError::Communication(format!("Connection error: {}", error))
    } else {
        ClientError::Http(error.to_string())
    }
}

/// Pass successful responses through, turn the rest into errors
pub(crate) async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| format!("HTTP error: {}", status));
    warn!(%status, %url, "Request failed");

    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(url)),
        status => Err(ClientError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Check the status and decode a JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Multipart form with the flow JSON and one file part per artifact
pub(crate) fn flow_form(flow_json: &[u8], artifacts: &[PackagedArtifact]) -> ClientResult<Form> {
    let flow_part = Part::bytes(flow_json.to_vec())
        .file_name("blob")
        .mime_str("application/json")
        .map_err(map_http_error)?;

    let mut form = Form::new().part(FLOW_PART, flow_part);
    for artifact in artifacts {
        let part = Part::bytes(artifact.bytes.clone())
            .file_name(artifact.file_name.clone())
            .mime_str(artifact.mime())
            .map_err(map_http_error)?;
        form = form.part(artifact.name.clone(), part);
    }

    Ok(form)
}
