// CloudFormation custom resource responses
//
// The response document is PUT to the pre-signed S3 URL from the request.
// The URL is signed without a content type, so the header must be empty.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SyncError};
use crate::event::CustomResourceRequest;

/// Only success is ever reported; a failed sync call ends the invocation
/// before a response is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: Map<String, Value>,
}

impl CustomResourceResponse {
    /// SUCCESS with no data. Keeps the existing physical id on Update/Delete so
    /// CloudFormation does not treat the resource as replaced.
    pub fn success(request: &CustomResourceRequest, log_stream: &str) -> Self {
        let physical_resource_id = request
            .physical_resource_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| log_stream.to_string());

        Self {
            status: ResponseStatus::Success,
            reason: format!("See the details in CloudWatch Log Stream: {}", log_stream),
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            no_echo: false,
            data: Map::new(),
        }
    }
}

#[async_trait]
pub trait CompletionSender: Send + Sync {
    async fn send(&self, response_url: &str, response: &CustomResourceResponse) -> Result<()>;
}

/// reqwest-backed sender, one client per process
#[derive(Clone)]
pub struct HttpCompletionSender {
    client: reqwest::Client,
}

impl HttpCompletionSender {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncError::Completion(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpCompletionSender {
    /// PUT request carrying the response document, Content-Type left empty
    pub(crate) fn build_request(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<reqwest::Request> {
        let body = serde_json::to_string(response)
            .map_err(|e| SyncError::Completion(format!("failed to encode response: {}", e)))?;

        self.client
            .put(response_url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .build()
            .map_err(|e| SyncError::Completion(format!("invalid response URL: {}", e)))
    }
}

#[async_trait]
impl CompletionSender for HttpCompletionSender {
    async fn send(&self, response_url: &str, response: &CustomResourceResponse) -> Result<()> {
        let request = self.build_request(response_url, response)?;

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| SyncError::Completion(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Completion(format!(
                "response URL returned HTTP {}",
                status
            )));
        }

        tracing::info!(status = %status, "Custom resource response sent");
        Ok(())
    }
}
