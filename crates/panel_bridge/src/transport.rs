use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Origin the host serves panel callbacks on.
    pub base_url: String,
    /// Host-assigned resource name; first path segment of every request.
    pub resource_name: String,
    pub request_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:30120".to_string(),
            resource_name: "image_rotator".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("host responded with status {0}")]
    Status(u16),
}

/// Outbound requests from the panel to its host.
#[async_trait::async_trait]
pub trait HostTransport: Send + Sync {
    /// POSTs `body` as JSON to the host's `event` callback. Any non-success
    /// response is an error; the response body is not read.
    async fn post_event(&self, event: &str, body: &Value) -> Result<(), TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    /// `<base_url>/<resource_name>/<event>`
    pub fn endpoint(&self, event: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| TransportError::InvalidEndpoint(format!("{}: {err}", self.settings.base_url)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                TransportError::InvalidEndpoint(format!(
                    "{} cannot carry a path",
                    self.settings.base_url
                ))
            })?;
            segments
                .pop_if_empty()
                .push(&self.settings.resource_name)
                .push(event);
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl HostTransport for ReqwestTransport {
    async fn post_event(&self, event: &str, body: &Value) -> Result<(), TransportError> {
        let url = self.endpoint(event)?;
        let body = serde_json::to_vec(body).map_err(|err| TransportError::Encode(err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    TransportError::Network(err.to_string())
}
