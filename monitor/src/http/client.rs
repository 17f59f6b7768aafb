//! HTTP client implementation

use std::time::Duration;

use easywash_api::ApiRequest;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::errors::MonitorError;

/// HTTP client for the EasyWash endpoint
///
/// The service exposes a single URL; the request type travels inside the JSON
/// envelope, so every call is a POST to the same endpoint.
pub struct HttpClient {
    client: Client,
    endpoint: Url,
}

impl HttpClient {
    /// Create a new HTTP client with a per-request timeout
    pub fn new(endpoint: Url, request_timeout: Duration) -> Result<Self, MonitorError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Get the endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST an envelope and return the response body text unchanged
    ///
    /// A non-2xx status is turned into an error by `on_status`, since its
    /// meaning depends on the request type.
    pub(crate) async fn post_envelope(
        &self,
        request: &ApiRequest,
        on_status: fn(String) -> MonitorError,
    ) -> Result<String, MonitorError> {
        debug!("POST {} ({:?})", self.endpoint, request.request.head.requesttype);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| {
            MonitorError::ProtocolError(format!("response body is not UTF-8: {}", e))
        })?;

        if !status.is_success() {
            // reported once by the caller
            debug!("HTTP POST failed: {} - {}", status, body);
            return Err(on_status(format!("HTTP {}: {}", status, body)));
        }

        Ok(body)
    }
}
