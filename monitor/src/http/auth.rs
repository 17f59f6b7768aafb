//! Authentication requests

use easywash_api::{ApiRequest, AuthResponse};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::errors::MonitorError;
use crate::http::client::HttpClient;
use crate::storage::settings::Credentials;

impl HttpClient {
    /// Exchange the service account for a fresh token
    pub async fn request_token(&self, credentials: &Credentials) -> Result<String, MonitorError> {
        let request =
            ApiRequest::authentication(&credentials.user, credentials.pass.expose_secret());

        let body = self.post_envelope(&request, MonitorError::AuthError).await?;

        let response: AuthResponse = serde_json::from_str(&body).map_err(|e| {
            MonitorError::AuthError(format!("unexpected authentication response: {}", e))
        })?;

        let token = response.result.head.credentials.token;
        if token.is_empty() {
            return Err(MonitorError::AuthError(
                "authentication response carries an empty token".to_string(),
            ));
        }

        debug!("Received token for user {}", credentials.user);
        Ok(token)
    }
}
