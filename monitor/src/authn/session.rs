//! Authentication session

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::authn::token::AccessToken;
use crate::errors::MonitorError;
use crate::http::client::HttpClient;
use crate::storage::settings::Credentials;

/// Exchanges the service account for tokens
///
/// The service rejects a token used right after it was issued ("ungültiges
/// token"), so every token is held back for `settle_delay` before it is
/// returned.
pub struct AuthSession {
    http_client: Arc<HttpClient>,
    credentials: Credentials,
    settle_delay: Duration,
}

impl AuthSession {
    /// Create a new session
    pub fn new(
        http_client: Arc<HttpClient>,
        credentials: Credentials,
        settle_delay: Duration,
    ) -> Self {
        Self {
            http_client,
            credentials,
            settle_delay,
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Obtain a token that is ready for use
    pub async fn authenticate(&self) -> Result<AccessToken, MonitorError> {
        let raw = self.http_client.request_token(&self.credentials).await?;
        let token = AccessToken::new(raw, Utc::now());

        debug!("Token issued, settling for {:?}", self.settle_delay);
        tokio::time::sleep(self.settle_delay).await;

        Ok(token)
    }
}
