//! Room state source used by the poll loop

use std::sync::Arc;

use async_trait::async_trait;

use crate::authn::session::AuthSession;
use crate::errors::MonitorError;
use crate::http::client::HttpClient;
use crate::models::snapshot::RoomState;

/// Source of room states, one call per cycle
#[async_trait]
pub trait RoomStateSource: Send + Sync {
    /// Authenticate and fetch the current state of a room
    async fn fetch(&self, room_number: u32) -> Result<RoomState, MonitorError>;
}

/// Room states from the EasyWash API, with a fresh token per call
pub struct EasyWashSource {
    session: AuthSession,
    http_client: Arc<HttpClient>,
    api_version: String,
}

impl EasyWashSource {
    pub fn new(session: AuthSession, http_client: Arc<HttpClient>, api_version: String) -> Self {
        Self {
            session,
            http_client,
            api_version,
        }
    }
}

#[async_trait]
impl RoomStateSource for EasyWashSource {
    async fn fetch(&self, room_number: u32) -> Result<RoomState, MonitorError> {
        let token = self.session.authenticate().await?;
        self.http_client
            .fetch_room_state(&token, &self.api_version, room_number)
            .await
    }
}
