//! Room state requests

use easywash_api::ApiRequest;
use tracing::debug;

use crate::authn::token::AccessToken;
use crate::errors::MonitorError;
use crate::http::client::HttpClient;
use crate::models::snapshot::{RoomState, Snapshot};

impl HttpClient {
    /// Fetch the raw state of one room
    pub async fn fetch_room_state(
        &self,
        token: &AccessToken,
        api_version: &str,
        room_number: u32,
    ) -> Result<RoomState, MonitorError> {
        let request = ApiRequest::get_room(token.as_str(), api_version, room_number);

        let body = self
            .post_envelope(&request, MonitorError::ProtocolError)
            .await?;

        let snapshot = Snapshot::parse(body)?;
        let room = snapshot.room()?;

        debug!(
            "Room {} ({}) reports {} machines",
            room_number,
            room.bezeichnung,
            room.maschinen.len()
        );
        Ok(RoomState { snapshot, room })
    }
}
