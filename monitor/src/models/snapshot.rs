//! Raw room snapshots

use std::borrow::Cow;

use easywash_api::{Room, RoomResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::MonitorError;

/// Full raw response of a room request
///
/// Keeps the body text exactly as received next to its parsed form, so the
/// persisted snapshot is never re-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    raw: String,
    value: Value,
}

impl Snapshot {
    /// Parse a response body; a body that is not JSON violates the protocol
    pub fn parse(raw: String) -> Result<Self, MonitorError> {
        let value = serde_json::from_str(&raw)
            .map_err(|e| MonitorError::ProtocolError(format!("response is not JSON: {}", e)))?;
        Ok(Self { raw, value })
    }

    /// Body text as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Extract `result.body.objekt.raum`
    pub fn room(&self) -> Result<Room, MonitorError> {
        RoomResponse::deserialize(&self.value)
            .map(|response| response.result.body.objekt.raum)
            .map_err(|e| MonitorError::ProtocolError(format!("unexpected room response: {}", e)))
    }

    /// Payload for a single data log line
    ///
    /// The raw body when it fits on one line, compact JSON of the same value
    /// otherwise.
    pub fn log_payload(&self) -> Cow<'_, str> {
        if self.raw.contains(['\n', '\r']) {
            Cow::Owned(self.value.to_string())
        } else {
            Cow::Borrowed(&self.raw)
        }
    }
}

/// A fetched room together with the response it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct RoomState {
    pub snapshot: Snapshot,
    pub room: Room,
}
