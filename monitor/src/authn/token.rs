//! Access token issued by the service

use chrono::{DateTime, Utc};

/// A short-lived token, valid for a single fetch
#[derive(Clone)]
pub struct AccessToken {
    raw: String,
    issued_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(raw: String, issued_at: DateTime<Utc>) -> Self {
        Self { raw, issued_at }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("raw", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
