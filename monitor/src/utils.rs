//! Utility functions

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version information for the monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Wall clock in the service's local time
///
/// Machine stamps carry no timezone; they are compared against UTC shifted
/// by the configured deployment offset rather than the host's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceClock {
    timezone_offset_minutes: i32,
}

impl ServiceClock {
    /// `timezone_offset_minutes` is added to local time to reach UTC
    pub fn new(timezone_offset_minutes: i32) -> Self {
        Self {
            timezone_offset_minutes,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.local_time(Utc::now())
    }

    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc() - Duration::minutes(i64::from(self.timezone_offset_minutes))
    }
}
