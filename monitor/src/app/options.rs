//! Application configuration options

use crate::errors::MonitorError;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::{ApiSettings, Credentials, Settings};
use crate::workers::poller;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Remote API configuration
    pub api: ApiSettings,

    /// Service account
    pub credentials: Credentials,

    /// Deployment offset, minutes to add to local time to reach UTC
    pub timezone_offset_minutes: i32,

    /// Where snapshots, pages and data logs go
    pub layout: StorageLayout,

    /// Poll loop options
    pub poller: poller::Options,
}

impl AppOptions {
    /// Combine the settings file with the command line
    pub fn from_settings(
        settings: &Settings,
        room_number: u32,
        verbose: bool,
    ) -> Result<Self, MonitorError> {
        if settings.poll_interval_secs == 0 {
            return Err(MonitorError::ConfigError(
                "poll_interval_secs must be positive".to_string(),
            ));
        }

        Ok(Self {
            api: settings.api.clone(),
            credentials: settings.credentials()?,
            timezone_offset_minutes: settings.timezone_offset_minutes,
            layout: StorageLayout::from_settings(settings),
            poller: poller::Options {
                room_number,
                interval: settings.poll_interval(),
                verbose,
            },
        })
    }
}
