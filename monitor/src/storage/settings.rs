//! Settings file management

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::MonitorError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Environment variable naming the settings file
pub const SETTINGS_PATH_ENV: &str = "LAUNDRY_MONITOR_SETTINGS";

/// Environment variables overriding the service account
pub const USER_ENV: &str = "EASYWASH_USER";
pub const PASS_ENV: &str = "EASYWASH_PASS";

/// Monitor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory for the rolling diagnostic log; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Remote API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Service account
    #[serde(default)]
    pub credentials: CredentialSettings,

    /// Seconds between cycle starts
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Minutes to add to local time to reach UTC (CEST is -120)
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_minutes: i32,

    /// Directory holding the latest snapshot and page per room
    #[serde(default = "default_serve_dir")]
    pub serve_dir: PathBuf,

    /// Directory holding the per-day raw data logs
    #[serde(default = "default_data_log_dir")]
    pub data_log_dir: PathBuf,
}

fn default_poll_interval() -> u64 {
    60
}

fn default_timezone_offset() -> i32 {
    -60
}

fn default_serve_dir() -> PathBuf {
    PathBuf::from("serve")
}

fn default_data_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_dir: None,
            api: ApiSettings::default(),
            credentials: CredentialSettings::default(),
            poll_interval_secs: default_poll_interval(),
            timezone_offset_minutes: default_timezone_offset(),
            serve_dir: default_serve_dir(),
            data_log_dir: default_data_log_dir(),
        }
    }
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Endpoint every request is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,

    /// Upper bound for a single request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Wait after a token is issued before it is accepted by the service
    #[serde(default = "default_settle_delay")]
    pub token_settle_delay_millis: u64,

    /// API version sent with content requests
    #[serde(default = "default_api_version")]
    pub version: String,
}

fn default_endpoint() -> Url {
    Url::parse("http://ewnt.schneidereit-trac.com/api").expect("static endpoint URL is valid")
}

fn default_request_timeout() -> u64 {
    200
}

fn default_settle_delay() -> u64 {
    1000
}

fn default_api_version() -> String {
    easywash_api::API_VERSION.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
            token_settle_delay_millis: default_settle_delay(),
            version: default_api_version(),
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn token_settle_delay(&self) -> Duration {
        Duration::from_millis(self.token_settle_delay_millis)
    }
}

/// Service account as written in the settings file
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialSettings {
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, skip_serializing)]
    pub pass: Option<String>,
}

impl std::fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Resolved service account used to authenticate
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub pass: SecretString,
}

impl Settings {
    /// Resolve the service account, environment first
    pub fn credentials(&self) -> Result<Credentials, MonitorError> {
        let user = std::env::var(USER_ENV)
            .ok()
            .or_else(|| self.credentials.user.clone())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                MonitorError::ConfigError(format!(
                    "no service user configured (set credentials.user or {})",
                    USER_ENV
                ))
            })?;

        let pass = std::env::var(PASS_ENV)
            .ok()
            .or_else(|| self.credentials.pass.clone())
            .map(SecretString::from)
            .ok_or_else(|| {
                MonitorError::ConfigError(format!(
                    "no service password configured (set credentials.pass or {})",
                    PASS_ENV
                ))
            })?;

        Ok(Credentials { user, pass })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Read settings from `file`, falling back to defaults when it is absent
    pub async fn load(file: &File) -> Result<Self, MonitorError> {
        if !file.exists().await {
            return Ok(Self::default());
        }
        file.read_json().await
    }
}

/// Location of the settings file
pub fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}
