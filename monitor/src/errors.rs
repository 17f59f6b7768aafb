//! Error types for the laundry monitor

use thiserror::Error;

/// Main error type for the laundry monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Data contract violation: {0}")]
    DataContractError(String),

    #[error("IO error: {0}")]
    FileIoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Tag identifying the class of a [`MonitorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Network,
    Timeout,
    Protocol,
    DataContract,
    FileIo,
    Json,
    Config,
}

impl MonitorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MonitorError::AuthError(_) => ErrorKind::Auth,
            MonitorError::NetworkError(_) => ErrorKind::Network,
            MonitorError::TimeoutError(_) => ErrorKind::Timeout,
            MonitorError::ProtocolError(_) => ErrorKind::Protocol,
            MonitorError::DataContractError(_) => ErrorKind::DataContract,
            MonitorError::FileIoError(_) => ErrorKind::FileIo,
            MonitorError::JsonError(_) => ErrorKind::Json,
            MonitorError::ConfigError(_) => ErrorKind::Config,
        }
    }
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MonitorError::TimeoutError(err.to_string())
        } else {
            MonitorError::NetworkError(err.to_string())
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Auth => "auth",
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Protocol => "protocol",
            ErrorKind::DataContract => "data-contract",
            ErrorKind::FileIo => "file-io",
            ErrorKind::Json => "json",
            ErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}
