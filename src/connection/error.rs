use thiserror::Error;

/// Why a connection test failed.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Timeout must be at least one second")]
    InvalidTimeout,

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Could not reach {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} timed out after {timeout_secs}s")]
    Timeout { endpoint: String, timeout_secs: u64 },

    /// Remote rejected the credentials (401/403)
    #[error("Authentication rejected by remote (HTTP {status})")]
    Authentication { status: u16 },

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },
}

impl ConnectionError {
    /// Short machine-readable kind, used in reports and audit events.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionError::InvalidEndpoint { .. } => "invalid_endpoint",
            ConnectionError::InvalidTimeout => "invalid_timeout",
            ConnectionError::Client(_) => "client",
            ConnectionError::Network { .. } => "network",
            ConnectionError::Timeout { .. } => "timeout",
            ConnectionError::Authentication { .. } => "authentication",
            ConnectionError::UnexpectedStatus { .. } => "unexpected_status",
        }
    }
}
