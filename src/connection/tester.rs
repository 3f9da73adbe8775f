use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

use crate::connection::error::ConnectionError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub trait ConnectionTester {
    fn test_connection(&self) -> Result<(), ConnectionError>;
}

// ============================================================================
// HTTP tester
// ============================================================================

/// Probes a remote API with a single GET request.
pub struct HttpConnectionTester {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl HttpConnectionTester {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate endpoint and timeout before any request is sent.
    fn check_config(&self) -> Result<Url, ConnectionError> {
        let invalid = |reason: &str| ConnectionError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: reason.to_string(),
        };

        if self.timeout_secs == 0 {
            return Err(ConnectionError::InvalidTimeout);
        }

        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(invalid("endpoint is empty"));
        }

        let url = Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("expected an http:// or https:// URL"));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("URL has no host"));
        }
        Ok(url)
    }
}

impl ConnectionTester for HttpConnectionTester {
    fn test_connection(&self) -> Result<(), ConnectionError> {
        let url = self.check_config()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(ConnectionError::Client)?;

        let mut request = client.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(endpoint = %self.endpoint, "testing connection");

        let response = request.send().map_err(|e| {
            if e.is_builder() {
                ConnectionError::InvalidEndpoint {
                    endpoint: self.endpoint.clone(),
                    reason: e.to_string(),
                }
            } else if e.is_timeout() {
                ConnectionError::Timeout {
                    endpoint: self.endpoint.clone(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                ConnectionError::Network {
                    endpoint: self.endpoint.clone(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        info!(endpoint = %self.endpoint, status = status.as_u16(), "connection test response");

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(ConnectionError::Authentication {
                status: status.as_u16(),
            })
        } else {
            Err(ConnectionError::UnexpectedStatus {
                status: status.as_u16(),
            })
        }
    }
}

// ============================================================================
// Static tester (for testing without a remote)
// ============================================================================

/// Always returns the configured outcome.
pub enum StaticConnectionTester {
    Succeeds,
    Fails(fn() -> ConnectionError),
}

impl ConnectionTester for StaticConnectionTester {
    fn test_connection(&self) -> Result<(), ConnectionError> {
        match self {
            StaticConnectionTester::Succeeds => Ok(()),
            StaticConnectionTester::Fails(make) => Err(make()),
        }
    }
}
