use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One line of the JSONL audit trail.
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    pub timestamp_ms: u128,

    pub command: String,

    /// `ok` or `failed`
    pub outcome: String,

    pub detail: Option<String>,
    pub fingerprint: Option<String>,
    pub element_count: Option<usize>,
}

impl AuditEvent {
    pub fn now(command: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            command: command.to_string(),
            outcome: "ok".to_string(),
            detail: None,
            fingerprint: None,
            element_count: None,
        }
    }

    pub fn failed(mut self, detail: impl ToString) -> Self {
        self.outcome = "failed".to_string();
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: &str) -> Self {
        self.fingerprint = Some(fingerprint.to_string());
        self
    }

    pub fn with_element_count(mut self, count: usize) -> Self {
        self.element_count = Some(count);
        self
    }
}
