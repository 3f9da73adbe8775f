use serde::Serialize;
use tracing::warn;

use crate::{
    connection::{error::ConnectionError, tester::ConnectionTester},
    translate::translator::Translator,
};

pub const SUCCESS_MESSAGE: &str = "Connection successful.";
pub const FAILURE_MESSAGE: &str = "Connection wasn't successful.";

/// Outcome of one connection test, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub success: bool,

    /// One of the two fixed messages, translated
    pub message: String,

    /// Error kind, e.g. `authentication`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ConnectionReport {
    pub fn from_result<T: Translator + ?Sized>(
        result: &Result<(), ConnectionError>,
        translator: &T,
    ) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                message: translator.translate(SUCCESS_MESSAGE, &[]),
                error_kind: None,
                detail: None,
            },
            Err(e) => Self {
                success: false,
                message: translator.translate(FAILURE_MESSAGE, &[]),
                error_kind: Some(e.kind().to_string()),
                detail: Some(e.to_string()),
            },
        }
    }
}

/// Run `tester` once and build the report.
pub fn check_connection<C, T>(tester: &C, translator: &T) -> ConnectionReport
where
    C: ConnectionTester + ?Sized,
    T: Translator + ?Sized,
{
    let result = tester.test_connection();
    if let Err(ref e) = result {
        warn!(kind = e.kind(), error = %e, "connection test failed");
    }
    ConnectionReport::from_result(&result, translator)
}

/// Format a connection report for terminal output.
///
/// ```text
/// ✓ Connection successful.
/// ✗ Connection wasn't successful.
///     [authentication] Authentication rejected by remote (HTTP 401)
/// ```
pub fn format_console_status(report: &ConnectionReport) -> String {
    let marker = if report.success { "\u{2713}" } else { "\u{2717}" };
    let mut out = format!("{} {}\n", marker, report.message);

    if let Some(ref detail) = report.detail {
        let kind = report.error_kind.as_deref().unwrap_or("error");
        out.push_str(&format!("    [{}] {}\n", kind, detail));
    }

    out
}
