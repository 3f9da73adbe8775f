use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use content_mapping::connection::error::ConnectionError;
use content_mapping::connection::status::{
    ConnectionReport, FAILURE_MESSAGE, SUCCESS_MESSAGE, check_connection, format_console_status,
};
use content_mapping::connection::tester::{
    ConnectionTester, HttpConnectionTester, StaticConnectionTester,
};
use content_mapping::translate::translator::{CatalogTranslator, PassthroughTranslator};

// ============================================================================
// Stub HTTP server
// ============================================================================

/// Serve exactly one request with `status_line`, returning the endpoint URL
/// and a handle yielding the request head.
fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = Vec::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            head.push(line);
        }

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status_line
        )
        .unwrap();
        stream.flush().unwrap();
        head
    });

    (format!("http://{}/api/ping", addr), handle)
}

/// Accept one connection and never answer it.
fn accept_and_stall() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_secs(5));
    });

    format!("http://{}/api/ping", addr)
}

// ============================================================================
// HTTP tester
// ============================================================================

#[test]
fn http_tester_success_on_2xx() {
    let (endpoint, handle) = serve_once("200 OK");
    let result = HttpConnectionTester::new(&endpoint).test_connection();
    assert!(result.is_ok(), "Got {:?}", result);

    let head = handle.join().unwrap();
    assert!(head[0].starts_with("GET /api/ping "));
}

#[test]
fn http_tester_sends_bearer_key() {
    let (endpoint, handle) = serve_once("202 Accepted");
    HttpConnectionTester::new(&endpoint)
        .with_api_key("secret-token")
        .test_connection()
        .unwrap();

    let head = handle.join().unwrap();
    assert!(
        head.iter()
            .any(|h| h.eq_ignore_ascii_case("authorization: Bearer secret-token")),
        "Headers: {:?}",
        head
    );
}

#[test]
fn http_tester_authentication_failure() {
    let (endpoint, handle) = serve_once("401 Unauthorized");
    let err = HttpConnectionTester::new(&endpoint)
        .test_connection()
        .unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, ConnectionError::Authentication { status: 401 }));
    assert_eq!(err.kind(), "authentication");
}

#[test]
fn http_tester_forbidden_is_authentication() {
    let (endpoint, handle) = serve_once("403 Forbidden");
    let err = HttpConnectionTester::new(&endpoint)
        .test_connection()
        .unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, ConnectionError::Authentication { status: 403 }));
}

#[test]
fn http_tester_unexpected_status() {
    let (endpoint, handle) = serve_once("500 Internal Server Error");
    let err = HttpConnectionTester::new(&endpoint)
        .test_connection()
        .unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, ConnectionError::UnexpectedStatus { status: 500 }));
}

#[test]
fn http_tester_network_failure() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = HttpConnectionTester::new(&format!("http://127.0.0.1:{}/", port))
        .with_timeout(5)
        .test_connection()
        .unwrap_err();
    assert!(
        matches!(err, ConnectionError::Network { .. }),
        "Got {:?}",
        err
    );
}

#[test]
fn http_tester_timeout() {
    let endpoint = accept_and_stall();
    let err = HttpConnectionTester::new(&endpoint)
        .with_timeout(1)
        .test_connection()
        .unwrap_err();

    assert!(
        matches!(err, ConnectionError::Timeout { timeout_secs: 1, .. }),
        "Got {:?}",
        err
    );
    assert_eq!(err.kind(), "timeout");
}

#[test]
fn http_tester_rejects_zero_timeout() {
    let err = HttpConnectionTester::new("http://127.0.0.1:9/")
        .with_timeout(0)
        .test_connection()
        .unwrap_err();
    assert!(matches!(err, ConnectionError::InvalidTimeout), "Got {:?}", err);
    assert_eq!(err.kind(), "invalid_timeout");
}

#[test]
fn http_tester_rejects_invalid_endpoint() {
    for endpoint in [
        "",
        "   ",
        "ftp://example.com",
        "example.com",
        "http://",
        "https://",
        "http://exa mple.com/",
        "http://[::1/ping",
    ] {
        let err = HttpConnectionTester::new(endpoint)
            .test_connection()
            .unwrap_err();
        assert!(
            matches!(err, ConnectionError::InvalidEndpoint { .. }),
            "{:?} -> {:?}",
            endpoint,
            err
        );
    }
}

// ============================================================================
// Status report
// ============================================================================

#[test]
fn report_success_message() {
    let report = check_connection(&StaticConnectionTester::Succeeds, &PassthroughTranslator);
    assert!(report.success);
    assert_eq!(report.message, "Connection successful.");
    assert_eq!(report.message, SUCCESS_MESSAGE);
    assert!(report.detail.is_none());
    assert_eq!(format_console_status(&report), "\u{2713} Connection successful.\n");
}

#[test]
fn report_failure_message_with_kind() {
    let tester = StaticConnectionTester::Fails(|| ConnectionError::Authentication { status: 401 });
    let report = check_connection(&tester, &PassthroughTranslator);

    assert!(!report.success);
    assert_eq!(report.message, "Connection wasn't successful.");
    assert_eq!(report.message, FAILURE_MESSAGE);
    assert_eq!(report.error_kind.as_deref(), Some("authentication"));

    let console = format_console_status(&report);
    assert!(console.starts_with("\u{2717} Connection wasn't successful.\n"));
    assert!(console.contains("[authentication] Authentication rejected by remote (HTTP 401)"));
}

#[test]
fn report_messages_are_translated() {
    let mut catalog = HashMap::new();
    catalog.insert(SUCCESS_MESSAGE.to_string(), "Verbindung erfolgreich.".to_string());
    let translator = CatalogTranslator::new(catalog);

    let report = ConnectionReport::from_result(&Ok(()), &translator);
    assert_eq!(report.message, "Verbindung erfolgreich.");
}

#[test]
fn report_json_omits_empty_detail() {
    let report = ConnectionReport::from_result(&Ok(()), &PassthroughTranslator);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"success": true, "message": "Connection successful."})
    );
}
