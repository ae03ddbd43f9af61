use super::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 1回だけ固定の JSON レスポンスを返すローカルサーバーを起動し、URL を返す
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    serve_once_as(status_line, "application/json", body).await
}

/// Content-Type を指定して1回だけ応答するローカルサーバー
async fn serve_once_as(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut read = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            read.extend_from_slice(&buf[..n]);
            if read.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            content_type,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}/check_dependencies", addr)
}

struct SlowSource;

impl StatusSource for SlowSource {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<DependencyStatus>> + Send + 'a>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(DependencyStatus {
                success: true,
                message: None,
                dependencies: vec![],
            })
        })
    }
}

// =========================================================================
// parse tests
// =========================================================================

#[test]
fn parse_full_payload() {
    let body = br#"{
        "success": false,
        "message": "Some required dependencies are missing.",
        "dependencies": [
            {"name": "Git", "installed": true, "version": "git version 2.43.0"},
            {"name": "pandas", "installed": false, "version": "Not installed"}
        ]
    }"#;
    let status = DependencyStatus::parse(body).unwrap();
    assert!(!status.success);
    assert_eq!(status.dependencies.len(), 2);
    assert_eq!(status.dependencies[0].version.as_deref(), Some("git version 2.43.0"));
    assert_eq!(status.missing_count(), 1);
}

#[test]
fn parse_without_optional_fields() {
    let body = br#"{"success": true, "dependencies": [{"name": "X", "installed": true}]}"#;
    let status = DependencyStatus::parse(body).unwrap();
    assert!(status.message.is_none());
    assert!(status.dependencies[0].version.is_none());
}

#[test]
fn parse_error_report_surfaces_backend_message() {
    // エンドポイントが例外時に返す形
    let body = br#"{"success": false, "message": "adk_setup exploded"}"#;
    let err = DependencyStatus::parse(body).unwrap_err();
    assert!(!err.is_malformed());
    assert_eq!(err.to_string(), "adk_setup exploded");
}

#[test]
fn parse_missing_dependencies_without_message_is_malformed() {
    let err = DependencyStatus::parse(br#"{"success": false}"#).unwrap_err();
    assert!(err.is_malformed());

    let err = DependencyStatus::parse(br#"{"success": false, "message": "  "}"#).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn parse_successful_report_without_dependencies_is_malformed() {
    let body = br#"{"success": true, "message": "all good"}"#;
    let err = DependencyStatus::parse(body).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("dependencies"));
}

// =========================================================================
// error_message tests
// =========================================================================

#[test]
fn error_message_prefers_json_message_field() {
    let msg = error_message(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some("application/json; charset=utf-8"),
        r#"{"success": false, "message": "disk full"}"#,
    );
    assert_eq!(msg, "disk full");
}

#[test]
fn error_message_uses_plain_text_body() {
    let msg = error_message(StatusCode::BAD_GATEWAY, Some("text/plain"), "  upstream down \n");
    assert_eq!(msg, "upstream down");
}

#[test]
fn error_message_replaces_html_with_reason() {
    let msg = error_message(
        StatusCode::NOT_FOUND,
        Some("text/html; charset=utf-8"),
        "<!doctype html><html><title>404 Not Found</title></html>",
    );
    assert_eq!(msg, "Not Found");
}

#[test]
fn error_message_json_without_message_uses_reason() {
    let msg = error_message(StatusCode::SERVICE_UNAVAILABLE, Some("application/json"), "{}");
    assert_eq!(msg, "Service Unavailable");
}

#[test]
fn error_message_is_capped() {
    let body = "x".repeat(1000);
    let msg = error_message(StatusCode::INTERNAL_SERVER_ERROR, Some("text/plain"), &body);
    assert_eq!(msg.chars().count(), MAX_ERROR_CHARS + 1);
    assert!(msg.ends_with('…'));
}

#[test]
fn parse_non_json_is_malformed() {
    let err = DependencyStatus::parse(b"<html>oops</html>").unwrap_err();
    assert!(err.is_malformed());
}

// =========================================================================
// fetch tests
// =========================================================================

#[tokio::test]
async fn timeout_expires_as_timeout_error() {
    let err = fetch_with_timeout(&SlowSource, Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(matches!(err, DashError::Timeout(_)));
}

#[tokio::test]
async fn http_source_parses_ok_response() {
    let url = serve_once(
        "200 OK",
        r#"{"success": true, "message": "", "dependencies": [{"name": "X", "installed": true}]}"#,
    )
    .await;
    let source = HttpStatusSource::new(&HttpConfig::default(), url);

    let status = fetch_with_timeout(&source, Duration::from_secs(5)).await.unwrap();
    assert!(status.success);
    assert_eq!(status.dependencies[0].name, "X");
}

#[tokio::test]
async fn http_source_rejects_non_2xx() {
    let url = serve_once("503 Service Unavailable", "").await;
    let source = HttpStatusSource::new(&HttpConfig::default(), url);

    let err = fetch_with_timeout(&source, Duration::from_secs(5)).await.unwrap_err();
    match err {
        DashError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_source_surfaces_backend_error_report() {
    let url = serve_once("200 OK", r#"{"success": false, "message": "adk_setup exploded"}"#).await;
    let source = HttpStatusSource::new(&HttpConfig::default(), url);

    let err = fetch_with_timeout(&source, Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, DashError::Backend(ref m) if m == "adk_setup exploded"));
}

#[tokio::test]
async fn http_source_hides_html_error_page() {
    let url = serve_once_as(
        "404 NOT FOUND",
        "text/html; charset=utf-8",
        "<!doctype html>\n<html lang=en>\n<title>404 Not Found</title>\n<h1>Not Found</h1>",
    )
    .await;
    let source = HttpStatusSource::new(&HttpConfig::default(), url);

    let err = fetch_with_timeout(&source, Duration::from_secs(5)).await.unwrap_err();
    match err {
        DashError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_source_reports_malformed_body() {
    let url = serve_once("200 OK", "not json").await;
    let source = HttpStatusSource::new(&HttpConfig::default(), url);

    let err = fetch_with_timeout(&source, Duration::from_secs(5)).await.unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn http_source_connection_refused_is_transport_error() {
    // バインド直後に解放したポートには誰も待ち受けていない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpStatusSource::new(&HttpConfig::default(), format!("http://{}/", addr));
    let err = fetch_with_timeout(&source, Duration::from_secs(5)).await.unwrap_err();
    assert!(err.is_transport());
}
