//! Integration tests for fetching status documents
//!
//! A local axum server stands in for the array's web interface.

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use nexsan_client::{Credentials, ProbeClient};
use nexsan_core::NexsanError;
use std::time::Duration;

// base64("admin:secret")
const EXPECTED_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

const DOCUMENT: &str = r#"<nexsan_op_status>
  <nexsan_sys_info>
    <friendly_name>nnn</friendly_name>
    <system_name>sss</system_name>
    <system_id>iii</system_id>
    <firmware_version>fff</firmware_version>
    <date_time>1523963221</date_time>
  </nexsan_sys_info>
</nexsan_op_status>"#;

async fn opstats(headers: HeaderMap) -> (StatusCode, &'static str) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == EXPECTED_AUTH)
        .unwrap_or(false);
    if authorized {
        (StatusCode::OK, DOCUMENT)
    } else {
        (StatusCode::UNAUTHORIZED, "")
    }
}

async fn spawn_array(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

fn client() -> ProbeClient {
    ProbeClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_parses_document() {
    let target = spawn_array(Router::new().route("/admin/opstats.asp", get(opstats))).await;

    let tree = client()
        .fetch(&target, &Credentials::new("admin", "secret"))
        .await
        .unwrap();

    assert_eq!(tree.root().tag(), "nexsan_op_status");
    let info = tree.root().child("nexsan_sys_info").unwrap();
    assert_eq!(info.child("system_name").unwrap().text(), "sss");
}

#[tokio::test]
async fn test_rejected_credentials() {
    let target = spawn_array(Router::new().route("/admin/opstats.asp", get(opstats))).await;

    let err = client()
        .fetch(&target, &Credentials::new("admin", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, NexsanError::Auth(_)));
}

#[tokio::test]
async fn test_malformed_document() {
    let target = spawn_array(Router::new().route(
        "/admin/opstats.asp",
        get(|| async { "<nexsan_op_status><nexsan_sys_info>" }),
    ))
    .await;

    let err = client()
        .fetch(&target, &Credentials::new("admin", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, NexsanError::Malformed(_)));
}

#[tokio::test]
async fn test_missing_page_is_fetch_error() {
    let target = spawn_array(Router::new()).await;

    let err = client()
        .fetch_body(&target, &Credentials::new("admin", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, NexsanError::Fetch(_)));
}
