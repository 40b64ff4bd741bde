use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::json;
use tokio::net::TcpListener;

use doc_scan::client::transport::GENERIC_FAILURE_MESSAGE;
use doc_scan::client::{
    FormValues, HttpScanService, ScanError, ScanService, SearchSubmissionHandler,
    SubmissionOutcome, SubmissionState,
};
use doc_scan::api::models::ScanRequest;

mod test_helpers {
    use super::*;

    /// Serves `app` on an ephemeral loopback port and returns its base URL.
    pub async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// A scan service that always answers with `status` and the raw `body`.
    pub async fn stub_service(status: StatusCode, body: &'static str) -> String {
        spawn(Router::new().route(
            "/scan",
            post(move || async move { (status, [("content-type", "application/json")], body) }),
        ))
        .await
    }

    /// Base URL of a port that was just released, so connections are refused.
    pub async fn closed_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }
}

use test_helpers::*;

fn request() -> ScanRequest {
    ScanRequest {
        url: "https://example.com".to_string(),
        keyword: "fox".to_string(),
    }
}

#[tokio::test]
async fn posts_json_and_decodes_results() {
    let endpoint = spawn(Router::new().route(
        "/scan",
        post(|Json(req): Json<ScanRequest>| async move {
            Json(json!([
                {"document_url": format!("{}/a.pdf", req.url), "keyword": req.keyword, "excerpt": "The quick Fox"},
                {"document_url": format!("{}/b.html", req.url), "excerpt": "no keyword echo here, fox"}
            ]))
        }),
    ))
    .await;

    let results = HttpScanService::new(&endpoint).scan(&request()).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document_url, "https://example.com/a.pdf");
    assert_eq!(results[0].keyword, "fox");
    assert_eq!(results[1].keyword, "");
}

#[tokio::test]
async fn failure_detail_is_surfaced() {
    let endpoint = stub_service(StatusCode::BAD_REQUEST, r#"{"detail": "bad url"}"#).await;

    let err = HttpScanService::new(&endpoint).scan(&request()).await.unwrap_err();
    assert_eq!(
        err,
        ScanError::Service {
            status: 400,
            detail: Some("bad url".to_string())
        }
    );
    assert_eq!(err.user_message(), "bad url");
}

#[tokio::test]
async fn failure_without_parseable_body_uses_generic_message() {
    for body in [
        "<html>Bad Gateway</html>",
        "{}",
        r#"{"detail": 42}"#,
        r#"{"detail": null}"#,
        r#"{"detail": ""}"#,
        r#"{"detail": "  \n "}"#,
        "",
    ] {
        let endpoint = stub_service(StatusCode::BAD_GATEWAY, body).await;
        let err = HttpScanService::new(&endpoint).scan(&request()).await.unwrap_err();
        assert_eq!(err, ScanError::Service { status: 502, detail: None });
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_transport_error() {
    let endpoint = stub_service(StatusCode::OK, r#"{"not": "a list"}"#).await;
    let err = HttpScanService::new(&endpoint).scan(&request()).await.unwrap_err();
    assert!(matches!(err, ScanError::Transport(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let endpoint = closed_endpoint().await;
    let err = HttpScanService::new(&endpoint).scan(&request()).await.unwrap_err();
    assert!(matches!(err, ScanError::Transport(_)));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn handler_over_http_renders_detail_and_returns_to_idle() {
    let endpoint = stub_service(StatusCode::BAD_REQUEST, r#"{"detail": "bad url"}"#).await;
    let mut handler = SearchSubmissionHandler::new(HttpScanService::new(&endpoint));

    let outcome = handler
        .handle_submit(&FormValues::new("https://example.com", "fox"))
        .await;

    assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
    assert_eq!(handler.surface().results_html(), "<div class=\"error\">bad url</div>");
    assert_eq!(handler.state(), SubmissionState::Idle);
    assert!(handler.surface().submit_enabled());
    assert!(!handler.surface().loading());
}

#[tokio::test]
async fn handler_over_http_renders_highlighted_matches() {
    let endpoint = stub_service(
        StatusCode::OK,
        r#"[{"document_url": "https://example.com/r.pdf", "keyword": "fox", "excerpt": "The quick Fox jumps"}]"#,
    )
    .await;
    let mut handler = SearchSubmissionHandler::new(HttpScanService::new(&endpoint));

    let outcome = handler
        .handle_submit(&FormValues::new("https://example.com", "fox"))
        .await;

    assert_eq!(outcome, SubmissionOutcome::Matches(1));
    let html = handler.surface().results_html();
    assert!(html.contains("Found 1 match<"));
    assert!(html.contains("The quick <mark>Fox</mark> jumps"));
    assert!(html.contains("href=\"https://example.com/r.pdf\""));
}
