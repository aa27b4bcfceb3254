//! Integration tests for the scrape round trip
//!
//! These tests use wiremock to stand in for the remote scrape service and
//! drive a session through its state transitions end-to-end.

use prodscrape::client::{HttpScrapeClient, ScrapeClient};
use prodscrape::export::to_delimited_text;
use prodscrape::session::{
    ChannelNotifier, Notification, ScrapeSession, SessionError, SessionHandle, SessionStatus,
};
use prodscrape::url::UrlRules;
use prodscrape::{RequestError, ValidationError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCT_URL: &str = "https://www.amazon.in/widget/dp/B000123456";

/// Client pointed at the mock server's scrape endpoint
fn client_for(server: &MockServer) -> HttpScrapeClient {
    HttpScrapeClient::with_client(reqwest::Client::new(), format!("{}/scrape", server.uri()))
}

/// Scrape endpoint on a local port that was bound and released, so
/// connections to it are refused
fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/scrape", port)
}

/// Session reporting into a channel the test can drain
fn channel_session() -> (
    ScrapeSession,
    UnboundedReceiver<prodscrape::session::TimedNotification>,
) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let session = ScrapeSession::new(UrlRules::default(), Arc::new(ChannelNotifier::new(tx)));
    (session, rx)
}

fn drain(rx: &mut UnboundedReceiver<prodscrape::session::TimedNotification>) -> Vec<Notification> {
    let mut events = Vec::new();
    while let Ok(timed) = rx.try_recv() {
        events.push(timed.notification);
    }
    events
}

fn widget_payload() -> serde_json::Value {
    json!({
        "product_name": "Widget",
        "price": {"original": "$10.00"},
        "description": "",
        "variants": [],
        "image_urls": []
    })
}

#[tokio::test]
async fn test_end_to_end_scrape_and_delimited_export() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(body_json(json!({ "url": PRODUCT_URL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_payload()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(prodscrape::is_acceptable(PRODUCT_URL));

    let (mut session, mut rx) = channel_session();
    let status = session
        .submit(PRODUCT_URL, &client_for(&server))
        .await
        .expect("Submit failed");

    assert_eq!(status, SessionStatus::Succeeded);
    assert_eq!(drain(&mut rx), vec![Notification::ScrapeSucceeded]);

    let record = session.exportable_record().expect("No record after success");
    assert_eq!(record.name, "Widget");
    assert_eq!(record.price.discounted, None);

    assert_eq!(
        to_delimited_text(&record),
        "\"Product Name\",\"Original Price\",\"Discounted Price\",\"Description\",\"Variants\",\"Image URLs\"\n\
         \"Widget\",\"$10.00\",\"\",\"\",\"\",\"\""
    );
}

#[tokio::test]
async fn test_failure_after_success_preserves_record() {
    let good = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_payload()))
        .mount(&good)
        .await;

    let broken = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&broken)
        .await;

    let (mut session, mut rx) = channel_session();
    session.submit(PRODUCT_URL, &client_for(&good)).await.unwrap();
    let before = session.record().unwrap();

    let status = session
        .submit(PRODUCT_URL, &client_for(&broken))
        .await
        .unwrap();

    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(session.record().unwrap(), before);
    assert!(session.exportable_record().is_none());
    assert_eq!(
        drain(&mut rx),
        vec![Notification::ScrapeSucceeded, Notification::ScrapeFailed]
    );
}

#[tokio::test]
async fn test_non_success_status_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client_for(&server).scrape(PRODUCT_URL).await;
    assert!(matches!(result, Err(RequestError::Status(404))));
}

#[tokio::test]
async fn test_malformed_payload_fails_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "blocked"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.scrape(PRODUCT_URL).await,
        Err(RequestError::Malformed(_))
    ));

    let (mut session, mut rx) = channel_session();
    let status = session.submit(PRODUCT_URL, &client).await.unwrap();

    assert_eq!(status, SessionStatus::Failed);
    assert!(session.record().is_none());
    assert_eq!(drain(&mut rx), vec![Notification::ScrapeFailed]);
}

#[tokio::test]
async fn test_non_json_body_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).scrape(PRODUCT_URL).await;
    assert!(matches!(result, Err(RequestError::Malformed(_))));
}

#[tokio::test]
async fn test_empty_product_name_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product_name": "",
            "price": {"original": "$10.00"},
            "description": "",
            "variants": [],
            "image_urls": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).scrape(PRODUCT_URL).await;
    assert!(matches!(result, Err(RequestError::Malformed(_))));
}

#[tokio::test]
async fn test_missing_image_urls_is_request_error() {
    let server = MockServer::start().await;
    let mut payload = widget_payload();
    payload.as_object_mut().unwrap().remove("image_urls");

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let (mut session, mut rx) = channel_session();
    let status = session.submit(PRODUCT_URL, &client_for(&server)).await.unwrap();

    assert_eq!(status, SessionStatus::Failed);
    assert!(session.exportable_record().is_none());
    assert_eq!(drain(&mut rx), vec![Notification::ScrapeFailed]);
}

#[tokio::test]
async fn test_rejected_url_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let (mut session, mut rx) = channel_session();
    let client = client_for(&server);

    let result = session.submit("https://www.amazon.in/", &client).await;
    assert!(matches!(
        result,
        Err(SessionError::Rejected(ValidationError::MissingProductPath))
    ));

    let result = session.submit("", &client).await;
    assert!(matches!(
        result,
        Err(SessionError::Rejected(ValidationError::Blank))
    ));

    assert_eq!(session.status(), SessionStatus::Idle);
    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|e| matches!(e, Notification::ValidationRejected { .. })));
}

#[tokio::test]
async fn test_single_flight_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(widget_payload())
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, _rx) = channel_session();
    let handle = SessionHandle::new(session, Arc::new(client_for(&server)));

    let first = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.submit(PRODUCT_URL).await })
    };

    while handle.status() != SessionStatus::Pending {
        tokio::task::yield_now().await;
    }

    // Input stays editable while the request is outstanding
    handle.set_input_url("https://www.amazon.in/other/dp/B000999999");
    let second = handle.submit_input().await;
    assert!(matches!(second, Err(SessionError::AlreadyPending)));

    let status = first.await.unwrap().unwrap();
    assert_eq!(status, SessionStatus::Succeeded);

    // The late response landed even though the input changed
    assert_eq!(handle.record().unwrap().name, "Widget");
    assert_eq!(
        handle.input_url(),
        "https://www.amazon.in/other/dp/B000999999"
    );
}

#[tokio::test]
async fn test_unreachable_service_fails_session() {
    let client = HttpScrapeClient::with_client(reqwest::Client::new(), closed_endpoint());

    let (mut session, _rx) = channel_session();
    let status = session.submit(PRODUCT_URL, &client).await.unwrap();

    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(session.status(), SessionStatus::Failed);
}
