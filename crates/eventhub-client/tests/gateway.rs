#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test — panics are the assertion mechanism")]

use eventhub_client::{
    ApiCall, ApiError, CancellationToken, EventHubClient, GatewayConfig, MemorySessionStore,
    SessionEvent, SessionStore,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup(token: Option<&str>) -> (MockServer, EventHubClient, Arc<MemorySessionStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(match token {
        Some(token) => MemorySessionStore::with_token(token),
        None => MemorySessionStore::new(),
    });
    let config = GatewayConfig::default().with_base_url(server.uri());
    let client = EventHubClient::new(&config, store.clone()).expect("valid config");
    (server, client, store)
}

fn events_body() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "title": "RustConf", "description": "Talks", "date": "2025-09-01", "location": "Montreal" },
        { "id": 2, "title": "Meetup", "description": "Pizza", "date": "2025-09-12T18:00", "location": "Berlin" }
    ])
}

#[tokio::test]
async fn test_bearer_header_carries_stored_token() {
    let (server, client, _store) = setup(Some("T1")).await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .expect(1)
        .mount(&server)
        .await;

    let events = client.list_events().await.expect("authorized listing");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "RustConf");
}

#[tokio::test]
async fn test_no_header_without_credential() {
    let (server, client, _store) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    client.list_events().await.expect("anonymous listing");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(
        requests[0].headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_unauthorized_tears_down_session_once() {
    let (server, client, store) = setup(Some("expired")).await;
    let mut signals = client.subscribe();

    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Token expired" })),
        )
        .mount(&server)
        .await;

    let err = client.profile().await.expect_err("401 must be an error");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "Token expired");
    assert!(err.is_unauthorized());

    assert_eq!(store.get(), None);
    assert!(!client.is_authenticated());
    assert_eq!(signals.try_recv().expect("one signal"), SessionEvent::Expired { status: 401 });
    assert!(signals.try_recv().is_err(), "exactly one teardown signal");
}

#[tokio::test]
async fn test_concurrent_unauthorized_signals_once() {
    let (server, client, store) = setup(Some("expired")).await;
    let mut signals = client.subscribe();

    for route in ["/api/events", "/api/bookings", "/api/users/profile"] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(50)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (events, bookings, profile) =
        futures::join!(client.list_events(), client.list_bookings(), client.profile());

    assert_eq!(events.expect_err("401").status(), Some(401));
    assert_eq!(bookings.expect_err("401").status(), Some(401));
    assert_eq!(profile.expect_err("401").status(), Some(401));
    assert_eq!(store.get(), None);
    assert_eq!(signals.try_recv().expect("one signal"), SessionEvent::Expired { status: 401 });
    assert!(signals.try_recv().is_err(), "one teardown for a shared credential");
}

#[tokio::test]
async fn test_other_rejections_leave_session_untouched() {
    let (server, client, store) = setup(Some("T1")).await;
    let mut signals = client.subscribe();

    let routes = [(400, "/api/events"), (403, "/api/bookings"), (500, "/api/users/profile")];
    for (status, route) in routes {
        Mock::given(path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({ "message": format!("nope {}", status) })),
            )
            .mount(&server)
            .await;
    }

    let err = client.list_events().await.expect_err("400");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "nope 400");
    assert_eq!(
        err.data().and_then(|d| d.get("message")).and_then(|m| m.as_str()),
        Some("nope 400")
    );

    let err = client.list_bookings().await.expect_err("403");
    assert_eq!(err.status(), Some(403));

    let err = client.profile().await.expect_err("500");
    assert_eq!(err.status(), Some(500));

    assert_eq!(store.get().as_deref(), Some("T1"));
    assert!(signals.try_recv().is_err());
}

#[tokio::test]
async fn test_connection_refused_has_no_status() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let store = Arc::new(MemorySessionStore::with_token("T1"));
    let config = GatewayConfig::default().with_base_url(format!("http://127.0.0.1:{}", port));
    let client = EventHubClient::new(&config, store.clone()).expect("valid config");

    let err = client.list_events().await.expect_err("nothing is listening");
    assert_eq!(err, ApiError::no_response());
    assert_eq!(err.status(), None);
    assert_eq!(store.get().as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_deadline_exceeded_is_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(events_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = GatewayConfig::default().with_base_url(server.uri()).with_timeout_ms(100);
    let client = EventHubClient::in_memory(&config).expect("valid config");

    let err = client.list_events().await.expect_err("deadline exceeded");
    assert!(matches!(err, ApiError::NoResponse { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_caller_cancellation() {
    let (server, client, _store) = setup(None).await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(events_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client
        .gateway()
        .send::<serde_json::Value>(ApiCall::get("events").cancel_on(cancel))
        .await
        .expect_err("cancelled");
    assert_eq!(err, ApiError::NoResponse { message: "Request cancelled".to_string() });
}

#[tokio::test]
async fn test_stale_unauthorized_keeps_newer_login() {
    let (server, client, store) = setup(Some("old")).await;
    let mut signals = client.subscribe();

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let relogin = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.set(Some("new".to_string()));
    };
    let (result, ()) = tokio::join!(client.list_bookings(), relogin);

    let err = result.expect_err("401");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "Request failed with status code 401");
    assert_eq!(store.get().as_deref(), Some("new"));
    assert!(signals.try_recv().is_err(), "superseded credential must not signal expiry");
}

#[tokio::test]
async fn test_success_with_undecodable_body() {
    let (server, client, _store) = setup(None).await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.list_events().await.expect_err("not JSON");
    assert!(matches!(err, ApiError::InvalidResponse { status: 200, .. }));
}
