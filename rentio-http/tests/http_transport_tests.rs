use rentio_http::{BearerAuth, HttpConfig, HttpTransport};
use rentio_query::{ApiRequest, AuthProvider, FilterSet, QueryEngine, Transport};
use rentio_types::UserProfile;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn transport_for(server: &MockServer) -> HttpTransport {
    init_tracing();
    HttpTransport::new(HttpConfig {
        base_url: server.uri(),
        ..HttpConfig::default()
    })
}

#[tokio::test]
async fn get_success_parses_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .and(query_param("search", "ada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"id": 1, "username": "ada"}],
        })))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let mut query = std::collections::BTreeMap::new();
    query.insert("search".to_string(), "ada".to_string());

    let response = transport
        .request(ApiRequest::get("/api/users/").with_query(query))
        .await;

    assert!(response.success);
    assert_eq!(response.status, 200);
    assert_eq!(response.data["count"], json!(1));
    assert!(response.error.is_none());
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enquiries/"))
        .and(body_json(json!({"property": 5, "message": "still free?"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "property": 5, "sender": 1, "message": "still free?",
        })))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let response = transport
        .request(
            ApiRequest::post("/api/enquiries/")
                .with_body(json!({"property": 5, "message": "still free?"})),
        )
        .await;

    assert!(response.success);
    assert_eq!(response.status, 201);
    assert_eq!(response.data["id"], json!(9));
}

#[tokio::test]
async fn auth_headers_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favourites/"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0, "next": null, "previous": null, "results": [],
        })))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let auth = BearerAuth::new("secret-token");
    let response = transport
        .request(ApiRequest::get("/api/favourites/").with_headers(auth.auth_headers()))
        .await;

    assert!(response.success);
}

#[tokio::test]
async fn error_status_maps_to_failed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties/99/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})),
        )
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let response = transport.request(ApiRequest::get("/api/properties/99/")).await;

    assert!(!response.success);
    assert_eq!(response.status, 404);
    assert_eq!(response.error.as_deref(), Some("Not found."));
}

#[tokio::test]
async fn empty_body_success_yields_null_data() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/reviews/3/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let response = transport.request(ApiRequest::delete("/api/reviews/3/")).await;

    assert!(response.success);
    assert_eq!(response.status, 204);
    assert!(response.data.is_null());
}

#[tokio::test]
async fn connection_failure_reports_without_panicking() {
    init_tracing();
    // Nothing listens here; the request must fail in the envelope.
    let transport = HttpTransport::new(HttpConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    });

    let response = transport.request(ApiRequest::get("/api/users/")).await;
    assert!(!response.success);
    assert_eq!(response.status, 0);
    assert!(response.error.is_some());
}

// ── End to end through the engine ─────────────────────────────────

#[tokio::test]
async fn engine_fetches_users_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": 1, "username": "ada"},
                {"id": 2, "username": "grace"},
            ],
        })))
        .mount(&server)
        .await;

    let transport = Arc::new(transport_for(&server).await);
    let auth = Arc::new(BearerAuth::new("secret-token"));
    let engine = QueryEngine::<UserProfile>::users(transport, auth);

    let page = engine.fetch_list(FilterSet::new(), true).await.unwrap();
    assert_eq!(page.count, 2);
    assert_eq!(page.items[1].username, "grace");
}
