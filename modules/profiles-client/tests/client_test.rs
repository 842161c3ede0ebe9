//! End-to-end tests against a throw-away local API server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use profiles_client::{ProfilesClient, ProfilesError};
use socialsearch_common::{Network, SearchQuery, Tier};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn profiles_ok(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    seen.lock().unwrap().push(params);
    Json(json!({
        "data": [
            {"username": "sunset.daily", "followers": 1500},
            {"username": "golden_hour", "followers": 320}
        ]
    }))
}

#[tokio::test]
async fn search_sends_one_get_with_exact_params() {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/api/v1/profiles", get(profiles_ok))
        .with_state(seen.clone());
    let base = serve(app).await;

    let client = ProfilesClient::new(&base, Duration::from_secs(5));
    let rows = client
        .search(&SearchQuery::new(Network::TikTok, "sunset", Tier::Free))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title().as_deref(), Some("sunset.daily"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("social").map(String::as_str), Some("tiktok"));
    assert_eq!(seen[0].get("search").map(String::as_str), Some("sunset"));
    assert_eq!(seen[0].get("is_premium").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let app = Router::new().route(
        "/api/v1/profiles",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = serve(app).await;

    let client = ProfilesClient::new(&base, Duration::from_secs(5));
    let err = client
        .search(&SearchQuery::new(Network::Twitter, "rust", Tier::Pro))
        .await
        .unwrap_err();

    match err {
        ProfilesError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_api_times_out() {
    let app = Router::new().route(
        "/api/v1/profiles",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"data": []}))
        }),
    );
    let base = serve(app).await;

    let client = ProfilesClient::new(&base, Duration::from_millis(100));
    let err = client
        .search(&SearchQuery::new(Network::YouTube, "cats", Tier::Free))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfilesError::Timeout), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let app = Router::new().route("/api/v1/profiles", get(|| async { "<html>oops</html>" }));
    let base = serve(app).await;

    let client = ProfilesClient::new(&base, Duration::from_secs(5));
    let err = client
        .search(&SearchQuery::new(Network::Instagram, "cats", Tier::Free))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfilesError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_data_is_empty_result() {
    let app = Router::new().route(
        "/api/v1/profiles",
        get(|| async { Json(json!({"data": []})) }),
    );
    let base = serve(app).await;

    let client = ProfilesClient::new(&base, Duration::from_secs(5));
    let rows = client
        .search(&SearchQuery::new(Network::Instagram, "nothing here", Tier::Free))
        .await
        .unwrap();

    assert!(rows.is_empty());
}
