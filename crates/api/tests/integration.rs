//! Integration tests for API routes and the Dune client.
//!
//! Routes are exercised with `tower::ServiceExt` without a real HTTP server. The Dune
//! API is stood in for by an axum server on an ephemeral port.
//!
//! ```bash
//! cargo test -p era-api --test integration
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceExt;

use era_api::cache::AirdropCache;
use era_api::dune::DuneClient;
use era_api::routes::create_router;
use era_api::service::AirdropService;
use era_api::state::AppState;
use era_common::error::AppError;

const WALLET: &str = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";

// ============================================================
// Helpers
// ============================================================

fn offline_app() -> Router {
    create_router(AppState::new(AirdropService::new(
        AirdropCache::new(24).unwrap(),
        None,
        5515686,
    )))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Fake Dune API: the execution reports pending once, then completes with `rows`.
fn fake_dune(rows: Value, status_polls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/api/v1/query/{query_id}/execute",
            post(
                |Path(query_id): Path<u64>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(query_id, 5515686);
                    assert_eq!(headers["x-dune-api-key"], "test-key");
                    assert_eq!(
                        body["query_parameters"]["wallet_address"],
                        WALLET.to_lowercase()
                    );
                    Json(json!({ "execution_id": "01HX", "state": "QUERY_STATE_PENDING" }))
                },
            ),
        )
        .route(
            "/api/v1/execution/{id}/status",
            get(move || {
                let polls = status_polls.fetch_add(1, Ordering::SeqCst);
                async move {
                    let state = if polls == 0 {
                        "QUERY_STATE_PENDING"
                    } else {
                        "QUERY_STATE_COMPLETED"
                    };
                    Json(json!({ "execution_id": "01HX", "state": state }))
                }
            }),
        )
        .route(
            "/api/v1/execution/{id}/results",
            get(move || {
                let rows = rows.clone();
                async move { Json(json!({ "execution_id": "01HX", "result": { "rows": rows } })) }
            }),
        )
}

// ============================================================
// Route tests
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = offline_app();
    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "era-airdrop-api");
}

#[tokio::test]
async fn test_api_root() {
    let app = offline_app();
    let (status, json) = get_json(&app, "/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Era Airdrop Dashboard API");
    assert_eq!(json["status"], "operational");
}

#[tokio::test]
async fn test_invalid_address_is_rejected_in_envelope() {
    let app = offline_app();
    let (status, json) = get_json(&app, "/api/airdrop/0x123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "Invalid Ethereum wallet address format");

    // Invalid lookups are not counted.
    let (_, stats) = get_json(&app, "/api/stats").await;
    assert_eq!(stats["total_queries"], 0);
}

#[tokio::test]
async fn test_bad_checksum_is_rejected() {
    let app = offline_app();
    let (_, json) =
        get_json(&app, "/api/airdrop/0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD").await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_lookup_then_cached_lookup() {
    let app = offline_app();

    let (status, fresh) = get_json(&app, &format!("/api/airdrop/{WALLET}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fresh["success"], true);
    assert_eq!(
        fresh["message"],
        "Data retrieved successfully (fresh from blockchain)"
    );
    assert_eq!(fresh["data"]["wallet_address"], WALLET.to_lowercase());
    assert_eq!(fresh["data"]["total_allocation"], 0.0);
    assert_eq!(fresh["data"]["days_left_vesting"], 0);

    // Same wallet in a different case hits the cache.
    let (_, cached) = get_json(&app, &format!("/api/airdrop/{}", WALLET.to_lowercase())).await;
    assert_eq!(cached["success"], true);
    assert_eq!(
        cached["message"],
        "Data retrieved successfully (cached - instant!)"
    );

    let (_, stats) = get_json(&app, "/api/stats").await;
    assert_eq!(stats["total_queries"], 2);
    assert_eq!(stats["cached_addresses"], 1);
    assert_eq!(stats["cache_hours"], 24);
    assert_eq!(stats["status"], "operational");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = offline_app();
    let (status, json) = get_json(&app, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No route for /api/nope");
}

// ============================================================
// Dune client
// ============================================================

#[tokio::test]
async fn test_lookup_through_dune() {
    let polls = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(fake_dune(
        json!([{
            "total_allocation": "2500.5",
            "claimed_amount": 1000,
            "is_claimed": true,
            "pre_claim_status": false,
            "claim_transaction_hash": "0xfeed",
            "vesting_end_date": null,
        }]),
        Arc::clone(&polls),
    ))
    .await;

    let dune = DuneClient::new(
        &base,
        "test-key",
        Duration::from_millis(10),
        Duration::from_secs(5),
    )
    .unwrap();
    let app = create_router(AppState::new(AirdropService::new(
        AirdropCache::new(24).unwrap(),
        Some(dune),
        5515686,
    )));

    let (_, json) = get_json(&app, &format!("/api/airdrop/{WALLET}")).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["total_allocation"], 2500.5);
    assert_eq!(json["data"]["claimed_amount"], 1000.0);
    assert_eq!(json["data"]["is_claimed"], true);
    assert_eq!(json["data"]["claim_transaction_hash"], "0xfeed");
    assert_eq!(json["data"]["days_left_vesting"], 0);
    assert_eq!(polls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_empty_result_set_is_zero_allocation() {
    let base = spawn_server(fake_dune(json!([]), Arc::new(AtomicUsize::new(0)))).await;
    let dune = DuneClient::new(
        &base,
        "test-key",
        Duration::from_millis(10),
        Duration::from_secs(5),
    )
    .unwrap();

    let wallet = WALLET.to_lowercase();
    let rows = dune
        .run_query(5515686, &[("wallet_address", wallet.as_str())])
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_failed_execution_is_an_error() {
    let router = Router::new()
        .route(
            "/api/v1/query/{query_id}/execute",
            post(|| async { Json(json!({ "execution_id": "01HY" })) }),
        )
        .route(
            "/api/v1/execution/{id}/status",
            get(|| async { Json(json!({ "state": "QUERY_STATE_FAILED" })) }),
        );
    let base = spawn_server(router).await;
    let dune = DuneClient::new(
        &base,
        "test-key",
        Duration::from_millis(10),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = dune.run_query(1, &[]).await.unwrap_err();
    assert!(err.to_string().contains("ended in state Failed"));
}

#[tokio::test]
async fn test_execution_past_max_wait_times_out() {
    let polls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&polls);
    let router = Router::new()
        .route(
            "/api/v1/query/{query_id}/execute",
            post(|| async { Json(json!({ "execution_id": "01HZ" })) }),
        )
        .route(
            "/api/v1/execution/{id}/status",
            get(move || {
                counted.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({ "state": "QUERY_STATE_EXECUTING" })) }
            }),
        );
    let base = spawn_server(router).await;
    let dune = DuneClient::new(
        &base,
        "test-key",
        Duration::from_millis(20),
        Duration::from_millis(100),
    )
    .unwrap();

    let err = dune.run_query(1, &[]).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
    assert!(
        err.to_string()
            .contains("Dune execution 01HZ did not finish within 100ms"),
        "{err}"
    );
    assert!(polls.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_unauthorized_is_an_error() {
    let router = Router::new().route(
        "/api/v1/query/{query_id}/execute",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "invalid API Key" })),
            )
        }),
    );
    let base = spawn_server(router).await;
    let dune = DuneClient::new(
        &base,
        "wrong",
        Duration::from_millis(10),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = dune.run_query(1, &[]).await.unwrap_err();
    assert!(err.to_string().contains("401"));
}
