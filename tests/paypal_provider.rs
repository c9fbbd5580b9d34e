//! Integration tests for the PayPal adapter pair against a stub provider.
//!
//! A minimal axum server on an ephemeral port stands in for the PayPal REST
//! API: it issues numbered bearer tokens and serves subscription resources,
//! so token caching, the single stale-token refresh, and status mapping are
//! all observable from the outside.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};

use subgate::adapters::paypal::{PayPalAuth, PayPalSubscriptionClient};
use subgate::config::PayPalConfig;
use subgate::domain::{ReconcileError, SubscriptionStatus};
use subgate::ports::{SubscriptionClient, TokenProvider};

// =============================================================================
// Stub provider
// =============================================================================

struct StubState {
    token_requests: AtomicUsize,
    fetch_requests: AtomicUsize,
    /// When set, the first issued token ("token-1") is rejected as stale.
    reject_first_token: bool,
}

async fn token_endpoint(State(stub): State<Arc<StubState>>) -> Json<Value> {
    let n = stub.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "access_token": format!("token-{n}"),
        "token_type": "Bearer",
        "expires_in": 32400
    }))
}

async fn subscription_endpoint(
    State(stub): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    stub.fetch_requests.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if stub.reject_first_token && bearer == "Bearer token-1" {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match id.as_str() {
        "I-MISSING" => StatusCode::NOT_FOUND.into_response(),
        "I-BROKEN" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({
            "id": id,
            "status": "ACTIVE",
            "plan_id": "P-1",
            "subscriber": {"email_address": "a@b.com"}
        }))
        .into_response(),
    }
}

async fn start_stub(reject_first_token: bool) -> (String, Arc<StubState>) {
    let stub = Arc::new(StubState {
        token_requests: AtomicUsize::new(0),
        fetch_requests: AtomicUsize::new(0),
        reject_first_token,
    });

    let router = Router::new()
        .route("/v1/oauth2/token", post(token_endpoint))
        .route("/v1/billing/subscriptions/:id", get(subscription_endpoint))
        .with_state(Arc::clone(&stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), stub)
}

fn provider_pair(base_url: &str) -> (Arc<PayPalAuth>, PayPalSubscriptionClient) {
    let config = PayPalConfig {
        base_url: base_url.to_string(),
        client_id: "test-client".to_string(),
        client_secret: SecretString::new("test-secret".to_string()),
        expected_plan_id: None,
    };
    let http_client = reqwest::Client::new();
    let auth = Arc::new(PayPalAuth::new(config, http_client.clone()));
    let client = PayPalSubscriptionClient::new(
        base_url,
        http_client,
        Arc::clone(&auth) as Arc<dyn TokenProvider>,
    );
    (auth, client)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn fetch_parses_the_subscription_resource() {
    let (base_url, _stub) = start_stub(false).await;
    let (_auth, client) = provider_pair(&base_url);

    let snapshot = client.fetch_subscription("I-ABC").await.unwrap();
    assert_eq!(snapshot.subscription_id, "I-ABC");
    assert_eq!(snapshot.status, SubscriptionStatus::Active);
    assert_eq!(snapshot.plan_id.as_deref(), Some("P-1"));
    // The full payload is kept verbatim.
    assert_eq!(snapshot.raw["subscriber"]["email_address"], "a@b.com");
}

#[tokio::test]
async fn token_cache_serves_repeat_fetches_without_reexchange() {
    let (base_url, stub) = start_stub(false).await;
    let (_auth, client) = provider_pair(&base_url);

    client.fetch_subscription("I-ABC").await.unwrap();
    client.fetch_subscription("I-ABC").await.unwrap();

    assert_eq!(stub.token_requests.load(Ordering::SeqCst), 1);
    assert_eq!(stub.fetch_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalidate_forces_a_fresh_exchange() {
    let (base_url, stub) = start_stub(false).await;
    let (auth, client) = provider_pair(&base_url);

    client.fetch_subscription("I-ABC").await.unwrap();
    auth.invalidate().await;
    client.fetch_subscription("I-ABC").await.unwrap();

    assert_eq!(stub.token_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn stale_token_triggers_exactly_one_refresh_and_retry() {
    let (base_url, stub) = start_stub(true).await;
    let (_auth, client) = provider_pair(&base_url);

    let snapshot = client.fetch_subscription("I-ABC").await.unwrap();
    assert_eq!(snapshot.status, SubscriptionStatus::Active);

    // token-1 rejected once, token-2 accepted: two exchanges, two fetches.
    assert_eq!(stub.token_requests.load(Ordering::SeqCst), 2);
    assert_eq!(stub.fetch_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_subscription_maps_to_not_found() {
    let (base_url, _stub) = start_stub(false).await;
    let (_auth, client) = provider_pair(&base_url);

    let result = client.fetch_subscription("I-MISSING").await;
    assert!(matches!(result, Err(ReconcileError::NotFound(_))));
}

#[tokio::test]
async fn provider_server_error_maps_to_network() {
    let (base_url, _stub) = start_stub(false).await;
    let (_auth, client) = provider_pair(&base_url);

    let result = client.fetch_subscription("I-BROKEN").await;
    assert!(matches!(result, Err(ReconcileError::Network(_))));
}

#[tokio::test]
async fn unreachable_provider_maps_to_network() {
    // Token exchange succeeds against the stub, the resource fetch targets a
    // closed port.
    let (base_url, _stub) = start_stub(false).await;
    let config = PayPalConfig {
        base_url: base_url.clone(),
        client_id: "test-client".to_string(),
        client_secret: SecretString::new("test-secret".to_string()),
        expected_plan_id: None,
    };
    let http_client = reqwest::Client::new();
    let auth = Arc::new(PayPalAuth::new(config, http_client.clone()));
    let client = PayPalSubscriptionClient::new(
        "http://127.0.0.1:1",
        http_client,
        auth as Arc<dyn TokenProvider>,
    );

    let result = client.fetch_subscription("I-ABC").await;
    assert!(matches!(result, Err(ReconcileError::Network(_))));
}
