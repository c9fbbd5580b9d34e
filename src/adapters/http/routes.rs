//! Router assembly and middleware layering.

use std::time::Duration;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::handlers::{
    confirm_subscription, debug_subscription, get_entitlements, health, paypal_webhook, AppState,
};

/// Assemble the full application router.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/subscriptions/confirm", post(confirm_subscription))
        .route("/me/entitlements", get(get_entitlements))
        .route("/paypal/webhook", post(paypal_webhook))
        .route("/debug/subscriptions/:id", get(debug_subscription))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .with_state(state)
}

/// Permissive CORS by default (the checkout page confirms cross-origin);
/// a configured origin list narrows it.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    match &server.cors_origins {
        None => CorsLayer::permissive(),
        Some(_) => {
            let origins: Vec<HeaderValue> = server
                .cors_origins_list()
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}
