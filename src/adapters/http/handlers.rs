//! HTTP handlers for the service endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{ConfirmHandler, EntitlementQuery, WebhookRouter};
use crate::domain::ReconcileError;
use crate::ports::EntitlementStore;

use super::dto::{
    AckResponse, ConfirmRequest, ConfirmResponse, EntitlementResponse, EntitlementsQuery,
    ErrorResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AppState {
    confirm: Arc<ConfirmHandler>,
    webhook: Arc<WebhookRouter>,
    entitlements: Arc<EntitlementQuery>,
    store: Arc<dyn EntitlementStore>,
}

impl AppState {
    pub fn new(
        confirm: Arc<ConfirmHandler>,
        webhook: Arc<WebhookRouter>,
        entitlements: Arc<EntitlementQuery>,
        store: Arc<dyn EntitlementStore>,
    ) -> Self {
        Self {
            confirm,
            webhook,
            entitlements,
            store,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(AckResponse::ok())).into_response()
}

/// POST /api/subscriptions/confirm - Confirm a subscription after checkout
pub async fn confirm_subscription(
    State(state): State<AppState>,
    Json(req): Json<ConfirmRequest>,
) -> Response {
    match state.confirm.confirm(&req.email, &req.subscription_id).await {
        Ok(confirmation) => {
            (StatusCode::OK, Json(ConfirmResponse::from(confirmation))).into_response()
        }
        Err(e) => handle_confirm_error(e),
    }
}

/// GET /me/entitlements - Current entitlement for a user
pub async fn get_entitlements(
    State(state): State<AppState>,
    Query(query): Query<EntitlementsQuery>,
) -> Response {
    match state.entitlements.entitlement(query.email.as_deref()).await {
        Ok(entitlement) => {
            (StatusCode::OK, Json(EntitlementResponse::from(entitlement))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "entitlement lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /paypal/webhook - Provider event ingress
///
/// Acknowledges 200 unconditionally: the body is taken as raw bytes and
/// parsed leniently so even malformed JSON gets an ack instead of a
/// framework-level rejection that would earn endless redelivery.
pub async fn paypal_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(payload) => state.webhook.handle(payload, &headers).await,
        Err(e) => tracing::warn!(error = %e, "webhook body is not JSON, acking anyway"),
    }
    (StatusCode::OK, Json(AckResponse::ok())).into_response()
}

/// GET /debug/subscriptions/:id - Last stored snapshot for a subscription
pub async fn debug_subscription(
    State(state): State<AppState>,
    Path(subscription_id): Path<String>,
) -> Response {
    match state.store.snapshot(&subscription_id).await {
        Ok(Some(snapshot)) => (StatusCode::OK, Json(snapshot)).into_response(),
        Ok(None) => (StatusCode::OK, Json(serde_json::Value::Null)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "snapshot lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_confirm_error(error: ReconcileError) -> Response {
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}
