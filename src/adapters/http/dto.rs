//! HTTP DTOs for the public endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution. Wire casing is camelCase throughout.

use serde::{Deserialize, Serialize};

use crate::application::Confirmation;
use crate::domain::{Entitlement, EntitlementRecord, SubscriptionStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of the post-checkout confirmation call.
///
/// Fields default to empty so a missing field reaches the handler's own
/// validation (a 400 with a message) instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub subscription_id: String,
}

/// Query string for the entitlement lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementsQuery {
    pub email: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Bare acknowledgment, used by /health and the webhook endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Successful confirmation result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub ok: bool,
    pub status: SubscriptionStatus,
    pub plan_id: Option<String>,
    pub subscription_id: String,
}

impl From<Confirmation> for ConfirmResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            ok: true,
            status: confirmation.status,
            plan_id: confirmation.plan_id,
            subscription_id: confirmation.subscription_id,
        }
    }
}

/// Entitlement lookup result; `detail` is null for unknown users.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementResponse {
    pub pro: bool,
    pub detail: Option<EntitlementRecord>,
}

impl From<Entitlement> for EntitlementResponse {
    fn from(entitlement: Entitlement) -> Self {
        Self {
            pro: entitlement.pro,
            detail: entitlement.detail,
        }
    }
}

/// Error body for the confirm and lookup paths.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
