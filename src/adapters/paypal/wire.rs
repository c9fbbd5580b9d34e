//! Wire types for the PayPal REST API.
//!
//! Only the fields reconciliation needs are captured; the subscription fetch
//! keeps the full payload as the snapshot's raw value.

use serde::Deserialize;

/// Response of `POST /v1/oauth2/token`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent API calls.
    pub access_token: String,

    /// Validity window in seconds.
    pub expires_in: u64,
}

/// Fields of `GET /v1/billing/subscriptions/{id}` the snapshot copies out.
#[derive(Debug, Deserialize)]
pub struct SubscriptionResource {
    /// Lifecycle status (APPROVAL_PENDING, ACTIVE, CANCELLED, ...).
    pub status: String,

    /// Billing plan the subscription is on.
    pub plan_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_response_parses() {
        let response: TokenResponse = serde_json::from_value(json!({
            "scope": "https://uri.paypal.com/services/subscriptions",
            "access_token": "A21AA...",
            "token_type": "Bearer",
            "app_id": "APP-1",
            "expires_in": 32400,
            "nonce": "..."
        }))
        .unwrap();

        assert_eq!(response.access_token, "A21AA...");
        assert_eq!(response.expires_in, 32400);
    }

    #[test]
    fn subscription_resource_tolerates_missing_plan_id() {
        let resource: SubscriptionResource =
            serde_json::from_value(json!({"id": "I-ABC", "status": "ACTIVE"})).unwrap();

        assert_eq!(resource.status, "ACTIVE");
        assert_eq!(resource.plan_id, None);
    }
}
