//! WebhookVerifier port - pluggable inbound event authenticity check.

use async_trait::async_trait;
use http::HeaderMap;

/// Port for verifying the authenticity of an inbound webhook event.
///
/// The webhook entry point calls this before doing anything else with the
/// event. Cryptographic validation (PayPal's transmission signature scheme)
/// is deliberately not implemented here; a production deployment plugs in an
/// implementation that checks the transport headers against the provider's
/// certificate.
#[async_trait]
pub trait WebhookVerifier: Send + Sync {
    /// Returns true if the event should be processed.
    async fn verify(&self, event: &serde_json::Value, headers: &HeaderMap) -> bool;
}

/// Default verifier that accepts every event.
///
/// Logs a warning per event so an unverified deployment is visible in the
/// logs rather than silent.
pub struct AcceptAllVerifier;

#[async_trait]
impl WebhookVerifier for AcceptAllVerifier {
    async fn verify(&self, _event: &serde_json::Value, _headers: &HeaderMap) -> bool {
        tracing::warn!("webhook signature verification is not configured; accepting event");
        true
    }
}
