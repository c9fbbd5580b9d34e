//! WebhookRouter - classify provider pushes and trigger reconciliation.

use std::sync::Arc;

use http::HeaderMap;

use crate::domain::ProviderEvent;
use crate::ports::{DeadLetter, DeadLetterQueue, WebhookVerifier};

use super::reconcile::ReconciliationEngine;

/// Routes inbound webhook events into the reconciliation engine.
///
/// `handle` never fails: webhooks are fire-and-forget from the provider's
/// side, and signalling an error on the transport only earns a redelivery
/// of the same payload. Unverifiable, unparseable, irrelevant, or
/// unroutable events are logged and dropped; reconciliation failures are
/// recorded as dead letters for later replay.
pub struct WebhookRouter {
    engine: Arc<ReconciliationEngine>,
    verifier: Arc<dyn WebhookVerifier>,
    dead_letters: Arc<dyn DeadLetterQueue>,
}

impl WebhookRouter {
    pub fn new(
        engine: Arc<ReconciliationEngine>,
        verifier: Arc<dyn WebhookVerifier>,
        dead_letters: Arc<dyn DeadLetterQueue>,
    ) -> Self {
        Self {
            engine,
            verifier,
            dead_letters,
        }
    }

    pub async fn handle(&self, payload: serde_json::Value, headers: &HeaderMap) {
        if !self.verifier.verify(&payload, headers).await {
            tracing::warn!("webhook rejected by verifier, dropping");
            return;
        }

        let event: ProviderEvent = match serde_json::from_value(payload.clone()) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable webhook payload, dropping");
                return;
            }
        };

        if !event.class().is_relevant() {
            tracing::debug!(event_type = event.event_type.as_deref(), "ignoring event");
            return;
        }

        let Some(subscription_id) = event.subscription_id() else {
            tracing::debug!(
                event_type = event.event_type.as_deref(),
                "relevant event without a subscription id, dropping"
            );
            return;
        };

        if let Err(e) = self
            .engine
            .reconcile(subscription_id, event.event_type.as_deref())
            .await
        {
            tracing::error!(
                subscription_id,
                event_type = event.event_type.as_deref(),
                error = %e,
                "webhook reconciliation failed, recording dead letter"
            );
            let letter = DeadLetter::new(
                event.event_type.clone(),
                Some(subscription_id.to_string()),
                payload,
                e.to_string(),
            );
            if let Err(push_err) = self.dead_letters.push(letter).await {
                tracing::error!(error = %push_err, "failed to record dead letter");
            }
        }
    }
}
