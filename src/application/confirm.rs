//! ConfirmHandler - client-initiated confirmation after checkout approval.

use std::sync::Arc;

use crate::domain::{EntitlementRecord, ReconcileError, SubscriptionStatus};
use crate::ports::EntitlementStore;

use super::reconcile::ReconciliationEngine;

/// What a successful confirmation reports back to the checkout page.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub status: SubscriptionStatus,
    pub plan_id: Option<String>,
    pub subscription_id: String,
}

/// Handler for the post-checkout confirmation call.
///
/// Validates the submitted pair, fetches the subscription from the provider,
/// and upserts the user's entitlement record. Acceptance is deliberately
/// permissive about non-ACTIVE statuses: the provider can lag right after
/// approval and a later webhook corrects the status, so the checkout UX is
/// not blocked on propagation delay. A configured expected plan id is the
/// one hard gate, and a mismatch leaves the store untouched.
///
/// The whole sequence runs inside the engine's per-subscription critical
/// section, which is also why confirm always re-fetches instead of adopting
/// a previously webhook-stored snapshot: any earlier webhook has fully
/// committed before our fetch, and a concurrent one is parked on the lock,
/// so the confirm fetch is never the staler of the two.
pub struct ConfirmHandler {
    engine: Arc<ReconciliationEngine>,
    store: Arc<dyn EntitlementStore>,
    expected_plan_id: Option<String>,
}

impl ConfirmHandler {
    pub fn new(
        engine: Arc<ReconciliationEngine>,
        store: Arc<dyn EntitlementStore>,
        expected_plan_id: Option<String>,
    ) -> Self {
        Self {
            engine,
            store,
            expected_plan_id,
        }
    }

    pub async fn confirm(
        &self,
        email: &str,
        subscription_id: &str,
    ) -> Result<Confirmation, ReconcileError> {
        if email.trim().is_empty() || subscription_id.trim().is_empty() {
            return Err(ReconcileError::validation("email, subscriptionId required"));
        }

        let _guard = self.engine.enter(subscription_id).await;

        let snapshot = self.engine.fetch(subscription_id).await?;

        if let Some(expected) = &self.expected_plan_id {
            if snapshot.plan_id.as_deref() != Some(expected.as_str()) {
                let reported = snapshot.plan_id.as_deref().unwrap_or("<none>");
                tracing::warn!(
                    subscription_id,
                    plan_id = reported,
                    expected_plan_id = expected.as_str(),
                    "confirm rejected: plan mismatch"
                );
                return Err(ReconcileError::validation(format!(
                    "Unexpected plan_id {reported}"
                )));
            }
        }

        let mut record = self
            .store
            .user(email)
            .await?
            .unwrap_or_else(|| EntitlementRecord::new(email, subscription_id));
        record.subscription_id = subscription_id.to_string();
        self.store.put_user(record).await?;

        // Merges the record just upserted, plus any other users on the same
        // subscription.
        self.engine.commit(&snapshot, None).await?;

        tracing::info!(
            email,
            subscription_id,
            status = %snapshot.status,
            "confirmed subscription"
        );

        Ok(Confirmation {
            status: snapshot.status,
            plan_id: snapshot.plan_id,
            subscription_id: subscription_id.to_string(),
        })
    }
}
