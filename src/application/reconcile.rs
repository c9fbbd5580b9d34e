//! ReconciliationEngine - fetch authoritative state and merge it locally.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OwnedMutexGuard;

use crate::domain::{ReconcileError, SubscriptionSnapshot};
use crate::ports::{EntitlementStore, SubscriptionClient};

use super::locks::SubscriptionLocks;

/// Result of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The snapshot fetched and stored by this pass.
    pub snapshot: SubscriptionSnapshot,

    /// How many user records referenced the subscription and were updated.
    /// Zero is a valid outcome: the snapshot arrived ahead of the user's
    /// confirmation record and is stored for later adoption.
    pub matched_users: usize,
}

/// The reconciliation engine.
///
/// Fetches the current subscription snapshot from the provider, stores it,
/// and merges it into every entitlement record that references the
/// subscription. The whole sequence runs inside the per-subscription
/// critical section, so concurrent triggers (confirm call and webhook
/// arriving together) commit atomically relative to each other.
pub struct ReconciliationEngine {
    client: Arc<dyn SubscriptionClient>,
    store: Arc<dyn EntitlementStore>,
    locks: Arc<SubscriptionLocks>,
}

impl ReconciliationEngine {
    pub fn new(
        client: Arc<dyn SubscriptionClient>,
        store: Arc<dyn EntitlementStore>,
        locks: Arc<SubscriptionLocks>,
    ) -> Self {
        Self {
            client,
            store,
            locks,
        }
    }

    /// Reconcile one subscription, serialized against other triggers for the
    /// same id.
    ///
    /// On any fetch failure the error propagates unchanged and the store is
    /// untouched (partial-failure isolation).
    pub async fn reconcile(
        &self,
        subscription_id: &str,
        triggering_event: Option<&str>,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let _guard = self.enter(subscription_id).await;

        let snapshot = self.fetch(subscription_id).await?;
        let matched_users = self.commit(&snapshot, triggering_event).await?;

        tracing::info!(
            subscription_id,
            status = %snapshot.status,
            matched_users,
            event_type = triggering_event,
            "reconciled subscription"
        );

        Ok(ReconcileOutcome {
            snapshot,
            matched_users,
        })
    }

    /// Enter the critical section for a subscription id.
    ///
    /// The confirm path holds this across its plan check so its fetch and
    /// merge pair atomically too.
    pub(crate) async fn enter(&self, subscription_id: &str) -> OwnedMutexGuard<()> {
        self.locks.acquire(subscription_id).await
    }

    /// Fetch the current snapshot. No store mutation.
    pub(crate) async fn fetch(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionSnapshot, ReconcileError> {
        self.client.fetch_subscription(subscription_id).await
    }

    /// Store the snapshot and merge it into all matching user records.
    ///
    /// Caller must hold the subscription's critical section.
    pub(crate) async fn commit(
        &self,
        snapshot: &SubscriptionSnapshot,
        triggering_event: Option<&str>,
    ) -> Result<usize, ReconcileError> {
        self.store.put_snapshot(snapshot.clone()).await?;

        let now = Utc::now();
        let mut matched = 0;
        for mut record in self.store.all_users().await? {
            if record.subscription_id != snapshot.subscription_id {
                continue;
            }
            record.apply_snapshot(snapshot, triggering_event, now);
            self.store.put_user(record).await?;
            matched += 1;
        }
        Ok(matched)
    }
}
