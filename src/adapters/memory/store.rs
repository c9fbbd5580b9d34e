//! In-memory entitlement store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{EntitlementRecord, StoreError, SubscriptionSnapshot};
use crate::ports::EntitlementStore;

/// `EntitlementStore` holding both mappings in process memory.
///
/// Each operation takes one lock and is atomic on its own; serialization of
/// multi-step reconciliation writes is the caller's responsibility.
#[derive(Default)]
pub struct InMemoryEntitlementStore {
    users: RwLock<HashMap<String, EntitlementRecord>>,
    snapshots: RwLock<HashMap<String, SubscriptionSnapshot>>,
}

impl InMemoryEntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user records (for test assertions).
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Number of stored snapshots (for test assertions).
    pub async fn snapshot_count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl EntitlementStore for InMemoryEntitlementStore {
    async fn user(&self, user_id: &str) -> Result<Option<EntitlementRecord>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn put_user(&self, record: EntitlementRecord) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .insert(record.user_id.clone(), record);
        Ok(())
    }

    async fn all_users(&self) -> Result<Vec<EntitlementRecord>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn snapshot(
        &self,
        subscription_id: &str,
    ) -> Result<Option<SubscriptionSnapshot>, StoreError> {
        Ok(self.snapshots.read().await.get(subscription_id).cloned())
    }

    async fn put_snapshot(&self, snapshot: SubscriptionSnapshot) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.subscription_id.clone(), snapshot);
        Ok(())
    }
}
