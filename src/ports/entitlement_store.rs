//! EntitlementStore port - keyed entitlement and snapshot state.

use async_trait::async_trait;

use crate::domain::{EntitlementRecord, StoreError, SubscriptionSnapshot};

/// Port for the entitlement state holder.
///
/// Pure state: each operation is individually atomic, but the store performs
/// no locking across operations. Callers own merge semantics and must
/// serialize conflicting multi-step writes (the application layer does this
/// per subscription id).
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Look up the entitlement record for a user id (email).
    async fn user(&self, user_id: &str) -> Result<Option<EntitlementRecord>, StoreError>;

    /// Insert or replace a user's entitlement record.
    async fn put_user(&self, record: EntitlementRecord) -> Result<(), StoreError>;

    /// All entitlement records, for subscription-id scans.
    async fn all_users(&self) -> Result<Vec<EntitlementRecord>, StoreError>;

    /// Look up the last-fetched snapshot for a subscription id.
    async fn snapshot(
        &self,
        subscription_id: &str,
    ) -> Result<Option<SubscriptionSnapshot>, StoreError>;

    /// Insert or replace the snapshot for its subscription id.
    async fn put_snapshot(&self, snapshot: SubscriptionSnapshot) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entitlement_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn EntitlementStore) {}
    }
}
