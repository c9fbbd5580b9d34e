//! Read-side lookup of a user's current entitlement.

use std::sync::Arc;

use crate::domain::{Entitlement, StoreError};
use crate::ports::EntitlementStore;

/// Answers "does this user have pro access right now" from the store alone.
///
/// No provider round trip: the answer reflects whatever the last
/// reconciliation wrote, so reads stay cheap and keep working through
/// provider outages.
pub struct EntitlementQuery {
    store: Arc<dyn EntitlementStore>,
}

impl EntitlementQuery {
    pub fn new(store: Arc<dyn EntitlementStore>) -> Self {
        Self { store }
    }

    /// An absent or empty email is an anonymous caller, not an error.
    pub async fn entitlement(&self, email: Option<&str>) -> Result<Entitlement, StoreError> {
        let email = match email {
            Some(email) if !email.trim().is_empty() => email,
            _ => return Ok(Entitlement::none()),
        };

        let record = self.store.user(email).await?;
        Ok(Entitlement::from(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEntitlementStore;
    use crate::domain::{EntitlementRecord, SubscriptionStatus};

    #[tokio::test]
    async fn unknown_user_is_not_entitled() {
        let store = Arc::new(InMemoryEntitlementStore::new());
        let query = EntitlementQuery::new(store);

        let entitlement = query.entitlement(Some("nobody@b.com")).await.unwrap();
        assert!(!entitlement.pro);
        assert!(entitlement.detail.is_none());
    }

    #[tokio::test]
    async fn missing_or_empty_email_is_anonymous() {
        let store = Arc::new(InMemoryEntitlementStore::new());
        let query = EntitlementQuery::new(store);

        for email in [None, Some(""), Some("   ")] {
            let entitlement = query.entitlement(email).await.unwrap();
            assert!(!entitlement.pro);
        }
    }

    #[tokio::test]
    async fn active_record_grants_pro_with_detail() {
        let store = Arc::new(InMemoryEntitlementStore::new());
        let mut record = EntitlementRecord::new("a@b.com", "I-ABC");
        record.status = SubscriptionStatus::Active;
        record.plan_id = Some("P-1".to_string());
        store.put_user(record).await.unwrap();

        let query = EntitlementQuery::new(store);
        let entitlement = query.entitlement(Some("a@b.com")).await.unwrap();
        assert!(entitlement.pro);
        let detail = entitlement.detail.expect("detail for a known user");
        assert_eq!(detail.subscription_id, "I-ABC");
        assert_eq!(detail.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn cancelled_record_still_returns_detail_without_pro() {
        let store = Arc::new(InMemoryEntitlementStore::new());
        let mut record = EntitlementRecord::new("a@b.com", "I-ABC");
        record.status = SubscriptionStatus::Cancelled;
        store.put_user(record).await.unwrap();

        let query = EntitlementQuery::new(store);
        let entitlement = query.entitlement(Some("a@b.com")).await.unwrap();
        assert!(!entitlement.pro);
        assert!(entitlement.detail.is_some());
    }
}
