//! Per-subscription critical sections.
//!
//! A reconciliation spans several await points (token exchange, subscription
//! fetch, store writes), so two triggers for the same subscription id could
//! otherwise interleave read-fetch-write sequences and lose the fresher
//! update. Serializing per key closes that window while letting different
//! subscriptions proceed fully in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed async mutex over subscription ids.
///
/// Lock entries are created on first use and kept for the process lifetime;
/// the id set is bounded by the subscriptions this instance has seen.
#[derive(Default)]
pub struct SubscriptionLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SubscriptionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the critical section for one subscription id.
    ///
    /// The returned guard holds the section until dropped.
    pub async fn acquire(&self, subscription_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            Arc::clone(
                map.entry(subscription_id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
