//! SubscriptionClient port - subscription snapshot retrieval.

use async_trait::async_trait;

use crate::domain::{ReconcileError, SubscriptionSnapshot};

/// Port for fetching a subscription resource snapshot from the provider.
///
/// Fails with [`ReconcileError::NotFound`] when the provider reports the id
/// as unknown, [`ReconcileError::Network`] on transport failure or timeout,
/// and propagates [`ReconcileError::Auth`] from the token exchange unchanged.
/// No side effects beyond the outbound call.
#[async_trait]
pub trait SubscriptionClient: Send + Sync {
    async fn fetch_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionSnapshot, ReconcileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_client_is_object_safe() {
        fn _accepts_dyn(_client: &dyn SubscriptionClient) {}
    }
}
