//! Error taxonomy for the reconciliation paths.

use thiserror::Error;

/// Errors surfaced by reconciliation, confirmation, and the provider client.
///
/// The confirm path maps these to HTTP statuses via [`ReconcileError::status_code`];
/// the webhook path treats every kind as non-fatal and dead-letters instead.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    /// Bad or mismatched input. No store mutation has happened.
    #[error("{0}")]
    Validation(String),

    /// Credential exchange with the provider was rejected or unreachable.
    #[error("provider authentication failed: {0}")]
    Auth(String),

    /// The provider does not know the subscription id.
    #[error("subscription not found: {0}")]
    NotFound(String),

    /// Transport failure (including timeouts) talking to the provider.
    #[error("provider request failed: {0}")]
    Network(String),

    /// The entitlement store itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReconcileError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReconcileError::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ReconcileError::Auth(message.into())
    }

    pub fn not_found(subscription_id: impl Into<String>) -> Self {
        ReconcileError::NotFound(subscription_id.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        ReconcileError::Network(message.into())
    }

    /// HTTP status the confirm path maps this error to.
    pub fn status_code(&self) -> u16 {
        match self {
            ReconcileError::Validation(_) => 400,
            ReconcileError::Auth(_)
            | ReconcileError::NotFound(_)
            | ReconcileError::Network(_)
            | ReconcileError::Store(_) => 500,
        }
    }
}

/// Failure inside an entitlement store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(
            ReconcileError::validation("email required").status_code(),
            400
        );
    }

    #[test]
    fn provider_failures_map_to_500() {
        assert_eq!(ReconcileError::auth("rejected").status_code(), 500);
        assert_eq!(ReconcileError::not_found("I-ABC").status_code(), 500);
        assert_eq!(ReconcileError::network("timeout").status_code(), 500);
        assert_eq!(
            ReconcileError::from(StoreError::backend("io")).status_code(),
            500
        );
    }

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let err = ReconcileError::validation("Unexpected plan_id P-2");
        assert_eq!(err.to_string(), "Unexpected plan_id P-2");
    }

    #[test]
    fn store_error_converts_transparently() {
        let err: ReconcileError = StoreError::backend("disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
