//! TokenProvider port - credential exchange with the billing provider.

use async_trait::async_trait;

use crate::domain::ReconcileError;

/// A short-lived bearer token for the provider's API.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw bearer value for the Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Port for exchanging stored credentials for a provider bearer token.
///
/// Implementations fail with [`ReconcileError::Auth`] when the exchange is
/// rejected or the auth endpoint is unreachable. Caching within the token's
/// validity window is an implementation concern; callers that see a stale
/// token rejected downstream call [`TokenProvider::invalidate`] before
/// retrying.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get a bearer token, exchanging credentials if none is cached.
    async fn access_token(&self) -> Result<AccessToken, ReconcileError>;

    /// Drop any cached token so the next call performs a fresh exchange.
    async fn invalidate(&self);
}
