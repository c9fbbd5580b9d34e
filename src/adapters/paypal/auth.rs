//! PayPal OAuth2 client-credentials token provider.
//!
//! Exchanges the configured client id/secret for a short-lived bearer token
//! via `POST /v1/oauth2/token` and caches it for its validity window, minus
//! a safety margin so a token is never used right at its expiry. The cache
//! is dropped on [`TokenProvider::invalidate`], which the subscription
//! client calls when the provider rejects a token as stale.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use crate::config::PayPalConfig;
use crate::domain::ReconcileError;
use crate::ports::{AccessToken, TokenProvider};

use super::wire::TokenResponse;

/// Refresh this long before the provider-reported expiry.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Cached bearer token with expiry tracking.
struct CachedToken {
    token: String,
    fetched_at: Instant,
    ttl: Duration,
}

impl CachedToken {
    fn new(token: String, expires_in: u64) -> Self {
        let ttl = Duration::from_secs(expires_in.saturating_sub(EXPIRY_MARGIN_SECS));
        Self {
            token,
            fetched_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() >= self.ttl
    }
}

/// `TokenProvider` backed by PayPal's OAuth2 token endpoint.
pub struct PayPalAuth {
    config: PayPalConfig,
    http_client: reqwest::Client,
    cache: RwLock<Option<CachedToken>>,
}

impl PayPalAuth {
    pub fn new(config: PayPalConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            cache: RwLock::new(None),
        }
    }

    async fn exchange(&self) -> Result<TokenResponse, ReconcileError> {
        let url = format!("{}/v1/oauth2/token", self.config.base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| ReconcileError::auth(format!("token endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "credential exchange rejected");
            return Err(ReconcileError::auth(format!(
                "credential exchange rejected with {status}: {body}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ReconcileError::auth(format!("malformed token response: {e}")))
    }

    #[cfg(test)]
    async fn prime_cache(&self, token: &str, expires_in: u64) {
        *self.cache.write().await = Some(CachedToken::new(token.to_string(), expires_in));
    }
}

#[async_trait]
impl TokenProvider for PayPalAuth {
    async fn access_token(&self) -> Result<AccessToken, ReconcileError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if !cached.is_expired() {
                    return Ok(AccessToken::new(cached.token.clone()));
                }
            }
        }

        let response = self.exchange().await?;
        tracing::debug!(expires_in = response.expires_in, "obtained provider token");

        let token = AccessToken::new(response.access_token.clone());
        *self.cache.write().await =
            Some(CachedToken::new(response.access_token, response.expires_in));
        Ok(token)
    }

    async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config(base_url: &str) -> PayPalConfig {
        PayPalConfig {
            base_url: base_url.to_string(),
            client_id: "client-id".to_string(),
            client_secret: SecretString::new("client-secret".to_string()),
            expected_plan_id: None,
        }
    }

    fn unreachable_auth() -> PayPalAuth {
        // Nothing listens on port 1; any exchange attempt fails fast.
        PayPalAuth::new(test_config("http://127.0.0.1:1"), reqwest::Client::new())
    }

    #[test]
    fn cached_token_expires_with_margin() {
        let cached = CachedToken::new("tok".to_string(), 3600);
        assert!(!cached.is_expired());

        // A ttl at or under the margin is expired immediately.
        let short = CachedToken::new("tok".to_string(), EXPIRY_MARGIN_SECS);
        assert!(short.is_expired());
    }

    #[tokio::test]
    async fn cached_token_is_served_without_an_exchange() {
        let auth = unreachable_auth();
        auth.prime_cache("cached-token", 3600).await;

        let token = auth.access_token().await.unwrap();
        assert_eq!(token.as_str(), "cached-token");
    }

    #[tokio::test]
    async fn expired_cache_forces_a_fresh_exchange() {
        let auth = unreachable_auth();
        auth.prime_cache("stale-token", 0).await;

        // The cache entry is expired, so the adapter must hit the (dead)
        // token endpoint and surface the failure as Auth.
        let result = auth.access_token().await;
        assert!(matches!(result, Err(ReconcileError::Auth(_))));
    }

    #[tokio::test]
    async fn invalidate_clears_the_cache() {
        let auth = unreachable_auth();
        auth.prime_cache("cached-token", 3600).await;
        auth.invalidate().await;

        let result = auth.access_token().await;
        assert!(matches!(result, Err(ReconcileError::Auth(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_with_auth_error() {
        let auth = unreachable_auth();
        let result = auth.access_token().await;

        match result {
            Err(ReconcileError::Auth(message)) => {
                assert!(message.contains("unreachable"), "got: {message}");
            }
            other => panic!("expected Auth error, got {other:?}"),
        }
    }
}
