//! PayPal subscription-resource client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{ReconcileError, SubscriptionSnapshot};
use crate::ports::{SubscriptionClient, TokenProvider};

use super::wire::SubscriptionResource;

/// `SubscriptionClient` backed by `GET /v1/billing/subscriptions/{id}`.
///
/// Obtains a bearer token from the injected [`TokenProvider`] per call. When
/// the provider answers 401 the cached token is presumed stale: the cache is
/// invalidated and the fetch retried once with a fresh token. No other
/// retries are performed.
pub struct PayPalSubscriptionClient {
    base_url: String,
    http_client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl PayPalSubscriptionClient {
    pub fn new(
        base_url: impl Into<String>,
        http_client: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            tokens,
        }
    }

    fn map_transport_error(e: reqwest::Error) -> ReconcileError {
        if e.is_timeout() {
            ReconcileError::network(format!("provider request timed out: {e}"))
        } else {
            ReconcileError::network(e.to_string())
        }
    }
}

#[async_trait]
impl SubscriptionClient for PayPalSubscriptionClient {
    async fn fetch_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionSnapshot, ReconcileError> {
        let url = format!(
            "{}/v1/billing/subscriptions/{}",
            self.base_url, subscription_id
        );

        let mut refreshed = false;
        loop {
            let token = self.tokens.access_token().await?;

            let response = self
                .http_client
                .get(&url)
                .bearer_auth(token.as_str())
                .send()
                .await
                .map_err(Self::map_transport_error)?;

            match response.status() {
                StatusCode::UNAUTHORIZED if !refreshed => {
                    tracing::warn!(subscription_id, "provider rejected token; refreshing once");
                    self.tokens.invalidate().await;
                    refreshed = true;
                    continue;
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(ReconcileError::auth(
                        "provider rejected a freshly exchanged token",
                    ));
                }
                StatusCode::NOT_FOUND => {
                    return Err(ReconcileError::not_found(subscription_id));
                }
                status if !status.is_success() => {
                    let body = response.text().await.unwrap_or_default();
                    tracing::error!(subscription_id, %status, "subscription fetch failed");
                    return Err(ReconcileError::network(format!(
                        "provider returned {status}: {body}"
                    )));
                }
                _ => {}
            }

            let raw: serde_json::Value = response
                .json()
                .await
                .map_err(|e| ReconcileError::network(format!("malformed provider payload: {e}")))?;

            let resource: SubscriptionResource = serde_json::from_value(raw.clone())
                .map_err(|e| ReconcileError::network(format!("malformed provider payload: {e}")))?;

            return Ok(SubscriptionSnapshot {
                subscription_id: subscription_id.to_string(),
                status: resource.status.into(),
                plan_id: resource.plan_id,
                raw,
            });
        }
    }
}
