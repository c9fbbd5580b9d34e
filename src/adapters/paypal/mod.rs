//! PayPal REST API adapters.
//!
//! Implements `TokenProvider` (OAuth2 client-credentials exchange with token
//! caching) and `SubscriptionClient` (subscription-by-id fetch with a single
//! stale-token refresh) against the PayPal billing API.

mod auth;
mod client;
mod wire;

pub use auth::PayPalAuth;
pub use client::PayPalSubscriptionClient;
