//! Ports - async capability traits at the system's seams.
//!
//! Adapters implement these against the real provider, the in-process store,
//! and the dead-letter backends; tests substitute mocks without touching the
//! reconciliation logic.

mod dead_letter_queue;
mod entitlement_store;
mod subscription_client;
mod token_provider;
mod webhook_verifier;

pub use dead_letter_queue::{DeadLetter, DeadLetterQueue};
pub use entitlement_store::EntitlementStore;
pub use subscription_client::SubscriptionClient;
pub use token_provider::{AccessToken, TokenProvider};
pub use webhook_verifier::{AcceptAllVerifier, WebhookVerifier};
