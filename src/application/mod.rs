//! Application layer - the reconciliation engine and its entry points.
//!
//! `ConfirmHandler` and `WebhookRouter` are the two independent triggers;
//! both terminate in `ReconciliationEngine`, and both run their
//! fetch-then-merge sequence inside the per-subscription critical section
//! provided by `SubscriptionLocks`.

mod confirm;
mod entitlement_query;
mod locks;
mod reconcile;
mod webhook;

pub use confirm::{Confirmation, ConfirmHandler};
pub use entitlement_query::EntitlementQuery;
pub use locks::SubscriptionLocks;
pub use reconcile::{ReconcileOutcome, ReconciliationEngine};
pub use webhook::WebhookRouter;
