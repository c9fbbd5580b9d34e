//! Domain model for subscription entitlement reconciliation.
//!
//! Contains the entitlement records and subscription snapshots owned by the
//! store, the provider webhook event model with its classification and
//! identifier-extraction policy, and the error taxonomy shared by the
//! reconciliation paths.

mod entitlement;
mod errors;
mod event;
mod status;

pub use entitlement::{Entitlement, EntitlementRecord, SubscriptionSnapshot};
pub use errors::{ReconcileError, StoreError};
pub use event::{
    EventClass, ProviderEvent, PAYMENT_COMPLETED_TYPE, SUBSCRIPTION_ID_FIELDS,
    SUBSCRIPTION_LIFECYCLE_PREFIX,
};
pub use status::SubscriptionStatus;
