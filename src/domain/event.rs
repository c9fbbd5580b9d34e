//! Provider webhook event model.
//!
//! Defines the shape consumed from the provider's webhook pushes, the
//! classification of which event types feed reconciliation, and the ordered
//! field-fallback policy for pulling a subscription id out of the event
//! resource.

use serde::Deserialize;

/// Prefix shared by all subscription-lifecycle event types.
pub const SUBSCRIPTION_LIFECYCLE_PREFIX: &str = "BILLING.SUBSCRIPTION.";

/// One-time payment completion event type, also reconciliation-relevant.
pub const PAYMENT_COMPLETED_TYPE: &str = "PAYMENT.SALE.COMPLETED";

/// Ordered extraction rules for the subscription id within `resource`.
///
/// Evaluated left to right; the first field present with a string value wins.
/// Lifecycle events carry the id in `id`, sale events reference it through
/// `billing_agreement_id` or `subscription_id`.
pub const SUBSCRIPTION_ID_FIELDS: [&str; 3] = ["id", "billing_agreement_id", "subscription_id"];

/// Inbound webhook event (simplified).
///
/// Only the fields reconciliation needs are captured; the router keeps the
/// original payload around for dead-lettering.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEvent {
    /// Event type string, e.g. "BILLING.SUBSCRIPTION.CANCELLED".
    #[serde(default)]
    pub event_type: Option<String>,

    /// The resource the event refers to (polymorphic per event type).
    #[serde(default)]
    pub resource: serde_json::Value,
}

impl ProviderEvent {
    /// Classify this event for reconciliation relevance.
    pub fn class(&self) -> EventClass {
        match &self.event_type {
            Some(t) => EventClass::classify(t),
            None => EventClass::Irrelevant,
        }
    }

    /// Extract the subscription id via the ordered fallback policy.
    pub fn subscription_id(&self) -> Option<&str> {
        SUBSCRIPTION_ID_FIELDS
            .iter()
            .find_map(|field| self.resource.get(field).and_then(serde_json::Value::as_str))
    }
}

/// Reconciliation relevance of an event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// Subscription lifecycle change (created, activated, cancelled, ...).
    SubscriptionLifecycle,

    /// One-time payment completed against a subscription.
    PaymentCompleted,

    /// Anything else; ignored with no side effect.
    Irrelevant,
}

impl EventClass {
    /// Classify an event type string.
    pub fn classify(event_type: &str) -> Self {
        if event_type.starts_with(SUBSCRIPTION_LIFECYCLE_PREFIX) {
            EventClass::SubscriptionLifecycle
        } else if event_type == PAYMENT_COMPLETED_TYPE {
            EventClass::PaymentCompleted
        } else {
            EventClass::Irrelevant
        }
    }

    /// Whether events of this class trigger reconciliation.
    pub fn is_relevant(&self) -> bool {
        !matches!(self, EventClass::Irrelevant)
    }
}
