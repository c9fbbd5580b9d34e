//! Subscription status as reported by the billing provider.

use serde::{Deserialize, Serialize};

/// Subscription status reported by the billing provider.
///
/// Known PayPal lifecycle states get dedicated variants; anything else the
/// provider reports round-trips losslessly through `Other`. Statuses are not
/// state-machine validated — the provider is the sole source of truth and
/// every successful fetch overwrites whatever was stored before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    ApprovalPending,
    Active,
    Cancelled,
    Suspended,
    Expired,
    /// Provider-defined status outside the known lifecycle set.
    Other(String),
}

impl SubscriptionStatus {
    /// Whether this status grants entitlement.
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    /// The provider's wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::ApprovalPending => "APPROVAL_PENDING",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Suspended => "SUSPENDED",
            SubscriptionStatus::Expired => "EXPIRED",
            SubscriptionStatus::Other(s) => s,
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "APPROVAL_PENDING" => SubscriptionStatus::ApprovalPending,
            "ACTIVE" => SubscriptionStatus::Active,
            "CANCELLED" => SubscriptionStatus::Cancelled,
            "SUSPENDED" => SubscriptionStatus::Suspended,
            "EXPIRED" => SubscriptionStatus::Expired,
            _ => SubscriptionStatus::Other(s),
        }
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
