//! Entitlement records and subscription snapshots.
//!
//! `EntitlementRecord` is keyed by user id (email) and mutated in place on
//! every reconciliation that resolves to that user; it is never deleted.
//! `SubscriptionSnapshot` is keyed by subscription id and overwritten on
//! every successful provider fetch. A record's subscription id may lack a
//! snapshot (the snapshot write can race behind the record write), and
//! multiple records may share one subscription id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::SubscriptionStatus;

/// A user's locally held entitlement state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementRecord {
    /// Unique key: the user's email address.
    pub user_id: String,

    /// The provider subscription this record tracks.
    pub subscription_id: String,

    /// Last provider-reported status (last-fetch-wins).
    pub status: SubscriptionStatus,

    /// Last provider-reported plan id.
    pub plan_id: Option<String>,

    /// When this record was last reconciled.
    pub updated_at: DateTime<Utc>,

    /// Type of the webhook event that last touched this record, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<String>,
}

impl EntitlementRecord {
    /// Create a record for a first confirmation, pending its initial merge.
    pub fn new(user_id: impl Into<String>, subscription_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            subscription_id: subscription_id.into(),
            status: SubscriptionStatus::ApprovalPending,
            plan_id: None,
            updated_at: Utc::now(),
            last_event: None,
        }
    }

    /// Merge a freshly fetched snapshot into this record.
    ///
    /// Overwrites status, plan id, and the update timestamp. `last_event` is
    /// only touched when a triggering webhook label is supplied, so a confirm
    /// call does not erase the trail left by an earlier webhook.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &SubscriptionSnapshot,
        triggering_event: Option<&str>,
        now: DateTime<Utc>,
    ) {
        self.status = snapshot.status.clone();
        self.plan_id = snapshot.plan_id.clone();
        self.updated_at = now;
        if let Some(label) = triggering_event {
            self.last_event = Some(label.to_string());
        }
    }

    /// Whether this record currently grants entitlement.
    pub fn is_entitled(&self) -> bool {
        self.status.is_active()
    }
}

/// The last known full state of a subscription resource at the provider.
///
/// Kept for audit and debug inspection; entitlement decisions only use what
/// is copied into `EntitlementRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnapshot {
    /// Unique key: the provider subscription id.
    pub subscription_id: String,

    /// Provider-reported status at fetch time.
    pub status: SubscriptionStatus,

    /// Provider-reported plan id at fetch time.
    pub plan_id: Option<String>,

    /// The full provider payload, untouched.
    pub raw: serde_json::Value,
}

/// Derived access grant for a user, as served by the entitlement lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Entitlement {
    /// True iff the record exists and its status is ACTIVE.
    pub pro: bool,

    /// The backing record, if one exists.
    pub detail: Option<EntitlementRecord>,
}

impl Entitlement {
    /// No record: no entitlement.
    pub fn none() -> Self {
        Self {
            pro: false,
            detail: None,
        }
    }
}

impl From<Option<EntitlementRecord>> for Entitlement {
    fn from(record: Option<EntitlementRecord>) -> Self {
        let pro = record.as_ref().is_some_and(EntitlementRecord::is_entitled);
        Self {
            pro,
            detail: record,
        }
    }
}
