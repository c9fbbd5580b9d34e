//! DeadLetterQueue port - durable record of failed webhook reconciliations.
//!
//! The webhook entry point acknowledges the transport unconditionally, so a
//! reconciliation failure would otherwise vanish. Every failure is appended
//! here instead, as a structured, replayable record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::StoreError;

/// A webhook event whose reconciliation failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetter {
    /// Unique identifier for this entry.
    pub id: Uuid,

    /// Event type of the triggering webhook, if it carried one.
    pub event_type: Option<String>,

    /// Subscription id the reconciliation targeted, if one was extracted.
    pub subscription_id: Option<String>,

    /// The original event payload, untouched.
    pub payload: serde_json::Value,

    /// Why reconciliation failed.
    pub error: String,

    /// When the failure was recorded.
    pub failed_at: DateTime<Utc>,

    /// Number of reconciliation attempts for this event.
    pub attempts: u32,
}

impl DeadLetter {
    /// Record a first-attempt failure.
    pub fn new(
        event_type: Option<String>,
        subscription_id: Option<String>,
        payload: serde_json::Value,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            subscription_id,
            payload,
            error: error.into(),
            failed_at: Utc::now(),
            attempts: 1,
        }
    }
}

/// Port for persisting and inspecting dead letters.
#[async_trait]
pub trait DeadLetterQueue: Send + Sync {
    /// Append a dead letter.
    async fn push(&self, letter: DeadLetter) -> Result<(), StoreError>;

    /// All recorded dead letters, oldest first.
    async fn pending(&self) -> Result<Vec<DeadLetter>, StoreError>;
}
