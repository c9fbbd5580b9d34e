//! In-memory dead-letter queue.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::StoreError;
use crate::ports::{DeadLetter, DeadLetterQueue};

/// `DeadLetterQueue` keeping entries in process memory.
///
/// Default backend when no dead-letter file path is configured; also the
/// inspection point for webhook failure tests.
#[derive(Default)]
pub struct InMemoryDeadLetterQueue {
    letters: RwLock<Vec<DeadLetter>>,
}

impl InMemoryDeadLetterQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded dead letters (for test assertions).
    pub async fn len(&self) -> usize {
        self.letters.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.letters.read().await.is_empty()
    }
}

#[async_trait]
impl DeadLetterQueue for InMemoryDeadLetterQueue {
    async fn push(&self, letter: DeadLetter) -> Result<(), StoreError> {
        self.letters.write().await.push(letter);
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<DeadLetter>, StoreError> {
        Ok(self.letters.read().await.clone())
    }
}
