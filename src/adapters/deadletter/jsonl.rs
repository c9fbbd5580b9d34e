//! JSON-lines file dead-letter queue.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::StoreError;
use crate::ports::{DeadLetter, DeadLetterQueue};

/// `DeadLetterQueue` appending one JSON object per line to a file.
///
/// The file is created on first push. Entries survive restarts and can be
/// replayed with any JSONL tooling, which is the whole point of recording
/// them instead of only logging.
pub struct JsonlDeadLetterQueue {
    path: PathBuf,
}

impl JsonlDeadLetterQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(e: std::io::Error) -> StoreError {
        StoreError::backend(format!("dead-letter file: {e}"))
    }
}

#[async_trait]
impl DeadLetterQueue for JsonlDeadLetterQueue {
    async fn push(&self, letter: DeadLetter) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(&letter)
            .map_err(|e| StoreError::backend(format!("dead-letter encoding: {e}")))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(Self::io_error)?;
        file.write_all(line.as_bytes()).await.map_err(Self::io_error)?;
        file.flush().await.map_err(Self::io_error)?;
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<DeadLetter>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(e)),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|e| StoreError::backend(format!("dead-letter decoding: {e}")))
            })
            .collect()
    }
}
