//! Dead-letter queue configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Dead-letter queue configuration.
///
/// When a path is set, failed webhook reconciliations are appended to a
/// JSON-lines file at that path; otherwise they are kept in memory only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeadLetterConfig {
    /// JSONL file path for durable dead letters
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_in_memory() {
        let config = DeadLetterConfig::default();
        assert!(config.path.is_none());
    }
}
