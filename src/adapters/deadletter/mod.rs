//! Durable dead-letter queue adapter.

mod jsonl;

pub use jsonl::JsonlDeadLetterQueue;
