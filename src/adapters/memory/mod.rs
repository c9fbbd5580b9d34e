//! In-memory adapters for the store and dead-letter ports.
//!
//! The in-memory store is the shipped persistence backend (the service holds
//! entitlement state in process, as the provider remains the source of
//! truth); the in-memory dead-letter queue is the default when no file path
//! is configured, and both double as test fixtures.

mod dead_letter;
mod store;

pub use dead_letter::InMemoryDeadLetterQueue;
pub use store::InMemoryEntitlementStore;
