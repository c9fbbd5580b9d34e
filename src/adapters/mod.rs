//! Adapters - concrete implementations of the ports.

pub mod deadletter;
pub mod http;
pub mod memory;
pub mod paypal;
