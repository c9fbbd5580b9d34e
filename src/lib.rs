//! Subgate - Subscription Entitlement Reconciliation Service
//!
//! This crate reconciles local user entitlements with the authoritative
//! subscription state held by the PayPal billing API, driven by checkout
//! confirmations and asynchronous provider webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
