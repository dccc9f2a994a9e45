//! Shared domain types for StayOn.
//!
//! This crate contains the core domain types used across the StayOn workspace:
//! chat turns, retention cases (urgency tiers, emphasis topics), agent sessions,
//! transcripts, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod retention;
pub mod session;
pub mod transcript;
