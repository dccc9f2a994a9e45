//! Prompt assembly for script generation, follow-up chat, outbound drafts,
//! and random practice scenarios.
//!
//! Everything here is pure string building; nothing touches the provider.

pub mod follow_up;
pub mod format;
pub mod outbound;
pub mod scenario;
pub mod script;

/// Heading the follow-up prompt asks the model to put above each suggested
/// line. The outbound summarizer keys on the same text.
pub const SUGGESTED_LINE_MARKER: &str = "👉 Suggested line";
