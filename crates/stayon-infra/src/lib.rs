//! Infrastructure layer for StayOn.
//!
//! Contains implementations of the traits defined in `stayon-core`: the
//! filesystem transcript store and the OpenAI-compatible LLM provider, plus
//! the config loader and data-directory resolution.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod transcript;
