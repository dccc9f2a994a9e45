//! Business logic and repository trait definitions for StayOn.
//!
//! This crate defines the "ports" (provider and repository traits) that the
//! infrastructure layer implements, plus everything that can be expressed
//! without I/O: the session history store, prompt assembly, the LLM gateway,
//! transcript encoding, and the page controller. It depends only on
//! `stayon-types` -- never on `stayon-infra`.

pub mod controller;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod transcript;
