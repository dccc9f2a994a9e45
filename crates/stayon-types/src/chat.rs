//! Chat turn types for StayOn.
//!
//! A [`ChatTurn`] is one entry of the conversation shown to the agent. Turns
//! are immutable once created and their order is significant.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::llm::{Message, MessageRole};

/// Who produced a chat turn.
///
/// Transcript files written by earlier releases tag model output as `"ai"`,
/// so that is the on-disk spelling; `"assistant"` is accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai", alias = "assistant")]
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "ai"),
        }
    }
}

impl From<TurnRole> for MessageRole {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => MessageRole::User,
            TurnRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single role-tagged turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }

    /// Convert to the provider-facing message shape.
    pub fn to_message(&self) -> Message {
        Message {
            role: self.role.into(),
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_serializes_as_ai() {
        let turn = ChatTurn::assistant("hello");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"ai","content":"hello"}"#);
    }

    #[test]
    fn test_assistant_alias_accepted() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<ChatTurn, _> =
            serde_json::from_str(r#"{"role":"system","content":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_message_maps_role() {
        let msg = ChatTurn::user("question").to_message();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "question");
    }
}
