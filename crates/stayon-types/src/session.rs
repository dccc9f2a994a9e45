//! Agent session state.
//!
//! A [`Session`] is created at login and carries everything the agent has
//! entered or generated for the current case. It lives in memory only; the
//! subset worth keeping is written out as a transcript on explicit save.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;
use crate::retention::{EmphasisTopic, UrgencyTier};

/// Which form the agent is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Login,
    Input,
    Chatbot,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Login => write!(f, "login"),
            Page::Input => write!(f, "input"),
            Page::Chatbot => write!(f, "chatbot"),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::Login
    }
}

/// Per-agent working state for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    /// Directory name under the history root, `{name}_{code}`.
    pub user_folder: String,
    /// Agent display name, used in generated scripts.
    pub agent_name: String,
    pub page: Page,
    /// Transcript file this session was loaded from or last saved to.
    pub current_file: Option<String>,
    pub customer_name: String,
    pub urgency_tier: Option<UrgencyTier>,
    pub situation_text: String,
    pub emphasis_topics: BTreeSet<EmphasisTopic>,
    pub script_text: String,
    pub outbound_message_text: String,
    pub messages: Vec<ChatTurn>,
}

impl Session {
    /// A fresh, logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// History-store key for the follow-up chat.
    pub fn history_key(&self) -> &str {
        &self.session_id
    }

    /// History-store key for outbound message drafting, kept apart so
    /// drafts never leak into the follow-up chat context.
    pub fn outbound_history_key(&self) -> String {
        outbound_history_key_for(&self.session_id)
    }
}

/// Suffix that separates the outbound history key from the chat key.
pub const OUTBOUND_KEY_SUFFIX: &str = "_outbound";

/// Outbound history key for a session id, for callers holding only the id.
pub fn outbound_history_key_for(session_id: &str) -> String {
    format!("{session_id}{OUTBOUND_KEY_SUFFIX}")
}

/// The session id a history key belongs to.
pub fn session_id_of_history_key(key: &str) -> &str {
    key.strip_suffix(OUTBOUND_KEY_SUFFIX).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_login() {
        let session = Session::new();
        assert_eq!(session.page, Page::Login);
        assert!(session.messages.is_empty());
        assert!(session.current_file.is_none());
        assert!(session.urgency_tier.is_none());
    }

    #[test]
    fn test_history_keys_are_distinct() {
        let session = Session {
            session_id: "kim_0193".to_string(),
            ..Session::default()
        };
        assert_eq!(session.history_key(), "kim_0193");
        assert_eq!(session.outbound_history_key(), "kim_0193_outbound");
        assert_eq!(outbound_history_key_for("kim_0193"), session.outbound_history_key());
        assert_eq!(session_id_of_history_key("kim_0193_outbound"), "kim_0193");
        assert_eq!(session_id_of_history_key("kim_0193"), "kim_0193");
    }

    #[test]
    fn test_page_serde() {
        let json = serde_json::to_string(&Page::Chatbot).unwrap();
        assert_eq!(json, "\"chatbot\"");
        assert_eq!(Page::Input.to_string(), "input");
    }
}
