//! Persisted transcript document.
//!
//! The on-disk JSON uses camelCase keys. Files written by the first release
//! used snake_case names (`customer_name`, `cancel_strength`,
//! `customer_situation`, `script_context`, `message_list`,
//! `selected_points`); those are accepted as aliases when reading.

use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;

/// Serialized subset of a session.
///
/// `urgency_tier` and `emphasis_topics` stay as raw strings so a file
/// round-trips byte-for-byte even when it carries values this build no
/// longer recognizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    #[serde(default, alias = "customer_name")]
    pub customer_name: String,
    #[serde(default, alias = "cancel_strength")]
    pub urgency_tier: String,
    #[serde(default, alias = "customer_situation")]
    pub situation_text: String,
    #[serde(default, alias = "script_context")]
    pub script_text: String,
    #[serde(default, alias = "selected_points")]
    pub emphasis_topics: Vec<String>,
    #[serde(default, alias = "message_list")]
    pub messages: Vec<ChatTurn>,
}

/// Which on-disk shape a transcript was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptFormat {
    /// Current structured document.
    Structured,
    /// Bare array of turns with no metadata.
    Legacy,
}

/// A decoded transcript plus the shape it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedTranscript {
    pub filename: String,
    pub format: TranscriptFormat,
    pub transcript: Transcript,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    AlreadyDeleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_serializes_camel_case() {
        let transcript = Transcript {
            customer_name: "Hong".to_string(),
            messages: vec![ChatTurn::assistant("script")],
            ..Transcript::default()
        };
        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(json["customerName"], "Hong");
        assert_eq!(json["messages"][0]["role"], "ai");
        assert!(json.get("customer_name").is_none());
    }

    #[test]
    fn test_transcript_accepts_snake_case_aliases() {
        let json = r#"{
            "customer_name": "Lee",
            "cancel_strength": "medium (undecided)",
            "customer_situation": "premium too high",
            "script_context": "Hello",
            "message_list": [{"role": "ai", "content": "Hello"}]
        }"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.customer_name, "Lee");
        assert_eq!(transcript.urgency_tier, "medium (undecided)");
        assert_eq!(transcript.situation_text, "premium too high");
        assert_eq!(transcript.script_text, "Hello");
        assert_eq!(transcript.messages.len(), 1);
        assert!(transcript.emphasis_topics.is_empty());
    }

    #[test]
    fn test_delete_outcome_serde() {
        let json = serde_json::to_string(&DeleteOutcome::AlreadyDeleted).unwrap();
        assert_eq!(json, "\"already_deleted\"");
    }
}
