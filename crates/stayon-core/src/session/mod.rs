//! Session lifecycle helpers and the shared history store.
//!
//! `Session` lives in `stayon-types`; this module adds an extension trait
//! (`SessionExt`) for the transitions that touch many fields at once:
//! clearing a case, snapshotting to a transcript, and restoring from one.

pub mod store;

use tracing::warn;
use uuid::Uuid;

use stayon_types::retention::{EmphasisTopic, UrgencyTier};
use stayon_types::session::{Page, Session};
use stayon_types::transcript::{LoadedTranscript, Transcript};

/// Create the session for a freshly logged-in agent.
///
/// `user_folder` is `{name}_{code}`. The session id is an opaque UUID so it
/// is always a valid header value, whatever script the name is written in.
pub fn start_session(name: &str, code: &str) -> Session {
    Session {
        session_id: Uuid::now_v7().to_string(),
        user_folder: format!("{name}_{code}"),
        agent_name: name.to_string(),
        page: Page::Input,
        ..Session::default()
    }
}

pub trait SessionExt {
    /// Clear every case field, keeping identity and page.
    fn clear_case(&mut self);

    /// Persistable snapshot of the case.
    fn to_transcript(&self) -> Transcript;

    /// Fill the case fields from a loaded transcript and mark it current.
    fn apply_transcript(&mut self, loaded: &LoadedTranscript);
}

impl SessionExt for Session {
    fn clear_case(&mut self) {
        self.customer_name.clear();
        self.situation_text.clear();
        self.emphasis_topics.clear();
        self.urgency_tier = None;
        self.script_text.clear();
        self.outbound_message_text.clear();
        self.messages.clear();
        self.current_file = None;
    }

    fn to_transcript(&self) -> Transcript {
        Transcript {
            customer_name: self.customer_name.clone(),
            urgency_tier: self
                .urgency_tier
                .map(|tier| tier.label().to_string())
                .unwrap_or_default(),
            situation_text: self.situation_text.clone(),
            script_text: self.script_text.clone(),
            emphasis_topics: self
                .emphasis_topics
                .iter()
                .map(|topic| topic.slug().to_string())
                .collect(),
            messages: self.messages.clone(),
        }
    }

    fn apply_transcript(&mut self, loaded: &LoadedTranscript) {
        let transcript = &loaded.transcript;

        self.urgency_tier = match transcript.urgency_tier.trim() {
            "" => None,
            raw => match raw.parse::<UrgencyTier>() {
                Ok(tier) => Some(tier),
                Err(_) => {
                    warn!(file = %loaded.filename, tier = raw, "Unknown urgency tier in transcript");
                    None
                }
            },
        };

        self.emphasis_topics = transcript
            .emphasis_topics
            .iter()
            .filter_map(|raw| match raw.parse::<EmphasisTopic>() {
                Ok(topic) => Some(topic),
                Err(_) => {
                    warn!(file = %loaded.filename, topic = %raw, "Unknown emphasis topic in transcript");
                    None
                }
            })
            .collect();

        self.customer_name = transcript.customer_name.clone();
        self.situation_text = transcript.situation_text.clone();
        self.script_text = transcript.script_text.clone();
        self.messages = transcript.messages.clone();
        self.outbound_message_text.clear();
        self.current_file = Some(loaded.filename.clone());
    }
}
