//! Pure page-transition table.

use std::fmt;

use serde::Serialize;

use stayon_types::session::Page;

/// Payload-free discriminant of an [`Event`](super::Event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Login,
    GenerateScenario,
    SubmitCase,
    AskFollowUp,
    GenerateOutbound,
    SaveTranscript,
    ListTranscripts,
    LoadTranscript,
    DeleteTranscript,
    NewCase,
    Logout,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Login,
        EventKind::GenerateScenario,
        EventKind::SubmitCase,
        EventKind::AskFollowUp,
        EventKind::GenerateOutbound,
        EventKind::SaveTranscript,
        EventKind::ListTranscripts,
        EventKind::LoadTranscript,
        EventKind::DeleteTranscript,
        EventKind::NewCase,
        EventKind::Logout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Login => "login",
            EventKind::GenerateScenario => "generate_scenario",
            EventKind::SubmitCase => "submit_case",
            EventKind::AskFollowUp => "ask_follow_up",
            EventKind::GenerateOutbound => "generate_outbound",
            EventKind::SaveTranscript => "save_transcript",
            EventKind::ListTranscripts => "list_transcripts",
            EventKind::LoadTranscript => "load_transcript",
            EventKind::DeleteTranscript => "delete_transcript",
            EventKind::NewCase => "new_case",
            EventKind::Logout => "logout",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page after `kind` succeeds on `page`, or `None` if it is not allowed there.
pub fn transition(page: Page, kind: EventKind) -> Option<Page> {
    let working = matches!(page, Page::Input | Page::Chatbot);
    match kind {
        EventKind::Login => (page == Page::Login).then_some(Page::Input),
        EventKind::GenerateScenario => (page == Page::Input).then_some(Page::Input),
        EventKind::SubmitCase => (page == Page::Input).then_some(Page::Chatbot),
        EventKind::AskFollowUp | EventKind::GenerateOutbound | EventKind::SaveTranscript => {
            (page == Page::Chatbot).then_some(Page::Chatbot)
        }
        EventKind::ListTranscripts | EventKind::DeleteTranscript => working.then_some(page),
        EventKind::LoadTranscript => working.then_some(Page::Chatbot),
        EventKind::NewCase => working.then_some(Page::Input),
        EventKind::Logout => working.then_some(Page::Login),
    }
}

/// Events the front end may offer on `page`.
pub fn available_events(page: Page) -> Vec<EventKind> {
    EventKind::ALL
        .into_iter()
        .filter(|kind| transition(page, *kind).is_some())
        .collect()
}
