//! Page controller: which actions are legal on which page, and what each
//! action does to a session.

pub mod dispatch;
pub mod page;

pub use dispatch::{CaseController, CaseInput, Event, Outcome};
pub use page::{EventKind, available_events, transition};
