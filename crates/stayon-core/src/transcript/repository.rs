//! TranscriptRepository trait definition.

use chrono::{DateTime, FixedOffset};

use stayon_types::error::TranscriptError;
use stayon_types::transcript::{DeleteOutcome, LoadedTranscript, Transcript};

/// Per-agent transcript persistence.
///
/// Implementations live in stayon-infra (e.g., `FsTranscriptStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait TranscriptRepository: Send + Sync {
    /// Write `transcript` under a fresh `{customer}_{YYMMDD-HHMMSS}.json`
    /// name derived from `now`, removing `previous_file` first if given.
    /// Returns the new filename.
    fn save(
        &self,
        user_folder: &str,
        previous_file: Option<&str>,
        transcript: &Transcript,
        now: DateTime<FixedOffset>,
    ) -> impl std::future::Future<Output = Result<String, TranscriptError>> + Send;

    /// Transcript filenames for an agent, newest embedded timestamp first.
    /// A folder that does not exist yet yields an empty list.
    fn list(
        &self,
        user_folder: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, TranscriptError>> + Send;

    /// Read and decode one transcript.
    fn load(
        &self,
        user_folder: &str,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<LoadedTranscript, TranscriptError>> + Send;

    /// Remove one transcript. A missing file is `AlreadyDeleted`, not an error.
    fn delete(
        &self,
        user_folder: &str,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<DeleteOutcome, TranscriptError>> + Send;
}
