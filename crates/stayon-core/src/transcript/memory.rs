//! In-memory `TranscriptRepository` for controller tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};

use stayon_types::error::TranscriptError;
use stayon_types::transcript::{DeleteOutcome, LoadedTranscript, Transcript};

use super::codec;
use super::repository::TranscriptRepository;

#[derive(Clone, Default)]
pub(crate) struct MemoryTranscriptStore {
    files: Arc<Mutex<BTreeMap<(String, String), String>>>,
}

impl MemoryTranscriptStore {
    pub(crate) fn insert_raw(&self, user_folder: &str, filename: &str, body: &str) {
        self.files
            .lock()
            .unwrap()
            .insert((user_folder.to_string(), filename.to_string()), body.to_string());
    }

    pub(crate) fn contains(&self, user_folder: &str, filename: &str) -> bool {
        self.files
            .lock()
            .unwrap()
            .contains_key(&(user_folder.to_string(), filename.to_string()))
    }
}

impl TranscriptRepository for MemoryTranscriptStore {
    fn save(
        &self,
        user_folder: &str,
        previous_file: Option<&str>,
        transcript: &Transcript,
        now: DateTime<FixedOffset>,
    ) -> impl Future<Output = Result<String, TranscriptError>> + Send {
        let result = (|| -> Result<String, TranscriptError> {
            let filename = codec::transcript_filename(&transcript.customer_name, now);
            let body = codec::encode(transcript)?;
            let mut files = self.files.lock().unwrap();
            if let Some(previous) = previous_file {
                files.remove(&(user_folder.to_string(), previous.to_string()));
            }
            files.insert((user_folder.to_string(), filename.clone()), body);
            Ok(filename)
        })();
        async move { result }
    }

    fn list(
        &self,
        user_folder: &str,
    ) -> impl Future<Output = Result<Vec<String>, TranscriptError>> + Send {
        let mut names: Vec<String> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|(folder, _)| folder == user_folder)
            .map(|(_, name)| name.clone())
            .collect();
        codec::sort_newest_first(&mut names);
        async move { Ok(names) }
    }

    fn load(
        &self,
        user_folder: &str,
        filename: &str,
    ) -> impl Future<Output = Result<LoadedTranscript, TranscriptError>> + Send {
        let result = match self
            .files
            .lock()
            .unwrap()
            .get(&(user_folder.to_string(), filename.to_string()))
        {
            Some(body) => codec::decode(filename, body.as_bytes()),
            None => Err(TranscriptError::NotFound(filename.to_string())),
        };
        async move { result }
    }

    fn delete(
        &self,
        user_folder: &str,
        filename: &str,
    ) -> impl Future<Output = Result<DeleteOutcome, TranscriptError>> + Send {
        let removed = self
            .files
            .lock()
            .unwrap()
            .remove(&(user_folder.to_string(), filename.to_string()));
        let outcome = if removed.is_some() {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::AlreadyDeleted
        };
        async move { Ok(outcome) }
    }
}
