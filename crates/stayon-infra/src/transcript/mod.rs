//! Filesystem transcript store.
//!
//! Layout: `{root}/{user_folder}/{customer}_{YYMMDD-HHMMSS}.json`. Naming,
//! ordering and decoding come from `stayon_core::transcript::codec`; this
//! module only does the I/O.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info};

use stayon_core::transcript::codec;
use stayon_core::transcript::repository::TranscriptRepository;
use stayon_types::error::TranscriptError;
use stayon_types::transcript::{DeleteOutcome, LoadedTranscript, Transcript};

/// Transcript repository rooted at the history directory.
#[derive(Debug, Clone)]
pub struct FsTranscriptStore {
    root: PathBuf,
}

impl FsTranscriptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn folder(&self, user_folder: &str) -> Result<PathBuf, TranscriptError> {
        codec::validate_path_segment(user_folder)?;
        Ok(self.root.join(user_folder))
    }

    fn file(&self, user_folder: &str, filename: &str) -> Result<PathBuf, TranscriptError> {
        codec::validate_filename(filename)?;
        Ok(self.folder(user_folder)?.join(filename))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> TranscriptError {
    TranscriptError::Io(format!("{}: {err}", path.display()))
}

impl TranscriptRepository for FsTranscriptStore {
    async fn save(
        &self,
        user_folder: &str,
        previous_file: Option<&str>,
        transcript: &Transcript,
        now: DateTime<FixedOffset>,
    ) -> Result<String, TranscriptError> {
        let folder = self.folder(user_folder)?;
        let filename = codec::transcript_filename(&transcript.customer_name, now);
        let body = codec::encode(transcript)?;

        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|e| io_error(&folder, e))?;

        if let Some(previous) = previous_file.filter(|p| *p != filename) {
            let previous_path = self.file(user_folder, previous)?;
            match tokio::fs::remove_file(&previous_path).await {
                Ok(()) => debug!(file = previous, "Removed superseded transcript"),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(io_error(&previous_path, err)),
            }
        }

        let path = folder.join(&filename);
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| io_error(&path, e))?;

        info!(user_folder, file = %filename, "Saved transcript");
        Ok(filename)
    }

    async fn list(&self, user_folder: &str) -> Result<Vec<String>, TranscriptError> {
        let folder = self.folder(user_folder)?;
        let mut entries = match tokio::fs::read_dir(&folder).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(&folder, err)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&folder, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && codec::validate_filename(name).is_ok()
            {
                files.push(name.to_string());
            }
        }

        codec::sort_newest_first(&mut files);
        Ok(files)
    }

    async fn load(
        &self,
        user_folder: &str,
        filename: &str,
    ) -> Result<LoadedTranscript, TranscriptError> {
        let path = self.file(user_folder, filename)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(TranscriptError::NotFound(filename.to_string()));
            }
            Err(err) => return Err(io_error(&path, err)),
        };
        codec::decode(filename, &bytes)
    }

    async fn delete(
        &self,
        user_folder: &str,
        filename: &str,
    ) -> Result<DeleteOutcome, TranscriptError> {
        let path = self.file(user_folder, filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyDeleted),
            Err(err) => Err(io_error(&path, err)),
        }
    }
}
