//! Durable transcript storage.
//!
//! A single JSON file holds the serialized message sequence inside a
//! schema-versioned envelope, written atomically after every change.
//! The transient flags of the in-memory state are never persisted.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::message::Message;

/// Current schema version for transcript persistence.
const CURRENT_SCHEMA_VERSION: u32 = 1;

/// File name of the persisted transcript inside the data directory.
const TRANSCRIPT_FILE: &str = "transcript.json";

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk format with schema versioning.
#[derive(Debug, Serialize, Deserialize)]
struct TranscriptFile {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    messages: Vec<Message>,
}

/// Manages the persisted transcript.
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Create a store rooted at the given data directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(TRANSCRIPT_FILE),
        })
    }

    /// Path of the persisted transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted message sequence.
    ///
    /// `Ok(None)` means no usable transcript exists and the caller
    /// should start a first visit. A file that cannot be parsed, or
    /// that carries a newer schema version than this build supports, is
    /// logged and treated as absent; it is only overwritten on the next
    /// persist.
    pub fn load(&self) -> Result<Option<Vec<Message>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<TranscriptFile>(&content) {
            Ok(file) if file.schema_version <= CURRENT_SCHEMA_VERSION => {
                if file.messages.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(file.messages))
                }
            }
            Ok(file) => {
                warn!(
                    path = %self.path.display(),
                    schema_version = file.schema_version,
                    "Transcript written by a newer version; starting fresh"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Skipping corrupted transcript"
                );
                Ok(None)
            }
        }
    }

    /// Persist the full message sequence with atomic write pattern.
    ///
    /// An empty sequence is never written; the previous file, if any,
    /// is left untouched.
    pub fn persist(&self, messages: &[Message]) -> Result<(), StoreError> {
        if messages.is_empty() {
            return Ok(());
        }

        let file = TranscriptFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            messages: messages.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        atomic_write(&self.path, json.as_bytes())?;
        Ok(())
    }

    /// Delete the persisted transcript, if present.
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Write content atomically using temp file + fsync + rename.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Generate unique temp filename using timestamp and process ID
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let pid = std::process::id();

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    let tmp_name = format!("{file_name}.{timestamp}.{pid}.tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        // Best-effort cleanup
        let _ = fs::remove_file(&tmp_path);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{welcome_message, Message};
    use tempfile::TempDir;

    fn setup_test_store() -> (TempDir, TranscriptStore) {
        let temp = TempDir::new().unwrap();
        let store = TranscriptStore::new(temp.path()).unwrap();
        (temp, store)
    }

    #[test]
    fn test_new_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("equiphelper");
        let _store = TranscriptStore::new(&nested).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_load_absent_is_first_visit() {
        let (_temp, store) = setup_test_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_persist_and_load_roundtrip() {
        let (_temp, store) = setup_test_store();

        let messages = vec![
            Message::user("How do I inspect my helmet for damage?"),
            Message::ai("Check the shell for cracks and the straps for fraying."),
        ];
        store.persist(&messages).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, messages);
    }

    #[test]
    fn test_persist_empty_sequence_writes_nothing() {
        let (_temp, store) = setup_test_store();
        store.persist(&[]).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_persist_empty_leaves_previous_file_untouched() {
        let (_temp, store) = setup_test_store();
        let messages = vec![welcome_message()];
        store.persist(&messages).unwrap();

        store.persist(&[]).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), messages);
    }

    #[test]
    fn test_clear_removes_file() {
        let (_temp, store) = setup_test_store();
        store.persist(&[Message::user("q")]).unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_without_file_is_ok() {
        let (_temp, store) = setup_test_store();
        store.clear().unwrap();
    }

    #[test]
    fn test_load_skips_corrupted_file() {
        let (_temp, store) = setup_test_store();
        fs::write(store.path(), "not valid json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_load_skips_future_schema() {
        let (_temp, store) = setup_test_store();
        fs::write(
            store.path(),
            r#"{"schema_version": 999, "saved_at": "2025-01-01T00:00:00Z", "messages": [{"text":"q","type":"user"}]}"#,
        )
        .unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_file_not_destroyed_at_load_time() {
        let (_temp, store) = setup_test_store();
        fs::write(store.path(), "garbage").unwrap();
        let _ = store.load().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "garbage");
    }

    #[test]
    fn test_serialized_format_has_envelope() {
        let (_temp, store) = setup_test_store();
        store.persist(&[Message::user("q")]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["schema_version"], 1);
        assert_eq!(raw["messages"][0]["type"], "user");
        assert!(raw["saved_at"].is_string());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let (temp, store) = setup_test_store();
        store.persist(&[Message::user("q")]).unwrap();

        for entry in fs::read_dir(temp.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "Found temp file: {name}");
        }
    }
}
