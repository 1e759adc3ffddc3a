use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::history::History;

/// Key the history list is stored under.
pub const STORAGE_KEY: &str = "waktuMainHistory";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    JsonDecode(serde_json::Error),
    JsonEncode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::JsonDecode(err) => write!(f, "failed to parse history: {err}"),
            StorageError::JsonEncode(err) => write!(f, "failed to encode history: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

pub fn history_file_name() -> String {
    format!("{STORAGE_KEY}.json")
}

pub fn load_history(path: &Path) -> Result<History, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(History::new()),
        Err(err) => return Err(StorageError::Io(err)),
    };

    if raw.trim().is_empty() {
        return Ok(History::new());
    }

    let history: History = serde_json::from_str(&raw).map_err(StorageError::JsonDecode)?;
    info!(path = %path.display(), entries = history.len(), "loaded history");
    Ok(history)
}

pub fn save_history(path: &Path, history: &History) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    let encoded = serde_json::to_string_pretty(history).map_err(StorageError::JsonEncode)?;
    fs::write(path, encoded).map_err(StorageError::Io)?;
    info!(path = %path.display(), entries = history.len(), "saved history");
    Ok(())
}
