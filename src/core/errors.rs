use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuspendError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(Box<rusqlite::Error>),

    #[error("Anki database is locked")]
    DatabaseLocked,

    #[error("Anki database not found at {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("Kanji list not found at {}", .0.display())]
    KanjiListNotFound(PathBuf),

    #[error("Note type {0} not found")]
    ModelNotFound(String),

    #[error("Could not find field {field} on note type {model}")]
    FieldNotFound { model: String, field: String },

    #[error("Malformed note type metadata: {0}")]
    MalformedModels(String),
}

impl From<std::io::Error> for SuspendError {
    fn from(error: std::io::Error) -> Self {
        SuspendError::Io(Box::new(error))
    }
}

// Busy and locked both mean another process holds the collection.
impl From<rusqlite::Error> for SuspendError {
    fn from(error: rusqlite::Error) -> Self {
        match error.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                SuspendError::DatabaseLocked
            }
            _ => SuspendError::Sqlite(Box::new(error)),
        }
    }
}
