//! # Error Handling
//!
//! This module defines the centralized error type for `xml-keysync`. It uses
//! the `thiserror` library to create an `Error` enum covering every fatal
//! condition of a synchronization run.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (file
//!   path, operation, underlying message) to be printed directly to the user.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Conditions that are *not* errors never show up here: a target record with
//! no source counterpart, a source record lacking the copied field, and a
//! group without a nested usage element are all counted and skipped by the
//! algorithms themselves.
//!
//! Every variant is fatal. Nothing is retried; errors propagate to the CLI
//! layer, which exits with a non-zero status.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for xml-keysync operations
#[derive(Error, Debug)]
pub enum Error {
    /// An input file does not exist. Raised at load time, before any mutation.
    #[error("File not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// An input file is not well-formed XML, or has no root element.
    ///
    /// Raised before any mutation is attempted; nothing is written.
    #[error("Malformed XML document {}: {message}", path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<memory>".to_string()))]
    MalformedDocument {
        /// The offending file, `None` for documents parsed from a string
        path: Option<PathBuf>,
        message: String,
    },

    /// A key pattern is not a valid glob, wrapped from `glob::PatternError`.
    #[error("Invalid key pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// A structural edit on the in-memory tree was rejected.
    #[error("Document tree error: {operation} - {message}")]
    Tree { operation: String, message: String },

    /// Writing the target document failed after mutation was applied in memory.
    ///
    /// The on-disk target is left as it was: writes go through a temporary
    /// file that only replaces the target once fully written.
    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    /// Creating the pre-write backup copy failed.
    #[error("Failed to back up {}: {message}", path.display())]
    Backup { path: PathBuf, message: String },

    /// A configuration profile could not be loaded or is incomplete.
    #[error("Profile error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Profile {
        message: String,
        /// Optional hint for how to fix the profile
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn tree(operation: &str, err: impl std::fmt::Display) -> Self {
        Error::Tree {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
