//! # Serializer
//!
//! Writes a mutated document back to disk.
//!
//! ## Process
//!
//! 1.  **Serialize**: The whole tree is rendered to a string up front, so a
//!     serialization failure never touches the disk.
//!
//! 2.  **Write a temporary file**: The text goes into a temporary file created
//!     in the target's own directory, keeping the final rename on one
//!     filesystem.
//!
//! 3.  **Replace**: The temporary file is flushed to disk and renamed over the
//!     target. Readers see either the old file or the new one, never a
//!     partially written mix.
//!
//! When the target is a symbolic link, the file it points to is replaced and
//! the link itself is left in place.
//!
//! No locking is performed. Two runs writing the same target at the same time
//! is undefined: the last rename wins and the other run's changes are lost.
//!
//! [`backup_file`] copies the target aside before it is replaced.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;

use crate::document::Document;
use crate::error::{Error, Result};

const BACKUP_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Serialize `doc` and atomically replace the file at `path` with it.
pub fn write_document(doc: &Document, path: &Path) -> Result<()> {
    let text = doc.to_xml_string()?;
    write_atomic(path, text.as_bytes())?;
    log::info!("Saved updated file: {}", path.display());
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    replace_file(path, |file| file.write_all(contents))
}

/// Replace the file at `path` with whatever `write` puts into a fresh file.
///
/// If `write` fails the temporary file is removed and `path` is untouched.
fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let write_error = |e: &dyn std::fmt::Display| Error::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    // Write through symlinks to the file they point at.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_error(&e))?;
    write(tmp.as_file_mut()).map_err(|e| write_error(&e))?;
    tmp.as_file().sync_all().map_err(|e| write_error(&e))?;

    // Keep the permissions of the file being replaced.
    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(tmp.path(), metadata.permissions()).map_err(|e| write_error(&e))?;
    }

    tmp.persist(&target).map_err(|e| write_error(&e.error))?;
    Ok(())
}

/// Copy `path` to a timestamped backup and return the backup's path.
///
/// With a `backup_dir` the copy is `<dir>/<stem>_<timestamp><ext>` (the
/// directory is created when missing); without one it lands next to the
/// original as `<stem>_backup_<timestamp><ext>`.
pub fn backup_file(path: &Path, backup_dir: Option<&Path>) -> Result<PathBuf> {
    let backup_error = |message: String| Error::Backup {
        path: path.to_path_buf(),
        message,
    };

    if !path.exists() {
        return Err(Error::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| backup_error("path has no file name".to_string()))?;
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let timestamp = Local::now().format(BACKUP_TIMESTAMP);

    let backup_path = match backup_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|e| {
                backup_error(format!(
                    "Failed to create directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
            dir.join(format!("{}_{}{}", stem, timestamp, extension))
        }
        None => path.with_file_name(format!("{}_backup_{}{}", stem, timestamp, extension)),
    };

    fs::copy(path, &backup_path).map_err(|e| backup_error(e.to_string()))?;
    log::info!("Created backup: {}", backup_path.display());
    Ok(backup_path)
}
