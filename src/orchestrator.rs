//! Orchestrator for complete synchronization runs
//!
//! Ties the pure algorithms in [`crate::sync`] and [`crate::usage`] to the
//! filesystem. Every run follows the same steps:
//!
//! 1. Load both documents. A missing or malformed file stops the run here,
//!    before anything is mutated.
//! 2. Apply the algorithm to the in-memory target.
//! 3. Unless this is a dry run or nothing changed, back up the target and
//!    atomically replace it with the mutated document.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::Result;
use crate::sync::{synchronize, SyncOptions, SyncReport};
use crate::usage::{update_attribute, AttributeUpdate, UpdateReport};
use crate::writer::{backup_file, write_document};

/// What to do with the mutated target.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Compute the counts but leave the target file alone
    pub dry_run: bool,
    /// Copy the target aside before replacing it
    pub backup: bool,
    /// Where backups go; next to the target when `None`
    pub backup_dir: Option<PathBuf>,
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<R> {
    pub report: R,
    /// Backup taken before the write, if any
    pub backup: Option<PathBuf>,
    /// Whether the target file was replaced
    pub written: bool,
}

/// Copy a field from the source file into the target file.
pub fn copy_values(
    source: &Path,
    target: &Path,
    options: &SyncOptions,
    output: &OutputOptions,
) -> Result<Outcome<SyncReport>> {
    let source_doc = Document::load(source)?;
    let mut target_doc = Document::load(target)?;

    let report = synchronize(&source_doc, &mut target_doc, options)?;
    finish(&target_doc, target, report, report.changed > 0, output)
}

/// Rewrite a nested attribute on the target groups listed in the membership file.
pub fn replace_usage(
    membership: &Path,
    target: &Path,
    update: &AttributeUpdate,
    output: &OutputOptions,
) -> Result<Outcome<UpdateReport>> {
    let membership_doc = Document::load(membership)?;
    let mut target_doc = Document::load(target)?;

    let report = update_attribute(&membership_doc, &mut target_doc, update)?;
    finish(&target_doc, target, report, report.updated > 0, output)
}

fn finish<R>(
    doc: &Document,
    path: &Path,
    report: R,
    changed: bool,
    output: &OutputOptions,
) -> Result<Outcome<R>> {
    if output.dry_run || !changed {
        if !changed {
            log::info!("No changes, {} left as is", path.display());
        }
        return Ok(Outcome {
            report,
            backup: None,
            written: false,
        });
    }

    let backup = if output.backup {
        Some(backup_file(path, output.backup_dir.as_deref())?)
    } else {
        None
    };
    write_document(doc, path)?;

    Ok(Outcome {
        report,
        backup,
        written: true,
    })
}
