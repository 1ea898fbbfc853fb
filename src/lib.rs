//! # XML Key Synchronization
//!
//! This library reconciles two independently maintained game-server XML
//! documents that share a logical key. It powers the `xml-keysync`
//! command-line tool but has no dependency on it.
//!
//! ## Quick Example
//!
//! ```
//! use xml_keysync::document::Document;
//! use xml_keysync::matcher::KeyFilter;
//! use xml_keysync::sync::{synchronize, SyncOptions};
//!
//! let vanilla = Document::parse(r#"
//! <types>
//!     <type name="ZmbfSkull"><lifetime>3600</lifetime></type>
//!     <type name="ZmbfBone"><lifetime>7200</lifetime></type>
//!     <type name="Apple"><lifetime>900</lifetime></type>
//! </types>"#).unwrap();
//! let mut modded = Document::parse(r#"
//! <types>
//!     <type name="ZmbfSkull"><lifetime>10</lifetime></type>
//!     <type name="Apple"><lifetime>10</lifetime></type>
//! </types>"#).unwrap();
//!
//! let options = SyncOptions::new("lifetime")
//!     .with_filter(KeyFilter::new(Some("Zmbf*")).unwrap());
//! let report = synchronize(&vanilla, &mut modded, &options).unwrap();
//!
//! assert_eq!(report.matched, 2);
//! assert_eq!(report.changed, 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Documents (`document`)**: An XML file parsed into a lossless tree. Its
//!   *records* are the root element's children of one tag (`type`, `group`),
//!   keyed by their `name` attribute.
//! - **Indexing and matching (`index`, `matcher`)**: Key lookups with
//!   first-occurrence-wins on duplicates, filtered by shell-glob patterns.
//! - **Field synchronization (`sync`)**: Copies one field's text from source
//!   records into same-keyed target records, creating the field if needed.
//! - **Attribute update (`usage`)**: Sets a nested element's attribute on
//!   target records that appear in a membership document. Never creates the
//!   nested element.
//! - **Serialization (`writer`)**: Atomic replacement of the target file,
//!   with optional timestamped backups.
//! - **Runs (`orchestrator`)**: Load, mutate, back up and write in one call.
//! - **Profiles (`config`)**: Per-server JSON settings.

pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod matcher;
pub mod orchestrator;
pub mod output;
pub mod sync;
pub mod usage;
pub mod writer;

#[cfg(test)]
mod sync_proptest;
