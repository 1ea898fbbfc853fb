//! # Field Synchronizer
//!
//! Copies the value of one named field from a source document into a target
//! document, matching records by key.
//!
//! ## Process
//!
//! 1.  **Index the source**: Records of the configured tag whose key passes the
//!     pattern are indexed, first occurrence winning on duplicate keys.
//!
//! 2.  **Build the SyncMap**: Every indexed record holding the field
//!     contributes `key → text`. Records without the field are left out.
//!
//! 3.  **Apply to the target**: Every target record whose key is in the map
//!     gets the value. The first existing field with that name is overwritten;
//!     when there is none, a new field is appended as the record's last child.
//!
//! Target records whose key is not in the map are never touched. The source
//! document is only borrowed immutably.
//!
//! ```
//! use xml_keysync::document::Document;
//! use xml_keysync::sync::{synchronize, SyncOptions};
//!
//! let source = Document::parse(r#"<types><type name="A"><lifetime>3600</lifetime></type></types>"#).unwrap();
//! let mut target = Document::parse(r#"<types><type name="A"><nominal>1</nominal></type></types>"#).unwrap();
//!
//! let report = synchronize(&source, &mut target, &SyncOptions::new("lifetime")).unwrap();
//! assert_eq!((report.matched, report.changed, report.created), (1, 1, 1));
//! ```

use std::collections::BTreeMap;

use crate::document::Document;
use crate::error::Result;
use crate::index::KeyIndex;
use crate::matcher::KeyFilter;

/// Record tag used by `types.xml`.
pub const DEFAULT_RECORD_TAG: &str = "type";

/// Parameters of a synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Tag of the records to match, `type` by default
    pub record_tag: String,
    /// Name of the field to copy
    pub field: String,
    /// Restricts which source records are copied
    pub filter: KeyFilter,
}

impl SyncOptions {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            record_tag: DEFAULT_RECORD_TAG.to_string(),
            field: field.into(),
            filter: KeyFilter::all(),
        }
    }

    pub fn with_record_tag(mut self, tag: impl Into<String>) -> Self {
        self.record_tag = tag.into();
        self
    }

    pub fn with_filter(mut self, filter: KeyFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Counts produced by [`synchronize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Source records that passed the pattern, duplicates included
    pub selected: usize,
    /// Source keys that contributed a value
    pub matched: usize,
    /// Target fields written, created ones included
    pub changed: usize,
    /// Target fields that did not exist and were appended
    pub created: usize,
}

/// Key → field value, taken from the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncMap {
    values: BTreeMap<String, String>,
}

impl SyncMap {
    /// Collect the `field` values of the records in `index`.
    pub fn from_index(doc: &Document, index: &KeyIndex, field: &str) -> Self {
        let mut values = BTreeMap::new();
        for (key, record) in index.iter() {
            match doc.field(record, field) {
                Some(node) => {
                    values.insert(key.to_string(), doc.text(node));
                }
                None => log::debug!("Source '{}' has no <{}>, skipped", key, field),
            }
        }
        Self { values }
    }

    /// Index `doc` with `options` and collect the field values.
    ///
    /// Returns the map along with the number of selected source records.
    pub fn from_source(doc: &Document, options: &SyncOptions) -> (Self, usize) {
        let index = KeyIndex::build(doc, &options.record_tag, &options.filter);
        (Self::from_index(doc, &index, &options.field), index.selected())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Copy `options.field` from `source` into `target`.
pub fn synchronize(
    source: &Document,
    target: &mut Document,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let (map, selected) = SyncMap::from_source(source, options);
    log::info!(
        "Found {} items with '{}' element in source",
        map.len(),
        options.field
    );

    let mut report = apply(&map, target, &options.record_tag, &options.field)?;
    report.selected = selected;
    Ok(report)
}

/// Write the values of `map` into the matching `tag` records of `target`.
///
/// `selected` is left at zero; only [`synchronize`] knows it.
pub fn apply(map: &SyncMap, target: &mut Document, tag: &str, field: &str) -> Result<SyncReport> {
    let mut report = SyncReport {
        matched: map.len(),
        ..SyncReport::default()
    };
    if map.is_empty() {
        log::warn!("No matching items found for element '{}'", field);
        return Ok(report);
    }

    for record in target.records(tag) {
        let Some(value) = target.key(record).and_then(|key| map.get(key)) else {
            continue;
        };

        match target.field(record, field) {
            Some(existing) => target.set_text(existing, value)?,
            None => {
                target.append_field(record, field, value)?;
                report.created += 1;
            }
        }
        report.changed += 1;
    }

    log::info!(
        "Updated {} items in target ({} created)",
        report.changed,
        report.created
    );
    Ok(report)
}
