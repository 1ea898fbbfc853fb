//! # Key Indexer
//!
//! Builds a key → record lookup over one document.
//!
//! Records are visited in document order. A record is *selected* when it has
//! a key and the key passes the [`KeyFilter`]. When several selected records
//! share a key, the first one in document order is indexed and the later
//! ones are only counted as duplicates.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::document::{Document, Node};
use crate::matcher::{KeyFilter, KeySet};

/// Key → first record with that key.
#[derive(Debug, Default)]
pub struct KeyIndex {
    entries: HashMap<String, Node>,
    order: Vec<String>,
    selected: usize,
    duplicates: usize,
}

impl KeyIndex {
    /// Index the `tag` records of `doc` whose key passes `filter`.
    pub fn build(doc: &Document, tag: &str, filter: &KeyFilter) -> Self {
        let mut index = Self::default();

        for record in doc.records(tag) {
            let Some(key) = doc.key(record) else {
                continue;
            };
            if !filter.matches(key) {
                continue;
            }
            index.selected += 1;

            match index.entries.entry(key.to_string()) {
                Entry::Vacant(slot) => {
                    index.order.push(key.to_string());
                    slot.insert(record);
                }
                Entry::Occupied(_) => {
                    index.duplicates += 1;
                    log::debug!("Duplicate key '{}' ignored, keeping first occurrence", key);
                }
            }
        }

        log::debug!(
            "Indexed {} <{}> records ({} selected, {} duplicates)",
            index.entries.len(),
            tag,
            index.selected,
            index.duplicates
        );
        index
    }

    /// Every key of the `tag` records of `doc`, unfiltered.
    pub fn keys(doc: &Document, tag: &str) -> KeySet {
        doc.records(tag)
            .into_iter()
            .filter_map(|record| doc.key(record))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<Node> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Indexed entries in the document order of their first occurrence.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Node)> + '_ {
        self.order
            .iter()
            .map(move |key| (key.as_str(), self.entries[key]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records that passed the filter, duplicates included.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Number of selected records shadowed by an earlier record with the same key.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
