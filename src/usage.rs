//! # Attribute Updater
//!
//! Sets an attribute of a nested element on every target record that is a
//! member of a second document, the group-membership variant of
//! synchronization.
//!
//! The typical use rewrites the usage of the map groups listed in
//! `mapgrouppos.xml` inside `mapgroupproto.xml`:
//!
//! ```text
//! <group name="Land_Barn">          <group name="Land_Barn">
//!     <usage name="Farm"/>    ==>       <usage name="Loot"/>
//!     ...                               ...
//! ```
//!
//! Unlike [`crate::sync`], nothing is copied from the membership document:
//! only the presence of a key matters. The nested element is never created;
//! a member group without one is skipped and left exactly as it was.

use crate::document::Document;
use crate::error::Result;
use crate::index::KeyIndex;

pub const DEFAULT_GROUP_TAG: &str = "group";
pub const DEFAULT_USAGE_ELEMENT: &str = "usage";
pub const DEFAULT_USAGE_ATTRIBUTE: &str = "name";

/// Which attribute to set, and to what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUpdate {
    /// Tag of the records in both documents, `group` by default
    pub record_tag: String,
    /// Nested element holding the attribute, `usage` by default
    pub element: String,
    /// Attribute to set, `name` by default
    pub attribute: String,
    /// New attribute value
    pub value: String,
}

impl AttributeUpdate {
    /// Set `<usage name="...">` on `<group>` records.
    pub fn usage(value: impl Into<String>) -> Self {
        Self {
            record_tag: DEFAULT_GROUP_TAG.to_string(),
            element: DEFAULT_USAGE_ELEMENT.to_string(),
            attribute: DEFAULT_USAGE_ATTRIBUTE.to_string(),
            value: value.into(),
        }
    }
}

/// Counts produced by [`update_attribute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Distinct keys in the membership document
    pub members: usize,
    /// Target records whose attribute was set
    pub updated: usize,
    /// Member target records without the nested element
    pub skipped: usize,
    /// Target records that are not members
    pub unmatched: usize,
}

/// Set `update.attribute` on the first `update.element` child of every
/// `target` record whose key appears in `membership`.
pub fn update_attribute(
    membership: &Document,
    target: &mut Document,
    update: &AttributeUpdate,
) -> Result<UpdateReport> {
    let members = KeyIndex::keys(membership, &update.record_tag);
    let mut report = UpdateReport {
        members: members.len(),
        ..UpdateReport::default()
    };
    log::info!(
        "Found {} <{}> keys in membership document",
        members.len(),
        update.record_tag
    );

    for record in target.records(&update.record_tag) {
        let Some(key) = target.key(record) else {
            continue;
        };
        if !members.contains(key) {
            report.unmatched += 1;
            continue;
        }

        match target.field(record, &update.element) {
            Some(nested) => {
                target.set_attribute(nested, &update.attribute, &update.value);
                report.updated += 1;
            }
            None => {
                log::debug!("'{}' has no <{}>, skipped", key, update.element);
                report.skipped += 1;
            }
        }
    }

    log::info!(
        "Set {}=\"{}\" on {} <{}> elements ({} skipped)",
        update.attribute,
        update.value,
        report.updated,
        update.element,
        report.skipped
    );
    Ok(report)
}
