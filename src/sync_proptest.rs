//! Property-based tests for field synchronization.
//!
//! Documents are generated from random key → value maps and the
//! synchronizer's guarantees are checked for every generated pair.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeMap;

    use crate::document::Document;
    use crate::matcher::KeyFilter;
    use crate::sync::{synchronize, SyncMap, SyncOptions};
    use proptest::prelude::*;

    /// Records as `(key, Some(lifetime) | None)`
    fn types_xml(records: &[(String, Option<String>)]) -> String {
        let mut xml = String::from("<types>\n");
        for (key, lifetime) in records {
            xml.push_str(&format!("    <type name=\"{}\">\n        <nominal>1</nominal>\n", key));
            if let Some(lifetime) = lifetime {
                xml.push_str(&format!("        <lifetime>{}</lifetime>\n", lifetime));
            }
            xml.push_str("    </type>\n");
        }
        xml.push_str("</types>\n");
        xml
    }

    fn records() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
        prop::collection::vec(("[A-Z][a-z]{0,3}", prop::option::of("[0-9]{1,5}")), 0..12)
    }

    fn lifetimes(doc: &Document) -> Vec<(Option<String>, Option<String>)> {
        doc.records("type")
            .into_iter()
            .map(|r| {
                (
                    doc.key(r).map(str::to_string),
                    doc.field(r, "lifetime").map(|f| doc.text(f)),
                )
            })
            .collect()
    }

    proptest! {
        /// Property: running the synchronizer twice gives the same document as once
        #[test]
        fn synchronize_is_idempotent(source in records(), target in records()) {
            let source = Document::parse(&types_xml(&source)).unwrap();
            let mut target = Document::parse(&types_xml(&target)).unwrap();
            let options = SyncOptions::new("lifetime");

            synchronize(&source, &mut target, &options).unwrap();
            let once = target.to_xml_string().unwrap();
            synchronize(&source, &mut target, &options).unwrap();

            prop_assert_eq!(target.to_xml_string().unwrap(), once);
        }

        /// Property: mapped records carry the mapped value, all others are unchanged
        #[test]
        fn synchronize_writes_mapped_records_only(source in records(), target in records()) {
            let source_doc = Document::parse(&types_xml(&source)).unwrap();
            let mut target_doc = Document::parse(&types_xml(&target)).unwrap();
            let options = SyncOptions::new("lifetime");
            let (map, _) = SyncMap::from_source(&source_doc, &options);
            let before = lifetimes(&target_doc);

            let report = synchronize(&source_doc, &mut target_doc, &options).unwrap();

            let after = lifetimes(&target_doc);
            prop_assert_eq!(before.len(), after.len());
            let mut changed = 0;
            for ((key, old), (_, new)) in before.iter().zip(after.iter()) {
                match key.as_deref().and_then(|k| map.get(k)) {
                    Some(value) => {
                        changed += 1;
                        prop_assert_eq!(new.as_deref(), Some(value));
                    }
                    None => prop_assert_eq!(old, new),
                }
            }
            prop_assert_eq!(report.changed, changed);
        }

        /// Property: the map holds the first value of every source key that has one
        #[test]
        fn sync_map_first_occurrence_wins(source in records()) {
            let doc = Document::parse(&types_xml(&source)).unwrap();
            let (map, selected) = SyncMap::from_source(&doc, &SyncOptions::new("lifetime"));

            let mut expected = BTreeMap::new();
            let mut seen = std::collections::HashSet::new();
            for (key, lifetime) in &source {
                if seen.insert(key.clone()) {
                    if let Some(lifetime) = lifetime {
                        expected.insert(key.as_str(), lifetime.as_str());
                    }
                }
            }

            prop_assert_eq!(selected, source.len());
            prop_assert_eq!(map.iter().collect::<BTreeMap<_, _>>(), expected);
        }

        /// Property: a prefix pattern selects exactly the keys with that prefix
        #[test]
        fn pattern_selects_prefixed_keys(source in records(), prefix in "[A-Z]") {
            let doc = Document::parse(&types_xml(&source)).unwrap();
            let filter = KeyFilter::new(Some(&format!("{}*", prefix))).unwrap();
            let options = SyncOptions::new("lifetime").with_filter(filter);

            let (map, selected) = SyncMap::from_source(&doc, &options);

            let expected = source.iter().filter(|(k, _)| k.starts_with(&prefix)).count();
            prop_assert_eq!(selected, expected);
            prop_assert!(map.iter().all(|(k, _)| k.starts_with(&prefix)));
        }
    }
}
