//! Key matching: glob patterns and set membership

use std::collections::HashSet;

use glob::{MatchOptions, Pattern};

use crate::error::Result;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A shell-glob pattern over record keys (`*`, `?`, `[...]`, `[!...]`).
///
/// Matching is case-sensitive and always covers the whole key.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    pattern: Pattern,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
        })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.pattern.matches_with(key, MATCH_OPTIONS)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// An optional pattern. An absent pattern selects every key.
#[derive(Debug, Clone, Default)]
pub struct KeyFilter(Option<KeyPattern>);

impl KeyFilter {
    /// A filter that selects everything.
    pub fn all() -> Self {
        Self(None)
    }

    pub fn new(pattern: Option<&str>) -> Result<Self> {
        pattern.map(KeyPattern::new).transpose().map(Self)
    }

    pub fn matches(&self, key: &str) -> bool {
        self.0.as_ref().map_or(true, |p| p.matches(key))
    }

    pub fn pattern(&self) -> Option<&KeyPattern> {
        self.0.as_ref()
    }
}

impl From<KeyPattern> for KeyFilter {
    fn from(pattern: KeyPattern) -> Self {
        Self(Some(pattern))
    }
}

/// Set of keys for membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet(HashSet<String>);

impl KeySet {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_wildcard() {
        let p = KeyPattern::new("Zmbf*").unwrap();
        assert!(p.matches("ZmbfSkull"));
        assert!(p.matches("Zmbf"));
        assert!(!p.matches("Other"));
    }

    #[test]
    fn test_no_substring_fallback() {
        let p = KeyPattern::new("Skull").unwrap();
        assert!(p.matches("Skull"));
        assert!(!p.matches("ZmbfSkull"));
    }

    #[test]
    fn test_case_sensitive() {
        let p = KeyPattern::new("zmbf*").unwrap();
        assert!(!p.matches("ZmbfSkull"));
    }

    #[test]
    fn test_question_mark_and_classes() {
        let p = KeyPattern::new("Ammo_?mm").unwrap();
        assert!(p.matches("Ammo_9mm"));
        assert!(!p.matches("Ammo_45mm"));

        let p = KeyPattern::new("Mag_[AB]*").unwrap();
        assert!(p.matches("Mag_AKM"));
        assert!(p.matches("Mag_B9"));
        assert!(!p.matches("Mag_CZ"));

        let p = KeyPattern::new("Mag_[!AB]*").unwrap();
        assert!(p.matches("Mag_CZ"));
        assert!(!p.matches("Mag_AKM"));
    }

    #[test]
    fn test_star_crosses_separators() {
        let p = KeyPattern::new("a*z").unwrap();
        assert!(p.matches("a/b.z"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(KeyPattern::new("Mag_[AB").is_err());
        assert!(KeyFilter::new(Some("Mag_[AB")).is_err());
    }

    #[test]
    fn test_absent_filter_matches_all() {
        let filter = KeyFilter::new(None).unwrap();
        assert!(filter.matches("anything"));
        assert!(filter.matches(""));
        assert!(filter.pattern().is_none());
        assert!(KeyFilter::all().matches("x"));
    }

    #[test]
    fn test_present_filter() {
        let filter = KeyFilter::new(Some("Zmbf*")).unwrap();
        assert!(filter.matches("ZmbfBone"));
        assert!(!filter.matches("Other"));
        assert_eq!(filter.pattern().map(KeyPattern::as_str), Some("Zmbf*"));
    }

    #[test]
    fn test_key_set() {
        let set: KeySet = ["G1", "G2"].into_iter().collect();
        assert!(set.contains("G1"));
        assert!(!set.contains("G3"));
        assert_eq!(set.len(), 2);
        assert!(KeySet::default().is_empty());
    }
}
