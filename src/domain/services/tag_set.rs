//! Tag name normalization and comparison.

use std::collections::HashSet;

/// Longest tag name accepted, in characters.
pub const MAX_TAG_LENGTH: usize = 64;

/// Domain service for turning client-supplied tag names into stored ones.
pub struct TagSet;

impl TagSet {
    /// Normalize raw tag names: trim, uppercase, drop blanks and duplicates.
    ///
    /// The first occurrence of each name keeps its position.
    pub fn normalize<I, S>(raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        raw.into_iter()
            .map(|name| name.as_ref().trim().to_uppercase())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Set equality of stored tag names against raw incoming names.
    ///
    /// Order, duplicates and case of `incoming` are ignored.
    pub fn is_same<S: AsRef<str>>(current: &[String], incoming: &[S]) -> bool {
        let current: HashSet<String> = Self::normalize(current).into_iter().collect();
        let incoming: HashSet<String> = Self::normalize(incoming).into_iter().collect();
        current == incoming
    }

    /// First name longer than [`MAX_TAG_LENGTH`], if any.
    pub fn find_too_long(names: &[String]) -> Option<&str> {
        names
            .iter()
            .find(|name| name.chars().count() > MAX_TAG_LENGTH)
            .map(String::as_str)
    }
}
