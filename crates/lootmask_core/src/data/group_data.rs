//! Prototype group profiles and the case-insensitive group table.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Loot-spawn profile of one prototype group.
///
/// # Example
///
/// A barn prototype tagged `Farm` / `Tier1` with two loot points:
///
/// ```
/// use lootmask_core::data::GroupProfile;
/// use lootmask_core::math::Vec2;
///
/// let barn = GroupProfile::new()
///     .with_usage("Farm")
///     .with_value("Tier1")
///     .with_point(Vec2::new(1.5, -2.0))
///     .with_point(Vec2::new(-3.0, 4.25));
/// assert_eq!(barn.tags().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupProfile {
    /// Usage tags.
    #[serde(default)]
    pub usages: BTreeSet<String>,
    /// Value tags.
    #[serde(default)]
    pub values: BTreeSet<String>,
    /// Local-space loot-point offsets, in document order.
    #[serde(default)]
    pub points: Vec<Vec2>,
}

impl GroupProfile {
    /// Create an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a usage tag.
    pub fn with_usage(mut self, tag: impl Into<String>) -> Self {
        self.usages.insert(tag.into());
        self
    }

    /// Add a value tag.
    pub fn with_value(mut self, tag: impl Into<String>) -> Self {
        self.values.insert(tag.into());
        self
    }

    /// Append a loot-point offset.
    pub fn with_point(mut self, offset: Vec2) -> Self {
        self.points.push(offset);
        self
    }

    /// Candidate tags: the union of usages and values.
    ///
    /// A name declared both as usage and as value is yielded once.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.usages.union(&self.values).map(String::as_str)
    }
}

/// All prototype profiles, keyed by canonical group name.
///
/// Lookups are case-insensitive: the lowercase index is built as profiles
/// are inserted, so when two names differ only by case the one inserted
/// last answers lookups for both spellings.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    profiles: BTreeMap<String, GroupProfile>,
    index: HashMap<String, String>,
}

impl GroupTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile under its canonical name.
    ///
    /// Returns the previous profile stored under exactly this name.
    pub fn insert(&mut self, name: impl Into<String>, profile: GroupProfile) -> Option<GroupProfile> {
        let name = name.into();
        self.index.insert(normalize(&name), name.clone());
        self.profiles.insert(name, profile)
    }

    /// Resolve a group name to its canonical name, ignoring case.
    #[must_use]
    pub fn canonical_name(&self, group: &str) -> Option<&str> {
        self.index.get(&normalize(group)).map(String::as_str)
    }

    /// Look up a profile, ignoring case.
    #[must_use]
    pub fn resolve(&self, group: &str) -> Option<&GroupProfile> {
        self.canonical_name(group)
            .and_then(|name| self.profiles.get(name))
    }

    /// Look up a profile by its exact canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GroupProfile> {
        self.profiles.get(name)
    }

    /// Iterate over `(canonical name, profile)` pairs in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupProfile)> {
        self.profiles.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    /// Number of distinct canonical names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<(String, GroupProfile)> for GroupTable {
    fn from_iter<I: IntoIterator<Item = (String, GroupProfile)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, profile) in iter {
            table.insert(name, profile);
        }
        table
    }
}

/// Lookup key for a group name.
fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_case() {
        let mut table = GroupTable::new();
        table.insert("Land_Barn_Brick1", GroupProfile::new().with_usage("Farm"));

        assert_eq!(table.canonical_name("land_barn_brick1"), Some("Land_Barn_Brick1"));
        assert_eq!(table.canonical_name("LAND_BARN_BRICK1"), Some("Land_Barn_Brick1"));
        assert!(table.resolve("Land_barn_Brick1").is_some());
        assert!(table.resolve("Land_Barn_Brick2").is_none());
    }

    #[test]
    fn test_last_case_variant_wins_index() {
        let mut table = GroupTable::new();
        table.insert("Land_Shed", GroupProfile::new().with_usage("Farm"));
        table.insert("LAND_SHED", GroupProfile::new().with_usage("Industrial"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.canonical_name("land_shed"), Some("LAND_SHED"));
        let profile = table.resolve("Land_Shed").unwrap();
        assert!(profile.usages.contains("Industrial"));
    }

    #[test]
    fn test_tags_union_deduplicates() {
        let profile = GroupProfile::new()
            .with_usage("Town")
            .with_usage("Unique")
            .with_value("Unique")
            .with_value("Tier2");

        let tags: Vec<&str> = profile.tags().collect();
        assert_eq!(tags, vec!["Tier2", "Town", "Unique"]);
    }

    #[test]
    fn test_from_iterator() {
        let table: GroupTable = vec![
            ("A".to_string(), GroupProfile::new()),
            ("B".to_string(), GroupProfile::new()),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
