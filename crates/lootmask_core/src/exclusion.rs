//! Layers that never produce a mask.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Layer names excluded from output unless reconfigured.
pub const DEFAULT_EXCLUDED_LAYERS: [&str; 11] = [
    "keyPoint-Churches",
    "usgFlg_Paint-Contamination",
    "usgFlg_Paint-Historical",
    "usgFlg_Paint-Lunapark",
    "valueFlg_Tier1",
    "valueFlg_Tier2",
    "valueFlg_Tier3",
    "valueFlg_Tier4",
    "valueFlg_Unique",
    "water-fresh",
    "water-sea",
];

/// Exact-name denylist of layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionList {
    names: BTreeSet<String>,
}

impl ExclusionList {
    /// Build a list from layer names.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A list that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Check if a layer is excluded. Case-sensitive.
    #[must_use]
    pub fn contains(&self, layer: &str) -> bool {
        self.names.contains(layer)
    }

    /// Number of excluded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_LAYERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_has_eleven_layers() {
        let list = ExclusionList::default();
        assert_eq!(list.len(), 11);
        assert!(list.contains("keyPoint-Churches"));
        assert!(list.contains("water-sea"));
        assert!(!list.contains("usgFlg_Military"));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let list = ExclusionList::new(["water-fresh"]);
        assert!(!list.contains("Water-Fresh"));
    }

    #[test]
    fn test_empty_list() {
        let list = ExclusionList::empty();
        assert!(list.is_empty());
        assert!(!list.contains("valueFlg_Tier1"));
    }
}
