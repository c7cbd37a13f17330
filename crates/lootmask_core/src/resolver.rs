//! Tag resolution: routing building loot points onto layers.
//!
//! A layer named `<prefix>-<tag>` or `<prefix>_<tag>` receives the loot
//! points of every building whose prototype carries `<tag>` as a usage or a
//! value. The special [`DEF_ALL_LAYER`] receives the points of every building
//! whose prototype could be resolved, regardless of tags.
//!
//! Resolution output covers exactly the configured layer set: layers that
//! nothing matched are present with an empty point list.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{Building, GroupProfile, GroupTable};
use crate::exclusion::ExclusionList;
use crate::math::{world_position, Vec2};

/// Aggregate layer that every matched building paints onto.
pub const DEF_ALL_LAYER: &str = "usgFlg_Def-All";

/// Delimiters that may separate a layer prefix from its tag.
const TAG_DELIMITERS: [char; 2] = ['-', '_'];

/// One loot point of one building, routed to one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootPoint {
    /// World anchor of the owning building.
    pub anchor: Vec2,
    /// Building yaw in degrees.
    pub rotation: f64,
    /// Offset in building-local space.
    pub offset: Vec2,
}

impl LootPoint {
    /// Create a loot point for `building` at a local `offset`.
    #[must_use]
    pub fn new(building: &Building, offset: Vec2) -> Self {
        Self {
            anchor: building.anchor(),
            rotation: building.rotation,
            offset,
        }
    }

    /// World position after rotating the offset by the building's yaw.
    #[must_use]
    pub fn world_position(&self) -> Vec2 {
        world_position(self.anchor, self.offset, self.rotation)
    }
}

/// Check whether `layer` is the layer for `tag`.
///
/// The layer name must end with the tag, immediately preceded by `-` or `_`.
#[must_use]
pub fn layer_matches_tag(layer: &str, tag: &str) -> bool {
    layer
        .strip_suffix(tag)
        .is_some_and(|prefix| prefix.ends_with(TAG_DELIMITERS))
}

/// The tag a layer name routes, if it has a delimiter.
///
/// This is the text after the last `-` or `_`.
#[must_use]
pub fn layer_tag(layer: &str) -> Option<&str> {
    layer
        .rfind(TAG_DELIMITERS)
        .map(|idx| &layer[idx + 1..])
}

/// Cached tag → layers lookup over a fixed layer set.
#[derive(Debug, Clone)]
pub struct TagRouter<'a> {
    layers: Vec<&'a str>,
    cache: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> TagRouter<'a> {
    /// Create a router over the given layer names.
    pub fn new(layers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            layers: layers.into_iter().collect(),
            cache: HashMap::new(),
        }
    }

    /// All layers routed by `tag`.
    pub fn layers_for(&mut self, tag: &'a str) -> &[&'a str] {
        let layers = &self.layers;
        self.cache.entry(tag).or_insert_with(|| {
            layers
                .iter()
                .copied()
                .filter(|layer| layer_matches_tag(layer, tag))
                .collect()
        })
    }
}

/// Result of resolving all buildings against a layer set.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    points: BTreeMap<String, Vec<LootPoint>>,
    building_counts: BTreeMap<String, usize>,
    unmatched: BTreeSet<String>,
}

impl Resolution {
    /// Points routed to a layer, or `None` if the layer is not configured.
    #[must_use]
    pub fn points(&self, layer: &str) -> Option<&[LootPoint]> {
        self.points.get(layer).map(Vec::as_slice)
    }

    /// Layer names, in lexical order.
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.points.len()
    }

    /// Iterate over `(layer, points)` pairs in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LootPoint])> {
        self.points
            .iter()
            .map(|(layer, points)| (layer.as_str(), points.as_slice()))
    }

    /// Number of buildings that contributed to a layer through a tag match.
    ///
    /// Contributions to [`DEF_ALL_LAYER`] through the aggregate rule are not
    /// counted here.
    #[must_use]
    pub fn building_count(&self, layer: &str) -> usize {
        self.building_counts.get(layer).copied().unwrap_or(0)
    }

    /// Per-layer building counts, for layers with at least one building.
    #[must_use]
    pub fn building_counts(&self) -> &BTreeMap<String, usize> {
        &self.building_counts
    }

    /// Distinct group names that had no matching prototype.
    #[must_use]
    pub fn unmatched(&self) -> &BTreeSet<String> {
        &self.unmatched
    }

    /// Up to `limit` unmatched group names, and whether more exist.
    #[must_use]
    pub fn unmatched_sample(&self, limit: usize) -> (Vec<&str>, bool) {
        let sample = self.unmatched.iter().take(limit).map(String::as_str).collect();
        (sample, self.unmatched.len() > limit)
    }

    /// Total points on the aggregate layer, if it is configured.
    #[must_use]
    pub fn def_all_points(&self) -> Option<usize> {
        self.points.get(DEF_ALL_LAYER).map(Vec::len)
    }

    /// Total routed points across all layers.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.points.values().map(Vec::len).sum()
    }

    /// Drop every layer on the exclusion list.
    ///
    /// Returns the names of the layers that were removed.
    pub fn remove_excluded(&mut self, excluded: &ExclusionList) -> Vec<String> {
        let removed: Vec<String> = self
            .points
            .keys()
            .filter(|layer| excluded.contains(layer))
            .cloned()
            .collect();
        for layer in &removed {
            self.points.remove(layer);
            self.building_counts.remove(layer);
        }
        removed
    }

    /// Consume the resolution into `(layer, points)` pairs.
    pub fn into_layers(self) -> impl Iterator<Item = (String, Vec<LootPoint>)> {
        self.points.into_iter()
    }
}

/// Route every building's loot points onto the layers its tags select.
///
/// Buildings whose group has no profile (case-insensitive) are recorded as
/// unmatched and contribute nothing, not even to [`DEF_ALL_LAYER`].
pub fn resolve_tags<'a>(
    buildings: &[Building],
    groups: &GroupTable,
    layer_names: impl IntoIterator<Item = &'a str>,
) -> Resolution {
    let layer_names: Vec<&str> = layer_names.into_iter().collect();
    let mut resolution = Resolution {
        points: layer_names
            .iter()
            .map(|layer| ((*layer).to_string(), Vec::new()))
            .collect(),
        ..Default::default()
    };
    let def_all = resolution.points.contains_key(DEF_ALL_LAYER);
    let mut router = TagRouter::new(layer_names.iter().copied());
    let mut matched_layers: BTreeSet<&str> = BTreeSet::new();

    for building in buildings {
        let Some(profile) = groups.resolve(&building.group) else {
            resolution.unmatched.insert(building.group.clone());
            continue;
        };
        if def_all {
            if let Some(target) = resolution.points.get_mut(DEF_ALL_LAYER) {
                target.extend(loot_points(building, profile));
            }
        }

        matched_layers.clear();
        for tag in profile.tags() {
            for &layer in router.layers_for(tag) {
                if let Some(target) = resolution.points.get_mut(layer) {
                    target.extend(loot_points(building, profile));
                }
                matched_layers.insert(layer);
            }
        }
        for layer in &matched_layers {
            *resolution
                .building_counts
                .entry((*layer).to_string())
                .or_insert(0) += 1;
        }
    }

    debug!(
        buildings = buildings.len(),
        layers = resolution.layer_count(),
        points = resolution.total_points(),
        unmatched = resolution.unmatched.len(),
        "Resolved building tags"
    );

    resolution
}

/// One loot point per profile offset, anchored on `building`.
fn loot_points<'b>(
    building: &'b Building,
    profile: &'b GroupProfile,
) -> impl Iterator<Item = LootPoint> + 'b {
    profile
        .points
        .iter()
        .map(move |&offset| LootPoint::new(building, offset))
}
