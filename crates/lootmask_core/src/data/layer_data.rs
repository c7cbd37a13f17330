//! Layer definitions from the map configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Projection;

/// Attributes of one output layer.
///
/// The values are carried through from the configuration document; the
/// core only cares that the layer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDef {
    /// Display color as written in the configuration.
    pub color: i64,
    /// Usage flag bitmask.
    pub usage_flags: i64,
    /// Value flag bitmask.
    pub value_flags: i64,
}

/// Map configuration: raster geometry plus the full set of layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Edge length of the square world in world units.
    pub world_size: u32,
    /// Edge length of every output mask in pixels.
    pub layer_size: u32,
    /// Usage tags declared by the configuration.
    #[serde(default)]
    pub usages: Vec<String>,
    /// Value tags declared by the configuration.
    #[serde(default)]
    pub values: Vec<String>,
    /// Layer definitions keyed by layer name.
    pub layers: BTreeMap<String, LayerDef>,
}

impl LayerConfig {
    /// Create a configuration with no layers.
    #[must_use]
    pub fn new(world_size: u32, layer_size: u32) -> Self {
        Self {
            world_size,
            layer_size,
            ..Default::default()
        }
    }

    /// Add a layer, returning the previous definition if the name was taken.
    pub fn insert_layer(&mut self, name: impl Into<String>, def: LayerDef) -> Option<LayerDef> {
        self.layers.insert(name.into(), def)
    }

    /// Check if a layer with this exact name exists.
    #[must_use]
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// All layer names, in lexical order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Check if a tag is declared as a usage or value.
    #[must_use]
    pub fn declares_tag(&self, tag: &str) -> bool {
        self.usages.iter().chain(&self.values).any(|t| t == tag)
    }

    /// Projection from world space onto this configuration's rasters.
    ///
    /// # Errors
    ///
    /// Returns an error if either size is zero.
    pub fn projection(&self) -> Result<Projection> {
        Projection::new(self.world_size, self.layer_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaskError;

    #[test]
    fn test_insert_layer_replaces_duplicate() {
        let mut config = LayerConfig::new(12800, 4096);
        assert!(config.insert_layer("usgFlg_Military", LayerDef::default()).is_none());
        let replaced = config.insert_layer(
            "usgFlg_Military",
            LayerDef {
                color: 7,
                ..Default::default()
            },
        );
        assert_eq!(replaced, Some(LayerDef::default()));
        assert_eq!(config.layers.len(), 1);
        assert_eq!(config.layers["usgFlg_Military"].color, 7);
    }

    #[test]
    fn test_declares_tag() {
        let mut config = LayerConfig::new(12800, 4096);
        config.usages.push("Military".to_string());
        config.values.push("Tier1".to_string());
        assert!(config.declares_tag("Military"));
        assert!(config.declares_tag("Tier1"));
        assert!(!config.declares_tag("military"));
    }

    #[test]
    fn test_projection_rejects_zero_layer_size() {
        let config = LayerConfig::new(12800, 0);
        assert_eq!(config.projection(), Err(MaskError::InvalidLayerSize(0)));
    }
}
