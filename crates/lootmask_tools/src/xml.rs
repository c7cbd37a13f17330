//! Readers for the three XML input documents.
//!
//! Each document is deserialized with quick-xml into a private mirror of its
//! element structure, then normalized into `lootmask_core` records.
//! Normalization is where malformed records are dropped: a placement without
//! a usable position or yaw, or a loot point whose `pos` is not three
//! numbers, is skipped rather than failing the run.

use std::fs;
use std::path::Path;

use lootmask_core::data::{Building, GroupProfile, GroupTable, LayerConfig, LayerDef};
use lootmask_core::math::Vec2;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ToolError};

// ==========================================================================
// Document mirrors
// ==========================================================================

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    global: GlobalNode,
    #[serde(default)]
    areas: AreasNode,
    #[serde(default)]
    layers: LayersNode,
}

#[derive(Debug, Deserialize)]
struct GlobalNode {
    world: SizeNode,
    layer: SizeNode,
}

#[derive(Debug, Deserialize)]
struct SizeNode {
    #[serde(rename = "@size")]
    size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct AreasNode {
    #[serde(default)]
    usages: UsagesNode,
    #[serde(default)]
    values: ValuesNode,
}

#[derive(Debug, Default, Deserialize)]
struct UsagesNode {
    #[serde(rename = "usage", default)]
    entries: Vec<NamedNode>,
}

#[derive(Debug, Default, Deserialize)]
struct ValuesNode {
    #[serde(rename = "value", default)]
    entries: Vec<NamedNode>,
}

#[derive(Debug, Deserialize)]
struct NamedNode {
    #[serde(rename = "@name", default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LayersNode {
    #[serde(rename = "layer", default)]
    entries: Vec<LayerNode>,
}

#[derive(Debug, Deserialize)]
struct LayerNode {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@color")]
    color: i64,
    #[serde(rename = "@usage_flags")]
    usage_flags: i64,
    #[serde(rename = "@value_flags")]
    value_flags: i64,
}

#[derive(Debug, Deserialize)]
struct PrototypeDocument {
    #[serde(rename = "group", default)]
    groups: Vec<PrototypeGroupNode>,
}

#[derive(Debug, Deserialize)]
struct PrototypeGroupNode {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "usage", default)]
    usages: Vec<NamedNode>,
    #[serde(rename = "value", default)]
    values: Vec<NamedNode>,
    #[serde(rename = "container", default)]
    containers: Vec<ContainerNode>,
}

#[derive(Debug, Deserialize)]
struct ContainerNode {
    #[serde(rename = "point", default)]
    points: Vec<PointNode>,
}

#[derive(Debug, Deserialize)]
struct PointNode {
    #[serde(rename = "@pos", default)]
    pos: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlacementDocument {
    #[serde(rename = "group", default)]
    groups: Vec<PlacementNode>,
}

#[derive(Debug, Deserialize)]
struct PlacementNode {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@pos", default)]
    pos: Option<String>,
    #[serde(rename = "@a", default)]
    angle: Option<String>,
}

// ==========================================================================
// Normalized results
// ==========================================================================

/// Buildings read from a placement document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placements {
    /// Well-formed building records, in document order.
    pub buildings: Vec<Building>,
    /// Records dropped for a missing name, position or yaw.
    pub dropped: usize,
}

/// Parse a `"x y z"` position, keeping the horizontal axes.
///
/// Exactly three whitespace-separated fields are required; the vertical
/// (middle) field is not interpreted. `nan` and `inf` are rejected.
#[must_use]
pub fn parse_position(pos: &str) -> Option<Vec2> {
    let parts: Vec<&str> = pos.split_whitespace().collect();
    let [x, _, z] = parts.as_slice() else {
        return None;
    };
    Some(Vec2::new(parse_finite(x)?, parse_finite(z)?))
}

fn parse_finite(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ==========================================================================
// Readers
// ==========================================================================

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ToolError::io(path, e))
}

fn xml_error(path: &Path) -> impl FnOnce(quick_xml::DeError) -> ToolError + '_ {
    move |source| ToolError::Xml {
        path: path.display().to_string(),
        source,
    }
}

/// Read the map configuration document.
pub fn read_layer_config(path: &Path) -> Result<LayerConfig> {
    parse_layer_config(&read_document(path)?).map_err(xml_error(path))
}

/// Parse map configuration XML.
///
/// A layer name that appears twice keeps its last definition.
pub fn parse_layer_config(xml: &str) -> std::result::Result<LayerConfig, quick_xml::DeError> {
    let doc: ConfigDocument = quick_xml::de::from_str(xml)?;

    let mut config = LayerConfig::new(doc.global.world.size, doc.global.layer.size);
    config.usages = named(doc.areas.usages.entries).collect();
    config.values = named(doc.areas.values.entries).collect();

    for layer in doc.layers.entries {
        let def = LayerDef {
            color: layer.color,
            usage_flags: layer.usage_flags,
            value_flags: layer.value_flags,
        };
        if config.insert_layer(layer.name.clone(), def).is_some() {
            warn!("Duplicate layer '{}' in config, keeping the last one", layer.name);
        }
    }

    Ok(config)
}

/// Read the prototype group document.
pub fn read_group_table(path: &Path) -> Result<GroupTable> {
    parse_group_table(&read_document(path)?).map_err(xml_error(path))
}

/// Parse prototype group XML.
///
/// Loot points are collected across all containers of a group in document
/// order. Groups without a name and points without a usable `pos` are
/// skipped.
pub fn parse_group_table(xml: &str) -> std::result::Result<GroupTable, quick_xml::DeError> {
    let doc: PrototypeDocument = quick_xml::de::from_str(xml)?;

    let mut table = GroupTable::new();
    let mut skipped_points = 0usize;

    for group in doc.groups {
        let Some(name) = group.name else {
            debug!("Skipping prototype group without a name");
            continue;
        };

        let mut profile = GroupProfile {
            usages: named(group.usages).collect(),
            values: named(group.values).collect(),
            points: Vec::new(),
        };
        for point in group.containers.into_iter().flat_map(|c| c.points) {
            match point.pos.as_deref().and_then(parse_position) {
                Some(offset) => profile.points.push(offset),
                None => skipped_points += 1,
            }
        }

        if table.insert(name.clone(), profile).is_some() {
            warn!("Duplicate prototype group '{name}', keeping the last one");
        }
    }

    if skipped_points > 0 {
        debug!("Skipped {skipped_points} malformed loot points");
    }

    Ok(table)
}

/// Read the building placement document.
pub fn read_placements(path: &Path) -> Result<Placements> {
    parse_placements(&read_document(path)?).map_err(xml_error(path))
}

/// Parse building placement XML.
///
/// Records lacking a name, a three-field `pos` or a numeric `a` are dropped,
/// as are records with a non-finite coordinate or yaw.
pub fn parse_placements(xml: &str) -> std::result::Result<Placements, quick_xml::DeError> {
    let doc: PlacementDocument = quick_xml::de::from_str(xml)?;

    let mut placements = Placements::default();
    for node in doc.groups {
        match normalize_placement(node) {
            Some(building) => placements.buildings.push(building),
            None => placements.dropped += 1,
        }
    }

    if placements.dropped > 0 {
        debug!("Dropped {} malformed placement records", placements.dropped);
    }

    Ok(placements)
}

fn normalize_placement(node: PlacementNode) -> Option<Building> {
    let position = parse_position(node.pos.as_deref()?)?;
    let rotation = parse_finite(node.angle.as_deref()?)?;
    let group = node.name?;
    Some(Building::new(group, position.x, position.z, rotation))
}

/// Non-empty names of a tag list.
fn named(nodes: Vec<NamedNode>) -> impl Iterator<Item = String> {
    nodes
        .into_iter()
        .filter_map(|node| node.name)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootmask_core::resolver::DEF_ALL_LAYER;
    use lootmask_test_utils::fixtures::{CONFIG_XML, GROUPPOS_XML, PROTO_XML};

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1.5 2 -3.25"), Some(Vec2::new(1.5, -3.25)));
        assert_eq!(parse_position("  10\t0  20 "), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(parse_position("1 2"), None);
        assert_eq!(parse_position("1 2 3 4"), None);
        assert_eq!(parse_position("a 2 3"), None);
        assert_eq!(parse_position(""), None);
        assert_eq!(parse_position("nan 0 500"), None);
        assert_eq!(parse_position("100 0 -inf"), None);
        assert_eq!(parse_position("infinity 0 0"), None);
    }

    #[test]
    fn test_parse_layer_config() {
        let config = parse_layer_config(CONFIG_XML).unwrap();

        assert_eq!(config.world_size, 1000);
        assert_eq!(config.layer_size, 100);
        assert_eq!(config.usages, vec!["Farm", "Town", "Military", "Churches"]);
        assert_eq!(config.values, vec!["Tier1", "Tier3"]);
        assert_eq!(config.layers.len(), 7);
        assert!(config.has_layer(DEF_ALL_LAYER));
        assert_eq!(config.layers["usgFlg_Farm"].usage_flags, 1);
        assert_eq!(config.layers["usgFlg_Def-All"].color, 4_294_901_760);
    }

    #[test]
    fn test_parse_layer_config_duplicate_keeps_last() {
        let xml = r#"<map>
            <global><world size="100"/><layer size="10"/></global>
            <layers>
                <layer name="usgFlg_Town" color="1" usage_flags="0" value_flags="0"/>
                <layer name="usgFlg_Town" color="2" usage_flags="0" value_flags="0"/>
            </layers>
        </map>"#;
        let config = parse_layer_config(xml).unwrap();

        assert_eq!(config.layers.len(), 1);
        assert_eq!(config.layers["usgFlg_Town"].color, 2);
        assert!(config.usages.is_empty());
    }

    #[test]
    fn test_parse_layer_config_requires_global() {
        assert!(parse_layer_config("<map><layers/></map>").is_err());
    }

    #[test]
    fn test_parse_group_table() {
        let table = parse_group_table(PROTO_XML).unwrap();

        assert_eq!(table.len(), 4);
        let barn = table.get("Land_Barn").unwrap();
        assert!(barn.usages.contains("Farm"));
        assert!(barn.values.contains("Tier1"));
        assert_eq!(
            barn.points,
            vec![
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(-10.0, 0.0),
            ]
        );

        let barracks = table.get("Land_Barracks").unwrap();
        assert_eq!(barracks.usages.len(), 1);
        assert!(barracks.points.is_empty());
    }

    #[test]
    fn test_parse_placements_drops_malformed() {
        let placements = parse_placements(GROUPPOS_XML).unwrap();

        assert_eq!(placements.buildings.len(), 5);
        assert_eq!(placements.dropped, 3);

        let barn = &placements.buildings[0];
        assert_eq!(barn.group, "Land_Barn");
        assert_eq!((barn.x, barn.z, barn.rotation), (500.0, 500.0, 90.0));
        assert_eq!(placements.buildings[1].group, "land_house");
    }

    #[test]
    fn test_parse_placements_drops_non_finite() {
        let xml = r#"<map>
            <group name="Land_Barn" pos="nan 0 500" a="0"/>
            <group name="Land_Barn" pos="500 0 inf" a="0"/>
            <group name="Land_Barn" pos="500 0 500" a="NaN"/>
            <group name="Land_Barn" pos="500 0 500" a="-infinity"/>
            <group name="Land_Barn" pos="500 0 500" a="45"/>
        </map>"#;
        let placements = parse_placements(xml).unwrap();

        assert_eq!(placements.buildings.len(), 1);
        assert_eq!(placements.dropped, 4);
        assert_eq!(placements.buildings[0].rotation, 45.0);
    }

    #[test]
    fn test_parse_group_table_skips_non_finite_points() {
        let xml = r#"<prototype>
            <group name="Land_Barn">
                <container>
                    <point pos="nan 0 1"/>
                    <point pos="1 0 inf"/>
                    <point pos="2 0 3"/>
                </container>
            </group>
        </prototype>"#;
        let table = parse_group_table(xml).unwrap();
        assert_eq!(table.get("Land_Barn").unwrap().points, vec![Vec2::new(2.0, 3.0)]);
    }

    #[test]
    fn test_parse_placements_requires_name() {
        let placements =
            parse_placements(r#"<map><group pos="1 2 3" a="0"/></map>"#).unwrap();
        assert!(placements.buildings.is_empty());
        assert_eq!(placements.dropped, 1);
    }
}
