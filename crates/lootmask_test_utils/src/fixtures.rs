//! Test fixtures and helpers.
//!
//! Pre-built records and input documents for consistent testing.

use lootmask_core::data::{Building, GroupProfile, GroupTable, LayerConfig, LayerDef};
use lootmask_core::math::Vec2;
use lootmask_core::resolver::DEF_ALL_LAYER;

/// Group names used by [`sample_group_table`], in table order.
pub const SAMPLE_GROUPS: [&str; 4] = ["Land_Barn", "Land_House", "Land_Church", "Land_Barracks"];

/// Create a layer definition with only a color.
#[must_use]
pub fn layer(color: i64) -> LayerDef {
    LayerDef {
        color,
        ..Default::default()
    }
}

/// Four prototype groups covering farm, town, church and military tags.
#[must_use]
pub fn sample_group_table() -> GroupTable {
    let mut groups = GroupTable::new();
    groups.insert(
        "Land_Barn",
        GroupProfile::new()
            .with_usage("Farm")
            .with_value("Tier1")
            .with_point(Vec2::new(2.0, 3.0))
            .with_point(Vec2::new(-4.0, 1.5))
            .with_point(Vec2::new(0.0, -6.0)),
    );
    groups.insert(
        "Land_House",
        GroupProfile::new()
            .with_usage("Town")
            .with_value("Tier1")
            .with_point(Vec2::new(1.0, 1.0))
            .with_point(Vec2::new(-1.0, 1.0))
            .with_point(Vec2::new(1.0, -1.0))
            .with_point(Vec2::new(-1.0, -1.0)),
    );
    groups.insert(
        "Land_Church",
        GroupProfile::new()
            .with_usage("Churches")
            .with_point(Vec2::new(0.0, 8.0))
            .with_point(Vec2::new(0.0, -8.0)),
    );
    groups.insert(
        "Land_Barracks",
        GroupProfile::new()
            .with_usage("Military")
            .with_value("Tier3")
            .with_point(Vec2::new(5.0, 0.0))
            .with_point(Vec2::new(-5.0, 0.0)),
    );
    groups
}

/// A 12800-unit world on 1024-pixel layers, including the aggregate layer
/// and two layers from the default exclusion list.
#[must_use]
pub fn sample_layer_config() -> LayerConfig {
    let mut config = LayerConfig::new(12800, 1024);
    config.usages = ["Farm", "Town", "Military", "Industrial", "Churches"]
        .map(String::from)
        .to_vec();
    config.values = ["Tier1", "Tier2", "Tier3"].map(String::from).to_vec();
    for (idx, name) in [
        DEF_ALL_LAYER,
        "usgFlg_Farm",
        "usgFlg_Town",
        "usgFlg_Military",
        "usgFlg_Industrial",
        "valueFlg_Tier1",
        "keyPoint-Churches",
    ]
    .into_iter()
    .enumerate()
    {
        config.insert_layer(name, layer(idx as i64));
    }
    config
}

/// A `cols × rows` grid of buildings spread evenly over a square world,
/// cycling through [`SAMPLE_GROUPS`] and a few yaw angles.
#[must_use]
pub fn building_grid(cols: usize, rows: usize, world_size: f64) -> Vec<Building> {
    let step_x = world_size / (cols as f64 + 1.0);
    let step_z = world_size / (rows as f64 + 1.0);
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .enumerate()
        .map(|(idx, (col, row))| {
            Building::new(
                SAMPLE_GROUPS[idx % SAMPLE_GROUPS.len()],
                step_x * (col as f64 + 1.0),
                step_z * (row as f64 + 1.0),
                (idx % 8) as f64 * 45.0,
            )
        })
        .collect()
}

/// Map configuration document matching [`sample_layer_config`]'s layers,
/// on a 1000-unit world with 100-pixel layers.
pub const CONFIG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map>
    <global>
        <world size="1000"/>
        <layer size="100"/>
    </global>
    <areas>
        <usages>
            <usage name="Farm"/>
            <usage name="Town"/>
            <usage name="Military"/>
            <usage name="Churches"/>
        </usages>
        <values>
            <value name="Tier1"/>
            <value name="Tier3"/>
        </values>
    </areas>
    <layers>
        <layer name="usgFlg_Def-All" color="4294901760" usage_flags="0" value_flags="0"/>
        <layer name="usgFlg_Farm" color="4278255360" usage_flags="1" value_flags="0"/>
        <layer name="usgFlg_Town" color="4278190335" usage_flags="2" value_flags="0"/>
        <layer name="usgFlg_Military" color="4294967040" usage_flags="4" value_flags="0"/>
        <layer name="usgFlg_Industrial" color="4278255615" usage_flags="8" value_flags="0"/>
        <layer name="valueFlg_Tier1" color="4294902015" usage_flags="0" value_flags="1"/>
        <layer name="keyPoint-Churches" color="4286611584" usage_flags="16" value_flags="0"/>
    </layers>
</map>
"#;

/// Prototype document with the [`SAMPLE_GROUPS`] groups and loot points on
/// the cardinal axes.
pub const PROTO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<prototype>
    <defaults>
        <default name="group" lootmax="10"/>
    </defaults>
    <group name="Land_Barn" lootmax="4">
        <usage name="Farm"/>
        <value name="Tier1"/>
        <container name="lootFloor" lootmax="3">
            <category name="tools"/>
            <point pos="10 0.5 0" range="0.5" height="1.5" flags="32"/>
            <tag name="floor"/>
            <point pos="0 0.5 10" range="0.5" height="1.5" flags="32"/>
        </container>
        <container name="lootshelves">
            <point pos="-10 1.2 0" range="0.3" height="0.5" flags="32"/>
            <point pos="bad" range="0.3"/>
        </container>
    </group>
    <group name="Land_House">
        <usage name="Town"/>
        <value name="Tier1"/>
        <container name="lootFloor">
            <point pos="0 0 0"/>
        </container>
    </group>
    <group name="Land_Church">
        <usage name="Churches"/>
        <container name="lootFloor">
            <point pos="0 0 5"/>
        </container>
    </group>
    <group name="Land_Barracks">
        <usage name="Military"/>
        <usage name=""/>
        <value name="Tier3"/>
    </group>
</prototype>
"#;

/// Placement document: one building per group, one unmatched group, and
/// records with missing or malformed attributes.
pub const GROUPPOS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map>
    <group name="Land_Barn" pos="500.0 12.0 500.0" rpy="0 0 0" a="90.0"/>
    <group name="land_house" pos="205.0 3.0 795.0" rpy="0 0 0" a="0"/>
    <group name="Land_Church" pos="800.0 7.0 100.0" a="180"/>
    <group name="Land_Barracks" pos="300.0 1.0 300.0" a="0"/>
    <group name="Land_Lighthouse" pos="900.0 30.0 900.0" a="45"/>
    <group name="Land_Barn" pos="100.0 100.0" a="0"/>
    <group name="Land_Barn" pos="100.0 0.0 100.0"/>
    <group name="Land_Barn" pos="100.0 0.0 100.0" a="north"/>
</map>
"#;
