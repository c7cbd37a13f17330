//! Proptest strategies for property-based testing.
//!
//! These strategies generate random but reproducible inputs for the
//! coordinate transforms and the rasterizer.

use proptest::prelude::*;

use lootmask_core::data::Building;
use lootmask_core::math::Vec2;

/// Generate a yaw angle in degrees.
///
/// Range: -720 to 720, so wrap-around is exercised.
pub fn arb_angle() -> impl Strategy<Value = f64> {
    -720.0f64..720.0f64
}

/// Generate a building-local loot offset.
///
/// Range: -50 to 50 world units on each axis (large buildings).
pub fn arb_offset() -> impl Strategy<Value = Vec2> {
    (-50.0f64..50.0f64, -50.0f64..50.0f64).prop_map(|(x, z)| Vec2::new(x, z))
}

/// Generate a world position inside a `world_size` square map.
pub fn arb_world_point(world_size: f64) -> impl Strategy<Value = Vec2> {
    (0.0..world_size, 0.0..world_size).prop_map(|(x, z)| Vec2::new(x, z))
}

/// Generate a `(world_size, layer_size)` raster geometry.
///
/// Worlds are 1024 to 20480 units; layers are 16 to 4096 pixels.
pub fn arb_geometry() -> impl Strategy<Value = (u32, u32)> {
    (1024u32..20480u32, 16u32..4096u32)
}

/// Generate a building of the given group somewhere in a `world_size` map.
pub fn arb_building(group: &'static str, world_size: f64) -> impl Strategy<Value = Building> {
    (arb_world_point(world_size), arb_angle())
        .prop_map(move |(anchor, rotation)| Building::new(group, anchor.x, anchor.z, rotation))
}
