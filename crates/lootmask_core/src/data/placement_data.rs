//! Building placement records.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// One placed building instance.
///
/// Position is in world units on the horizontal plane (the vertical axis is
/// discarded by the reader). Rotation is the yaw in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// World X coordinate.
    pub x: f64,
    /// World Z coordinate.
    pub z: f64,
    /// Yaw in degrees.
    pub rotation: f64,
    /// Prototype group name, as written in the placement document.
    pub group: String,
}

impl Building {
    /// Create a building record.
    #[must_use]
    pub fn new(group: impl Into<String>, x: f64, z: f64, rotation: f64) -> Self {
        Self {
            x,
            z,
            rotation,
            group: group.into(),
        }
    }

    /// World anchor of the building.
    #[must_use]
    pub const fn anchor(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}
