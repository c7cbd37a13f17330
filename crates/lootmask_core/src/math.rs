//! Coordinate transforms between building-local, world and pixel space.
//!
//! World space is the horizontal (x, z) plane of the game map. Pixel space
//! is the square raster of a layer, with row 0 at the top (north edge).
//!
//! All math is `f64`. Pixel indices are produced by truncating toward zero,
//! which is what the reference masks were generated with.

use serde::{Deserialize, Serialize};

use crate::error::{MaskError, Result};

/// 2D vector on the horizontal (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

/// Rotate a local offset by a yaw angle in degrees.
///
/// Counter-clockwise positive in the (x, z) plane:
/// `rx = x·cos θ − z·sin θ`, `rz = x·sin θ + z·cos θ`.
#[must_use]
pub fn rotate_offset(offset: Vec2, angle_deg: f64) -> Vec2 {
    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    Vec2::new(
        offset.x * cos_a - offset.z * sin_a,
        offset.x * sin_a + offset.z * cos_a,
    )
}

/// World position of a loot point: building anchor plus rotated offset.
#[must_use]
pub fn world_position(anchor: Vec2, offset: Vec2, angle_deg: f64) -> Vec2 {
    anchor + rotate_offset(offset, angle_deg)
}

/// Integer pixel coordinate, before bounds clipping.
///
/// `y` is a row index: 0 is the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl Pixel {
    /// Create a pixel coordinate.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// World-to-pixel projection for one raster geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    layer_size: u32,
    scale: f64,
}

impl Projection {
    /// Create a projection of a `world_size` square world onto a
    /// `layer_size` square raster.
    ///
    /// # Errors
    ///
    /// Returns an error if either size is zero.
    pub fn new(world_size: u32, layer_size: u32) -> Result<Self> {
        if world_size == 0 {
            return Err(MaskError::InvalidWorldSize(world_size));
        }
        if layer_size == 0 {
            return Err(MaskError::InvalidLayerSize(layer_size));
        }
        Ok(Self {
            layer_size,
            scale: f64::from(world_size) / f64::from(layer_size),
        })
    }

    /// World units per pixel. Not necessarily an integer.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Raster edge length.
    #[must_use]
    pub const fn layer_size(&self) -> u32 {
        self.layer_size
    }

    /// Project a world point to a pixel coordinate.
    ///
    /// The Z axis is flipped: world north is row 0. Both axes truncate
    /// toward zero, and the float-to-integer conversion saturates, so any
    /// finite or infinite coordinate yields a pixel. The result may lie
    /// outside the raster; use [`Projection::contains`] before writing.
    #[must_use]
    pub fn world_to_pixel(&self, point: Vec2) -> Pixel {
        let px = (point.x / self.scale).trunc() as i64;
        let pz = (point.z / self.scale).trunc() as i64;
        Pixel::new(px, i64::from(self.layer_size).saturating_sub(pz))
    }

    /// Check whether a pixel lies inside `[0, layer_size)` on both axes.
    #[must_use]
    pub fn contains(&self, pixel: Pixel) -> bool {
        let size = i64::from(self.layer_size);
        (0..size).contains(&pixel.x) && (0..size).contains(&pixel.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < EPS
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let offset = Vec2::new(3.5, -7.25);
        assert_eq!(rotate_offset(offset, 0.0), offset);
    }

    #[test]
    fn test_rotate_quarter_turn_is_counter_clockwise() {
        let rotated = rotate_offset(Vec2::new(1.0, 0.0), 90.0);
        assert!(approx_eq(rotated, Vec2::new(0.0, 1.0)), "{rotated:?}");

        let rotated = rotate_offset(Vec2::new(0.0, 1.0), 90.0);
        assert!(approx_eq(rotated, Vec2::new(-1.0, 0.0)), "{rotated:?}");
    }

    #[test]
    fn test_rotate_half_turn_negates() {
        let rotated = rotate_offset(Vec2::new(2.0, -5.0), 180.0);
        assert!(approx_eq(rotated, Vec2::new(-2.0, 5.0)), "{rotated:?}");
    }

    #[test]
    fn test_world_position_adds_anchor() {
        let world = world_position(Vec2::new(100.0, 200.0), Vec2::new(10.0, 0.0), 90.0);
        assert!(approx_eq(world, Vec2::new(100.0, 210.0)), "{world:?}");
    }

    #[test]
    fn test_projection_scale_is_fractional() {
        let projection = Projection::new(12800, 4096).unwrap();
        assert!((projection.scale() - 3.125).abs() < EPS);
    }

    #[test]
    fn test_world_origin_maps_below_raster() {
        let projection = Projection::new(12800, 4096).unwrap();
        let pixel = projection.world_to_pixel(Vec2::ZERO);
        assert_eq!(pixel, Pixel::new(0, 4096));
        assert!(!projection.contains(pixel));
    }

    #[test]
    fn test_world_center_maps_to_raster_center() {
        let projection = Projection::new(12800, 4096).unwrap();
        let pixel = projection.world_to_pixel(Vec2::new(6400.0, 6400.0));
        assert_eq!(pixel, Pixel::new(2048, 2048));
        assert!(projection.contains(pixel));
    }

    #[test]
    fn test_projection_truncates_toward_zero() {
        let projection = Projection::new(100, 100).unwrap();
        assert_eq!(projection.world_to_pixel(Vec2::new(4.99, 0.0)).x, 4);
        // Negative coordinates truncate up to zero rather than flooring.
        assert_eq!(projection.world_to_pixel(Vec2::new(-0.5, 0.0)).x, 0);
        assert_eq!(projection.world_to_pixel(Vec2::new(-1.5, 0.0)).x, -1);
    }

    #[test]
    fn test_far_out_coordinates_project_off_raster() {
        let projection = Projection::new(12800, 4096).unwrap();
        for point in [
            Vec2::new(100.0, -1e300),
            Vec2::new(100.0, f64::NEG_INFINITY),
            Vec2::new(100.0, 1e300),
            Vec2::new(-1e300, 100.0),
        ] {
            let pixel = projection.world_to_pixel(point);
            assert!(!projection.contains(pixel), "{point:?} -> {pixel:?}");
        }
        assert_eq!(
            projection.world_to_pixel(Vec2::new(100.0, -1e300)).y,
            i64::MAX
        );
    }

    #[test]
    fn test_z_axis_is_flipped() {
        let projection = Projection::new(100, 100).unwrap();
        assert_eq!(projection.world_to_pixel(Vec2::new(0.0, 99.5)).y, 1);
        assert_eq!(projection.world_to_pixel(Vec2::new(0.0, 0.5)).y, 100);
    }

    #[test]
    fn test_contains_bounds() {
        let projection = Projection::new(64, 64).unwrap();
        assert!(projection.contains(Pixel::new(0, 0)));
        assert!(projection.contains(Pixel::new(63, 63)));
        assert!(!projection.contains(Pixel::new(64, 0)));
        assert!(!projection.contains(Pixel::new(0, 64)));
        assert!(!projection.contains(Pixel::new(-1, 10)));
    }

    #[test]
    fn test_projection_rejects_zero_sizes() {
        assert_eq!(Projection::new(0, 16), Err(MaskError::InvalidWorldSize(0)));
        assert_eq!(Projection::new(16, 0), Err(MaskError::InvalidLayerSize(0)));
    }
}
