//! Per-layer 8-bit masks and loot-point painting.

use crate::error::{MaskError, Result};
use crate::math::{Pixel, Projection};
use crate::resolver::LootPoint;

/// Intensity written for every painted pixel.
pub const PAINTED: u8 = 255;

/// Square single-channel raster, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    size: u32,
    pixels: Vec<u8>,
}

impl Mask {
    /// Allocate a blank `size × size` mask.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(MaskError::InvalidLayerSize(size));
        }
        Ok(Self::blank(size))
    }

    fn blank(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; size as usize * size as usize],
        }
    }

    /// Allocate a blank mask matching a projection's raster.
    #[must_use]
    pub fn for_projection(projection: &Projection) -> Self {
        Self::blank(projection.layer_size())
    }

    /// Edge length in pixels.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Intensity at a pixel, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, pixel: Pixel) -> Option<u8> {
        self.index(pixel).map(|idx| self.pixels[idx])
    }

    /// Set a pixel to full intensity.
    ///
    /// Returns `false` (and changes nothing) if the pixel is out of bounds.
    pub fn paint(&mut self, pixel: Pixel) -> bool {
        match self.index(pixel) {
            Some(idx) => {
                self.pixels[idx] = PAINTED;
                true
            }
            None => false,
        }
    }

    /// Project and paint every loot point.
    ///
    /// Points that project outside the raster are skipped. Returns how many
    /// points landed inside it.
    pub fn paint_points(&mut self, points: &[LootPoint], projection: &Projection) -> usize {
        points
            .iter()
            .map(|point| projection.world_to_pixel(point.world_position()))
            .filter(|&pixel| self.paint(pixel))
            .count()
    }

    /// Number of non-zero pixels.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    /// Raw row-major pixel buffer.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the mask into its raw row-major buffer.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    fn index(&self, pixel: Pixel) -> Option<usize> {
        let size = i64::from(self.size);
        if (0..size).contains(&pixel.x) && (0..size).contains(&pixel.y) {
            Some((pixel.y * size + pixel.x) as usize)
        } else {
            None
        }
    }
}

/// Rasterize one layer's points onto a fresh mask.
#[must_use]
pub fn rasterize(points: &[LootPoint], projection: &Projection) -> Mask {
    let mut mask = Mask::for_projection(projection);
    mask.paint_points(points, projection);
    mask
}
