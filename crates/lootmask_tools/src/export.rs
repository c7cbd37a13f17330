//! Mask image encoding.

use std::path::{Path, PathBuf};

use image::GrayImage;
use lootmask_core::mask::Mask;

use crate::error::{Result, ToolError};
use crate::settings::OutputFormat;

/// Output path of a layer's mask: `<dir>/<layer>.<ext>`.
#[must_use]
pub fn mask_path(output_dir: &Path, layer: &str, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{layer}.{}", format.extension()))
}

/// Encode a mask as single-channel 8-bit grayscale.
pub fn save_mask(layer: &str, mask: Mask, path: &Path, format: OutputFormat) -> Result<()> {
    let size = mask.size();
    let image = GrayImage::from_raw(size, size, mask.into_raw())
        .ok_or_else(|| ToolError::MaskBuffer(layer.to_string()))?;

    image
        .save_with_format(path, format.image_format())
        .map_err(|source| ToolError::Image {
            path: path.display().to_string(),
            source,
        })
}
