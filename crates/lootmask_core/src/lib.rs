//! # Lootmask Core
//!
//! Turns building placements and loot-spawn prototypes into grayscale
//! per-layer masks.
//!
//! This crate contains **only** the pure transformation:
//! - No file IO
//! - No XML parsing
//! - No image encoding
//!
//! Readers and encoders live in `lootmask_tools`; everything here operates
//! on plain in-memory records so it can be tested and benchmarked in
//! isolation.
//!
//! ## Crate Structure
//!
//! - [`data`] - Normalized input records (buildings, group profiles, layers)
//! - [`resolver`] - Routes each building's loot points onto matching layers
//! - [`math`] - Offset rotation and world-to-pixel projection
//! - [`mask`] - Per-layer 8-bit raster and the painting routine
//! - [`exclusion`] - Layer names that never produce output

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod data;
pub mod error;
pub mod exclusion;
pub mod mask;
pub mod math;
pub mod resolver;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::data::{Building, GroupProfile, GroupTable, LayerConfig, LayerDef};
    pub use crate::error::{MaskError, Result};
    pub use crate::exclusion::{ExclusionList, DEFAULT_EXCLUDED_LAYERS};
    pub use crate::mask::Mask;
    pub use crate::math::{rotate_offset, Pixel, Projection};
    pub use crate::resolver::{resolve_tags, LootPoint, Resolution, DEF_ALL_LAYER};
}
