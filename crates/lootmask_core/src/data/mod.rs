//! Normalized input records.
//!
//! Pure data structures for building placements, prototype group profiles
//! and layer definitions. The XML readers in `lootmask_tools` produce these;
//! everything downstream consumes them read-only.
//!
//! **Note:** This module contains no IO - it only defines data types.

mod group_data;
mod layer_data;
mod placement_data;

pub use group_data::{GroupProfile, GroupTable};
pub use layer_data::{LayerConfig, LayerDef};
pub use placement_data::Building;
