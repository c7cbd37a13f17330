//! Run reporting: operator-facing log lines and the JSON run summary.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use lootmask_core::resolver::Resolution;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ToolError};

/// How many unmatched group names are listed.
pub const UNMATCHED_SAMPLE_SIZE: usize = 10;

/// Outcome of one written mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSummary {
    /// Layer name.
    pub layer: String,
    /// Loot points routed to the layer.
    pub points: usize,
    /// Distinct pixels set in the mask.
    pub painted_pixels: usize,
    /// File the mask was written to.
    pub path: PathBuf,
}

/// Summary of a full generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Map configuration file used.
    pub config_file: PathBuf,
    /// Buildings loaded from the placement document.
    pub buildings: usize,
    /// Placement records dropped as malformed.
    pub dropped_buildings: usize,
    /// Prototype group profiles loaded.
    pub profiles: usize,
    /// Buildings matched per layer.
    pub layer_buildings: BTreeMap<String, usize>,
    /// Points on the aggregate layer, when configured.
    pub def_all_points: Option<usize>,
    /// Number of distinct unmatched group names.
    pub unmatched_total: usize,
    /// First unmatched group names, in lexical order.
    pub unmatched_sample: Vec<String>,
    /// Configured layers dropped by the exclusion list.
    pub excluded_layers: Vec<String>,
    /// Written masks, in layer order.
    pub masks: Vec<MaskSummary>,
}

impl RunSummary {
    /// Total painted pixels across all masks.
    #[must_use]
    pub fn painted_pixels(&self) -> usize {
        self.masks.iter().map(|m| m.painted_pixels).sum()
    }

    /// Look up a written mask by layer name.
    #[must_use]
    pub fn mask(&self, layer: &str) -> Option<&MaskSummary> {
        self.masks.iter().find(|m| m.layer == layer)
    }

    /// Save the summary as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ToolError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ToolError::Report {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|e| ToolError::io(path, e))
    }

    /// Load a summary from JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        serde_json::from_str(&json).map_err(|source| ToolError::Report {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Log the tag assignment summary and the unmatched-group sample.
pub fn log_resolution(resolution: &Resolution) {
    info!("Tag assignment summary:");
    for (layer, count) in resolution.building_counts() {
        info!(" - {layer}: {count} buildings");
    }

    if let Some(points) = resolution.def_all_points() {
        info!("Def-All: {points} total loot points");
    }

    log_unmatched(resolution);
}

/// Warn about group names with no prototype.
///
/// Lists the first [`UNMATCHED_SAMPLE_SIZE`] names, followed by `...` when
/// there are more.
pub fn log_unmatched(resolution: &Resolution) {
    let unmatched = resolution.unmatched();
    if unmatched.is_empty() {
        return;
    }

    warn!("Unmatched groups: {}", unmatched.len());
    let (sample, more) = resolution.unmatched_sample(UNMATCHED_SAMPLE_SIZE);
    for group in sample {
        warn!(" - {group}");
    }
    if more {
        warn!(" - ...");
    }
}
