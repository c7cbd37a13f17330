//! Batch mask generation.
//!
//! Sequence: locate inputs → load config, prototypes, placements → resolve
//! tags → drop excluded layers → rasterize and encode every remaining layer.
//!
//! Every input is loaded and validated before the first mask is written.
//! Layers are rendered in parallel with rayon; each worker owns its mask and
//! only reads the shared resolution output.

use std::path::{Path, PathBuf};

use lootmask_core::data::{GroupTable, LayerConfig};
use lootmask_core::mask::rasterize;
use lootmask_core::math::Projection;
use lootmask_core::resolver::{resolve_tags, LootPoint};
use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::export::{mask_path, save_mask};
use crate::inputs::{ensure_setup, InputFiles};
use crate::report::{log_resolution, MaskSummary, RunSummary, UNMATCHED_SAMPLE_SIZE};
use crate::settings::{OutputFormat, ToolSettings};
use crate::xml::{read_group_table, read_layer_config, read_placements, Placements};

/// Options that only apply to `generate`.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Write a JSON run summary here.
    pub report: Option<PathBuf>,
    /// Worker threads for rendering (0 = rayon default).
    pub jobs: usize,
}

/// All three input documents, normalized.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    /// Path of the map configuration that was used.
    pub config_file: PathBuf,
    /// Raster geometry and layers.
    pub config: LayerConfig,
    /// Prototype profiles.
    pub groups: GroupTable,
    /// Building placements.
    pub placements: Placements,
}

/// Load and normalize the three input documents.
pub fn load_inputs(files: &InputFiles) -> Result<LoadedInputs> {
    let config_name = files.config.file_name().unwrap_or(files.config.as_os_str());
    info!("Using config file: {}", config_name.to_string_lossy());

    let config = read_layer_config(&files.config)?;
    let groups = read_group_table(&files.proto)?;
    let placements = read_placements(&files.grouppos)?;

    info!("Loaded {} buildings", placements.buildings.len());
    info!("Loaded {} group tag profiles", groups.len());

    Ok(LoadedInputs {
        config_file: files.config.clone(),
        config,
        groups,
        placements,
    })
}

/// Run a full generation pass and return its summary.
pub fn run_generate(settings: &ToolSettings, options: &GenerateOptions) -> Result<RunSummary> {
    let files = ensure_setup(settings)?;
    let inputs = load_inputs(&files)?;
    let projection = inputs.config.projection()?;

    let mut resolution = resolve_tags(
        &inputs.placements.buildings,
        &inputs.groups,
        inputs.config.layer_names(),
    );
    log_resolution(&resolution);

    let (unmatched_sample, _) = resolution.unmatched_sample(UNMATCHED_SAMPLE_SIZE);
    let mut summary = RunSummary {
        config_file: inputs.config_file.clone(),
        buildings: inputs.placements.buildings.len(),
        dropped_buildings: inputs.placements.dropped,
        profiles: inputs.groups.len(),
        layer_buildings: resolution.building_counts().clone(),
        def_all_points: resolution.def_all_points(),
        unmatched_total: resolution.unmatched().len(),
        unmatched_sample: unmatched_sample.into_iter().map(String::from).collect(),
        ..Default::default()
    };

    summary.excluded_layers = resolution.remove_excluded(&settings.excluded_layers);
    if !summary.excluded_layers.is_empty() {
        info!("Skipping {} excluded layers", summary.excluded_layers.len());
    }

    let layers: Vec<(String, Vec<LootPoint>)> = resolution.into_layers().collect();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()?;
    summary.masks = pool.install(|| {
        layers
            .par_iter()
            .map(|(layer, points)| {
                render_layer(
                    layer,
                    points,
                    &projection,
                    &settings.output_dir,
                    settings.format,
                )
            })
            .collect::<Result<Vec<_>>>()
    })?;

    if let Some(path) = &options.report {
        summary.save(path)?;
        info!("Report saved to: {}", path.display());
    }

    info!(
        "Done! {} masks saved to {}",
        summary.masks.len(),
        settings.output_dir.display()
    );
    Ok(summary)
}

/// Rasterize one layer and write it to disk.
pub fn render_layer(
    layer: &str,
    points: &[LootPoint],
    projection: &Projection,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<MaskSummary> {
    info!(
        "Generating mask for layer: {layer} with {} positions",
        points.len()
    );

    let mask = rasterize(points, projection);
    let painted_pixels = mask.painted_count();

    let path = mask_path(output_dir, layer, format);
    save_mask(layer, mask, &path, format)?;

    Ok(MaskSummary {
        layer: layer.to_string(),
        points: points.len(),
        painted_pixels,
        path,
    })
}
