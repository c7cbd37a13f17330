//! Input discovery and setup checks.
//!
//! Every required file is checked before anything is parsed, and all
//! missing items are reported together.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ToolError};
use crate::settings::ToolSettings;

/// Resolved paths of the three input documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    /// Map configuration document.
    pub config: PathBuf,
    /// Building placement document.
    pub grouppos: PathBuf,
    /// Prototype group document.
    pub proto: PathBuf,
}

/// Create the config and output directories, then locate the inputs.
pub fn ensure_setup(settings: &ToolSettings) -> Result<InputFiles> {
    for dir in [&settings.config_dir, &settings.output_dir] {
        fs::create_dir_all(dir).map_err(|e| ToolError::io(dir, e))?;
    }
    locate_inputs(settings)
}

/// Locate the inputs without creating any directories.
///
/// The configuration is the first `*.xml` file in the config directory,
/// by file name.
pub fn locate_inputs(settings: &ToolSettings) -> Result<InputFiles> {
    let mut missing = Vec::new();

    let config = find_config_file(&settings.config_dir)?;
    if config.is_none() {
        missing.push(format!(
            "map config XML (e.g. chernarusplus.xml) in {}",
            settings.config_dir.display()
        ));
    }
    if !settings.grouppos_path.is_file() {
        missing.push(format!("{}", settings.grouppos_path.display()));
    }
    if !settings.proto_path.is_file() {
        missing.push(format!("{}", settings.proto_path.display()));
    }

    match config {
        Some(config) if missing.is_empty() => Ok(InputFiles {
            config,
            grouppos: settings.grouppos_path.clone(),
            proto: settings.proto_path.clone(),
        }),
        _ => Err(ToolError::MissingInputs(missing)),
    }
}

/// First `*.xml` file in `dir` in file-name order, if any.
///
/// A missing directory counts as empty.
pub fn find_config_file(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ToolError::io(dir, e))? {
        let path = entry.map_err(|e| ToolError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "xml") {
            candidates.push(path);
        }
    }
    candidates.sort();
    debug!("Found {} config candidates in {}", candidates.len(), dir.display());

    Ok(candidates.into_iter().next())
}
