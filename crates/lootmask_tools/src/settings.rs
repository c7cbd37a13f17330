//! Tool settings: input/output locations, output format and excluded layers.
//!
//! Settings come from three places, later ones overriding earlier ones:
//! built-in defaults, an optional RON file, and command-line flags.
//!
//! # Example RON
//!
//! ```ron
//! ToolSettings(
//!     config_dir: "data/config",
//!     grouppos_path: "data/mapgrouppos.xml",
//!     proto_path: "data/mapgroupproto.xml",
//!     output_dir: "output",
//!     format: Tga,
//!     excluded_layers: ["water-fresh", "water-sea"],
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::ImageFormat;
use lootmask_core::exclusion::ExclusionList;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// Image container written for each mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// Truevision TGA, 8-bit grayscale.
    #[default]
    Tga,
    /// PNG, 8-bit grayscale.
    Png,
}

impl OutputFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Tga => "tga",
            Self::Png => "png",
        }
    }

    /// Matching encoder format.
    #[must_use]
    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Tga => ImageFormat::Tga,
            Self::Png => ImageFormat::Png,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Directory holding the map configuration XML.
    pub config_dir: PathBuf,
    /// Building placement document.
    pub grouppos_path: PathBuf,
    /// Prototype group document.
    pub proto_path: PathBuf,
    /// Directory masks are written to.
    pub output_dir: PathBuf,
    /// Image format of the masks.
    pub format: OutputFormat,
    /// Layers that never produce a mask.
    pub excluded_layers: ExclusionList,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("data/config"),
            grouppos_path: PathBuf::from("data/mapgrouppos.xml"),
            proto_path: PathBuf::from("data/mapgroupproto.xml"),
            output_dir: PathBuf::from("output"),
            format: OutputFormat::default(),
            excluded_layers: ExclusionList::default(),
        }
    }
}

/// Command-line values that replace settings when present.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Replacement for [`ToolSettings::config_dir`].
    pub config_dir: Option<PathBuf>,
    /// Replacement for [`ToolSettings::grouppos_path`].
    pub grouppos_path: Option<PathBuf>,
    /// Replacement for [`ToolSettings::proto_path`].
    pub proto_path: Option<PathBuf>,
    /// Replacement for [`ToolSettings::output_dir`].
    pub output_dir: Option<PathBuf>,
    /// Replacement for [`ToolSettings::format`].
    pub format: Option<OutputFormat>,
}

impl ToolSettings {
    /// Load settings from a RON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        Self::from_ron(&content).map_err(|source| ToolError::Settings {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse settings from RON text.
    pub fn from_ron(content: &str) -> std::result::Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Load the settings file if given, otherwise start from defaults, then
    /// apply command-line overrides.
    pub fn resolve(file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let base = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(overrides))
    }

    /// Replace every field that has an override.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(dir) = overrides.config_dir {
            self.config_dir = dir;
        }
        if let Some(path) = overrides.grouppos_path {
            self.grouppos_path = path;
        }
        if let Some(path) = overrides.proto_path {
            self.proto_path = path;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_historic_layout() {
        let settings = ToolSettings::default();
        assert_eq!(settings.config_dir, PathBuf::from("data/config"));
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.format, OutputFormat::Tga);
        assert_eq!(settings.excluded_layers.len(), 11);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let settings = ToolSettings::from_ron(
            r#"(output_dir: "masks", excluded_layers: ["water-sea"], format: Png)"#,
        )
        .unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("masks"));
        assert_eq!(settings.format, OutputFormat::Png);
        assert_eq!(settings.excluded_layers, ExclusionList::new(["water-sea"]));
        assert_eq!(settings.proto_path, PathBuf::from("data/mapgroupproto.xml"));
    }

    #[test]
    fn test_empty_exclusion_list_is_respected() {
        let settings = ToolSettings::from_ron("(excluded_layers: [])").unwrap();
        assert!(settings.excluded_layers.is_empty());
    }

    #[test]
    fn test_overrides_replace_fields() {
        let settings = ToolSettings::default().with_overrides(SettingsOverrides {
            proto_path: Some(PathBuf::from("other/proto.xml")),
            format: Some(OutputFormat::Png),
            ..Default::default()
        });

        assert_eq!(settings.proto_path, PathBuf::from("other/proto.xml"));
        assert_eq!(settings.format, OutputFormat::Png);
        assert_eq!(settings.grouppos_path, PathBuf::from("data/mapgrouppos.xml"));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(OutputFormat::Tga.extension(), "tga");
        assert_eq!(OutputFormat::Png.to_string(), "png");
    }
}
