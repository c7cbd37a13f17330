//! # Lootmask Tools
//!
//! Batch tooling around `lootmask_core`:
//! - XML readers for the map config, prototype and placement documents
//! - Input discovery and setup checks
//! - Mask generation and image export
//! - Cross-reference validation of the inputs

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod export;
pub mod generate;
pub mod inputs;
pub mod report;
pub mod settings;
pub mod validate;
pub mod xml;

pub use error::{Result, ToolError};
pub use generate::{run_generate, GenerateOptions};
pub use report::RunSummary;
pub use settings::{OutputFormat, SettingsOverrides, ToolSettings};
pub use validate::{run_validate, ValidationReport};
