//! Lootmask - loot-point layer mask generator.
//!
//! # Usage
//!
//! ```bash
//! # Generate masks with the default data/ and output/ layout
//! cargo run -p lootmask_tools -- generate
//!
//! # Generate PNG masks and a JSON summary
//! cargo run -p lootmask_tools -- generate --format png --report output/summary.json
//!
//! # Check the inputs against each other without writing masks
//! cargo run -p lootmask_tools -- validate --settings lootmask.ron
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lootmask_tools::{
    run_generate, run_validate, GenerateOptions, OutputFormat, SettingsOverrides, ToolError,
    ToolSettings,
};

#[derive(Parser)]
#[command(name = "lootmask")]
#[command(about = "Generate loot-point layer masks from building placements")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one mask per configured layer
    Generate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Image format of the masks
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write a JSON run summary to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Worker threads for rendering (0 = one per core)
        #[arg(short, long, default_value = "0")]
        jobs: usize,
    },

    /// Check the input documents against each other
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// RON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding the map config XML
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Building placement document (mapgrouppos.xml)
    #[arg(long)]
    grouppos: Option<PathBuf>,

    /// Prototype group document (mapgroupproto.xml)
    #[arg(long)]
    proto: Option<PathBuf>,

    /// Directory masks are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl InputArgs {
    fn into_settings(self, format: Option<OutputFormat>) -> lootmask_tools::Result<ToolSettings> {
        let overrides = SettingsOverrides {
            config_dir: self.config_dir,
            grouppos_path: self.grouppos,
            proto_path: self.proto,
            output_dir: self.output_dir,
            format,
        };
        ToolSettings::resolve(self.settings.as_deref(), overrides)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let outcome = match cli.command {
        Commands::Generate {
            inputs,
            format,
            report,
            jobs,
        } => inputs
            .into_settings(format)
            .and_then(|settings| run_generate(&settings, &GenerateOptions { report, jobs }))
            .map(|_| ()),
        Commands::Validate { inputs } => inputs
            .into_settings(None)
            .and_then(|settings| run_validate(&settings))
            .map(|_| ()),
    };

    match outcome {
        Ok(()) => {}
        Err(ToolError::MissingInputs(missing)) => {
            tracing::error!("Setup incomplete. Please add the following files:");
            for item in missing {
                tracing::error!(" - {item}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
