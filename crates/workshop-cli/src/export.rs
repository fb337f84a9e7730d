//! # Export Subcommand
//!
//! Writes the validated configuration in the wire shape the renderer
//! reads. Output round-trips: feeding it back through `--config` yields
//! the same record.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use workshop_core::ValidatedConfig;

/// Serialization format for `workshop export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Json,
}

/// Arguments for the `workshop export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Yaml)]
    pub format: ExportFormat,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Render the configuration in the requested format.
pub fn render(config: &ValidatedConfig, format: ExportFormat) -> Result<String> {
    let text = match format {
        ExportFormat::Yaml => config.to_yaml_string()?,
        ExportFormat::Json => {
            let mut json = config.to_json_string_pretty()?;
            json.push('\n');
            json
        }
    };
    Ok(text)
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs, config: &ValidatedConfig) -> Result<u8> {
    let text = render(config, args.format)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "configuration exported");
        }
        None => print!("{text}"),
    }
    Ok(0)
}
