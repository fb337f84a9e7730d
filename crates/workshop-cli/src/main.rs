//! # workshop CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use workshop_cli::export::{run_export, ExportArgs};
use workshop_cli::roadmap::{run_roadmap, RoadmapArgs};
use workshop_cli::schema::{run_schema, SchemaArgs};
use workshop_cli::validate::{run_validate, ValidateArgs};

/// Workshop site toolchain.
///
/// Validates the event configuration and the step pages before the site is
/// built, and exports the configuration for the renderer.
#[derive(Parser, Debug)]
#[command(name = "workshop", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Workshop configuration file (YAML or JSON). Defaults to the built-in event.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration, the step pages, and their agreement.
    Validate(ValidateArgs),

    /// Print the validated configuration.
    Export(ExportArgs),

    /// Print the step schedule with running totals.
    Roadmap(RoadmapArgs),

    /// Print the step content JSON Schema.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let site_root = resolve_site_root().unwrap_or_else(|| {
        tracing::warn!("Could not locate site root; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    tracing::debug!(site_root = %site_root.display(), "resolved site root");

    let config_path = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, config_path, &site_root),
        Commands::Export(args) => workshop_cli::load_config(config_path, &site_root)
            .map_err(anyhow::Error::from)
            .and_then(|config| run_export(args, &config)),
        Commands::Roadmap(args) => workshop_cli::load_config(config_path, &site_root)
            .map_err(anyhow::Error::from)
            .and_then(|config| run_roadmap(args, &config)),
        Commands::Schema(args) => run_schema(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Walk up from the current directory to find the site root.
///
/// The site root is the first directory containing `src/content`.
fn resolve_site_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join("src").join("content").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
