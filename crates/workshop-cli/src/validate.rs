//! # Validate Subcommand
//!
//! Runs the three build-time checks in order:
//!
//! 1. the configuration startup pass,
//! 2. the step content collection load,
//! 3. the cross-check between roadmap and pages.
//!
//! Any failure stops the build. Nothing is rendered from a partially valid
//! site.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use workshop_core::ConfigError;
use workshop_schema::{
    cross_check, CollectionConfig, CollectionError, CollectionLoader, DEFAULT_CONTENT_BASE,
    DEFAULT_CONTENT_PATTERN,
};

/// Arguments for the `workshop validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Base directory of the step pages.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONTENT_BASE)]
    pub content_dir: PathBuf,

    /// Glob selecting step pages under the content directory.
    #[arg(long, value_name = "GLOB", default_value = DEFAULT_CONTENT_PATTERN)]
    pub pattern: String,

    /// Only validate the configuration.
    #[arg(long)]
    pub skip_content: bool,

    /// Do not compare pages with the roadmap.
    #[arg(long)]
    pub no_cross_check: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure. Operational
/// errors (unreadable directories, bad patterns) are returned as `Err`.
pub fn run_validate(args: &ValidateArgs, config_path: Option<&Path>, site_root: &Path) -> Result<u8> {
    let config = match crate::load_config(config_path, site_root) {
        Ok(config) => config,
        Err(e @ (ConfigError::Shape(_) | ConfigError::Parse { .. })) => {
            println!("FAIL: configuration — {e}");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    println!("OK: configuration '{}' ({} steps)", config.id, config.steps.len());

    if args.skip_content {
        return Ok(0);
    }

    let base = crate::resolve_path(&args.content_dir, site_root);
    let loader = CollectionLoader::new(CollectionConfig::new(&base, args.pattern.as_str()))?;

    let collection = match loader.load() {
        Ok(collection) => collection,
        Err(CollectionError::Documents { total, failures }) => {
            println!("Content: {}/{} passed", total - failures.len(), total);
            for failure in failures.failures() {
                let rel = failure.path.strip_prefix(site_root).unwrap_or(&failure.path);
                println!("  FAIL: {} — {}", rel.display(), failure.error);
            }
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    println!("Content: {}/{} passed", collection.len(), collection.len());

    if args.no_cross_check {
        return Ok(0);
    }

    match cross_check(&config, &collection) {
        Ok(warnings) => {
            for warning in &warnings {
                println!("  WARN: {warning}");
            }
            println!("OK: content matches roadmap");
            Ok(0)
        }
        Err(failure) => {
            for warning in &failure.warnings {
                println!("  WARN: {warning}");
            }
            for error in &failure.errors {
                println!("  FAIL: {error}");
            }
            Ok(1)
        }
    }
}
