//! # workshop-cli — Build-Time Checks for the Workshop Site
//!
//! Provides the `workshop` command, run by the site build before pages
//! are rendered.
//!
//! ## Subcommands
//!
//! - `workshop validate` — configuration pass, content collection load,
//!   and cross-check.
//! - `workshop export` — print the validated configuration as YAML or JSON.
//! - `workshop roadmap` — print the step schedule with running totals.
//! - `workshop schema` — print the step content JSON Schema.
//!
//! ```bash
//! workshop validate
//! workshop --config site/workshop.yaml validate --content-dir src/content/steps
//! workshop export --format json > public/workshop.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation logic lives in the library crates.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod export;
pub mod roadmap;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use workshop_core::{ConfigError, ValidatedConfig};

/// Load the configuration named by `--config`, or the built-in one.
///
/// Relative paths are resolved against `site_root`.
pub fn load_config(path: Option<&Path>, site_root: &Path) -> Result<ValidatedConfig, ConfigError> {
    match path {
        Some(path) => {
            let resolved = resolve_path(path, site_root);
            tracing::debug!(path = %resolved.display(), "using configuration file");
            ValidatedConfig::load(&resolved)
        }
        None => {
            tracing::debug!("using built-in configuration");
            ValidatedConfig::builtin()
        }
    }
}

/// Resolve a path that may be relative to the site root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `site_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, site_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let site_relative = site_root.join(path);
    if site_relative.exists() {
        site_relative
    } else {
        path.to_path_buf()
    }
}
