//! # Startup Validation Pass
//!
//! [`ValidatedConfig`] is the only way consumers receive a configuration.
//! Construction runs every invariant check and refuses to produce a value
//! if any fails, so a malformed configuration stops the build before a
//! single page renders.
//!
//! Checks:
//!
//! - step `id` and `tag` values are pairwise distinct,
//! - required text fields are non-empty,
//! - `date` is an ISO calendar date,
//! - `durationHours` is positive and finite,
//! - absolute URLs parse as `http`/`https`, and `href`s are either
//!   site-relative or absolute `http`/`https`.
//!
//! A roadmap whose minutes exceed `durationHours` is logged as a warning.
//! The durations are estimates, so this is not a hard error.

use std::collections::HashMap;
use std::ops::Deref;
use std::path::Path;

use chrono::NaiveDate;
use url::Url;

use crate::config::WorkshopConfig;
use crate::error::{ConfigError, ConfigurationShapeError, ShapeViolations};

/// An immutable configuration that passed the startup validation pass.
///
/// Dereferences to [`WorkshopConfig`] for read access. There is no way to
/// obtain a mutable reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(WorkshopConfig);

impl ValidatedConfig {
    /// Validate a configuration, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Shape` listing all violations found.
    pub fn new(config: WorkshopConfig) -> Result<Self, ConfigError> {
        let violations = check_shape(&config);
        if !violations.is_empty() {
            return Err(ConfigError::Shape(ShapeViolations::new(violations)));
        }

        warn_on_roadmap_overrun(&config);

        tracing::info!(
            workshop = %config.id,
            steps = config.steps.len(),
            "workshop configuration validated"
        );
        Ok(Self(config))
    }

    /// Parse and validate the configuration embedded in the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(WorkshopConfig::builtin()?)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::new(WorkshopConfig::load(path)?)
    }

    /// Borrow the validated record.
    pub fn config(&self) -> &WorkshopConfig {
        &self.0
    }
}

impl Deref for ValidatedConfig {
    type Target = WorkshopConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Run every invariant check and return the violations, in field order.
///
/// An empty result means the configuration is valid.
pub fn check_shape(config: &WorkshopConfig) -> Vec<ConfigurationShapeError> {
    let mut out = Vec::new();

    require_text(&mut out, "id", &config.id);
    require_text(&mut out, "title", &config.title);
    require_text(&mut out, "language", &config.language);

    if NaiveDate::parse_from_str(&config.date, "%Y-%m-%d").is_err() {
        out.push(ConfigurationShapeError::InvalidDate {
            field: "date".to_string(),
            value: config.date.clone(),
        });
    }

    if !(config.duration_hours.is_finite() && config.duration_hours > 0.0) {
        out.push(ConfigurationShapeError::InvalidDuration {
            field: "durationHours".to_string(),
            value: config.duration_hours,
        });
    }

    require_text(&mut out, "speaker.name", &config.speaker.name);
    for (platform, link) in &config.speaker.social {
        require_http_url(&mut out, &format!("speaker.social.{platform}"), link);
    }

    require_http_url(&mut out, "repository.url", &config.repository.url);
    require_text(
        &mut out,
        "repository.defaultBranch",
        &config.repository.default_branch,
    );

    check_steps(&mut out, config);

    for (i, link) in config.nav.iter().enumerate() {
        require_text(&mut out, &format!("nav[{i}].label"), &link.label);
        require_href(&mut out, &format!("nav[{i}].href"), &link.href);
    }

    for (i, resource) in config.resources.iter().enumerate() {
        require_text(&mut out, &format!("resources[{i}].title"), &resource.title);
        require_href(&mut out, &format!("resources[{i}].href"), &resource.href);
    }

    for (i, tool) in config.development_tools.iter().enumerate() {
        require_text(&mut out, &format!("developmentTools[{i}].name"), &tool.name);
        require_http_url(&mut out, &format!("developmentTools[{i}].url"), &tool.url);
    }

    for (i, doc) in config.documentation.iter().enumerate() {
        require_text(&mut out, &format!("documentation[{i}].title"), &doc.title);
        require_http_url(&mut out, &format!("documentation[{i}].url"), &doc.url);
    }

    out
}

fn check_steps(out: &mut Vec<ConfigurationShapeError>, config: &WorkshopConfig) {
    let mut seen_ids: HashMap<&str, usize> = HashMap::new();
    let mut seen_tags: HashMap<&str, usize> = HashMap::new();

    for (i, step) in config.steps.iter().enumerate() {
        if let Some(&first) = seen_ids.get(step.id.as_str()) {
            out.push(ConfigurationShapeError::DuplicateStepId {
                id: step.id.to_string(),
                first,
                second: i,
            });
        } else {
            seen_ids.insert(step.id.as_str(), i);
        }

        if let Some(&first) = seen_tags.get(step.tag.as_str()) {
            out.push(ConfigurationShapeError::DuplicateStepTag {
                tag: step.tag.to_string(),
                first,
                second: i,
            });
        } else {
            seen_tags.insert(step.tag.as_str(), i);
        }

        require_text(out, &format!("steps[{i}].title"), &step.title);
    }
}

fn warn_on_roadmap_overrun(config: &WorkshopConfig) {
    let planned: u64 = config.steps.iter().map(|s| u64::from(s.duration_min)).sum();
    let available = config.duration_hours * 60.0;
    if planned as f64 > available {
        tracing::warn!(
            planned_minutes = planned,
            available_minutes = available,
            "roadmap is longer than the session"
        );
    }
}

fn require_text(out: &mut Vec<ConfigurationShapeError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        out.push(ConfigurationShapeError::EmptyField {
            field: field.to_string(),
        });
    }
}

fn require_http_url(out: &mut Vec<ConfigurationShapeError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        out.push(ConfigurationShapeError::EmptyField {
            field: field.to_string(),
        });
        return;
    }
    let reason = match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return,
        Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
        Err(e) => e.to_string(),
    };
    out.push(ConfigurationShapeError::InvalidUrl {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    });
}

fn require_href(out: &mut Vec<ConfigurationShapeError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        out.push(ConfigurationShapeError::EmptyField {
            field: field.to_string(),
        });
        return;
    }
    let site_relative = value.starts_with('/') && !value.starts_with("//");
    let absolute = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !site_relative && !absolute {
        out.push(ConfigurationShapeError::InvalidHref {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}
