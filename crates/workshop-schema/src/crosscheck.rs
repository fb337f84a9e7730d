//! # Configuration / Content Cross-Check
//!
//! The step schema alone does not tie a page to the roadmap. This pass
//! checks that each loaded page belongs to a configured step and carries
//! that step's tag. Drift in titles or durations, and steps that have no
//! page yet, are reported as warnings.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use workshop_core::{Step, WorkshopConfig};

use crate::collection::ContentCollection;

/// A page that contradicts the roadmap.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossCheckError {
    /// The page declares an id no configured step has.
    #[error("{}: step id '{id}' is not in the roadmap", .document.display())]
    UnknownStep {
        /// Declared step id.
        id: String,
        /// Offending document.
        document: PathBuf,
    },

    /// The page and the configured step disagree on the tag.
    #[error("{}: tag '{found}' does not match '{expected}' configured for step '{id}'", .document.display())]
    TagMismatch {
        /// Step id.
        id: String,
        /// Tag in the configuration.
        expected: String,
        /// Tag in the page.
        found: String,
        /// Offending document.
        document: PathBuf,
    },
}

/// Every cross-check error, in roadmap order of discovery, with the
/// warnings found in the same pass.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("content does not match the roadmap:\n{}", render_errors(.errors))]
pub struct CrossCheckErrors {
    /// Pages that contradict the roadmap.
    pub errors: Vec<CrossCheckError>,
    /// Non-blocking drift found alongside the errors.
    pub warnings: Vec<CrossCheckWarning>,
}

fn render_errors(errors: &[CrossCheckError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drift between page and roadmap that does not block the build.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossCheckWarning {
    /// A configured step has no page.
    MissingContent { id: String },
    /// Page and roadmap estimate different durations.
    DurationMismatch {
        id: String,
        configured: u32,
        documented: f64,
    },
    /// Page and roadmap use different titles.
    TitleMismatch {
        id: String,
        configured: String,
        documented: String,
    },
}

impl fmt::Display for CrossCheckWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContent { id } => write!(f, "step '{id}' has no content document"),
            Self::DurationMismatch {
                id,
                configured,
                documented,
            } => write!(
                f,
                "step '{id}': roadmap says {configured} min, page says {documented} min"
            ),
            Self::TitleMismatch {
                id,
                configured,
                documented,
            } => write!(
                f,
                "step '{id}': roadmap title '{configured}' differs from page title '{documented}'"
            ),
        }
    }
}

/// Check a loaded collection against the roadmap.
///
/// # Errors
///
/// Returns every page with an unknown id or a mismatched tag, together
/// with the warnings. On success returns the warnings. Warnings are logged
/// either way.
pub fn cross_check(
    config: &WorkshopConfig,
    collection: &ContentCollection,
) -> Result<Vec<CrossCheckWarning>, CrossCheckErrors> {
    let steps: HashMap<&str, &Step> = config.steps.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for entry in collection.iter() {
        let content = &entry.data;
        let Some(step) = steps.get(content.id.as_str()) else {
            errors.push(CrossCheckError::UnknownStep {
                id: content.id.to_string(),
                document: entry.source.clone(),
            });
            continue;
        };

        if step.tag != content.tag {
            errors.push(CrossCheckError::TagMismatch {
                id: step.id.to_string(),
                expected: step.tag.to_string(),
                found: content.tag.to_string(),
                document: entry.source.clone(),
            });
        }

        if f64::from(step.duration_min) != content.duration_min {
            warnings.push(CrossCheckWarning::DurationMismatch {
                id: step.id.to_string(),
                configured: step.duration_min,
                documented: content.duration_min,
            });
        }

        if step.title != content.title {
            warnings.push(CrossCheckWarning::TitleMismatch {
                id: step.id.to_string(),
                configured: step.title.clone(),
                documented: content.title.clone(),
            });
        }
    }

    for step in &config.steps {
        if !collection.contains(step.id.as_str()) {
            warnings.push(CrossCheckWarning::MissingContent {
                id: step.id.to_string(),
            });
        }
    }

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    if !errors.is_empty() {
        return Err(CrossCheckErrors { errors, warnings });
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{CollectionConfig, CollectionLoader};
    use std::path::Path;

    fn page(id: &str, tag: &str, title: &str, minutes: u32) -> String {
        format!(
            "---\nid: {id}\ntag: {tag}\ntitle: \"{title}\"\nsummary: s\ndurationMin: {minutes}\nfiles: []\npath: /steps/{id}\nauthor: x\nauthorImageUrl: /x.webp\npubDate: \"2025-06-01\"\n---\n"
        )
    }

    fn load(dir: &Path, pages: &[(&str, String)]) -> ContentCollection {
        for (name, contents) in pages {
            std::fs::write(dir.join(name), contents).unwrap();
        }
        CollectionLoader::new(CollectionConfig::new(dir, "*.mdx"))
            .unwrap()
            .load()
            .unwrap()
    }

    fn two_step_config() -> WorkshopConfig {
        let mut config = WorkshopConfig::builtin().unwrap();
        config.steps.truncate(2);
        config
    }

    #[test]
    fn matching_content_passes_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let collection = load(
            dir.path(),
            &[
                ("a.mdx", page("step0-setup", "v0-setup", "Bootstrap & Build", 10)),
                ("b.mdx", page("step1-window", "v1-opengl-window", "Ventana & Contexto", 5)),
            ],
        );
        let warnings = cross_check(&two_step_config(), &collection).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn unknown_step_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let collection = load(
            dir.path(),
            &[("x.mdx", page("step9-bonus", "v9-bonus", "Bonus", 5))],
        );
        let errors = cross_check(&two_step_config(), &collection).unwrap_err();
        assert_eq!(
            errors.errors,
            vec![CrossCheckError::UnknownStep {
                id: "step9-bonus".to_string(),
                document: dir.path().join("x.mdx"),
            }]
        );
    }

    #[test]
    fn tag_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let collection = load(
            dir.path(),
            &[("a.mdx", page("step0-setup", "v0-bootstrap", "Bootstrap & Build", 10))],
        );
        let errors = cross_check(&two_step_config(), &collection).unwrap_err();
        assert!(matches!(
            &errors.errors[..],
            [CrossCheckError::TagMismatch { expected, found, .. }]
                if expected == "v0-setup" && found == "v0-bootstrap"
        ));
        assert!(errors.to_string().contains("a.mdx"));
    }

    #[test]
    fn drift_and_missing_pages_are_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let collection = load(
            dir.path(),
            &[("a.mdx", page("step0-setup", "v0-setup", "Setup", 12))],
        );
        let warnings = cross_check(&two_step_config(), &collection).unwrap();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.contains(&CrossCheckWarning::DurationMismatch {
            id: "step0-setup".to_string(),
            configured: 10,
            documented: 12.0,
        }));
        assert!(warnings
            .iter()
            .any(|w| matches!(w, CrossCheckWarning::TitleMismatch { id, .. } if id == "step0-setup")));
        assert!(warnings.contains(&CrossCheckWarning::MissingContent {
            id: "step1-window".to_string(),
        }));
    }

    #[test]
    fn warnings_survive_a_failing_check() {
        let dir = tempfile::tempdir().unwrap();
        let collection = load(
            dir.path(),
            &[
                ("a.mdx", page("step0-setup", "v0-setup", "Setup", 12)),
                ("x.mdx", page("step9-bonus", "v9-bonus", "Bonus", 5)),
            ],
        );
        let failure = cross_check(&two_step_config(), &collection).unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert!(failure.warnings.contains(&CrossCheckWarning::MissingContent {
            id: "step1-window".to_string(),
        }));
        assert!(failure
            .warnings
            .iter()
            .any(|w| matches!(w, CrossCheckWarning::DurationMismatch { id, .. } if id == "step0-setup")));
    }
}
