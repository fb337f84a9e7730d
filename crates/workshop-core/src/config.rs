//! # Workshop Configuration Record
//!
//! The single source of truth for the event data rendered by the site:
//! metadata, speaker, repository, prerequisites, the step roadmap,
//! navigation and the resource listings.
//!
//! Field names on the wire are camelCase (`durationHours`,
//! `defaultBranch`, `developmentTools`, `durationMin`) and must stay stable
//! for the rendering layer. Unknown keys are rejected so a misspelled field
//! fails the build instead of silently disappearing.
//!
//! This module only parses and serializes. Invariants (unique ids and
//! tags, dates, URLs) are enforced by [`ValidatedConfig`](crate::ValidatedConfig).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::identity::{StepId, StepTag};

/// The event configuration shipped with the site.
const BUILTIN_WORKSHOP_YAML: &str = include_str!("../data/workshop.yaml");

/// Root configuration record for one workshop event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkshopConfig {
    /// Stable identifier of the event, e.g. `modern-opengl-ar`.
    pub id: String,
    /// Headline title.
    pub title: String,
    /// One-line subtitle.
    pub subtitle: String,
    /// Event date, `YYYY-MM-DD`.
    pub date: String,
    /// Venue.
    pub place: String,
    /// Planned length of the session in hours.
    pub duration_hours: f64,
    /// Language code of the session, e.g. `ES`.
    pub language: String,
    /// Who gives the workshop.
    pub speaker: Speaker,
    /// The repository whose tags back the steps.
    pub repository: Repository,
    /// Free-text requirements, in display order.
    pub prerequisites: Vec<String>,
    /// The roadmap. Order is the presentation order.
    pub steps: Vec<Step>,
    /// Navbar links.
    pub nav: Vec<NavLink>,
    /// Downloadable material.
    pub resources: Vec<Resource>,
    /// Tools attendees should install.
    pub development_tools: Vec<DevelopmentTool>,
    /// External documentation.
    pub documentation: Vec<DocumentationLink>,
}

/// Speaker card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Speaker {
    pub name: String,
    pub role: String,
    /// Site path of the avatar image.
    pub avatar: String,
    /// Platform name to profile URL.
    pub social: BTreeMap<String, String>,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Repository {
    pub url: String,
    pub default_branch: String,
    /// SPDX license identifier.
    pub license: String,
}

/// One milestone of the roadmap, tied to a repository tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Step {
    pub id: StepId,
    pub tag: StepTag,
    pub title: String,
    pub summary: String,
    /// Estimated minutes spent on the step.
    pub duration_min: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevelopmentTool {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Free text such as `Cross-platform` or `macOS`.
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentationLink {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Category of the link, e.g. `docs`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl WorkshopConfig {
    /// Parse the event configuration embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the embedded document is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_WORKSHOP_YAML, "<builtin>")
    }

    /// Parse a configuration from YAML text.
    ///
    /// `origin` names the source in error messages (a path, or a label
    /// such as `<stdin>`).
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a configuration file.
    ///
    /// `.json` files are parsed as JSON; anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid record.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;

        tracing::debug!(path = %origin, "loading workshop configuration");

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text, &origin),
            _ => Self::from_yaml_str(&text, &origin),
        }
    }

    /// Serialize to YAML using the wire field names.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Serialize to pretty-printed JSON using the wire field names.
    pub fn to_json_string_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_parses() {
        let config = WorkshopConfig::builtin().unwrap();
        assert_eq!(config.id, "modern-opengl-ar");
        assert_eq!(config.date, "2025-06-04");
        assert_eq!(config.duration_hours, 2.0);
        assert_eq!(config.language, "ES");
        assert_eq!(config.speaker.social.len(), 3);
        assert_eq!(config.repository.default_branch, "main");
        assert_eq!(config.prerequisites.len(), 4);
        assert_eq!(config.steps.len(), 9);
        assert_eq!(config.nav.len(), 4);
        assert_eq!(config.resources.len(), 3);
        assert_eq!(config.development_tools.len(), 5);
        assert_eq!(config.documentation.len(), 4);
    }

    #[test]
    fn builtin_steps_keep_roadmap_order() {
        let config = WorkshopConfig::builtin().unwrap();
        let ids: Vec<&str> = config.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "step0-setup",
                "step1-window",
                "step2-sun-texture",
                "step3-orbits",
                "step4-marker-tracking",
                "step5-camera-bg",
                "step6-imgui",
                "step7-lighting",
                "step8-polish",
            ]
        );
        assert_eq!(config.steps[0].tag.as_str(), "v0-setup");
        assert_eq!(config.steps[0].title, "Bootstrap & Build");
        assert_eq!(config.steps[0].duration_min, 10);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let config = WorkshopConfig::builtin().unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&config.to_json_string_pretty().unwrap()).unwrap();
        assert!(json.get("durationHours").is_some());
        assert!(json.get("developmentTools").is_some());
        assert_eq!(json["repository"]["defaultBranch"], "main");
        assert_eq!(json["steps"][1]["durationMin"], 5);
        assert_eq!(json["documentation"][0]["type"], "docs");
        assert!(json.get("duration_hours").is_none());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let yaml = BUILTIN_WORKSHOP_YAML.replace("place:", "venue:");
        let err = WorkshopConfig::from_yaml_str(&yaml, "test.yaml").unwrap_err();
        match err {
            ConfigError::Parse { origin, reason } => {
                assert_eq!(origin, "test.yaml");
                assert!(reason.contains("venue"), "unexpected reason: {reason}");
            }
            other => panic!("Expected Parse, got: {other}"),
        }
    }

    #[test]
    fn negative_duration_is_a_parse_error() {
        let yaml = BUILTIN_WORKSHOP_YAML.replacen("durationMin: 10", "durationMin: -10", 1);
        assert!(matches!(
            WorkshopConfig::from_yaml_str(&yaml, "test.yaml"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_tag_is_a_parse_error() {
        let yaml = BUILTIN_WORKSHOP_YAML.replacen("tag: v0-setup", "tag: \"v0 setup\"", 1);
        let err = WorkshopConfig::from_yaml_str(&yaml, "test.yaml").unwrap_err();
        assert!(err.to_string().contains("not a valid tag name"), "{err}");
    }

    #[test]
    fn load_reads_yaml_and_json_files() {
        let config = WorkshopConfig::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("workshop.yaml");
        std::fs::write(&yaml_path, config.to_yaml_string().unwrap()).unwrap();
        assert_eq!(WorkshopConfig::load(&yaml_path).unwrap(), config);

        let json_path = dir.path().join("workshop.json");
        std::fs::write(&json_path, config.to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(WorkshopConfig::load(&json_path).unwrap(), config);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WorkshopConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got: {err}");
    }
}
