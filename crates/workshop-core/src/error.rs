//! # Error Types
//!
//! Structured errors for configuration loading and the startup validation
//! pass. All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Configuration errors are authoring mistakes. They are fatal and must
//!   name the offending field so the author can fix it.
//! - The startup pass collects every violation before failing, so a single
//!   run reports all problems in the file.

use std::fmt;

use thiserror::Error;

/// Error raised while loading or validating a [`WorkshopConfig`](crate::WorkshopConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not a well-formed record (syntax error,
    /// missing key, unknown key, or wrong value type).
    #[error("configuration parse error in '{origin}': {reason}")]
    Parse {
        /// File path or a description of the in-memory source.
        origin: String,
        /// Parser message, including line/column when available.
        reason: String,
    },

    /// The configuration could not be serialized.
    #[error("configuration serialization error: {0}")]
    Serialize(String),

    /// The configuration parsed but violates one or more invariants.
    #[error("invalid workshop configuration ({n} violation(s)):\n{0}", n = .0.len())]
    Shape(ShapeViolations),
}

/// A single invariant violation found by the startup validation pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationShapeError {
    /// Two steps declare the same `id`.
    #[error("duplicate step id '{id}' at steps[{first}] and steps[{second}]")]
    DuplicateStepId {
        /// The repeated identifier.
        id: String,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },

    /// Two steps declare the same `tag`.
    #[error("duplicate step tag '{tag}' at steps[{first}] and steps[{second}]")]
    DuplicateStepTag {
        /// The repeated tag.
        tag: String,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },

    /// A required text field is empty or whitespace-only.
    #[error("{field}: must not be empty")]
    EmptyField {
        /// Dotted path of the field, e.g. `steps[2].title`.
        field: String,
    },

    /// A date field is not an ISO `YYYY-MM-DD` calendar date.
    #[error("{field}: '{value}' is not a valid YYYY-MM-DD date")]
    InvalidDate {
        /// Dotted path of the field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A duration is zero, negative, or not finite.
    #[error("{field}: must be a positive finite number, got {value}")]
    InvalidDuration {
        /// Dotted path of the field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A field that must hold an absolute `http`/`https` URL does not.
    #[error("{field}: '{value}' is not a valid http(s) URL: {reason}")]
    InvalidUrl {
        /// Dotted path of the field.
        field: String,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A link target is neither site-relative nor an absolute `http(s)` URL.
    #[error("{field}: '{value}' must be a site-relative path or an http(s) URL")]
    InvalidHref {
        /// Dotted path of the field.
        field: String,
        /// The rejected value.
        value: String,
    },
}

/// Every violation found in one configuration, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeViolations(Vec<ConfigurationShapeError>);

impl ShapeViolations {
    pub(crate) fn new(violations: Vec<ConfigurationShapeError>) -> Self {
        Self(violations)
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[ConfigurationShapeError] {
        &self.0
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ConfigurationShapeError> {
        self.0
    }
}

impl fmt::Display for ShapeViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {v}")?;
        }
        Ok(())
    }
}

/// Error constructing a step identifier or tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Step identifiers must be non-empty.
    #[error("step id must not be empty")]
    EmptyStepId,

    /// Step identifiers are slugs and cannot contain whitespace.
    #[error("step id '{0}' must not contain whitespace")]
    StepIdWhitespace(String),

    /// The tag cannot be used as a version-control tag name.
    #[error("'{tag}' is not a valid tag name: {reason}")]
    InvalidTag {
        /// The rejected tag.
        tag: String,
        /// The rule the tag breaks.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_violations_display_lists_each_entry() {
        let violations = ShapeViolations::new(vec![
            ConfigurationShapeError::EmptyField {
                field: "title".to_string(),
            },
            ConfigurationShapeError::DuplicateStepId {
                id: "step0-setup".to_string(),
                first: 0,
                second: 1,
            },
        ]);
        let display = violations.to_string();
        assert!(display.contains("  - title: must not be empty"));
        assert!(display.contains("duplicate step id 'step0-setup' at steps[0] and steps[1]"));
        assert_eq!(display.lines().count(), 2);
    }

    #[test]
    fn shape_error_reports_violation_count() {
        let err = ConfigError::Shape(ShapeViolations::new(vec![
            ConfigurationShapeError::EmptyField {
                field: "id".to_string(),
            },
        ]));
        assert!(err.to_string().starts_with("invalid workshop configuration (1 violation(s))"));
    }
}
