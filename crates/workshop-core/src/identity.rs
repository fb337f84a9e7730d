//! # Step Identity Newtypes
//!
//! Newtype wrappers for the two identifiers a step carries. They keep a
//! step id from being passed where a tag is expected, and every value is
//! validated at construction, including during deserialization.
//!
//! [`StepId`] is a page slug. [`StepTag`] names a tag in the workshop
//! repository, so it follows the tag-name rules of git
//! (`git check-ref-format`).

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Identifier of a roadmap step, e.g. `step0-setup`.
///
/// # Validation
///
/// Must be non-empty and must not contain whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StepId(String);

impl StepId {
    /// Create a step identifier, validating that it is a slug.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::EmptyStepId`] for an empty string and
    /// [`IdentifierError::StepIdWhitespace`] if it contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = value.into();
        if s.is_empty() {
            return Err(IdentifierError::EmptyStepId);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(IdentifierError::StepIdWhitespace(s));
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Repository tag checked out for a step, e.g. `v0-setup`.
///
/// # Validation
///
/// Rejects names git refuses as tags: empty, whitespace or control
/// characters, any of `~ ^ : ? * [ \`, `..`, `@{`, a leading `-` or `/`,
/// and a trailing `/`, `.` or `.lock`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StepTag(String);

impl StepTag {
    /// Create a tag, validating it against the git tag-name rules.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidTag`] naming the broken rule.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = value.into();
        if let Some(reason) = tag_rule_violation(&s) {
            return Err(IdentifierError::InvalidTag { tag: s, reason });
        }
        Ok(Self(s))
    }

    /// Access the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn tag_rule_violation(tag: &str) -> Option<&'static str> {
    if tag.is_empty() {
        return Some("must not be empty");
    }
    if tag.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Some("must not contain whitespace or control characters");
    }
    if tag.chars().any(|c| matches!(c, '~' | '^' | ':' | '?' | '*' | '[' | '\\')) {
        return Some("must not contain any of ~ ^ : ? * [ \\");
    }
    if tag.contains("..") {
        return Some("must not contain '..'");
    }
    if tag.contains("@{") {
        return Some("must not contain '@{'");
    }
    if tag.starts_with('-') || tag.starts_with('/') {
        return Some("must not start with '-' or '/'");
    }
    if tag.ends_with('/') || tag.ends_with('.') || tag.ends_with(".lock") {
        return Some("must not end with '/', '.' or '.lock'");
    }
    None
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl TryFrom<String> for $ty {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype_impls!(StepId);
string_newtype_impls!(StepTag);
