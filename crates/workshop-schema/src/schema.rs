//! # Step Content Schema
//!
//! Validation of step content documents against the JSON Schema
//! (Draft 2020-12) in `schemas/step.schema.json`.
//!
//! ## Contract
//!
//! Every field (`id`, `tag`, `title`, `summary`, `durationMin`, `files`,
//! `path`, `author`, `authorImageUrl`, `pubDate`) is required and must have
//! the declared type. Nothing is defaulted and nothing is coerced: a
//! `durationMin` of `"ten"` is a type violation, not a zero. Keys outside
//! the schema are ignored.
//!
//! Every violation names the field it concerns. For a missing property
//! that is the property name; otherwise it is the first segment of the
//! JSON Pointer into the document.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use workshop_core::{StepId, StepTag};

/// The step content schema, as shipped with the crate.
pub const STEP_SCHEMA_JSON: &str = include_str!("../schemas/step.schema.json");

/// Typed frontmatter of one step page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepContent {
    pub id: StepId,
    pub tag: StepTag,
    pub title: String,
    pub summary: String,
    /// Estimated minutes. The schema allows any JSON number.
    pub duration_min: f64,
    /// Repository files touched by the step, in display order.
    pub files: Vec<String>,
    /// Site-relative href of the page.
    pub path: String,
    pub author: String,
    pub author_image_url: String,
    pub pub_date: String,
}

/// Error raised for a single content document.
#[derive(Error, Debug)]
pub enum ContentValidationError {
    /// The document could not be read.
    #[error("cannot read document: {0}")]
    Read(String),

    /// The frontmatter block is not well-formed YAML, or is unterminated.
    #[error("invalid frontmatter: {0}")]
    Frontmatter(String),

    /// The frontmatter does not satisfy the step content schema.
    #[error("{n} schema violation(s):\n{0}", n = .0.len())]
    Schema(ValidationViolations),

    /// Another document already declared the same `id`.
    #[error("duplicate step id '{id}', already declared by {first}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
        /// Document that declared it first.
        first: String,
    },
}

/// Error compiling the embedded schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text is not valid JSON.
    #[error("step schema is not valid JSON: {0}")]
    InvalidJson(String),

    /// The schema could not be compiled into a validator.
    #[error("step schema could not be compiled: {0}")]
    Build(String),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Top-level document field the violation concerns. Empty for the root.
    pub field: String,
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "    (root): {}", self.message)
        } else {
            write!(f, "    {}: {}", self.field, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Names of the fields with at least one violation, deduplicated, in
    /// report order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field.as_str()) {
                fields.push(&v.field);
            }
        }
        fields
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled step content schema.
///
/// Compile once and reuse for every document of a collection.
pub struct StepContentSchema {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for StepContentSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepContentSchema")
            .field("id", &self.schema.get("$id"))
            .finish_non_exhaustive()
    }
}

impl StepContentSchema {
    /// Compile the schema embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the embedded schema is malformed.
    pub fn new() -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(STEP_SCHEMA_JSON)
            .map_err(|e| SchemaError::InvalidJson(e.to_string()))?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| SchemaError::Build(e.to_string()))?;

        Ok(Self { schema, validator })
    }

    /// The schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Check a document against the schema without building a record.
    ///
    /// Returns every violation; an empty collection means the document
    /// conforms.
    pub fn validate(&self, instance: &Value) -> ValidationViolations {
        let violations = self
            .validator
            .iter_errors(instance)
            .map(|e| {
                let instance_path = e.instance_path.to_string();
                let field = match &e.kind {
                    ValidationErrorKind::Required { property } => property
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| property.to_string()),
                    _ => top_level_field(&instance_path),
                };
                Violation {
                    field,
                    instance_path,
                    schema_path: e.schema_path.to_string(),
                    message: e.to_string(),
                }
            })
            .collect();
        ValidationViolations { violations }
    }

    /// Validate a document and convert it into a typed [`StepContent`].
    ///
    /// The schema runs first. Once the shape is right, `id` and `tag` must
    /// also be usable as a [`StepId`] and [`StepTag`].
    ///
    /// # Errors
    ///
    /// Returns the violations, each naming its field.
    pub fn parse(&self, instance: &Value) -> Result<StepContent, ValidationViolations> {
        let violations = self.validate(instance);
        if !violations.is_empty() {
            return Err(violations);
        }

        let mut violations = Vec::new();
        if let Some(Value::String(id)) = instance.get("id") {
            if let Err(e) = StepId::new(id.as_str()) {
                violations.push(identifier_violation("id", e.to_string()));
            }
        }
        if let Some(Value::String(tag)) = instance.get("tag") {
            if let Err(e) = StepTag::new(tag.as_str()) {
                violations.push(identifier_violation("tag", e.to_string()));
            }
        }
        if !violations.is_empty() {
            return Err(ValidationViolations { violations });
        }

        serde_json::from_value(instance.clone()).map_err(|e| ValidationViolations {
            violations: vec![Violation {
                field: String::new(),
                instance_path: String::new(),
                schema_path: String::new(),
                message: e.to_string(),
            }],
        })
    }
}

fn identifier_violation(field: &str, message: String) -> Violation {
    Violation {
        field: field.to_string(),
        instance_path: format!("/{field}"),
        schema_path: String::new(),
        message,
    }
}

/// First segment of a JSON Pointer, with `~1`/`~0` escapes decoded.
fn top_level_field(pointer: &str) -> String {
    pointer
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup_document() -> Value {
        json!({
            "id": "step0-setup",
            "tag": "v0-setup",
            "title": "Bootstrap & Build",
            "summary": "Clone, install, build.",
            "durationMin": 10,
            "files": ["CMakeLists.txt"],
            "path": "/steps/step0-setup",
            "author": "x",
            "authorImageUrl": "/x.webp",
            "pubDate": "2025-06-01"
        })
    }

    fn schema() -> StepContentSchema {
        StepContentSchema::new().unwrap()
    }

    #[test]
    fn valid_document_parses_into_typed_record() {
        let content = schema().parse(&setup_document()).unwrap();
        assert_eq!(content.id.as_str(), "step0-setup");
        assert_eq!(content.tag.as_str(), "v0-setup");
        assert_eq!(content.title, "Bootstrap & Build");
        assert_eq!(content.duration_min, 10.0);
        assert_eq!(content.files, vec!["CMakeLists.txt".to_string()]);
        assert_eq!(content.author_image_url, "/x.webp");
        assert_eq!(content.pub_date, "2025-06-01");
    }

    #[test]
    fn textual_duration_is_rejected_not_coerced() {
        let mut doc = setup_document();
        doc["durationMin"] = json!("ten");
        let violations = schema().parse(&doc).unwrap_err();
        assert_eq!(violations.fields(), vec!["durationMin"]);
        let v = &violations.violations()[0];
        assert_eq!(v.instance_path, "/durationMin");
        assert!(v.message.contains("ten"), "message: {}", v.message);
    }

    #[test]
    fn missing_field_is_named() {
        let mut doc = setup_document();
        doc.as_object_mut().unwrap().remove("authorImageUrl");
        let violations = schema().validate(&doc);
        assert_eq!(violations.fields(), vec!["authorImageUrl"]);
        assert!(violations.violations()[0].message.contains("authorImageUrl"));
    }

    #[test]
    fn every_missing_field_is_reported() {
        let violations = schema().validate(&json!({}));
        let mut fields = violations.fields();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                "author",
                "authorImageUrl",
                "durationMin",
                "files",
                "id",
                "path",
                "pubDate",
                "summary",
                "tag",
                "title"
            ]
        );
    }

    #[test]
    fn file_list_items_must_be_strings() {
        let mut doc = setup_document();
        doc["files"] = json!(["CMakeLists.txt", 3]);
        let violations = schema().validate(&doc);
        assert_eq!(violations.fields(), vec!["files"]);
        assert_eq!(violations.violations()[0].instance_path, "/files/1");
    }

    #[test]
    fn null_is_not_a_string() {
        let mut doc = setup_document();
        doc["title"] = Value::Null;
        assert_eq!(schema().validate(&doc).fields(), vec!["title"]);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let mut doc = setup_document();
        doc["draft"] = json!(true);
        assert!(schema().parse(&doc).is_ok());
    }

    #[test]
    fn non_object_document_is_a_root_violation() {
        let violations = schema().validate(&json!(["not", "an", "object"]));
        assert!(!violations.is_empty());
        assert_eq!(violations.fields(), vec![""]);
        assert!(violations.to_string().contains("(root)"));
    }

    #[test]
    fn unusable_tag_is_reported_against_tag() {
        let mut doc = setup_document();
        doc["tag"] = json!("v0 setup");
        let violations = schema().parse(&doc).unwrap_err();
        assert_eq!(violations.fields(), vec!["tag"]);
        assert!(violations.violations()[0].message.contains("not a valid tag name"));
    }

    #[test]
    fn empty_id_is_reported_against_id() {
        let mut doc = setup_document();
        doc["id"] = json!("");
        let violations = schema().parse(&doc).unwrap_err();
        assert_eq!(violations.fields(), vec!["id"]);
    }

    #[test]
    fn top_level_field_decodes_pointer_escapes() {
        assert_eq!(top_level_field("/durationMin"), "durationMin");
        assert_eq!(top_level_field("/files/0"), "files");
        assert_eq!(top_level_field("/a~1b"), "a/b");
        assert_eq!(top_level_field(""), "");
    }

    #[test]
    fn violation_display_format() {
        let v = Violation {
            field: "durationMin".to_string(),
            instance_path: "/durationMin".to_string(),
            schema_path: "/properties/durationMin/type".to_string(),
            message: r#""ten" is not of type "number""#.to_string(),
        };
        assert_eq!(v.to_string(), r#"    durationMin: "ten" is not of type "number""#);
    }

    #[test]
    fn schema_error_reports_violation_count() {
        let mut doc = setup_document();
        doc["durationMin"] = json!("ten");
        let err = ContentValidationError::Schema(schema().parse(&doc).unwrap_err());
        let display = err.to_string();
        assert!(display.starts_with("1 schema violation(s):\n"), "got: {display}");
        assert!(display.contains("    durationMin: "), "got: {display}");
    }
}
