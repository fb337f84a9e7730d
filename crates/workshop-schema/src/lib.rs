//! # workshop-schema — Step Content Validation
//!
//! Validates the MDX pages that narrate each workshop step and assembles
//! them into a typed collection for the renderer.
//!
//! ## Schema (`schema`)
//!
//! [`StepContentSchema`] compiles `schemas/step.schema.json` (Draft
//! 2020-12). All ten frontmatter fields are required and strictly typed.
//! Violations carry the field name, the instance path and the schema path.
//!
//! ## Collection (`collection`)
//!
//! [`CollectionLoader`] finds pages by glob under a base directory
//! (`src/content/steps`, `**/*.mdx` by default), extracts the frontmatter,
//! validates it and returns a [`ContentCollection`] keyed by step id. One
//! bad page fails the load, and the error lists every bad page.
//!
//! ## Cross-check (`crosscheck`)
//!
//! [`cross_check`] ties pages to the roadmap in
//! [`WorkshopConfig`](workshop_core::WorkshopConfig): unknown ids and tag
//! mismatches are errors, title/duration drift and missing pages are
//! warnings.
//!
//! ## Crate Policy
//!
//! - Depends only on `workshop-core` internally.
//! - The schema `$id` must not change without updating every consumer.

pub mod collection;
pub mod crosscheck;
pub mod frontmatter;
pub mod schema;

pub use collection::{
    CollectionConfig, CollectionError, CollectionLoader, ContentCollection, DocumentFailure,
    DocumentFailures, StepEntry, DEFAULT_CONTENT_BASE, DEFAULT_CONTENT_PATTERN,
};
pub use crosscheck::{cross_check, CrossCheckError, CrossCheckErrors, CrossCheckWarning};
pub use schema::{
    ContentValidationError, SchemaError, StepContent, StepContentSchema, ValidationViolations,
    Violation, STEP_SCHEMA_JSON,
};
