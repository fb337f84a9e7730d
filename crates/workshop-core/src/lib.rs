//! # workshop-core — Event Configuration for the Workshop Site
//!
//! Defines the configuration record the site renders from and the startup
//! pass that guarantees it is well formed.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for step identity.** `StepId` and `StepTag` are validated
//!    at construction, including during deserialization. A tag that git
//!    would refuse never enters the system.
//!
//! 2. **Validated handle, not ambient state.** [`ValidatedConfig`] is built
//!    once at startup and passed by reference to whatever needs it. It
//!    derefs to [`WorkshopConfig`] and offers no mutation.
//!
//! 3. **Fail fast, report everything.** The startup pass collects every
//!    violation (duplicate ids or tags, bad dates, bad URLs) into one
//!    [`ConfigError::Shape`] so the author fixes the file in one go.
//!
//! 4. **Stable wire shape.** camelCase field names, unknown keys rejected,
//!    YAML and JSON both round-trip to an equal value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `workshop-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod identity;
pub mod validate;

pub use config::{
    DevelopmentTool, DocumentationLink, NavLink, Repository, Resource, Speaker, Step,
    WorkshopConfig,
};
pub use error::{ConfigError, ConfigurationShapeError, IdentifierError, ShapeViolations};
pub use identity::{StepId, StepTag};
pub use validate::{check_shape, ValidatedConfig};
