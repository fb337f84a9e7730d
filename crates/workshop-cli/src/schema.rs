//! # Schema Subcommand
//!
//! Prints the step content JSON Schema so editors and other tooling can
//! validate pages as they are written.

use anyhow::Result;
use clap::Args;

use workshop_schema::StepContentSchema;

/// Arguments for the `workshop schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {}

/// Execute the schema subcommand.
pub fn run_schema(_args: &SchemaArgs) -> Result<u8> {
    let schema = StepContentSchema::new()?;
    println!("{}", serde_json::to_string_pretty(schema.schema())?);
    Ok(0)
}
