//! Identifier validation.

use anyhow::Result;
use armid::ValidationError;
use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_failure, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Validate an identifier as a given resource type.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Resource type name (see `armid types`).
    resource_type: String,

    /// The identifier to validate.
    id: String,

    /// Configuration field name reported with each error.
    #[arg(long, default_value = "id")]
    field: String,
}

#[derive(Debug, Serialize)]
struct ValidationOutput {
    #[serde(rename = "type")]
    type_name: String,
    valid: bool,
    errors: Vec<String>,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let errors = ctx
            .registry
            .validate(&self.resource_type, &self.id, &self.field)
            .map_err(CliError::from)?;

        report(&self.resource_type, &self.id, &errors, ctx.format);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Invalid {
                type_name: self.resource_type,
                count: errors.len(),
            }
            .into())
        }
    }
}

fn report(type_name: &str, id: &str, errors: &[ValidationError], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if errors.is_empty() {
                print_success(&format!("'{}' is a valid {}", id, type_name));
            }
            for error in errors {
                print_failure(&error.to_string());
            }
        }
        OutputFormat::Json => print_single(&ValidationOutput {
            type_name: type_name.to_string(),
            valid: errors.is_empty(),
            errors: errors.iter().map(ToString::to_string).collect(),
        }),
    }
}
