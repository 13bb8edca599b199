//! CLI commands.

mod format;
mod identify;
mod parse;
mod types;
mod validate;

use std::path::PathBuf;

use anyhow::Result;
use armid::{IdRegistry, ParsedId};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::config::{load_registry, Config};
use crate::output::OutputFormat;

/// armid - Parse, validate, and format Azure Resource Manager identifiers.
#[derive(Debug, Parser)]
#[command(name = "armid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Schema definitions file with additional resource types.
    #[arg(long, global = true, env = "ARMID_DEFINITIONS")]
    definitions: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, env = "ARMID_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List registered resource types.
    Types(types::TypesCommand),

    /// Parse an identifier and show its segment values.
    Parse(parse::ParseCommand),

    /// Validate an identifier; exits non-zero when invalid.
    Validate(validate::ValidateCommand),

    /// Build an identifier from segment values.
    Format(format::FormatCommand),

    /// Find the registered type an identifier belongs to.
    Identify(identify::IdentifyCommand),
}

impl Cli {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let config = Config::load()?;
        let definitions = config.definitions_path(self.definitions.as_deref())?;
        let registry = load_registry(definitions.as_deref())?;

        let ctx = CommandContext {
            registry,
            format: self.format,
        };

        match self.command {
            Commands::Types(cmd) => cmd.run(ctx),
            Commands::Parse(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Format(cmd) => cmd.run(ctx),
            Commands::Identify(cmd) => cmd.run(ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub registry: IdRegistry,
    pub format: OutputFormat,
}

/// One segment value of a parsed identifier.
#[derive(Debug, Clone, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Segment")]
    segment: String,

    #[tabled(rename = "Value")]
    value: String,
}

fn field_rows(values: &ParsedId) -> Vec<FieldRow> {
    values
        .iter()
        .map(|(segment, value)| FieldRow {
            segment: segment.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// JSON shape shared by commands that print an identity.
#[derive(Debug, Serialize)]
struct IdentityOutput {
    #[serde(rename = "type")]
    type_name: String,
    id: String,
    fields: ParsedId,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "armid",
            "--format",
            "json",
            "--log-level",
            "debug",
            "types",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_level(), "debug");
        assert!(matches!(cli.command, Commands::Types(_)));
    }

    #[test]
    fn test_field_rows_keep_declaration_order() {
        let values = IdRegistry::builtin()
            .unwrap()
            .parse_values("ResourceGroupId", "/subscriptions/sub1/resourceGroups/rg1")
            .unwrap();
        let rows = field_rows(&values);
        assert_eq!(rows[0].segment, "subscriptionId");
        assert_eq!(rows[1].value, "rg1");
    }
}
