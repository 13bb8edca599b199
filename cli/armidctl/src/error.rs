//! Error handling and display for the CLI.

use armid::{IdError, RegistryError};
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("'{input}' is not a valid {type_name}: {source}")]
    Parse {
        type_name: String,
        input: String,
        example: String,
        #[source]
        source: IdError,
    },

    #[error("{count} validation error(s) for {type_name}")]
    Invalid { type_name: String, count: usize },

    #[error("Invalid --value '{0}': expected name=value")]
    ValuePair(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::Parse { example, source, .. } => {
                if matches!(source, IdError::CaseFoldedValue { .. }) {
                    eprintln!(
                        "\n{}",
                        "Hint: Use the identifier as the service returned it, without upper-casing it."
                            .yellow()
                    );
                }
                eprintln!("\nExpected an identifier like: {}", example);
            }
            CliError::Registry(RegistryError::UnknownType(_)) => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `armid types` to list the registered resource types.".yellow()
                );
            }
            CliError::Registry(RegistryError::NoMatch(_)) => {
                eprintln!(
                    "\n{}",
                    "Hint: Register the shape with --definitions to identify it.".yellow()
                );
            }
            CliError::ValuePair(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Pass each segment as --value subscriptionId=<id>.".yellow()
                );
            }
            _ => {}
        }
    }
}
