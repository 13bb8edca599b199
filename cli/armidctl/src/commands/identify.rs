//! Identifier classification.

use anyhow::Result;
use clap::Args;

use crate::error::CliError;
use crate::output::{print_info, print_output, print_single, OutputFormat};

use super::{field_rows, CommandContext, IdentityOutput};

/// Find which registered resource type an identifier belongs to.
#[derive(Debug, Args)]
pub struct IdentifyCommand {
    /// The identifier to classify.
    id: String,
}

impl IdentifyCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let identity = ctx.registry.identify(&self.id).map_err(CliError::from)?;

        match ctx.format {
            OutputFormat::Table => {
                print_info(&format!(
                    "{} ({})",
                    identity.type_name(),
                    ctx.registry
                        .get(identity.type_name())
                        .map(|schema| schema.display_name())
                        .unwrap_or_default()
                ));
                print_output(&field_rows(&identity.values()), ctx.format);
            }
            OutputFormat::Json => print_single(&IdentityOutput {
                type_name: identity.type_name().to_string(),
                id: identity.id(),
                fields: identity.values(),
            }),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use armid::{IdRegistry, RegistryError};

    use super::*;

    #[test]
    fn test_unmatched_identifier() {
        let ctx = CommandContext {
            registry: IdRegistry::builtin().unwrap(),
            format: OutputFormat::Json,
        };
        let err = IdentifyCommand {
            id: "/tenants/t1".to_string(),
        }
        .run(ctx)
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Registry(RegistryError::NoMatch(_)))
        ));
    }
}
