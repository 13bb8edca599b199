//! Identifier parsing.

use anyhow::Result;
use armid::{ImportError, Importer};
use clap::Args;

use crate::error::CliError;
use crate::output::{print_output, print_single, OutputFormat};

use super::{field_rows, CommandContext, IdentityOutput};

/// Parse an identifier as a given resource type.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Resource type name (see `armid types`).
    resource_type: String,

    /// The identifier to parse.
    id: String,
}

impl ParseCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let importer = Importer::new(&ctx.registry);
        let identity = importer
            .import(&self.resource_type, &self.id)
            .map_err(|err| import_error(&ctx, &self.resource_type, err))?;

        match ctx.format {
            OutputFormat::Table => {
                println!("{}", identity);
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

fn import_error(ctx: &CommandContext, type_name: &str, err: ImportError) -> CliError {
    match err {
        ImportError::Parse { input, source } => CliError::Parse {
            type_name: type_name.to_string(),
            input,
            example: ctx
                .registry
                .get(type_name)
                .map(|schema| schema.example_id())
                .unwrap_or_default(),
            source,
        },
        ImportError::Registry(err) => CliError::Registry(err),
        other => CliError::Other(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use armid::{IdError, IdRegistry, RegistryError};

    use super::*;

    #[test]
    fn test_import_error_carries_example() {
        let ctx = CommandContext {
            registry: IdRegistry::builtin().unwrap(),
            format: OutputFormat::Table,
        };
        let err = Importer::new(&ctx.registry)
            .import("ResourceGroupId", "/subscriptions/")
            .unwrap_err();

        match import_error(&ctx, "ResourceGroupId", err) {
            CliError::Parse { example, source, .. } => {
                assert_eq!(
                    example,
                    "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group"
                );
                assert!(matches!(source, IdError::MissingSegmentValue { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_type_maps_to_registry_error() {
        let ctx = CommandContext {
            registry: IdRegistry::builtin().unwrap(),
            format: OutputFormat::Json,
        };
        let err = ParseCommand {
            resource_type: "NopeId".to_string(),
            id: "/subscriptions/sub1".to_string(),
        }
        .run(ctx)
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Registry(RegistryError::UnknownType(_)))
        ));
    }
}
