//! Identifier construction from segment values.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Build an identifier from segment values.
#[derive(Debug, Args)]
pub struct FormatCommand {
    /// Resource type name (see `armid types`).
    resource_type: String,

    /// Segment value as name=value; repeat for each segment.
    #[arg(long = "value", value_name = "NAME=VALUE")]
    values: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FormatOutput {
    #[serde(rename = "type")]
    type_name: String,
    id: String,
}

impl FormatCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let values = parse_value_pairs(&self.values)?;
        let identity = ctx
            .registry
            .build(&self.resource_type, &values)
            .map_err(CliError::from)?;

        match ctx.format {
            OutputFormat::Table => println!("{}", identity.id()),
            OutputFormat::Json => print_single(&FormatOutput {
                type_name: identity.type_name().to_string(),
                id: identity.id(),
            }),
        }

        Ok(())
    }
}

/// Splits `name=value` pairs on the first `=`; later duplicates win.
fn parse_value_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>, CliError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => Err(CliError::ValuePair(pair.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use armid::{IdError, IdRegistry, RegistryError};

    use super::*;

    #[test]
    fn test_parse_value_pairs() {
        let values = parse_value_pairs(&[
            "subscriptionId=sub1".to_string(),
            "scope=/providers/Microsoft.Management/managementGroups/g=1".to_string(),
        ])
        .unwrap();
        assert_eq!(values["subscriptionId"], "sub1");
        assert_eq!(
            values["scope"],
            "/providers/Microsoft.Management/managementGroups/g=1"
        );

        assert!(matches!(
            parse_value_pairs(&["noequals".to_string()]),
            Err(CliError::ValuePair(_))
        ));
        assert!(matches!(
            parse_value_pairs(&["=value".to_string()]),
            Err(CliError::ValuePair(_))
        ));
    }

    #[test]
    fn test_missing_value_is_reported() {
        let ctx = CommandContext {
            registry: IdRegistry::builtin().unwrap(),
            format: OutputFormat::Table,
        };
        let err = FormatCommand {
            resource_type: "ResourceGroupId".to_string(),
            values: vec!["subscriptionId=sub1".to_string()],
        }
        .run(ctx)
        .unwrap_err();
        let registry_err = match err.downcast_ref::<CliError>() {
            Some(CliError::Registry(err)) => err,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(
            registry_err,
            &RegistryError::Id(IdError::MissingSegmentValue {
                segment: "resourceGroupName".to_string()
            })
        );
    }
}
