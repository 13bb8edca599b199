//! Resource type listing.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::CommandContext;

/// List registered resource types.
#[derive(Debug, Args)]
pub struct TypesCommand {
    /// Show the path template instead of an example identifier.
    #[arg(long)]
    templates: bool,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    type_name: String,

    #[tabled(rename = "Name")]
    display_name: String,

    #[tabled(rename = "Example")]
    example: String,
}

impl TypesCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let rows: Vec<TypeRow> = ctx
            .registry
            .iter()
            .map(|schema| TypeRow {
                type_name: schema.type_name().to_string(),
                display_name: schema.display_name().to_string(),
                example: if self.templates {
                    schema.template()
                } else {
                    schema.example_id()
                },
            })
            .collect();

        print_output(&rows, ctx.format);
        Ok(())
    }
}
