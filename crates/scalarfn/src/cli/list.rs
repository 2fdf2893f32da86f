//! List the built-in functions

use anyhow::{bail, Result};
use scalarfn_eval::{FunctionDefinition, FunctionRegistry};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FunctionRow {
    #[tabled(rename = "Function")]
    name: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Aliases")]
    aliases: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&FunctionDefinition> for FunctionRow {
    fn from(definition: &FunctionDefinition) -> Self {
        Self {
            name: definition.name.to_string(),
            usage: definition.usage(),
            aliases: definition.aliases.join(", "),
            description: definition.description.to_string(),
        }
    }
}

/// Render a table of functions whose name contains `filter`
pub fn list(filter: Option<&str>) -> Result<String> {
    let filter = filter.map(str::to_ascii_lowercase);
    let rows: Vec<FunctionRow> = FunctionRegistry::global()
        .definitions()
        .filter(|definition| {
            filter
                .as_deref()
                .is_none_or(|needle| definition.name.contains(needle))
        })
        .map(FunctionRow::from)
        .collect();

    if rows.is_empty() {
        bail!("No function matches {}", filter.unwrap_or_default());
    }
    Ok(Table::new(rows).with(Style::modern()).to_string())
}
