use crate::cli::SchemesArgs;
use crate::error::{CliError, Result};
use greenlc::core::scoring::weights::{self, CatalogEntry};
use std::fmt::Write as _;

const CATEGORIES: [&str; 5] = ["safety", "health", "environment", "stage", "final"];

fn select(category: Option<&str>) -> Result<Vec<CatalogEntry>> {
    let catalog = weights::catalog();
    let Some(category) = category else {
        return Ok(catalog);
    };
    let wanted = category.trim().to_ascii_lowercase();
    if !CATEGORIES.contains(&wanted.as_str()) {
        return Err(CliError::Argument(format!(
            "Unknown scheme category '{}'. Expected one of: {}.",
            category,
            CATEGORIES.join(", ")
        )));
    }
    Ok(catalog
        .into_iter()
        .filter(|entry| entry.category == wanted)
        .collect())
}

fn format_catalog(entries: &[CatalogEntry]) -> String {
    let mut out = String::new();
    let mut current = "";
    for entry in entries {
        if entry.category != current {
            current = entry.category;
            let _ = writeln!(out, "[{}]", current);
        }
        let weights = entry
            .weights
            .iter()
            .map(|(code, weight)| format!("{code}={weight}"))
            .collect::<Vec<_>>()
            .join(" ");
        let marker = if entry.is_default { " (default)" } else { "" };
        let _ = writeln!(out, "  {:<22} {}{}", entry.name, weights, marker);
    }
    out
}

pub fn run(args: SchemesArgs) -> Result<()> {
    let entries = select(args.category.as_deref())?;
    if args.json {
        let json =
            serde_json::to_string_pretty(&entries).map_err(|e| CliError::Other(e.into()))?;
        println!("{json}");
    } else {
        print!("{}", format_catalog(&entries));
    }
    Ok(())
}
