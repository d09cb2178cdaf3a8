use crate::cli::ReagentsArgs;
use crate::error::{CliError, Result};
use greenlc::core::models::factor::{FactorTable, ReagentFactor, ReagentTotals};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReagentRow<'a> {
    #[serde(flatten)]
    factor: &'a ReagentFactor,
    #[serde(flatten)]
    totals: ReagentTotals,
}

fn load(args: &ReagentsArgs) -> Result<FactorTable> {
    Ok(match (&args.factors, &args.profiles) {
        (Some(path), _) => FactorTable::load(path)?,
        (None, Some(path)) => FactorTable::load_profiles(path)?,
        (None, None) => FactorTable::builtin(),
    })
}

fn format_table(table: &FactorTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:>8} {:>8} {:>8} {:>8}",
        "Reagent", "Density", "S", "H", "E"
    );
    for factor in table.iter() {
        let totals = factor.totals();
        let _ = writeln!(
            out,
            "{:<32} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            factor.name, factor.density, totals.safety_score, totals.health_score, totals.env_score
        );
    }
    let _ = writeln!(out, "{} reagent(s)", table.len());
    out
}

pub fn run(args: ReagentsArgs) -> Result<()> {
    let table = load(&args)?;
    if args.json {
        let rows: Vec<_> = table
            .iter()
            .map(|factor| ReagentRow {
                factor,
                totals: factor.totals(),
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows).map_err(|e| CliError::Other(e.into()))?;
        println!("{json}");
    } else {
        print!("{}", format_table(&table));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn reagents_args(extra: &[&str]) -> ReagentsArgs {
        let mut argv = vec!["greenlc", "reagents"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Reagents(args) => args,
            other => panic!("Expected 'reagents' subcommand, got {other:?}"),
        }
    }

    #[test]
    fn builtin_listing_shows_every_row_with_totals() {
        let table = load(&reagents_args(&[])).unwrap();
        let text = format_table(&table);
        assert!(text.ends_with(&format!("{} reagent(s)\n", table.len())));
        let acetone = text.lines().find(|l| l.starts_with("Acetone ")).unwrap();
        assert!(acetone.contains("1.995"));
        assert!(acetone.contains("0.810"));
    }

    #[test]
    fn profiles_are_derived_before_listing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lab.json");
        fs::write(
            &path,
            r#"[{
                "name": "Buffer",
                "density": 1.05,
                "volatility": {"kind": "involatile"},
                "fire": "non-combustible",
                "acuteToxicity": {"kind": "unknown"},
                "irritation": {"kind": "moderate-ph"},
                "chronicToxicity": {"kind": "exempt"},
                "persistency": {"kind": "inorganic"},
                "waterHazard": {"kind": "inorganic-salt"}
            }]"#,
        )
        .unwrap();

        let table = load(&reagents_args(&["--profiles", path.to_str().unwrap()])).unwrap();
        let buffer = table.get("Buffer").unwrap();
        assert_eq!(buffer.totals().health_score, 0.625);
        assert_eq!(buffer.totals().safety_score, 0.0);

        let row = ReagentRow {
            factor: buffer,
            totals: buffer.totals(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["name"], "Buffer");
        assert_eq!(json["healthScore"], 0.625);
    }

    #[test]
    fn missing_factor_file_is_a_document_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        let result = run(reagents_args(&["--factors", missing.to_str().unwrap()]));
        assert!(matches!(result, Err(CliError::Document(_))));
    }
}
