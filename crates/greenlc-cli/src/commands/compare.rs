use super::factor_table;
use crate::cli::CompareArgs;
use crate::config::PartialScoringConfig;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use greenlc::core::io::write_json;
use greenlc::core::scoring::term::Factor;
use greenlc::engine::compare::{Comparison, TaggedResult};
use greenlc::engine::progress::{Progress, ProgressReporter};
use greenlc::workflows::compare::{ComparisonSource, load_source};
use greenlc::workflows::{self, evaluate};
use rayon::prelude::*;
use std::fmt::Write as _;
use tracing::info;

pub fn run(args: CompareArgs) -> Result<()> {
    let config = PartialScoringConfig::resolve(&args.scoring)?;

    let mut sources = Vec::with_capacity(args.entries.len());
    for entry in &args.entries {
        let (label, path) =
            parser::parse_labeled_path(entry).map_err(|e| CliError::Argument(e.to_string()))?;
        info!("Loading '{}' from {:?}", label, path);
        sources.push((label, load_source(&path)?));
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let quiet = ProgressReporter::new();

    let tagged = reporter.phase("Evaluating methods", || {
        reporter.report(Progress::TaskStart {
            total_steps: sources.len() as u64,
            unit: "methods",
        });
        let tagged = sources
            .into_par_iter()
            .map(|(label, source)| -> Result<TaggedResult> {
                let result = match source {
                    ComparisonSource::Result(result) => *result,
                    ComparisonSource::Input(input) => {
                        let table = factor_table(&input, &args.scoring)?;
                        evaluate::run_with_table(&input, &table, &config, &quiet).result
                    }
                };
                reporter.report(Progress::Message(format!(
                    "{label}: total score {:.4}",
                    result.total_score()
                )));
                reporter.report(Progress::TaskIncrement);
                Ok(TaggedResult::new(label, result))
            })
            .collect::<Result<Vec<_>>>();
        reporter.report(Progress::TaskFinish);
        tagged
    })?;

    let comparison = workflows::compare::run(&tagged, &reporter);
    print!("{}", format_ranking(&comparison));

    if let Some(path) = &args.output {
        write_json(path, &comparison)?;
        info!("Comparison written to {:?}", path);
        println!("Comparison written to {}", path.display());
    }
    Ok(())
}

fn format_ranking(comparison: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<24} {:>12}", "Rank", "Method", "Total");
    for entry in &comparison.ranking {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:>12.4}",
            entry.rank, entry.label, entry.total_score
        );
    }
    if !comparison.best.is_empty() {
        let _ = writeln!(out, "Best per factor:");
        for factor in Factor::ALL {
            if let Some(best) = comparison.best.get(&factor) {
                let _ = writeln!(out, "  {} {} ({:.4})", factor, best.label, best.value);
            }
        }
    }
    match &comparison.recommendation {
        Some(best) => {
            let _ = writeln!(out, "Recommended: {}", best.label);
        }
        None => {
            let _ = writeln!(out, "Nothing to compare.");
        }
    }
    out
}
