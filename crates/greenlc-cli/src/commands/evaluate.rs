use super::factor_table;
use crate::cli::EvaluateArgs;
use crate::config::PartialScoringConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use greenlc::core::models::input::ScoringInput;
use greenlc::core::scoring::term::Factor;
use greenlc::engine::progress::ProgressReporter;
use greenlc::engine::result::ScoreReport;
use greenlc::workflows;
use std::fmt::Write as _;
use tracing::info;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let config = PartialScoringConfig::resolve(&args.scoring)?;

    info!("Loading input document from {:?}", &args.input);
    let input = ScoringInput::load(&args.input)?;
    let table = factor_table(&input, &args.scoring)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the evaluation workflow...");
    let report = workflows::evaluate::run_with_table(&input, &table, &config, &reporter);

    match &args.output {
        Some(path) => {
            report.save(path)?;
            info!("Report written to {:?}", path);
            println!("Report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Other(e.into()))?;
            println!("{json}");
        }
    }

    if args.summary {
        print!("{}", format_summary(&report));
    }
    Ok(())
}

fn format_summary(report: &ScoreReport) -> String {
    let result = &report.result;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Gradient: {:.3} ml over {:.2} min (A {:.3} ml, B {:.3} ml)",
        report.total_volume, report.total_time, report.volume_a, report.volume_b
    );
    let _ = writeln!(
        out,
        "Schemes: final '{}', stage '{}'",
        result.schemes.final_scheme, result.schemes.stage_scheme
    );
    let _ = writeln!(
        out,
        "{:<8} {:>12} {:>12} {:>12}",
        "Factor", "Instrument", "Preparation", "Final"
    );
    let _ = writeln!(
        out,
        "{:<8} {:>12.4} {:>12.4} {:>12.4}",
        Factor::Safety.code(),
        result.instrument.major_factors.safety,
        result.preparation.major_factors.safety,
        result.factors().safety
    );
    let _ = writeln!(
        out,
        "{:<8} {:>12.4} {:>12.4} {:>12.4}",
        Factor::Health.code(),
        result.instrument.major_factors.health,
        result.preparation.major_factors.health,
        result.factors().health
    );
    let _ = writeln!(
        out,
        "{:<8} {:>12.4} {:>12.4} {:>12.4}",
        Factor::Environment.code(),
        result.instrument.major_factors.environment,
        result.preparation.major_factors.environment,
        result.factors().environment
    );
    let extra = &result.additional_factors;
    for (factor, instrument, preparation) in [
        (Factor::Recyclability, extra.instrument_r, extra.pretreatment_r),
        (Factor::Disposal, extra.instrument_d, extra.pretreatment_d),
        (Factor::Power, extra.instrument_p, extra.pretreatment_p),
    ] {
        let _ = writeln!(
            out,
            "{:<8} {:>12.4} {:>12.4} {:>12.4}",
            factor.code(),
            instrument,
            preparation,
            result.factors().get(factor)
        );
    }
    let _ = writeln!(
        out,
        "Stage scores: instrument {:.4}, preparation {:.4}",
        result.instrument.stage_score, result.preparation.stage_score
    );
    let _ = writeln!(out, "Total score: {:.4}", result.total_score());
    if !report.skipped.is_empty() {
        let _ = writeln!(out, "Skipped occurrences: {}", report.skipped.len());
    }
    out
}
