use crate::core::models::factor::FactorTable;
use crate::core::models::input::ScoringInput;
use crate::engine::combine::WeightedCombiner;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::result::ScoreReport;
use crate::engine::stage::StageAggregator;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Scores one method. Never fails: incomplete input yields zero-valued scores and a list of
/// skipped occurrences.
#[instrument(skip_all, name = "evaluate_workflow")]
pub fn run(input: &ScoringInput, config: &ScoringConfig, reporter: &ProgressReporter) -> ScoreReport {
    let table = input.factor_table();
    run_with_table(input, &table, config, reporter)
}

/// Like [`run`], but resolves reagent names against `table` instead of the document's own rows.
pub fn run_with_table(
    input: &ScoringInput,
    table: &FactorTable,
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> ScoreReport {
    let method = &input.method_configuration;

    let volumes = reporter.phase("Integrating gradient", || {
        config.volume_accumulator().accumulate(&input.gradient)
    });
    info!(
        "Gradient: {} segments, {:.4} ml (A {:.4} ml, B {:.4} ml) over {:.2} min.",
        volumes.segments.len(),
        volumes.total_volume,
        volumes.volume_a,
        volumes.volume_b,
        volumes.total_time
    );

    let calculator = config.contribution_calculator();
    let aggregator = StageAggregator::new(&calculator, table);
    let (preparation, instrument) = reporter.phase("Aggregating stages", || {
        reporter.report(Progress::TaskStart {
            total_steps: 2,
            unit: "stages",
        });
        let preparation = aggregator.preparation(method);
        reporter.report(Progress::TaskIncrement);
        let instrument = aggregator.instrument(method, &volumes);
        reporter.report(Progress::TaskIncrement);
        reporter.report(Progress::TaskFinish);
        (preparation, instrument)
    });

    let skipped = preparation.skipped.len() + instrument.skipped.len();
    if skipped > 0 {
        warn!("{} reagent occurrence(s) were skipped.", skipped);
        reporter.report(Progress::Message(format!(
            "{skipped} reagent occurrence(s) skipped"
        )));
    }

    let sample_count = method.effective_sample_count();
    if sample_count.is_none() {
        warn!("Sample count is missing or not positive; the total score is 0.");
    }

    let result = reporter.phase("Combining stages", || {
        WeightedCombiner::new(config).combine(
            &instrument,
            &preparation,
            &input.weighting_scheme,
            sample_count,
        )
    });

    let mut per_reagent_detail = preparation.contributions;
    per_reagent_detail.extend(instrument.contributions);
    let mut skipped = preparation.skipped;
    skipped.extend(instrument.skipped);

    ScoreReport {
        result,
        total_volume: volumes.total_volume,
        total_time: volumes.total_time,
        volume_a: volumes.volume_a,
        volume_b: volumes.volume_b,
        segments: volumes.segments,
        per_reagent_detail,
        skipped,
    }
}

/// Loads an input document from `path` and scores it.
pub fn run_from_path(
    path: &Path,
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> Result<ScoreReport, EngineError> {
    let input = ScoringInput::load(path)?;
    Ok(run(&input, config, reporter))
}
