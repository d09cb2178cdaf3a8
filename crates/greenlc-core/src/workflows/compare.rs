use crate::core::io::{DocumentError, read_json};
use crate::core::models::input::ScoringInput;
use crate::engine::compare::{Comparison, TaggedResult};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::result::ScoreResult;
use std::path::Path;
use tracing::{info, instrument};

/// A document that can take part in a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonSource {
    /// An already computed score result or report.
    Result(Box<ScoreResult>),
    /// An input document that still has to be evaluated.
    Input(Box<ScoringInput>),
}

/// Reads `path` as a score result when it carries a `final` section, otherwise as an input
/// document.
pub fn load_source(path: &Path) -> Result<ComparisonSource, DocumentError> {
    let value: serde_json::Value = read_json(path)?;
    let json_err = |e| DocumentError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    if value.get("final").is_some() {
        let result = serde_json::from_value(value).map_err(json_err)?;
        Ok(ComparisonSource::Result(Box::new(result)))
    } else {
        let input = serde_json::from_value(value).map_err(json_err)?;
        Ok(ComparisonSource::Input(Box::new(input)))
    }
}

#[instrument(skip_all, name = "compare_workflow")]
pub fn run(entries: &[TaggedResult], reporter: &ProgressReporter) -> Comparison {
    let comparison = reporter.phase("Comparing results", || Comparison::build(entries));
    match &comparison.recommendation {
        Some(best) => {
            info!(
                "Compared {} result(s); recommended '{}' (total score {:.4}).",
                entries.len(),
                best.label,
                best.total_score
            );
            reporter.report(Progress::Message(format!("Recommended: {}", best.label)));
        }
        None => info!("No results to compare."),
    }
    comparison
}
