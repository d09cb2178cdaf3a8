use super::config::ScoringConfig;
use super::result::{
    AdditionalFactors, FinalResult, MajorFactors, MergedResult, SchemeNames, ScoreResult,
    StageResult,
};
use super::stage::StageTotals;
use crate::core::scoring::term::{Factor, FactorScores};
use tracing::info;

/// Merges the two stage totals into the final weighted score.
pub struct WeightedCombiner<'a> {
    config: &'a ScoringConfig,
}

impl<'a> WeightedCombiner<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Combines `instrument` and `preparation` using the final scheme named `requested_scheme`
    /// (or the configured override). `sample_count` must already be filtered to positive values.
    pub fn combine(
        &self,
        instrument: &StageTotals,
        preparation: &StageTotals,
        requested_scheme: &str,
        sample_count: Option<u64>,
    ) -> ScoreResult {
        let final_scheme = self.config.final_scheme(requested_scheme);
        let weights = final_scheme.weights;
        let stage_weights = &self.config.weighting.stage.weights;

        let mut factors = FactorScores::default();
        for factor in Factor::ALL {
            factors.set(
                factor,
                weights.combine(instrument.factors.get(factor), preparation.factors.get(factor)),
            );
        }

        let score3 = match sample_count {
            Some(n) if n > 0 => factors.total() / n as f64,
            _ => 0.0,
        };
        info!(
            "Final score {:.4} under scheme '{}' (instrument {:.2}, preparation {:.2}).",
            score3, final_scheme.name, weights.instrument, weights.preparation
        );

        let merged = instrument
            .sub_factors
            .scaled(weights.instrument)
            + preparation.sub_factors.scaled(weights.preparation);

        let weighting = &self.config.weighting;
        ScoreResult {
            instrument: StageResult {
                sub_factors: instrument.sub_factors,
                major_factors: MajorFactors::from(&instrument.factors),
                stage_score: instrument.stage_score(stage_weights),
            },
            preparation: StageResult {
                sub_factors: preparation.sub_factors,
                major_factors: MajorFactors::from(&preparation.factors),
                stage_score: preparation.stage_score(stage_weights),
            },
            merged: MergedResult {
                sub_factors: merged,
            },
            final_score: FinalResult {
                score3,
                factors,
                weights,
            },
            additional_factors: AdditionalFactors {
                instrument_p: instrument.factors.power,
                instrument_r: instrument.factors.recyclability,
                instrument_d: instrument.factors.disposal,
                pretreatment_p: preparation.factors.power,
                pretreatment_r: preparation.factors.recyclability,
                pretreatment_d: preparation.factors.disposal,
            },
            schemes: SchemeNames {
                safety_scheme: weighting.safety.name.clone(),
                health_scheme: weighting.health.name.clone(),
                environment_scheme: weighting.environment.name.clone(),
                stage_scheme: weighting.stage.name.clone(),
                final_scheme: final_scheme.name,
            },
        }
    }
}
