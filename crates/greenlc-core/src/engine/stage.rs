use crate::core::gradient::volume::{GradientVolumes, distribute};
use crate::core::models::factor::FactorTable;
use crate::core::models::method::MethodConfiguration;
use crate::core::scoring::contribution::{ContributionCalculator, ReagentContribution, SkipReason};
use crate::core::scoring::term::{FactorScores, SubFactorScores};
use crate::core::scoring::weights::StageWeights;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Preparation,
    Instrument,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Preparation => f.write_str("sample preparation"),
            Stage::Instrument => f.write_str("instrument analysis"),
        }
    }
}

/// Where in the method a reagent occurrence was listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    PreTreatment,
    MobilePhaseA,
    MobilePhaseB,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReagentDetail {
    pub stage: Stage,
    pub origin: Origin,
    #[serde(flatten)]
    pub contribution: ReagentContribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedOccurrence {
    pub stage: Stage,
    pub origin: Origin,
    pub name: String,
    pub volume: f64,
    pub reason: SkipReason,
}

/// Unweighted sums of every scored occurrence in one stage, plus the stage's Power value.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTotals {
    pub stage: Stage,
    pub sub_factors: SubFactorScores,
    pub factors: FactorScores,
    pub contributions: Vec<ReagentDetail>,
    pub skipped: Vec<SkippedOccurrence>,
}

impl StageTotals {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            sub_factors: SubFactorScores::default(),
            factors: FactorScores::default(),
            contributions: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn add(
        &mut self,
        origin: Origin,
        outcome: Result<ReagentContribution, SkipReason>,
        name: &str,
        volume: f64,
    ) {
        match outcome {
            Ok(contribution) => {
                debug!(
                    "{}: {} {:.4} ml -> {:.4} g, S {:.3} H {:.3} E {:.3} R {:.3} D {:.3}",
                    self.stage,
                    contribution.name,
                    contribution.volume,
                    contribution.mass,
                    contribution.factors.safety,
                    contribution.factors.health,
                    contribution.factors.environment,
                    contribution.factors.recyclability,
                    contribution.factors.disposal
                );
                self.sub_factors += contribution.sub_factors;
                self.factors += contribution.factors;
                self.contributions.push(ReagentDetail {
                    stage: self.stage,
                    origin,
                    contribution,
                });
            }
            Err(reason) => {
                if reason == SkipReason::MissingReference {
                    warn!("Skipping '{}' in {}: {}.", name, self.stage, reason);
                } else {
                    debug!("Skipping '{}' in {}: {}.", name, self.stage, reason);
                }
                self.skipped.push(SkippedOccurrence {
                    stage: self.stage,
                    origin,
                    name: name.to_string(),
                    volume,
                    reason,
                });
            }
        }
    }

    /// Sets the method-level Power value. Power never derives from reagent mass.
    pub fn set_power(&mut self, power: f64) {
        self.factors.power = if power.is_finite() { power } else { 0.0 };
    }

    pub fn stage_score(&self, weights: &StageWeights) -> f64 {
        weights.apply(&self.factors)
    }
}

/// Scores the reagent occurrences of each stage against one factor table.
pub struct StageAggregator<'a> {
    calculator: &'a ContributionCalculator,
    table: &'a FactorTable,
}

impl<'a> StageAggregator<'a> {
    pub fn new(calculator: &'a ContributionCalculator, table: &'a FactorTable) -> Self {
        Self { calculator, table }
    }

    fn occurrence(&self, totals: &mut StageTotals, origin: Origin, name: &str, volume: f64) {
        let outcome = self.calculator.contribution(name, volume, self.table);
        totals.add(origin, outcome, name, volume);
    }

    /// Sums the pretreatment reagents.
    pub fn preparation(&self, method: &MethodConfiguration) -> StageTotals {
        let mut totals = StageTotals::new(Stage::Preparation);
        for reagent in &method.pre_treatment_reagents {
            self.occurrence(&mut totals, Origin::PreTreatment, &reagent.name, reagent.volume);
        }
        totals.set_power(method.power.preparation);
        totals
    }

    /// Sums the mobile-phase components, each scaled to its share of its channel volume.
    pub fn instrument(&self, method: &MethodConfiguration, volumes: &GradientVolumes) -> StageTotals {
        let mut totals = StageTotals::new(Stage::Instrument);
        let channels = [
            (Origin::MobilePhaseA, &method.mobile_phase_a, volumes.volume_a),
            (Origin::MobilePhaseB, &method.mobile_phase_b, volumes.volume_b),
        ];
        for (origin, components, channel_volume) in channels {
            for component in distribute(components, channel_volume) {
                self.occurrence(&mut totals, origin, &component.name, component.volume);
            }
        }
        totals.set_power(method.power.instrument);
        totals
    }
}
