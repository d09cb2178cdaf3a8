use crate::core::gradient::volume::SegmentVolume;
use crate::core::io::{DocumentError, read_json, write_json};
use crate::core::scoring::term::{FactorScores, SubFactorScores};
use crate::core::scoring::weights::FinalWeights;
use crate::engine::stage::{ReagentDetail, SkippedOccurrence};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MajorFactors {
    #[serde(rename = "S")]
    pub safety: f64,
    #[serde(rename = "H")]
    pub health: f64,
    #[serde(rename = "E")]
    pub environment: f64,
}

impl From<&FactorScores> for MajorFactors {
    fn from(factors: &FactorScores) -> Self {
        Self {
            safety: factors.safety,
            health: factors.health,
            environment: factors.environment,
        }
    }
}

/// Totals of one stage as they appear in the result document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageResult {
    pub sub_factors: SubFactorScores,
    pub major_factors: MajorFactors,
    /// Stage score under the configured stage scheme. Reporting only.
    pub stage_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergedResult {
    /// Stage sub-factor sums combined with the final scheme's stage shares.
    pub sub_factors: SubFactorScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalResult {
    /// `(S + H + E + R + D + P) / sampleCount`, or 0 without a positive sample count.
    pub score3: f64,
    pub factors: FactorScores,
    pub weights: FinalWeights,
}

impl Default for FinalResult {
    fn default() -> Self {
        Self {
            score3: 0.0,
            factors: FactorScores::default(),
            weights: FinalWeights {
                instrument: 0.0,
                preparation: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalFactors {
    #[serde(rename = "instrument_P")]
    pub instrument_p: f64,
    #[serde(rename = "instrument_R")]
    pub instrument_r: f64,
    #[serde(rename = "instrument_D")]
    pub instrument_d: f64,
    #[serde(rename = "pretreatment_P")]
    pub pretreatment_p: f64,
    #[serde(rename = "pretreatment_R")]
    pub pretreatment_r: f64,
    #[serde(rename = "pretreatment_D")]
    pub pretreatment_d: f64,
}

/// Names of the schemes a result was computed with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeNames {
    pub safety_scheme: String,
    pub health_scheme: String,
    pub environment_scheme: String,
    pub stage_scheme: String,
    pub final_scheme: String,
}

/// The score-result document. Always produced whole by one evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(default)]
    pub instrument: StageResult,
    #[serde(default)]
    pub preparation: StageResult,
    #[serde(default)]
    pub merged: MergedResult,
    #[serde(rename = "final")]
    pub final_score: FinalResult,
    #[serde(default)]
    pub additional_factors: AdditionalFactors,
    #[serde(default)]
    pub schemes: SchemeNames,
}

impl ScoreResult {
    /// The scalar used for ranking. Lower is greener.
    #[inline]
    pub fn total_score(&self) -> f64 {
        self.final_score.score3
    }

    #[inline]
    pub fn factors(&self) -> &FactorScores {
        &self.final_score.factors
    }
}

/// A [`ScoreResult`] together with the reporting detail of the evaluation that produced it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub total_volume: f64,
    pub total_time: f64,
    pub volume_a: f64,
    pub volume_b: f64,
    pub segments: Vec<SegmentVolume>,
    pub per_reagent_detail: Vec<ReagentDetail>,
    pub skipped: Vec<SkippedOccurrence>,
}

impl ScoreReport {
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        write_json(path, self)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        read_json(path)
    }
}
