use crate::core::gradient::curve::CurveType;
use serde::{Deserialize, Serialize};

/// One row of a gradient program: the mobile-phase composition and flow at `time`.
///
/// When a document gives only one channel share the other is its complement to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StepRecord")]
pub struct GradientStep {
    /// Minutes since injection.
    pub time: f64,
    /// Channel A share, in percent.
    pub phase_a: f64,
    /// Channel B share, in percent.
    pub phase_b: f64,
    /// ml/min.
    pub flow_rate: f64,
    pub curve_type: CurveType,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StepRecord {
    time: f64,
    phase_a: Option<f64>,
    phase_b: Option<f64>,
    flow_rate: f64,
    #[serde(alias = "curve")]
    curve_type: CurveType,
}

impl From<StepRecord> for GradientStep {
    fn from(record: StepRecord) -> Self {
        let (phase_a, phase_b) = match (record.phase_a, record.phase_b) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => (a, 100.0 - a),
            (None, Some(b)) => (100.0 - b, b),
            (None, None) => (0.0, 100.0),
        };
        Self {
            time: record.time,
            phase_a,
            phase_b,
            flow_rate: record.flow_rate,
            curve_type: record.curve_type,
        }
    }
}

impl Default for GradientStep {
    fn default() -> Self {
        Self {
            time: 0.0,
            phase_a: 0.0,
            phase_b: 100.0,
            flow_rate: 0.0,
            curve_type: CurveType::Linear,
        }
    }
}

impl GradientStep {
    pub fn new(time: f64, phase_a: f64, phase_b: f64, flow_rate: f64, curve_type: CurveType) -> Self {
        Self {
            time,
            phase_a,
            phase_b,
            flow_rate,
            curve_type,
        }
    }
}

/// Persisted gradients come either as a bare step array or wrapped in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum GradientDocument {
    Steps(Vec<GradientStep>),
    Wrapped {
        #[serde(default)]
        steps: Vec<GradientStep>,
    },
}

impl From<GradientDocument> for GradientProgram {
    fn from(document: GradientDocument) -> Self {
        match document {
            GradientDocument::Steps(steps) | GradientDocument::Wrapped { steps } => Self { steps },
        }
    }
}

/// An ordered list of gradient steps. Segment `i` runs from `steps[i]` to `steps[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GradientDocument")]
pub struct GradientProgram {
    pub steps: Vec<GradientStep>,
}

impl GradientProgram {
    pub fn new(steps: Vec<GradientStep>) -> Self {
        Self { steps }
    }

    /// The last step's time, or 0 for an empty program.
    pub fn total_time(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.time)
    }

    /// Consecutive step pairs, one per segment.
    pub fn segments(&self) -> impl Iterator<Item = (&GradientStep, &GradientStep)> {
        self.steps.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
