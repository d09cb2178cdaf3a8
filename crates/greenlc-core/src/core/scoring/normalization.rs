use serde::{Deserialize, Serialize};

/// Upper bound of every normalized sub-score.
pub const MAX_SCORE: f64 = 100.0;

/// The logarithmic law that maps `mass × factor` onto `[0, 100]`:
///
/// `score = min(100, scale × log10(1 + multiplier × mass × factor))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizationLaw {
    pub scale: f64,
    pub multiplier: f64,
}

impl NormalizationLaw {
    /// Law applied to the nine Safety, Health, and Environment sub-factors.
    pub const HAZARD: Self = Self {
        scale: 33.3,
        multiplier: 1.0,
    };

    /// The steeper recyclability/disposal law used by the scoring backend.
    pub const LIFECYCLE_BACKEND: Self = Self {
        scale: 45.0,
        multiplier: 14.0,
    };

    pub const fn new(scale: f64, multiplier: f64) -> Self {
        Self { scale, multiplier }
    }

    /// Normalized score for `mass` grams of a reagent whose sub-factor value is `factor`.
    ///
    /// Returns 0 unless both `mass` and `factor` are positive.
    #[inline]
    pub fn apply(&self, mass: f64, factor: f64) -> f64 {
        if !(mass > 0.0 && factor > 0.0) {
            return 0.0;
        }
        (self.scale * (1.0 + self.multiplier * mass * factor).log10()).clamp(0.0, MAX_SCORE)
    }

    pub fn is_valid(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0 && self.multiplier.is_finite() && self.multiplier > 0.0
    }
}

impl Default for NormalizationLaw {
    fn default() -> Self {
        Self::HAZARD
    }
}
