use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Default number of trapezoid intervals per segment.
pub const DEFAULT_SAMPLES: usize = 1000;

// Concave level n uses t^k; convex level n uses t^(1/k).
const WEAK_EXPONENT: f64 = 2.0;
const MEDIUM_EXPONENT: f64 = 3.0;
const STRONG_EXPONENT: f64 = 4.0;
const SUPER_EXPONENT: f64 = 6.0;

/// The eleven interpolation shapes a gradient segment can follow.
///
/// Every shape is a monotone map `f: [0, 1] -> [0, 1]` from normalized segment time to
/// normalized composition change. Convex shapes front-load the change, concave shapes
/// back-load it, and the two step shapes jump at the first or last instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurveType {
    PreStep,
    WeakConvex,
    MediumConvex,
    StrongConvex,
    SuperConvex,
    #[default]
    Linear,
    WeakConcave,
    MediumConcave,
    StrongConcave,
    SuperConcave,
    PostStep,
}

impl CurveType {
    pub const ALL: [CurveType; 11] = [
        CurveType::PreStep,
        CurveType::WeakConvex,
        CurveType::MediumConvex,
        CurveType::StrongConvex,
        CurveType::SuperConvex,
        CurveType::Linear,
        CurveType::WeakConcave,
        CurveType::MediumConcave,
        CurveType::StrongConcave,
        CurveType::SuperConcave,
        CurveType::PostStep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CurveType::PreStep => "pre-step",
            CurveType::WeakConvex => "weak-convex",
            CurveType::MediumConvex => "medium-convex",
            CurveType::StrongConvex => "strong-convex",
            CurveType::SuperConvex => "ultra-convex",
            CurveType::Linear => "linear",
            CurveType::WeakConcave => "weak-concave",
            CurveType::MediumConcave => "medium-concave",
            CurveType::StrongConcave => "strong-concave",
            CurveType::SuperConcave => "ultra-concave",
            CurveType::PostStep => "post-step",
        }
    }

    /// Parses a curve name. Case and `_`/`-` are ignored; `super-*` is accepted for
    /// `ultra-*`, and the editor's `initial` marker reads as linear.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let curve = match normalized.as_str() {
            "pre-step" | "prestep" => CurveType::PreStep,
            "weak-convex" => CurveType::WeakConvex,
            "medium-convex" => CurveType::MediumConvex,
            "strong-convex" => CurveType::StrongConvex,
            "ultra-convex" | "super-convex" => CurveType::SuperConvex,
            "linear" | "initial" | "" => CurveType::Linear,
            "weak-concave" => CurveType::WeakConcave,
            "medium-concave" => CurveType::MediumConcave,
            "strong-concave" => CurveType::StrongConcave,
            "ultra-concave" | "super-concave" => CurveType::SuperConcave,
            "post-step" | "poststep" => CurveType::PostStep,
            _ => return None,
        };
        Some(curve)
    }

    /// Parses a curve name, falling back to [`CurveType::Linear`] for unknown names.
    pub fn parse_or_linear(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!("Unknown curve type '{}'; using linear.", name);
            CurveType::Linear
        })
    }

    /// The exponent `k` of `f(t) = t^k`, or `None` for the two step shapes.
    pub fn exponent(self) -> Option<f64> {
        match self {
            CurveType::PreStep | CurveType::PostStep => None,
            CurveType::Linear => Some(1.0),
            CurveType::WeakConcave => Some(WEAK_EXPONENT),
            CurveType::MediumConcave => Some(MEDIUM_EXPONENT),
            CurveType::StrongConcave => Some(STRONG_EXPONENT),
            CurveType::SuperConcave => Some(SUPER_EXPONENT),
            CurveType::WeakConvex => Some(WEAK_EXPONENT.recip()),
            CurveType::MediumConvex => Some(MEDIUM_EXPONENT.recip()),
            CurveType::StrongConvex => Some(STRONG_EXPONENT.recip()),
            CurveType::SuperConvex => Some(SUPER_EXPONENT.recip()),
        }
    }

    /// Shape value at normalized time `t`, clamped to `[0, 1]`.
    #[inline]
    pub fn shape(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            CurveType::PreStep => {
                if t > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            CurveType::PostStep => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            CurveType::Linear => t,
            other => match other.exponent() {
                Some(k) => t.powf(k),
                None => t,
            },
        }
    }

    /// Mean of the shape over `[0, 1]`.
    ///
    /// Step shapes are exact (1 for pre-step, 0 for post-step) and linear is exactly one
    /// half. Power shapes use the composite trapezoid rule over `samples` intervals.
    pub fn mean_fraction(self, samples: usize) -> f64 {
        match self {
            CurveType::PreStep => 1.0,
            CurveType::PostStep => 0.0,
            CurveType::Linear => 0.5,
            _ => trapezoid_mean(|t| self.shape(t), samples),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for CurveType {
    fn from(name: String) -> Self {
        CurveType::parse_or_linear(&name)
    }
}

impl From<CurveType> for String {
    fn from(curve: CurveType) -> Self {
        curve.name().to_string()
    }
}

/// Mean value of `f` over `[0, 1]` by the composite trapezoid rule.
#[inline]
pub fn trapezoid_mean<F>(f: F, samples: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = samples.max(1);
    let step = 1.0 / n as f64;
    let interior: f64 = (1..n).map(|i| f(i as f64 * step)).sum();
    (0.5 * (f(0.0) + f(1.0)) + interior) * step
}

/// One gradient segment of a single channel: the percentage at both ends, the duration in
/// minutes, and the shape followed in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub curve: CurveType,
}

impl Segment {
    pub fn new(start: f64, end: f64, duration: f64, curve: CurveType) -> Self {
        Self {
            start,
            end,
            duration,
            curve,
        }
    }

    /// Percentage at normalized position `t` within the segment.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.start + (self.end - self.start) * self.curve.shape(t)
    }

    /// Area under the percentage curve in percent·minutes.
    ///
    /// Zero, negative, or NaN durations contribute nothing.
    pub fn area(&self, samples: usize) -> f64 {
        if !(self.duration > 0.0) {
            return 0.0;
        }
        if self.start == self.end {
            return self.start * self.duration;
        }
        self.duration * (self.start + (self.end - self.start) * self.curve.mean_fraction(samples))
    }
}
