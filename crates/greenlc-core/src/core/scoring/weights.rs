use super::term::{FactorScores, SubFactorScores};
use phf::{OrderedMap, phf_ordered_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Allowed deviation of a weight set's sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Name reported for weights that do not come from a catalog.
pub const CUSTOM_SCHEME: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SafetyWeights {
    #[serde(rename = "S1")]
    pub s1: f64,
    #[serde(rename = "S2")]
    pub s2: f64,
    #[serde(rename = "S3")]
    pub s3: f64,
    #[serde(rename = "S4")]
    pub s4: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthWeights {
    #[serde(rename = "H1")]
    pub h1: f64,
    #[serde(rename = "H2")]
    pub h2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentWeights {
    #[serde(rename = "E1")]
    pub e1: f64,
    #[serde(rename = "E2")]
    pub e2: f64,
    #[serde(rename = "E3")]
    pub e3: f64,
}

/// Weights of the six primary factors inside a stage score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageWeights {
    #[serde(rename = "S")]
    pub s: f64,
    #[serde(rename = "H")]
    pub h: f64,
    #[serde(rename = "E")]
    pub e: f64,
    #[serde(rename = "R")]
    pub r: f64,
    #[serde(rename = "D")]
    pub d: f64,
    #[serde(rename = "P")]
    pub p: f64,
}

/// Instrument and preparation shares of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinalWeights {
    pub instrument: f64,
    pub preparation: f64,
}

static SAFETY_SCHEMES: OrderedMap<&'static str, SafetyWeights> = phf_ordered_map! {
    "PBT_Balanced" => SafetyWeights { s1: 0.25, s2: 0.25, s3: 0.25, s4: 0.25 },
    "Frontier_Focus" => SafetyWeights { s1: 0.10, s2: 0.60, s3: 0.15, s4: 0.15 },
    "Personnel_Exposure" => SafetyWeights { s1: 0.10, s2: 0.20, s3: 0.20, s4: 0.50 },
    "Material_Transport" => SafetyWeights { s1: 0.50, s2: 0.20, s3: 0.20, s4: 0.10 },
};

static HEALTH_SCHEMES: OrderedMap<&'static str, HealthWeights> = phf_ordered_map! {
    "Absolute_Balance" => HealthWeights { h1: 0.50, h2: 0.50 },
    "Occupational_Exposure" => HealthWeights { h1: 0.70, h2: 0.30 },
    "Operation_Protection" => HealthWeights { h1: 0.30, h2: 0.70 },
    "Strict_Compliance" => HealthWeights { h1: 0.90, h2: 0.10 },
};

static ENVIRONMENT_SCHEMES: OrderedMap<&'static str, EnvironmentWeights> = phf_ordered_map! {
    "PBT_Balanced" => EnvironmentWeights { e1: 0.334, e2: 0.333, e3: 0.333 },
    "Emission_Compliance" => EnvironmentWeights { e1: 0.10, e2: 0.80, e3: 0.10 },
    "Deep_Impact" => EnvironmentWeights { e1: 0.10, e2: 0.10, e3: 0.80 },
    "Degradation_Priority" => EnvironmentWeights { e1: 0.70, e2: 0.15, e3: 0.15 },
};

static STAGE_SCHEMES: OrderedMap<&'static str, StageWeights> = phf_ordered_map! {
    "Balanced" => StageWeights { s: 0.18, h: 0.18, e: 0.18, r: 0.18, d: 0.18, p: 0.10 },
    "Safety_First" => StageWeights { s: 0.30, h: 0.30, e: 0.10, r: 0.10, d: 0.10, p: 0.10 },
    "Eco_Friendly" => StageWeights { s: 0.10, h: 0.10, e: 0.30, r: 0.25, d: 0.15, p: 0.10 },
    "Energy_Efficient" => StageWeights { s: 0.10, h: 0.10, e: 0.15, r: 0.15, d: 0.10, p: 0.40 },
};

static FINAL_SCHEMES: OrderedMap<&'static str, FinalWeights> = phf_ordered_map! {
    "Standard" => FinalWeights { instrument: 0.6, preparation: 0.4 },
    "Complex_Prep" => FinalWeights { instrument: 0.3, preparation: 0.7 },
    "Direct_Online" => FinalWeights { instrument: 0.8, preparation: 0.2 },
    "Equal" => FinalWeights { instrument: 0.5, preparation: 0.5 },
};

/// A family of named weight vectors with a default member.
pub trait WeightSet: Copy + fmt::Debug + 'static {
    const CATEGORY: &'static str;
    const DEFAULT_SCHEME: &'static str;
    const DEFAULT: Self;

    fn catalog() -> &'static OrderedMap<&'static str, Self>;

    /// `(code, weight)` pairs in canonical order.
    fn components(&self) -> Vec<(&'static str, f64)>;

    fn total(&self) -> f64 {
        self.components().iter().map(|(_, w)| w).sum()
    }

    /// Every weight is a finite non-negative number and the weights sum to 1.
    fn is_normalized(&self) -> bool {
        self.components()
            .iter()
            .all(|(_, w)| w.is_finite() && *w >= 0.0)
            && (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Looks up a catalog scheme, first exactly and then ignoring ASCII case.
    fn named(name: &str) -> Option<Scheme<Self>> {
        let catalog = Self::catalog();
        let name = name.trim();
        catalog
            .get_entry(name)
            .or_else(|| catalog.entries().find(|(k, _)| k.eq_ignore_ascii_case(name)))
            .map(|(&k, &w)| Scheme::new(k, w))
    }

    fn default_scheme() -> Scheme<Self> {
        Scheme::new(Self::DEFAULT_SCHEME, Self::DEFAULT)
    }

    /// Looks up `name`, falling back to the default scheme with a warning.
    fn resolve(name: &str) -> Scheme<Self> {
        Self::named(name).unwrap_or_else(|| {
            let fallback = Self::default_scheme();
            warn!(
                "Unknown {} weighting scheme '{}'; using '{}'.",
                Self::CATEGORY,
                name,
                fallback.name
            );
            fallback
        })
    }
}

impl WeightSet for SafetyWeights {
    const CATEGORY: &'static str = "safety";
    const DEFAULT_SCHEME: &'static str = "PBT_Balanced";
    const DEFAULT: Self = SafetyWeights { s1: 0.25, s2: 0.25, s3: 0.25, s4: 0.25 };

    fn catalog() -> &'static OrderedMap<&'static str, Self> {
        &SAFETY_SCHEMES
    }

    fn components(&self) -> Vec<(&'static str, f64)> {
        vec![("S1", self.s1), ("S2", self.s2), ("S3", self.s3), ("S4", self.s4)]
    }
}

impl WeightSet for HealthWeights {
    const CATEGORY: &'static str = "health";
    const DEFAULT_SCHEME: &'static str = "Absolute_Balance";
    const DEFAULT: Self = HealthWeights { h1: 0.50, h2: 0.50 };

    fn catalog() -> &'static OrderedMap<&'static str, Self> {
        &HEALTH_SCHEMES
    }

    fn components(&self) -> Vec<(&'static str, f64)> {
        vec![("H1", self.h1), ("H2", self.h2)]
    }
}

impl WeightSet for EnvironmentWeights {
    const CATEGORY: &'static str = "environment";
    const DEFAULT_SCHEME: &'static str = "PBT_Balanced";
    const DEFAULT: Self = EnvironmentWeights { e1: 0.334, e2: 0.333, e3: 0.333 };

    fn catalog() -> &'static OrderedMap<&'static str, Self> {
        &ENVIRONMENT_SCHEMES
    }

    fn components(&self) -> Vec<(&'static str, f64)> {
        vec![("E1", self.e1), ("E2", self.e2), ("E3", self.e3)]
    }
}

impl WeightSet for StageWeights {
    const CATEGORY: &'static str = "stage";
    const DEFAULT_SCHEME: &'static str = "Balanced";
    const DEFAULT: Self = StageWeights { s: 0.18, h: 0.18, e: 0.18, r: 0.18, d: 0.18, p: 0.10 };

    fn catalog() -> &'static OrderedMap<&'static str, Self> {
        &STAGE_SCHEMES
    }

    fn components(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("S", self.s),
            ("H", self.h),
            ("E", self.e),
            ("R", self.r),
            ("D", self.d),
            ("P", self.p),
        ]
    }
}

impl WeightSet for FinalWeights {
    const CATEGORY: &'static str = "final";
    const DEFAULT_SCHEME: &'static str = "Standard";
    const DEFAULT: Self = FinalWeights { instrument: 0.6, preparation: 0.4 };

    fn catalog() -> &'static OrderedMap<&'static str, Self> {
        &FINAL_SCHEMES
    }

    fn components(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("instrument", self.instrument),
            ("preparation", self.preparation),
        ]
    }
}

impl SafetyWeights {
    #[inline]
    pub fn apply(&self, scores: &SubFactorScores) -> f64 {
        self.s1 * scores.s1 + self.s2 * scores.s2 + self.s3 * scores.s3 + self.s4 * scores.s4
    }
}

impl HealthWeights {
    #[inline]
    pub fn apply(&self, scores: &SubFactorScores) -> f64 {
        self.h1 * scores.h1 + self.h2 * scores.h2
    }
}

impl EnvironmentWeights {
    #[inline]
    pub fn apply(&self, scores: &SubFactorScores) -> f64 {
        self.e1 * scores.e1 + self.e2 * scores.e2 + self.e3 * scores.e3
    }
}

impl StageWeights {
    pub fn as_factor_scores(&self) -> FactorScores {
        FactorScores::new(self.s, self.h, self.e, self.r, self.d, self.p)
    }

    #[inline]
    pub fn apply(&self, values: &FactorScores) -> f64 {
        values.weighted_sum(&self.as_factor_scores())
    }
}

impl FinalWeights {
    #[inline]
    pub fn combine(&self, instrument: f64, preparation: f64) -> f64 {
        self.instrument * instrument + self.preparation * preparation
    }
}

/// A weight set together with the name it was selected by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme<W> {
    pub name: String,
    pub weights: W,
}

impl<W: WeightSet> Scheme<W> {
    pub fn new(name: impl Into<String>, weights: W) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    pub fn custom(weights: W) -> Self {
        Self::new(CUSTOM_SCHEME, weights)
    }
}

impl<W: WeightSet> Default for Scheme<W> {
    fn default() -> Self {
        W::default_scheme()
    }
}

/// The three sub-factor schemes that roll nine normalized sub-scores into S, H and E.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubFactorWeighting {
    pub safety: Scheme<SafetyWeights>,
    pub health: Scheme<HealthWeights>,
    pub environment: Scheme<EnvironmentWeights>,
}

impl SubFactorWeighting {
    /// Returns `(S, H, E)` for a set of normalized sub-scores.
    #[inline]
    pub fn primary(&self, scores: &SubFactorScores) -> (f64, f64, f64) {
        (
            self.safety.weights.apply(scores),
            self.health.weights.apply(scores),
            self.environment.weights.apply(scores),
        )
    }
}

/// One catalog scheme, flattened for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub category: &'static str,
    pub name: &'static str,
    pub is_default: bool,
    pub weights: Vec<(&'static str, f64)>,
}

fn entries_of<W: WeightSet>() -> impl Iterator<Item = CatalogEntry> {
    W::catalog().entries().map(|(&name, weights)| CatalogEntry {
        category: W::CATEGORY,
        name,
        is_default: name == W::DEFAULT_SCHEME,
        weights: weights.components(),
    })
}

/// Every built-in scheme of every category, in catalog order.
pub fn catalog() -> Vec<CatalogEntry> {
    entries_of::<SafetyWeights>()
        .chain(entries_of::<HealthWeights>())
        .chain(entries_of::<EnvironmentWeights>())
        .chain(entries_of::<StageWeights>())
        .chain(entries_of::<FinalWeights>())
        .collect()
}
