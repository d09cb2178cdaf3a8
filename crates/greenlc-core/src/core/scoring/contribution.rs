use super::normalization::NormalizationLaw;
use super::term::{FactorScores, SubFactorScores};
use super::weights::SubFactorWeighting;
use crate::core::models::factor::{FactorTable, ReagentFactor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a reagent occurrence was left out of a stage total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    EmptyName,
    MissingReference,
    NonPositiveVolume,
    NonPositiveMass,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::EmptyName => "reagent name is empty",
            SkipReason::MissingReference => "no factor row with this name",
            SkipReason::NonPositiveVolume => "volume is not positive",
            SkipReason::NonPositiveMass => "density yields no positive mass",
        };
        f.write_str(text)
    }
}

/// Normalized scores of one reagent occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReagentContribution {
    pub name: String,
    /// ml.
    pub volume: f64,
    /// g, `volume × density`.
    pub mass: f64,
    pub sub_factors: SubFactorScores,
    /// S, H, E, R, D. P is never reagent-derived and stays 0.
    pub factors: FactorScores,
}

/// Turns `(name, volume)` occurrences into normalized factor scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributionCalculator {
    pub hazard: NormalizationLaw,
    pub lifecycle: NormalizationLaw,
    pub weighting: SubFactorWeighting,
}

impl ContributionCalculator {
    pub fn new(
        hazard: NormalizationLaw,
        lifecycle: NormalizationLaw,
        weighting: SubFactorWeighting,
    ) -> Self {
        Self {
            hazard,
            lifecycle,
            weighting,
        }
    }

    /// Resolves `name` in `table` and scores `volume` ml of it.
    pub fn contribution(
        &self,
        name: &str,
        volume: f64,
        table: &FactorTable,
    ) -> Result<ReagentContribution, SkipReason> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SkipReason::EmptyName);
        }
        if !(volume > 0.0) {
            return Err(SkipReason::NonPositiveVolume);
        }
        let factor = table.get(name).ok_or(SkipReason::MissingReference)?;
        self.score(factor, volume)
    }

    /// Scores `volume` ml of an already resolved reagent.
    pub fn score(
        &self,
        factor: &ReagentFactor,
        volume: f64,
    ) -> Result<ReagentContribution, SkipReason> {
        if !(volume > 0.0) {
            return Err(SkipReason::NonPositiveVolume);
        }
        let mass = volume * factor.density;
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(SkipReason::NonPositiveMass);
        }

        let sub_factors = factor
            .sub_factor_values()
            .map(|value| self.hazard.apply(mass, value));
        let (safety, health, environment) = self.weighting.primary(&sub_factors);
        let recyclability = self
            .lifecycle
            .apply(mass, factor.regeneration.unwrap_or(0.0));
        let disposal = self.lifecycle.apply(mass, factor.disposal);

        Ok(ReagentContribution {
            name: factor.name.trim().to_string(),
            volume,
            mass,
            sub_factors,
            factors: FactorScores::new(safety, health, environment, recyclability, disposal, 0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::weights::{SafetyWeights, Scheme};
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn unit_reagent(name: &str) -> ReagentFactor {
        ReagentFactor {
            name: name.to_string(),
            density: 1.0,
            release_potential: 1.0,
            fire_explos: 1.0,
            react_decom: 1.0,
            acute_toxicity: 1.0,
            irritation: 1.0,
            chronic_toxicity: 1.0,
            persistency: 1.0,
            air_hazard: 1.0,
            water_hazard: 1.0,
            regeneration: None,
            disposal: 1.0,
        }
    }

    #[test]
    fn ten_ml_of_unit_reagent_scores_equally_on_every_hazard_factor() {
        let table = FactorTable::from_reagents([unit_reagent("X")]);
        let c = ContributionCalculator::default()
            .contribution("X", 10.0, &table)
            .unwrap();
        let expected = 33.3 * 11f64.log10();

        assert!(f64_approx_equal(c.mass, 10.0, TOLERANCE));
        assert!(f64_approx_equal(c.sub_factors.s1, expected, TOLERANCE));
        assert!(f64_approx_equal(c.factors.safety, expected, TOLERANCE));
        assert!(f64_approx_equal(c.factors.health, expected, TOLERANCE));
        assert!(f64_approx_equal(c.factors.environment, expected, TOLERANCE));
        assert_eq!(c.factors.recyclability, 0.0);
        assert!(f64_approx_equal(c.factors.disposal, expected, TOLERANCE));
        assert_eq!(c.factors.power, 0.0);
    }

    #[test]
    fn lifecycle_law_applies_only_to_recyclability_and_disposal() {
        let mut reagent = unit_reagent("X");
        reagent.regeneration = Some(0.5);
        let calculator = ContributionCalculator {
            lifecycle: NormalizationLaw::LIFECYCLE_BACKEND,
            ..Default::default()
        };
        let c = calculator.score(&reagent, 1.0).unwrap();
        assert!(f64_approx_equal(c.factors.recyclability, 45.0 * 8f64.log10(), TOLERANCE));
        assert!(f64_approx_equal(c.factors.disposal, 45.0 * 15f64.log10(), TOLERANCE));
        assert!(f64_approx_equal(c.factors.safety, 33.3 * 2f64.log10(), TOLERANCE));
    }

    #[test]
    fn sub_factor_scheme_changes_safety_weighting() {
        let mut reagent = unit_reagent("X");
        reagent.fire_explos = 0.0;
        let calculator = ContributionCalculator {
            weighting: SubFactorWeighting {
                safety: Scheme::custom(SafetyWeights { s1: 0.0, s2: 1.0, s3: 0.0, s4: 0.0 }),
                ..Default::default()
            },
            ..Default::default()
        };
        let c = calculator.score(&reagent, 10.0).unwrap();
        assert_eq!(c.factors.safety, 0.0);
    }

    #[test]
    fn skips_empty_name_missing_reference_and_bad_volume() {
        let table = FactorTable::from_reagents([unit_reagent("X")]);
        let calculator = ContributionCalculator::default();
        assert_eq!(calculator.contribution("  ", 1.0, &table), Err(SkipReason::EmptyName));
        assert_eq!(calculator.contribution("Y", 1.0, &table), Err(SkipReason::MissingReference));
        assert_eq!(calculator.contribution("X", 0.0, &table), Err(SkipReason::NonPositiveVolume));
        assert_eq!(calculator.contribution("X", -2.0, &table), Err(SkipReason::NonPositiveVolume));
        assert_eq!(calculator.contribution("X", f64::NAN, &table), Err(SkipReason::NonPositiveVolume));
    }

    #[test]
    fn zero_density_is_skipped_as_non_positive_mass() {
        let mut reagent = unit_reagent("X");
        reagent.density = 0.0;
        assert_eq!(
            ContributionCalculator::default().score(&reagent, 5.0),
            Err(SkipReason::NonPositiveMass)
        );
    }

    proptest! {
        #[test]
        fn contribution_scores_stay_within_bounds(
            volume in 0.001f64..1e5,
            density in 0.01f64..5.0,
            value in 0.0f64..=1.0,
        ) {
            let mut reagent = unit_reagent("X");
            reagent.density = density;
            reagent.acute_toxicity = value;
            reagent.regeneration = Some(value);
            let c = ContributionCalculator::default().score(&reagent, volume).unwrap();
            prop_assert!(c.mass >= 0.0);
            for factor in crate::core::scoring::term::Factor::ALL {
                let v = c.factors.get(factor);
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}
