use crate::core::gradient::curve::DEFAULT_SAMPLES;
use crate::core::gradient::volume::{SegmentConvention, VolumeAccumulator};
use crate::core::scoring::contribution::ContributionCalculator;
use crate::core::scoring::normalization::NormalizationLaw;
use crate::core::scoring::weights::{
    EnvironmentWeights, FinalWeights, HealthWeights, SafetyWeights, Scheme, StageWeights,
    SubFactorWeighting, WeightSet,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid custom {category} weights: each weight must be non-negative and they must sum to 1 (sum = {sum})")]
    InvalidWeights { category: &'static str, sum: f64 },
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationConfig {
    /// Law for the nine Safety, Health, and Environment sub-factors.
    pub hazard: NormalizationLaw,
    /// Law for Recyclability and Disposal.
    pub lifecycle: NormalizationLaw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationConfig {
    pub samples: usize,
    pub convention: SegmentConvention,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightingConfig {
    pub safety: Scheme<SafetyWeights>,
    pub health: Scheme<HealthWeights>,
    pub environment: Scheme<EnvironmentWeights>,
    pub stage: Scheme<StageWeights>,
    /// Replaces the input document's `weightingScheme` when set.
    pub final_override: Option<Scheme<FinalWeights>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub normalization: NormalizationConfig,
    pub integration: IntegrationConfig,
    pub weighting: WeightingConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationConfig {
                hazard: NormalizationLaw::HAZARD,
                lifecycle: NormalizationLaw::HAZARD,
            },
            integration: IntegrationConfig {
                samples: DEFAULT_SAMPLES,
                convention: SegmentConvention::Leading,
            },
            weighting: WeightingConfig {
                safety: Scheme::default(),
                health: Scheme::default(),
                environment: Scheme::default(),
                stage: Scheme::default(),
                final_override: None,
            },
        }
    }
}

impl ScoringConfig {
    pub fn contribution_calculator(&self) -> ContributionCalculator {
        ContributionCalculator::new(
            self.normalization.hazard,
            self.normalization.lifecycle,
            SubFactorWeighting {
                safety: self.weighting.safety.clone(),
                health: self.weighting.health.clone(),
                environment: self.weighting.environment.clone(),
            },
        )
    }

    pub fn volume_accumulator(&self) -> VolumeAccumulator {
        VolumeAccumulator::new(self.integration.samples, self.integration.convention)
    }

    /// The final scheme to apply: the configured override, else `requested` resolved against
    /// the catalog with `Standard` as fallback.
    pub fn final_scheme(&self, requested: &str) -> Scheme<FinalWeights> {
        match &self.weighting.final_override {
            Some(scheme) => scheme.clone(),
            None => FinalWeights::resolve(requested),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SchemeChoice<W> {
    Named(String),
    Custom(W),
}

impl<W: WeightSet> SchemeChoice<W> {
    fn into_scheme(self) -> Result<Scheme<W>, ConfigError> {
        match self {
            SchemeChoice::Named(name) => Ok(W::resolve(&name)),
            SchemeChoice::Custom(weights) => {
                if weights.is_normalized() {
                    Ok(Scheme::custom(weights))
                } else {
                    Err(ConfigError::InvalidWeights {
                        category: W::CATEGORY,
                        sum: weights.total(),
                    })
                }
            }
        }
    }
}

fn choose<W: WeightSet>(choice: Option<SchemeChoice<W>>) -> Result<Scheme<W>, ConfigError> {
    choice.map_or_else(|| Ok(W::default_scheme()), SchemeChoice::into_scheme)
}

fn check_law(name: &'static str, law: NormalizationLaw) -> Result<NormalizationLaw, ConfigError> {
    if law.is_valid() {
        Ok(law)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!(
                "scale and multiplier must be positive and finite (got {} and {})",
                law.scale, law.multiplier
            ),
        })
    }
}

#[derive(Default)]
pub struct ScoringConfigBuilder {
    hazard_law: Option<NormalizationLaw>,
    lifecycle_law: Option<NormalizationLaw>,
    samples: Option<usize>,
    convention: Option<SegmentConvention>,
    safety: Option<SchemeChoice<SafetyWeights>>,
    health: Option<SchemeChoice<HealthWeights>>,
    environment: Option<SchemeChoice<EnvironmentWeights>>,
    stage: Option<SchemeChoice<StageWeights>>,
    final_override: Option<SchemeChoice<FinalWeights>>,
}

impl ScoringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hazard_law(mut self, law: NormalizationLaw) -> Self {
        self.hazard_law = Some(law);
        self
    }
    pub fn lifecycle_law(mut self, law: NormalizationLaw) -> Self {
        self.lifecycle_law = Some(law);
        self
    }
    pub fn integration_samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }
    pub fn convention(mut self, convention: SegmentConvention) -> Self {
        self.convention = Some(convention);
        self
    }
    pub fn safety_scheme(mut self, name: impl Into<String>) -> Self {
        self.safety = Some(SchemeChoice::Named(name.into()));
        self
    }
    pub fn custom_safety_weights(mut self, weights: SafetyWeights) -> Self {
        self.safety = Some(SchemeChoice::Custom(weights));
        self
    }
    pub fn health_scheme(mut self, name: impl Into<String>) -> Self {
        self.health = Some(SchemeChoice::Named(name.into()));
        self
    }
    pub fn custom_health_weights(mut self, weights: HealthWeights) -> Self {
        self.health = Some(SchemeChoice::Custom(weights));
        self
    }
    pub fn environment_scheme(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(SchemeChoice::Named(name.into()));
        self
    }
    pub fn custom_environment_weights(mut self, weights: EnvironmentWeights) -> Self {
        self.environment = Some(SchemeChoice::Custom(weights));
        self
    }
    pub fn stage_scheme(mut self, name: impl Into<String>) -> Self {
        self.stage = Some(SchemeChoice::Named(name.into()));
        self
    }
    pub fn custom_stage_weights(mut self, weights: StageWeights) -> Self {
        self.stage = Some(SchemeChoice::Custom(weights));
        self
    }
    pub fn final_scheme(mut self, name: impl Into<String>) -> Self {
        self.final_override = Some(SchemeChoice::Named(name.into()));
        self
    }
    pub fn custom_final_weights(mut self, weights: FinalWeights) -> Self {
        self.final_override = Some(SchemeChoice::Custom(weights));
        self
    }

    pub fn build(self) -> Result<ScoringConfig, ConfigError> {
        let hazard = check_law(
            "normalization.hazard",
            self.hazard_law.unwrap_or(NormalizationLaw::HAZARD),
        )?;
        let lifecycle = check_law(
            "normalization.lifecycle",
            self.lifecycle_law.unwrap_or(hazard),
        )?;

        let samples = self.samples.unwrap_or(DEFAULT_SAMPLES);
        if samples == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "integration.samples",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(ScoringConfig {
            normalization: NormalizationConfig { hazard, lifecycle },
            integration: IntegrationConfig {
                samples,
                convention: self.convention.unwrap_or_default(),
            },
            weighting: WeightingConfig {
                safety: choose(self.safety)?,
                health: choose(self.health)?,
                environment: choose(self.environment)?,
                stage: choose(self.stage)?,
                final_override: self.final_override.map(SchemeChoice::into_scheme).transpose()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_produces_default_config() {
        let config = ScoringConfigBuilder::new().build().unwrap();
        assert_eq!(config, ScoringConfig::default());
        assert_eq!(config.integration.samples, 1000);
        assert_eq!(config.normalization.lifecycle, NormalizationLaw::HAZARD);
        assert_eq!(config.weighting.safety.name, "PBT_Balanced");
        assert_eq!(config.weighting.stage.name, "Balanced");
        assert!(config.weighting.final_override.is_none());
    }

    #[test]
    fn lifecycle_law_defaults_to_configured_hazard_law() {
        let law = NormalizationLaw::new(40.0, 2.0);
        let config = ScoringConfigBuilder::new().hazard_law(law).build().unwrap();
        assert_eq!(config.normalization.lifecycle, law);
    }

    #[test]
    fn named_schemes_resolve_with_fallback() {
        let config = ScoringConfigBuilder::new()
            .health_scheme("Strict_Compliance")
            .environment_scheme("no-such-scheme")
            .final_scheme("Equal")
            .build()
            .unwrap();
        assert_eq!(config.weighting.health.weights.h1, 0.9);
        assert_eq!(config.weighting.environment.name, "PBT_Balanced");
        assert_eq!(config.final_scheme("Standard").name, "Equal");
    }

    #[test]
    fn final_scheme_without_override_resolves_requested_name() {
        let config = ScoringConfig::default();
        assert_eq!(config.final_scheme("Direct_Online").weights.instrument, 0.8);
        assert_eq!(config.final_scheme("bogus").name, "Standard");
    }

    #[test]
    fn custom_weights_must_sum_to_one() {
        let result = ScoringConfigBuilder::new()
            .custom_final_weights(FinalWeights { instrument: 0.9, preparation: 0.2 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidWeights { category: "final", .. })
        ));

        let config = ScoringConfigBuilder::new()
            .custom_safety_weights(SafetyWeights { s1: 0.4, s2: 0.3, s3: 0.2, s4: 0.1 })
            .build()
            .unwrap();
        assert_eq!(config.weighting.safety.name, "Custom");
    }

    #[test]
    fn zero_samples_and_invalid_laws_are_rejected() {
        assert!(matches!(
            ScoringConfigBuilder::new().integration_samples(0).build(),
            Err(ConfigError::InvalidParameter { name: "integration.samples", .. })
        ));
        assert!(matches!(
            ScoringConfigBuilder::new()
                .lifecycle_law(NormalizationLaw::new(-1.0, 1.0))
                .build(),
            Err(ConfigError::InvalidParameter { name: "normalization.lifecycle", .. })
        ));
    }

    #[test]
    fn contribution_calculator_carries_configured_laws_and_schemes() {
        let config = ScoringConfigBuilder::new()
            .lifecycle_law(NormalizationLaw::LIFECYCLE_BACKEND)
            .safety_scheme("Frontier_Focus")
            .build()
            .unwrap();
        let calculator = config.contribution_calculator();
        assert_eq!(calculator.lifecycle, NormalizationLaw::LIFECYCLE_BACKEND);
        assert_eq!(calculator.weighting.safety.weights.s2, 0.60);
    }
}
