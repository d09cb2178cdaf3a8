use crate::cli::ScoringArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use greenlc::core::gradient::volume::SegmentConvention;
use greenlc::core::scoring::normalization::NormalizationLaw;
use greenlc::core::scoring::weights::{
    EnvironmentWeights, FinalWeights, HealthWeights, SafetyWeights, StageWeights,
};
use greenlc::engine::config::{ScoringConfig, ScoringConfigBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialNormalizationConfig {
    hazard_scale: Option<f64>,
    hazard_multiplier: Option<f64>,
    lifecycle_scale: Option<f64>,
    lifecycle_multiplier: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialIntegrationConfig {
    samples: Option<usize>,
    convention: Option<SegmentConvention>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialWeightingConfig {
    safety: Option<String>,
    health: Option<String>,
    environment: Option<String>,
    stage: Option<String>,
    safety_weights: Option<SafetyWeights>,
    health_weights: Option<HealthWeights>,
    environment_weights: Option<EnvironmentWeights>,
    stage_weights: Option<StageWeights>,
    #[serde(rename = "final")]
    final_scheme: Option<String>,
    final_instrument: Option<f64>,
    final_preparation: Option<f64>,
}

/// The TOML configuration file. Every key is optional; CLI flags take precedence.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialScoringConfig {
    normalization: Option<PartialNormalizationConfig>,
    integration: Option<PartialIntegrationConfig>,
    weighting: Option<PartialWeightingConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

/// Reads an inline TOML table such as `{ S1 = 0.4, S2 = 0.3, S3 = 0.2, S4 = 0.1 }`.
fn parse_inline_table<T: DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    #[derive(Deserialize)]
    struct Wrapper<T> {
        value: T,
    }
    toml::from_str::<Wrapper<T>>(&format!("value = {value}"))
        .map(|w| w.value)
        .map_err(|e| CliError::Config(format!("Invalid weight table for {}: {}", key, e.message())))
}

/// Where a sub-scheme comes from once CLI flags and the file are merged.
enum Choice<'a, W> {
    Named(&'a str),
    Custom(W),
}

/// A CLI scheme name wins, then custom file weights, then a named file scheme.
fn choose<'a, W>(
    cli_name: Option<&'a str>,
    custom: Option<W>,
    file_name: Option<&'a str>,
) -> Option<Choice<'a, W>> {
    match (cli_name, custom, file_name) {
        (Some(name), _, _) => Some(Choice::Named(name)),
        (None, Some(weights), _) => Some(Choice::Custom(weights)),
        (None, None, Some(name)) => Some(Choice::Named(name)),
        (None, None, None) => None,
    }
}

/// Builds a law from optional overrides, falling back to `base` for missing parts.
fn law_from(
    scale: Option<f64>,
    multiplier: Option<f64>,
    base: NormalizationLaw,
) -> Option<NormalizationLaw> {
    if scale.is_none() && multiplier.is_none() {
        return None;
    }
    Some(NormalizationLaw::new(
        scale.unwrap_or(base.scale),
        multiplier.unwrap_or(base.multiplier),
    ))
}

impl PartialScoringConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config` (if any), applies `-S` overrides, then CLI flags.
    pub fn resolve(args: &ScoringArgs) -> Result<ScoringConfig> {
        let partial = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        partial.merge_with_cli(args)
    }

    pub fn merge_with_cli(mut self, args: &ScoringArgs) -> Result<ScoringConfig> {
        self.apply_set_values(&args.set_values)?;

        let normalization = self.normalization.take().unwrap_or_default();
        let integration = self.integration.take().unwrap_or_default();
        let weighting = self.weighting.take().unwrap_or_default();

        let mut builder = ScoringConfigBuilder::new();

        let hazard = law_from(
            normalization.hazard_scale,
            normalization.hazard_multiplier,
            NormalizationLaw::HAZARD,
        );
        if let Some(law) = hazard {
            builder = builder.hazard_law(law);
        }
        let lifecycle = law_from(
            normalization.lifecycle_scale,
            normalization.lifecycle_multiplier,
            hazard.unwrap_or(NormalizationLaw::HAZARD),
        );
        if let Some(law) = lifecycle {
            builder = builder.lifecycle_law(law);
        }

        if let Some(samples) = args.samples.or(integration.samples) {
            builder = builder.integration_samples(samples);
        }
        let convention = match &args.convention {
            Some(value) => {
                Some(parser::parse_convention(value).map_err(|e| CliError::Argument(e.to_string()))?)
            }
            None => integration.convention,
        };
        if let Some(convention) = convention {
            builder = builder.convention(convention);
        }

        builder = match choose(
            args.safety_scheme.as_deref(),
            weighting.safety_weights,
            weighting.safety.as_deref(),
        ) {
            Some(Choice::Named(name)) => builder.safety_scheme(name),
            Some(Choice::Custom(weights)) => builder.custom_safety_weights(weights),
            None => builder,
        };
        builder = match choose(
            args.health_scheme.as_deref(),
            weighting.health_weights,
            weighting.health.as_deref(),
        ) {
            Some(Choice::Named(name)) => builder.health_scheme(name),
            Some(Choice::Custom(weights)) => builder.custom_health_weights(weights),
            None => builder,
        };
        builder = match choose(
            args.environment_scheme.as_deref(),
            weighting.environment_weights,
            weighting.environment.as_deref(),
        ) {
            Some(Choice::Named(name)) => builder.environment_scheme(name),
            Some(Choice::Custom(weights)) => builder.custom_environment_weights(weights),
            None => builder,
        };
        builder = match choose(
            args.stage_scheme.as_deref(),
            weighting.stage_weights,
            weighting.stage.as_deref(),
        ) {
            Some(Choice::Named(name)) => builder.stage_scheme(name),
            Some(Choice::Custom(weights)) => builder.custom_stage_weights(weights),
            None => builder,
        };
        builder = Self::merge_final(builder, args.scheme.as_deref(), &weighting)?;

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    /// A `--scheme` name wins over everything. Otherwise custom file weights win over a named
    /// file scheme, and both halves of a custom pair are required.
    fn merge_final(
        builder: ScoringConfigBuilder,
        cli_scheme: Option<&str>,
        file: &PartialWeightingConfig,
    ) -> Result<ScoringConfigBuilder> {
        if let Some(name) = cli_scheme {
            return Ok(builder.final_scheme(name));
        }
        match (file.final_instrument, file.final_preparation) {
            (Some(instrument), Some(preparation)) => Ok(builder.custom_final_weights(FinalWeights {
                instrument,
                preparation,
            })),
            (None, None) => Ok(match &file.final_scheme {
                Some(name) => builder.final_scheme(name.as_str()),
                None => builder,
            }),
            _ => Err(CliError::Config(
                "`weighting` requires both `final-instrument` and `final-preparation` for custom final weights".to_string(),
            )),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "normalization.hazard-scale" => {
                    self.normalization.get_or_insert_with(Default::default).hazard_scale =
                        Some(parse_value(key, value, "float")?);
                }
                "normalization.hazard-multiplier" => {
                    self.normalization.get_or_insert_with(Default::default).hazard_multiplier =
                        Some(parse_value(key, value, "float")?);
                }
                "normalization.lifecycle-scale" => {
                    self.normalization.get_or_insert_with(Default::default).lifecycle_scale =
                        Some(parse_value(key, value, "float")?);
                }
                "normalization.lifecycle-multiplier" => {
                    self.normalization
                        .get_or_insert_with(Default::default)
                        .lifecycle_multiplier = Some(parse_value(key, value, "float")?);
                }
                "integration.samples" => {
                    self.integration.get_or_insert_with(Default::default).samples =
                        Some(parse_value(key, value, "integer")?);
                }
                "integration.convention" => {
                    self.integration.get_or_insert_with(Default::default).convention = Some(
                        parser::parse_convention(value)
                            .map_err(|e| CliError::Config(e.to_string()))?,
                    );
                }
                "weighting.safety" => {
                    self.weighting.get_or_insert_with(Default::default).safety =
                        Some(value.to_string());
                }
                "weighting.health" => {
                    self.weighting.get_or_insert_with(Default::default).health =
                        Some(value.to_string());
                }
                "weighting.environment" => {
                    self.weighting.get_or_insert_with(Default::default).environment =
                        Some(value.to_string());
                }
                "weighting.stage" => {
                    self.weighting.get_or_insert_with(Default::default).stage =
                        Some(value.to_string());
                }
                "weighting.safety-weights" => {
                    self.weighting.get_or_insert_with(Default::default).safety_weights =
                        Some(parse_inline_table(key, value)?);
                }
                "weighting.health-weights" => {
                    self.weighting.get_or_insert_with(Default::default).health_weights =
                        Some(parse_inline_table(key, value)?);
                }
                "weighting.environment-weights" => {
                    self.weighting
                        .get_or_insert_with(Default::default)
                        .environment_weights = Some(parse_inline_table(key, value)?);
                }
                "weighting.stage-weights" => {
                    self.weighting.get_or_insert_with(Default::default).stage_weights =
                        Some(parse_inline_table(key, value)?);
                }
                "weighting.final" => {
                    self.weighting.get_or_insert_with(Default::default).final_scheme =
                        Some(value.to_string());
                }
                "weighting.final-instrument" => {
                    self.weighting.get_or_insert_with(Default::default).final_instrument =
                        Some(parse_value(key, value, "float")?);
                }
                "weighting.final-preparation" => {
                    self.weighting.get_or_insert_with(Default::default).final_preparation =
                        Some(parse_value(key, value, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use greenlc::core::models::input::ScoringInput;
    use greenlc::engine::progress::ProgressReporter;
    use greenlc::engine::result::ScoreResult;
    use greenlc::workflows;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    const WEIGHTED_INPUT: &str = r#"{
        "reagentFactors": [
            {"name": "X", "density": 1.0, "releasePotential": 1.0, "chronicToxicity": 1.0,
             "persistency": 1.0, "disposal": 0.0}
        ],
        "methodConfiguration": {
            "sampleCount": 1,
            "preTreatmentReagents": [{"name": "X", "volume": 10.0}]
        },
        "weightingScheme": "Standard"
    }"#;

    fn evaluate_with(config: &ScoringConfig) -> ScoreResult {
        let input: ScoringInput = serde_json::from_str(WEIGHTED_INPUT).unwrap();
        workflows::evaluate::run(&input, config, &ProgressReporter::new()).result
    }

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("greenlc.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn scoring_args(extra: &[&str]) -> ScoringArgs {
        let mut argv = vec!["greenlc", "evaluate", "-i", "method.json"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Evaluate(args) => args.scoring,
            other => panic!("Expected 'evaluate' subcommand, got {other:?}"),
        }
    }

    #[test]
    fn no_file_and_no_flags_gives_default_config() {
        let config = PartialScoringConfig::resolve(&scoring_args(&[])).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [normalization]
            lifecycle-scale = 45.0
            lifecycle-multiplier = 14.0

            [integration]
            samples = 250
            convention = "trailing"

            [weighting]
            safety = "Frontier_Focus"
            stage = "Eco_Friendly"
            final = "Equal"
            "#,
        );
        let args = scoring_args(&["-c", path.to_str().unwrap()]);
        let config = PartialScoringConfig::resolve(&args).unwrap();

        assert_eq!(config.normalization.hazard, NormalizationLaw::HAZARD);
        assert_eq!(config.normalization.lifecycle, NormalizationLaw::LIFECYCLE_BACKEND);
        assert_eq!(config.integration.samples, 250);
        assert_eq!(config.integration.convention, SegmentConvention::Trailing);
        assert_eq!(config.weighting.safety.name, "Frontier_Focus");
        assert_eq!(config.weighting.stage.name, "Eco_Friendly");
        assert_eq!(config.weighting.final_override.unwrap().name, "Equal");
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [integration]
            samples = 250
            convention = "trailing"

            [weighting]
            final = "Equal"
            health = "Strict_Compliance"
            "#,
        );
        let args = scoring_args(&[
            "-c",
            path.to_str().unwrap(),
            "--samples",
            "10",
            "--convention",
            "leading",
            "--scheme",
            "Direct_Online",
        ]);
        let config = PartialScoringConfig::resolve(&args).unwrap();

        assert_eq!(config.integration.samples, 10);
        assert_eq!(config.integration.convention, SegmentConvention::Leading);
        assert_eq!(config.weighting.final_override.unwrap().name, "Direct_Online");
        assert_eq!(config.weighting.health.name, "Strict_Compliance");
    }

    #[test]
    fn set_values_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "[integration]\nsamples = 250\n");
        let args = scoring_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "integration.samples=20",
            "-S",
            "normalization.hazard-scale=40",
        ]);
        let config = PartialScoringConfig::resolve(&args).unwrap();

        assert_eq!(config.integration.samples, 20);
        assert_eq!(config.normalization.hazard, NormalizationLaw::new(40.0, 1.0));
        assert_eq!(config.normalization.lifecycle, NormalizationLaw::new(40.0, 1.0));
    }

    #[test]
    fn custom_final_weights_are_validated() {
        let args = scoring_args(&[
            "-S",
            "weighting.final-instrument=0.25",
            "-S",
            "weighting.final-preparation=0.75",
        ]);
        let config = PartialScoringConfig::resolve(&args).unwrap();
        let scheme = config.weighting.final_override.unwrap();
        assert_eq!(scheme.weights, FinalWeights { instrument: 0.25, preparation: 0.75 });

        let bad = scoring_args(&[
            "-S",
            "weighting.final-instrument=0.5",
            "-S",
            "weighting.final-preparation=0.9",
        ]);
        assert!(matches!(PartialScoringConfig::resolve(&bad), Err(CliError::Config(_))));

        let half = scoring_args(&["-S", "weighting.final-instrument=0.5"]);
        assert!(matches!(PartialScoringConfig::resolve(&half), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_inputs_are_reported() {
        let unknown_key = scoring_args(&["-S", "weighting.colour=blue"]);
        assert!(matches!(
            PartialScoringConfig::resolve(&unknown_key),
            Err(CliError::Config(msg)) if msg.contains("weighting.colour")
        ));

        let bad_number = scoring_args(&["-S", "integration.samples=many"]);
        assert!(matches!(PartialScoringConfig::resolve(&bad_number), Err(CliError::Config(_))));

        let zero_samples = scoring_args(&["--samples", "0"]);
        assert!(matches!(PartialScoringConfig::resolve(&zero_samples), Err(CliError::Config(_))));

        let bad_convention = scoring_args(&["--convention", "sideways"]);
        assert!(matches!(
            PartialScoringConfig::resolve(&bad_convention),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "[integration]\nsteps = 3\n");
        let result = PartialScoringConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn custom_safety_weights_change_final_factors() {
        let args = scoring_args(&[
            "-S",
            "weighting.safety-weights={ S1 = 1.0, S2 = 0.0, S3 = 0.0, S4 = 0.0 }",
        ]);
        let config = PartialScoringConfig::resolve(&args).unwrap();
        assert_eq!(config.weighting.safety.name, "Custom");
        assert_eq!(config.weighting.safety.weights.s1, 1.0);

        let baseline = evaluate_with(&ScoringConfig::default());
        let custom = evaluate_with(&config);
        assert!(custom.factors().safety > baseline.factors().safety);
        assert_eq!(custom.factors().health, baseline.factors().health);
    }

    #[test]
    fn custom_health_weights_from_file_change_final_factors() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [weighting]
            health = "Strict_Compliance"
            health-weights = { H1 = 1.0, H2 = 0.0 }
            "#,
        );
        let config =
            PartialScoringConfig::resolve(&scoring_args(&["-c", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.weighting.health.name, "Custom");

        let baseline = evaluate_with(&ScoringConfig::default());
        let custom = evaluate_with(&config);
        assert!(custom.factors().health > baseline.factors().health);
        assert_eq!(custom.factors().safety, baseline.factors().safety);
    }

    #[test]
    fn custom_environment_weights_change_final_factors() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "[weighting]\nenvironment-weights = { E1 = 1.0, E2 = 0.0, E3 = 0.0 }\n",
        );
        let config =
            PartialScoringConfig::resolve(&scoring_args(&["-c", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.weighting.environment.name, "Custom");

        let baseline = evaluate_with(&ScoringConfig::default());
        let custom = evaluate_with(&config);
        assert!(custom.factors().environment > baseline.factors().environment);
    }

    #[test]
    fn custom_stage_weights_change_stage_scores_only() {
        let args = scoring_args(&[
            "-S",
            "weighting.stage-weights={ S = 1.0, H = 0.0, E = 0.0, R = 0.0, D = 0.0, P = 0.0 }",
        ]);
        let config = PartialScoringConfig::resolve(&args).unwrap();
        assert_eq!(config.weighting.stage.name, "Custom");

        let baseline = evaluate_with(&ScoringConfig::default());
        let custom = evaluate_with(&config);
        assert_eq!(custom.preparation.stage_score, custom.preparation.major_factors.safety);
        assert_ne!(custom.preparation.stage_score, baseline.preparation.stage_score);
        assert_eq!(custom.factors(), baseline.factors());
    }

    #[test]
    fn custom_sub_weights_are_validated_and_yield_to_cli_names() {
        let unnormalized = scoring_args(&["-S", "weighting.health-weights={ H1 = 0.9, H2 = 0.9 }"]);
        assert!(matches!(
            PartialScoringConfig::resolve(&unnormalized),
            Err(CliError::Config(msg)) if msg.contains("health")
        ));

        let unknown_code = scoring_args(&["-S", "weighting.health-weights={ H1 = 0.5, H3 = 0.5 }"]);
        assert!(matches!(
            PartialScoringConfig::resolve(&unknown_code),
            Err(CliError::Config(_))
        ));

        let named = scoring_args(&[
            "--safety-scheme",
            "Frontier_Focus",
            "-S",
            "weighting.safety-weights={ S1 = 1.0, S2 = 0.0, S3 = 0.0, S4 = 0.0 }",
        ]);
        let config = PartialScoringConfig::resolve(&named).unwrap();
        assert_eq!(config.weighting.safety.name, "Frontier_Focus");
    }
}
