use super::factor::{FactorTable, ReagentFactor};
use super::gradient::GradientProgram;
use super::method::MethodConfiguration;
use serde::{Deserialize, Serialize};

fn default_scheme() -> String {
    "Standard".to_string()
}

/// The immutable snapshot the engine scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInput {
    #[serde(default)]
    pub reagent_factors: Vec<ReagentFactor>,
    #[serde(default)]
    pub method_configuration: MethodConfiguration,
    #[serde(default)]
    pub gradient: GradientProgram,
    /// Final weighting scheme name; unknown names fall back to `Standard` during scoring.
    #[serde(default = "default_scheme")]
    pub weighting_scheme: String,
}

impl Default for ScoringInput {
    fn default() -> Self {
        Self {
            reagent_factors: Vec::new(),
            method_configuration: MethodConfiguration::default(),
            gradient: GradientProgram::default(),
            weighting_scheme: default_scheme(),
        }
    }
}

impl ScoringInput {
    /// Indexes `reagent_factors` by name. The first row of a duplicated name wins.
    pub fn factor_table(&self) -> FactorTable {
        FactorTable::from_reagents(self.reagent_factors.iter().cloned())
    }
}
