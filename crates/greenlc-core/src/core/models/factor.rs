use crate::core::scoring::term::SubFactorScores;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// One row of the reagent factor table.
///
/// Sub-factor values are dimensionless hazard indicators (typically in `[0, 1]`). They roll up
/// into the primary factors as follows:
///
/// | Primary | Sub-factors |
/// |---|---|
/// | Safety | `releasePotential`, `fireExplos`, `reactDecom`, `acuteToxicity` |
/// | Health | `chronicToxicity`, `irritation` |
/// | Environment | `persistency`, `airHazard`, `waterHazard` |
///
/// `regeneration` feeds Recyclability and may be absent; `disposal` feeds Disposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReagentFactor {
    pub name: String,
    /// Density in g/ml.
    pub density: f64,
    pub release_potential: f64,
    pub fire_explos: f64,
    pub react_decom: f64,
    pub acute_toxicity: f64,
    pub irritation: f64,
    pub chronic_toxicity: f64,
    pub persistency: f64,
    pub air_hazard: f64,
    pub water_hazard: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regeneration: Option<f64>,
    pub disposal: f64,
}

impl ReagentFactor {
    /// The nine raw sub-factor values in canonical order.
    pub fn sub_factor_values(&self) -> SubFactorScores {
        SubFactorScores {
            s1: self.release_potential,
            s2: self.fire_explos,
            s3: self.react_decom,
            s4: self.acute_toxicity,
            h1: self.chronic_toxicity,
            h2: self.irritation,
            e1: self.persistency,
            e2: self.air_hazard,
            e3: self.water_hazard,
        }
    }

    pub fn totals(&self) -> ReagentTotals {
        let round = |value: f64| (value * 1000.0).round() / 1000.0;
        let v = self.sub_factor_values();
        ReagentTotals {
            safety_score: round(v.s1 + v.s2 + v.s3 + v.s4),
            health_score: round(v.h1 + v.h2),
            env_score: round(v.e1 + v.e2 + v.e3),
        }
    }
}

/// Unweighted sums of a reagent's raw sub-factors, rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReagentTotals {
    pub safety_score: f64,
    pub health_score: f64,
    pub env_score: f64,
}

/// Reagent factors indexed by name.
///
/// Names are unique keys; when a table contains the same name twice the first row wins.
#[derive(Debug, Clone, Default)]
pub struct FactorTable {
    reagents: Vec<ReagentFactor>,
    index: HashMap<String, usize>,
}

impl FactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reagents<I>(reagents: I) -> Self
    where
        I: IntoIterator<Item = ReagentFactor>,
    {
        let mut table = Self::new();
        for reagent in reagents {
            table.insert(reagent);
        }
        table
    }

    /// Adds a row unless its name is blank or already present. Returns whether it was added.
    pub fn insert(&mut self, reagent: ReagentFactor) -> bool {
        let key = reagent.name.trim();
        if key.is_empty() {
            warn!("Ignoring reagent factor row with an empty name.");
            return false;
        }
        if self.index.contains_key(key) {
            warn!(
                "Duplicate reagent factor row for '{}'; keeping the first one.",
                key
            );
            return false;
        }
        self.index.insert(key.to_string(), self.reagents.len());
        self.reagents.push(reagent);
        true
    }

    /// Adds every row of `other` whose name is not yet present.
    pub fn fill_missing_from(&mut self, other: &FactorTable) {
        for reagent in other.iter() {
            if !self.contains(&reagent.name) {
                self.insert(reagent.clone());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ReagentFactor> {
        self.index
            .get(name.trim())
            .and_then(|&i| self.reagents.get(i))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReagentFactor> {
        self.reagents.iter()
    }

    pub fn len(&self) -> usize {
        self.reagents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reagents.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn reagent(name: &str, density: f64) -> ReagentFactor {
        ReagentFactor {
            name: name.to_string(),
            density,
            ..Default::default()
        }
    }

    #[test]
    fn get_finds_reagent_by_trimmed_name() {
        let table = FactorTable::from_reagents([reagent("Methanol", 0.791)]);
        assert_eq!(table.get(" Methanol ").unwrap().density, 0.791);
        assert!(table.get("Ethanol").is_none());
    }

    #[test]
    fn duplicate_names_keep_the_first_row() {
        let table =
            FactorTable::from_reagents([reagent("Water", 1.0), reagent("Water", 2.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Water").unwrap().density, 1.0);
    }

    #[test]
    fn blank_names_are_not_indexed() {
        let mut table = FactorTable::new();
        assert!(!table.insert(reagent("  ", 1.0)));
        assert!(table.is_empty());
    }

    #[test]
    fn fill_missing_from_only_adds_unknown_names() {
        let mut table = FactorTable::from_reagents([reagent("Water", 1.5)]);
        let other = FactorTable::from_reagents([reagent("Water", 1.0), reagent("Acetone", 0.784)]);
        table.fill_missing_from(&other);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Water").unwrap().density, 1.5);
        assert!(table.contains("Acetone"));
    }

    #[test]
    fn sub_factor_values_follow_canonical_order() {
        let factor = ReagentFactor {
            release_potential: 0.1,
            fire_explos: 0.2,
            react_decom: 0.3,
            acute_toxicity: 0.4,
            irritation: 0.5,
            chronic_toxicity: 0.6,
            persistency: 0.7,
            air_hazard: 0.8,
            water_hazard: 0.9,
            ..Default::default()
        };
        let values = factor.sub_factor_values();
        assert_eq!(values.s4, 0.4);
        assert_eq!(values.h1, 0.6);
        assert_eq!(values.h2, 0.5);
        assert_eq!(values.e3, 0.9);
    }

    #[test]
    fn deserializes_camel_case_row_with_missing_regeneration() {
        let json = r#"{"name":"Acetone","density":0.784,"fireExplos":1.0,"disposal":0.5,"id":"1"}"#;
        let factor: ReagentFactor = serde_json::from_str(json).unwrap();
        assert_eq!(factor.fire_explos, 1.0);
        assert_eq!(factor.regeneration, None);
        assert_eq!(factor.disposal, 0.5);
    }

    #[test]
    fn totals_sum_raw_sub_factors_per_primary_factor() {
        let acetone = ReagentFactor {
            release_potential: 0.698,
            fire_explos: 1.0,
            react_decom: 0.0,
            acute_toxicity: 0.297,
            irritation: 0.625,
            chronic_toxicity: 0.185,
            persistency: 0.126,
            air_hazard: 0.185,
            water_hazard: 0.0,
            ..Default::default()
        };
        let totals = acetone.totals();
        assert_eq!(totals.safety_score, 1.995);
        assert_eq!(totals.health_score, 0.81);
        assert_eq!(totals.env_score, 0.311);
        assert_eq!(ReagentFactor::default().totals(), ReagentTotals::default());
    }
}
