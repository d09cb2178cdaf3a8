use serde::{Deserialize, Serialize};

/// A pretreatment reagent entry: a factor-table name and the volume used, in ml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReagentVolume {
    #[serde(alias = "reagentName")]
    pub name: String,
    pub volume: f64,
}

impl ReagentVolume {
    pub fn new(name: impl Into<String>, volume: f64) -> Self {
        Self {
            name: name.into(),
            volume,
        }
    }
}

/// One reagent of a mobile-phase channel and its share of that channel, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseComponent {
    #[serde(alias = "reagentName")]
    pub name: String,
    pub percentage: f64,
}

impl PhaseComponent {
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// Method-level Power (P) scores, one per stage. P is never derived from reagent mass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagePower {
    pub instrument: f64,
    pub preparation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodConfiguration {
    /// Number of samples processed by the method. `None`, zero, or negative means the
    /// total score is defined as 0.
    pub sample_count: Option<i64>,
    pub pre_treatment_reagents: Vec<ReagentVolume>,
    pub mobile_phase_a: Vec<PhaseComponent>,
    pub mobile_phase_b: Vec<PhaseComponent>,
    pub power: StagePower,
}

impl MethodConfiguration {
    /// The sample count when it can be divided by, otherwise `None`.
    pub fn effective_sample_count(&self) -> Option<u64> {
        self.sample_count.filter(|&n| n > 0).map(|n| n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_sample_count_rejects_absent_zero_and_negative() {
        let mut method = MethodConfiguration::default();
        assert_eq!(method.effective_sample_count(), None);
        method.sample_count = Some(0);
        assert_eq!(method.effective_sample_count(), None);
        method.sample_count = Some(-3);
        assert_eq!(method.effective_sample_count(), None);
        method.sample_count = Some(12);
        assert_eq!(method.effective_sample_count(), Some(12));
    }

    #[test]
    fn deserializes_editor_document_with_aliases_and_nulls() {
        let json = r#"{
            "sampleCount": null,
            "preTreatmentReagents": [{"id": "1", "name": "Acetone", "volume": 5.0}],
            "mobilePhaseA": [{"reagentName": "Water", "percentage": 100}],
            "instrumentType": "standard"
        }"#;
        let method: MethodConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(method.sample_count, None);
        assert_eq!(method.pre_treatment_reagents[0], ReagentVolume::new("Acetone", 5.0));
        assert_eq!(method.mobile_phase_a[0], PhaseComponent::new("Water", 100.0));
        assert!(method.mobile_phase_b.is_empty());
        assert_eq!(method.power, StagePower::default());
    }
}
