use super::curve::{CurveType, DEFAULT_SAMPLES, Segment};
use crate::core::models::gradient::{GradientProgram, GradientStep};
use crate::core::models::method::PhaseComponent;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which step of a segment supplies its curve type and flow rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentConvention {
    /// The step that starts the segment.
    #[default]
    Leading,
    /// The step that ends the segment. Editor documents whose first row is an `initial`
    /// marker follow this convention.
    Trailing,
}

impl SegmentConvention {
    #[inline]
    fn owner<'a>(self, from: &'a GradientStep, to: &'a GradientStep) -> &'a GradientStep {
        match self {
            SegmentConvention::Leading => from,
            SegmentConvention::Trailing => to,
        }
    }
}

/// Per-segment integration detail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentVolume {
    pub start_time: f64,
    pub end_time: f64,
    pub curve: CurveType,
    pub flow_rate: f64,
    /// percent·minutes under channel A.
    pub area_a: f64,
    pub area_b: f64,
    pub volume_a: f64,
    pub volume_b: f64,
    /// `flow_rate × duration`.
    pub delivered: f64,
}

/// Channel volumes accumulated over a whole gradient program, in ml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientVolumes {
    pub segments: Vec<SegmentVolume>,
    pub volume_a: f64,
    pub volume_b: f64,
    /// `volume_a + volume_b`.
    pub total_volume: f64,
    /// Σ flow × duration. Equals `total_volume` whenever A + B = 100 at every step.
    pub delivered_volume: f64,
    pub total_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeAccumulator {
    samples: usize,
    convention: SegmentConvention,
}

impl Default for VolumeAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES, SegmentConvention::default())
    }
}

impl VolumeAccumulator {
    pub fn new(samples: usize, convention: SegmentConvention) -> Self {
        Self {
            samples: samples.max(1),
            convention,
        }
    }

    /// Whether the first segment would be integrated at zero flow although the next step
    /// pumps. This is the shape of editor documents whose first row is an `initial` marker.
    pub fn starves_first_segment(&self, program: &GradientProgram) -> bool {
        match (self.convention, program.steps.as_slice()) {
            (SegmentConvention::Leading, [first, second, ..]) => {
                first.flow_rate <= 0.0 && second.flow_rate > 0.0 && second.time > first.time
            }
            _ => false,
        }
    }

    pub fn accumulate(&self, program: &GradientProgram) -> GradientVolumes {
        if self.starves_first_segment(program) {
            warn!(
                "The first gradient step has zero flow, so its segment delivers nothing under the \
                 leading convention. Use the trailing convention for documents that start with an \
                 'initial' row."
            );
        }

        let mut volumes = GradientVolumes {
            total_time: program.total_time(),
            ..Default::default()
        };

        for (from, to) in program.segments() {
            let segment = self.integrate_segment(from, to);
            debug!(
                "Segment {:.3}-{:.3} min ({}, {:.3} ml/min): A {:.4} ml, B {:.4} ml",
                segment.start_time,
                segment.end_time,
                segment.curve,
                segment.flow_rate,
                segment.volume_a,
                segment.volume_b
            );
            volumes.volume_a += segment.volume_a;
            volumes.volume_b += segment.volume_b;
            volumes.delivered_volume += segment.delivered;
            volumes.segments.push(segment);
        }

        volumes.total_volume = volumes.volume_a + volumes.volume_b;
        volumes
    }

    fn integrate_segment(&self, from: &GradientStep, to: &GradientStep) -> SegmentVolume {
        let owner = self.convention.owner(from, to);
        let curve = owner.curve_type;
        let flow_rate = owner.flow_rate.max(0.0);
        let duration = to.time - from.time;

        let area_a = Segment::new(from.phase_a, to.phase_a, duration, curve).area(self.samples);
        let area_b = Segment::new(from.phase_b, to.phase_b, duration, curve).area(self.samples);

        SegmentVolume {
            start_time: from.time,
            end_time: to.time,
            curve,
            flow_rate,
            area_a,
            area_b,
            volume_a: area_a * flow_rate / 100.0,
            volume_b: area_b * flow_rate / 100.0,
            delivered: if duration > 0.0 { flow_rate * duration } else { 0.0 },
        }
    }
}

/// A mobile-phase component's share of its channel volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVolume {
    pub name: String,
    pub percentage: f64,
    pub volume: f64,
}

/// Splits `channel_volume` across `components` in proportion to their percentages.
///
/// Blank names are dropped. If the remaining percentages do not sum to a positive value every
/// component receives 0 ml.
pub fn distribute(components: &[PhaseComponent], channel_volume: f64) -> Vec<ComponentVolume> {
    let named: Vec<&PhaseComponent> = components
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .collect();
    let sum: f64 = named.iter().map(|c| c.percentage).sum();

    named
        .into_iter()
        .map(|c| ComponentVolume {
            name: c.name.trim().to_string(),
            percentage: c.percentage,
            volume: if sum > 0.0 {
                channel_volume * c.percentage / sum
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn step(time: f64, phase_a: f64, flow_rate: f64, curve_type: CurveType) -> GradientStep {
        GradientStep::new(time, phase_a, 100.0 - phase_a, flow_rate, curve_type)
    }

    #[test]
    fn two_step_linear_program_splits_ten_ml_evenly() {
        let program = GradientProgram::new(vec![
            step(0.0, 100.0, 1.0, CurveType::Linear),
            step(10.0, 0.0, 1.0, CurveType::Linear),
        ]);
        let volumes = VolumeAccumulator::default().accumulate(&program);
        assert!(f64_approx_equal(volumes.segments[0].area_a, 500.0, TOLERANCE));
        assert!(f64_approx_equal(volumes.volume_a, 5.0, TOLERANCE));
        assert!(f64_approx_equal(volumes.volume_b, 5.0, TOLERANCE));
        assert!(f64_approx_equal(volumes.total_volume, 10.0, TOLERANCE));
        assert!(f64_approx_equal(volumes.delivered_volume, 10.0, TOLERANCE));
        assert_eq!(volumes.total_time, 10.0);
    }

    #[test]
    fn convention_selects_curve_and_flow_owner() {
        let program = GradientProgram::new(vec![
            step(0.0, 100.0, 1.0, CurveType::PreStep),
            step(10.0, 0.0, 2.0, CurveType::PostStep),
        ]);
        let leading = VolumeAccumulator::new(100, SegmentConvention::Leading).accumulate(&program);
        let trailing = VolumeAccumulator::new(100, SegmentConvention::Trailing).accumulate(&program);

        assert_eq!(leading.segments[0].curve, CurveType::PreStep);
        assert!(f64_approx_equal(leading.volume_a, 0.0, TOLERANCE));
        assert!(f64_approx_equal(leading.volume_b, 10.0, TOLERANCE));

        assert_eq!(trailing.segments[0].curve, CurveType::PostStep);
        assert!(f64_approx_equal(trailing.volume_a, 20.0, TOLERANCE));
        assert!(f64_approx_equal(trailing.volume_b, 0.0, TOLERANCE));
    }

    #[test]
    fn zero_flow_first_row_starves_only_leading_integration() {
        let program = GradientProgram::new(vec![
            step(0.0, 0.0, 0.0, CurveType::Linear),
            step(5.0, 50.0, 1.0, CurveType::Linear),
            step(10.0, 50.0, 1.0, CurveType::Linear),
        ]);
        let leading = VolumeAccumulator::new(100, SegmentConvention::Leading);
        let trailing = VolumeAccumulator::new(100, SegmentConvention::Trailing);
        assert!(leading.starves_first_segment(&program));
        assert!(!trailing.starves_first_segment(&program));

        assert!(f64_approx_equal(leading.accumulate(&program).total_volume, 5.0, TOLERANCE));
        assert!(f64_approx_equal(trailing.accumulate(&program).total_volume, 10.0, TOLERANCE));

        let pumping = GradientProgram::new(vec![
            step(0.0, 0.0, 1.0, CurveType::Linear),
            step(5.0, 50.0, 1.0, CurveType::Linear),
        ]);
        assert!(!leading.starves_first_segment(&pumping));
        assert!(!leading.starves_first_segment(&GradientProgram::default()));
    }

    #[test]
    fn non_increasing_times_and_negative_flow_contribute_nothing() {
        let program = GradientProgram::new(vec![
            step(0.0, 50.0, 1.0, CurveType::Linear),
            step(0.0, 50.0, 1.0, CurveType::Linear),
            step(5.0, 50.0, -2.0, CurveType::Linear),
            step(3.0, 50.0, 1.0, CurveType::Linear),
        ]);
        let volumes = VolumeAccumulator::default().accumulate(&program);
        assert_eq!(volumes.segments.len(), 3);
        assert!(f64_approx_equal(volumes.total_volume, 0.0, TOLERANCE));
        assert!(f64_approx_equal(volumes.delivered_volume, 0.0, TOLERANCE));
    }

    #[test]
    fn distribute_splits_by_percentage_and_drops_blank_names() {
        let components = vec![
            PhaseComponent::new("Water", 75.0),
            PhaseComponent::new(" ", 50.0),
            PhaseComponent::new("Formic Acid", 25.0),
        ];
        let parts = distribute(&components, 8.0);
        assert_eq!(parts.len(), 2);
        assert!(f64_approx_equal(parts[0].volume, 6.0, TOLERANCE));
        assert!(f64_approx_equal(parts[1].volume, 2.0, TOLERANCE));
    }

    #[test]
    fn distribute_with_zero_percentages_yields_zero_volumes() {
        let parts = distribute(&[PhaseComponent::new("Water", 0.0)], 8.0);
        assert_eq!(parts[0].volume, 0.0);
    }

    fn program_strategy() -> impl Strategy<Value = GradientProgram> {
        prop::collection::vec((0.01f64..20.0, 0.0f64..=100.0, 0.0f64..5.0, 0usize..11), 1..8)
            .prop_map(|rows| {
                let mut time = 0.0;
                let steps = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, (dt, a, flow, curve))| {
                        if i > 0 {
                            time += dt;
                        }
                        step(time, a, flow, CurveType::ALL[curve])
                    })
                    .collect();
                GradientProgram::new(steps)
            })
    }

    proptest! {
        #[test]
        fn channel_volumes_sum_to_delivered_volume(program in program_strategy(), trailing in any::<bool>()) {
            let convention = if trailing { SegmentConvention::Trailing } else { SegmentConvention::Leading };
            let volumes = VolumeAccumulator::new(DEFAULT_SAMPLES, convention).accumulate(&program);
            prop_assert!(f64_approx_equal(volumes.total_volume, volumes.delivered_volume, 1e-6));
            prop_assert!(volumes.volume_a >= -1e-9 && volumes.volume_b >= -1e-9);
        }
    }
}
