use super::result::ScoreResult;
use crate::core::scoring::term::Factor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A score result labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedResult {
    pub label: String,
    pub result: ScoreResult,
}

impl TaggedResult {
    pub fn new(label: impl Into<String>, result: ScoreResult) -> Self {
        Self {
            label: label.into(),
            result,
        }
    }
}

/// The lowest-valued document for one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEntry {
    pub index: usize,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub index: usize,
    pub label: String,
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comparison {
    /// Labels in insertion order.
    pub labels: Vec<String>,
    /// One value per document for each factor, aligned with `labels`.
    pub series: BTreeMap<Factor, Vec<f64>>,
    pub best: BTreeMap<Factor, BestEntry>,
    /// Documents by ascending total score; equal scores keep insertion order.
    pub ranking: Vec<RankedEntry>,
    pub recommendation: Option<RankedEntry>,
}

/// NaN compares greater than every number so it never wins.
#[inline]
fn ascending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn best_of(entries: &[TaggedResult], factor: Factor) -> Option<BestEntry> {
    let mut best: Option<BestEntry> = None;
    for (index, entry) in entries.iter().enumerate() {
        let value = entry.result.factors().get(factor);
        let better = match &best {
            None => true,
            Some(current) => ascending(value, current.value) == Ordering::Less,
        };
        if better {
            best = Some(BestEntry {
                index,
                label: entry.label.clone(),
                value,
            });
        }
    }
    best
}

impl Comparison {
    pub fn build(entries: &[TaggedResult]) -> Self {
        let labels = entries.iter().map(|e| e.label.clone()).collect();

        let series = Factor::ALL
            .into_iter()
            .map(|factor| {
                let values = entries
                    .iter()
                    .map(|e| e.result.factors().get(factor))
                    .collect();
                (factor, values)
            })
            .collect();

        let best = Factor::ALL
            .into_iter()
            .filter_map(|factor| best_of(entries, factor).map(|b| (factor, b)))
            .collect();

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| {
            ascending(
                entries[a].result.total_score(),
                entries[b].result.total_score(),
            )
        });
        let ranking: Vec<RankedEntry> = order
            .into_iter()
            .enumerate()
            .map(|(position, index)| RankedEntry {
                rank: position + 1,
                index,
                label: entries[index].label.clone(),
                total_score: entries[index].result.total_score(),
            })
            .collect();
        let recommendation = ranking.first().cloned();

        Self {
            labels,
            series,
            best,
            ranking,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::term::FactorScores;
    use crate::engine::result::FinalResult;
    use proptest::prelude::*;

    fn tagged(label: &str, score: f64, factors: FactorScores) -> TaggedResult {
        TaggedResult::new(
            label,
            ScoreResult {
                final_score: FinalResult {
                    score3: score,
                    factors,
                    ..Default::default()
                },
                ..Default::default()
            },
        )
    }

    fn uniform(value: f64) -> FactorScores {
        FactorScores::new(value, value, value, value, value, value)
    }

    #[test]
    fn empty_input_has_no_recommendation() {
        let comparison = Comparison::build(&[]);
        assert!(comparison.ranking.is_empty());
        assert!(comparison.best.is_empty());
        assert!(comparison.recommendation.is_none());
        assert!(comparison.series[&Factor::Safety].is_empty());
    }

    #[test]
    fn best_per_factor_picks_minimum() {
        let mut b = uniform(5.0);
        b.health = 1.0;
        let entries = vec![
            tagged("A", 30.0, uniform(3.0)),
            tagged("B", 20.0, b),
            tagged("C", 10.0, uniform(4.0)),
        ];
        let comparison = Comparison::build(&entries);
        assert_eq!(comparison.best[&Factor::Safety].label, "A");
        assert_eq!(comparison.best[&Factor::Health].label, "B");
        assert_eq!(comparison.best[&Factor::Health].value, 1.0);
        assert_eq!(comparison.series[&Factor::Safety], vec![3.0, 5.0, 4.0]);
    }

    #[test]
    fn ranking_is_ascending_and_recommends_lowest_total() {
        let entries = vec![
            tagged("A", 30.0, uniform(1.0)),
            tagged("B", 10.0, uniform(1.0)),
            tagged("C", 20.0, uniform(1.0)),
        ];
        let comparison = Comparison::build(&entries);
        let labels: Vec<_> = comparison.ranking.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C", "A"]);
        assert_eq!(comparison.ranking[0].rank, 1);
        assert_eq!(comparison.recommendation.unwrap().label, "B");
    }

    #[test]
    fn ties_resolve_to_earliest_inserted() {
        let entries = vec![
            tagged("first", 5.0, uniform(2.0)),
            tagged("second", 5.0, uniform(2.0)),
        ];
        let comparison = Comparison::build(&entries);
        assert_eq!(comparison.ranking[0].label, "first");
        for factor in Factor::ALL {
            assert_eq!(comparison.best[&factor].index, 0);
        }
    }

    #[test]
    fn nan_scores_rank_last() {
        let entries = vec![tagged("nan", f64::NAN, uniform(f64::NAN)), tagged("ok", 50.0, uniform(9.0))];
        let comparison = Comparison::build(&entries);
        assert_eq!(comparison.ranking[0].label, "ok");
        assert_eq!(comparison.best[&Factor::Power].label, "ok");
    }

    proptest! {
        #[test]
        fn best_is_minimum_and_earliest(values in prop::collection::vec(0u8..5, 1..12)) {
            let entries: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| tagged(&i.to_string(), v as f64, uniform(v as f64)))
                .collect();
            let comparison = Comparison::build(&entries);
            let min = *values.iter().min().unwrap();
            let first = values.iter().position(|&v| v == min).unwrap();
            prop_assert_eq!(comparison.best[&Factor::Safety].index, first);
            prop_assert_eq!(comparison.ranking[0].index, first);
            let scores: Vec<f64> = comparison.ranking.iter().map(|r| r.total_score).collect();
            prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
