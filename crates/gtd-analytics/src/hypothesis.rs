//! Weapon usage hypothesis test.
//!
//! Hypothesis: weapon types used more often than the median cause a different
//! average number of casualties than the rest. Each weapon type contributes one
//! observation (its mean casualties) to either the high or the low usage group, and
//! the two groups are compared with an independent two-sample t-test.

use gtd_domain::{HypothesisOutcome, VarianceAssumption, Verdict, WeaponStat};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::{Data, Median, Statistics};

use crate::engine::AnalyticsEngine;
use crate::error::{AnalyticsError, Result};

/// Weapon types split around the median usage count.
#[derive(Debug, Clone, PartialEq)]
pub struct UsagePartition {
    pub median: f64,
    /// Usage count strictly above the median.
    pub high: Vec<WeaponStat>,
    /// Usage count at or below the median.
    pub low: Vec<WeaponStat>,
}

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-sided; NaN when the statistic is undefined.
    pub p_value: f64,
}

/// Split `stats` around the median usage count.
///
/// # Errors
///
/// [`AnalyticsError::NoData`] when `stats` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn partition_by_usage(stats: &[WeaponStat]) -> Result<UsagePartition> {
    if stats.is_empty() {
        return Err(AnalyticsError::NoData);
    }

    let counts: Vec<f64> = stats.iter().map(|s| s.usage_count as f64).collect();
    let median = Data::new(counts).median();

    let (high, low) = stats
        .iter()
        .cloned()
        .partition(|s| s.usage_count as f64 > median);

    Ok(UsagePartition { median, high, low })
}

/// Independent two-sample t-test of `a` against `b`.
///
/// Both samples need at least two observations; the caller checks sizes.
///
/// # Errors
///
/// [`AnalyticsError::Statistics`] if the t distribution cannot be built.
#[allow(clippy::cast_precision_loss)]
pub fn two_sample_t_test(a: &[f64], b: &[f64], variance: VarianceAssumption) -> Result<TTest> {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (a.iter().mean(), b.iter().mean());
    let (v1, v2) = (a.iter().variance(), b.iter().variance());

    let (standard_error, degrees_of_freedom) = match variance {
        VarianceAssumption::Pooled => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        VarianceAssumption::Welch => {
            let (s1, s2) = (v1 / n1, v2 / n2);
            let df = (s1 + s2).powi(2) / (s1.powi(2) / (n1 - 1.0) + s2.powi(2) / (n2 - 1.0));
            ((s1 + s2).sqrt(), df)
        }
    };

    let t_statistic = (m1 - m2) / standard_error;
    let p_value = two_sided_p_value(t_statistic, degrees_of_freedom)?;

    Ok(TTest {
        t_statistic,
        degrees_of_freedom,
        p_value,
    })
}

fn two_sided_p_value(t: f64, df: f64) -> Result<f64> {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return Ok(f64::NAN);
    }
    if t.is_infinite() {
        return Ok(0.0);
    }

    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AnalyticsError::Statistics(e.to_string()))?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// Partition `stats` by usage and test whether average casualties differ.
///
/// # Errors
///
/// [`AnalyticsError::NoData`] for empty input and
/// [`AnalyticsError::InsufficientSample`] when either group has fewer than two
/// weapon types.
pub fn weapon_usage_test(
    stats: &[WeaponStat],
    variance: VarianceAssumption,
) -> Result<HypothesisOutcome> {
    let partition = partition_by_usage(stats)?;

    for (group, members) in [("high", &partition.high), ("low", &partition.low)] {
        if members.len() < 2 {
            return Err(AnalyticsError::InsufficientSample {
                group,
                size: members.len(),
            });
        }
    }

    let high: Vec<f64> = partition.high.iter().map(|s| s.avg_casualties).collect();
    let low: Vec<f64> = partition.low.iter().map(|s| s.avg_casualties).collect();
    let test = two_sample_t_test(&high, &low, variance)?;

    Ok(HypothesisOutcome {
        p_value: test.p_value,
        hypothesis_result: Verdict::from_p_value(test.p_value),
        t_statistic: test.t_statistic,
        degrees_of_freedom: test.degrees_of_freedom,
        variance,
        median_usage: partition.median,
        high_usage: partition.high.into_iter().map(|s| s.weapon_type).collect(),
        low_usage: partition.low.into_iter().map(|s| s.weapon_type).collect(),
    })
}

impl AnalyticsEngine {
    /// Run the weapon usage test over the current weapon statistics.
    ///
    /// # Errors
    ///
    /// Query failures and every error of [`weapon_usage_test`].
    pub fn weapon_hypothesis_test(
        &self,
        variance: VarianceAssumption,
    ) -> Result<HypothesisOutcome> {
        let stats = self.weapon_stats()?;
        let outcome = weapon_usage_test(&stats, variance)?;

        tracing::info!(
            weapon_types = stats.len(),
            variance = variance.as_str(),
            p_value = outcome.p_value,
            verdict = %outcome.hypothesis_result,
            "Weapon usage hypothesis tested"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stat(name: &str, usage_count: i64, avg_casualties: f64) -> WeaponStat {
        WeaponStat {
            weapon_type: name.to_string(),
            avg_casualties,
            usage_count,
        }
    }

    fn scenario() -> Vec<WeaponStat> {
        vec![
            stat("A", 10, 5.0),
            stat("B", 2, 1.0),
            stat("C", 8, 4.0),
            stat("D", 1, 0.5),
        ]
    }

    #[test]
    fn test_partition_scenario() {
        let partition = partition_by_usage(&scenario()).unwrap();
        assert_eq!(partition.median, 5.0);
        let high: Vec<_> = partition.high.iter().map(|s| s.weapon_type.as_str()).collect();
        let low: Vec<_> = partition.low.iter().map(|s| s.weapon_type.as_str()).collect();
        assert_eq!(high, vec!["A", "C"]);
        assert_eq!(low, vec!["B", "D"]);
    }

    #[test]
    fn test_ties_with_median_go_low() {
        let stats = vec![stat("A", 3, 1.0), stat("B", 3, 2.0), stat("C", 3, 3.0)];
        let partition = partition_by_usage(&stats).unwrap();
        assert!(partition.high.is_empty());
        assert_eq!(partition.low.len(), 3);
    }

    #[test]
    fn test_empty_stats_is_no_data() {
        assert!(matches!(partition_by_usage(&[]), Err(AnalyticsError::NoData)));
    }

    #[test]
    fn test_pooled_scenario_is_confirmed() {
        let outcome = weapon_usage_test(&scenario(), VarianceAssumption::Pooled).unwrap();

        let t = 3.75 / 0.3125f64.sqrt();
        assert!((outcome.t_statistic - t).abs() < 1e-9);
        assert_eq!(outcome.degrees_of_freedom, 2.0);
        // Closed form of the two-sided p-value for two degrees of freedom
        let expected = 1.0 - t / (t * t + 2.0).sqrt();
        assert!((outcome.p_value - expected).abs() < 1e-6);
        assert_eq!(outcome.hypothesis_result, Verdict::Confirmed);
        assert_eq!(outcome.high_usage, vec!["A", "C"]);
    }

    #[test]
    fn test_welch_has_fewer_degrees_of_freedom() {
        let pooled = weapon_usage_test(&scenario(), VarianceAssumption::Pooled).unwrap();
        let welch = weapon_usage_test(&scenario(), VarianceAssumption::Welch).unwrap();

        assert!((welch.degrees_of_freedom - 0.097_656_25 / 0.066_406_25).abs() < 1e-9);
        assert!((welch.t_statistic - pooled.t_statistic).abs() < 1e-9);
        assert!(welch.p_value > pooled.p_value);
        assert_eq!(welch.variance, VarianceAssumption::Welch);
    }

    #[test]
    fn test_single_member_group_is_rejected_as_input() {
        let stats = vec![stat("A", 10, 5.0), stat("B", 1, 1.0), stat("C", 1, 2.0)];
        let err = weapon_usage_test(&stats, VarianceAssumption::Pooled).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::InsufficientSample { group: "high", size: 1 }
        ));
    }

    #[test]
    fn test_zero_variance_gives_nan_and_rejected() {
        let stats = vec![
            stat("A", 10, 2.0),
            stat("B", 9, 2.0),
            stat("C", 1, 2.0),
            stat("D", 2, 2.0),
        ];
        let outcome = weapon_usage_test(&stats, VarianceAssumption::Pooled).unwrap();
        assert!(outcome.p_value.is_nan());
        assert_eq!(outcome.hypothesis_result, Verdict::Rejected);

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["p_value"].is_null());
    }

    #[test]
    fn test_separated_constant_groups_give_zero_p() {
        let test = two_sample_t_test(&[3.0, 3.0], &[1.0, 1.0], VarianceAssumption::Pooled).unwrap();
        assert!(test.t_statistic.is_infinite());
        assert_eq!(test.p_value, 0.0);
    }

    fn weapon_stats_strategy() -> impl Strategy<Value = Vec<WeaponStat>> {
        prop::collection::vec((1i64..500, 0.0f64..50.0), 4..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (count, avg))| stat(&format!("W{i}"), count, avg))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_partition_is_exhaustive_and_disjoint(stats in weapon_stats_strategy()) {
            let partition = partition_by_usage(&stats).unwrap();
            prop_assert_eq!(partition.high.len() + partition.low.len(), stats.len());
            for s in &partition.high {
                prop_assert!(!partition.low.contains(s));
            }
        }

        #[test]
        fn prop_p_value_ignores_row_order(
            (stats, shuffled) in weapon_stats_strategy()
                .prop_flat_map(|s| (Just(s.clone()), Just(s).prop_shuffle()))
        ) {
            let a = weapon_usage_test(&stats, VarianceAssumption::Pooled);
            let b = weapon_usage_test(&shuffled, VarianceAssumption::Pooled);
            match (a, b) {
                (Ok(a), Ok(b)) => {
                    prop_assert!(
                        (a.p_value.is_nan() && b.p_value.is_nan())
                            || (a.p_value - b.p_value).abs() < 1e-9
                    );
                    prop_assert_eq!(a.hypothesis_result, b.hypothesis_result);
                }
                (Err(_), Err(_)) => {}
                (a, b) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", a, b),
            }
        }
    }
}
