//! # GraphQL Output Types
//!
//! Object type definitions for GraphQL responses. Non-finite floats have no
//! GraphQL representation and are exposed as `null`.

use async_graphql::SimpleObject;
use gtd_domain as domain;

use super::enums::{Variance, Verdict};

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

// =============================================================================
// COUNTS
// =============================================================================

/// Event count for one category value
#[derive(Debug, Clone, SimpleObject)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

impl From<(String, i64)> for CategoryCount {
    fn from((label, count): (String, i64)) -> Self {
        Self { label, count }
    }
}

/// Event count for one year
#[derive(Debug, Clone, SimpleObject)]
pub struct YearCount {
    pub year: i32,
    pub count: i64,
}

impl From<(i32, i64)> for YearCount {
    fn from((year, count): (i32, i64)) -> Self {
        Self { year, count }
    }
}

/// Event count for one (year, attack type) pair
#[derive(Debug, Clone, SimpleObject)]
pub struct YearlyAttackCount {
    pub year: i32,
    pub attack_type: String,
    pub count: i64,
}

impl From<domain::YearlyAttackCount> for YearlyAttackCount {
    fn from(r: domain::YearlyAttackCount) -> Self {
        Self {
            year: r.year,
            attack_type: r.attack_type,
            count: r.count,
        }
    }
}

// =============================================================================
// CASUALTIES
// =============================================================================

/// Casualty sums for one region
#[derive(Debug, Clone, SimpleObject)]
pub struct RegionCasualties {
    pub region: String,
    pub num_killed: f64,
    pub num_wounded: f64,
    pub total_casualties: f64,
}

impl From<domain::RegionCasualties> for RegionCasualties {
    fn from(r: domain::RegionCasualties) -> Self {
        Self {
            region: r.region,
            num_killed: r.num_killed,
            num_wounded: r.num_wounded,
            total_casualties: r.total_casualties,
        }
    }
}

/// Casualty sums for one year
#[derive(Debug, Clone, SimpleObject)]
pub struct YearlyCasualties {
    pub year: i32,
    pub num_killed: f64,
    pub num_wounded: f64,
}

impl From<domain::YearlyCasualties> for YearlyCasualties {
    fn from(r: domain::YearlyCasualties) -> Self {
        Self {
            year: r.year,
            num_killed: r.num_killed,
            num_wounded: r.num_wounded,
        }
    }
}

// =============================================================================
// WEAPONS
// =============================================================================

/// Average casualties and usage for one weapon type
#[derive(Debug, Clone, SimpleObject)]
pub struct WeaponStat {
    pub weapon_type: String,
    pub avg_casualties: f64,
    pub usage_count: i64,
}

impl From<domain::WeaponStat> for WeaponStat {
    fn from(s: domain::WeaponStat) -> Self {
        Self {
            weapon_type: s.weapon_type,
            avg_casualties: s.avg_casualties,
            usage_count: s.usage_count,
        }
    }
}

/// Weapon usage hypothesis test result
#[derive(Debug, Clone, SimpleObject)]
pub struct HypothesisResult {
    pub p_value: Option<f64>,
    pub hypothesis_result: Verdict,
    pub t_statistic: Option<f64>,
    pub degrees_of_freedom: Option<f64>,
    pub variance: Variance,
    pub median_usage: f64,
    pub high_usage: Vec<String>,
    pub low_usage: Vec<String>,
}

impl From<domain::HypothesisOutcome> for HypothesisResult {
    fn from(o: domain::HypothesisOutcome) -> Self {
        Self {
            p_value: finite(o.p_value),
            hypothesis_result: o.hypothesis_result.into(),
            t_statistic: finite(o.t_statistic),
            degrees_of_freedom: finite(o.degrees_of_freedom),
            variance: o.variance.into(),
            median_usage: o.median_usage,
            high_usage: o.high_usage,
            low_usage: o.low_usage,
        }
    }
}

// =============================================================================
// EVENTS & OVERVIEW
// =============================================================================

/// Located event
#[derive(Debug, Clone, SimpleObject)]
pub struct GeoPoint {
    pub year: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub attack_type: String,
}

impl From<domain::GeoPoint> for GeoPoint {
    fn from(p: domain::GeoPoint) -> Self {
        Self {
            year: p.year,
            latitude: p.latitude,
            longitude: p.longitude,
            attack_type: p.attack_type,
        }
    }
}

/// One prepared event
#[derive(Debug, Clone, SimpleObject)]
pub struct Event {
    pub year: i32,
    pub month: i32,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub success_status: Option<i32>,
    pub attack_type: Option<String>,
    pub target_type: Option<String>,
    pub nationality: Option<String>,
    pub group_name: Option<String>,
    pub weapon_type: Option<String>,
    pub num_killed: Option<f64>,
    pub num_wounded: Option<f64>,
    pub total_casualties: f64,
}

impl From<domain::EventRecord> for Event {
    fn from(e: domain::EventRecord) -> Self {
        Self {
            year: e.year,
            month: e.month,
            country: e.country,
            region: e.region,
            latitude: e.latitude.and_then(finite),
            longitude: e.longitude.and_then(finite),
            success_status: e.success_status,
            attack_type: e.attack_type,
            target_type: e.target_type,
            nationality: e.nationality,
            group_name: e.group_name,
            weapon_type: e.weapon_type,
            num_killed: e.num_killed.and_then(finite),
            num_wounded: e.num_wounded.and_then(finite),
            total_casualties: e.total_casualties,
        }
    }
}

/// Summary statistics of one numeric column
#[derive(Debug, Clone, SimpleObject)]
pub struct ColumnSummary {
    pub column: String,
    pub count: i64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl From<(String, domain::ColumnSummary)> for ColumnSummary {
    fn from((column, s): (String, domain::ColumnSummary)) -> Self {
        Self {
            column,
            count: s.count,
            mean: s.mean,
            std: s.std,
            min: s.min,
            p25: s.p25,
            p50: s.p50,
            p75: s.p75,
            max: s.max,
        }
    }
}

/// Missing values of one column
#[derive(Debug, Clone, SimpleObject)]
pub struct MissingValues {
    pub column: String,
    pub missing: i64,
}

impl From<(String, i64)> for MissingValues {
    fn from((column, missing): (String, i64)) -> Self {
        Self { column, missing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_p_value_becomes_null() {
        let outcome = domain::HypothesisOutcome {
            p_value: f64::NAN,
            hypothesis_result: domain::Verdict::Rejected,
            t_statistic: f64::NAN,
            degrees_of_freedom: 2.0,
            variance: domain::VarianceAssumption::Pooled,
            median_usage: 5.0,
            high_usage: vec!["A".into(), "C".into()],
            low_usage: vec!["B".into(), "D".into()],
        };
        let result = HypothesisResult::from(outcome);
        assert_eq!(result.p_value, None);
        assert_eq!(result.degrees_of_freedom, Some(2.0));
        assert_eq!(result.hypothesis_result, Verdict::Rejected);
    }
}
