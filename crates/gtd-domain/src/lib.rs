//! # GTD Insight - Domain Model
//!
//! Event records, derived statistics, and the payload shapes returned by the query
//! service. These types are the single source of truth across all layers: dataset
//! preparation, analytics, API, and dashboard.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod ordered;
pub mod payload;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use ordered::OrderedMap;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Verbose vehicle label used by the source dataset.
pub const VEHICLE_LABEL_VERBOSE: &str =
    "Vehicle (not to include vehicle-borne explosives, i.e., car or truck bombs)";

/// Canonical short vehicle label.
pub const VEHICLE_LABEL: &str = "Vehicle";

/// Significance level for the weapon usage hypothesis test.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Map a weapon label to its canonical form.
///
/// Only the verbose vehicle label is rewritten; every other label passes through.
#[must_use]
pub fn normalize_weapon_type(label: &str) -> &str {
    if label == VEHICLE_LABEL_VERBOSE {
        VEHICLE_LABEL
    } else {
        label
    }
}

// =============================================================================
// EVENT RECORD
// =============================================================================

/// One recorded incident, after column selection and normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: i32,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Success_Status")]
    pub success_status: Option<i32>,
    #[serde(rename = "Attack_Type")]
    pub attack_type: Option<String>,
    #[serde(rename = "Target_Type")]
    pub target_type: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "Group_Name")]
    pub group_name: Option<String>,
    #[serde(rename = "Weapon_Type")]
    pub weapon_type: Option<String>,
    #[serde(rename = "Num_Killed")]
    pub num_killed: Option<f64>,
    #[serde(rename = "Num_Wounded")]
    pub num_wounded: Option<f64>,
    #[serde(rename = "Total_Casualties")]
    pub total_casualties: f64,
}

impl EventRecord {
    /// Killed plus wounded, missing counts as zero.
    ///
    /// Negative counts are clamped so the total is never below zero.
    #[must_use]
    pub fn casualties(num_killed: Option<f64>, num_wounded: Option<f64>) -> f64 {
        let count = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0).max(0.0);
        count(num_killed) + count(num_wounded)
    }
}

/// Canonical names of every event column, in table order.
pub const EVENT_COLUMNS: [&str; 15] = [
    "Year",
    "Month",
    "Country",
    "Region",
    "Latitude",
    "Longitude",
    "Success_Status",
    "Attack_Type",
    "Target_Type",
    "Nationality",
    "Group_Name",
    "Weapon_Type",
    "Num_Killed",
    "Num_Wounded",
    "Total_Casualties",
];

// =============================================================================
// AGGREGATION ROWS
// =============================================================================

/// Per-weapon-type average casualties and usage count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStat {
    #[serde(rename = "Weapon_Type")]
    pub weapon_type: String,
    pub avg_casualties: f64,
    pub usage_count: i64,
}

/// Killed/wounded sums for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCasualties {
    pub region: String,
    pub num_killed: f64,
    pub num_wounded: f64,
    pub total_casualties: f64,
}

/// Killed/wounded sums for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCasualties {
    pub year: i32,
    pub num_killed: f64,
    pub num_wounded: f64,
}

/// Event count for one (year, attack type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAttackCount {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Attack_Type")]
    pub attack_type: String,
    #[serde(rename = "Count")]
    pub count: i64,
}

/// Event count for one (year, region, attack type) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalAttackCount {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Attack_Type")]
    pub attack_type: String,
    #[serde(rename = "Count")]
    pub count: i64,
}

/// Located event for the global distribution map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Attack_Type")]
    pub attack_type: String,
}

/// `describe()`-style summary of one numeric column.
///
/// Statistics over zero observations are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: i64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

// =============================================================================
// HYPOTHESIS TEST
// =============================================================================

/// Outcome of the weapon usage hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Confirmed,
    Rejected,
}

impl Verdict {
    /// `Confirmed` when `p_value <= SIGNIFICANCE_LEVEL`. NaN is `Rejected`.
    #[must_use]
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value <= SIGNIFICANCE_LEVEL {
            Self::Confirmed
        } else {
            Self::Rejected
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variance assumption for the two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceAssumption {
    /// Student's t-test with pooled variance (equal variances assumed).
    #[default]
    Pooled,
    /// Welch's t-test (unequal variances).
    Welch,
}

impl VarianceAssumption {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pooled => "pooled",
            Self::Welch => "welch",
        }
    }
}

impl FromStr for VarianceAssumption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pooled" | "student" | "equal" => Ok(Self::Pooled),
            "welch" | "unequal" => Ok(Self::Welch),
            other => Err(DomainError::UnknownVarianceAssumption(other.to_string())),
        }
    }
}

/// Full result of the weapon usage test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisOutcome {
    /// Two-sided p-value; `null` in JSON when the statistic is undefined.
    #[serde(deserialize_with = "null_as_nan")]
    pub p_value: f64,
    pub hypothesis_result: Verdict,
    #[serde(deserialize_with = "null_as_nan")]
    pub t_statistic: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub degrees_of_freedom: f64,
    pub variance: VarianceAssumption,
    pub median_usage: f64,
    pub high_usage: Vec<String>,
    pub low_usage: Vec<String>,
}

/// serde_json writes non-finite floats as `null`; read them back as NaN.
pub fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown variance assumption: {0} (expected 'pooled' or 'welch')")]
    UnknownVarianceAssumption(String),
}
