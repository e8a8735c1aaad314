//! Query service payloads.
//!
//! One struct per endpoint. Field names and nesting follow the published JSON
//! contract, so the dashboard can deserialize exactly what the API serializes.

use serde::{Deserialize, Serialize};

use crate::{
    null_as_nan, ColumnSummary, EventRecord, GeoPoint, HypothesisOutcome, OrderedMap,
    RegionCasualties, RegionalAttackCount, WeaponStat, YearlyAttackCount, YearlyCasualties,
};

/// `/data/overview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPayload {
    pub overview: OrderedMap<String, ColumnSummary>,
    pub missing_values: OrderedMap<String, i64>,
}

/// `/data/sample`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePayload {
    pub sample: Vec<EventRecord>,
}

/// `/data/yearly-trends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTrendsPayload {
    pub yearly_counts: OrderedMap<i32, i64>,
}

/// `/data/attack-types`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTypesPayload {
    pub attack_counts: OrderedMap<String, i64>,
}

/// `/data/weapon-popularity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponPopularityPayload {
    pub weapon_counts: OrderedMap<String, i64>,
}

/// Weapon statistics laid out column by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStatColumns {
    pub avg_casualties: OrderedMap<String, f64>,
    pub usage_count: OrderedMap<String, i64>,
}

impl From<&[WeaponStat]> for WeaponStatColumns {
    fn from(stats: &[WeaponStat]) -> Self {
        Self {
            avg_casualties: stats
                .iter()
                .map(|s| (s.weapon_type.clone(), s.avg_casualties))
                .collect(),
            usage_count: stats
                .iter()
                .map(|s| (s.weapon_type.clone(), s.usage_count))
                .collect(),
        }
    }
}

/// `/data/weapon-casualties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponCasualtiesPayload {
    pub weapon_stats: WeaponStatColumns,
    #[serde(deserialize_with = "null_as_nan")]
    pub p_value: f64,
}

/// Killed/wounded sums laid out column by column, keyed by region or year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasualtyColumns<K> {
    #[serde(rename = "Num_Killed")]
    pub num_killed: OrderedMap<K, f64>,
    #[serde(rename = "Num_Wounded")]
    pub num_wounded: OrderedMap<K, f64>,
    #[serde(
        rename = "Total_Casualties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_casualties: Option<OrderedMap<K, f64>>,
}

impl From<&[RegionCasualties]> for CasualtyColumns<String> {
    fn from(rows: &[RegionCasualties]) -> Self {
        Self {
            num_killed: rows.iter().map(|r| (r.region.clone(), r.num_killed)).collect(),
            num_wounded: rows.iter().map(|r| (r.region.clone(), r.num_wounded)).collect(),
            total_casualties: Some(
                rows.iter()
                    .map(|r| (r.region.clone(), r.total_casualties))
                    .collect(),
            ),
        }
    }
}

impl From<&[YearlyCasualties]> for CasualtyColumns<i32> {
    fn from(rows: &[YearlyCasualties]) -> Self {
        Self {
            num_killed: rows.iter().map(|r| (r.year, r.num_killed)).collect(),
            num_wounded: rows.iter().map(|r| (r.year, r.num_wounded)).collect(),
            total_casualties: None,
        }
    }
}

/// `/data/total-casualties-by-region`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCasualtiesPayload {
    pub region_casualties: CasualtyColumns<String>,
}

/// `/data/annual-trends-casualties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCasualtiesPayload {
    pub yearly_casualties: CasualtyColumns<i32>,
}

/// `/data/attack-types-over-time`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTypesOverTimePayload {
    pub attack_types_over_time: Vec<YearlyAttackCount>,
}

/// `/data/attack-types-by-region`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTypesByRegionPayload {
    pub attack_types_by_region: Vec<RegionalAttackCount>,
}

/// `/data/global-distribution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDistributionPayload {
    pub global_distribution: Vec<GeoPoint>,
}

/// `/data/weapon-analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponAnalysisPayload {
    pub weapon_stats: Vec<WeaponStat>,
}

/// `/data/weapon-hypothesis-test`
pub type HypothesisPayload = HypothesisOutcome;

/// `/api/eda/all-graphs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaGraphsPayload {
    pub yearly_counts: OrderedMap<i32, i64>,
    pub top_countries: OrderedMap<String, i64>,
    pub attack_types: OrderedMap<String, i64>,
}
