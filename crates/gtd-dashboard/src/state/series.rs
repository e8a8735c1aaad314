//! Reshaping of API payloads into chart-ready series.

use gtd_domain::{GeoPoint, OrderedMap, RegionalAttackCount, YearlyAttackCount};

/// Share of each label in the total, in percent rounded to one decimal.
pub fn percentages(counts: &OrderedMap<String, i64>) -> Vec<(String, f64)> {
    let total: i64 = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .map(|(label, &n)| {
            let pct = n as f64 / total as f64 * 100.0;
            (label.clone(), (pct * 10.0).round() / 10.0)
        })
        .collect()
}

/// Yearly counts laid out as one row per label and one column per year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearMatrix {
    pub years: Vec<i32>,
    pub labels: Vec<String>,
    /// `counts[label][year]`, zero where the pair has no events
    pub counts: Vec<Vec<i64>>,
}

impl YearMatrix {
    fn pivot<'a>(cells: impl Iterator<Item = (i32, &'a str, i64)> + Clone) -> Self {
        let mut years: Vec<i32> = cells.clone().map(|(year, _, _)| year).collect();
        years.sort_unstable();
        years.dedup();

        let mut labels: Vec<String> = cells.clone().map(|(_, label, _)| label.to_string()).collect();
        labels.sort();
        labels.dedup();

        let mut counts = vec![vec![0; years.len()]; labels.len()];
        for (year, label, count) in cells {
            let (Ok(l), Ok(y)) = (
                labels.binary_search_by(|known| known.as_str().cmp(label)),
                years.binary_search(&year),
            ) else {
                continue;
            };
            counts[l][y] += count;
        }

        Self {
            years,
            labels,
            counts,
        }
    }

    /// Attack types per year, for the records that fall within `from..=to`.
    pub fn attack_types(rows: &[YearlyAttackCount], from: i32, to: i32) -> Self {
        Self::pivot(
            rows.iter()
                .filter(move |r| (from..=to).contains(&r.year))
                .map(|r| (r.year, r.attack_type.as_str(), r.count)),
        )
    }

    /// Regions per year, for the records of a single attack type.
    pub fn regions(rows: &[RegionalAttackCount], attack_type: &str) -> Self {
        Self::pivot(
            rows.iter()
                .filter(move |r| r.attack_type == attack_type)
                .map(|r| (r.year, r.region.as_str(), r.count)),
        )
    }
}

/// Distinct attack types in the regional records, sorted.
pub fn regional_attack_types(rows: &[RegionalAttackCount]) -> Vec<String> {
    let mut types: Vec<String> = rows.iter().map(|r| r.attack_type.clone()).collect();
    types.sort();
    types.dedup();
    types
}

/// First and last year present in the records.
pub fn year_span(rows: &[YearlyAttackCount]) -> Option<(i32, i32)> {
    let min = rows.iter().map(|r| r.year).min()?;
    let max = rows.iter().map(|r| r.year).max()?;
    Some((min, max))
}

/// Distinct years with at least one located event, ascending.
pub fn distinct_years(points: &[GeoPoint]) -> Vec<i32> {
    let mut years: Vec<i32> = points.iter().map(|p| p.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

pub fn points_in_year(points: &[GeoPoint], year: i32) -> impl Iterator<Item = &GeoPoint> {
    points.iter().filter(move |p| p.year == year)
}
