//! Report generation for analytics data.

use std::fmt::Write as _;

use gtd_domain::{
    payload::EdaGraphsPayload, HypothesisOutcome, OrderedMap, RegionCasualties,
    VarianceAssumption, WeaponStat, SIGNIFICANCE_LEVEL,
};
use serde::{Deserialize, Serialize};

use crate::engine::AnalyticsEngine;
use crate::error::{AnalyticsError, Result};

/// Every aggregation plus the hypothesis test, in one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub generated_at: String,
    pub total_events: i64,
    pub yearly_counts: OrderedMap<i32, i64>,
    pub top_countries: OrderedMap<String, i64>,
    pub attack_types: OrderedMap<String, i64>,
    pub region_casualties: Vec<RegionCasualties>,
    pub weapon_stats: Vec<WeaponStat>,
    /// `None` when the data cannot support the test (no weapons, or a group too small).
    pub hypothesis: Option<HypothesisOutcome>,
}

impl AnalyticsEngine {
    /// Yearly counts, top countries and attack types for the EDA section.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn eda_graphs(&self, top_countries: usize) -> Result<EdaGraphsPayload> {
        Ok(EdaGraphsPayload {
            yearly_counts: self.yearly_counts()?,
            top_countries: self.top_countries(top_countries)?,
            attack_types: self.attack_type_counts()?,
        })
    }

    /// Generate comprehensive analytics report.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails. An untestable hypothesis is not an error.
    pub fn generate_report(
        &self,
        top_countries: usize,
        variance: VarianceAssumption,
    ) -> Result<AnalyticsReport> {
        let hypothesis = match self.weapon_hypothesis_test(variance) {
            Ok(outcome) => Some(outcome),
            Err(AnalyticsError::NoData | AnalyticsError::InsufficientSample { .. }) => None,
            Err(e) => return Err(e),
        };

        Ok(AnalyticsReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_events: self.event_count()?,
            yearly_counts: self.yearly_counts()?,
            top_countries: self.top_countries(top_countries)?,
            attack_types: self.attack_type_counts()?,
            region_casualties: self.region_casualties()?,
            weapon_stats: self.weapon_stats()?,
            hypothesis,
        })
    }

    /// Generate report as JSON string.
    ///
    /// # Errors
    ///
    /// Query failures, or [`AnalyticsError::Conversion`] if serialization fails.
    pub fn generate_report_json(
        &self,
        top_countries: usize,
        variance: VarianceAssumption,
    ) -> Result<String> {
        let report = self.generate_report(top_countries, variance)?;
        serde_json::to_string_pretty(&report).map_err(|e| AnalyticsError::Conversion(e.to_string()))
    }

    /// Generate Markdown report.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn generate_report_markdown(
        &self,
        top_countries: usize,
        variance: VarianceAssumption,
    ) -> Result<String> {
        let report = self.generate_report(top_countries, variance)?;
        render_markdown(&report).map_err(|e| AnalyticsError::Conversion(e.to_string()))
    }
}

fn render_markdown(report: &AnalyticsReport) -> std::result::Result<String, std::fmt::Error> {
    let mut md = String::new();
    writeln!(md, "# Global Terrorism Analytics Report\n")?;
    writeln!(md, "**Generated:** {}\n", report.generated_at)?;
    writeln!(md, "**Events:** {}\n", report.total_events)?;

    if !report.yearly_counts.is_empty() {
        let (peak_year, peak) = report
            .yearly_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map_or((0, 0), |(y, c)| (*y, *c));
        writeln!(md, "## Events per Year\n")?;
        writeln!(md, "Peak year: {peak_year} ({peak} events)\n")?;
        writeln!(md, "| Year | Events |")?;
        writeln!(md, "|------|--------|")?;
        for (year, count) in report.yearly_counts.iter() {
            writeln!(md, "| {year} | {count} |")?;
        }
        writeln!(md)?;
    }

    if !report.top_countries.is_empty() {
        writeln!(md, "## Top Countries\n")?;
        writeln!(md, "| Rank | Country | Events |")?;
        writeln!(md, "|------|---------|--------|")?;
        for (i, (country, count)) in report.top_countries.iter().enumerate() {
            writeln!(md, "| {} | {country} | {count} |", i + 1)?;
        }
        writeln!(md)?;
    }

    if !report.attack_types.is_empty() {
        let total: i64 = report.attack_types.values().sum();
        writeln!(md, "## Attack Types\n")?;
        writeln!(md, "| Attack Type | Events | Share |")?;
        writeln!(md, "|-------------|--------|-------|")?;
        for (attack, count) in report.attack_types.iter() {
            writeln!(md, "| {attack} | {count} | {:.1}% |", percent(*count, total))?;
        }
        writeln!(md)?;
    }

    if !report.region_casualties.is_empty() {
        writeln!(md, "## Casualties by Region\n")?;
        writeln!(md, "| Region | Killed | Wounded | Total |")?;
        writeln!(md, "|--------|--------|---------|-------|")?;
        for row in &report.region_casualties {
            writeln!(
                md,
                "| {} | {:.0} | {:.0} | {:.0} |",
                row.region, row.num_killed, row.num_wounded, row.total_casualties
            )?;
        }
        writeln!(md)?;
    }

    if !report.weapon_stats.is_empty() {
        writeln!(md, "## Weapon Types\n")?;
        writeln!(md, "| Weapon | Events | Avg Casualties |")?;
        writeln!(md, "|--------|--------|----------------|")?;
        for stat in &report.weapon_stats {
            writeln!(
                md,
                "| {} | {} | {:.2} |",
                stat.weapon_type, stat.usage_count, stat.avg_casualties
            )?;
        }
        writeln!(md)?;
    }

    writeln!(md, "## Weapon Usage Hypothesis\n")?;
    match &report.hypothesis {
        Some(outcome) => {
            writeln!(md, "| Metric | Value |")?;
            writeln!(md, "|--------|-------|")?;
            writeln!(md, "| Variance | {} |", outcome.variance.as_str())?;
            writeln!(md, "| Median usage | {} |", outcome.median_usage)?;
            writeln!(md, "| High usage | {} |", outcome.high_usage.join(", "))?;
            writeln!(md, "| Low usage | {} |", outcome.low_usage.join(", "))?;
            writeln!(md, "| t statistic | {:.4} |", outcome.t_statistic)?;
            writeln!(md, "| Degrees of freedom | {:.2} |", outcome.degrees_of_freedom)?;
            writeln!(md, "| p-value | {:.4} |", outcome.p_value)?;
            writeln!(
                md,
                "| Result (alpha = {SIGNIFICANCE_LEVEL}) | {} |",
                outcome.hypothesis_result
            )?;
        }
        None => writeln!(md, "Not enough weapon types to run the test.")?,
    }
    writeln!(md)?;

    writeln!(md, "---")?;
    writeln!(md, "*Source: Global Terrorism Database*")?;

    Ok(md)
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::event;

    #[test]
    fn test_empty_report() {
        let engine = AnalyticsEngine::from_events(&[]).unwrap();
        let report = engine.generate_report(10, VarianceAssumption::Pooled).unwrap();
        assert_eq!(report.total_events, 0);
        assert!(report.weapon_stats.is_empty());
        assert!(report.hypothesis.is_none());
    }

    #[test]
    fn test_markdown_generation() {
        let events = vec![
            event(1990, "Peru", "Explosives", Some(1.0), Some(1.0)),
            event(1991, "India", "Firearms", None, Some(3.0)),
        ];
        let engine = AnalyticsEngine::from_events(&events).unwrap();
        let md = engine
            .generate_report_markdown(10, VarianceAssumption::Pooled)
            .unwrap();
        assert!(md.contains("# Global Terrorism Analytics Report"));
        assert!(md.contains("| Region of Peru | 1 | 1 | 2 |"));
        assert!(md.contains("Not enough weapon types"));
    }

    #[test]
    fn test_eda_graphs_respects_limit() {
        let events: Vec<_> = ["Iraq", "Peru", "India", "Chile"]
            .iter()
            .map(|c| event(2000, c, "Firearms", None, None))
            .collect();
        let engine = AnalyticsEngine::from_events(&events).unwrap();

        let eda = engine.eda_graphs(2).unwrap();
        assert_eq!(eda.top_countries.len(), 2);
        assert_eq!(eda.yearly_counts.get(&2000), Some(&4));
    }

    #[test]
    fn test_report_json_is_valid() {
        let engine = AnalyticsEngine::from_events(&[]).unwrap();
        let json = engine.generate_report_json(10, VarianceAssumption::Welch).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["hypothesis"].is_null());
    }
}
