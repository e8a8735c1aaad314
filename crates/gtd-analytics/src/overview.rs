//! Column summaries and missing-value counts.

use gtd_domain::{payload::OverviewPayload, ColumnSummary, OrderedMap, EVENT_COLUMNS};

use crate::engine::AnalyticsEngine;
use crate::error::Result;

/// Numeric columns summarized by [`AnalyticsEngine::describe`], as (label, SQL column).
pub const NUMERIC_COLUMNS: [(&str, &str); 8] = [
    ("Year", "year"),
    ("Month", "month"),
    ("Latitude", "latitude"),
    ("Longitude", "longitude"),
    ("Success_Status", "success_status"),
    ("Num_Killed", "num_killed"),
    ("Num_Wounded", "num_wounded"),
    ("Total_Casualties", "total_casualties"),
];

/// SQL column behind each entry of [`EVENT_COLUMNS`].
const SQL_COLUMNS: [&str; 15] = [
    "year",
    "month",
    "country",
    "region",
    "latitude",
    "longitude",
    "success_status",
    "attack_type",
    "target_type",
    "nationality",
    "group_name",
    "weapon_type",
    "num_killed",
    "num_wounded",
    "total_casualties",
];

impl AnalyticsEngine {
    /// Count, mean, sample std, min, quartiles and max of every numeric column.
    ///
    /// Quartiles use linear interpolation. Statistics over fewer observations than
    /// they need are `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn describe(&self) -> Result<OrderedMap<String, ColumnSummary>> {
        let mut overview = OrderedMap::new();
        for (label, column) in NUMERIC_COLUMNS {
            overview.push(label.to_string(), self.summarize(column)?);
        }
        Ok(overview)
    }

    fn summarize(&self, column: &str) -> Result<ColumnSummary> {
        let query = format!(
            r"
            SELECT
                COUNT({column}),
                CAST(AVG({column}) AS DOUBLE),
                CAST(STDDEV_SAMP({column}) AS DOUBLE),
                CAST(MIN({column}) AS DOUBLE),
                CAST(QUANTILE_CONT({column}, 0.25) AS DOUBLE),
                CAST(QUANTILE_CONT({column}, 0.5) AS DOUBLE),
                CAST(QUANTILE_CONT({column}, 0.75) AS DOUBLE),
                CAST(MAX({column}) AS DOUBLE)
            FROM events
            "
        );

        let summary = self.conn.query_row(&query, [], |row| {
            Ok(ColumnSummary {
                count: row.get(0)?,
                mean: row.get(1)?,
                std: row.get(2)?,
                min: row.get(3)?,
                p25: row.get(4)?,
                p50: row.get(5)?,
                p75: row.get(6)?,
                max: row.get(7)?,
            })
        })?;
        Ok(summary)
    }

    /// Missing values per column, for all fifteen columns in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn missing_values(&self) -> Result<OrderedMap<String, i64>> {
        let selects = SQL_COLUMNS
            .iter()
            .map(|column| format!("COUNT(*) - COUNT({column})"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!("SELECT {selects} FROM events");

        let counts = self.conn.query_row(&query, [], |row| {
            (0..SQL_COLUMNS.len())
                .map(|i| row.get::<_, i64>(i))
                .collect::<std::result::Result<Vec<_>, _>>()
        })?;

        Ok(EVENT_COLUMNS
            .iter()
            .map(|label| (*label).to_string())
            .zip(counts)
            .collect())
    }

    /// Both halves of the data overview.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn overview(&self) -> Result<OverviewPayload> {
        Ok(OverviewPayload {
            overview: self.describe()?,
            missing_values: self.missing_values()?,
        })
    }
}
