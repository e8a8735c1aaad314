//! Data overview: sample rows, summary statistics, missing values.

use gtd_domain::payload::{OverviewPayload, SamplePayload};
use gtd_domain::EVENT_COLUMNS;
use leptos::prelude::*;

use crate::components::{cell, fetch_status, text_cell, DataTable};
use crate::services::{fetch, fetch_overview, fetch_sample};

const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn sample_rows(payload: &SamplePayload) -> Vec<Vec<String>> {
    payload
        .sample
        .iter()
        .map(|e| {
            vec![
                e.year.to_string(),
                e.month.to_string(),
                text_cell(e.country.as_deref()),
                text_cell(e.region.as_deref()),
                cell(e.latitude),
                cell(e.longitude),
                e.success_status.map_or_else(|| "NaN".to_string(), |s| s.to_string()),
                text_cell(e.attack_type.as_deref()),
                text_cell(e.target_type.as_deref()),
                text_cell(e.nationality.as_deref()),
                text_cell(e.group_name.as_deref()),
                text_cell(e.weapon_type.as_deref()),
                cell(e.num_killed),
                cell(e.num_wounded),
                cell(Some(e.total_casualties)),
            ]
        })
        .collect()
}

/// One row per statistic, one column per numeric field, like `describe()`
#[allow(clippy::cast_precision_loss)]
fn describe_rows(payload: &OverviewPayload) -> Vec<Vec<String>> {
    STATISTICS
        .iter()
        .map(|stat| {
            let mut row = vec![(*stat).to_string()];
            row.extend(payload.overview.values().map(|s| match *stat {
                "count" => cell(Some(s.count as f64)),
                "mean" => cell(s.mean),
                "std" => cell(s.std),
                "min" => cell(s.min),
                "25%" => cell(s.p25),
                "50%" => cell(s.p50),
                "75%" => cell(s.p75),
                _ => cell(s.max),
            }));
            row
        })
        .collect()
}

#[component]
pub fn OverviewPage() -> impl IntoView {
    let sample = fetch(fetch_sample());
    let overview = fetch(fetch_overview());

    let sample_table = move || {
        sample.with(|s| match s {
            Some(Ok(payload)) => Some(view! {
                <DataTable
                    headers=EVENT_COLUMNS.iter().map(|c| (*c).to_string()).collect()
                    rows=sample_rows(payload)
                />
            }),
            _ => None,
        })
    };

    let describe_table = move || {
        overview.with(|o| match o {
            Some(Ok(payload)) => {
                let mut headers = vec![String::new()];
                headers.extend(payload.overview.keys().cloned());
                Some(view! { <DataTable headers=headers rows=describe_rows(payload) /> })
            }
            _ => None,
        })
    };

    let missing_table = move || {
        overview.with(|o| match o {
            Some(Ok(payload)) => {
                let rows = payload
                    .missing_values
                    .iter()
                    .map(|(column, n)| vec![column.clone(), n.to_string()])
                    .collect();
                Some(view! {
                    <DataTable headers=vec!["Column".to_string(), "Missing".to_string()] rows=rows />
                })
            }
            _ => None,
        })
    };

    view! {
        <section class="page">
            <h2>"Data Overview"</h2>
            <p>
                "This stage presents the main parameters of the loaded dataset, covering global \
                 terrorist events, including countries, regions, weapons, and casualties."
            </p>

            <h3>"Sample Data"</h3>
            {fetch_status(sample)}
            {sample_table}

            <p>
                <strong>"Key Statistics: "</strong>
                "The following table provides an overview of the dataset, including minimum, \
                 maximum, and average values."
            </p>
            {fetch_status(overview)}
            {describe_table}

            <h3>"Missing Values"</h3>
            <p>
                "Analyzing missing data helps assess the dataset quality and determine the need \
                 for further processing steps."
            </p>
            {missing_table}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtd_domain::{ColumnSummary, OrderedMap};

    #[test]
    fn test_describe_rows_follow_statistic_order() {
        let summary = ColumnSummary {
            count: 4,
            mean: Some(2.5),
            std: None,
            min: Some(1.0),
            p25: Some(1.75),
            p50: Some(2.5),
            p75: Some(3.25),
            max: Some(4.0),
        };
        let payload = OverviewPayload {
            overview: [("Year".to_string(), summary)].into_iter().collect(),
            missing_values: OrderedMap::new(),
        };
        let rows = describe_rows(&payload);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], vec!["count", "4"]);
        assert_eq!(rows[2], vec!["std", "NaN"]);
        assert_eq!(rows[4], vec!["25%", "1.75"]);
    }
}
