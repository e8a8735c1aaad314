//! Plain data tables.

use leptos::prelude::*;

/// Header row plus string cells
#[component]
pub fn DataTable(headers: Vec<String>, rows: Vec<Vec<String>>) -> impl IntoView {
    view! {
        <div class="table-scroll">
            <table class="data-table">
                <thead>
                    <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}</tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>{row.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}</tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

/// Format an optional number for a table cell; missing shows as `NaN` like a data frame.
pub fn cell(value: Option<f64>) -> String {
    value.map_or_else(
        || "NaN".to_string(),
        |v| {
            let fixed = format!("{v:.4}");
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        },
    )
}

pub fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or("NaN").to_string()
}
