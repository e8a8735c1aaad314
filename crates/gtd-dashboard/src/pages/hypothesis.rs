//! Weapon choice and casualties: popularity, casualties vs usage, t-test verdict.

use gtd_domain::payload::HypothesisPayload;
use gtd_domain::Verdict;
use leptos::prelude::*;

use crate::components::{
    fetch_status, render_chart, weapon_casualties_chart, weapon_popularity_chart, ChartCard,
};
use crate::services::{fetch, fetch_hypothesis, fetch_weapon_analysis, fetch_weapon_popularity};

const POPULARITY_CHART: &str = "hypothesis-popularity-chart";
const CASUALTIES_CHART: &str = "hypothesis-casualties-chart";

/// `p-value = 0.01234`, or `undefined` when the statistic could not be computed
fn format_p_value(p_value: f64) -> String {
    if p_value.is_finite() {
        format!("p-value = {p_value:.5}")
    } else {
        "p-value = undefined".to_string()
    }
}

fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Confirmed => "Hypothesis Confirmed: Weapon popularity affects casualty numbers.",
        Verdict::Rejected => {
            "Hypothesis Rejected: Weapon choice does not depend on casualty counts."
        }
    }
}

#[component]
fn TestResult(outcome: HypothesisPayload) -> impl IntoView {
    let class = match outcome.hypothesis_result {
        Verdict::Confirmed => "callout success",
        Verdict::Rejected => "callout danger",
    };

    view! {
        <p><strong>"Test Results: "</strong>{format_p_value(outcome.p_value)}</p>
        <div class=class>{verdict_message(outcome.hypothesis_result)}</div>
        <p class="text-muted text-sm">
            {format!(
                "High usage ({}): {}. Low usage ({}): {}. Median usage {}, {} variance.",
                outcome.high_usage.len(),
                outcome.high_usage.join(", "),
                outcome.low_usage.len(),
                outcome.low_usage.join(", "),
                outcome.median_usage,
                outcome.variance.as_str(),
            )}
        </p>
    }
}

#[component]
pub fn HypothesisPage() -> impl IntoView {
    let popularity = fetch(fetch_weapon_popularity());
    let analysis = fetch(fetch_weapon_analysis());
    let test = fetch(fetch_hypothesis());

    Effect::new(move |_| {
        popularity.with(|p| {
            if let Some(Ok(p)) = p {
                render_chart(POPULARITY_CHART, &weapon_popularity_chart(&p.weapon_counts), 900, 400);
            }
        });
    });

    Effect::new(move |_| {
        analysis.with(|a| {
            if let Some(Ok(a)) = a {
                render_chart(CASUALTIES_CHART, &weapon_casualties_chart(&a.weapon_stats), 900, 450);
            }
        });
    });

    let result = move || {
        test.with(|t| match t {
            Some(Ok(outcome)) => Some(view! { <TestResult outcome=outcome.clone() /> }),
            _ => None,
        })
    };

    view! {
        <section class="page">
            <h2>"Hypothesis"</h2>
            <p>
                <strong>"Hypothesis: "</strong>
                "The popularity of certain weapons is related to the number of casualties. This \
                 section examines statistical relationships between weapon types and casualties."
            </p>

            {fetch_status(popularity)}
            <ChartCard
                title="Weapon Popularity"
                description="This bar chart shows the distribution of weapon types used in \
                             terrorist attacks."
                chart_id=POPULARITY_CHART
            />

            {fetch_status(analysis)}
            <ChartCard
                title="Weapon Popularity vs Casualties"
                description="This analysis explores the relationship between average casualty \
                             counts and weapon usage frequency. The chart combines average \
                             casualties with the popularity of weapon types."
                chart_id=CASUALTIES_CHART
            />

            <section class="card">
                <h3 class="card-title">"Statistical Test"</h3>
                <p class="card-text">
                    "A t-test is used to compare the average casualty numbers for high and low \
                     popularity weapons."
                </p>
                {fetch_status(test)}
                {result}
            </section>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p_value_formatting() {
        assert_eq!(format_p_value(0.0123456), "p-value = 0.01235");
        assert_eq!(format_p_value(f64::NAN), "p-value = undefined");
    }

    #[test]
    fn test_verdict_messages() {
        assert!(verdict_message(Verdict::Confirmed).starts_with("Hypothesis Confirmed"));
        assert!(verdict_message(Verdict::Rejected).starts_with("Hypothesis Rejected"));
    }
}
