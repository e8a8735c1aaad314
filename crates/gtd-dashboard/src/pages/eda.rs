//! Exploratory data analysis: yearly events, top countries, attack type shares.

use leptos::prelude::*;

use crate::components::{
    attack_types_pie, fetch_status, render_chart, top_countries_chart, yearly_events_chart,
    ChartCard,
};
use crate::services::{fetch, fetch_eda_graphs};

const YEARLY_CHART: &str = "eda-yearly-chart";
const COUNTRIES_CHART: &str = "eda-countries-chart";
const ATTACK_PIE: &str = "eda-attack-pie";

#[component]
pub fn EdaPage() -> impl IntoView {
    let graphs = fetch(fetch_eda_graphs());

    Effect::new(move |_| {
        graphs.with(|g| {
            if let Some(Ok(g)) = g {
                render_chart(YEARLY_CHART, &yearly_events_chart(&g.yearly_counts), 900, 400);
                render_chart(COUNTRIES_CHART, &top_countries_chart(&g.top_countries), 900, 400);
                render_chart(ATTACK_PIE, &attack_types_pie(&g.attack_types), 900, 500);
            }
        });
    });

    view! {
        <section class="page">
            <h2>"Exploratory Data Analysis (EDA)"</h2>
            {fetch_status(graphs)}
            <ChartCard
                title="Number of Events Over the Years"
                description="Analyzing the number of events by year highlights the dynamics of \
                             terrorist activity. This chart identifies peaks and changes over time."
                chart_id=YEARLY_CHART
            />
            <ChartCard
                title="Top 10 Countries by Number of Events"
                description="This section highlights the countries most frequently involved in \
                             terrorist incidents."
                chart_id=COUNTRIES_CHART
            />
            <ChartCard
                title="Distribution of Attack Types"
                description="This section shows the types of attacks used in terrorist incidents."
                chart_id=ATTACK_PIE
            />
        </section>
    }
}
