//! Trend visualization: casualties by region and year, attack types over time, map.

use leptos::prelude::*;

use crate::components::{
    attack_type_by_region_chart, attack_types_over_time_chart, fetch_status,
    region_casualties_chart, render_chart, yearly_casualties_chart, ChartCard,
    GlobalDistributionMap,
};
use crate::services::{
    fetch, fetch_attack_types_by_region, fetch_attack_types_over_time, fetch_global_distribution,
    fetch_region_casualties, fetch_yearly_casualties,
};
use crate::state::series::{regional_attack_types, year_span};

const REGION_CHART: &str = "trends-region-chart";
const YEARLY_CHART: &str = "trends-yearly-chart";
const ATTACKS_CHART: &str = "trends-attacks-chart";
const REGIONAL_CHART: &str = "trends-regional-chart";

#[component]
pub fn TrendsPage() -> impl IntoView {
    let regions = fetch(fetch_region_casualties());
    let yearly = fetch(fetch_yearly_casualties());
    let attacks = fetch(fetch_attack_types_over_time());
    let regional = fetch(fetch_attack_types_by_region());
    let distribution = fetch(fetch_global_distribution());

    // Year range of the attack type chart; `None` means the full span
    let range_from = RwSignal::new(None::<i32>);
    let range_to = RwSignal::new(None::<i32>);
    let span = move || {
        attacks.with(|a| match a {
            Some(Ok(p)) => year_span(&p.attack_types_over_time),
            _ => None,
        })
    };

    Effect::new(move |_| {
        regions.with(|r| {
            if let Some(Ok(r)) = r {
                render_chart(REGION_CHART, &region_casualties_chart(&r.region_casualties), 900, 500);
            }
        });
    });

    Effect::new(move |_| {
        yearly.with(|y| {
            if let Some(Ok(y)) = y {
                render_chart(YEARLY_CHART, &yearly_casualties_chart(&y.yearly_casualties), 900, 400);
            }
        });
    });

    Effect::new(move |_| {
        let Some((first, last)) = span() else {
            return;
        };
        let from = range_from.get().unwrap_or(first);
        let to = range_to.get().unwrap_or(last).max(from);
        attacks.with(|a| {
            if let Some(Ok(a)) = a {
                let chart = attack_types_over_time_chart(&a.attack_types_over_time, from, to);
                render_chart(ATTACKS_CHART, &chart, 900, 500);
            }
        });
    });

    // Attack type of the regional chart; `None` means the first one
    let selected_type = RwSignal::new(None::<String>);
    let attack_types = move || {
        regional.with(|r| match r {
            Some(Ok(p)) => regional_attack_types(&p.attack_types_by_region),
            _ => Vec::new(),
        })
    };
    let attack_type = move || selected_type.get().or_else(|| attack_types().into_iter().next());

    Effect::new(move |_| {
        let Some(shown) = attack_type() else {
            return;
        };
        regional.with(|r| {
            if let Some(Ok(r)) = r {
                let chart = attack_type_by_region_chart(&r.attack_types_by_region, &shown);
                render_chart(REGIONAL_CHART, &chart, 900, 500);
            }
        });
    });

    let year_input = move |signal: RwSignal<Option<i32>>, is_start: bool| {
        view! {
            <input
                type="number"
                min=move || span().map(|s| s.0.to_string())
                max=move || span().map(|s| s.1.to_string())
                prop:value=move || {
                    signal
                        .get()
                        .or_else(|| span().map(|(a, b)| if is_start { a } else { b }))
                        .map(|y| y.to_string())
                        .unwrap_or_default()
                }
                on:change=move |ev| signal.set(event_target_value(&ev).parse().ok())
            />
        }
    };

    view! {
        <section class="page">
            <h2>"Trend Visualization"</h2>

            {fetch_status(regions)}
            <ChartCard
                title="Total Casualties by Region"
                description="This bar chart shows the number of casualties (killed and wounded) \
                             due to terrorist attacks by region. Each column represents the \
                             combined contribution of two categories: killed (red) and wounded (blue)."
                chart_id=REGION_CHART
            />

            {fetch_status(yearly)}
            <ChartCard
                title="Annual Trends in Casualties"
                description="This line chart illustrates the yearly trend in casualties (killed \
                             and wounded), offering insights into the historical dynamics of \
                             terrorism activity."
                chart_id=YEARLY_CHART
            />

            {fetch_status(attacks)}
            <ChartCard
                title="Attack Types Over Time"
                description="This chart shows changes in attack types over time. Narrow the year \
                             range to compare the distribution of attack types across periods."
                chart_id=ATTACKS_CHART
            >
                <div class="range-toolbar">
                    <label>"From "</label>
                    {year_input(range_from, true)}
                    <label>" to "</label>
                    {year_input(range_to, false)}
                </div>
            </ChartCard>

            {fetch_status(regional)}
            <ChartCard
                title="Attack Types by Region"
                description="This chart follows a single attack type over the years, with each \
                             column split by the regions where the attacks took place."
                chart_id=REGIONAL_CHART
            >
                <div class="range-toolbar">
                    <label for="regional-type">"Attack type: "</label>
                    <select
                        id="regional-type"
                        on:change=move |ev| selected_type.set(Some(event_target_value(&ev)))
                    >
                        {move || {
                            let current = attack_type();
                            attack_types()
                                .into_iter()
                                .map(|t| {
                                    let selected = current.as_deref() == Some(t.as_str());
                                    view! { <option value=t.clone() selected=selected>{t.clone()}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
            </ChartCard>

            <section class="card">
                <h3 class="card-title">"Global Distribution of Attacks"</h3>
                <p class="card-text">
                    "This visualization showcases the geographic distribution of attacks \
                     worldwide. Select a year to see how attack types vary by region."
                </p>
                {fetch_status(distribution)}
                <GlobalDistributionMap data=distribution />
            </section>
        </section>
    }
}
