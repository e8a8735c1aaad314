//! # Chart Components
//!
//! ECharts option builders (via Charming) for every dashboard figure, plus the
//! container they render into.

use charming::{
    component::{Axis, Grid, Legend, LegendType, Title},
    element::{
        AxisLabel, AxisType, ItemStyle, Label, LabelPosition, LineStyle, Orient,
        Symbol, TextStyle, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
    Chart, WasmRenderer,
};
use gtd_domain::payload::CasualtyColumns;
use gtd_domain::{OrderedMap, RegionalAttackCount, WeaponStat, YearlyAttackCount};
use leptos::prelude::*;

use crate::state::series::{percentages, YearMatrix};

const TEXT: &str = "#2d3436";
const MUTED: &str = "#636e72";

fn title(text: &str) -> Title {
    Title::new()
        .text(text)
        .left("center")
        .text_style(TextStyle::new().color(TEXT).font_size(14))
}

fn category_axis<S: ToString>(labels: impl IntoIterator<Item = S>, name: &str) -> Axis {
    Axis::new()
        .type_(AxisType::Category)
        .name(name)
        .data(labels.into_iter().map(|l| l.to_string()).collect())
        .axis_label(AxisLabel::new().color(MUTED).rotate(45))
}

fn value_axis(name: &str) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .name(name)
        .axis_label(AxisLabel::new().color(MUTED))
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(values: impl IntoIterator<Item = i64>) -> Vec<f64> {
    values.into_iter().map(|v| v as f64).collect()
}

/// EDA: events per year
pub fn yearly_events_chart(yearly_counts: &OrderedMap<i32, i64>) -> Chart {
    Chart::new()
        .title(title("Number of Events by Year"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("8%").right("4%").bottom("15%"))
        .x_axis(category_axis(yearly_counts.keys(), "Year"))
        .y_axis(value_axis("Number of Events"))
        .series(
            Bar::new()
                .name("Events")
                .data(as_f64(yearly_counts.values().copied()))
                .item_style(ItemStyle::new().color("darkgreen")),
        )
}

/// EDA: top countries by events
pub fn top_countries_chart(top_countries: &OrderedMap<String, i64>) -> Chart {
    Chart::new()
        .title(title("Top 10 Countries by Number of Events"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("8%").right("4%").bottom("25%"))
        .x_axis(category_axis(top_countries.keys(), "Country"))
        .y_axis(value_axis("Number of Events"))
        .series(
            Bar::new()
                .name("Events")
                .data(as_f64(top_countries.values().copied()))
                .item_style(ItemStyle::new().color("darkblue")),
        )
}

/// EDA: attack type shares; legend entries carry the percentage
pub fn attack_types_pie(attack_counts: &OrderedMap<String, i64>) -> Chart {
    let shares = percentages(attack_counts);
    let legend: Vec<String> = shares
        .iter()
        .map(|(label, pct)| format!("{label}: {pct}%"))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let data: Vec<(f64, String)> = attack_counts
        .iter()
        .zip(&legend)
        .map(|((_, &n), name)| (n as f64, name.clone()))
        .collect();

    Chart::new()
        .title(title("Attack Types Distribution"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(
            Legend::new()
                .type_(LegendType::Scroll)
                .orient(Orient::Vertical)
                .right(10)
                .top(40)
                .data(legend),
        )
        .series(
            Pie::new()
                .name("Attack Types")
                .radius("65%")
                .center(vec!["35%", "55%"])
                .label(Label::new().show(false))
                .data(data),
        )
}

/// Trends: killed and wounded stacked per region
pub fn region_casualties_chart(columns: &CasualtyColumns<String>) -> Chart {
    let label = || {
        Label::new()
            .show(true)
            .position(LabelPosition::Inside)
            .color("white")
            .formatter("{c}")
    };

    Chart::new()
        .title(title("Total Casualties by Region"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().data(vec!["Killed", "Wounded"]).bottom(0))
        .grid(Grid::new().left("8%").right("4%").bottom("30%"))
        .x_axis(category_axis(columns.num_killed.keys(), "Region"))
        .y_axis(value_axis("Number of Casualties"))
        .series(
            Bar::new()
                .name("Killed")
                .stack("casualties")
                .label(label())
                .item_style(ItemStyle::new().color("red"))
                .data(columns.num_killed.values().copied().collect::<Vec<f64>>()),
        )
        .series(
            Bar::new()
                .name("Wounded")
                .stack("casualties")
                .label(label())
                .item_style(ItemStyle::new().color("blue"))
                .data(columns.num_wounded.values().copied().collect::<Vec<f64>>()),
        )
}

/// Trends: yearly killed and wounded lines
pub fn yearly_casualties_chart(columns: &CasualtyColumns<i32>) -> Chart {
    Chart::new()
        .title(title("Annual Trends in Casualties"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().data(vec!["Num_Killed", "Num_Wounded"]).bottom(0))
        .grid(Grid::new().left("8%").right("4%").bottom("15%"))
        .x_axis(category_axis(columns.num_killed.keys(), "Year"))
        .y_axis(value_axis("Number of Casualties"))
        .series(
            Line::new()
                .name("Num_Killed")
                .line_style(LineStyle::new().color("#0984e3").width(2))
                .data(columns.num_killed.values().copied().collect::<Vec<f64>>()),
        )
        .series(
            Line::new()
                .name("Num_Wounded")
                .line_style(LineStyle::new().color("#fdcb6e").width(2))
                .data(columns.num_wounded.values().copied().collect::<Vec<f64>>()),
        )
}

fn stacked_years_chart(heading: &str, matrix: YearMatrix, stack: &str) -> Chart {
    let mut chart = Chart::new()
        .title(title(heading))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(
            Legend::new()
                .type_(LegendType::Scroll)
                .data(matrix.labels.clone())
                .bottom(0),
        )
        .grid(Grid::new().left("8%").right("4%").bottom("20%"))
        .x_axis(category_axis(&matrix.years, "Year"))
        .y_axis(value_axis("Number of Attacks"));

    for (label, counts) in matrix.labels.iter().zip(matrix.counts) {
        chart = chart.series(
            Bar::new()
                .name(label.as_str())
                .stack(stack)
                .data(as_f64(counts)),
        );
    }
    chart
}

/// Trends: attack types stacked per year within `from..=to`
pub fn attack_types_over_time_chart(rows: &[YearlyAttackCount], from: i32, to: i32) -> Chart {
    stacked_years_chart(
        &format!("Attack Types Over Time ({from}-{to})"),
        YearMatrix::attack_types(rows, from, to),
        "attacks",
    )
}

/// Trends: one attack type per year, stacked by region
pub fn attack_type_by_region_chart(rows: &[RegionalAttackCount], attack_type: &str) -> Chart {
    stacked_years_chart(
        &format!("{attack_type} by Region"),
        YearMatrix::regions(rows, attack_type),
        "regions",
    )
}

/// Hypothesis: events per weapon type, most used on top
pub fn weapon_popularity_chart(weapon_counts: &OrderedMap<String, i64>) -> Chart {
    Chart::new()
        .title(title("Weapon Popularity"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("22%").right("6%"))
        .x_axis(value_axis("Number of Attacks"))
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .inverse(true)
                .data(weapon_counts.keys().cloned().collect())
                .axis_label(AxisLabel::new().color(MUTED)),
        )
        .series(
            Bar::new()
                .name("Attacks")
                .data(as_f64(weapon_counts.values().copied()))
                .item_style(ItemStyle::new().color("#00b894")),
        )
}

/// Hypothesis: average casualties (bars, left axis) against usage (line, right axis)
pub fn weapon_casualties_chart(stats: &[WeaponStat]) -> Chart {
    Chart::new()
        .title(title("Weapon Popularity vs Casualties"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(
            Legend::new()
                .data(vec!["Average Casualties", "Usage Frequency"])
                .bottom(0),
        )
        .grid(Grid::new().left("8%").right("8%").bottom("30%"))
        .x_axis(category_axis(stats.iter().map(|s| &s.weapon_type), "Weapon Type"))
        .y_axis(value_axis("Average Casualties"))
        .y_axis(value_axis("Usage Frequency"))
        .series(
            Bar::new()
                .name("Average Casualties")
                .item_style(ItemStyle::new().color("skyblue").border_color("black"))
                .data(stats.iter().map(|s| s.avg_casualties).collect::<Vec<f64>>()),
        )
        .series(
            Line::new()
                .name("Usage Frequency")
                .y_axis_index(1)
                .symbol(Symbol::Circle)
                .line_style(LineStyle::new().color("red"))
                .data(as_f64(stats.iter().map(|s| s.usage_count))),
        )
}

/// Render `chart` into the element with id `id`.
pub fn render_chart(id: &str, chart: &Chart, width: u32, height: u32) {
    let renderer = WasmRenderer::new(width, height);
    if let Err(e) = renderer.render(id, chart) {
        log::error!("Chart render error ({id}): {e:?}");
    }
}

/// Titled card holding one chart container
#[component]
pub fn ChartCard(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    chart_id: &'static str,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <section class="card">
            <h3 class="card-title">{title}</h3>
            <p class="card-text">{description}</p>
            {children.map(|c| c())}
            <div id=chart_id class="chart-container"></div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, i64)]) -> OrderedMap<String, i64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_pie_legend_carries_percentages() {
        let chart = attack_types_pie(&counts(&[("Bombing/Explosion", 3), ("Armed Assault", 1)]));
        let json = chart.to_string();
        assert!(json.contains("Bombing/Explosion: 75%"));
        assert!(json.contains("Armed Assault: 25%"));
    }

    #[test]
    fn test_region_chart_stacks_two_series() {
        let columns = CasualtyColumns {
            num_killed: [("South Asia".to_string(), 5.0)].into_iter().collect(),
            num_wounded: [("South Asia".to_string(), 7.0)].into_iter().collect(),
            total_casualties: None,
        };
        let json = region_casualties_chart(&columns).to_string();
        assert!(json.contains("\"Killed\""));
        assert!(json.contains("\"Wounded\""));
        assert!(json.contains("South Asia"));
    }

    #[test]
    fn test_attack_chart_limits_years() {
        let rows = vec![
            YearlyAttackCount {
                year: 1980,
                attack_type: "Hijacking".into(),
                count: 2,
            },
            YearlyAttackCount {
                year: 2010,
                attack_type: "Armed Assault".into(),
                count: 4,
            },
        ];
        let json = attack_types_over_time_chart(&rows, 2000, 2017).to_string();
        assert!(json.contains("Armed Assault"));
        assert!(!json.contains("Hijacking"));
    }

    #[test]
    fn test_region_chart_shows_selected_attack_type() {
        let rows = vec![
            RegionalAttackCount {
                year: 1985,
                region: "Central America & Caribbean".into(),
                attack_type: "Assassination".into(),
                count: 3,
            },
            RegionalAttackCount {
                year: 1985,
                region: "Sub-Saharan Africa".into(),
                attack_type: "Hijacking".into(),
                count: 1,
            },
        ];
        let json = attack_type_by_region_chart(&rows, "Assassination").to_string();
        assert!(json.contains("Assassination by Region"));
        assert!(json.contains("Central America & Caribbean"));
        assert!(!json.contains("Sub-Saharan Africa"));
    }
}
