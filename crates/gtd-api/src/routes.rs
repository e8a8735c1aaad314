//! # REST Handlers
//!
//! One GET handler per endpoint. Handlers take no parameters and recompute their
//! payload from the full event table on every request.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use gtd_analytics::{weapon_usage_test, AnalyticsError};
use gtd_domain::payload::{
    AttackTypesByRegionPayload, AttackTypesOverTimePayload, AttackTypesPayload, CasualtyColumns, EdaGraphsPayload,
    GlobalDistributionPayload, HypothesisPayload, OverviewPayload, RegionCasualtiesPayload,
    SamplePayload, WeaponAnalysisPayload, WeaponCasualtiesPayload, WeaponPopularityPayload,
    WeaponStatColumns, YearlyCasualtiesPayload, YearlyTrendsPayload,
};

use crate::error::ApiResult;
use crate::AppState;

/// `GET /data/overview`
pub async fn overview(State(state): State<AppState>) -> ApiResult<Json<OverviewPayload>> {
    let payload = state.ctx.query("overview", |e| e.overview()).await?;
    Ok(Json(payload))
}

/// `GET /data/sample`
pub async fn sample(State(state): State<AppState>) -> ApiResult<Json<SamplePayload>> {
    let rows = state.ctx.settings.sample_rows;
    let sample = state.ctx.query("sample", move |e| e.sample(rows)).await?;
    Ok(Json(SamplePayload { sample }))
}

/// `GET /data/yearly-trends`
pub async fn yearly_trends(State(state): State<AppState>) -> ApiResult<Json<YearlyTrendsPayload>> {
    let yearly_counts = state.ctx.query("yearly_counts", |e| e.yearly_counts()).await?;
    Ok(Json(YearlyTrendsPayload { yearly_counts }))
}

/// `GET /data/attack-types`
pub async fn attack_types(State(state): State<AppState>) -> ApiResult<Json<AttackTypesPayload>> {
    let attack_counts = state.ctx.query("attack_type_counts", |e| e.attack_type_counts()).await?;
    Ok(Json(AttackTypesPayload { attack_counts }))
}

/// `GET /data/weapon-popularity`
pub async fn weapon_popularity(
    State(state): State<AppState>,
) -> ApiResult<Json<WeaponPopularityPayload>> {
    let weapon_counts = state.ctx.query("weapon_counts", |e| e.weapon_counts()).await?;
    Ok(Json(WeaponPopularityPayload { weapon_counts }))
}

/// `GET /data/weapon-casualties`
pub async fn weapon_casualties(
    State(state): State<AppState>,
) -> ApiResult<Json<WeaponCasualtiesPayload>> {
    let variance = state.ctx.settings.variance;
    let payload = state
        .ctx
        .query("weapon_casualties", move |e| {
            let stats = e.weapon_stats()?;
            // An untestable partition still has well-defined per-weapon statistics
            let p_value = match weapon_usage_test(&stats, variance) {
                Ok(outcome) => outcome.p_value,
                Err(AnalyticsError::NoData | AnalyticsError::InsufficientSample { .. }) => f64::NAN,
                Err(err) => return Err(err),
            };
            Ok(WeaponCasualtiesPayload {
                weapon_stats: WeaponStatColumns::from(stats.as_slice()),
                p_value,
            })
        })
        .await?;
    Ok(Json(payload))
}

/// `GET /data/total-casualties-by-region`
pub async fn total_casualties_by_region(
    State(state): State<AppState>,
) -> ApiResult<Json<RegionCasualtiesPayload>> {
    let rows = state.ctx.query("region_casualties", |e| e.region_casualties()).await?;
    Ok(Json(RegionCasualtiesPayload {
        region_casualties: CasualtyColumns::from(rows.as_slice()),
    }))
}

/// `GET /data/annual-trends-casualties`
pub async fn annual_trends_casualties(
    State(state): State<AppState>,
) -> ApiResult<Json<YearlyCasualtiesPayload>> {
    let rows = state.ctx.query("yearly_casualties", |e| e.yearly_casualties()).await?;
    Ok(Json(YearlyCasualtiesPayload {
        yearly_casualties: CasualtyColumns::from(rows.as_slice()),
    }))
}

/// `GET /data/attack-types-over-time`
pub async fn attack_types_over_time(
    State(state): State<AppState>,
) -> ApiResult<Json<AttackTypesOverTimePayload>> {
    let attack_types_over_time = state
        .ctx
        .query("attack_types_over_time", |e| e.attack_types_over_time())
        .await?;
    Ok(Json(AttackTypesOverTimePayload {
        attack_types_over_time,
    }))
}

/// `GET /data/attack-types-by-region`
pub async fn attack_types_by_region(
    State(state): State<AppState>,
) -> ApiResult<Json<AttackTypesByRegionPayload>> {
    let attack_types_by_region = state
        .ctx
        .query("attack_types_by_region", |e| e.attack_types_by_region())
        .await?;
    Ok(Json(AttackTypesByRegionPayload {
        attack_types_by_region,
    }))
}

/// `GET /data/global-distribution`
pub async fn global_distribution(
    State(state): State<AppState>,
) -> ApiResult<Json<GlobalDistributionPayload>> {
    let global_distribution = state.ctx.query("geo_points", |e| e.geo_points()).await?;
    Ok(Json(GlobalDistributionPayload {
        global_distribution,
    }))
}

/// `GET /data/weapon-analysis`
pub async fn weapon_analysis(
    State(state): State<AppState>,
) -> ApiResult<Json<WeaponAnalysisPayload>> {
    let weapon_stats = state.ctx.query("weapon_stats", |e| e.weapon_stats()).await?;
    Ok(Json(WeaponAnalysisPayload { weapon_stats }))
}

/// `GET /data/weapon-hypothesis-test`
pub async fn weapon_hypothesis_test(
    State(state): State<AppState>,
) -> ApiResult<Json<HypothesisPayload>> {
    let variance = state.ctx.settings.variance;
    let outcome = state
        .ctx
        .query("weapon_hypothesis_test", move |e| e.weapon_hypothesis_test(variance))
        .await?;
    Ok(Json(outcome))
}

/// `GET /api/eda/all-graphs`
pub async fn eda_all_graphs(State(state): State<AppState>) -> ApiResult<Json<EdaGraphsPayload>> {
    let top = state.ctx.settings.top_countries;
    let payload = state.ctx.query("eda_graphs", move |e| e.eda_graphs(top)).await?;
    Ok(Json(payload))
}

/// `GET /api/report`
pub async fn report(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let settings = state.ctx.settings;
    let markdown = state
        .ctx
        .query("report", move |e| {
            e.generate_report_markdown(settings.top_countries, settings.variance)
        })
        .await?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], markdown))
}
