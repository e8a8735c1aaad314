//! # API Client
//!
//! REST client for the query service. Every call is a parameterless GET.

use gloo_net::http::Request;
use gtd_domain::payload::{
    AttackTypesByRegionPayload, AttackTypesOverTimePayload, EdaGraphsPayload, GlobalDistributionPayload, HypothesisPayload,
    OverviewPayload, RegionCasualtiesPayload, SamplePayload, WeaponAnalysisPayload,
    WeaponPopularityPayload, YearlyCasualtiesPayload,
};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const API_URL: &str = "http://localhost:8000";

/// Fetch outcome held by a page until it renders
pub type Fetched<T> = RwSignal<Option<Result<T, String>>>;

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
    code: String,
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&format!("{API_URL}{path}"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ErrorBody>().await {
            Ok(body) => format!("{} ({})", body.error.message, body.error.code),
            Err(_) => format!("{path} returned HTTP {status}"),
        });
    }

    response.json().await.map_err(|e| e.to_string())
}

/// Spawn `request` and return the signal its result lands in.
pub fn fetch<T, F>(request: F) -> Fetched<T>
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<T, String>> + 'static,
{
    let state = RwSignal::new(None);
    leptos::task::spawn_local(async move {
        let result = request.await;
        if let Err(e) = &result {
            log::error!("API request failed: {e}");
        }
        state.set(Some(result));
    });
    state
}

/// Whether `/health` answers.
pub async fn check_health() -> bool {
    match Request::get(&format!("{API_URL}/health")).send().await {
        Ok(response) => response.ok(),
        Err(_) => false,
    }
}

pub async fn fetch_overview() -> Result<OverviewPayload, String> {
    get_json("/data/overview").await
}

pub async fn fetch_sample() -> Result<SamplePayload, String> {
    get_json("/data/sample").await
}

pub async fn fetch_eda_graphs() -> Result<EdaGraphsPayload, String> {
    get_json("/api/eda/all-graphs").await
}

pub async fn fetch_region_casualties() -> Result<RegionCasualtiesPayload, String> {
    get_json("/data/total-casualties-by-region").await
}

pub async fn fetch_yearly_casualties() -> Result<YearlyCasualtiesPayload, String> {
    get_json("/data/annual-trends-casualties").await
}

pub async fn fetch_attack_types_over_time() -> Result<AttackTypesOverTimePayload, String> {
    get_json("/data/attack-types-over-time").await
}

pub async fn fetch_attack_types_by_region() -> Result<AttackTypesByRegionPayload, String> {
    get_json("/data/attack-types-by-region").await
}

pub async fn fetch_global_distribution() -> Result<GlobalDistributionPayload, String> {
    get_json("/data/global-distribution").await
}

pub async fn fetch_weapon_popularity() -> Result<WeaponPopularityPayload, String> {
    get_json("/data/weapon-popularity").await
}

pub async fn fetch_weapon_analysis() -> Result<WeaponAnalysisPayload, String> {
    get_json("/data/weapon-analysis").await
}

pub async fn fetch_hypothesis() -> Result<HypothesisPayload, String> {
    get_json("/data/weapon-hypothesis-test").await
}
