//! End-to-end tests of the HTTP routes against an in-memory event table.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use gtd_api::{build_router, ApiContext, Config, QuerySettings};
use gtd_domain::payload::{
    AttackTypesByRegionPayload, EdaGraphsPayload, GlobalDistributionPayload, HypothesisPayload,
    OverviewPayload, RegionCasualtiesPayload, SamplePayload, WeaponCasualtiesPayload,
    YearlyTrendsPayload,
};
use gtd_domain::{EventRecord, Verdict};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

fn event(year: i32, weapon: &str, killed: Option<f64>, wounded: Option<f64>) -> EventRecord {
    EventRecord {
        year,
        month: 1,
        country: Some("Iraq".into()),
        region: Some("Middle East & North Africa".into()),
        latitude: Some(33.3),
        longitude: Some(44.4),
        success_status: Some(1),
        attack_type: Some("Bombing/Explosion".into()),
        target_type: Some("Military".into()),
        nationality: Some("Iraq".into()),
        group_name: Some("Unknown".into()),
        weapon_type: Some(weapon.into()),
        num_killed: killed,
        num_wounded: wounded,
        total_casualties: EventRecord::casualties(killed, wounded),
    }
}

/// Weapons A, B, C, D used 10, 2, 8, 1 times with mean casualties 5, 1, 4, 0.5.
fn hypothesis_events() -> Vec<EventRecord> {
    let mut events = Vec::new();
    events.extend((0..10).map(|_| event(1990, "A", Some(5.0), None)));
    events.extend((0..2).map(|_| event(1990, "B", None, Some(1.0))));
    events.extend((0..8).map(|_| event(1991, "C", Some(2.0), Some(2.0))));
    events.push(event(1992, "D", Some(0.5), None));
    events
}

fn app(events: &[EventRecord]) -> Router {
    let ctx = ApiContext::from_events(events, QuerySettings::default()).unwrap();
    build_router(ctx, &Config::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json<T: DeserializeOwned>(app: Router, uri: &str) -> T {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}: {}", String::from_utf8_lossy(&body));
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn yearly_trends_counts_events_per_year() {
    let events = vec![
        event(1990, "Firearms", None, None),
        event(1990, "Firearms", None, None),
        event(1991, "Firearms", None, None),
    ];
    let payload: YearlyTrendsPayload = get_json(app(&events), "/data/yearly-trends").await;
    assert_eq!(payload.yearly_counts.into_entries(), vec![(1990, 2), (1991, 1)]);
}

#[tokio::test]
async fn hypothesis_test_confirms_scenario() {
    let payload: HypothesisPayload =
        get_json(app(&hypothesis_events()), "/data/weapon-hypothesis-test").await;
    assert_eq!(payload.hypothesis_result, Verdict::Confirmed);
    assert_eq!(payload.median_usage, 5.0);
    assert_eq!(payload.high_usage, vec!["A", "C"]);
    assert_eq!(payload.low_usage, vec!["B", "D"]);
    assert!(payload.p_value < 0.05);
}

#[tokio::test]
async fn degenerate_hypothesis_is_unprocessable() {
    let events = vec![event(2000, "Firearms", None, None)];
    let (status, body) = get(app(&events), "/data/weapon-hypothesis-test").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "INSUFFICIENT_SAMPLE");
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn weapon_casualties_are_column_oriented() {
    let payload: WeaponCasualtiesPayload =
        get_json(app(&hypothesis_events()), "/data/weapon-casualties").await;
    assert_eq!(payload.weapon_stats.usage_count.get("C"), Some(&8));
    assert_eq!(payload.weapon_stats.avg_casualties.get("D"), Some(&0.5));
    assert!(payload.p_value < 0.05);
}

#[tokio::test]
async fn weapon_casualties_keep_stats_when_test_is_undefined() {
    let events = vec![
        event(2000, "Firearms", Some(1.0), None),
        event(2000, "Firearms", Some(3.0), None),
        event(2001, "Explosives", None, Some(2.0)),
    ];
    let (status, body) = get(app(&events), "/data/weapon-casualties").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["p_value"].is_null());
    assert_eq!(json["weapon_stats"]["usage_count"]["Firearms"], 2);
    assert_eq!(json["weapon_stats"]["avg_casualties"]["Explosives"], 2.0);

    let payload: WeaponCasualtiesPayload = serde_json::from_slice(&body).unwrap();
    assert!(payload.p_value.is_nan());
}

#[tokio::test]
async fn weapon_casualties_on_empty_table_have_no_p_value() {
    let json: Value = get_json(app(&[]), "/data/weapon-casualties").await;
    assert!(json["p_value"].is_null());
    assert_eq!(json["weapon_stats"]["usage_count"], serde_json::json!({}));
}

#[tokio::test]
async fn weapon_analysis_lists_records() {
    let json: Value = get_json(app(&hypothesis_events()), "/data/weapon-analysis").await;
    let stats = json["weapon_stats"].as_array().unwrap();
    assert_eq!(stats.len(), 4);
    assert_eq!(stats[0]["Weapon_Type"], "A");
    assert_eq!(stats[0]["usage_count"], 10);
}

#[tokio::test]
async fn region_casualties_include_total() {
    let payload: RegionCasualtiesPayload =
        get_json(app(&hypothesis_events()), "/data/total-casualties-by-region").await;
    let columns = payload.region_casualties;
    let total = columns.total_casualties.unwrap();
    assert_eq!(total.get("Middle East & North Africa"), Some(&(50.0 + 2.0 + 32.0 + 0.5)));
}

#[tokio::test]
async fn annual_casualties_have_two_columns() {
    let json: Value =
        get_json(app(&hypothesis_events()), "/data/annual-trends-casualties").await;
    let columns = json["yearly_casualties"].as_object().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns["Num_Killed"]["1990"], 50.0);
    assert_eq!(columns["Num_Wounded"]["1991"], 16.0);
}

#[tokio::test]
async fn attack_types_over_time_records() {
    let json: Value = get_json(app(&hypothesis_events()), "/data/attack-types-over-time").await;
    let rows = json["attack_types_over_time"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["Year"], 1990);
    assert_eq!(rows[0]["Attack_Type"], "Bombing/Explosion");
    assert_eq!(rows[0]["Count"], 12);
}

#[tokio::test]
async fn attack_types_by_region_breaks_down_each_year() {
    let mut events = hypothesis_events();
    let mut elsewhere = event(1990, "A", None, None);
    elsewhere.region = Some("South Asia".into());
    events.push(elsewhere);

    let payload: AttackTypesByRegionPayload =
        get_json(app(&events), "/data/attack-types-by-region").await;
    let rows = payload.attack_types_by_region;
    let keys: Vec<_> = rows
        .iter()
        .map(|r| (r.year, r.region.as_str(), r.count))
        .collect();
    assert_eq!(
        keys,
        vec![
            (1990, "Middle East & North Africa", 12),
            (1990, "South Asia", 1),
            (1991, "Middle East & North Africa", 8),
            (1992, "Middle East & North Africa", 1),
        ]
    );
    assert!(rows.iter().all(|r| r.attack_type == "Bombing/Explosion"));

    let json: Value = get_json(app(&events), "/data/attack-types-by-region").await;
    assert_eq!(json["attack_types_by_region"][1]["Region"], "South Asia");
}

#[tokio::test]
async fn global_distribution_skips_unlocated_events() {
    let mut unlocated = event(2001, "Firearms", None, None);
    unlocated.latitude = None;
    let events = vec![event(2000, "Firearms", None, None), unlocated];

    let payload: GlobalDistributionPayload =
        get_json(app(&events), "/data/global-distribution").await;
    assert_eq!(payload.global_distribution.len(), 1);
    assert_eq!(payload.global_distribution[0].year, 2000);
}

#[tokio::test]
async fn eda_graphs_bundle_three_series() {
    let payload: EdaGraphsPayload = get_json(app(&hypothesis_events()), "/api/eda/all-graphs").await;
    assert_eq!(payload.top_countries.get("Iraq"), Some(&21));
    assert_eq!(payload.attack_types.values().sum::<i64>(), 21);
    assert_eq!(payload.yearly_counts.values().sum::<i64>(), 21);
}

#[tokio::test]
async fn overview_and_sample() {
    let events = hypothesis_events();
    let overview: OverviewPayload = get_json(app(&events), "/data/overview").await;
    assert_eq!(overview.overview.get("Year").unwrap().count, 21);
    assert_eq!(overview.missing_values.get("Num_Killed"), Some(&2));

    let sample: SamplePayload = get_json(app(&events), "/data/sample").await;
    assert_eq!(sample.sample.len(), 10);
    let weapons: Vec<_> = sample.sample.iter().map(|e| e.weapon_type.as_deref()).collect();
    assert_eq!(weapons, vec![Some("A"); 10]);
}

#[tokio::test]
async fn empty_table_yields_empty_payloads() {
    let json: Value = get_json(app(&[]), "/data/attack-types").await;
    assert_eq!(json, serde_json::json!({ "attack_counts": {} }));
}

#[tokio::test]
async fn report_is_markdown() {
    let response = app(&hypothesis_events())
        .oneshot(Request::builder().uri("/api/report").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/markdown"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = app(&[])
        .oneshot(
            Request::builder()
                .uri("/data/yearly-trends")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

async fn graphql(app: Router, query: &str) -> Value {
    let body = serde_json::json!({ "query": query });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json.get("errors").is_none(), "{json}");
    json
}

#[tokio::test]
async fn graphql_exposes_the_same_routines() {
    let json = graphql(
        app(&hypothesis_events()),
        "{ yearlyCounts { year count } weaponHypothesisTest(variance: WELCH) { hypothesisResult variance highUsage } }",
    )
    .await;
    assert_eq!(json["data"]["yearlyCounts"][0]["year"], 1990);
    assert_eq!(json["data"]["weaponHypothesisTest"]["variance"], "WELCH");
    assert_eq!(json["data"]["weaponHypothesisTest"]["highUsage"][1], "C");
}

#[tokio::test]
async fn graphql_report_in_both_formats() {
    let json = graphql(
        app(&hypothesis_events()),
        "{ markdown: report json: report(format: JSON) }",
    )
    .await;
    let markdown = json["data"]["markdown"].as_str().unwrap();
    assert!(markdown.starts_with("# Global Terrorism Analytics Report"));

    let report: Value = serde_json::from_str(json["data"]["json"].as_str().unwrap()).unwrap();
    assert_eq!(report["total_events"], 21);
    assert_eq!(report["hypothesis"]["hypothesis_result"], "Confirmed");
    assert_eq!(report["weapon_stats"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn health_check() {
    let (status, body) = get(app(&[]), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
