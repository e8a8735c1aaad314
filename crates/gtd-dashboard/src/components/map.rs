//! # Map Component
//!
//! World map of located attacks for one year, using Leaflet.js circle markers.

use gtd_domain::payload::GlobalDistributionPayload;
use gtd_domain::GeoPoint;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::services::Fetched;
use crate::state::series::{distinct_years, points_in_year};

/// Leaflet map wrapper
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L)]
    type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn create_map(id: &str) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, lat_lng: &JsValue, zoom: u32) -> Map;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen]
    type TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &Map);

    #[wasm_bindgen(js_namespace = L)]
    type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn group_add_to(this: &LayerGroup, map: &Map);

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup);

    #[wasm_bindgen(js_namespace = L)]
    type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(lat_lng: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &CircleMarker, content: &str) -> CircleMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn marker_add_to(this: &CircleMarker, group: &LayerGroup);
}

/// Marker colours by attack type, in the dataset's category order
const ATTACK_COLORS: &[(&str, &str)] = &[
    ("Bombing/Explosion", "#d63031"),
    ("Armed Assault", "#e17055"),
    ("Assassination", "#6c5ce7"),
    ("Hostage Taking (Kidnapping)", "#0984e3"),
    ("Facility/Infrastructure Attack", "#fdcb6e"),
    ("Unknown", "#636e72"),
    ("Unarmed Assault", "#00b894"),
    ("Hostage Taking (Barricade Incident)", "#00cec9"),
    ("Hijacking", "#e84393"),
];

fn attack_color(attack_type: &str) -> &'static str {
    ATTACK_COLORS
        .iter()
        .find(|(name, _)| *name == attack_type)
        .map_or("#b2bec3", |(_, color)| color)
}

fn lat_lng(latitude: f64, longitude: f64) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(latitude));
    pair.push(&JsValue::from_f64(longitude));
    pair.into()
}

fn options(entries: &[(&str, JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        if js_sys::Reflect::set(&object, &JsValue::from_str(key), value).is_err() {
            log::warn!("Could not set map option {key}");
        }
    }
    object.into()
}

/// Create the map with a tile layer and an empty marker group.
fn init_map(map_id: &str) -> Option<LayerGroup> {
    let window = web_sys::window()?;
    if window.get("L").is_none() {
        log::warn!("Leaflet not loaded, map will not render");
        return None;
    }

    let map = create_map(map_id);
    map.set_view(&lat_lng(20.0, 0.0), 2);

    let tile_options = options(&[
        ("maxZoom", JsValue::from_f64(19.0)),
        ("attribution", JsValue::from_str("© OpenStreetMap")),
    ]);
    tile_layer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", &tile_options).add_to(&map);

    let group = layer_group();
    group.group_add_to(&map);
    Some(group)
}

fn draw_points<'a>(group: &LayerGroup, points: impl Iterator<Item = &'a GeoPoint>) -> usize {
    group.clear_layers();
    let mut drawn = 0;
    for point in points {
        let color = JsValue::from_str(attack_color(&point.attack_type));
        let marker_options = options(&[
            ("radius", JsValue::from_f64(4.0)),
            ("color", color.clone()),
            ("fillColor", color),
            ("fillOpacity", JsValue::from_f64(0.7)),
            ("weight", JsValue::from_f64(1.0)),
        ]);
        let marker = circle_marker(&lat_lng(point.latitude, point.longitude), &marker_options);
        marker.bind_popup(&format!(
            "<b>{}</b><br/>{}<br/>{:.3}, {:.3}",
            point.attack_type, point.year, point.latitude, point.longitude
        ));
        marker.marker_add_to(group);
        drawn += 1;
    }
    drawn
}

/// Global distribution map with a year selector
#[component]
pub fn GlobalDistributionMap(data: Fetched<GlobalDistributionPayload>) -> impl IntoView {
    let map_id = "global-distribution-map";
    let selected_year = RwSignal::new(None::<i32>);

    let years = move || {
        data.with(|d| match d {
            Some(Ok(payload)) => distinct_years(&payload.global_distribution),
            _ => Vec::new(),
        })
    };
    // Latest year until the user picks one
    let year = move || selected_year.get().or_else(|| years().last().copied());

    Effect::new(move |group: Option<Option<LayerGroup>>| {
        let group = group.flatten().or_else(|| init_map(map_id))?;
        let shown_year = year();
        data.with(|d| {
            if let (Some(Ok(payload)), Some(y)) = (d, shown_year) {
                let drawn = draw_points(&group, points_in_year(&payload.global_distribution, y));
                log::info!("Map shows {drawn} attacks for {y}");
            }
        });
        Some(group)
    });

    let on_change = move |ev: leptos::ev::Event| {
        selected_year.set(event_target_value(&ev).parse().ok());
    };

    view! {
        <div class="map-toolbar">
            <label for="map-year">"Year: "</label>
            <select id="map-year" on:change=on_change>
                {move || {
                    let current = year();
                    years()
                        .into_iter()
                        .map(|y| view! { <option value=y.to_string() selected=current == Some(y)>{y}</option> })
                        .collect_view()
                }}
            </select>
        </div>
        <div class="map-container">
            <div id=map_id style="width: 100%; height: 100%; min-height: 420px;"></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_attack_types_have_distinct_colors() {
        let mut colors: Vec<_> = ATTACK_COLORS.iter().map(|(_, c)| *c).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), ATTACK_COLORS.len());
        assert_eq!(attack_color("Something Else"), "#b2bec3");
    }
}
