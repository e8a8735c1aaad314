//! # Footer Component
//!
//! Status bar with API reachability.

use leptos::prelude::*;

use crate::services::check_health;
use crate::state::use_app_state;

/// Footer status bar
#[component]
pub fn Footer() -> impl IntoView {
    let state = use_app_state();

    leptos::task::spawn_local(async move {
        state.api_online.set(Some(check_health().await));
    });

    let connection_status = move || match state.api_online.get() {
        None => ("warning", "CHECKING API"),
        Some(true) => ("nominal", "API ONLINE"),
        Some(false) => ("critical", "API OFFLINE"),
    };

    view! {
        <footer class="dash-footer">
            <span class="text-muted">{format!("GTD INSIGHT v{}", env!("CARGO_PKG_VERSION"))}</span>
            <span class="flex items-center gap-xs">
                <span class=move || format!("status-dot {}", connection_status().0)></span>
                <span class="text-sm">{move || connection_status().1}</span>
            </span>
        </footer>
    }
}
