//! # Header Component
//!
//! Title bar and the sidebar section menu.

use leptos::prelude::*;

use crate::state::{use_app_state, Section};

/// Application title bar
#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();

    view! {
        <header class="dash-header">
            <div class="logo">
                <div class="logo-text">"Terrorism Activity Analysis"</div>
                <div class="logo-subtitle">"Global Terrorism Database 1970-2017"</div>
            </div>
            <div class="current-section">{move || state.section.get().title()}</div>
        </header>
    }
}

/// Section menu; the choice is persisted by the app state
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_app_state();

    view! {
        <nav class="dash-sidebar">
            <div class="sidebar-title">"Navigation"</div>
            <ul class="sidebar-menu">
                {Section::ALL
                    .into_iter()
                    .map(|section| {
                        let is_active = move || state.section.get() == section;
                        view! {
                            <li>
                                <button
                                    class="sidebar-link"
                                    class:active=is_active
                                    on:click=move |_| state.section.set(section)
                                >
                                    {section.title()}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
