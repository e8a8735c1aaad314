//! # GTD Insight Dashboard
//!
//! Six-section analytics dashboard over the query service: project summary, data
//! overview, exploratory charts, trends with a world map, the weapon usage hypothesis
//! test, and conclusions.

#![warn(clippy::all)]

pub mod components;
pub mod pages;
pub mod services;
pub mod state;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};

use components::*;
use pages::*;
use state::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();
    let state = use_app_state();

    let page = move || match state.section.get() {
        Section::About => view! { <AboutPage /> }.into_any(),
        Section::DataOverview => view! { <OverviewPage /> }.into_any(),
        Section::Eda => view! { <EdaPage /> }.into_any(),
        Section::Trends => view! { <TrendsPage /> }.into_any(),
        Section::Hypothesis => view! { <HypothesisPage /> }.into_any(),
        Section::Conclusions => view! { <ConclusionsPage /> }.into_any(),
    };

    view! {
        <Title text=move || format!("{} | GTD Insight", state.section.get().title()) />
        <div class="dash-container">
            <Header />
            <Sidebar />
            <main class="dash-main">{page}</main>
            <Footer />
        </div>
    }
}

pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("GTD Insight Dashboard v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(App);
}
