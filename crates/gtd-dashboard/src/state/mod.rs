//! # Application State
//!
//! Reactive state for the dashboard: the selected section and API reachability.

pub mod series;

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

/// Local storage key of the last selected section
const SECTION_KEY: &str = "gtd-insight.section";

/// Dashboard sections, in menu order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    About,
    DataOverview,
    Eda,
    Trends,
    Hypothesis,
    Conclusions,
}

impl Section {
    pub const ALL: [Self; 6] = [
        Self::About,
        Self::DataOverview,
        Self::Eda,
        Self::Trends,
        Self::Hypothesis,
        Self::Conclusions,
    ];

    /// Menu label
    pub fn title(&self) -> &'static str {
        match self {
            Self::About => "About the Project",
            Self::DataOverview => "Data Overview",
            Self::Eda => "Exploratory Data Analysis (EDA)",
            Self::Trends => "Trend Visualization",
            Self::Hypothesis => "Hypothesis: Weapon Choice and Casualties",
            Self::Conclusions => "Conclusions",
        }
    }

    /// Stable key used for persistence
    pub fn key(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::DataOverview => "overview",
            Self::Eda => "eda",
            Self::Trends => "trends",
            Self::Hypothesis => "hypothesis",
            Self::Conclusions => "conclusions",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Global application state
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    pub section: RwSignal<Section>,
    /// `None` until the first health check completes
    pub api_online: RwSignal<Option<bool>>,
}

impl AppState {
    pub fn new(section: Section) -> Self {
        Self {
            section: RwSignal::new(section),
            api_online: RwSignal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Section::default())
    }
}

/// Restore the last section from local storage and persist every change.
pub fn provide_app_state() {
    let restored = LocalStorage::get::<String>(SECTION_KEY)
        .ok()
        .and_then(|key| Section::from_key(&key))
        .unwrap_or_default();
    let state = AppState::new(restored);

    Effect::new(move |_| {
        let section = state.section.get();
        if let Err(e) = LocalStorage::set(SECTION_KEY, section.key()) {
            log::warn!("Could not persist section: {e}");
        }
    });

    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
