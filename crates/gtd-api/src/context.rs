//! # API Context
//!
//! Application state shared by the REST handlers and GraphQL resolvers.

use std::sync::{Arc, Mutex};

use gtd_analytics::AnalyticsEngine;
use gtd_domain::{EventRecord, VarianceAssumption};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Per-request parameters that come from configuration, not from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    pub top_countries: usize,
    pub sample_rows: usize,
    pub variance: VarianceAssumption,
}

impl From<&Config> for QuerySettings {
    fn from(config: &Config) -> Self {
        Self {
            top_countries: config.top_countries_limit,
            sample_rows: config.sample_rows,
            variance: config.hypothesis_variance,
        }
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Handle to the loaded event table. It is not `Sync`; the lock is held only
    /// while a query clones its own connection from it.
    engine: Arc<Mutex<AnalyticsEngine>>,

    /// Query parameters fixed at startup
    pub settings: QuerySettings,
}

impl ApiContext {
    /// Wrap an already loaded engine.
    #[must_use]
    pub fn new(engine: AnalyticsEngine, settings: QuerySettings) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            settings,
        }
    }

    /// Load `events` into a new engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be built.
    pub fn from_events(events: &[EventRecord], settings: QuerySettings) -> ApiResult<Self> {
        Ok(Self::new(AnalyticsEngine::from_events(events)?, settings))
    }

    /// Run `f` against the engine on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns, or [`ApiError::Internal`] if the task panics.
    pub async fn query<T, F>(&self, name: &'static str, f: F) -> ApiResult<T>
    where
        F: FnOnce(&AnalyticsEngine) -> gtd_analytics::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tracing::debug!(query = name, "Running analytics query");

        tokio::task::spawn_blocking(move || {
            let handle = engine
                .lock()
                .map_err(|_| ApiError::Internal("analytics engine lock poisoned".to_string()))?
                .try_clone()?;
            f(&handle).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("{name} query task failed: {e}")))?
    }
}
