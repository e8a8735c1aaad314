//! # GTD Insight Query Service
//!
//! HTTP service exposing the dataset aggregations and the weapon usage hypothesis
//! test to the dashboard.
//!
//! ## Features
//!
//! - **REST endpoints**: one GET per aggregation, JSON payloads, no parameters
//! - **GraphQL**: read-only query fields over the same routines
//! - **Markdown report**: every aggregation and the test in one document
//! - **Open CORS**: any origin may call the API by default
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │         (REST routes, GraphQL endpoint + Playground)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ApiContext                               │
//! │      (shared engine handle, settings, spawn_blocking)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              gtd-analytics (in-memory DuckDB)               │
//! │        loaded once at startup by gtd-dataset::load          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod error;
pub mod resolvers;
pub mod routes;
pub mod schema;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{HeaderValue, Method},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use context::{ApiContext, QuerySettings};
pub use error::{ApiError, ApiResult};
pub use resolvers::QueryRoot;

/// GraphQL schema type
pub type ApiSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the GraphQL schema with context
#[must_use]
pub fn build_schema(ctx: ApiContext, config: &Config) -> ApiSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(ctx)
        .limit_depth(config.max_query_depth)
        .limit_complexity(config.max_query_complexity)
        .finish()
}

/// Application state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub ctx: ApiContext,
    pub schema: ApiSchema,
}

/// GraphQL endpoint handler
pub async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphQL Playground HTML
pub async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// Build the Axum router
pub fn build_router(ctx: ApiContext, config: &Config) -> Router {
    let schema = build_schema(ctx.clone(), config);
    let state = AppState { ctx, schema };

    // CORS configuration
    let origins = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(origins)
        .allow_headers(Any);

    let graphql = if config.enable_playground {
        get(graphql_playground).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    Router::new()
        // Data endpoints
        .route("/data/overview", get(routes::overview))
        .route("/data/sample", get(routes::sample))
        .route("/data/yearly-trends", get(routes::yearly_trends))
        .route("/data/attack-types", get(routes::attack_types))
        .route("/data/weapon-popularity", get(routes::weapon_popularity))
        .route("/data/weapon-casualties", get(routes::weapon_casualties))
        .route(
            "/data/total-casualties-by-region",
            get(routes::total_casualties_by_region),
        )
        .route(
            "/data/annual-trends-casualties",
            get(routes::annual_trends_casualties),
        )
        .route(
            "/data/attack-types-over-time",
            get(routes::attack_types_over_time),
        )
        .route(
            "/data/attack-types-by-region",
            get(routes::attack_types_by_region),
        )
        .route("/data/global-distribution", get(routes::global_distribution))
        .route("/data/weapon-analysis", get(routes::weapon_analysis))
        .route(
            "/data/weapon-hypothesis-test",
            get(routes::weapon_hypothesis_test),
        )
        .route("/api/eda/all-graphs", get(routes::eda_all_graphs))
        .route("/api/report", get(routes::report))
        // GraphQL endpoint
        .route("/graphql", graphql)
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { "GTD Insight API" }))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
