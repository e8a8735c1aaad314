//! # GTD Insight API Server
//!
//! Binary entry point: load the dataset, then serve the query endpoints.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gtd_api::{build_router, ApiContext, Config, QuerySettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(version = gtd_api::VERSION, "Starting GTD Insight API");

    // Load the dataset before binding; any failure ends the process
    let path = config.dataset_path.clone();
    let encoding = config.dataset_encoding;
    tracing::info!(path = %path.display(), %encoding, "Loading dataset");

    let table = match tokio::task::spawn_blocking(move || gtd_dataset::load(&path, encoding)).await? {
        Ok(table) => table,
        Err(err) => {
            tracing::error!(error = %err, "Dataset preparation failed");
            return Err(err.into());
        }
    };

    let ctx = ApiContext::from_events(table.as_slice(), QuerySettings::from(&config))?;
    drop(table);

    tracing::info!(
        top_countries = config.top_countries_limit,
        sample_rows = config.sample_rows,
        variance = config.hypothesis_variance.as_str(),
        playground = config.enable_playground,
        cors = ?config.cors_origins,
        "Query service ready"
    );

    // Build router
    let app = build_router(ctx, &config);

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    if config.enable_playground {
        tracing::info!("GraphQL Playground available at http://{}/graphql", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
