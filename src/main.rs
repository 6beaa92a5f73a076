//! MediaVault backend entry point

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediavault::app::{AppState, build_app};
use mediavault::config::Config;
use mediavault::db::Database;
use mediavault::jobs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediavault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MediaVault backend");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!(database = %config.database_url, "Database connected");

    let state = AppState::new(config.clone(), db);

    // Periodic rename + purge over the media root
    let _scheduler = jobs::start_scheduler(
        state.renamer.clone(),
        PathBuf::from(&config.media_path),
        &config.maintenance_cron,
    )
    .await?;

    let app = build_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
