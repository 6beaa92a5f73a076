//! Application state and HTTP router construction

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;
use crate::services::RenamerService;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub renamer: Arc<RenamerService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: Database) -> Self {
        let renamer = Arc::new(RenamerService::new(db.clone()));
        Self { config, db, renamer }
    }
}

/// Build the full Axum router: /api plus static serving of the media
/// directory so renamed files stay directly playable.
pub fn build_app(state: AppState) -> Router<()> {
    let media_dir = ServeDir::new(&state.config.media_path);

    Router::new()
        .nest("/api", crate::api::router())
        .nest_service("/media", media_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
