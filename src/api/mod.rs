//! API route definitions
//!
//! REST endpoints over the video registry and the rename pipeline.

pub mod health;
pub mod library;
pub mod videos;

use axum::Router;

use crate::app::AppState;

/// Build the /api router by merging all route modules
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(videos::router())
        .merge(library::router())
}
