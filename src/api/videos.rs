//! Video registry read endpoints
//!
//! Consumed by the watch page to enumerate what is playable and to map a
//! playing video's opaque id back to its human title.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::error;

use crate::app::AppState;
use crate::db::{SearchField, VideoRecord};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Field to match against
    field: SearchField,
    /// Substring to look for (case-sensitive)
    q: String,
}

/// Full library listing, ordered by directory then original name
async fn list_videos(
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoRecord>>, StatusCode> {
    match state.db.videos().get_all().await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            error!(error = %e, "Failed to list videos");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Substring search over original names or paths
async fn search_videos(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<VideoRecord>>, StatusCode> {
    match state.db.videos().find_by_substring(query.field, &query.q).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            error!(error = %e, "Video search failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Look up one record by identifier
async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoRecord>, StatusCode> {
    match state.db.videos().find_by_id(&id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(id = %id, error = %e, "Video lookup failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", get(list_videos))
        .route("/videos/search", get(search_videos))
        .route("/videos/{id}", get(get_video))
}
