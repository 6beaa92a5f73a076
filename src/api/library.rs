//! Library maintenance endpoints
//!
//! The reset endpoint runs the same rename + purge pass the scheduler runs,
//! on demand (e.g. after dropping new files into the library). The restore
//! endpoint reverses the anonymization.

use std::path::Path;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::AppState;
use crate::services::RestoredFile;

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Newly assigned filenames from the rename pass
    pub renamed: Vec<String>,
    /// Paths of registry rows removed because their file was missing
    pub purged: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestoreRequest {
    /// Whether to point the registry rows at the restored names
    #[serde(default)]
    pub update_registry: bool,
}

#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub restored: Vec<RestoredFile>,
}

/// Rename new arrivals under the media root, then drop rows for vanished files
async fn reset_library(State(state): State<AppState>) -> Result<Json<ResetResponse>, StatusCode> {
    let root = Path::new(&state.config.media_path);

    let renamed = match state.renamer.rename_tree(root).await {
        Ok(renamed) => renamed,
        Err(e) => {
            error!(error = %e, "Library rename pass failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let purged = match state.renamer.purge_missing().await {
        Ok(purged) => purged,
        Err(e) => {
            error!(error = %e, "Registry purge failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(ResetResponse { renamed, purged }))
}

/// Restore original filenames for everything the registry knows about
async fn restore_library(
    State(state): State<AppState>,
    Json(request): Json<RestoreRequest>,
) -> Result<Json<RestoreResponse>, StatusCode> {
    match state.renamer.restore_all(request.update_registry).await {
        Ok(restored) => Ok(Json(RestoreResponse { restored })),
        Err(e) => {
            error!(error = %e, "Restore failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/library/reset", post(reset_library))
        .route("/library/restore", post(restore_library))
}
