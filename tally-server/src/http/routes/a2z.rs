//! A2Z sheet progress endpoints (single row)

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::db::repos::{A2zChanges, A2zProgress, A2zRepo};
use crate::http::extractors::ValidJson;
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;

/// GET /a2z-progress - null data until first saved
async fn get_progress(State(state): State<Arc<AppState>>) -> ApiResult<Option<A2zProgress>> {
    let progress = A2zRepo::new(&state.pool).get().await?;
    Ok(Envelope::ok(progress))
}

/// PUT /a2z-progress
async fn save_progress(
    State(state): State<Arc<AppState>>,
    ValidJson(changes): ValidJson<A2zChanges>,
) -> ApiResult<A2zProgress> {
    let progress = A2zRepo::new(&state.pool).save(changes).await?;
    tracing::info!(
        easy = progress.easy_solved,
        medium = progress.medium_solved,
        hard = progress.hard_solved,
        "a2z progress saved"
    );
    Ok(Envelope::ok(progress))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/a2z-progress", get(get_progress).put(save_progress))
}
