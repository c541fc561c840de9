//! Resume section endpoints (list and update only)

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::db::repos::{ResumeSection, ResumeSectionChanges, ResumeSectionRepo};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::ListParams;

async fn list_sections(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<ResumeSection>> {
    let profile = params.require_profile()?;
    let sections = ResumeSectionRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(sections))
}

async fn update_section(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<ResumeSectionChanges>,
) -> ApiResult<ResumeSection> {
    let section = ResumeSectionRepo::new(&state.pool)
        .update(id, changes)
        .await?;
    tracing::info!(id = %id, section = %section.section_name, "resume section updated");
    Ok(Envelope::ok(section))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/resume-sections", get(list_sections))
        .route("/resume-sections/{id}", put(update_section))
}
