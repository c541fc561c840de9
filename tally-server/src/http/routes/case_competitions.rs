//! Case competition endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{
    CaseCompetition, CaseCompetitionChanges, CaseCompetitionRepo, Deleted, NewCaseCompetition,
};
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateCompetitionRequest {
    pub competition_name: Option<String>,
    pub organizer: Option<String>,
    pub stage: Option<String>,
    pub result: Option<String>,
    pub date: Option<NaiveDate>,
    pub doc_url: Option<String>,
}

impl CreateCompetitionRequest {
    fn validate(self) -> Result<NewCaseCompetition, ValidationError> {
        Ok(NewCaseCompetition {
            competition_name: required_text(self.competition_name, "competition_name")?,
            organizer: self.organizer,
            stage: self.stage,
            result: self.result,
            date: self.date,
            doc_url: self.doc_url,
        })
    }
}

async fn list_competitions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<CaseCompetition>> {
    let competitions = CaseCompetitionRepo::new(&state.pool).list().await?;
    Ok(Envelope::ok(competitions))
}

async fn create_competition(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCompetitionRequest>,
) -> ApiResult<CaseCompetition> {
    let competition = CaseCompetitionRepo::new(&state.pool)
        .create(req.validate()?)
        .await?;
    tracing::info!(
        id = %competition.id,
        competition = %competition.competition_name,
        "case competition created"
    );
    Ok(Envelope::ok(competition))
}

async fn update_competition(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<CaseCompetitionChanges>,
) -> ApiResult<CaseCompetition> {
    let competition = CaseCompetitionRepo::new(&state.pool)
        .update(id, changes)
        .await?;
    Ok(Envelope::ok(competition))
}

async fn delete_competition(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = CaseCompetitionRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/case-competitions",
            get(list_competitions).post(create_competition),
        )
        .route(
            "/case-competitions/{id}",
            put(update_competition).delete(delete_competition),
        )
}
