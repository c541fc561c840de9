//! Case study endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{CaseStudy, CaseStudyChanges, CaseStudyRepo, Deleted, NewCaseStudy};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required, required_text, ListParams, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateCaseStudyRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

impl CreateCaseStudyRequest {
    fn validate(self) -> Result<NewCaseStudy, ValidationError> {
        Ok(NewCaseStudy {
            title: required_text(self.title, "title")?,
            date: required(self.date, "date")?,
            source: self.source,
            notes: self.notes,
            completed: self.completed.unwrap_or(false),
        })
    }
}

async fn list_case_studies(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<CaseStudy>> {
    let studies = CaseStudyRepo::new(&state.pool).list(params.range()?).await?;
    Ok(Envelope::ok(studies))
}

async fn create_case_study(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCaseStudyRequest>,
) -> ApiResult<CaseStudy> {
    let study = CaseStudyRepo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %study.id, title = %study.title, "case study created");
    Ok(Envelope::ok(study))
}

async fn update_case_study(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<CaseStudyChanges>,
) -> ApiResult<CaseStudy> {
    let study = CaseStudyRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(study))
}

async fn delete_case_study(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = CaseStudyRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/case-studies",
            get(list_case_studies).post(create_case_study),
        )
        .route(
            "/case-studies/{id}",
            put(update_case_study).delete(delete_case_study),
        )
}
