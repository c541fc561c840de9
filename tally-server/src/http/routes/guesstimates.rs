//! Guesstimate endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{Deleted, Guesstimate, GuesstimateChanges, GuesstimateRepo, NewGuesstimate};
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateGuesstimateRequest {
    pub topic: Option<String>,
    pub answer: Option<String>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
}

impl CreateGuesstimateRequest {
    fn validate(self) -> Result<NewGuesstimate, ValidationError> {
        Ok(NewGuesstimate {
            topic: required_text(self.topic, "topic")?,
            answer: self.answer,
            notes: self.notes,
            date: self.date,
        })
    }
}

async fn list_guesstimates(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Guesstimate>> {
    let guesstimates = GuesstimateRepo::new(&state.pool).list().await?;
    Ok(Envelope::ok(guesstimates))
}

async fn create_guesstimate(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateGuesstimateRequest>,
) -> ApiResult<Guesstimate> {
    let guesstimate = GuesstimateRepo::new(&state.pool)
        .create(req.validate()?)
        .await?;
    tracing::info!(id = %guesstimate.id, "guesstimate recorded");
    Ok(Envelope::ok(guesstimate))
}

async fn update_guesstimate(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<GuesstimateChanges>,
) -> ApiResult<Guesstimate> {
    let guesstimate = GuesstimateRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(guesstimate))
}

async fn delete_guesstimate(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = GuesstimateRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/guesstimates",
            get(list_guesstimates).post(create_guesstimate),
        )
        .route(
            "/guesstimates/{id}",
            put(update_guesstimate).delete(delete_guesstimate),
        )
}
