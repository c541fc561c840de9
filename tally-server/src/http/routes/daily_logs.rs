//! Daily log endpoints
//!
//! Two per-person logs share one shape: at most one row per date, written
//! with an upsert. Supplied counters overwrite, omitted ones keep their
//! stored value (zero on first insert). `"notes": null` clears the notes.
//! Fetching an unlogged date succeeds with `data: null`.

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::repos::{
    ConsultantLog, ConsultantLogEntry, ConsultantLogRepo, Deleted, EngineerLog, EngineerLogEntry,
    EngineerLogRepo,
};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required, ListParams, ValidationError};

/// Engineer log upsert request
#[derive(Debug, Deserialize)]
pub struct EngineerLogRequest {
    pub date: Option<NaiveDate>,
    pub dsa_solved: Option<i32>,
    pub cp_solved: Option<i32>,
    pub dev_minutes: Option<i32>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub notes: Option<Option<String>>,
}

impl EngineerLogRequest {
    fn validate(self) -> Result<EngineerLogEntry, ValidationError> {
        Ok(EngineerLogEntry {
            date: required(self.date, "date")?,
            dsa_solved: self.dsa_solved,
            cp_solved: self.cp_solved,
            dev_minutes: self.dev_minutes,
            notes: self.notes,
        })
    }
}

/// Consultant log upsert request
#[derive(Debug, Deserialize)]
pub struct ConsultantLogRequest {
    pub date: Option<NaiveDate>,
    pub cases_solved: Option<i32>,
    pub guesstimates_solved: Option<i32>,
    pub reading_minutes: Option<i32>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub notes: Option<Option<String>>,
}

impl ConsultantLogRequest {
    fn validate(self) -> Result<ConsultantLogEntry, ValidationError> {
        Ok(ConsultantLogEntry {
            date: required(self.date, "date")?,
            cases_solved: self.cases_solved,
            guesstimates_solved: self.guesstimates_solved,
            reading_minutes: self.reading_minutes,
            notes: self.notes,
        })
    }
}

async fn list_engineer(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<EngineerLog>> {
    let logs = EngineerLogRepo::new(&state.pool).list(params.range()?).await?;
    Ok(Envelope::ok(logs))
}

async fn get_engineer(
    State(state): State<Arc<AppState>>,
    ValidPath(date): ValidPath<NaiveDate>,
) -> ApiResult<Option<EngineerLog>> {
    let log = EngineerLogRepo::new(&state.pool).get(date).await?;
    Ok(Envelope::ok(log))
}

async fn save_engineer(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<EngineerLogRequest>,
) -> ApiResult<EngineerLog> {
    let log = EngineerLogRepo::new(&state.pool).save(req.validate()?).await?;
    tracing::info!(date = %log.date, "engineer log saved");
    Ok(Envelope::ok(log))
}

async fn delete_engineer(
    State(state): State<Arc<AppState>>,
    ValidPath(date): ValidPath<NaiveDate>,
) -> ApiResult<Deleted> {
    let deleted = EngineerLogRepo::new(&state.pool).delete(date).await?;
    tracing::info!(date = %date, "engineer log deleted");
    Ok(Envelope::ok(deleted))
}

async fn list_consultant(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<ConsultantLog>> {
    let logs = ConsultantLogRepo::new(&state.pool)
        .list(params.range()?)
        .await?;
    Ok(Envelope::ok(logs))
}

async fn get_consultant(
    State(state): State<Arc<AppState>>,
    ValidPath(date): ValidPath<NaiveDate>,
) -> ApiResult<Option<ConsultantLog>> {
    let log = ConsultantLogRepo::new(&state.pool).get(date).await?;
    Ok(Envelope::ok(log))
}

async fn save_consultant(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ConsultantLogRequest>,
) -> ApiResult<ConsultantLog> {
    let log = ConsultantLogRepo::new(&state.pool)
        .save(req.validate()?)
        .await?;
    tracing::info!(date = %log.date, "consultant log saved");
    Ok(Envelope::ok(log))
}

async fn delete_consultant(
    State(state): State<Arc<AppState>>,
    ValidPath(date): ValidPath<NaiveDate>,
) -> ApiResult<Deleted> {
    let deleted = ConsultantLogRepo::new(&state.pool).delete(date).await?;
    tracing::info!(date = %date, "consultant log deleted");
    Ok(Envelope::ok(deleted))
}

/// Daily log routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/daily-logs/engineer",
            get(list_engineer).post(save_engineer),
        )
        .route(
            "/daily-logs/engineer/{date}",
            get(get_engineer).delete(delete_engineer),
        )
        .route(
            "/daily-logs/consultant",
            get(list_consultant).post(save_consultant),
        )
        .route(
            "/daily-logs/consultant/{date}",
            get(get_consultant).delete(delete_consultant),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_counters_stay_unset() {
        let req: EngineerLogRequest =
            serde_json::from_str(r#"{"date": "2024-05-02", "dsa_solved": 3}"#).unwrap();
        let entry = req.validate().unwrap();
        assert_eq!(entry.dsa_solved, Some(3));
        assert_eq!(entry.cp_solved, None);
        assert_eq!(entry.dev_minutes, None);
    }

    #[test]
    fn null_notes_clear_and_absent_notes_keep() {
        let cleared: EngineerLogRequest =
            serde_json::from_str(r#"{"date": "2024-05-02", "notes": null}"#).unwrap();
        assert_eq!(cleared.validate().unwrap().notes, Some(None));

        let kept: ConsultantLogRequest =
            serde_json::from_str(r#"{"date": "2024-05-02", "cases_solved": 2}"#).unwrap();
        assert_eq!(kept.validate().unwrap().notes, None);
    }

    #[test]
    fn date_is_required() {
        let req: ConsultantLogRequest = serde_json::from_str(r#"{"cases_solved": 1}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing { field: "date" }
        );
    }
}
