//! CP rating and contest log endpoints

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
    ContestLog, ContestLogChanges, ContestLogRepo, CpRating, CpRatingRepo, Deleted, NewContestLog,
    RatingUpsert,
};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required, required_text, ListParams, ValidationError};

/// Rating upsert request, keyed on platform
#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub platform: Option<String>,
    pub rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub handle: Option<String>,
}

impl RatingRequest {
    fn validate(self) -> Result<RatingUpsert, ValidationError> {
        Ok(RatingUpsert {
            platform: required_text(self.platform, "platform")?,
            rating: required(self.rating, "rating")?,
            max_rating: self.max_rating,
            handle: self.handle,
        })
    }
}

/// Create contest log request
#[derive(Debug, Deserialize)]
pub struct CreateContestLogRequest {
    pub platform: Option<String>,
    pub contest_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub rank: Option<i32>,
    pub rating_change: Option<i32>,
    pub problems_solved: Option<i32>,
}

impl CreateContestLogRequest {
    fn validate(self) -> Result<NewContestLog, ValidationError> {
        Ok(NewContestLog {
            platform: required_text(self.platform, "platform")?,
            contest_name: required_text(self.contest_name, "contest_name")?,
            date: required(self.date, "date")?,
            rank: self.rank,
            rating_change: self.rating_change,
            problems_solved: self.problems_solved.unwrap_or(0),
        })
    }
}

/// GET /cp-ratings
async fn list_ratings(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CpRating>> {
    let ratings = CpRatingRepo::new(&state.pool).list().await?;
    Ok(Envelope::ok(ratings))
}

/// GET /cp-ratings/{platform} - null data when the platform has no rating
async fn get_rating(
    State(state): State<Arc<AppState>>,
    ValidPath(platform): ValidPath<String>,
) -> ApiResult<Option<CpRating>> {
    let rating = CpRatingRepo::new(&state.pool).get(&platform).await?;
    Ok(Envelope::ok(rating))
}

/// PUT /cp-ratings - create or update the rating for a platform
async fn upsert_rating(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<RatingRequest>,
) -> ApiResult<CpRating> {
    let rating = CpRatingRepo::new(&state.pool).upsert(req.validate()?).await?;
    tracing::info!(platform = %rating.platform, rating = rating.rating, "cp rating saved");
    Ok(Envelope::ok(rating))
}

/// DELETE /cp-ratings/{platform}
async fn delete_rating(
    State(state): State<Arc<AppState>>,
    ValidPath(platform): ValidPath<String>,
) -> ApiResult<Deleted> {
    let deleted = CpRatingRepo::new(&state.pool).delete(&platform).await?;
    tracing::info!(platform = %platform, "cp rating deleted");
    Ok(Envelope::ok(deleted))
}

/// GET /contest-logs?platform=&from=&to=
async fn list_contests(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<ContestLog>> {
    let range = params.range()?;
    let logs = ContestLogRepo::new(&state.pool)
        .list(params.platform.as_deref(), range)
        .await?;
    Ok(Envelope::ok(logs))
}

/// POST /contest-logs
async fn create_contest(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateContestLogRequest>,
) -> ApiResult<ContestLog> {
    let log = ContestLogRepo::new(&state.pool)
        .create(req.validate()?)
        .await?;
    tracing::info!(id = %log.id, contest = %log.contest_name, "contest logged");
    Ok(Envelope::ok(log))
}

/// PUT /contest-logs/{id}
async fn update_contest(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<ContestLogChanges>,
) -> ApiResult<ContestLog> {
    let log = ContestLogRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(log))
}

/// DELETE /contest-logs/{id}
async fn delete_contest(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = ContestLogRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

/// Contest routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cp-ratings", get(list_ratings).put(upsert_rating))
        .route("/cp-ratings/{platform}", get(get_rating).delete(delete_rating))
        .route("/contest-logs", get(list_contests).post(create_contest))
        .route("/contest-logs/{id}", put(update_contest).delete(delete_contest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_requires_value() {
        let req: RatingRequest = serde_json::from_str(r#"{"platform": "codeforces"}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing { field: "rating" }
        );
    }

    #[test]
    fn contest_defaults() {
        let req: CreateContestLogRequest = serde_json::from_str(
            r#"{"platform": "leetcode", "contest_name": "Weekly 390", "date": "2024-03-10"}"#,
        )
        .unwrap();
        let log = req.validate().unwrap();
        assert_eq!(log.problems_solved, 0);
        assert_eq!(log.rank, None);
    }
}
