//! Blind 75 question endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{Blind75Changes, Blind75Question, Blind75Repo, Deleted, NewBlind75Question};
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question_name: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub link: Option<String>,
    pub solved: Option<bool>,
}

impl CreateQuestionRequest {
    fn validate(self) -> Result<NewBlind75Question, ValidationError> {
        Ok(NewBlind75Question {
            question_name: required_text(self.question_name, "question_name")?,
            topic: self.topic,
            difficulty: self.difficulty,
            link: self.link,
            solved: self.solved.unwrap_or(false),
        })
    }
}

async fn list_questions(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Blind75Question>> {
    let questions = Blind75Repo::new(&state.pool).list().await?;
    Ok(Envelope::ok(questions))
}

async fn create_question(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateQuestionRequest>,
) -> ApiResult<Blind75Question> {
    let question = Blind75Repo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %question.id, "blind75 question added");
    Ok(Envelope::ok(question))
}

async fn update_question(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<Blind75Changes>,
) -> ApiResult<Blind75Question> {
    let question = Blind75Repo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(question))
}

async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = Blind75Repo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blind75", get(list_questions).post(create_question))
        .route("/blind75/{id}", put(update_question).delete(delete_question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_defaults_to_false() {
        let req: CreateQuestionRequest =
            serde_json::from_str(r#"{"question_name": "Two Sum", "topic": "arrays"}"#).unwrap();
        let question = req.validate().unwrap();
        assert!(!question.solved);
        assert_eq!(question.topic.as_deref(), Some("arrays"));
    }
}
