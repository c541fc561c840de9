//! Todo endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{Deleted, NewTodo, Todo, TodoChanges, TodoRepo};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ListParams, ValidationError};

/// Create todo request
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub profile: Option<String>,
    pub content: Option<String>,
    pub completed: Option<bool>,
}

impl CreateTodoRequest {
    fn validate(self) -> Result<NewTodo, ValidationError> {
        Ok(NewTodo {
            profile: required_text(self.profile, "profile")?,
            content: required_text(self.content, "content")?,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// GET /todos?profile=
async fn list_todos(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<Todo>> {
    let profile = params.require_profile()?;
    let todos = TodoRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(todos))
}

/// POST /todos
async fn create_todo(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTodoRequest>,
) -> ApiResult<Todo> {
    let todo = TodoRepo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %todo.id, profile = %todo.profile, "todo created");
    Ok(Envelope::ok(todo))
}

/// PUT /todos/{id}
async fn update_todo(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<TodoChanges>,
) -> ApiResult<Todo> {
    let todo = TodoRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(todo))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = TodoRepo::new(&state.pool).delete(id).await?;
    tracing::info!(id = %id, "todo deleted");
    Ok(Envelope::ok(deleted))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateTodoRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn completed_defaults_to_false() {
        let todo = request(r#"{"profile": "a", "content": "x"}"#).validate().unwrap();
        assert_eq!(todo.profile, "a");
        assert_eq!(todo.content, "x");
        assert!(!todo.completed);
    }

    #[test]
    fn blank_content_rejected() {
        let err = request(r#"{"profile": "a", "content": " "}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "content" });
    }

    #[test]
    fn profile_checked_first() {
        let err = request("{}").validate().unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "profile" });
    }
}
