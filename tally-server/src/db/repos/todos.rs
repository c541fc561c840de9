//! Todo repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

const TABLE: &str = "todos";
const RESOURCE: &str = "todo";

/// Todo record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Todo {
    pub id: Uuid,
    pub profile: String,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated insert
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub profile: String,
    pub content: String,
    pub completed: bool,
}

/// Updatable todo fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoChanges {
    pub content: Option<String>,
    pub completed: Option<bool>,
}

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Todos for a profile, newest first.
    pub async fn list(&self, profile: &str) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as(
            r#"
            SELECT id, profile, content, completed, created_at
            FROM todos
            WHERE profile = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(todos)
    }

    pub async fn create(&self, todo: NewTodo) -> Result<Todo, DbError> {
        let todo = sqlx::query_as(
            r#"
            INSERT INTO todos (profile, content, completed)
            VALUES ($1, $2, $3)
            RETURNING id, profile, content, completed, created_at
            "#,
        )
        .bind(todo.profile)
        .bind(todo.content)
        .bind(todo.completed)
        .fetch_one(self.pool)
        .await?;

        Ok(todo)
    }

    pub async fn update(&self, id: Uuid, changes: TodoChanges) -> Result<Todo, DbError> {
        ChangeSet::new(TABLE)
            .set("content", changes.content)
            .set("completed", changes.completed)
            .apply(self.pool, RESOURCE, id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, TABLE, RESOURCE, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_update_fields_rejected() {
        let result: Result<TodoChanges, _> =
            serde_json::from_str(r#"{"content": "x", "profile": "b"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn partial_update_parses() {
        let changes: TodoChanges = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert_eq!(changes.completed, Some(true));
        assert!(changes.content.is_none());
    }
}
