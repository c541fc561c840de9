//! Blind 75 question checklist

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blind75Question {
    pub id: Uuid,
    pub question_name: String,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub link: Option<String>,
    pub solved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBlind75Question {
    pub question_name: String,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub link: Option<String>,
    pub solved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blind75Changes {
    pub question_name: Option<String>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub topic: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub difficulty: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub link: Option<Option<String>>,
    pub solved: Option<bool>,
}

pub struct Blind75Repo<'a> {
    pool: &'a PgPool,
}

impl<'a> Blind75Repo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Questions in the order they were added.
    pub async fn list(&self) -> Result<Vec<Blind75Question>, DbError> {
        let questions = sqlx::query_as(
            r#"
            SELECT id, question_name, topic, difficulty, link, solved, created_at
            FROM blind75
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn create(&self, question: NewBlind75Question) -> Result<Blind75Question, DbError> {
        let question = sqlx::query_as(
            r#"
            INSERT INTO blind75 (question_name, topic, difficulty, link, solved)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, question_name, topic, difficulty, link, solved, created_at
            "#,
        )
        .bind(question.question_name)
        .bind(question.topic)
        .bind(question.difficulty)
        .bind(question.link)
        .bind(question.solved)
        .fetch_one(self.pool)
        .await?;

        Ok(question)
    }

    pub async fn update(&self, id: Uuid, changes: Blind75Changes) -> Result<Blind75Question, DbError> {
        ChangeSet::new("blind75")
            .set("question_name", changes.question_name)
            .set_nullable("topic", changes.topic)
            .set_nullable("difficulty", changes.difficulty)
            .set_nullable("link", changes.link)
            .set("solved", changes.solved)
            .apply(self.pool, "blind75 question", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "blind75", "blind75 question", id).await
    }
}
