//! Guesstimate practice log

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Guesstimate {
    pub id: Uuid,
    pub topic: String,
    pub answer: Option<String>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGuesstimate {
    pub topic: String,
    pub answer: Option<String>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuesstimateChanges {
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub answer: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub date: Option<Option<NaiveDate>>,
}

pub struct GuesstimateRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> GuesstimateRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Guesstimate>, DbError> {
        let guesstimates = sqlx::query_as(
            r#"
            SELECT id, topic, answer, notes, date, created_at
            FROM guesstimates
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(guesstimates)
    }

    pub async fn create(&self, guesstimate: NewGuesstimate) -> Result<Guesstimate, DbError> {
        let guesstimate = sqlx::query_as(
            r#"
            INSERT INTO guesstimates (topic, answer, notes, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, topic, answer, notes, date, created_at
            "#,
        )
        .bind(guesstimate.topic)
        .bind(guesstimate.answer)
        .bind(guesstimate.notes)
        .bind(guesstimate.date)
        .fetch_one(self.pool)
        .await?;

        Ok(guesstimate)
    }

    pub async fn update(&self, id: Uuid, changes: GuesstimateChanges) -> Result<Guesstimate, DbError> {
        ChangeSet::new("guesstimates")
            .set("topic", changes.topic)
            .set_nullable("answer", changes.answer)
            .set_nullable("notes", changes.notes)
            .set_nullable("date", changes.date)
            .apply(self.pool, "guesstimate", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "guesstimates", "guesstimate", id).await
    }
}
