//! Case competition repository

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseCompetition {
    pub id: Uuid,
    pub competition_name: String,
    pub organizer: Option<String>,
    pub stage: Option<String>,
    pub result: Option<String>,
    pub date: Option<NaiveDate>,
    /// Public URL of the submission deck, if uploaded
    pub doc_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCaseCompetition {
    pub competition_name: String,
    pub organizer: Option<String>,
    pub stage: Option<String>,
    pub result: Option<String>,
    pub date: Option<NaiveDate>,
    pub doc_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseCompetitionChanges {
    pub competition_name: Option<String>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub organizer: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub stage: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub result: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub doc_url: Option<Option<String>>,
}

pub struct CaseCompetitionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CaseCompetitionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<CaseCompetition>, DbError> {
        let competitions = sqlx::query_as(
            r#"
            SELECT id, competition_name, organizer, stage, result, date, doc_url, created_at
            FROM case_competitions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    pub async fn create(&self, competition: NewCaseCompetition) -> Result<CaseCompetition, DbError> {
        let competition = sqlx::query_as(
            r#"
            INSERT INTO case_competitions
                (competition_name, organizer, stage, result, date, doc_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, competition_name, organizer, stage, result, date, doc_url, created_at
            "#,
        )
        .bind(competition.competition_name)
        .bind(competition.organizer)
        .bind(competition.stage)
        .bind(competition.result)
        .bind(competition.date)
        .bind(competition.doc_url)
        .fetch_one(self.pool)
        .await?;

        Ok(competition)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: CaseCompetitionChanges,
    ) -> Result<CaseCompetition, DbError> {
        ChangeSet::new("case_competitions")
            .set("competition_name", changes.competition_name)
            .set_nullable("organizer", changes.organizer)
            .set_nullable("stage", changes.stage)
            .set_nullable("result", changes.result)
            .set_nullable("date", changes.date)
            .set_nullable("doc_url", changes.doc_url)
            .apply(self.pool, "case competition", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "case_competitions", "case competition", id).await
    }
}
