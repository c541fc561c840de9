//! Case study practice log

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;
use crate::models::DateRange;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseStudy {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCaseStudy {
    pub title: String,
    pub date: NaiveDate,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseStudyChanges {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub notes: Option<Option<String>>,
    pub completed: Option<bool>,
}

pub struct CaseStudyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CaseStudyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, range: DateRange) -> Result<Vec<CaseStudy>, DbError> {
        let studies = sqlx::query_as(
            r#"
            SELECT id, title, date, source, notes, completed, created_at
            FROM case_studies
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(self.pool)
        .await?;

        Ok(studies)
    }

    pub async fn create(&self, study: NewCaseStudy) -> Result<CaseStudy, DbError> {
        let study = sqlx::query_as(
            r#"
            INSERT INTO case_studies (title, date, source, notes, completed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, date, source, notes, completed, created_at
            "#,
        )
        .bind(study.title)
        .bind(study.date)
        .bind(study.source)
        .bind(study.notes)
        .bind(study.completed)
        .fetch_one(self.pool)
        .await?;

        Ok(study)
    }

    pub async fn update(&self, id: Uuid, changes: CaseStudyChanges) -> Result<CaseStudy, DbError> {
        ChangeSet::new("case_studies")
            .set("title", changes.title)
            .set("date", changes.date)
            .set_nullable("source", changes.source)
            .set_nullable("notes", changes.notes)
            .set("completed", changes.completed)
            .apply(self.pool, "case study", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "case_studies", "case study", id).await
    }
}
