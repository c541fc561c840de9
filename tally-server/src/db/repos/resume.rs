//! Resume sections - listed and edited, never created or deleted over HTTP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::db::ChangeSet;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResumeSection {
    pub id: Uuid,
    pub profile: String,
    pub section_name: String,
    pub content: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResumeSectionChanges {
    pub section_name: Option<String>,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
}

pub struct ResumeSectionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ResumeSectionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, profile: &str) -> Result<Vec<ResumeSection>, DbError> {
        let sections = sqlx::query_as(
            r#"
            SELECT id, profile, section_name, content, sort_order, created_at, updated_at
            FROM resume_sections
            WHERE profile = $1
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(sections)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: ResumeSectionChanges,
    ) -> Result<ResumeSection, DbError> {
        ChangeSet::new("resume_sections")
            .set("section_name", changes.section_name)
            .set("content", changes.content)
            .set("sort_order", changes.sort_order)
            .touch("updated_at")
            .apply(self.pool, "resume section", id)
            .await
    }
}
