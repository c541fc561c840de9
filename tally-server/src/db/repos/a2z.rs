//! A2Z sheet progress - a single row of per-difficulty counters
//!
//! The row is pinned to `id = 1` by a CHECK constraint, so the upsert can
//! conflict on the primary key instead of reading first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::DbError;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct A2zProgress {
    pub id: i16,
    pub easy_total: i32,
    pub easy_solved: i32,
    pub medium_total: i32,
    pub medium_solved: i32,
    pub hard_total: i32,
    pub hard_solved: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counters to overwrite; omitted counters keep their value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct A2zChanges {
    pub easy_total: Option<i32>,
    pub easy_solved: Option<i32>,
    pub medium_total: Option<i32>,
    pub medium_solved: Option<i32>,
    pub hard_total: Option<i32>,
    pub hard_solved: Option<i32>,
}

impl A2zChanges {
    pub fn is_empty(&self) -> bool {
        self.easy_total.is_none()
            && self.easy_solved.is_none()
            && self.medium_total.is_none()
            && self.medium_solved.is_none()
            && self.hard_total.is_none()
            && self.hard_solved.is_none()
    }
}

pub struct A2zRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> A2zRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The progress row, if it has ever been saved.
    pub async fn get(&self) -> Result<Option<A2zProgress>, DbError> {
        let progress = sqlx::query_as(
            r#"
            SELECT id, easy_total, easy_solved, medium_total, medium_solved,
                   hard_total, hard_solved, created_at, updated_at
            FROM a2z_progress
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(progress)
    }

    /// Create the row or overwrite the supplied counters.
    pub async fn save(&self, changes: A2zChanges) -> Result<A2zProgress, DbError> {
        if changes.is_empty() {
            return Err(DbError::NoChanges {
                resource: "a2z progress",
            });
        }

        let progress = sqlx::query_as(
            r#"
            INSERT INTO a2z_progress
                (id, easy_total, easy_solved, medium_total, medium_solved, hard_total, hard_solved)
            VALUES (1, COALESCE($1, 0), COALESCE($2, 0), COALESCE($3, 0),
                    COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0))
            ON CONFLICT (id) DO UPDATE
            SET easy_total = COALESCE($1, a2z_progress.easy_total),
                easy_solved = COALESCE($2, a2z_progress.easy_solved),
                medium_total = COALESCE($3, a2z_progress.medium_total),
                medium_solved = COALESCE($4, a2z_progress.medium_solved),
                hard_total = COALESCE($5, a2z_progress.hard_total),
                hard_solved = COALESCE($6, a2z_progress.hard_solved),
                updated_at = NOW()
            RETURNING id, easy_total, easy_solved, medium_total, medium_solved,
                      hard_total, hard_solved, created_at, updated_at
            "#,
        )
        .bind(changes.easy_total)
        .bind(changes.easy_solved)
        .bind(changes.medium_total)
        .bind(changes.medium_solved)
        .bind(changes.hard_total)
        .bind(changes.hard_solved)
        .fetch_one(self.pool)
        .await?;

        Ok(progress)
    }
}
