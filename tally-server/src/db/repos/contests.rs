//! Competitive programming: current ratings and contest history

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;
use crate::models::DateRange;

/// Current rating on one platform
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CpRating {
    pub id: Uuid,
    pub platform: String,
    pub rating: i32,
    pub max_rating: Option<i32>,
    pub handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rating write keyed on platform
#[derive(Debug, Clone)]
pub struct RatingUpsert {
    pub platform: String,
    pub rating: i32,
    pub max_rating: Option<i32>,
    pub handle: Option<String>,
}

/// Contest participation record
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContestLog {
    pub id: Uuid,
    pub platform: String,
    pub contest_name: String,
    pub date: NaiveDate,
    pub rank: Option<i32>,
    pub rating_change: Option<i32>,
    pub problems_solved: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContestLog {
    pub platform: String,
    pub contest_name: String,
    pub date: NaiveDate,
    pub rank: Option<i32>,
    pub rating_change: Option<i32>,
    pub problems_solved: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContestLogChanges {
    pub platform: Option<String>,
    pub contest_name: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub rank: Option<Option<i32>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub rating_change: Option<Option<i32>>,
    pub problems_solved: Option<i32>,
}

/// Rating repository
pub struct CpRatingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CpRatingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<CpRating>, DbError> {
        let ratings = sqlx::query_as(
            r#"
            SELECT id, platform, rating, max_rating, handle, created_at, updated_at
            FROM cp_ratings
            ORDER BY platform ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ratings)
    }

    pub async fn get(&self, platform: &str) -> Result<Option<CpRating>, DbError> {
        let rating = sqlx::query_as(
            r#"
            SELECT id, platform, rating, max_rating, handle, created_at, updated_at
            FROM cp_ratings
            WHERE platform = $1
            "#,
        )
        .bind(platform)
        .fetch_optional(self.pool)
        .await?;

        Ok(rating)
    }

    /// Insert or update the rating for a platform in one statement.
    ///
    /// Omitted `max_rating`/`handle` keep their stored values; `updated_at`
    /// is stamped on every write.
    pub async fn upsert(&self, rating: RatingUpsert) -> Result<CpRating, DbError> {
        let rating = sqlx::query_as(
            r#"
            INSERT INTO cp_ratings (platform, rating, max_rating, handle)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (platform) DO UPDATE
            SET rating = EXCLUDED.rating,
                max_rating = COALESCE(EXCLUDED.max_rating, cp_ratings.max_rating),
                handle = COALESCE(EXCLUDED.handle, cp_ratings.handle),
                updated_at = NOW()
            RETURNING id, platform, rating, max_rating, handle, created_at, updated_at
            "#,
        )
        .bind(rating.platform)
        .bind(rating.rating)
        .bind(rating.max_rating)
        .bind(rating.handle)
        .fetch_one(self.pool)
        .await?;

        Ok(rating)
    }

    pub async fn delete(&self, platform: &str) -> Result<Deleted, DbError> {
        sqlx::query_as("DELETE FROM cp_ratings WHERE platform = $1 RETURNING id")
            .bind(platform)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "cp rating",
                id: platform.to_owned(),
            })
    }
}

/// Contest log repository
pub struct ContestLogRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ContestLogRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Contests most recent first, optionally for one platform.
    pub async fn list(
        &self,
        platform: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<ContestLog>, DbError> {
        let logs = sqlx::query_as(
            r#"
            SELECT id, platform, contest_name, date, rank, rating_change, problems_solved, created_at
            FROM contest_logs
            WHERE ($1::text IS NULL OR platform = $1)
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(platform)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn create(&self, log: NewContestLog) -> Result<ContestLog, DbError> {
        let log = sqlx::query_as(
            r#"
            INSERT INTO contest_logs
                (platform, contest_name, date, rank, rating_change, problems_solved)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, platform, contest_name, date, rank, rating_change, problems_solved, created_at
            "#,
        )
        .bind(log.platform)
        .bind(log.contest_name)
        .bind(log.date)
        .bind(log.rank)
        .bind(log.rating_change)
        .bind(log.problems_solved)
        .fetch_one(self.pool)
        .await?;

        Ok(log)
    }

    pub async fn update(&self, id: Uuid, changes: ContestLogChanges) -> Result<ContestLog, DbError> {
        ChangeSet::new("contest_logs")
            .set("platform", changes.platform)
            .set("contest_name", changes.contest_name)
            .set("date", changes.date)
            .set_nullable("rank", changes.rank)
            .set_nullable("rating_change", changes.rating_change)
            .set("problems_solved", changes.problems_solved)
            .apply(self.pool, "contest log", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "contest_logs", "contest log", id).await
    }
}
