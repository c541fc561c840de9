//! Per-person daily log repositories
//!
//! Two independent tables, one row per date each. Saving a log is a single
//! `INSERT .. ON CONFLICT (date) DO UPDATE`: supplied counters overwrite,
//! omitted counters keep their stored value (0 on first insert). Notes follow
//! the same rule, with an explicit `Some(None)` clearing them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{DbError, Deleted};
use crate::models::DateRange;

/// Engineering-track daily log
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EngineerLog {
    pub id: uuid::Uuid,
    pub date: NaiveDate,
    pub dsa_solved: i32,
    pub cp_solved: i32,
    pub dev_minutes: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values to save for one engineering log date
#[derive(Debug, Clone)]
pub struct EngineerLogEntry {
    pub date: NaiveDate,
    pub dsa_solved: Option<i32>,
    pub cp_solved: Option<i32>,
    pub dev_minutes: Option<i32>,
    pub notes: Option<Option<String>>,
}

/// Consulting-track daily log
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsultantLog {
    pub id: uuid::Uuid,
    pub date: NaiveDate,
    pub cases_solved: i32,
    pub guesstimates_solved: i32,
    pub reading_minutes: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values to save for one consulting log date
#[derive(Debug, Clone)]
pub struct ConsultantLogEntry {
    pub date: NaiveDate,
    pub cases_solved: Option<i32>,
    pub guesstimates_solved: Option<i32>,
    pub reading_minutes: Option<i32>,
    pub notes: Option<Option<String>>,
}

/// Engineering log repository
pub struct EngineerLogRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EngineerLogRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Logs in a date range, most recent first.
    pub async fn list(&self, range: DateRange) -> Result<Vec<EngineerLog>, DbError> {
        let logs = sqlx::query_as(
            r#"
            SELECT id, date, dsa_solved, cp_solved, dev_minutes, notes, created_at
            FROM engineer_daily_logs
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
            ORDER BY date DESC
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(self.pool)
        .await?;

        Ok(logs)
    }

    /// The log for `date`, if one was saved.
    pub async fn get(&self, date: NaiveDate) -> Result<Option<EngineerLog>, DbError> {
        let log = sqlx::query_as(
            r#"
            SELECT id, date, dsa_solved, cp_solved, dev_minutes, notes, created_at
            FROM engineer_daily_logs
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(self.pool)
        .await?;

        Ok(log)
    }

    pub async fn save(&self, entry: EngineerLogEntry) -> Result<EngineerLog, DbError> {
        let notes_supplied = entry.notes.is_some();
        let log = sqlx::query_as(
            r#"
            INSERT INTO engineer_daily_logs (date, dsa_solved, cp_solved, dev_minutes, notes)
            VALUES ($1, COALESCE($2, 0), COALESCE($3, 0), COALESCE($4, 0), $5)
            ON CONFLICT (date) DO UPDATE
            SET dsa_solved = COALESCE($2, engineer_daily_logs.dsa_solved),
                cp_solved = COALESCE($3, engineer_daily_logs.cp_solved),
                dev_minutes = COALESCE($4, engineer_daily_logs.dev_minutes),
                notes = CASE WHEN $6 THEN $5 ELSE engineer_daily_logs.notes END
            RETURNING id, date, dsa_solved, cp_solved, dev_minutes, notes, created_at
            "#,
        )
        .bind(entry.date)
        .bind(entry.dsa_solved)
        .bind(entry.cp_solved)
        .bind(entry.dev_minutes)
        .bind(entry.notes.flatten())
        .bind(notes_supplied)
        .fetch_one(self.pool)
        .await?;

        Ok(log)
    }

    pub async fn delete(&self, date: NaiveDate) -> Result<Deleted, DbError> {
        sqlx::query_as("DELETE FROM engineer_daily_logs WHERE date = $1 RETURNING id")
            .bind(date)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "engineer daily log",
                id: date.to_string(),
            })
    }
}

/// Consulting log repository
pub struct ConsultantLogRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ConsultantLogRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, range: DateRange) -> Result<Vec<ConsultantLog>, DbError> {
        let logs = sqlx::query_as(
            r#"
            SELECT id, date, cases_solved, guesstimates_solved, reading_minutes, notes, created_at
            FROM consultant_daily_logs
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
            ORDER BY date DESC
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn get(&self, date: NaiveDate) -> Result<Option<ConsultantLog>, DbError> {
        let log = sqlx::query_as(
            r#"
            SELECT id, date, cases_solved, guesstimates_solved, reading_minutes, notes, created_at
            FROM consultant_daily_logs
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(self.pool)
        .await?;

        Ok(log)
    }

    pub async fn save(&self, entry: ConsultantLogEntry) -> Result<ConsultantLog, DbError> {
        let notes_supplied = entry.notes.is_some();
        let log = sqlx::query_as(
            r#"
            INSERT INTO consultant_daily_logs
                (date, cases_solved, guesstimates_solved, reading_minutes, notes)
            VALUES ($1, COALESCE($2, 0), COALESCE($3, 0), COALESCE($4, 0), $5)
            ON CONFLICT (date) DO UPDATE
            SET cases_solved = COALESCE($2, consultant_daily_logs.cases_solved),
                guesstimates_solved = COALESCE($3, consultant_daily_logs.guesstimates_solved),
                reading_minutes = COALESCE($4, consultant_daily_logs.reading_minutes),
                notes = CASE WHEN $6 THEN $5 ELSE consultant_daily_logs.notes END
            RETURNING id, date, cases_solved, guesstimates_solved, reading_minutes, notes, created_at
            "#,
        )
        .bind(entry.date)
        .bind(entry.cases_solved)
        .bind(entry.guesstimates_solved)
        .bind(entry.reading_minutes)
        .bind(entry.notes.flatten())
        .bind(notes_supplied)
        .fetch_one(self.pool)
        .await?;

        Ok(log)
    }

    pub async fn delete(&self, date: NaiveDate) -> Result<Deleted, DbError> {
        sqlx::query_as("DELETE FROM consultant_daily_logs WHERE date = $1 RETURNING id")
            .bind(date)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "consultant daily log",
                id: date.to_string(),
            })
    }
}
