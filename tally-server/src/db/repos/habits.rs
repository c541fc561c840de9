//! Habit and habit entry repositories
//!
//! Deleting a habit removes its entries in the same transaction, so a
//! failure part-way leaves both tables untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;
use crate::models::DateRange;

/// Habit record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Habit {
    pub id: Uuid,
    pub profile: String,
    pub name: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHabit {
    pub profile: String,
    pub name: String,
    pub sort_order: i32,
}

/// Updatable habit fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

/// One day's mark against a habit
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HabitEntry {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHabitEntry {
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub completed: bool,
}

/// Updatable habit entry fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HabitEntryChanges {
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

/// Habit repository
pub struct HabitRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> HabitRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Habits for a profile in display order.
    pub async fn list(&self, profile: &str) -> Result<Vec<Habit>, DbError> {
        let habits = sqlx::query_as(
            r#"
            SELECT id, profile, name, sort_order, created_at
            FROM habits
            WHERE profile = $1
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(habits)
    }

    pub async fn create(&self, habit: NewHabit) -> Result<Habit, DbError> {
        let habit = sqlx::query_as(
            r#"
            INSERT INTO habits (profile, name, sort_order)
            VALUES ($1, $2, $3)
            RETURNING id, profile, name, sort_order, created_at
            "#,
        )
        .bind(habit.profile)
        .bind(habit.name)
        .bind(habit.sort_order)
        .fetch_one(self.pool)
        .await?;

        Ok(habit)
    }

    pub async fn update(&self, id: Uuid, changes: HabitChanges) -> Result<Habit, DbError> {
        ChangeSet::new("habits")
            .set("name", changes.name)
            .set("sort_order", changes.sort_order)
            .apply(self.pool, "habit", id)
            .await
    }

    /// Delete a habit and every entry referencing it (atomic).
    ///
    /// Returns the habit id and the number of entries removed.
    pub async fn delete(&self, id: Uuid) -> Result<(Deleted, u64), DbError> {
        let mut tx = self.pool.begin().await?;

        let entries = sqlx::query("DELETE FROM habit_entries WHERE habit_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted: Deleted = sqlx::query_as("DELETE FROM habits WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "habit",
                id: id.to_string(),
            })?;

        tx.commit().await?;

        Ok((deleted, entries))
    }
}

/// Habit entry repository
pub struct HabitEntryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> HabitEntryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Entries in date order, optionally for one habit and a date range.
    pub async fn list(
        &self,
        habit_id: Option<Uuid>,
        range: DateRange,
    ) -> Result<Vec<HabitEntry>, DbError> {
        let entries = sqlx::query_as(
            r#"
            SELECT id, habit_id, date, completed, created_at
            FROM habit_entries
            WHERE ($1::uuid IS NULL OR habit_id = $1)
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(habit_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn create(&self, entry: NewHabitEntry) -> Result<HabitEntry, DbError> {
        let entry = sqlx::query_as(
            r#"
            INSERT INTO habit_entries (habit_id, date, completed)
            VALUES ($1, $2, $3)
            RETURNING id, habit_id, date, completed, created_at
            "#,
        )
        .bind(entry.habit_id)
        .bind(entry.date)
        .bind(entry.completed)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: HabitEntryChanges,
    ) -> Result<HabitEntry, DbError> {
        ChangeSet::new("habit_entries")
            .set("date", changes.date)
            .set("completed", changes.completed)
            .apply(self.pool, "habit entry", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "habit_entries", "habit entry", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_changes_parse_dates() {
        let changes: HabitEntryChanges =
            serde_json::from_str(r#"{"date": "2024-05-01"}"#).unwrap();
        assert_eq!(changes.date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn habit_id_is_not_updatable() {
        let result: Result<HabitEntryChanges, _> =
            serde_json::from_str(r#"{"habit_id": "00000000-0000-0000-0000-000000000000"}"#);
        assert!(result.is_err());
    }
}
