//! Habit and habit entry endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{
    Deleted, Habit, HabitChanges, HabitEntry, HabitEntryChanges, HabitEntryRepo, HabitRepo,
    NewHabit, NewHabitEntry,
};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required, required_text, ListParams, ValidationError};

/// Create habit request
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub profile: Option<String>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

impl CreateHabitRequest {
    fn validate(self) -> Result<NewHabit, ValidationError> {
        Ok(NewHabit {
            profile: required_text(self.profile, "profile")?,
            name: required_text(self.name, "name")?,
            sort_order: self.sort_order.unwrap_or(0),
        })
    }
}

/// Create habit entry request
#[derive(Debug, Deserialize)]
pub struct CreateHabitEntryRequest {
    pub habit_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

impl CreateHabitEntryRequest {
    fn validate(self) -> Result<NewHabitEntry, ValidationError> {
        Ok(NewHabitEntry {
            habit_id: required(self.habit_id, "habit_id")?,
            date: required(self.date, "date")?,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// GET /habits?profile=
async fn list_habits(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<Habit>> {
    let profile = params.require_profile()?;
    let habits = HabitRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(habits))
}

/// POST /habits
async fn create_habit(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateHabitRequest>,
) -> ApiResult<Habit> {
    let habit = HabitRepo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %habit.id, name = %habit.name, "habit created");
    Ok(Envelope::ok(habit))
}

/// PUT /habits/{id}
async fn update_habit(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<HabitChanges>,
) -> ApiResult<Habit> {
    let habit = HabitRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(habit))
}

/// DELETE /habits/{id} - removes the habit and all of its entries
async fn delete_habit(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let (deleted, entries) = HabitRepo::new(&state.pool).delete(id).await?;
    tracing::info!(id = %id, entries, "habit deleted");
    Ok(Envelope::ok(deleted))
}

/// GET /habit-entries?habit_id=&from=&to=
async fn list_entries(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<HabitEntry>> {
    let range = params.range()?;
    let entries = HabitEntryRepo::new(&state.pool)
        .list(params.habit_id, range)
        .await?;
    Ok(Envelope::ok(entries))
}

/// POST /habit-entries
async fn create_entry(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateHabitEntryRequest>,
) -> ApiResult<HabitEntry> {
    let entry = HabitEntryRepo::new(&state.pool)
        .create(req.validate()?)
        .await?;
    tracing::debug!(id = %entry.id, habit_id = %entry.habit_id, date = %entry.date, "habit entry created");
    Ok(Envelope::ok(entry))
}

/// PUT /habit-entries/{id}
async fn update_entry(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<HabitEntryChanges>,
) -> ApiResult<HabitEntry> {
    let entry = HabitEntryRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(entry))
}

/// DELETE /habit-entries/{id}
async fn delete_entry(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = HabitEntryRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

/// Habit routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/habits", get(list_habits).post(create_habit))
        .route("/habits/{id}", put(update_habit).delete(delete_habit))
        .route("/habit-entries", get(list_entries).post(create_entry))
        .route("/habit-entries/{id}", put(update_entry).delete(delete_entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_sort_order_defaults_to_zero() {
        let req: CreateHabitRequest =
            serde_json::from_str(r#"{"profile": "a", "name": "Read"}"#).unwrap();
        let habit = req.validate().unwrap();
        assert_eq!(habit.sort_order, 0);
    }

    #[test]
    fn entry_requires_habit_and_date() {
        let req: CreateHabitEntryRequest =
            serde_json::from_str(r#"{"date": "2024-03-01"}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing { field: "habit_id" }
        );

        let req: CreateHabitEntryRequest = serde_json::from_str(
            r#"{"habit_id": "6f1c1f0e-9d51-4a8e-9c6b-0b1f5a1d2c3e"}"#,
        )
        .unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing { field: "date" }
        );
    }

    #[test]
    fn entry_completed_defaults_to_false() {
        let req: CreateHabitEntryRequest = serde_json::from_str(
            r#"{"habit_id": "6f1c1f0e-9d51-4a8e-9c6b-0b1f5a1d2c3e", "date": "2024-03-01"}"#,
        )
        .unwrap();
        let entry = req.validate().unwrap();
        assert!(!entry.completed);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
