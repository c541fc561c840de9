//! Course progress repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

/// Content units assumed for a course when none are given
pub const DEFAULT_TOTAL_CONTENT: i32 = 100;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: Uuid,
    pub profile: String,
    pub course_name: String,
    pub platform: String,
    pub total_content: i32,
    pub completed_content: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub profile: String,
    pub course_name: String,
    pub platform: String,
    pub total_content: i32,
    pub completed_content: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseChanges {
    pub course_name: Option<String>,
    pub platform: Option<String>,
    pub total_content: Option<i32>,
    pub completed_content: Option<i32>,
}

pub struct CourseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CourseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, profile: &str) -> Result<Vec<Course>, DbError> {
        let courses = sqlx::query_as(
            r#"
            SELECT id, profile, course_name, platform, total_content, completed_content, created_at
            FROM courses
            WHERE profile = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(courses)
    }

    pub async fn create(&self, course: NewCourse) -> Result<Course, DbError> {
        let course = sqlx::query_as(
            r#"
            INSERT INTO courses (profile, course_name, platform, total_content, completed_content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, profile, course_name, platform, total_content, completed_content, created_at
            "#,
        )
        .bind(course.profile)
        .bind(course.course_name)
        .bind(course.platform)
        .bind(course.total_content)
        .bind(course.completed_content)
        .fetch_one(self.pool)
        .await?;

        Ok(course)
    }

    pub async fn update(&self, id: Uuid, changes: CourseChanges) -> Result<Course, DbError> {
        ChangeSet::new("courses")
            .set("course_name", changes.course_name)
            .set("platform", changes.platform)
            .set("total_content", changes.total_content)
            .set("completed_content", changes.completed_content)
            .apply(self.pool, "course", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "courses", "course", id).await
    }
}
