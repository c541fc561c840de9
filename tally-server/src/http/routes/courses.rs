//! Course endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::courses::DEFAULT_TOTAL_CONTENT;
use crate::db::repos::{Course, CourseChanges, CourseRepo, Deleted, NewCourse};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ListParams, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub profile: Option<String>,
    pub course_name: Option<String>,
    pub platform: Option<String>,
    pub total_content: Option<i32>,
    pub completed_content: Option<i32>,
}

impl CreateCourseRequest {
    fn validate(self) -> Result<NewCourse, ValidationError> {
        Ok(NewCourse {
            profile: required_text(self.profile, "profile")?,
            course_name: required_text(self.course_name, "course_name")?,
            platform: required_text(self.platform, "platform")?,
            total_content: self.total_content.unwrap_or(DEFAULT_TOTAL_CONTENT),
            completed_content: self.completed_content.unwrap_or(0),
        })
    }
}

async fn list_courses(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<Course>> {
    let profile = params.require_profile()?;
    let courses = CourseRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(courses))
}

async fn create_course(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCourseRequest>,
) -> ApiResult<Course> {
    let course = CourseRepo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %course.id, course = %course.course_name, "course created");
    Ok(Envelope::ok(course))
}

async fn update_course(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<CourseChanges>,
) -> ApiResult<Course> {
    let course = CourseRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(course))
}

async fn delete_course(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = CourseRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", put(update_course).delete(delete_course))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_content_defaults_to_hundred() {
        let req: CreateCourseRequest = serde_json::from_str(
            r#"{"profile": "a", "course_name": "Rust", "platform": "Udemy"}"#,
        )
        .unwrap();
        let course = req.validate().unwrap();
        assert_eq!(course.total_content, 100);
        assert_eq!(course.completed_content, 0);
    }

    #[test]
    fn platform_required() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"profile": "a", "course_name": "Rust"}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing { field: "platform" }
        );
    }
}
