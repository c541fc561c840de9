//! Project endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::projects::DEFAULT_STATUS;
use crate::db::repos::{Deleted, NewProject, Project, ProjectChanges, ProjectRepo};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ListParams, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub profile: Option<String>,
    pub project_name: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub status: Option<String>,
}

impl CreateProjectRequest {
    fn validate(self) -> Result<NewProject, ValidationError> {
        Ok(NewProject {
            profile: required_text(self.profile, "profile")?,
            project_name: required_text(self.project_name, "project_name")?,
            description: self.description,
            tech_stack: self.tech_stack.unwrap_or_default(),
            repo_url: self.repo_url,
            live_url: self.live_url,
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<Project>> {
    let profile = params.require_profile()?;
    let projects = ProjectRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(projects))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateProjectRequest>,
) -> ApiResult<Project> {
    let project = ProjectRepo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %project.id, project = %project.project_name, "project created");
    Ok(Envelope::ok(project))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<ProjectChanges>,
) -> ApiResult<Project> {
    let project = ProjectRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(project))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = ProjectRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

/// Project routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", put(update_project).delete(delete_project))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let req: CreateProjectRequest =
            serde_json::from_str(r#"{"profile": "a", "project_name": "tally"}"#).unwrap();
        let project = req.validate().unwrap();
        assert!(project.tech_stack.is_empty());
        assert_eq!(project.status, "in_progress");
    }

    #[test]
    fn tech_stack_kept_in_order() {
        let req: CreateProjectRequest = serde_json::from_str(
            r#"{"profile": "a", "project_name": "tally", "tech_stack": ["rust", "postgres"], "status": "done"}"#,
        )
        .unwrap();
        let project = req.validate().unwrap();
        assert_eq!(project.tech_stack, vec!["rust", "postgres"]);
        assert_eq!(project.status, "done");
    }
}
