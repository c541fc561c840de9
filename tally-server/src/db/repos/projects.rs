//! Portfolio project repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

/// Status given to projects created without one
pub const DEFAULT_STATUS: &str = "in_progress";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub profile: String,
    pub project_name: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub profile: String,
    pub project_name: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectChanges {
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub description: Option<Option<String>>,
    pub tech_stack: Option<Vec<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub repo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub live_url: Option<Option<String>>,
    pub status: Option<String>,
}

pub struct ProjectRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, profile: &str) -> Result<Vec<Project>, DbError> {
        let projects = sqlx::query_as(
            r#"
            SELECT id, profile, project_name, description, tech_stack, repo_url, live_url,
                   status, created_at
            FROM projects
            WHERE profile = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn create(&self, project: NewProject) -> Result<Project, DbError> {
        let project = sqlx::query_as(
            r#"
            INSERT INTO projects
                (profile, project_name, description, tech_stack, repo_url, live_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, profile, project_name, description, tech_stack, repo_url, live_url,
                      status, created_at
            "#,
        )
        .bind(project.profile)
        .bind(project.project_name)
        .bind(project.description)
        .bind(project.tech_stack)
        .bind(project.repo_url)
        .bind(project.live_url)
        .bind(project.status)
        .fetch_one(self.pool)
        .await?;

        Ok(project)
    }

    pub async fn update(&self, id: Uuid, changes: ProjectChanges) -> Result<Project, DbError> {
        ChangeSet::new("projects")
            .set("project_name", changes.project_name)
            .set_nullable("description", changes.description)
            .set("tech_stack", changes.tech_stack)
            .set_nullable("repo_url", changes.repo_url)
            .set_nullable("live_url", changes.live_url)
            .set("status", changes.status)
            .apply(self.pool, "project", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "projects", "project", id).await
    }
}
