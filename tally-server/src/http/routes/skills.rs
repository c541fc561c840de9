//! Skill endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{Deleted, NewSkill, Skill, SkillChanges, SkillRepo};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ListParams, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub profile: Option<String>,
    pub skill_name: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
}

impl CreateSkillRequest {
    fn validate(self) -> Result<NewSkill, ValidationError> {
        Ok(NewSkill {
            profile: required_text(self.profile, "profile")?,
            skill_name: required_text(self.skill_name, "skill_name")?,
            category: self.category,
            level: self.level,
        })
    }
}

async fn list_skills(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<Skill>> {
    let profile = params.require_profile()?;
    let skills = SkillRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(skills))
}

async fn create_skill(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateSkillRequest>,
) -> ApiResult<Skill> {
    let skill = SkillRepo::new(&state.pool).create(req.validate()?).await?;
    tracing::info!(id = %skill.id, skill = %skill.skill_name, "skill added");
    Ok(Envelope::ok(skill))
}

async fn update_skill(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<SkillChanges>,
) -> ApiResult<Skill> {
    let skill = SkillRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(skill))
}

async fn delete_skill(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = SkillRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/skills", get(list_skills).post(create_skill))
        .route("/skills/{id}", put(update_skill).delete(delete_skill))
}
