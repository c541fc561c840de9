//! Skill repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: Uuid,
    pub profile: String,
    pub skill_name: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSkill {
    pub profile: String,
    pub skill_name: String,
    pub category: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillChanges {
    pub skill_name: Option<String>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub level: Option<Option<String>>,
}

pub struct SkillRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SkillRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Skills for a profile, alphabetical.
    pub async fn list(&self, profile: &str) -> Result<Vec<Skill>, DbError> {
        let skills = sqlx::query_as(
            r#"
            SELECT id, profile, skill_name, category, level, created_at
            FROM skills
            WHERE profile = $1
            ORDER BY skill_name ASC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(skills)
    }

    pub async fn create(&self, skill: NewSkill) -> Result<Skill, DbError> {
        let skill = sqlx::query_as(
            r#"
            INSERT INTO skills (profile, skill_name, category, level)
            VALUES ($1, $2, $3, $4)
            RETURNING id, profile, skill_name, category, level, created_at
            "#,
        )
        .bind(skill.profile)
        .bind(skill.skill_name)
        .bind(skill.category)
        .bind(skill.level)
        .fetch_one(self.pool)
        .await?;

        Ok(skill)
    }

    pub async fn update(&self, id: Uuid, changes: SkillChanges) -> Result<Skill, DbError> {
        ChangeSet::new("skills")
            .set("skill_name", changes.skill_name)
            .set_nullable("category", changes.category)
            .set_nullable("level", changes.level)
            .apply(self.pool, "skill", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "skills", "skill", id).await
    }
}
