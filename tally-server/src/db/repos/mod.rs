//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, `RETURNING` the affected row
//! - Natural-key writes use ON CONFLICT (no check-then-insert)
//! - Multi-step deletes run inside a transaction

pub mod a2z;
pub mod blind75;
pub mod case_competitions;
pub mod case_studies;
pub mod certificates;
pub mod contests;
pub mod courses;
pub mod daily_logs;
pub mod guesstimates;
pub mod habits;
pub mod projects;
pub mod resume;
pub mod skills;
pub mod todos;

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub use a2z::{A2zChanges, A2zProgress, A2zRepo};
pub use blind75::{Blind75Changes, Blind75Question, Blind75Repo, NewBlind75Question};
pub use case_competitions::{
    CaseCompetition, CaseCompetitionChanges, CaseCompetitionRepo, NewCaseCompetition,
};
pub use case_studies::{CaseStudy, CaseStudyChanges, CaseStudyRepo, NewCaseStudy};
pub use certificates::{Certificate, CertificateChanges, CertificateRepo, NewCertificate};
pub use contests::{
    ContestLog, ContestLogChanges, ContestLogRepo, CpRating, CpRatingRepo, NewContestLog,
    RatingUpsert,
};
pub use courses::{Course, CourseChanges, CourseRepo, NewCourse};
pub use daily_logs::{
    ConsultantLog, ConsultantLogEntry, ConsultantLogRepo, EngineerLog, EngineerLogEntry,
    EngineerLogRepo,
};
pub use guesstimates::{Guesstimate, GuesstimateChanges, GuesstimateRepo, NewGuesstimate};
pub use habits::{
    Habit, HabitChanges, HabitEntry, HabitEntryChanges, HabitEntryRepo, HabitRepo, NewHabit,
    NewHabitEntry,
};
pub use projects::{NewProject, Project, ProjectChanges, ProjectRepo};
pub use resume::{ResumeSection, ResumeSectionChanges, ResumeSectionRepo};
pub use skills::{NewSkill, Skill, SkillChanges, SkillRepo};
pub use todos::{NewTodo, Todo, TodoChanges, TodoRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("no fields supplied to update {resource}")]
    NoChanges { resource: &'static str },
}

/// Identifier of a deleted row
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Deleted {
    pub id: Uuid,
}

/// Delete one row by primary key.
///
/// `table` is always a compile-time constant owned by the calling repository.
pub(crate) async fn delete_by_id(
    pool: &PgPool,
    table: &'static str,
    resource: &'static str,
    id: Uuid,
) -> Result<Deleted, DbError> {
    let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id", table);

    sqlx::query_as::<_, Deleted>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource,
            id: id.to_string(),
        })
}
