//! Route handlers organized by resource

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
pub mod health;
pub mod projects;
pub mod resume;
pub mod skills;
pub mod todos;
pub mod uploads;
