use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::catalog::Task;

/// Submission body. `task_id` duplicates the path segment in the original
/// client and is accepted but ignored; the path wins.
#[derive(Debug, Deserialize)]
pub struct TaskSubmission {
    #[serde(default)]
    pub task_id: Option<String>,
    pub code: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub points_earned: i64,
    pub message: String,
}

/// A task joined with the caller's progress for the list view.
#[derive(Debug, Serialize)]
pub struct TaskWithProgress {
    #[serde(flatten)]
    pub task: Task,
    pub completed: bool,
    pub attempts: u32,
}

#[derive(Debug, Serialize)]
pub struct ModuleResponse {
    pub module: &'static str,
    pub track: &'static str,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub tasks: Vec<TaskWithProgress>,
}

/// Single-task detail view, with the last submission time when one exists.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub completed: bool,
    pub attempts: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_submission: Option<OffsetDateTime>,
}
