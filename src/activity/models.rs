//! Activity log models

use crate::catalog::{Category, Task};
use serde::{Deserialize, Serialize};

/// Action tag of an activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    TaskCompleted,
    TaskReopened,
}

/// One entry of the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl ActivityEntry {
    /// Entry stamped with the current time
    pub fn new(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Entry describing a task's completion flag after a toggle
    pub fn task_toggled(task: &Task, category: Category) -> Self {
        let (kind, verb) = if task.completed {
            (ActivityKind::TaskCompleted, "Completed")
        } else {
            (ActivityKind::TaskReopened, "Reopened")
        };
        Self::new(
            kind,
            format!("{} task: {} in {}", verb, task.name, category),
        )
    }
}
