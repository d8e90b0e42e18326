use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A task owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// The due time a reminder should be scheduled for, if any.
    ///
    /// A task is eligible when it has a due time and is not done. Past due
    /// times still count: they fire immediately rather than being skipped.
    pub fn reminder_due(&self) -> Option<DateTime<Utc>> {
        if self.done { None } else { self.due_at }
    }
}

/// A reminder emitted when a task's due time arrives.
///
/// This is the stable event shape consumed by reminder sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub task_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub due_at: DateTime<Utc>,
    pub fired_at: DateTime<Utc>,
}
