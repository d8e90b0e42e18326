//! Timer-backed reminder delivery.
//!
//! A `DeferredReminder` carries the task fields captured when the reminder
//! was scheduled. Once armed it sleeps for its delay and emits exactly once.
//! It does not look at the task again before firing, so a task completed or
//! deleted while the timer is pending still produces its reminder.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use taskflow_common::types::{Reminder, Task};

use crate::sink::ReminderSink;

/// A reminder waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredReminder {
    pub task_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub due_at: DateTime<Utc>,
    pub delay: Duration,
}

impl DeferredReminder {
    /// Capture a task snapshot for a reminder firing after `delay`.
    pub fn from_task(task: &Task, due_at: DateTime<Utc>, delay: Duration) -> Self {
        Self {
            task_id: task.id,
            owner_id: task.user_id,
            title: task.title.clone(),
            due_at,
            delay,
        }
    }

    /// Spawn the timer. The returned handle may be dropped; the reminder still fires.
    pub fn arm(self, sink: Arc<dyn ReminderSink>) -> JoinHandle<()> {
        tracing::debug!(
            task_id = %self.task_id,
            delay_ms = self.delay.as_millis() as u64,
            "Reminder armed"
        );

        tokio::spawn(async move {
            tokio::time::sleep(self.delay).await;
            let reminder = self.into_reminder(Utc::now());
            sink.emit(&reminder);
        })
    }

    fn into_reminder(self, fired_at: DateTime<Utc>) -> Reminder {
        Reminder {
            task_id: self.task_id,
            owner_id: self.owner_id,
            title: self.title,
            due_at: self.due_at,
            fired_at,
        }
    }
}
