//! Scheduling attempts: one re-evaluation of a task per notification.
//!
//! An attempt re-reads the task, checks that it still has a due time and is
//! not done, and arms a [`DeferredReminder`] for the remaining delay. Missing
//! tasks, ineligible tasks and lookup failures end the attempt quietly.
//!
//! Attempts are independent. Two notifications for the same task arm two
//! timers, and neither cancels the other: moving a due time later leaves the
//! earlier timer in place, so the task can be reminded twice.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use taskflow_notifier::{DeferredReminder, ReminderSink};

use crate::lookup::TaskLookup;

/// How a single scheduling attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The task no longer exists.
    NotFound,
    /// The lookup failed. Treated like `NotFound`; there is no retry.
    LookupFailed,
    /// The task has no due time or is already done.
    NotEligible,
    /// A reminder was armed to fire after `delay`.
    Armed { delay: Duration },
}

/// Time left until `due_at`, clamped to zero for due times already passed.
pub fn reminder_delay(due_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (due_at - now).to_std().unwrap_or(Duration::ZERO)
}

/// Runs scheduling attempts against a task lookup and a reminder sink.
#[derive(Clone)]
pub struct ReminderScheduler {
    lookup: Arc<dyn TaskLookup>,
    sink: Arc<dyn ReminderSink>,
}

impl ReminderScheduler {
    pub fn new(lookup: Arc<dyn TaskLookup>, sink: Arc<dyn ReminderSink>) -> Self {
        Self { lookup, sink }
    }

    /// Evaluate `task_id` once and arm a reminder if it is eligible.
    ///
    /// The armed timer is detached: it fires even if the caller goes away.
    pub async fn attempt(&self, task_id: Uuid) -> AttemptOutcome {
        let task = match self.lookup.fetch_task(task_id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                tracing::debug!(task_id = %task_id, "Task gone before reminder could be scheduled");
                return AttemptOutcome::NotFound;
            }
            Err(e) => {
                tracing::warn!(
                    task_id = %task_id,
                    error = %e,
                    "Task lookup failed, discarding reminder attempt"
                );
                return AttemptOutcome::LookupFailed;
            }
        };

        let Some(due_at) = task.reminder_due() else {
            tracing::debug!(
                task_id = %task_id,
                done = task.done,
                has_due_at = task.due_at.is_some(),
                "Task not eligible for a reminder"
            );
            return AttemptOutcome::NotEligible;
        };

        let delay = reminder_delay(due_at, Utc::now());
        DeferredReminder::from_task(&task, due_at, delay).arm(Arc::clone(&self.sink));

        AttemptOutcome::Armed { delay }
    }
}
