//! Reminder notification queue.
//!
//! A bounded FIFO of task ids, cloned into every mutation path and drained by
//! a single dispatcher. Entries carry no task state: the scheduler always
//! re-reads the task. The same id may be queued any number of times.
//!
//! The queue closes when every [`ReminderQueue`] handle has been dropped or
//! [`ReminderReceiver::close`] is called. Ids already buffered are still
//! delivered to the receiver after closing.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use taskflow_common::config::OverflowPolicy;
use taskflow_common::types::Task;

/// Result of offering a task id to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    /// The queue was full and the policy is [`OverflowPolicy::Drop`].
    Dropped,
    /// The dispatcher side has shut down.
    Closed,
}

/// Producer handle for the reminder queue.
#[derive(Debug, Clone)]
pub struct ReminderQueue {
    tx: mpsc::Sender<Uuid>,
    policy: OverflowPolicy,
}

/// Consumer side of the reminder queue.
#[derive(Debug)]
pub struct ReminderReceiver {
    rx: mpsc::Receiver<Uuid>,
}

/// Create a reminder queue holding at most `capacity` pending ids.
///
/// A capacity of zero is treated as one.
pub fn reminder_queue(capacity: usize, policy: OverflowPolicy) -> (ReminderQueue, ReminderReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ReminderQueue { tx, policy }, ReminderReceiver { rx })
}

impl ReminderQueue {
    /// Offer a task id. Never returns an error; failures are logged and reported
    /// through the outcome so callers can ignore them.
    pub async fn enqueue(&self, task_id: Uuid) -> EnqueueOutcome {
        let outcome = match self.policy {
            OverflowPolicy::Block => match self.tx.send(task_id).await {
                Ok(()) => EnqueueOutcome::Queued,
                Err(_) => EnqueueOutcome::Closed,
            },
            OverflowPolicy::Drop => match self.tx.try_send(task_id) {
                Ok(()) => EnqueueOutcome::Queued,
                Err(TrySendError::Full(_)) => EnqueueOutcome::Dropped,
                Err(TrySendError::Closed(_)) => EnqueueOutcome::Closed,
            },
        };

        match outcome {
            EnqueueOutcome::Queued => {
                tracing::debug!(task_id = %task_id, "Reminder notification queued");
            }
            EnqueueOutcome::Dropped => {
                tracing::warn!(
                    task_id = %task_id,
                    capacity = self.capacity(),
                    "Reminder queue full, dropping notification"
                );
            }
            EnqueueOutcome::Closed => {
                tracing::warn!(task_id = %task_id, "Reminder queue closed, notification discarded");
            }
        }

        outcome
    }

    /// Enqueue `task` if it currently warrants a reminder.
    ///
    /// Returns `None` without touching the queue when the task has no due time
    /// or is already done.
    pub async fn notify(&self, task: &Task) -> Option<EnqueueOutcome> {
        task.reminder_due()?;
        Some(self.enqueue(task.id).await)
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Number of ids currently buffered.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl ReminderReceiver {
    /// Wait for the next id. Returns `None` once the queue is closed and drained.
    pub async fn recv(&mut self) -> Option<Uuid> {
        self.rx.recv().await
    }

    /// Stop accepting new ids. Buffered ids can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
