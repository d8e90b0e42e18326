//! Reminder dispatcher: the single consumer of the reminder queue.
//!
//! For every id received, the dispatcher spawns an independent scheduling
//! attempt and goes straight back to receiving. It runs until the queue is
//! closed and drained. Attempts and armed reminders still in flight at that
//! point are neither awaited nor cancelled.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use taskflow_notifier::ReminderSink;

use crate::lookup::TaskLookup;
use crate::queue::ReminderReceiver;
use crate::scheduler::ReminderScheduler;

/// Drains the reminder queue and fans ids out to scheduling attempts.
pub struct ReminderDispatcher {
    scheduler: ReminderScheduler,
    /// Caps attempts that are fetching or arming. Armed timers don't hold a permit.
    in_flight: Option<Arc<Semaphore>>,
}

impl ReminderDispatcher {
    pub fn new(lookup: Arc<dyn TaskLookup>, sink: Arc<dyn ReminderSink>) -> Self {
        Self {
            scheduler: ReminderScheduler::new(lookup, sink),
            in_flight: None,
        }
    }

    /// Limit concurrent scheduling attempts. `None` leaves them unbounded.
    ///
    /// When the limit is reached the dispatcher stops receiving until a slot
    /// frees up, so the queue fills and its overflow policy takes over.
    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.in_flight = limit.map(|n| Arc::new(Semaphore::new(n.max(1))));
        self
    }

    /// Run the dispatcher on a background task.
    pub fn spawn(self, receiver: ReminderReceiver) -> JoinHandle<u64> {
        tokio::spawn(self.run(receiver))
    }

    /// Consume ids until the queue closes. Returns the number of attempts spawned.
    pub async fn run(self, mut receiver: ReminderReceiver) -> u64 {
        tracing::info!(
            max_in_flight = ?self.in_flight.as_ref().map(|s| s.available_permits()),
            "Reminder dispatcher started"
        );

        let mut dispatched = 0u64;
        while let Some(task_id) = receiver.recv().await {
            let permit = match &self.in_flight {
                Some(limit) => Arc::clone(limit).acquire_owned().await.ok(),
                None => None,
            };

            let scheduler = self.scheduler.clone();
            tokio::spawn(async move {
                let outcome = scheduler.attempt(task_id).await;
                drop(permit);
                tracing::debug!(task_id = %task_id, ?outcome, "Reminder attempt finished");
            });
            dispatched += 1;
        }

        tracing::info!(dispatched, "Reminder queue closed, dispatcher stopped");
        dispatched
    }
}
