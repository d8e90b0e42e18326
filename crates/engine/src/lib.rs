//! Task storage and the reminder pipeline.
//!
//! Mutation paths hand task ids to a [`ReminderQueue`](queue::ReminderQueue).
//! The [`ReminderDispatcher`](dispatcher::ReminderDispatcher) drains it and
//! runs one [`ReminderScheduler`](scheduler::ReminderScheduler) attempt per id,
//! which re-reads the task through a [`TaskLookup`](lookup::TaskLookup) and
//! arms a deferred reminder when the task is still eligible.

pub mod dispatcher;
pub mod lookup;
pub mod queue;
pub mod scheduler;
pub mod tasks;
