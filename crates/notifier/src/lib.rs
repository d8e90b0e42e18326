//! Reminder delivery.
//!
//! A [`DeferredReminder`] waits out its delay on the tokio timer and then hands
//! a [`Reminder`](taskflow_common::types::Reminder) to a [`ReminderSink`]. The
//! default sink is a structured log line; other sinks plug in behind the same
//! trait.

pub mod deferred;
pub mod sink;

pub use deferred::DeferredReminder;
pub use sink::{ChannelSink, LogSink, REMINDER_TARGET, ReminderSink};
