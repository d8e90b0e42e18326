//! Reminder sinks: the side effect performed when a reminder fires.

use tokio::sync::mpsc;

use taskflow_common::types::Reminder;

/// Tracing target used for reminder log lines.
pub const REMINDER_TARGET: &str = "taskflow::reminder";

/// Destination for fired reminders.
///
/// Emission has no error path: a sink that talks to a fallible channel
/// (email, webhook) owns its own failure handling.
pub trait ReminderSink: Send + Sync + 'static {
    fn emit(&self, reminder: &Reminder);
}

/// Emits one structured `tracing` event per reminder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReminderSink for LogSink {
    fn emit(&self, reminder: &Reminder) {
        tracing::info!(
            target: REMINDER_TARGET,
            task_id = %reminder.task_id,
            owner_id = %reminder.owner_id,
            title = %reminder.title,
            due_at = %reminder.due_at.to_rfc3339(),
            fired_at = %reminder.fired_at.to_rfc3339(),
            "Task reminder due"
        );
    }
}

/// Forwards reminders onto an unbounded channel.
///
/// Useful for in-process consumers and for observing reminders in tests.
/// Reminders emitted after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Reminder>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Reminder>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ReminderSink for ChannelSink {
    fn emit(&self, reminder: &Reminder) {
        if self.tx.send(reminder.clone()).is_err() {
            tracing::debug!(
                task_id = %reminder.task_id,
                "Reminder receiver dropped, discarding reminder"
            );
        }
    }
}
