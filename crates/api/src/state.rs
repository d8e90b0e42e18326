//! Shared application state for the Axum API server.

use sqlx::PgPool;

use taskflow_common::config::AppConfig;
use taskflow_engine::queue::ReminderQueue;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: AppConfig,
    /// Producer side of the reminder queue. Dropping every clone closes it.
    pub reminders: ReminderQueue,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, reminders: ReminderQueue) -> Self {
        Self {
            pool,
            config,
            reminders,
        }
    }
}
