//! Read access to task state for the reminder pipeline.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskflow_common::types::Task;

use crate::tasks::TaskService;

/// Fetches the current snapshot of a task by id.
///
/// Implementations must not cache: every call reflects the latest committed
/// state. `Ok(None)` means the task does not exist (any more).
#[async_trait]
pub trait TaskLookup: Send + Sync + 'static {
    async fn fetch_task(&self, task_id: Uuid) -> anyhow::Result<Option<Task>>;
}

#[async_trait]
impl TaskLookup for PgPool {
    async fn fetch_task(&self, task_id: Uuid) -> anyhow::Result<Option<Task>> {
        Ok(TaskService::find(self, task_id).await?)
    }
}
