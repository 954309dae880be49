use crate::error::AppError;
use crate::model::requests::{CreateSubtaskRequest, UpdateSubtaskRequest};
use crate::model::task::Subtask;
use async_trait::async_trait;

/// Interface for subtask operations; subtasks always live under a task
#[async_trait]
pub trait SubtaskService: Send + Sync {
    /// Adds a subtask to a task
    async fn create_subtask(
        &self,
        task_id: u64,
        request: &CreateSubtaskRequest,
    ) -> Result<Subtask, AppError>;

    /// Partially updates a subtask
    async fn update_subtask(
        &self,
        task_id: u64,
        subtask_id: u64,
        request: &UpdateSubtaskRequest,
    ) -> Result<Subtask, AppError>;

    /// Deletes a subtask
    async fn delete_subtask(&self, task_id: u64, subtask_id: u64) -> Result<(), AppError>;

    /// Flips a subtask's completion flag
    async fn toggle_subtask(&self, task_id: u64, subtask_id: u64) -> Result<Subtask, AppError>;
}
