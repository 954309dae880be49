use crate::error::AppError;
use crate::model::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::model::task::{Task, TaskCalendar, TaskFilters, TaskStatistics};
use async_trait::async_trait;

/// Interface for task operations
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Lists tasks matching the filters, newest first
    async fn list_tasks(&self, filters: &TaskFilters) -> Result<Vec<Task>, AppError>;

    /// Gets a task by id
    async fn get_task(&self, id: u64) -> Result<Task, AppError>;

    /// Creates a task
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, AppError>;

    /// Partially updates a task
    async fn update_task(&self, id: u64, request: &UpdateTaskRequest) -> Result<Task, AppError>;

    /// Deletes a task and its subtasks
    async fn delete_task(&self, id: u64) -> Result<(), AppError>;

    /// Flips a task between completed and pending
    async fn toggle_task(&self, id: u64) -> Result<Task, AppError>;

    /// Task counters by status
    async fn get_statistics(&self) -> Result<TaskStatistics, AppError>;

    /// Tasks due in a month, grouped by day
    ///
    /// # Arguments
    /// * `year` - Calendar year
    /// * `month` - Month, 1 to 12
    async fn get_calendar(&self, year: i32, month: u32) -> Result<TaskCalendar, AppError>;
}
