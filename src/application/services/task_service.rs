use crate::application::client::Client;
use crate::application::interfaces::task::TaskService;
use crate::error::AppError;
use crate::model::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::model::task::{Task, TaskCalendar, TaskFilters, TaskStatistics};
use async_trait::async_trait;
use tracing::{debug, info};

fn task_path(id: u64) -> String {
    format!("tasks/{id}/")
}

#[async_trait]
impl TaskService for Client {
    async fn list_tasks(&self, filters: &TaskFilters) -> Result<Vec<Task>, AppError> {
        let tasks: Vec<Task> = self
            .http_client()
            .get_with_query("tasks/", filters.to_query())
            .await?;
        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn get_task(&self, id: u64) -> Result<Task, AppError> {
        self.http_client().get(&task_path(id)).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, AppError> {
        if request.title.trim().is_empty() {
            return Err(AppError::InvalidInput("task title is required".to_string()));
        }
        let task: Task = self.http_client().post("tasks/", request).await?;
        info!("Created task {}: {}", task.id, task.title);
        Ok(task)
    }

    async fn update_task(&self, id: u64, request: &UpdateTaskRequest) -> Result<Task, AppError> {
        self.http_client().patch(&task_path(id), request).await
    }

    async fn delete_task(&self, id: u64) -> Result<(), AppError> {
        self.http_client().delete(&task_path(id)).await?;
        info!("Deleted task {}", id);
        Ok(())
    }

    async fn toggle_task(&self, id: u64) -> Result<Task, AppError> {
        self.http_client()
            .post_empty(&format!("tasks/{id}/toggle/"))
            .await
    }

    async fn get_statistics(&self) -> Result<TaskStatistics, AppError> {
        self.http_client().get("tasks/statistics/").await
    }

    async fn get_calendar(&self, year: i32, month: u32) -> Result<TaskCalendar, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        let query = vec![
            ("year".to_string(), year.to_string()),
            ("month".to_string(), month.to_string()),
        ];
        self.http_client()
            .get_with_query("tasks/calendar/", query)
            .await
    }
}
