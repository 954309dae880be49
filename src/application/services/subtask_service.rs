use crate::application::client::Client;
use crate::application::interfaces::subtask::SubtaskService;
use crate::error::AppError;
use crate::model::requests::{CreateSubtaskRequest, UpdateSubtaskRequest};
use crate::model::task::Subtask;
use async_trait::async_trait;

fn subtask_path(task_id: u64, subtask_id: u64) -> String {
    format!("tasks/{task_id}/subtasks/{subtask_id}/")
}

#[async_trait]
impl SubtaskService for Client {
    async fn create_subtask(
        &self,
        task_id: u64,
        request: &CreateSubtaskRequest,
    ) -> Result<Subtask, AppError> {
        if request.title.trim().is_empty() {
            return Err(AppError::InvalidInput("subtask title is required".to_string()));
        }
        self.http_client()
            .post(&format!("tasks/{task_id}/subtasks/"), request)
            .await
    }

    async fn update_subtask(
        &self,
        task_id: u64,
        subtask_id: u64,
        request: &UpdateSubtaskRequest,
    ) -> Result<Subtask, AppError> {
        self.http_client()
            .patch(&subtask_path(task_id, subtask_id), request)
            .await
    }

    async fn delete_subtask(&self, task_id: u64, subtask_id: u64) -> Result<(), AppError> {
        self.http_client()
            .delete(&subtask_path(task_id, subtask_id))
            .await
    }

    async fn toggle_subtask(&self, task_id: u64, subtask_id: u64) -> Result<Subtask, AppError> {
        self.http_client()
            .post_empty(&format!("tasks/{task_id}/subtasks/{subtask_id}/toggle/"))
            .await
    }
}
