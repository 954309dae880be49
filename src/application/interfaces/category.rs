use crate::error::AppError;
use crate::model::requests::CategoryRequest;
use crate::model::task::Category;
use async_trait::async_trait;

/// Interface for category operations
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Lists all categories of the current user
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    /// Gets a category by id
    async fn get_category(&self, id: u64) -> Result<Category, AppError>;

    /// Creates a category
    async fn create_category(&self, request: &CategoryRequest) -> Result<Category, AppError>;

    /// Replaces a category
    async fn update_category(&self, id: u64, request: &CategoryRequest)
    -> Result<Category, AppError>;

    /// Deletes a category; its tasks become uncategorized
    async fn delete_category(&self, id: u64) -> Result<(), AppError>;
}
