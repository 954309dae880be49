use crate::application::client::Client;
use crate::application::interfaces::category::CategoryService;
use crate::error::AppError;
use crate::model::requests::CategoryRequest;
use crate::model::task::Category;
use async_trait::async_trait;
use tracing::info;

fn category_path(id: u64) -> String {
    format!("categories/{id}/")
}

fn validate(request: &CategoryRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidInput("category name is required".to_string()));
    }
    if let Some(color) = &request.color {
        let hex = color.strip_prefix('#').unwrap_or_default();
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::InvalidInput(format!(
                "color must look like #rrggbb, got {color}"
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl CategoryService for Client {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.http_client().get("categories/").await
    }

    async fn get_category(&self, id: u64) -> Result<Category, AppError> {
        self.http_client().get(&category_path(id)).await
    }

    async fn create_category(&self, request: &CategoryRequest) -> Result<Category, AppError> {
        validate(request)?;
        let category: Category = self.http_client().post("categories/", request).await?;
        info!("Created category {}: {}", category.id, category.name);
        Ok(category)
    }

    async fn update_category(
        &self,
        id: u64,
        request: &CategoryRequest,
    ) -> Result<Category, AppError> {
        validate(request)?;
        self.http_client().put(&category_path(id), request).await
    }

    async fn delete_category(&self, id: u64) -> Result<(), AppError> {
        self.http_client().delete(&category_path(id)).await
    }
}
