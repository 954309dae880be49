/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::model::task::{Priority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body of `POST tasks/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateTaskRequest {
    /// Title
    pub title: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    /// Priority; the backend defaults to medium
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category
    #[must_use]
    pub fn with_category(mut self, category: u64) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the priority
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Body of `PATCH tasks/{id}/`
///
/// Unset fields are left untouched. `category` and `due_date` take a nested
/// option: `Some(None)` is sent as `null` and clears the value.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdateTaskRequest {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category, or `Some(None)` to remove it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<u64>>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New due date, or `Some(None)` to remove it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Whether the request would change nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body of `POST categories/` and `PUT categories/{id}/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRequest {
    /// Category name
    pub name: String,
    /// Emoji icon; the backend defaults to a folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hex color; the backend defaults to grey
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CategoryRequest {
    /// Creates a request with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            color: None,
        }
    }

    /// Sets the icon
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the color
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Body of `POST tasks/{task}/subtasks/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateSubtaskRequest {
    /// Title
    pub title: String,
    /// Position within the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl CreateSubtaskRequest {
    /// Creates a request with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            order: None,
        }
    }
}

/// Body of `PATCH tasks/{task}/subtasks/{id}/`
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdateSubtaskRequest {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    /// New position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}
