/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
}

impl TaskStatus {
    /// Wire representation, as used in query strings
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    #[default]
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// Wire representation, as used in query strings
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task category
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: u64,
    /// Category name
    pub name: String,
    /// Emoji icon
    pub icon: String,
    /// Hex color, e.g. `#6b7280`
    pub color: String,
    /// Number of tasks in the category
    #[serde(default)]
    pub task_count: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Checklist item inside a task
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Subtask identifier
    pub id: u64,
    /// Subtask title
    pub title: String,
    /// Completion flag
    pub is_completed: bool,
    /// Completion time, if completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Position within the task
    #[serde(default)]
    pub order: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// `part / total` in percent, rounded down and capped at 100
fn percent_of(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = (u64::from(part) * 100 / u64::from(total)).min(100);
    u32::try_from(percent).unwrap_or(100)
}

/// Completed/total subtask counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskProgress {
    /// Completed subtasks
    pub completed: u32,
    /// All subtasks
    pub total: u32,
}

impl SubtaskProgress {
    /// Completion ratio in percent, rounded down and capped at 100
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent_of(self.completed, self.total)
    }
}

/// A to-do item
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier
    pub id: u64,
    /// Title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Category identifier
    pub category: Option<u64>,
    /// Expanded category
    #[serde(default)]
    pub category_details: Option<Category>,
    /// Workflow status
    pub status: TaskStatus,
    /// Priority
    pub priority: Priority,
    /// Due date
    pub due_date: Option<DateTime<Utc>>,
    /// Completion time
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Whether the task is completed
    #[serde(default)]
    pub is_completed: bool,
    /// Whether the due date has passed on an open task
    #[serde(default)]
    pub is_overdue: bool,
    /// Checklist items
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Checklist progress; absent when the task has no subtasks
    #[serde(default)]
    pub subtask_progress: Option<SubtaskProgress>,
}

/// Task counters by status, from `tasks/statistics/`
#[derive(Debug, DisplaySimple, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskStatistics {
    /// All tasks
    pub total: u32,
    /// Pending tasks
    pub pending: u32,
    /// Tasks in progress
    pub in_progress: u32,
    /// Completed tasks
    pub completed: u32,
}

impl TaskStatistics {
    /// Completion ratio in percent, rounded down and capped at 100
    #[must_use]
    pub fn completion_rate(&self) -> u32 {
        percent_of(self.completed, self.total)
    }
}

/// Tasks grouped by due date (`YYYY-MM-DD`), from `tasks/calendar/`
pub type TaskCalendar = BTreeMap<String, Vec<Task>>;

/// Optional filters for `tasks/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    /// Restrict to a status
    pub status: Option<TaskStatus>,
    /// Restrict to a priority
    pub priority: Option<Priority>,
    /// Restrict to a category
    pub category: Option<u64>,
    /// Search in title and description
    pub search: Option<String>,
}

impl TaskFilters {
    /// Sets the status filter
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority filter
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category filter
    #[must_use]
    pub fn with_category(mut self, category: u64) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the search filter; blank terms are ignored
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }

    /// Query parameters for the set filters, in a stable order
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            query.push(("priority".to_string(), priority.as_str().to_string()));
        }
        if let Some(category) = self.category {
            query.push(("category".to_string(), category.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}
