//! Implementations of the service traits for [`Client`](crate::application::client::Client)
//!
//! Each module maps one trait onto the REST endpoints; all requests go
//! through the refresh-aware transport.

/// Category endpoints
pub mod category_service;
/// Subtask endpoints
pub mod subtask_service;
/// Task endpoints
pub mod task_service;

pub use crate::application::interfaces::category::CategoryService;
pub use crate::application::interfaces::subtask::SubtaskService;
pub use crate::application::interfaces::task::TaskService;
