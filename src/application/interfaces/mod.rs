/// Category operations
pub mod category;
/// Subtask operations
pub mod subtask;
/// Task operations
pub mod task;
