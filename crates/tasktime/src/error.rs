//! Error types for tasktime operations.
//!
//! The date and duration functions never fail; these errors only come out of
//! the summary aggregation and record decoding paths.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TasktimeError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Unknown task: task ID '{task_id}' referenced by entry ID '{entry_id}'")]
    UnknownTask { task_id: u64, entry_id: u64 },

    #[error("Invalid record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TasktimeError>;
