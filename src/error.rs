//! Crate-wide error type.

use thiserror::Error;

/// Errors produced while building graphs, scheduling, or moving documents.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The ready set emptied while tasks were still unscheduled.
    ///
    /// Either the graph has a cycle or a task depends on an id that is not
    /// part of the graph. The two causes are not distinguished.
    #[error("scheduling stalled: no ready task while {} remain unscheduled ({})", .unscheduled.len(), .unscheduled.join(", "))]
    Stalled { unscheduled: Vec<String> },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("task '{task}' has invalid duration {duration} (must be finite and >= 0)")]
    InvalidDuration { task: String, duration: f64 },

    #[error("invalid schedule document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
