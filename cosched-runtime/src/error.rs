//! Scheduler error types.

use crate::task::TaskId;
use thiserror::Error;

/// Errors returned by the task-control API and scheduler setup.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Handle does not refer to a live task (removed, or never added here).
    #[error("invalid task handle: {0}")]
    InvalidTask(TaskId),

    /// Every task slot is in use.
    #[error("task storage exhausted: all {capacity} slots in use")]
    CapacityExhausted { capacity: usize },

    /// Delay or period string that cannot be turned into ticks.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Time unit name that is not recognised.
    #[error("invalid time unit: {0}")]
    InvalidTimeUnit(String),

    /// Configuration could not be loaded or deserialized.
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Background runner task panicked or was cancelled.
    #[error("runner failed: {0}")]
    Runner(#[from] tokio::task::JoinError),
}

/// Result type for scheduler operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;
