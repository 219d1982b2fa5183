//! Error types for the scheduler.

use thiserror::Error;

/// Result type for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors that can occur while driving the scheduler.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// The run loop is already active on another task.
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// The scheduler has been shut down.
    #[error("scheduler has been shut down")]
    ShutDown,
}
