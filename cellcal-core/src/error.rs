//! Error types for the cellcal ecosystem.

use thiserror::Error;

/// Errors that can occur in cellcal operations.
///
/// Validation errors block the operation and are returned to the caller for
/// display. Calendar-deletion failures during record deletion are logged by
/// the orchestrator rather than surfaced. Nothing here is fatal to the
/// process; every public operation returns a result.
#[derive(Error, Debug)]
pub enum CellCalError {
    #[error("Reminder message is empty")]
    EmptyMessage,

    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Due date is not in the future: {0}")]
    DateNotInFuture(String),

    #[error("Calendar unavailable: {0}")]
    CalendarUnavailable(String),

    #[error("Failed to create calendar event: {0}")]
    CalendarCreateFailed(String),

    #[error("Failed to delete calendar event: {0}")]
    CalendarDeleteFailed(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Failed to persist record store: {0}")]
    StorePersistFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cellcal operations.
pub type CellCalResult<T> = Result<T, CellCalError>;
