//! Error types for the task store.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all task store operations.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Update maps may only name known task fields
    #[error("Unknown task field '{name}'")]
    UnknownField { name: String },
    /// The search index could not replay a mutation already committed to the
    /// primary store
    #[error("Search index out of sync after {operation} of task {id}: {source}")]
    IndexSync {
        id: u64,
        operation: &'static str,
        #[source]
        source: Box<TaskError>,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TaskError {
        TaskError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TaskError {
        TaskError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TaskError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a mirror failure for the given task and operation.
    pub fn index_sync(id: u64, operation: &'static str, source: TaskError) -> Self {
        Self::IndexSync {
            id,
            operation,
            source: Box::new(source),
        }
    }

    /// True when the error reports a missing task.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. })
    }

    /// True when the payload was rejected before reaching storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::UnknownField { .. })
    }

    /// True when the backing store could not be opened, read or written.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Database { .. } | Self::FileSystem { .. } | Self::XdgDirectory(_)
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TaskError::database(message).with_source(e))
    }
}

/// Maps a `spawn_blocking` join failure into a task error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> TaskError {
    TaskError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

/// Result type alias for task store operations
pub type Result<T> = std::result::Result<T, TaskError>;
