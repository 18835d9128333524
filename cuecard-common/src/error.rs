//! Error types for Cuecard
//!
//! This module provides structured error handling shared by every Cuecard
//! crate. Prompt parsing, file operations and the directory watcher all report
//! failures through [`CuecardError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but operation can proceed.
/// - **Error**: Operation failed but the system can continue.
/// - **Critical**: The caller cannot continue without intervention.
///
/// # Examples
///
/// ```rust
/// use cuecard_common::ErrorSeverity;
///
/// // A single malformed prompt file only fails that file
/// let bad_file = ErrorSeverity::Error;
///
/// // An unreadable prompts directory stops everything
/// let unreadable = ErrorSeverity::Critical;
/// # assert_ne!(bad_file, unreadable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,
    /// Operation failed but system can continue
    Error,
    /// System cannot continue, requires immediate attention
    Critical,
}

/// Trait for error types that have severity levels
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Result type alias for Cuecard operations
pub type Result<T> = std::result::Result<T, CuecardError>;

/// Common error types for Cuecard operations
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum CuecardError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml_ng::Error),

    /// A metadata block was opened but never closed
    #[error("missing closing frontmatter delimiter")]
    MissingClosingDelimiter,

    /// The metadata block could not be decoded
    #[error("invalid YAML frontmatter: {source}")]
    InvalidMetadata {
        /// The underlying YAML error
        source: serde_yaml_ng::Error,
    },

    /// The document has no metadata block
    #[error("no frontmatter found")]
    NoFrontmatter,

    /// File not found
    #[error("File not found: {path}\nSuggestion: {suggestion}")]
    FileNotFound {
        /// The file path that was not found
        path: String,
        /// Suggestion for fixing the issue
        suggestion: String,
    },

    /// The prompts directory itself could not be listed
    #[error("failed to read prompts directory {}: {source}", path.display())]
    DirectoryRead {
        /// Directory that could not be read
        path: PathBuf,
        /// The underlying IO error
        source: io::Error,
    },

    /// An operation needs a file-backed prompt but the prompt was never saved
    #[error("cannot {operation}: prompt is not bound to a file")]
    PromptNotBound {
        /// The operation that was attempted
        operation: String,
    },

    /// The directory watcher could not subscribe to filesystem events
    #[error("failed to watch {}: {message}", path.display())]
    WatcherSubscription {
        /// Path that could not be watched
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// A watcher method was called in a state that does not allow it
    #[error("invalid watcher state: {message}")]
    InvalidWatcherState {
        /// Description of the violated transition
        message: String,
    },

    /// Generic error with context
    #[error("{message}")]
    Context {
        /// The error message providing context
        message: String,
        #[source]
        /// The underlying error that caused this error
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CuecardError {
    /// Create a file not found error with suggestion
    pub fn file_not_found(path: &str, suggestion: &str) -> Self {
        CuecardError::FileNotFound {
            path: path.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Create an error for an operation that requires a bound file
    pub fn not_bound(operation: &str) -> Self {
        CuecardError::PromptNotBound {
            operation: operation.to_string(),
        }
    }

    /// Create a watcher subscription error
    pub fn watcher_subscription(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CuecardError::WatcherSubscription {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid watcher state error
    pub fn invalid_watcher_state(message: impl Into<String>) -> Self {
        CuecardError::InvalidWatcherState {
            message: message.into(),
        }
    }
}

impl Severity for CuecardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CuecardError::DirectoryRead { .. } => ErrorSeverity::Critical,
            CuecardError::WatcherSubscription { .. } => ErrorSeverity::Critical,

            CuecardError::Io(_) => ErrorSeverity::Error,
            CuecardError::Serialization(_) => ErrorSeverity::Error,
            CuecardError::MissingClosingDelimiter => ErrorSeverity::Error,
            CuecardError::InvalidMetadata { .. } => ErrorSeverity::Error,
            CuecardError::FileNotFound { .. } => ErrorSeverity::Error,
            CuecardError::PromptNotBound { .. } => ErrorSeverity::Error,
            CuecardError::InvalidWatcherState { .. } => ErrorSeverity::Error,
            CuecardError::Context { .. } => ErrorSeverity::Error,

            CuecardError::NoFrontmatter => ErrorSeverity::Warning,
        }
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| CuecardError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CuecardError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}
