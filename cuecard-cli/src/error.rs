//! Error handling for the Cuecard CLI
//!
//! Commands return [`anyhow::Result`]; at the top level the error is turned
//! into a [`CliError`] whose exit code follows the severity of the underlying
//! [`CuecardError`], when there is one.

use std::error::Error;
use std::fmt;

use cuecard_common::{CuecardError, ErrorSeverity, Severity};

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Exit code for a library error: warnings map to [`EXIT_WARNING`]
pub fn exit_code_for(error: &CuecardError) -> i32 {
    match error.severity() {
        ErrorSeverity::Warning => EXIT_WARNING,
        ErrorSeverity::Error | ErrorSeverity::Critical => EXIT_ERROR,
    }
}

impl From<CuecardError> for CliError {
    fn from(error: CuecardError) -> Self {
        Self {
            message: error.to_string(),
            exit_code: exit_code_for(&error),
            source: Some(Box::new(error)),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let exit_code = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<CuecardError>())
            .map(exit_code_for)
            .unwrap_or(EXIT_ERROR);

        // `{:#}` keeps the anyhow context chain on one line
        Self::new(format!("{error:#}"), exit_code)
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

/// Exit code for a command that succeeded with or without warnings
pub fn success_or_warning(has_warnings: bool) -> i32 {
    if has_warnings {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    }
}
