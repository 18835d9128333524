//! Validation types for prompts and prompt directories
//!
//! Validation never fails. Problems are returned as data and it is up to the
//! caller to decide what to do with them.

use serde::Serialize;
use std::fmt;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Should be addressed but doesn't prevent usage
    Warning,
    /// Must be fixed before the prompt is considered valid
    Error,
}

impl ValidationLevel {
    /// Get the string representation of the validation level
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Warning => "warning",
            ValidationLevel::Error => "error",
        }
    }

    /// Check if this is an error level
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationLevel::Error)
    }

    /// Check if this is a warning level
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationLevel::Warning)
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found while validating a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Severity level of the issue
    pub level: ValidationLevel,
    /// Description of the issue
    pub message: String,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(level: ValidationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Create an error-level issue
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ValidationLevel::Error, message)
    }

    /// Create a warning-level issue
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ValidationLevel::Warning, message)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// All issues found in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileValidation {
    /// File name, or the directory path when the directory itself was unreadable
    pub file_name: String,
    /// Issues in the order they were found
    pub issues: Vec<ValidationIssue>,
}

impl FileValidation {
    /// Create a file validation record
    pub fn new(file_name: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            file_name: file_name.into(),
            issues,
        }
    }

    /// The most severe level among the issues, if any
    pub fn worst_level(&self) -> Option<ValidationLevel> {
        self.issues.iter().map(|issue| issue.level).max()
    }

    /// Whether any issue is an error
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|issue| issue.level.is_error())
    }

    /// Whether any issue is a warning
    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|issue| issue.level.is_warning())
    }
}

/// Validation results for a whole prompts directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryValidation {
    /// Number of files with no issues
    pub valid: usize,
    /// Files whose worst issue is a warning
    pub warnings: Vec<FileValidation>,
    /// Files with at least one error
    pub errors: Vec<FileValidation>,
}

impl DirectoryValidation {
    /// File it into the bucket matching its worst issue
    pub fn record(&mut self, file: FileValidation) {
        match file.worst_level() {
            None => self.valid += 1,
            Some(ValidationLevel::Warning) => self.warnings.push(file),
            Some(ValidationLevel::Error) => self.errors.push(file),
        }
    }

    /// Whether any file has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any file has warnings but no errors
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of files seen, valid or not
    pub fn total_files(&self) -> usize {
        self.valid + self.warnings.len() + self.errors.len()
    }
}
