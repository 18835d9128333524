//! # Cuecard Common
//!
//! Foundational types shared across the Cuecard crates: the [`CuecardError`]
//! error type with its [`Result`] alias, error severity classification, the
//! [`ErrorContext`] extension trait, and the [`Pretty`] log formatter.

pub mod error;
pub mod logging;

pub use error::{CuecardError, ErrorContext, ErrorSeverity, Result, Severity};
pub use logging::Pretty;
