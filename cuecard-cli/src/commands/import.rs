//! Import command implementation

use crate::context::CliContext;
use crate::error::success_or_warning;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::{Context, Result};
use colored::Colorize;
use cuecard_prompts::{import_directory, import_file, ImportMetadata};
use std::path::Path;

/// Import a file or every prompt file in a directory.
///
/// A directory import that hit per-file failures exits with a warning.
pub fn handle_command(
    path: &Path,
    fallback: ImportMetadata,
    context: &CliContext,
) -> Result<i32> {
    if path.is_dir() {
        let summary = import_directory(&context.prompts_dir, path)
            .with_context(|| format!("failed to import {}", path.display()))?;

        if context.print_structured(&summary)? {
            return Ok(success_or_warning(!summary.errors.is_empty()));
        }

        context.status(format!(
            "Imported {} prompts, skipped {}",
            summary.imported, summary.skipped
        ));
        for error in &summary.errors {
            eprintln!("{} {}", "✗".red(), error);
        }
        return Ok(success_or_warning(!summary.errors.is_empty()));
    }

    let created = import_file(&context.prompts_dir, path, &fallback)
        .with_context(|| format!("failed to import {}", path.display()))?;
    context.status(format!("Imported {}", created.display()));
    Ok(EXIT_SUCCESS)
}
