//! Validate command implementation

use crate::context::CliContext;
use crate::error::success_or_warning;
use crate::exit_codes::EXIT_ERROR;
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use cuecard_prompts::{validate_directory, DirectoryValidation, FileValidation, ValidationLevel};

/// Validate the prompts directory and report the outcome.
///
/// Exit code is 1 when any file has errors, 2 when there are only warnings.
pub fn handle_command(context: &CliContext) -> Result<i32> {
    let result = validate_directory(&context.prompts_dir);
    let exit_code = exit_code(&result);

    if context.print_structured(&result)? {
        return Ok(exit_code);
    }

    let files: Vec<&FileValidation> = result.errors.iter().chain(&result.warnings).collect();
    if !files.is_empty() && !(context.quiet && !result.has_errors()) {
        println!("{}", issue_table(&files, context.quiet));
    }

    if !context.quiet || result.has_errors() {
        println!("{}", summary(&result));
    }
    Ok(exit_code)
}

/// Exit code for a directory validation
pub fn exit_code(result: &DirectoryValidation) -> i32 {
    if result.has_errors() {
        EXIT_ERROR
    } else {
        success_or_warning(result.has_warnings())
    }
}

fn issue_table(files: &[&FileValidation], errors_only: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Status", "File", "Result"]);

    for file in files {
        for issue in &file.issues {
            let status_cell = match issue.level {
                ValidationLevel::Warning if errors_only => continue,
                ValidationLevel::Warning => Cell::new("⚠").fg(Color::Yellow),
                ValidationLevel::Error => Cell::new("✗").fg(Color::Red),
            };
            table.add_row(vec![
                status_cell,
                Cell::new(&file.file_name),
                Cell::new(&issue.message),
            ]);
        }
    }

    table
}

/// One-line totals, colored by outcome
pub fn summary(result: &DirectoryValidation) -> String {
    let line = format!(
        "{} files: {} valid, {} with warnings, {} with errors",
        result.total_files(),
        result.valid,
        result.warnings.len(),
        result.errors.len()
    );

    if result.has_errors() {
        format!("✗ {line}").red().to_string()
    } else if result.has_warnings() {
        format!("⚠ {line}").yellow().to_string()
    } else {
        format!("✓ {line}").green().to_string()
    }
}
