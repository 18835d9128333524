//! Importing prompt files from outside the prompts directory

use crate::frontmatter::{has_frontmatter, parse_prompt};
use crate::library::{create_prompt_file, has_markdown_extension, is_prompt_file_name};
use crate::prompt::Prompt;
use cuecard_common::{CuecardError, ErrorContext, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata used when an imported file has no metadata block of its own
#[derive(Debug, Clone, Default)]
pub struct ImportMetadata {
    /// Title for the new prompt; defaults to the source file stem
    pub title: Option<String>,
    /// Group for the new prompt
    pub group: Option<String>,
}

/// Outcome of importing a directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Files copied into the prompts directory
    pub imported: usize,
    /// `readme.md` and files without a metadata block
    pub skipped: usize,
    /// One `"<file name>: <reason>"` line per failed file
    pub errors: Vec<String>,
}

/// Import one file into `prompts_dir`.
///
/// A file with a metadata block keeps its metadata, minus the favorite flag.
/// A plain file becomes the body of a new prompt titled from `fallback` or,
/// failing that, from the source file stem.
pub fn import_file(
    prompts_dir: impl AsRef<Path>,
    source: impl AsRef<Path>,
    fallback: &ImportMetadata,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let raw = fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;

    let prompt = if has_frontmatter(&raw) {
        let mut prompt = parse_prompt(&raw)?;
        prompt.favorite = false;
        prompt
    } else {
        let title = fallback
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .or_else(|| {
                source
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        Prompt::new(title, raw.trim()).with_group(fallback.group.clone().unwrap_or_default())
    };

    let path = create_prompt_file(prompts_dir, &prompt)?;
    tracing::info!("Imported {} as {}", source.display(), path.display());
    Ok(path)
}

/// Import every prompt file with a metadata block from `source_dir`.
///
/// Not recursive. Failures on individual files are collected in the summary;
/// only an unreadable `source_dir` is an error.
pub fn import_directory(
    prompts_dir: impl AsRef<Path>,
    source_dir: impl AsRef<Path>,
) -> Result<ImportSummary> {
    let prompts_dir = prompts_dir.as_ref();
    let source_dir = source_dir.as_ref();

    let entries = fs::read_dir(source_dir).map_err(|source| CuecardError::DirectoryRead {
        path: source_dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| !path.is_dir() && has_markdown_extension(path))
        .collect();
    paths.sort();

    let mut summary = ImportSummary::default();
    for path in paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_prompt_file_name(&name) {
            summary.skipped += 1;
            continue;
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                summary.errors.push(format!("{name}: read error: {e}"));
                continue;
            }
        };

        if !has_frontmatter(&raw) {
            tracing::debug!("Skipping {} without metadata", name);
            summary.skipped += 1;
            continue;
        }

        let mut prompt = match parse_prompt(&raw) {
            Ok(prompt) => prompt,
            Err(e) => {
                summary.errors.push(format!("{name}: parse error: {e}"));
                continue;
            }
        };
        prompt.favorite = false;

        match create_prompt_file(prompts_dir, &prompt) {
            Ok(_) => summary.imported += 1,
            Err(e) => summary.errors.push(format!("{name}: create error: {e}")),
        }
    }

    tracing::info!(
        "Imported {} prompts from {} ({} skipped, {} errors)",
        summary.imported,
        source_dir.display(),
        summary.skipped,
        summary.errors.len()
    );
    Ok(summary)
}

/// The starter prompt offered to new users
pub fn sample_prompt() -> Prompt {
    Prompt::new(
        "Hello World",
        "Hello! This is a sample prompt.\n\n\
         You can use variables like ${DATE} to insert the current date.\n\n\
         Edit or delete this prompt to get started!",
    )
    .with_description("A simple greeting prompt")
    .with_group("Examples")
    .with_tags(vec!["sample".to_string(), "greeting".to_string()])
}
