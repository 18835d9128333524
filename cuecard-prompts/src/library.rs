//! Library operations over a prompts directory
//!
//! The directory is the source of truth. Callers load it wholesale with
//! [`load_directory`], browse the result with [`group_prompts`] and
//! [`filter_prompts`], and go back to disk for every change.

use crate::filename::generate_filename;
use crate::frontmatter::parse_prompt;
use crate::prompt::Prompt;
use crate::validation::{DirectoryValidation, FileValidation, ValidationIssue};
use cuecard_common::{CuecardError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const MARKDOWN_EXTENSION: &str = "md";
const README_FILE: &str = "readme.md";
const COPY_SUFFIX: &str = " (Copy)";

/// Number of distinct group colors
const GROUP_COLORS: u32 = 8;
const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Whether the path has a `.md` extension, ignoring case
pub(crate) fn has_markdown_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

/// Whether a file name is loaded as a prompt: `.md`, but not `readme.md`
pub(crate) fn is_prompt_file_name(name: &str) -> bool {
    has_markdown_extension(Path::new(name)) && !name.eq_ignore_ascii_case(README_FILE)
}

/// Prompt files in `dir`, sorted by file name. Subdirectories are skipped.
fn prompt_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let directory_error = |source: std::io::Error| CuecardError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(directory_error)? {
        let path = entry.map_err(directory_error)?.path();
        if path.is_dir() {
            continue;
        }

        let is_prompt = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_prompt_file_name);
        if !is_prompt {
            tracing::trace!("Skipping non-prompt file {}", path.display());
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// File names of every entry in `dir`, used for collision checks
fn existing_file_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|source| CuecardError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect())
}

/// Load every prompt in a directory.
///
/// Files that cannot be read or parsed are skipped and logged. Only a failure
/// to list the directory itself is an error.
pub fn load_directory(dir: impl AsRef<Path>) -> Result<Vec<Prompt>> {
    let dir = dir.as_ref();
    let files = prompt_files(dir)?;

    let mut prompts = Vec::with_capacity(files.len());
    for path in files {
        match load_file(&path) {
            Ok(prompt) => prompts.push(prompt),
            Err(e) => tracing::warn!("Skipping prompt {}: {}", path.display(), e),
        }
    }

    tracing::debug!("Loaded {} prompts from {}", prompts.len(), dir.display());
    Ok(prompts)
}

/// Read, parse and bind a single prompt file
pub fn load_file(path: impl AsRef<Path>) -> Result<Prompt> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;

    let mut prompt = parse_prompt(&raw)?;
    prompt.bind(path.to_path_buf());
    Ok(prompt)
}

/// Prompts bucketed for display
#[derive(Debug, Default)]
pub struct GroupedPrompts<'a> {
    /// Favorites, which also appear in their group or in `ungrouped`
    pub favorites: Vec<&'a Prompt>,
    /// Named groups
    pub groups: HashMap<String, Vec<&'a Prompt>>,
    /// Prompts with an empty group
    pub ungrouped: Vec<&'a Prompt>,
}

impl GroupedPrompts<'_> {
    /// Group names in ascending order
    pub fn group_names(&self) -> Vec<String> {
        sorted_group_names(&self.groups)
    }
}

fn sort_by_title(prompts: &mut [&Prompt]) {
    prompts.sort_by_cached_key(|prompt| prompt.title.to_lowercase());
}

/// Bucket prompts into favorites, named groups and ungrouped.
///
/// Every bucket is sorted by title, case-insensitively. Prompts with equal
/// titles keep their input order.
pub fn group_prompts(prompts: &[Prompt]) -> GroupedPrompts<'_> {
    let mut grouped = GroupedPrompts::default();

    for prompt in prompts {
        if prompt.favorite {
            grouped.favorites.push(prompt);
        }

        if prompt.group.is_empty() {
            grouped.ungrouped.push(prompt);
        } else {
            grouped
                .groups
                .entry(prompt.group.clone())
                .or_default()
                .push(prompt);
        }
    }

    sort_by_title(&mut grouped.favorites);
    sort_by_title(&mut grouped.ungrouped);
    for bucket in grouped.groups.values_mut() {
        sort_by_title(bucket);
    }

    grouped
}

/// Group names in ordinal ascending order
pub fn sorted_group_names<V>(groups: &HashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = groups.keys().cloned().collect();
    names.sort();
    names
}

fn matches_query(prompt: &Prompt, query: &str) -> bool {
    prompt.title.to_lowercase().contains(query)
        || prompt.description.to_lowercase().contains(query)
        || prompt.group.to_lowercase().contains(query)
        || prompt
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

/// Prompts whose title, description, group or any tag contains `query`,
/// ignoring case. An empty query matches everything.
pub fn filter_prompts<'a>(prompts: &'a [Prompt], query: &str) -> Vec<&'a Prompt> {
    if query.is_empty() {
        return prompts.iter().collect();
    }

    let query = query.to_lowercase();
    prompts
        .iter()
        .filter(|prompt| matches_query(prompt, &query))
        .collect()
}

/// Look up a prompt by alias, then by file name (with or without `.md`),
/// then by title. Alias matching is exact, the others ignore case.
pub fn find_prompt<'a>(prompts: &'a [Prompt], key: &str) -> Option<&'a Prompt> {
    if key.is_empty() {
        return None;
    }

    let file_name_matches = |prompt: &&Prompt| {
        prompt.file_name.as_deref().is_some_and(|name| {
            name.eq_ignore_ascii_case(key)
                || Path::new(name)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem.to_lowercase() == key.to_lowercase())
        })
    };

    prompts
        .iter()
        .find(|prompt| prompt.alias == key)
        .or_else(|| prompts.iter().find(file_name_matches))
        .or_else(|| {
            let key = key.to_lowercase();
            prompts
                .iter()
                .find(|prompt| prompt.title.to_lowercase() == key)
        })
}

/// Stable color slot for a group: `-1` when ungrouped, otherwise `0..8`
pub fn color_index_for_group(group: &str) -> i32 {
    if group.is_empty() {
        return -1;
    }

    let hash = group.chars().fold(FNV_OFFSET, |hash, c| {
        (hash ^ c as u32).wrapping_mul(FNV_PRIME)
    });

    (hash % GROUP_COLORS) as i32
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// With `overwrite` false an existing file at `path` is an error and is left
/// untouched. Either way no partially written file is ever visible at `path`.
pub(crate) fn write_file_atomically(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;

    let persisted = if overwrite {
        temp.persist(path)
    } else {
        temp.persist_noclobber(path)
    };
    persisted.map_err(|e| CuecardError::Io(e.error))?;

    Ok(())
}

/// Save a new prompt in `dir` under a file name generated from its title.
///
/// Returns the path written.
pub fn create_prompt_file(dir: impl AsRef<Path>, prompt: &Prompt) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let existing = existing_file_names(dir)?;
    let file_name = generate_filename(&prompt.title, existing.as_slice());
    let path = dir.join(&file_name);

    let markdown = prompt.to_markdown()?;
    write_file_atomically(&path, &markdown, false)?;

    tracing::info!("Created prompt {}", path.display());
    Ok(path)
}

/// Copy a saved prompt next to the original.
///
/// The copy gets " (Copy)" appended to its title, and neither the alias nor
/// the favorite flag is carried over.
pub fn duplicate_prompt(prompt: &Prompt) -> Result<Prompt> {
    let source = prompt
        .file_path
        .as_deref()
        .ok_or_else(|| CuecardError::not_bound("duplicate prompt"))?;
    let dir = source.parent().unwrap_or_else(|| Path::new("."));

    let mut copy = Prompt {
        title: format!("{}{}", prompt.title, COPY_SUFFIX),
        alias: String::new(),
        favorite: false,
        file_path: None,
        file_name: None,
        ..prompt.clone()
    };

    let path = create_prompt_file(dir, &copy)?;
    copy.bind(path);
    Ok(copy)
}

/// Remove a saved prompt's file
pub fn delete_prompt(prompt: &Prompt) -> Result<()> {
    let path = prompt
        .file_path
        .as_deref()
        .ok_or_else(|| CuecardError::not_bound("delete prompt"))?;

    fs::remove_file(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CuecardError::file_not_found(
            &path.display().to_string(),
            "The prompt was removed outside cuecard; reload the library",
        ),
        _ => CuecardError::Io(e),
    })?;

    tracing::info!("Deleted prompt {}", path.display());
    Ok(())
}

/// Validate every prompt file in a directory.
///
/// Files that fail to parse are reported as errors. Prompts sharing a title
/// (ignoring case) each get a "duplicate title" warning.
pub fn validate_directory(dir: impl AsRef<Path>) -> DirectoryValidation {
    let dir = dir.as_ref();
    let mut result = DirectoryValidation::default();

    let files = match prompt_files(dir) {
        Ok(files) => files,
        Err(e) => {
            result.record(FileValidation::new(
                dir.display().to_string(),
                vec![ValidationIssue::error(e.to_string())],
            ));
            return result;
        }
    };

    let loaded: Vec<(String, Result<Prompt>)> = files
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            (name, load_file(path))
        })
        .collect();

    let mut title_counts: HashMap<String, usize> = HashMap::new();
    for prompt in loaded.iter().filter_map(|(_, loaded)| loaded.as_ref().ok()) {
        *title_counts.entry(prompt.title.to_lowercase()).or_default() += 1;
    }

    for (name, loaded) in loaded {
        let issues = match loaded {
            Ok(prompt) => {
                let mut issues = prompt.validate();
                if title_counts
                    .get(&prompt.title.to_lowercase())
                    .is_some_and(|count| *count > 1)
                {
                    issues.push(ValidationIssue::warning("duplicate title"));
                }
                issues
            }
            Err(e) => vec![ValidationIssue::error(e.to_string())],
        };
        result.record(FileValidation::new(name, issues));
    }

    tracing::debug!(
        "Validated {}: {} valid, {} warnings, {} errors",
        dir.display(),
        result.valid,
        result.warnings.len(),
        result.errors.len()
    );
    result
}
