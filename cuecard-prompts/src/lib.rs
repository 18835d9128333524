//! # Cuecard Prompts
//!
//! The prompt library engine behind Cuecard. A prompt library is a directory
//! of markdown files, each with an optional YAML metadata block and a body
//! that may contain `${NAME}` placeholders.
//!
//! ## Features
//!
//! - **Parsing**: Split documents into metadata and body, and write them back
//! - **Library Operations**: Load, group, filter, create, duplicate and delete prompts
//! - **Validation**: Per-prompt and per-directory checks reported as data
//! - **Substitution**: Resolve built-in variables at use time
//! - **Watching**: Debounced reload notifications for a prompts directory
//!
//! ```
//! use cuecard_prompts::{parse_prompt, substitute, VariableResolver};
//!
//! let prompt = parse_prompt("---\ntitle: Greet\ninput: required\n---\nHello ${INPUT}!")?;
//! assert!(prompt.requires_input());
//!
//! let resolver = VariableResolver::new().with_input("World");
//! assert_eq!(substitute(&prompt.content, Some(&resolver)), "Hello World!");
//! # Ok::<(), cuecard_prompts::CuecardError>(())
//! ```

#![warn(missing_docs)]

mod filename;
mod frontmatter;
mod import;
mod library;
mod prompt;
mod substitution;
mod validation;
mod watcher;

pub use cuecard_common::{CuecardError, Result};

// Re-export prompt types
pub use prompt::{InputMode, Prompt};

// Re-export frontmatter functions
pub use frontmatter::{has_frontmatter, parse_frontmatter_only, parse_prompt, split_frontmatter};

// Re-export validation types
pub use validation::{DirectoryValidation, FileValidation, ValidationIssue, ValidationLevel};

// Re-export substitution functions
pub use substitution::{
    contains_any_variable, contains_variable, extract_variables, substitute, substitute_at,
    substitute_with_values, validate_variables, VariableResolver, BUILTIN_VARIABLES,
};

// Re-export library operations
pub use filename::generate_filename;
pub use library::{
    color_index_for_group, create_prompt_file, delete_prompt, duplicate_prompt, filter_prompts,
    find_prompt, group_prompts, load_directory, load_file, sorted_group_names, validate_directory,
    GroupedPrompts,
};

// Re-export import functions
pub use import::{import_directory, import_file, sample_prompt, ImportMetadata, ImportSummary};

// Re-export watcher types
pub use watcher::{DirectoryWatcher, ReloadCallback, WatcherState, DEFAULT_DEBOUNCE};
