//! The prompt entity
//!
//! A [`Prompt`] is one markdown file in the prompts directory: YAML metadata
//! plus a body that may contain `${NAME}` placeholders.

use crate::frontmatter;
use crate::library::write_file_atomically;
use crate::substitution;
use crate::validation::ValidationIssue;
use cuecard_common::{CuecardError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// How a prompt collects user input before it is rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// No input is collected
    #[default]
    None,
    /// Input is offered but may be left empty
    Optional,
    /// Input must be provided
    Required,
    /// A value outside the three recognized ones, kept verbatim for validation
    Unrecognized(String),
}

impl InputMode {
    /// Parse the on-disk representation
    pub fn parse(value: &str) -> Self {
        match value {
            "" => InputMode::None,
            "optional" => InputMode::Optional,
            "required" => InputMode::Required,
            other => InputMode::Unrecognized(other.to_string()),
        }
    }

    /// The on-disk representation
    pub fn as_str(&self) -> &str {
        match self {
            InputMode::None => "",
            InputMode::Optional => "optional",
            InputMode::Required => "required",
            InputMode::Unrecognized(value) => value,
        }
    }

    /// Whether this is one of `""`, `optional` or `required`
    pub fn is_recognized(&self) -> bool {
        !matches!(self, InputMode::Unrecognized(_))
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for InputMode {
    fn from(value: &str) -> Self {
        InputMode::parse(value)
    }
}

impl Serialize for InputMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InputMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(InputMode::parse(value.as_deref().unwrap_or_default()))
    }
}

/// A prompt loaded from, or destined for, a markdown file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Display title, also the default sort key
    pub title: String,
    /// Short description shown under the title
    pub description: String,
    /// Group name; empty means ungrouped
    pub group: String,
    /// Free-form tags used by search
    pub tags: Vec<String>,
    /// Quick-access lookup key
    pub alias: String,
    /// Input collection mode
    pub input: InputMode,
    /// Placeholder text shown when input is collected
    pub input_hint: String,
    /// Whether the prompt is pinned to the favorites bucket
    pub favorite: bool,
    /// Body after the metadata block, trimmed
    pub content: String,
    /// Full path of the backing file, once bound
    pub file_path: Option<PathBuf>,
    /// File name of the backing file, once bound
    pub file_name: Option<String>,
}

impl Prompt {
    /// Create an unsaved prompt with a title and body
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Set the input mode
    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }

    /// Set the input hint
    pub fn with_input_hint(mut self, hint: impl Into<String>) -> Self {
        self.input_hint = hint.into();
        self
    }

    /// Set the favorite flag
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Bind the prompt to a file on disk
    pub fn bind(&mut self, path: PathBuf) {
        self.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.file_path = Some(path);
    }

    /// Whether the prompt is backed by a file
    pub fn is_bound(&self) -> bool {
        self.file_path.is_some()
    }

    /// True iff input is required
    pub fn requires_input(&self) -> bool {
        self.input == InputMode::Required
    }

    /// True iff input is optional
    pub fn has_optional_input(&self) -> bool {
        self.input == InputMode::Optional
    }

    /// True iff input is required or optional
    pub fn has_input(&self) -> bool {
        self.requires_input() || self.has_optional_input()
    }

    /// True if the content contains any `${` sequence
    pub fn has_variables(&self) -> bool {
        self.content.contains("${")
    }

    /// Variable names used in the content, deduplicated in first-seen order
    pub fn variables(&self) -> Vec<String> {
        substitution::extract_variables(&self.content)
    }

    /// Check the prompt's metadata. Never fails; an empty list means valid.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.title.is_empty() {
            issues.push(ValidationIssue::error("missing required field: title"));
        }

        if let InputMode::Unrecognized(value) = &self.input {
            issues.push(ValidationIssue::error(format!(
                "invalid input value: {value:?} (must be 'required' or 'optional')"
            )));
        }

        if self.description.is_empty() {
            issues.push(ValidationIssue::warning("missing description"));
        }

        issues
    }

    /// Render the prompt as a markdown document with a metadata block
    pub fn to_markdown(&self) -> Result<String> {
        frontmatter::render_markdown(self)
    }

    /// Set the favorite flag and rewrite the backing file.
    ///
    /// If the write fails the flag is restored, so the in-memory value keeps
    /// matching what is on disk.
    pub fn update_favorite(&mut self, favorite: bool) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or_else(|| CuecardError::not_bound("update favorite"))?;

        let previous = self.favorite;
        self.favorite = favorite;

        let written = self
            .to_markdown()
            .and_then(|markdown| write_file_atomically(&path, &markdown, true));

        if let Err(e) = written {
            self.favorite = previous;
            return Err(e);
        }

        tracing::info!(
            "Set favorite={} on {}",
            favorite,
            self.file_name.as_deref().unwrap_or_default()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationLevel;
    use crate::frontmatter::parse_prompt;
    use tempfile::TempDir;

    #[test]
    fn test_input_mode_queries() {
        let required = Prompt::new("a", "").with_input(InputMode::Required);
        assert!(required.requires_input());
        assert!(!required.has_optional_input());
        assert!(required.has_input());

        let optional = Prompt::new("a", "").with_input(InputMode::Optional);
        assert!(!optional.requires_input());
        assert!(optional.has_optional_input());
        assert!(optional.has_input());

        let none = Prompt::new("a", "");
        assert!(!none.has_input());

        let odd = Prompt::new("a", "").with_input(InputMode::parse("sometimes"));
        assert!(!odd.has_input());
    }

    #[test]
    fn test_input_mode_parse() {
        assert_eq!(InputMode::parse(""), InputMode::None);
        assert_eq!(InputMode::parse("optional"), InputMode::Optional);
        assert_eq!(InputMode::parse("required"), InputMode::Required);
        assert_eq!(
            InputMode::parse("Required"),
            InputMode::Unrecognized("Required".to_string())
        );
        assert!(!InputMode::parse("maybe").is_recognized());
        assert_eq!(InputMode::Optional.to_string(), "optional");
    }

    #[test]
    fn test_has_variables() {
        assert!(Prompt::new("a", "Hello ${INPUT}").has_variables());
        assert!(Prompt::new("a", "cost: ${").has_variables());
        assert!(!Prompt::new("a", "Hello $INPUT").has_variables());
    }

    #[test]
    fn test_variables_deduplicated_in_order() {
        let prompt = Prompt::new("a", "${DATE} ${INPUT} ${DATE} ${lower} ${MY_VAR}");
        assert_eq!(prompt.variables(), vec!["DATE", "INPUT", "MY_VAR"]);
    }

    #[test]
    fn test_validate_valid_prompt() {
        let prompt = Prompt::new("Title", "body").with_description("desc");
        assert!(prompt.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let prompt = Prompt::new("", "body").with_input(InputMode::parse("always"));
        let issues = prompt.validate();

        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].level, ValidationLevel::Error);
        assert_eq!(issues[0].message, "missing required field: title");
        assert_eq!(issues[1].level, ValidationLevel::Error);
        assert_eq!(
            issues[1].message,
            "invalid input value: \"always\" (must be 'required' or 'optional')"
        );
        assert_eq!(issues[2].level, ValidationLevel::Warning);
        assert_eq!(issues[2].message, "missing description");
    }

    #[test]
    fn test_bind_sets_file_name() {
        let mut prompt = Prompt::new("a", "b");
        assert!(!prompt.is_bound());
        prompt.bind(PathBuf::from("/tmp/prompts/code-review.md"));
        assert!(prompt.is_bound());
        assert_eq!(prompt.file_name.as_deref(), Some("code-review.md"));
    }

    #[test]
    fn test_update_favorite_requires_file() {
        let mut prompt = Prompt::new("a", "b");
        let result = prompt.update_favorite(true);
        assert!(matches!(result, Err(CuecardError::PromptNotBound { .. })));
        assert!(!prompt.favorite);
    }

    #[test]
    fn test_update_favorite_rewrites_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("review.md");
        std::fs::write(&path, "---\ntitle: Review\n---\nCheck this").unwrap();

        let mut prompt = parse_prompt(&std::fs::read_to_string(&path).unwrap()).unwrap();
        prompt.bind(path.clone());
        prompt.update_favorite(true).unwrap();

        let reloaded = parse_prompt(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(reloaded.favorite);
        assert_eq!(reloaded.title, "Review");
        assert_eq!(reloaded.content, "Check this");

        prompt.update_favorite(false).unwrap();
        let reloaded = parse_prompt(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(!reloaded.favorite);
    }

    #[test]
    fn test_update_favorite_restores_flag_on_failure() {
        let temp = TempDir::new().unwrap();
        let mut prompt = Prompt::new("a", "b");
        prompt.bind(temp.path().join("missing-dir").join("a.md"));

        assert!(prompt.update_favorite(true).is_err());
        assert!(!prompt.favorite);
    }
}
