//! YAML frontmatter parsing for prompt files
//!
//! A prompt file optionally starts with a metadata block delimited by `---`
//! lines, followed by the prompt body:
//!
//! ```markdown
//! ---
//! title: Code Review
//! group: Development
//! tags: [review, code]
//! ---
//! Review the following code: ${CLIPBOARD}
//! ```
//!
//! A document without an opening delimiter is all body. A document that opens
//! a block but never closes it is an error.

use crate::prompt::{InputMode, Prompt};
use cuecard_common::{CuecardError, Result};
use serde::{Deserialize, Deserializer, Serialize};

const DELIMITER: &str = "---";

/// Metadata keys as they appear in the YAML block
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PromptMetadata {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    description: String,
    #[serde(deserialize_with = "null_as_default")]
    group: String,
    #[serde(deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    alias: String,
    input: InputMode,
    #[serde(deserialize_with = "null_as_default")]
    input_hint: String,
    #[serde(deserialize_with = "null_as_default")]
    favorite: bool,
}

impl From<PromptMetadata> for Prompt {
    fn from(metadata: PromptMetadata) -> Self {
        Prompt {
            title: metadata.title,
            description: metadata.description,
            group: metadata.group,
            tags: metadata.tags,
            alias: metadata.alias,
            input: metadata.input,
            input_hint: metadata.input_hint,
            favorite: metadata.favorite,
            ..Prompt::default()
        }
    }
}

/// Keys written back to disk, in their fixed order
#[derive(Serialize)]
struct MetadataRecord<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    group: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "str::is_empty")]
    alias: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    input: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    input_hint: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    favorite: bool,
}

impl<'a> From<&'a Prompt> for MetadataRecord<'a> {
    fn from(prompt: &'a Prompt) -> Self {
        Self {
            title: &prompt.title,
            description: &prompt.description,
            group: &prompt.group,
            tags: &prompt.tags,
            alias: &prompt.alias,
            input: prompt.input.as_str(),
            input_hint: &prompt.input_hint,
            favorite: prompt.favorite,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A present-but-empty key (`description:`) decodes as the default value
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Split a document into its raw metadata block and its body.
///
/// The input is trimmed first. Returns `None` for the block when the document
/// does not open with a delimiter line. The body is returned untrimmed.
pub fn split_frontmatter(raw: &str) -> Result<(Option<&str>, &str)> {
    let content = raw.trim();

    let Some(after_open) = strip_opening_delimiter(content) else {
        return Ok((None, content));
    };

    let (block_end, body_start) =
        find_closing_delimiter(after_open).ok_or(CuecardError::MissingClosingDelimiter)?;

    Ok((Some(&after_open[..block_end]), &after_open[body_start..]))
}

/// Returns the text after the opening delimiter line, if the content has one
fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let (first_line, rest) = match content.find('\n') {
        Some(idx) => (&content[..idx], &content[idx + 1..]),
        None => (content, ""),
    };

    (first_line.trim_end() == DELIMITER).then_some(rest)
}

/// Find the closing `---` line.
///
/// Returns the byte offset where the line starts and the offset just past its
/// line ending.
fn find_closing_delimiter(content: &str) -> Option<(usize, usize)> {
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((offset, offset + line.len()));
        }
        offset += line.len();
    }

    None
}

fn decode_metadata(block: &str) -> Result<Prompt> {
    if block.trim().is_empty() {
        return Ok(Prompt::default());
    }

    serde_yaml_ng::from_str::<PromptMetadata>(block)
        .map(Prompt::from)
        .map_err(|source| CuecardError::InvalidMetadata { source })
}

/// Parse a prompt document into a [`Prompt`] with metadata and content.
///
/// The returned prompt is not bound to any file.
pub fn parse_prompt(raw: &str) -> Result<Prompt> {
    let (block, body) = split_frontmatter(raw)?;

    let mut prompt = match block {
        Some(block) => decode_metadata(block)?,
        None => Prompt::default(),
    };
    prompt.content = body.trim().to_string();

    Ok(prompt)
}

/// Check whether a document has a complete metadata block, without decoding it
pub fn has_frontmatter(raw: &str) -> bool {
    matches!(split_frontmatter(raw), Ok((Some(_), _)))
}

/// Decode only the metadata block. Fails if the document has none.
pub fn parse_frontmatter_only(raw: &str) -> Result<Prompt> {
    match split_frontmatter(raw)? {
        (Some(block), _) if !block.trim().is_empty() => decode_metadata(block),
        _ => Err(CuecardError::NoFrontmatter),
    }
}

/// Render a prompt as a markdown document
pub(crate) fn render_markdown(prompt: &Prompt) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(&MetadataRecord::from(prompt))?;
    Ok(format!(
        "{DELIMITER}\n{yaml}{DELIMITER}\n\n{}",
        prompt.content
    ))
}
