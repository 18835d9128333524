//! `${NAME}` variable substitution
//!
//! Built-in variables are resolved at use time:
//!
//! | Variable | Value |
//! |----------|-------|
//! | `${INPUT}` | Text supplied by the user |
//! | `${DATE}` | Local date, `YYYY-MM-DD` |
//! | `${DATETIME}` | Local date and time, `YYYY-MM-DD HH:MM:SS` |
//! | `${CLIPBOARD}` | Clipboard snapshot taken by the caller |
//! | `${FILE}` | Path returned by the caller's file selector |
//!
//! Substitution is a single scan. Replacement text is never scanned again, so a
//! clipboard containing `${DATE}` is inserted literally. Caller-defined values
//! set on the resolver are replaced in the same scan.

use chrono::{Local, NaiveDateTime};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Names substituted by [`substitute`]
pub const BUILTIN_VARIABLES: &[&str] = &["INPUT", "DATE", "DATETIME", "CLIPBOARD", "FILE"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Upper-case variable pattern regex
static VARIABLE_REGEX: OnceLock<Regex> = OnceLock::new();

/// `${...}` token regex; a token never spans another `${`
static ANY_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn variable_regex() -> &'static Regex {
    VARIABLE_REGEX.get_or_init(|| Regex::new(r"\$\{([A-Z_]+)\}").expect("Invalid variable regex"))
}

fn any_key_regex() -> &'static Regex {
    ANY_KEY_REGEX.get_or_init(|| Regex::new(r"\$\{([^${}]*)\}").expect("Invalid key regex"))
}

/// Values available to [`substitute`]
///
/// The file selector is a capability: when it is absent `${FILE}` is left as
/// is, when present it is called at most once per substitution and only if
/// the content actually uses `${FILE}`.
#[derive(Default)]
pub struct VariableResolver {
    /// Value for `${INPUT}`
    pub input: String,
    /// Value for `${CLIPBOARD}`
    pub clipboard: String,
    /// Produces the value for `${FILE}`
    pub file_selector: Option<Box<dyn Fn() -> String + Send + Sync>>,
    /// Values for caller-defined names; built-in names take precedence
    pub values: HashMap<String, String>,
}

impl VariableResolver {
    /// An empty resolver without a file selector
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `${INPUT}` value
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the `${CLIPBOARD}` value
    pub fn with_clipboard(mut self, clipboard: impl Into<String>) -> Self {
        self.clipboard = clipboard.into();
        self
    }

    /// Set caller-defined `${KEY}` values
    pub fn with_values(mut self, values: HashMap<String, String>) -> Self {
        self.values = values;
        self
    }

    /// Supply the `${FILE}` selector
    pub fn with_file_selector<F>(mut self, selector: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.file_selector = Some(Box::new(selector));
        self
    }
}

impl fmt::Debug for VariableResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableResolver")
            .field("input", &self.input)
            .field("clipboard", &self.clipboard)
            .field("file_selector", &self.file_selector.is_some())
            .field("values", &self.values)
            .finish()
    }
}

/// Replace built-in variables using the current local time
pub fn substitute(content: &str, resolver: Option<&VariableResolver>) -> String {
    substitute_at(content, resolver, Local::now().naive_local())
}

/// Replace built-in variables and resolver values, using `now` for `${DATE}`
/// and `${DATETIME}`
pub fn substitute_at(
    content: &str,
    resolver: Option<&VariableResolver>,
    now: NaiveDateTime,
) -> String {
    let empty = VariableResolver::default();
    let resolver = resolver.unwrap_or(&empty);
    let mut selected_file: Option<String> = None;

    any_key_regex()
        .replace_all(content, |caps: &Captures| {
            let token = &caps[0];
            match &caps[1] {
                "INPUT" => resolver.input.clone(),
                "CLIPBOARD" => resolver.clipboard.clone(),
                "DATE" => now.format(DATE_FORMAT).to_string(),
                "DATETIME" => now.format(DATETIME_FORMAT).to_string(),
                "FILE" => match &resolver.file_selector {
                    Some(selector) => selected_file.get_or_insert_with(|| selector()).clone(),
                    None => token.to_string(),
                },
                name => match resolver.values.get(name) {
                    Some(value) => value.clone(),
                    None => token.to_string(),
                },
            }
        })
        .into_owned()
}

/// Replace `${KEY}` with caller-supplied values. Unmapped keys stay as they are.
pub fn substitute_with_values(content: &str, values: &HashMap<String, String>) -> String {
    any_key_regex()
        .replace_all(content, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Variable names in first-seen order, without duplicates
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in variable_regex().captures_iter(content) {
        let name = &caps[1];
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Whether `${name}` appears literally in the content
pub fn contains_variable(content: &str, name: &str) -> bool {
    content.contains(&format!("${{{name}}}"))
}

/// Whether the content uses any variable
pub fn contains_any_variable(content: &str) -> bool {
    variable_regex().is_match(content)
}

/// Variables used in the content that are not built-in
pub fn validate_variables(content: &str) -> Vec<String> {
    extract_variables(content)
        .into_iter()
        .filter(|name| !BUILTIN_VARIABLES.contains(&name.as_str()))
        .collect()
}
