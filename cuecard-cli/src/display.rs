//! Display objects for command output
//!
//! Rows derive `Serialize` so the same data backs table, JSON and YAML output.

use colored::{Color, Colorize};
use comfy_table::{presets::UTF8_FULL, Table};
use cuecard_prompts::{color_index_for_group, GroupedPrompts, Prompt};
use serde::Serialize;

/// Palette indexed by [`color_index_for_group`]
const GROUP_COLORS: [Color; 8] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightRed,
    Color::BrightBlue,
];

/// One prompt in list output
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PromptRow {
    pub title: String,
    pub alias: String,
    pub description: String,
    pub input: String,
    pub file: String,
}

/// One prompt in verbose list output
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VerbosePromptRow {
    pub title: String,
    pub alias: String,
    pub description: String,
    pub input: String,
    pub tags: String,
    pub variables: String,
    pub file: String,
}

impl From<&Prompt> for PromptRow {
    fn from(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            alias: prompt.alias.clone(),
            description: prompt.description.clone(),
            input: prompt.input.as_str().to_string(),
            file: prompt.file_name.clone().unwrap_or_default(),
        }
    }
}

impl From<&Prompt> for VerbosePromptRow {
    fn from(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            alias: prompt.alias.clone(),
            description: prompt.description.clone(),
            input: prompt.input.as_str().to_string(),
            tags: prompt.tags.join(", "),
            variables: prompt.variables().join(", "),
            file: prompt.file_name.clone().unwrap_or_default(),
        }
    }
}

/// A named section of the grouped view
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GroupSection {
    pub name: String,
    pub color_index: i32,
    pub prompts: Vec<PromptRow>,
}

/// The grouped view in the order it is shown
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GroupedView {
    pub favorites: Vec<PromptRow>,
    pub groups: Vec<GroupSection>,
    pub ungrouped: Vec<PromptRow>,
}

impl GroupedView {
    /// Sections with named groups in name order
    pub fn from_grouped(grouped: &GroupedPrompts<'_>) -> Self {
        let groups = grouped
            .group_names()
            .into_iter()
            .map(|name| {
                let prompts = grouped.groups.get(&name).map(|p| rows(p)).unwrap_or_default();
                GroupSection {
                    color_index: color_index_for_group(&name),
                    name,
                    prompts,
                }
            })
            .collect();

        Self {
            favorites: rows(&grouped.favorites),
            groups,
            ungrouped: rows(&grouped.ungrouped),
        }
    }

    /// Whether every section is empty
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.groups.is_empty() && self.ungrouped.is_empty()
    }
}

fn rows(prompts: &[&Prompt]) -> Vec<PromptRow> {
    prompts.iter().map(|prompt| PromptRow::from(*prompt)).collect()
}

/// Group name colored with its palette entry
pub fn colored_group_name(name: &str) -> String {
    match usize::try_from(color_index_for_group(name)) {
        Ok(index) => name.color(GROUP_COLORS[index]).bold().to_string(),
        Err(_) => name.to_string(),
    }
}

/// Create a table with given headers and row mapper function
pub fn create_table<'a, T, F>(items: &'a [T], headers: Vec<&str>, row_mapper: F) -> Table
where
    F: Fn(&'a T) -> Vec<&'a str>,
{
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers);

    for item in items {
        table.add_row(row_mapper(item));
    }

    table
}

/// Table of prompt rows
pub fn prompt_table(rows: &[PromptRow]) -> Table {
    create_table(
        rows,
        vec!["Title", "Alias", "Description", "Input", "File"],
        |row| {
            vec![
                &row.title,
                &row.alias,
                &row.description,
                &row.input,
                &row.file,
            ]
        },
    )
}

/// Table of verbose prompt rows
pub fn verbose_prompt_table(rows: &[VerbosePromptRow]) -> Table {
    create_table(
        rows,
        vec![
            "Title",
            "Alias",
            "Description",
            "Input",
            "Tags",
            "Variables",
            "File",
        ],
        |row| {
            vec![
                &row.title,
                &row.alias,
                &row.description,
                &row.input,
                &row.tags,
                &row.variables,
                &row.file,
            ]
        },
    )
}
