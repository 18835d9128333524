use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "cuecard")]
#[command(version)]
#[command(about = "Manage a library of reusable prompts stored as markdown files")]
#[command(long_about = "
cuecard manages a directory of prompts stored as markdown files with a YAML
metadata header. It lists and searches them, renders them with variables
substituted, and keeps the library tidy.

Global arguments can be used with any command:
  --prompts-dir  Use this prompts directory instead of the configured one
  --format       Set output format (table, json, yaml)
  --verbose      Show detailed information and trace output
  --debug        Enable debug logging
  --quiet        Suppress all output except errors

Example usage:
  cuecard init --prompts-dir ~/prompts --sample   # Create config and a sample prompt
  cuecard list                                    # Grouped view of all prompts
  cuecard list review                             # Prompts matching \"review\"
  cuecard render summarize --input \"$(pbpaste)\"   # Render to stdout
  cuecard --format=json validate                  # Validation report as JSON
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Prompts directory, overriding the configuration file
    #[arg(long, value_name = "DIR", global = true)]
    pub prompts_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Global output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List prompts grouped into favorites, groups and ungrouped
    #[command(long_about = "
List prompts in three sections: favorites first, then each group in name
order, then prompts without a group. Within a section prompts are sorted by
title, ignoring case.

An optional query keeps only prompts whose title, description, group or tags
contain it, ignoring case.

Examples:
  cuecard list
  cuecard list email
  cuecard --format=yaml list
")]
    List {
        /// Only show prompts matching this text
        query: Option<String>,
    },

    /// Show the metadata and content of one prompt
    Show {
        /// Alias, file name or title of the prompt
        key: String,
    },

    /// Render a prompt with its variables substituted
    #[command(long_about = "
Render a prompt to stdout with its variables substituted.

Built-in variables:
  ${INPUT}      Value of --input
  ${DATE}       Today's date, YYYY-MM-DD
  ${DATETIME}   Local date and time, YYYY-MM-DD HH:MM:SS
  ${CLIPBOARD}  Value of --clipboard
  ${FILE}       Value of --file; left as is when not given

Other ${NAME} placeholders are filled from --var NAME=VALUE.

Examples:
  cuecard render code-review --file src/main.rs
  cuecard render translate --input \"Bonjour\" --var LANGUAGE=English
")]
    Render {
        /// Alias, file name or title of the prompt
        key: String,

        /// Value for ${INPUT}
        #[arg(long)]
        input: Option<String>,

        /// Value for ${CLIPBOARD}
        #[arg(long)]
        clipboard: Option<String>,

        /// Value for ${FILE}
        #[arg(long, value_name = "PATH")]
        file: Option<String>,

        /// Custom variable as NAME=VALUE (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },

    /// Create a new prompt file
    New {
        /// Prompt title
        #[arg(long)]
        title: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Group name
        #[arg(long)]
        group: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Quick-access alias
        #[arg(long)]
        alias: Option<String>,

        /// Input mode: required or optional
        #[arg(long, value_enum)]
        input: Option<InputArg>,

        /// Placeholder text for the input
        #[arg(long)]
        input_hint: Option<String>,

        /// Prompt body; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
    },

    /// Copy a prompt into a new file titled "<title> (Copy)"
    Duplicate {
        /// Alias, file name or title of the prompt
        key: String,
    },

    /// Delete a prompt file
    Delete {
        /// Alias, file name or title of the prompt
        key: String,
    },

    /// Mark a prompt as favorite, or clear the mark with --off
    Favorite {
        /// Alias, file name or title of the prompt
        key: String,

        /// Clear the favorite mark
        #[arg(long)]
        off: bool,
    },

    /// Validate every prompt file in the prompts directory
    #[command(long_about = "
Validate every prompt file in the prompts directory.

Files are reported as valid, with warnings (missing description, duplicate
title) or with errors (unparseable metadata, missing title, unknown input
mode).

Exit codes:
  0  all files valid
  1  at least one file has errors
  2  warnings only
")]
    Validate,

    /// Import a markdown file or a directory of prompt files
    #[command(long_about = "
Import prompts into the prompts directory.

A file with a metadata header keeps its metadata (the favorite mark is
cleared). A plain file becomes the body of a new prompt titled with --title or
the file name.

A directory imports every .md file with a metadata header. Other files are
counted as skipped.
")]
    Import {
        /// File or directory to import
        path: PathBuf,

        /// Title for a plain file without a metadata header
        #[arg(long)]
        title: Option<String>,

        /// Group for a plain file without a metadata header
        #[arg(long)]
        group: Option<String>,
    },

    /// Write the configuration file and create the prompts directory
    #[command(long_about = "
Write ~/.config/cuecard/config.yaml pointing at the prompts directory given
with --prompts-dir, and create that directory.

Examples:
  cuecard init --prompts-dir ~/prompts
  cuecard init --prompts-dir ~/prompts --editor nvim --sample
")]
    Init {
        /// Editor command stored in the configuration
        #[arg(long)]
        editor: Option<String>,

        /// Also create the sample \"Hello World\" prompt
        #[arg(long)]
        sample: bool,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Watch the prompts directory and reload on every change
    Watch,
}

/// Input mode accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum InputArg {
    Required,
    Optional,
}

impl From<InputArg> for cuecard_prompts::InputMode {
    fn from(arg: InputArg) -> Self {
        match arg {
            InputArg::Required => cuecard_prompts::InputMode::Required,
            InputArg::Optional => cuecard_prompts::InputMode::Optional,
        }
    }
}
