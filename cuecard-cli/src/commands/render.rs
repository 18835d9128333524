//! Render command implementation

use crate::context::CliContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::{bail, Result};
use cuecard_prompts::{substitute, Prompt, VariableResolver, BUILTIN_VARIABLES};
use std::collections::HashMap;

/// Values supplied on the command line for one render
#[derive(Debug, Default, Clone)]
pub struct RenderArgs {
    pub input: Option<String>,
    pub clipboard: Option<String>,
    pub file: Option<String>,
    pub vars: Vec<String>,
}

/// Print the prompt with its variables substituted
pub fn handle_command(key: &str, args: RenderArgs, context: &CliContext) -> Result<i32> {
    let prompt = context.find(key)?;
    let rendered = render_prompt(&prompt, args)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(EXIT_SUCCESS)
}

/// Substitute `--var` values and the built-in variables in one pass.
pub fn render_prompt(prompt: &Prompt, args: RenderArgs) -> Result<String> {
    if prompt.requires_input() && args.input.as_deref().map_or(true, str::is_empty) {
        let hint = if prompt.input_hint.is_empty() {
            String::new()
        } else {
            format!(" ({})", prompt.input_hint)
        };
        bail!("\"{}\" requires input{hint}; pass --input", prompt.title);
    }

    let values = parse_vars(&args.vars)?;
    let mut resolver = VariableResolver::new()
        .with_input(args.input.unwrap_or_default())
        .with_clipboard(args.clipboard.unwrap_or_default())
        .with_values(values);
    if let Some(file) = args.file {
        resolver = resolver.with_file_selector(move || file.clone());
    }

    Ok(substitute(&prompt.content, Some(&resolver)))
}

/// Parse `NAME=VALUE` pairs. Built-in names have their own flags.
pub fn parse_vars(vars: &[String]) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for var in vars {
        let Some((name, value)) = var.split_once('=') else {
            bail!("invalid --var \"{var}\": expected NAME=VALUE");
        };
        if name.is_empty() {
            bail!("invalid --var \"{var}\": empty name");
        }
        match name {
            "INPUT" | "CLIPBOARD" | "FILE" => bail!(
                "${{{name}}} is a built-in variable; use --{} instead",
                name.to_lowercase()
            ),
            _ if BUILTIN_VARIABLES.contains(&name) => {
                bail!("${{{name}}} is a built-in variable and cannot be set")
            }
            _ => {}
        }
        values.insert(name.to_string(), value.to_string());
    }
    Ok(values)
}
