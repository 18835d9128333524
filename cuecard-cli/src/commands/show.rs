//! Show command implementation

use crate::context::CliContext;
use crate::display::colored_group_name;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use colored::Colorize;
use cuecard_prompts::Prompt;

/// Print one prompt's metadata followed by its content
pub fn handle_command(key: &str, context: &CliContext) -> Result<i32> {
    let prompt = context.find(key)?;

    if context.print_structured(&prompt)? {
        return Ok(EXIT_SUCCESS);
    }

    print!("{}", format_prompt(&prompt));
    Ok(EXIT_SUCCESS)
}

/// Human-readable rendering used for table output
pub fn format_prompt(prompt: &Prompt) -> String {
    let mut out = String::new();
    let title = if prompt.favorite {
        format!("★ {}", prompt.title)
    } else {
        prompt.title.clone()
    };
    out.push_str(&format!("{}\n", title.bold()));

    let mut field = |name: &str, value: String| {
        if !value.is_empty() {
            out.push_str(&format!("{} {}\n", format!("{name}:").dimmed(), value));
        }
    };
    field("Description", prompt.description.clone());
    field("Group", colored_group_name(&prompt.group));
    field("Tags", prompt.tags.join(", "));
    field("Alias", prompt.alias.clone());
    field("Input", prompt.input.to_string());
    field("Input hint", prompt.input_hint.clone());
    field("Variables", prompt.variables().join(", "));
    field("File", prompt.file_name.clone().unwrap_or_default());

    out.push('\n');
    out.push_str(&prompt.content);
    out.push('\n');
    out
}
