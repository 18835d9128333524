//! New command implementation

use crate::context::CliContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::{bail, Context, Result};
use cuecard_prompts::{create_prompt_file, InputMode, Prompt, ValidationLevel};
use std::io::Read;

/// Fields for a new prompt as given on the command line
#[derive(Debug, Default, Clone)]
pub struct NewPromptArgs {
    pub title: String,
    pub description: Option<String>,
    pub group: Option<String>,
    pub tags: Vec<String>,
    pub alias: Option<String>,
    pub input: Option<InputMode>,
    pub input_hint: Option<String>,
    pub content: Option<String>,
}

/// Create the prompt file, reading the body from stdin when `--content` is absent
pub fn handle_command(args: NewPromptArgs, context: &CliContext) -> Result<i32> {
    let mut args = args;
    if args.content.is_none() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read prompt content from stdin")?;
        args.content = Some(content);
    }

    let prompt = build_prompt(args)?;
    let path = create_prompt_file(&context.prompts_dir, &prompt)?;
    context.status(format!("Created {}", path.display()));
    Ok(EXIT_SUCCESS)
}

/// Assemble the prompt, refusing one that would fail validation
pub fn build_prompt(args: NewPromptArgs) -> Result<Prompt> {
    let tags = args
        .tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let prompt = Prompt::new(
        args.title.trim(),
        args.content.unwrap_or_default().trim(),
    )
    .with_description(args.description.unwrap_or_default())
    .with_group(args.group.unwrap_or_default())
    .with_tags(tags)
    .with_alias(args.alias.unwrap_or_default())
    .with_input(args.input.unwrap_or_default())
    .with_input_hint(args.input_hint.unwrap_or_default());

    let errors: Vec<String> = prompt
        .validate()
        .into_iter()
        .filter(|issue| issue.level == ValidationLevel::Error)
        .map(|issue| issue.message)
        .collect();
    if !errors.is_empty() {
        bail!("invalid prompt: {}", errors.join("; "));
    }

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use cuecard_prompts::load_file;
    use tempfile::TempDir;

    fn args(title: &str) -> NewPromptArgs {
        NewPromptArgs {
            title: title.to_string(),
            content: Some("  Body ${INPUT}\n".to_string()),
            ..NewPromptArgs::default()
        }
    }

    #[test]
    fn test_build_prompt_trims_and_filters_tags() {
        let prompt = build_prompt(NewPromptArgs {
            tags: vec![" a ".to_string(), "".to_string()],
            input: Some(InputMode::Optional),
            ..args(" Title ")
        })
        .unwrap();

        assert_eq!(prompt.title, "Title");
        assert_eq!(prompt.content, "Body ${INPUT}");
        assert_eq!(prompt.tags, vec!["a"]);
        assert!(prompt.has_optional_input());
    }

    #[test]
    fn test_empty_title_rejected() {
        let error = build_prompt(args("   ")).unwrap_err();
        assert!(error.to_string().contains("missing required field: title"));
    }

    #[test]
    fn test_new_writes_file() {
        let temp = TempDir::new().unwrap();
        let context = CliContext::for_dir(temp.path(), OutputFormat::Table);

        handle_command(args("Hello World"), &context).unwrap();
        handle_command(args("Hello World"), &context).unwrap();

        let first = load_file(temp.path().join("hello-world.md")).unwrap();
        assert_eq!(first.title, "Hello World");
        assert!(temp.path().join("hello-world-2.md").exists());
    }
}
