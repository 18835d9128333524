//! Duplicate, delete and favorite commands

use crate::context::CliContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use cuecard_prompts::{delete_prompt, duplicate_prompt};

/// Copy the prompt matching `key` next to the original
pub fn handle_duplicate(key: &str, context: &CliContext) -> Result<i32> {
    let prompt = context.find(key)?;
    let copy = duplicate_prompt(&prompt)?;

    context.status(format!(
        "Duplicated \"{}\" as {}",
        prompt.title,
        copy.file_name.as_deref().unwrap_or_default()
    ));
    Ok(EXIT_SUCCESS)
}

/// Delete the file of the prompt matching `key`
pub fn handle_delete(key: &str, context: &CliContext) -> Result<i32> {
    let prompt = context.find(key)?;
    delete_prompt(&prompt)?;

    context.status(format!("Deleted \"{}\"", prompt.title));
    Ok(EXIT_SUCCESS)
}

/// Set or clear the favorite flag of the prompt matching `key`
pub fn handle_favorite(key: &str, off: bool, context: &CliContext) -> Result<i32> {
    let mut prompt = context.find(key)?;
    let favorite = !off;

    if prompt.favorite == favorite {
        context.status(format!("\"{}\" is unchanged", prompt.title));
        return Ok(EXIT_SUCCESS);
    }

    prompt.update_favorite(favorite)?;
    let verb = if favorite { "Starred" } else { "Unstarred" };
    context.status(format!("{verb} \"{}\"", prompt.title));
    Ok(EXIT_SUCCESS)
}
