//! List command implementation

use crate::context::CliContext;
use crate::display::{
    colored_group_name, prompt_table, verbose_prompt_table, GroupedView, PromptRow,
    VerbosePromptRow,
};
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use colored::Colorize;
use cuecard_prompts::{filter_prompts, group_prompts, Prompt};

/// Show the grouped view, filtered by `query` when given
pub fn handle_command(query: Option<&str>, context: &CliContext) -> Result<i32> {
    tracing::debug!("Starting list command");

    let prompts = context.load_prompts()?;
    let matching: Vec<Prompt> = filter_prompts(&prompts, query.unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    let grouped = group_prompts(&matching);
    let view = GroupedView::from_grouped(&grouped);

    if context.print_structured(&view)? {
        return Ok(EXIT_SUCCESS);
    }

    if view.is_empty() {
        match query {
            Some(query) if !prompts.is_empty() => println!("No prompts match \"{query}\""),
            _ => println!("No prompts in {}", context.prompts_dir.display()),
        }
        return Ok(EXIT_SUCCESS);
    }

    println!("Prompts: {}", matching.len());

    if !grouped.favorites.is_empty() {
        print_section(
            &"★ Favorites".yellow().bold().to_string(),
            &grouped.favorites,
            context.verbose,
        );
    }

    for name in grouped.group_names() {
        if let Some(members) = grouped.groups.get(&name) {
            print_section(&colored_group_name(&name), members, context.verbose);
        }
    }

    if !grouped.ungrouped.is_empty() {
        print_section(
            &"Ungrouped".dimmed().to_string(),
            &grouped.ungrouped,
            context.verbose,
        );
    }

    Ok(EXIT_SUCCESS)
}

fn print_section(heading: &str, prompts: &[&Prompt], verbose: bool) {
    println!();
    println!("{heading} ({})", prompts.len());

    if verbose {
        let rows: Vec<VerbosePromptRow> = prompts.iter().map(|p| (*p).into()).collect();
        println!("{}", verbose_prompt_table(&rows));
    } else {
        let rows: Vec<PromptRow> = prompts.iter().map(|p| (*p).into()).collect();
        println!("{}", prompt_table(&rows));
    }
}
