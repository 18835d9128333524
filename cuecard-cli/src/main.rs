use std::process;

use clap::Parser;
use cuecard_cli::cli::{Cli, Commands};
use cuecard_cli::commands;
use cuecard_cli::commands::import::handle_command as handle_import;
use cuecard_cli::commands::init::InitArgs;
use cuecard_cli::commands::new::NewPromptArgs;
use cuecard_cli::commands::render::RenderArgs;
use cuecard_cli::context::CliContext;
use cuecard_cli::error::{handle_cli_result, CliResult};
use cuecard_cli::logging::configure_logging;
use cuecard_config::ConfigProvider;
use cuecard_prompts::ImportMetadata;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = handle_cli_result(run(cli).await);
    process::exit(exit_code);
}

async fn run(cli: Cli) -> CliResult<i32> {
    let provider = ConfigProvider::new();
    let context = || -> anyhow::Result<CliContext> {
        let context = CliContext::new(
            &provider,
            cli.prompts_dir.clone(),
            cli.format,
            cli.verbose,
            cli.quiet,
        )?;
        tracing::debug!("Using prompts directory {}", context.prompts_dir.display());
        Ok(context)
    };

    let result = match cli.command {
        Commands::Init {
            editor,
            sample,
            force,
        } => {
            let args = InitArgs {
                prompts_dir: cli.prompts_dir.clone(),
                editor,
                sample,
                force,
            };
            commands::init::handle_command(args, &provider, cli.quiet)
        }
        Commands::List { query } => commands::list::handle_command(query.as_deref(), &context()?),
        Commands::Show { key } => commands::show::handle_command(&key, &context()?),
        Commands::Render {
            key,
            input,
            clipboard,
            file,
            vars,
        } => {
            let args = RenderArgs {
                input,
                clipboard,
                file,
                vars,
            };
            commands::render::handle_command(&key, args, &context()?)
        }
        Commands::New {
            title,
            description,
            group,
            tags,
            alias,
            input,
            input_hint,
            content,
        } => {
            let args = NewPromptArgs {
                title,
                description,
                group,
                tags,
                alias,
                input: input.map(Into::into),
                input_hint,
                content,
            };
            commands::new::handle_command(args, &context()?)
        }
        Commands::Duplicate { key } => commands::manage::handle_duplicate(&key, &context()?),
        Commands::Delete { key } => commands::manage::handle_delete(&key, &context()?),
        Commands::Favorite { key, off } => {
            commands::manage::handle_favorite(&key, off, &context()?)
        }
        Commands::Validate => commands::validate::handle_command(&context()?),
        Commands::Import { path, title, group } => {
            handle_import(&path, ImportMetadata { title, group }, &context()?)
        }
        Commands::Watch => commands::watch::handle_command(&context()?).await,
    };

    Ok(result?)
}
