use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tdo_core::auth::{CredentialResolver, TOKEN_ENV_VAR};
use tdo_core::client::TodoistClient;
use tdo_core::error::{AuthError, CoreError};

use cli::Commands;
use commands::PartialCreation;
use config::Config;
use views::Theme;

mod cli;
mod commands;
mod config;
mod logging;
mod views;

const USAGE_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let theme = Theme::new(!cli.no_color);
            return handle_error(e.into(), theme, cli.verbose);
        }
    };
    if let Some(token_path) = &cli.token_path {
        config.token_path = Some(token_path.clone());
    }
    config.verbose |= cli.verbose;
    config.use_colors &= !cli.no_color;

    logging::init(config.verbose, config.use_colors);
    let theme = Theme::new(config.use_colors);

    match run(cli.resolved_command(), &config, theme).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(e, theme, config.verbose),
    }
}

async fn run(command: Commands, config: &Config, theme: Theme) -> Result<()> {
    let (token, source) = CredentialResolver::new(config.token_path.clone())
        .resolve()
        .map_err(CoreError::from)?;
    tracing::debug!(?source, "resolved API token");
    let client = TodoistClient::with_base_url(token, &config.api_url)?;

    match command {
        Commands::List(command) => commands::list::list_tasks(&client, command, theme).await,
        Commands::Add(command) => commands::add::add_task(&client, command, config, theme).await,
        Commands::Complete(command) => {
            commands::complete::complete_task(&client, command, theme).await
        }
        Commands::Delete(command) => commands::delete::delete_task(&client, command, theme).await,
        Commands::Projects => commands::projects::list_projects(&client, theme).await,
        Commands::Labels => commands::labels::list_labels(&client, theme).await,
        Commands::Reset => commands::reset::reset(&client, theme).await,
        Commands::Create(_) => unreachable!("legacy create is rewritten to add"),
    }
}

fn handle_error(err: anyhow::Error, theme: Theme, verbose: bool) -> ExitCode {
    let prefix = theme.error("Error:");
    let mut code = 1;

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::Authentication(auth) => {
                eprintln!("{} Could not retrieve API token: {}", prefix, auth);
                let hint = match auth {
                    AuthError::CommandMissing { .. } => {
                        format!("Install the 1Password CLI (`op`) or set {}.", TOKEN_ENV_VAR)
                    }
                    _ => format!(
                        "Make sure 1Password CLI is installed and you're signed in (`op signin`),\nor set the {} environment variable.",
                        TOKEN_ENV_VAR
                    ),
                };
                eprintln!("{}", theme.info(&hint));
            }
            CoreError::NotFound(s) => {
                eprintln!("{} {}", prefix, s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", prefix, s);
                code = USAGE_EXIT_CODE;
            }
            _ => {
                eprintln!("{} {}", prefix, core_error);
                if matches!(core_error.status(), Some(401 | 403)) {
                    eprintln!("{}", theme.info("Check that your Todoist API token is still valid."));
                }
            }
        }
    } else if let Some(partial) = err.downcast_ref::<PartialCreation>() {
        eprintln!("{} {}", theme.warning("Warning:"), partial);
    } else {
        eprintln!("{} {}", prefix, err);
    }

    if verbose {
        eprintln!("\n{:?}", err);
    }

    ExitCode::from(code)
}
