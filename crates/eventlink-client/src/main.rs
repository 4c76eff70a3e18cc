//! eventlink CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use eventlink_client::cli::{Cli, Command, ConfigAction};
use eventlink_client::commands::{self, extract::ExtractOptions};
use eventlink_client::config::ClientConfig;
use eventlink_client::error::{ClientError, ClientResult};
use eventlink_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ClientConfig::default_path);
    let config = match load_config(cli.config.is_some(), &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut tracing_config =
        TracingConfig::cli(cli.debug || config.debug).with_format(cli.log_format.into());
    if let Some(directive) = cli.log_filter.as_deref() {
        tracing_config = tracing_config.with_env_filter(directive);
    }
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }
    debug!(path = %config_path.display(), "configuration loaded");

    match run(cli, config, config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// An explicit `--config` must exist; the default path is optional.
fn load_config(explicit: bool, path: &Path) -> ClientResult<ClientConfig> {
    if explicit || path.exists() {
        ClientConfig::load_from(path).map_err(ClientError::Config)
    } else {
        Ok(ClientConfig::default())
    }
}

async fn run(cli: Cli, config: ClientConfig, config_path: PathBuf) -> ClientResult<()> {
    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Edit => commands::config::edit(&config_path),
            ConfigAction::SetKey { key } => commands::config::set_key(&config_path, &key),
            ConfigAction::SetModel { model } => commands::config::set_model(&config_path, &model),
        },
        Some(Command::Models) => commands::models::list(&config),
        None => {
            let options = ExtractOptions {
                text: cli.text,
                clipboard: cli.clipboard,
                model: cli.model,
                api_key: cli.api_key,
                print: cli.print,
                copy: cli.copy,
            };
            commands::extract::run(&config, &config_path, options).await
        }
    }
}
