//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eventlink_core::TracingOutputFormat;

/// eventlink - Turn a sentence into a Google Calendar event
#[derive(Debug, Parser)]
#[command(name = "eventlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Log filter directive, e.g. `eventlink_providers=trace` (overrides RUST_LOG)
    #[arg(long, value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    // --- Extraction flags ---
    /// Model to use instead of `default_model` (see `eventlink models`)
    #[arg(long, short)]
    pub model: Option<String>,

    /// API key to use instead of the configured one
    #[arg(long, env = "EVENTLINK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Read the text from the clipboard
    #[arg(long)]
    pub clipboard: bool,

    // --- Output flags ---
    /// Print the calendar link instead of opening it
    #[arg(long)]
    pub print: bool,

    /// Also copy the calendar link to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Text describing the event (read from stdin when omitted)
    ///
    /// Text whose first word is a command name (`config`, `models`) must be
    /// quoted, given after `--`, or piped on stdin.
    pub text: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List the supported models
    Models,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration (API key redacted)
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,

    /// Open the configuration file in the default editor
    Edit,

    /// Save the API key
    SetKey {
        /// Plain key, or a reference such as `env::OPENAI_API_KEY`
        key: String,
    },

    /// Save the default model
    SetModel {
        /// One of the ids listed by `eventlink models`
        model: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Json => Self::Json,
        }
    }
}
