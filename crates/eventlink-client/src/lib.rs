//! CLI, settings, desktop integration and the extraction trigger
//!
//! This crate provides the `eventlink` command-line interface. The
//! [`trigger`] module runs the extraction pipeline against the host
//! capabilities in [`capabilities`]; [`desktop`] implements them for a
//! desktop session.

pub mod actions;
pub mod capabilities;
pub mod cli;
pub mod commands;
pub mod config;
pub mod desktop;
pub mod error;
pub mod secret;
pub mod trigger;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use trigger::{TriggerController, TriggerError, TriggerOutcome};
