//! API key references.
//!
//! `api_key` may hold the key itself or point at it:
//!
//! - `pass::ai/openai` reads the first line of `pass show ai/openai`
//! - `env::OPENAI_API_KEY` reads the environment variable
//!
//! Keys are resolved on every settings load and never written back.

use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("environment variable `{0}` is not set")]
    MissingEnv(String),

    #[error("failed to run `pass show {path}`: {source}")]
    PassUnavailable {
        path: String,
        source: std::io::Error,
    },

    #[error("`pass show {path}` failed: {stderr}")]
    PassFailed { path: String, stderr: String },

    #[error("`pass show {0}` produced no output")]
    PassEmpty(String),
}

/// Where an `api_key` value points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretRef<'a> {
    Pass(&'a str),
    Env(&'a str),
    Plain(&'a str),
}

impl<'a> SecretRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        if let Some(path) = value.strip_prefix("pass::") {
            Self::Pass(path)
        } else if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else {
            Self::Plain(value)
        }
    }

    pub fn resolve(self) -> Result<String, SecretError> {
        match self {
            Self::Plain(key) => Ok(key.to_string()),
            Self::Env(var) => {
                std::env::var(var).map_err(|_| SecretError::MissingEnv(var.to_string()))
            }
            Self::Pass(path) => pass_show(path),
        }
    }

    /// A form that is safe to print: references as written, plain keys
    /// reduced to their last four characters.
    pub fn redacted(self) -> String {
        match self {
            Self::Pass(path) => format!("pass::{}", path),
            Self::Env(var) => format!("env::{}", var),
            Self::Plain(key) => {
                let count = key.chars().count();
                if count <= 8 {
                    "****".to_string()
                } else {
                    let tail: String = key.chars().skip(count - 4).collect();
                    format!("****{}", tail)
                }
            }
        }
    }
}

/// Resolves an `api_key` value to the key itself.
pub fn resolve(value: &str) -> Result<String, SecretError> {
    SecretRef::parse(value).resolve()
}

/// Returns a printable form of an `api_key` value.
pub fn redact(value: &str) -> String {
    SecretRef::parse(value).redacted()
}

fn pass_show(path: &str) -> Result<String, SecretError> {
    let output = Command::new("pass")
        .args(["show", path])
        .output()
        .map_err(|source| SecretError::PassUnavailable {
            path: path.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SecretError::PassFailed {
            path: path.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .ok_or_else(|| SecretError::PassEmpty(path.to_string()))
}
