//! Configuration commands.

use std::path::Path;

use eventlink_providers::Model;

use crate::config::{self, ClientConfig};
use crate::desktop::open_settings_file;
use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Dump the current configuration to stdout, with the API key redacted.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    println!("# config.toml ({})", path.display());
    println!("{}", render(config)?);
    Ok(())
}

fn render(config: &ClientConfig) -> ClientResult<String> {
    let mut redacted = config.clone();
    redacted.api_key = redacted.api_key.as_deref().map(secret::redact);

    toml::to_string_pretty(&redacted)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let model = Model::from_setting(config.default_model.as_deref())
        .map_err(|e| ClientError::Config(e.message().to_string()))?;
    println!("Model: {} ({})", model, model.adapter().name());

    match config.api_key.as_deref() {
        None => {
            return Err(ClientError::Config(
                "api_key is not set; run `eventlink config set-key <KEY>`".into(),
            ));
        }
        Some(raw) => {
            let key = secret::resolve(raw)
                .map_err(|e| ClientError::Config(format!("invalid api_key: {}", e)))?;
            if key.trim().is_empty() {
                return Err(ClientError::Config("api_key is empty".into()));
            }
            println!("API key: {}", secret::redact(raw));
        }
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

/// Open the configuration file in the default editor.
pub fn edit(path: &Path) -> ClientResult<()> {
    open_settings_file(path);
    Ok(())
}

/// Save the API key.
pub fn set_key(path: &Path, key: &str) -> ClientResult<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ClientError::Config("API key must not be empty".into()));
    }
    config::set_value(path, "api_key", key)?;
    println!("API key saved to {}", path.display());
    Ok(())
}

/// Save the default model after checking it is supported.
pub fn set_model(path: &Path, model: &str) -> ClientResult<()> {
    let model = model
        .parse::<Model>()
        .map_err(|e| ClientError::Config(e.message().to_string()))?;
    config::set_value(path, "default_model", model.id())?;
    println!("Default model set to {}", model);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_redacts_plain_key() {
        let config = ClientConfig {
            api_key: Some("sk-proj-abcdef123456".to_string()),
            ..Default::default()
        };
        let rendered = render(&config).unwrap();
        assert!(rendered.contains("****3456"));
        assert!(!rendered.contains("sk-proj-abcdef123456"));
    }

    #[test]
    fn render_keeps_reference() {
        let config = ClientConfig {
            api_key: Some("env::OPENAI_API_KEY".to_string()),
            ..Default::default()
        };
        assert!(render(&config).unwrap().contains("env::OPENAI_API_KEY"));
    }

    #[test]
    fn validate_rejects_unknown_model() {
        let config = ClientConfig {
            api_key: Some("sk-test-123456789".to_string()),
            default_model: Some("gpt-2".to_string()),
            ..Default::default()
        };
        assert!(matches!(validate(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn validate_requires_key() {
        assert!(validate(&ClientConfig::default()).is_err());
    }

    #[test]
    fn validate_accepts_complete_config() {
        let config = ClientConfig {
            api_key: Some("sk-test-123456789".to_string()),
            default_model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn set_model_validates_and_saves() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        assert!(set_model(&path, "gpt-5").is_err());
        assert!(!path.exists());

        set_model(&path, "gemini").unwrap();
        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("gemini"));
    }

    #[test]
    fn set_key_saves_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        assert!(set_key(&path, "  ").is_err());

        set_key(&path, "env::GEMINI_API_KEY").unwrap();
        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("env::GEMINI_API_KEY"));
    }
}
