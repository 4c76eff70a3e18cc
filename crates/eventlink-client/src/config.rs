//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventlink/config.toml` by default:
//!
//! ```toml
//! api_key = "env::OPENAI_API_KEY"
//! default_model = "gpt-4o"
//!
//! [notifications]
//! enabled = true
//! ```
//!
//! `api_key` supports secret references (see [`crate::secret`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Written by `config edit` when no config file exists yet.
const CONFIG_TEMPLATE: &str = r#"# eventlink configuration

# API key for the selected provider. Plain text, or a reference:
#   api_key = "env::OPENAI_API_KEY"
#   api_key = "pass::ai/openai"
# api_key = ""

# One of: gpt-3.5-turbo, gpt-4o, gemini
# default_model = "gpt-3.5-turbo"

[notifications]
enabled = true
"#;

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the eventlink client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Provider API key (supports `pass::` and `env::` prefixes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier; `gpt-3.5-turbo` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Debug mode.
    pub debug: bool,

    /// Notification settings.
    pub notifications: NotificationSettings,
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Whether errors are shown as desktop notifications (otherwise stderr).
    pub enabled: bool,

    /// Application name shown on notifications.
    pub app_name: String,

    /// Notification icon path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Notification timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "AI Event Scheduler".to_string(),
            icon: None,
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventlink")
    }
}

/// Creates the config file from a commented template if it does not exist.
pub fn ensure_config_file(path: &Path) -> ClientResult<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)?;
    info!(path = %path.display(), "created config file");
    Ok(())
}

/// Sets a top-level string key in the config file, keeping the rest of the
/// document (comments, ordering, other tables) intact.
pub fn set_value(path: &Path, key: &str, value: &str) -> ClientResult<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| ClientError::Config(format!("failed to parse {}: {}", path.display(), e)))?;

    doc[key] = toml_edit::value(value);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())?;
    info!(key = key, path = %path.display(), "config value saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.default_model.is_none());
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.app_name, "AI Event Scheduler");
        assert_eq!(config.notifications.timeout_secs, 10);
    }

    #[test]
    fn parse_full_config() {
        let toml_content = r#"
api_key = "env::OPENAI_API_KEY"
default_model = "gpt-4o"
debug = true

[notifications]
enabled = false
app_name = "Scheduler"
icon = "/usr/share/icons/calendar.png"
"#;
        let config: ClientConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("env::OPENAI_API_KEY"));
        assert_eq!(config.default_model.as_deref(), Some("gpt-4o"));
        assert!(config.debug);
        assert!(!config.notifications.enabled);
        assert_eq!(config.notifications.app_name, "Scheduler");
        assert_eq!(config.notifications.timeout_secs, 10);
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: ClientConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert!(config.api_key.is_none());
        assert!(config.notifications.enabled);
    }

    #[test]
    fn ensure_config_file_creates_once() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        ensure_config_file(&path).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "default_model = \"gemini\"\n").unwrap();
        ensure_config_file(&path).unwrap();
        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("gemini"));
    }

    #[test]
    fn set_value_preserves_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "# my settings\ndefault_model = \"gemini\"\n\n[notifications]\nenabled = false\n",
        )
        .unwrap();

        set_value(&path, "api_key", "env::GEMINI_API_KEY").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# my settings"));

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("env::GEMINI_API_KEY"));
        assert_eq!(config.default_model.as_deref(), Some("gemini"));
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn set_value_creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("eventlink").join("config.toml");

        set_value(&path, "default_model", "gpt-4o").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn load_from_missing_file_errors() {
        let result = ClientConfig::load_from(Path::new("/nonexistent/eventlink/config.toml"));
        assert!(result.unwrap_err().contains("failed to read config"));
    }
}
