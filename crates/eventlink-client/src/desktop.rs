//! Desktop implementations of the trigger capabilities.
//!
//! - [`FileSettingsStore`]: settings from `config.toml`
//! - [`DesktopNotifier`]: desktop notifications via notify-rust
//! - [`BrowserOpener`] / [`StdoutOpener`]: open or print the calendar link
//! - [`TerminalWaitIndicator`]: a status line on stderr

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use notify_rust::Notification;
use tracing::{debug, error, info, warn};

use crate::capabilities::{Notifier, Settings, SettingsStore, TabOpener, WaitIndicator};
use crate::config::{ClientConfig, NotificationSettings, ensure_config_file};
use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Settings backed by the loaded config file.
///
/// The API key is resolved on every load, so `env::` and `pass::`
/// references see the current environment.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    config: ClientConfig,
    api_key_override: Option<String>,
}

impl FileSettingsStore {
    /// Creates a store over a loaded configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            api_key_override: None,
        }
    }

    /// Builder method to take the API key from somewhere other than the
    /// config file (e.g. the `EVENTLINK_API_KEY` environment variable).
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        self.api_key_override = api_key;
        self
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> ClientResult<Settings> {
        let raw = self
            .api_key_override
            .as_deref()
            .or(self.config.api_key.as_deref());

        // An unresolvable reference counts as no key at all.
        let api_key = raw.and_then(|value| match secret::resolve(value) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(reference = %secret::redact(value), error = %e, "failed to resolve api_key");
                None
            }
        });

        Ok(Settings {
            api_key,
            default_model: self.config.default_model.clone(),
        })
    }
}

/// Sends desktop notifications, falling back to stderr.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    settings: NotificationSettings,
}

impl DesktopNotifier {
    /// Creates a notifier with the given settings.
    pub fn new(settings: NotificationSettings) -> Self {
        Self { settings }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);

        if !self.settings.enabled {
            return;
        }

        let mut notification = Notification::new();
        notification
            .appname(&self.settings.app_name)
            .summary(&self.settings.app_name)
            .body(message)
            .timeout(Duration::from_secs(self.settings.timeout_secs as u64));

        if let Some(ref icon) = self.settings.icon {
            notification.icon(icon);
        }

        match notification.show() {
            Ok(_) => debug!("notification sent"),
            Err(e) => error!(error = %e, "failed to send notification"),
        }
    }
}

/// Opens links in the default browser.
#[derive(Debug, Clone)]
pub struct BrowserOpener {
    config_path: PathBuf,
}

impl BrowserOpener {
    /// Creates an opener; `config_path` is the file shown as the settings
    /// page.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }
}

impl TabOpener for BrowserOpener {
    fn open_tab(&self, url: &str) -> ClientResult<()> {
        info!("opening calendar link in browser");
        open::that(url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))
    }

    fn open_settings(&self) {
        open_settings_file(&self.config_path);
    }
}

/// Prints links to stdout instead of opening them.
#[derive(Debug, Clone)]
pub struct StdoutOpener {
    config_path: PathBuf,
}

impl StdoutOpener {
    /// Creates an opener; `config_path` is printed as the settings page.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }
}

impl TabOpener for StdoutOpener {
    fn open_tab(&self, url: &str) -> ClientResult<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", url)?;
        Ok(())
    }

    fn open_settings(&self) {
        eprintln!(
            "Set an API key in {} or run `eventlink config set-key <KEY>`.",
            self.config_path.display()
        );
    }
}

/// Opens the config file in the user's editor, creating it first.
pub fn open_settings_file(path: &std::path::Path) {
    eprintln!("Opening settings: {}", path.display());

    if let Err(e) = ensure_config_file(path) {
        error!(error = %e, path = %path.display(), "failed to create config file");
        return;
    }

    if let Err(e) = open::that(path) {
        error!(error = %e, path = %path.display(), "failed to open config file");
    }
}

/// Shows "Extracting event..." on stderr while a request is in flight.
///
/// Does nothing when stderr is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalWaitIndicator;

impl WaitIndicator for TerminalWaitIndicator {
    fn start(&self) {
        let stderr = std::io::stderr();
        if stderr.is_terminal() {
            let mut stderr = stderr.lock();
            let _ = write!(stderr, "Extracting event...");
            let _ = stderr.flush();
        }
    }

    fn stop(&self) {
        let stderr = std::io::stderr();
        if stderr.is_terminal() {
            let mut stderr = stderr.lock();
            let _ = write!(stderr, "\r\x1b[K");
            let _ = stderr.flush();
        }
    }
}
