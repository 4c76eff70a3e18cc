//! The default command: extract an event and open its calendar link.

use std::path::Path;

use eventlink_providers::{HttpTransport, Model};
use tracing::warn;

use crate::actions;
use crate::capabilities::TabOpener;
use crate::config::ClientConfig;
use crate::desktop::{
    BrowserOpener, DesktopNotifier, FileSettingsStore, StdoutOpener, TerminalWaitIndicator,
};
use crate::error::{ClientError, ClientResult};
use crate::trigger::{TriggerController, TriggerOutcome};

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Positional text; empty means clipboard or stdin.
    pub text: Vec<String>,
    /// Read the text from the clipboard.
    pub clipboard: bool,
    /// Model id overriding `default_model`.
    pub model: Option<String>,
    /// API key overriding the configured one.
    pub api_key: Option<String>,
    /// Print the link instead of opening it.
    pub print: bool,
    /// Also copy the link to the clipboard.
    pub copy: bool,
}

/// Runs one trigger against the desktop capabilities.
///
/// Notifications, the settings page and the wait indicator are handled by
/// the trigger; the returned error only covers what happens before it runs
/// and the final outcome.
pub async fn run(
    config: &ClientConfig,
    config_path: &Path,
    options: ExtractOptions,
) -> ClientResult<()> {
    let text = actions::read_selection(&options.text, options.clipboard)?;

    let model = options
        .model
        .as_deref()
        .map(str::parse::<Model>)
        .transpose()
        .map_err(|e| ClientError::Config(e.message().to_string()))?;

    let transport = HttpTransport::new()?;
    let settings = FileSettingsStore::new(config.clone()).with_api_key_override(options.api_key);
    let notifier = DesktopNotifier::new(config.notifications.clone());
    let wait = TerminalWaitIndicator;

    let browser;
    let stdout;
    let opener: &dyn TabOpener = if options.print {
        stdout = StdoutOpener::new(config_path);
        &stdout
    } else {
        browser = BrowserOpener::new(config_path);
        &browser
    };

    let outcome = TriggerController::new(&settings, &transport, &notifier, opener, &wait)
        .with_model(model)
        .trigger(&text)
        .await;

    match outcome {
        TriggerOutcome::Opened { url } => {
            if options.copy {
                if let Err(e) = actions::copy_to_clipboard(&url) {
                    warn!(error = %e, "failed to copy calendar link");
                }
            }
            Ok(())
        }
        TriggerOutcome::MissingApiKey => Err(ClientError::Config(
            "API key is not set; run `eventlink config set-key <KEY>`".into(),
        )),
        TriggerOutcome::InvalidApiKey => {
            Err(ClientError::Provider("the API key was rejected".into()))
        }
        TriggerOutcome::Failed { reason } => Err(ClientError::Provider(reason)),
    }
}
