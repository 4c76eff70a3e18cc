//! The extraction trigger: selected text in, calendar tab out.
//!
//! One trigger runs one independent pipeline:
//!
//! 1. read `api_key` and `default_model` from the settings store
//! 2. build the provider request for the selected model
//! 3. send it (the wait indicator is shown only for this step)
//! 4. parse the response into an [`ExtractedEvent`]
//! 5. normalize the end date and build the calendar link
//! 6. open the link in a new tab
//!
//! Every failure ends in exactly one [`TriggerOutcome`]; nothing propagates
//! past [`TriggerController::trigger`].

use chrono::{Local, NaiveDate};
use eventlink_core::{CalendarLinkBuilder, EventNormalizer, ExtractedEvent, NormalizeError};
use eventlink_providers::{EventInstructions, Model, ProviderError, Transport};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::capabilities::{Notifier, SettingsStore, TabOpener, WaitGuard, WaitIndicator};
use crate::error::ClientError;

/// Shown when the provider rejects the API key.
pub const INVALID_API_KEY_MESSAGE: &str =
    "Invalid API key. Please set a valid API key with `eventlink config set-key`.";

/// Shown for every other failure.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while creating the event. Please try again later.";

/// Why a trigger did not produce a calendar tab.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// No API key is configured.
    #[error("API key is not set")]
    MissingApiKey,

    /// The provider rejected the API key.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// Any other network, parse, normalization or host failure.
    #[error("event extraction failed: {0}")]
    Extraction(String),
}

impl From<ProviderError> for TriggerError {
    fn from(err: ProviderError) -> Self {
        if err.is_invalid_api_key() {
            Self::InvalidApiKey(err.to_string())
        } else {
            Self::Extraction(err.to_string())
        }
    }
}

impl From<NormalizeError> for TriggerError {
    fn from(err: NormalizeError) -> Self {
        Self::Extraction(err.to_string())
    }
}

impl From<ClientError> for TriggerError {
    fn from(err: ClientError) -> Self {
        Self::Extraction(err.to_string())
    }
}

/// The single observable result of a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The calendar link was opened.
    Opened { url: String },
    /// No API key; the settings page was opened.
    MissingApiKey,
    /// The key was rejected; the user was notified and sent to settings.
    InvalidApiKey,
    /// Anything else; the user was notified.
    Failed { reason: String },
}

impl TriggerOutcome {
    /// Returns true if a calendar tab was opened.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Opened { .. })
    }
}

/// Wires settings, provider dispatch and host side effects together.
pub struct TriggerController<'a> {
    settings: &'a dyn SettingsStore,
    transport: &'a dyn Transport,
    notifier: &'a dyn Notifier,
    opener: &'a dyn TabOpener,
    wait: &'a dyn WaitIndicator,
    normalizer: EventNormalizer,
    link_builder: CalendarLinkBuilder,
    model_override: Option<Model>,
    today: NaiveDate,
}

impl<'a> TriggerController<'a> {
    /// Creates a controller over the given capabilities.
    pub fn new(
        settings: &'a dyn SettingsStore,
        transport: &'a dyn Transport,
        notifier: &'a dyn Notifier,
        opener: &'a dyn TabOpener,
        wait: &'a dyn WaitIndicator,
    ) -> Self {
        Self {
            settings,
            transport,
            notifier,
            opener,
            wait,
            normalizer: EventNormalizer::new(),
            link_builder: CalendarLinkBuilder::new(),
            model_override: None,
            today: Local::now().date_naive(),
        }
    }

    /// Builder method to use a model instead of the configured one.
    pub fn with_model(mut self, model: Option<Model>) -> Self {
        self.model_override = model;
        self
    }

    /// Builder method to set the date relative expressions resolve against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Runs one trigger for `selected_text`.
    pub async fn trigger(&self, selected_text: &str) -> TriggerOutcome {
        match self.run(selected_text).await {
            Ok(url) => TriggerOutcome::Opened { url },
            Err(TriggerError::MissingApiKey) => {
                warn!("API key is not set, opening settings");
                self.opener.open_settings();
                TriggerOutcome::MissingApiKey
            }
            Err(TriggerError::InvalidApiKey(reason)) => {
                warn!(reason = %reason, "provider rejected the API key");
                self.notifier.notify(INVALID_API_KEY_MESSAGE);
                self.opener.open_settings();
                TriggerOutcome::InvalidApiKey
            }
            Err(TriggerError::Extraction(reason)) => {
                warn!(reason = %reason, "event extraction failed");
                self.notifier.notify(GENERIC_FAILURE_MESSAGE);
                TriggerOutcome::Failed { reason }
            }
        }
    }

    async fn run(&self, selected_text: &str) -> Result<String, TriggerError> {
        let settings = self.settings.load()?;

        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(TriggerError::MissingApiKey)?;

        let model = match self.model_override {
            Some(model) => model,
            None => Model::from_setting(settings.default_model.as_deref())?,
        };
        let adapter = model.adapter();

        info!(model = %model, provider = adapter.name(), "extracting event");

        let instructions = EventInstructions::for_date(self.today);
        let request =
            adapter.build_request(selected_text, &api_key, model.api_name(), &instructions);

        let event = {
            let _wait = WaitGuard::start(self.wait);
            let body = self.transport.send(&request).await?;
            adapter.parse_response(&body)?
        };

        let url = self.calendar_url(event)?;
        self.opener.open_tab(&url)?;
        Ok(url)
    }

    fn calendar_url(&self, event: ExtractedEvent) -> Result<String, TriggerError> {
        debug!(
            title = %event.title,
            start = %event.start_date,
            end = %event.end_date,
            "extracted event"
        );
        let event = self.normalizer.normalize(event)?;
        Ok(self.link_builder.build(&event))
    }
}
