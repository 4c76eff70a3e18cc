//! Host capabilities used by the trigger.
//!
//! The trigger talks to its host only through these traits, so the
//! extraction pipeline can run against the desktop implementations in
//! [`crate::desktop`] or against test doubles.

use crate::error::ClientResult;

/// The two settings the trigger reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Resolved API key, if one is configured.
    pub api_key: Option<String>,
    /// Model identifier, if one is configured.
    pub default_model: Option<String>,
}

/// Read access to the settings store.
pub trait SettingsStore: Send + Sync {
    /// Loads the current settings.
    fn load(&self) -> ClientResult<Settings>;
}

/// Shows user-facing messages.
pub trait Notifier: Send + Sync {
    /// Shows a message. Delivery failures are handled by the implementation.
    fn notify(&self, message: &str);
}

/// Opens pages for the user.
pub trait TabOpener: Send + Sync {
    /// Opens a URL in a new tab.
    fn open_tab(&self, url: &str) -> ClientResult<()>;

    /// Opens the settings page.
    fn open_settings(&self);
}

/// Busy feedback while a request is in flight.
///
/// Use through [`WaitGuard`] so the indicator is always cleared.
pub trait WaitIndicator: Send + Sync {
    /// Shows the busy state.
    fn start(&self);

    /// Clears the busy state.
    fn stop(&self);
}

/// Keeps a [`WaitIndicator`] active for the guard's lifetime.
///
/// Dropping the guard clears the indicator on every exit path, including
/// early returns through `?` and panics.
#[must_use = "the indicator is cleared as soon as the guard is dropped"]
pub struct WaitGuard<'a> {
    indicator: &'a dyn WaitIndicator,
}

impl<'a> WaitGuard<'a> {
    /// Starts the indicator and returns the guard that clears it.
    pub fn start(indicator: &'a dyn WaitIndicator) -> Self {
        indicator.start();
        Self { indicator }
    }
}

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.indicator.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<&'static str>>);

    impl WaitIndicator for Recorder {
        fn start(&self) {
            self.0.lock().unwrap().push("start");
        }

        fn stop(&self) {
            self.0.lock().unwrap().push("stop");
        }
    }

    fn fallible(indicator: &dyn WaitIndicator, fail: bool) -> Result<(), ()> {
        let _wait = WaitGuard::start(indicator);
        if fail {
            return Err(());
        }
        Ok(())
    }

    #[test]
    fn guard_clears_on_success() {
        let recorder = Recorder::default();
        assert!(fallible(&recorder, false).is_ok());
        assert_eq!(*recorder.0.lock().unwrap(), ["start", "stop"]);
    }

    #[test]
    fn guard_clears_on_early_return() {
        let recorder = Recorder::default();
        assert!(fallible(&recorder, true).is_err());
        assert_eq!(*recorder.0.lock().unwrap(), ["start", "stop"]);
    }

    #[test]
    fn guard_clears_on_panic() {
        let recorder = Recorder::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _wait = WaitGuard::start(&recorder);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(*recorder.0.lock().unwrap(), ["start", "stop"]);
    }
}
