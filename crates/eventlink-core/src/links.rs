//! Google Calendar template link construction.
//!
//! Builds the `action=TEMPLATE` URL that opens Google Calendar's "create
//! event" page with the extracted fields pre-filled.
//!
//! # Example
//!
//! ```
//! use eventlink_core::{ExtractedEvent, calendar_link};
//!
//! let event = ExtractedEvent::new("Team sync", "20240615T120000Z", "20240615T130000Z");
//! let url = calendar_link(&event);
//! assert!(url.contains("text=Team%20sync"));
//! assert!(url.contains("dates=20240615T120000Z/20240615T130000Z"));
//! ```

use crate::event::ExtractedEvent;

/// Base URL of Google Calendar's event template page.
pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://www.google.com/calendar/render";

/// Builder for Google Calendar "create event" links.
///
/// The query parameter order is fixed: `action`, `text`, `dates`, `details`,
/// `location`. Text fields are percent-encoded as URI components; the two
/// dates are inserted as-is, joined by a literal `/`.
#[derive(Debug, Clone)]
pub struct CalendarLinkBuilder {
    base_url: String,
}

impl Default for CalendarLinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarLinkBuilder {
    /// Creates a builder targeting Google Calendar.
    pub fn new() -> Self {
        Self {
            base_url: GOOGLE_CALENDAR_RENDER_URL.to_string(),
        }
    }

    /// Builder method to override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the template URL for a normalized event.
    pub fn build(&self, event: &ExtractedEvent) -> String {
        format!(
            "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
            self.base_url,
            urlencoding::encode(&event.title),
            event.start_date,
            event.end_date,
            urlencoding::encode(&event.description),
            urlencoding::encode(&event.location),
        )
    }
}

/// Convenience function to build a Google Calendar link.
///
/// See [`CalendarLinkBuilder::build`] for details.
pub fn calendar_link(event: &ExtractedEvent) -> String {
    CalendarLinkBuilder::new().build(event)
}
