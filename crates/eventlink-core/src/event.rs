//! Event types for extracted calendar events.
//!
//! This module provides:
//! - [`ExtractedEvent`]: the structured fields a language model pulled out of
//!   a piece of selected text
//! - [`EventDate`]: the classification of a calendar date string (all-day,
//!   timed, or malformed)

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches an all-day date: exactly eight digits, `YYYYMMDD`.
static ALL_DAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("Invalid all-day regex"));

/// Matches a timed date: `YYYYMMDDTHHMMSS` with an optional `Z` suffix.
static TIMED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}T[0-9]{6}Z?$").expect("Invalid timed regex"));

/// Format used by Google Calendar for all-day dates.
pub const ALL_DAY_FORMAT: &str = "%Y%m%d";

/// An event extracted from unstructured text by a model provider.
///
/// Dates are kept in the encoding Google Calendar's template URL expects:
/// `YYYYMMDD` for all-day events and `YYYYMMDDTHHMMSSZ` for timed events.
/// `start_date` and `end_date` must share the same encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEvent {
    /// The event title.
    pub title: String,
    /// Where the event takes place, empty if unknown.
    #[serde(default)]
    pub location: String,
    /// Free-form description, empty if none.
    #[serde(default)]
    pub description: String,
    /// Start date, `YYYYMMDD` or `YYYYMMDDTHHMMSSZ`.
    pub start_date: String,
    /// End date, same encoding as `start_date`.
    ///
    /// For all-day events this is the inclusive last day until the event
    /// has been normalized.
    pub end_date: String,
}

impl ExtractedEvent {
    /// Creates a new event with empty location and description.
    pub fn new(
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: String::new(),
            description: String::new(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true if the end date is encoded as an all-day date.
    ///
    /// Only the end date's format is checked.
    pub fn is_all_day(&self) -> bool {
        is_all_day_date(&self.end_date)
    }
}

/// Returns true if `date` is exactly eight digits.
pub fn is_all_day_date(date: &str) -> bool {
    ALL_DAY_REGEX.is_match(date)
}

/// The classification of a calendar date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDate {
    /// An all-day date that parsed to a valid calendar day.
    AllDay(NaiveDate),
    /// A timed date in `YYYYMMDDTHHMMSS[Z]` form, passed through opaquely.
    Timed,
    /// Anything else, including eight digits that are not a real date.
    Malformed,
}

impl EventDate {
    /// Classifies a date string.
    pub fn classify(date: &str) -> Self {
        if is_all_day_date(date) {
            match NaiveDate::parse_from_str(date, ALL_DAY_FORMAT) {
                Ok(day) => Self::AllDay(day),
                Err(_) => Self::Malformed,
            }
        } else if TIMED_REGEX.is_match(date) {
            Self::Timed
        } else {
            Self::Malformed
        }
    }

    /// Returns the kind name, used in log fields and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AllDay(_) => "all-day",
            Self::Timed => "timed",
            Self::Malformed => "malformed",
        }
    }

    /// Returns true for [`EventDate::AllDay`].
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_day_pattern() {
        assert!(is_all_day_date("20240701"));
        assert!(!is_all_day_date("2024070"));
        assert!(!is_all_day_date("202407011"));
        assert!(!is_all_day_date("20240701T120000Z"));
        assert!(!is_all_day_date("2024-07-01"));
        assert!(!is_all_day_date(""));
    }

    #[test]
    fn classify_all_day() {
        assert_eq!(
            EventDate::classify("20240229"),
            EventDate::AllDay(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn classify_invalid_calendar_day_is_malformed() {
        assert_eq!(EventDate::classify("20230229"), EventDate::Malformed);
        assert_eq!(EventDate::classify("20241301"), EventDate::Malformed);
    }

    #[test]
    fn classify_timed() {
        assert_eq!(EventDate::classify("20240615T120000Z"), EventDate::Timed);
        assert_eq!(EventDate::classify("20240615T120000"), EventDate::Timed);
    }

    #[test]
    fn classify_malformed() {
        assert_eq!(EventDate::classify("tomorrow"), EventDate::Malformed);
        assert_eq!(EventDate::classify("20240615T12Z"), EventDate::Malformed);
        assert_eq!(
            EventDate::classify("2024-06-15T12:00:00Z"),
            EventDate::Malformed
        );
    }

    #[test]
    fn event_is_all_day_uses_end_date() {
        let event = ExtractedEvent::new("Trip", "20240701T090000Z", "20240703");
        assert!(event.is_all_day());

        let event = ExtractedEvent::new("Trip", "20240701", "20240703T090000Z");
        assert!(!event.is_all_day());
    }

    #[test]
    fn deserialize_defaults_optional_fields() {
        let json = r#"{
            "title": "Standup",
            "start_date": "20240615T090000Z",
            "end_date": "20240615T091500Z"
        }"#;

        let event: ExtractedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Standup");
        assert!(event.location.is_empty());
        assert!(event.description.is_empty());
    }

    #[test]
    fn deserialize_requires_dates() {
        let json = r#"{ "title": "Standup", "start_date": "20240615" }"#;
        assert!(serde_json::from_str::<ExtractedEvent>(json).is_err());
    }

    #[test]
    fn builder_methods() {
        let event = ExtractedEvent::new("Lunch", "20240615", "20240615")
            .with_location("Joe's Diner")
            .with_description("Bring the report");

        assert_eq!(event.location, "Joe's Diner");
        assert_eq!(event.description, "Bring the report");
    }
}
