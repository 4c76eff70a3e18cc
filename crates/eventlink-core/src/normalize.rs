//! End-date normalization for Google Calendar.
//!
//! Google Calendar treats the end date of an all-day event as exclusive,
//! while models report the inclusive last day. [`EventNormalizer`] shifts an
//! all-day end date forward by exactly one calendar day and leaves timed
//! events untouched.
//!
//! Normalization is a single-pass transform: running it twice on the same
//! event moves an all-day end date forward twice. The trigger pipeline
//! normalizes each extracted event exactly once.

use thiserror::Error;
use tracing::debug;

use crate::event::{ALL_DAY_FORMAT, EventDate, ExtractedEvent};

/// Errors raised when an extracted event cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A date is neither `YYYYMMDD` nor `YYYYMMDDTHHMMSS[Z]`, or is eight
    /// digits that do not name a real calendar day.
    #[error("malformed {field}: {value:?}")]
    MalformedDate { field: &'static str, value: String },

    /// Start and end dates use different encodings.
    #[error("start date is {start} but end date is {end}")]
    MixedEncoding {
        start: &'static str,
        end: &'static str,
    },

    /// The day after the end date is outside the supported range.
    #[error("end date {value} has no following day")]
    OutOfRange { value: String },
}

/// Converts extracted events into the date encoding Google Calendar expects.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventNormalizer;

impl EventNormalizer {
    /// Creates a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalizes an extracted event.
    ///
    /// For all-day events the end date is replaced with the following
    /// calendar day, re-encoded as `YYYYMMDD`. Timed end dates pass through
    /// unchanged. The start date is never modified.
    ///
    /// # Errors
    ///
    /// Fails closed on malformed dates and on events that mix all-day and
    /// timed encodings.
    pub fn normalize(&self, mut event: ExtractedEvent) -> Result<ExtractedEvent, NormalizeError> {
        let start = EventDate::classify(&event.start_date);
        let end = EventDate::classify(&event.end_date);

        if start == EventDate::Malformed {
            return Err(NormalizeError::MalformedDate {
                field: "start_date",
                value: event.start_date,
            });
        }

        match end {
            EventDate::Malformed => Err(NormalizeError::MalformedDate {
                field: "end_date",
                value: event.end_date,
            }),
            EventDate::AllDay(last_day) => {
                if !start.is_all_day() {
                    return Err(NormalizeError::MixedEncoding {
                        start: start.kind(),
                        end: end.kind(),
                    });
                }

                let exclusive_end =
                    last_day
                        .succ_opt()
                        .ok_or_else(|| NormalizeError::OutOfRange {
                            value: event.end_date.clone(),
                        })?;

                event.end_date = exclusive_end.format(ALL_DAY_FORMAT).to_string();
                debug!(
                    start = %event.start_date,
                    end = %event.end_date,
                    "normalized all-day end date"
                );
                Ok(event)
            }
            EventDate::Timed => {
                if start.is_all_day() {
                    return Err(NormalizeError::MixedEncoding {
                        start: start.kind(),
                        end: end.kind(),
                    });
                }
                Ok(event)
            }
        }
    }
}

/// Convenience function to normalize a single event.
///
/// See [`EventNormalizer::normalize`] for details.
pub fn normalize_event(event: ExtractedEvent) -> Result<ExtractedEvent, NormalizeError> {
    EventNormalizer::new().normalize(event)
}
