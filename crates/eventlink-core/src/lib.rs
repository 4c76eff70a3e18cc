//! Core types: extracted events, date normalization, calendar links

pub mod event;
pub mod links;
pub mod normalize;
pub mod tracing;

pub use event::{EventDate, ExtractedEvent};
pub use links::{CalendarLinkBuilder, GOOGLE_CALENDAR_RENDER_URL, calendar_link};
pub use normalize::{EventNormalizer, NormalizeError, normalize_event};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
