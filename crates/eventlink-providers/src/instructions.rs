//! The extraction task sent to every provider.
//!
//! The task is expressed as a single function declaration whose parameters
//! are the [`ExtractedEvent`](eventlink_core::ExtractedEvent) fields. Both
//! OpenAI tools and Gemini function declarations accept this shape.

use chrono::NaiveDate;
use serde_json::{Value, json};

/// Name of the function the model is forced to call.
pub const EXTRACT_FUNCTION_NAME: &str = "get_event_parameters";

const SYSTEM_PROMPT: &str = "You extract calendar events from text. \
Call the provided function exactly once with the event described in the user's text.";

/// Function declaration and prompt for event extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInstructions {
    /// Function name.
    pub name: String,
    /// Function description, including the date rules.
    pub description: String,
    /// JSON-schema parameters.
    pub parameters: Value,
    /// System prompt.
    pub system_prompt: String,
}

impl EventInstructions {
    /// Builds the extraction instructions relative to `today`.
    ///
    /// The current date lets the model resolve expressions such as
    /// "tomorrow" or "next Friday".
    pub fn for_date(today: NaiveDate) -> Self {
        let description = format!(
            "Get the parameters of a calendar event from the text. Today is {} ({}). \
             For an all-day event use dates formatted as YYYYMMDD, where end_date is the \
             last day of the event (for a single-day event end_date equals start_date). \
             For an event with a time use dates formatted as YYYYMMDDTHHMMSSZ in UTC. \
             start_date and end_date must use the same format. \
             If no end time is given, assume the event lasts one hour.",
            today.format("%Y-%m-%d"),
            today.format("%A"),
        );

        Self {
            name: EXTRACT_FUNCTION_NAME.to_string(),
            description,
            parameters: event_parameters_schema(),
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

fn event_parameters_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "Short title of the event."
            },
            "location": {
                "type": "string",
                "description": "Where the event takes place, empty string if unknown."
            },
            "description": {
                "type": "string",
                "description": "Extra details about the event, empty string if none."
            },
            "start_date": {
                "type": "string",
                "description": "Start, YYYYMMDD for all-day events or YYYYMMDDTHHMMSSZ."
            },
            "end_date": {
                "type": "string",
                "description": "End, YYYYMMDD (inclusive last day) for all-day events or YYYYMMDDTHHMMSSZ."
            }
        },
        "required": ["title", "location", "description", "start_date", "end_date"]
    })
}
