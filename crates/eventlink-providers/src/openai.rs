//! OpenAI chat completions adapter.
//!
//! The extraction task is sent as a single function tool and the model is
//! forced to call it; the event is the JSON string in the tool call's
//! `arguments`.

use eventlink_core::ExtractedEvent;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::instructions::EventInstructions;
use crate::provider::{ProviderAdapter, ProviderRequest, error_message, is_auth_failure};

/// Chat completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

const PROVIDER: &str = "openai";

/// Adapter for OpenAI chat models.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn build_request(
        &self,
        selected_text: &str,
        api_key: &str,
        model: &str,
        instructions: &EventInstructions,
    ) -> ProviderRequest {
        let body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": instructions.system_prompt },
                { "role": "user", "content": selected_text }
            ],
            "tools": [{
                "type": "function",
                "function": {
                    "name": instructions.name,
                    "description": instructions.description,
                    "parameters": instructions.parameters
                }
            }],
            "tool_choice": {
                "type": "function",
                "function": { "name": instructions.name }
            }
        });

        ProviderRequest::new(OPENAI_CHAT_COMPLETIONS_URL, body)
            .with_header("Content-Type", "application/json")
            .with_header("Authorization", format!("Bearer {}", api_key))
    }

    fn parse_response(&self, body: &Value) -> ProviderResult<ExtractedEvent> {
        if is_auth_failure(body) {
            return Err(ProviderError::invalid_api_key(
                error_message(body).unwrap_or_else(|| "API key rejected".into()),
            )
            .with_provider(PROVIDER));
        }

        if let Some(message) = error_message(body) {
            return Err(ProviderError::reported(message).with_provider(PROVIDER));
        }

        let message = body.pointer("/choices/0/message").ok_or_else(|| {
            ProviderError::invalid_response("response has no choices").with_provider(PROVIDER)
        })?;

        // Forced tool calls land in `tool_calls`; some models answer in
        // `content` instead.
        let arguments = message
            .pointer("/tool_calls/0/function/arguments")
            .and_then(Value::as_str)
            .or_else(|| message.get("content").and_then(Value::as_str))
            .ok_or_else(|| {
                ProviderError::invalid_response("response has no tool call or content")
                    .with_provider(PROVIDER)
            })?;

        debug!(len = arguments.len(), "parsing tool call arguments");

        serde_json::from_str(arguments).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse event fields: {}", e))
                .with_provider(PROVIDER)
                .with_source(e)
        })
    }
}
