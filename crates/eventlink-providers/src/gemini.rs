//! Gemini `generateContent` adapter.
//!
//! The extraction task is declared as a function and function calling is
//! set to `ANY`, so the model answers with a `functionCall` part whose
//! `args` object holds the event fields.

use eventlink_core::ExtractedEvent;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::instructions::EventInstructions;
use crate::provider::{ProviderAdapter, ProviderRequest, error_message, is_auth_failure};

/// Base URL for the Gemini API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER: &str = "gemini";

/// Adapter for Google Gemini models.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeminiAdapter;

impl GeminiAdapter {
    fn endpoint(model: &str) -> String {
        format!("{}/models/{}:generateContent", GEMINI_API_BASE, model)
    }
}

impl ProviderAdapter for GeminiAdapter {
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
            "systemInstruction": {
                "parts": [{ "text": instructions.system_prompt }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": selected_text }]
            }],
            "tools": [{
                "functionDeclarations": [{
                    "name": instructions.name,
                    "description": instructions.description,
                    "parameters": instructions.parameters
                }]
            }],
            "toolConfig": {
                "functionCallingConfig": {
                    "mode": "ANY",
                    "allowedFunctionNames": [instructions.name]
                }
            }
        });

        ProviderRequest::new(Self::endpoint(model), body)
            .with_header("Content-Type", "application/json")
            .with_header("x-goog-api-key", api_key)
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

        let parts = body
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ProviderError::invalid_response("response has no candidate parts")
                    .with_provider(PROVIDER)
            })?;

        if let Some(args) = parts
            .iter()
            .find_map(|part| part.pointer("/functionCall/args"))
        {
            debug!("parsing function call args");
            return serde_json::from_value(args.clone()).map_err(|e| {
                ProviderError::invalid_response(format!("failed to parse event fields: {}", e))
                    .with_provider(PROVIDER)
                    .with_source(e)
            });
        }

        // Without a function call, accept a text part holding the JSON object.
        let text = parts
            .iter()
            .find_map(|part| part.get("text").and_then(Value::as_str))
            .ok_or_else(|| {
                ProviderError::invalid_response("response has no function call or text")
                    .with_provider(PROVIDER)
            })?;

        serde_json::from_str(strip_code_fence(text)).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse event fields: {}", e))
                .with_provider(PROVIDER)
                .with_source(e)
        })
    }
}

/// Removes a surrounding Markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
