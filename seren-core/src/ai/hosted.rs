//! Hosted reply strategy
//!
//! Calls an OpenAI-compatible chat-completions endpoint with a fixed
//! persona prompt and a bounded tail of prior turns. Every failure mode
//! (network, non-2xx, malformed body) surfaces as [`Error::Ai`] so the
//! engine can degrade to the rule-based responder for that call.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::{Error, Result};
use crate::types::{ChatMessage, ChatRole};

/// How many history messages are sent alongside the new user message.
pub const CONTEXT_TAIL: usize = 6;

/// Persona and safety constraints for the companion.
const SYSTEM_PROMPT: &str = "You are Seren, a compassionate wellness companion. \
You provide supportive, empathetic responses to help users with their emotional wellbeing. \
You are not a replacement for professional therapy, but offer encouragement and evidence-based coping strategies. \
Keep responses concise (under 150 words) and always encourage professional help for serious concerns. \
Use a warm, understanding tone and validate the user's feelings. \
Never provide medical diagnoses or crisis intervention - refer to professionals for emergencies.";

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Chat-completion response body
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

/// HTTP client for the hosted reply strategy
pub struct HostedResponder {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl HostedResponder {
    /// Create a responder from configuration.
    ///
    /// Returns an error if no API key is resolvable or the HTTP client
    /// cannot be built.
    pub fn new(config: &AiConfig) -> Result<Self> {
        config.validate()?;

        let api_key = config
            .resolved_api_key()
            .ok_or_else(|| Error::Config("ai.api_key is required for the hosted strategy".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| Error::Config(format!("invalid api_key: {}", e)))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Generate a reply for the message given the recent history.
    pub async fn generate(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages: build_messages(message, history),
            max_tokens: 150,
            temperature: 0.7,
            frequency_penalty: 0.3,
            presence_penalty: 0.3,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Ai(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Ai(format!("API error ({}): {}", status, error_text)));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Ai(format!("failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Ai("response contained no choices".to_string()))
    }
}

/// Assemble the wire messages: persona prompt, last [`CONTEXT_TAIL`] turns,
/// then the new user message.
fn build_messages(message: &str, history: &[ChatMessage]) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(CONTEXT_TAIL + 2);
    messages.push(WireMessage {
        role: "system".to_string(),
        content: SYSTEM_PROMPT.to_string(),
    });

    let tail_start = history.len().saturating_sub(CONTEXT_TAIL);
    for msg in &history[tail_start..] {
        messages.push(WireMessage {
            role: match msg.role {
                ChatRole::User => "user".to_string(),
                ChatRole::Assistant => "assistant".to_string(),
            },
            content: msg.content.clone(),
        });
    }

    messages.push(WireMessage {
        role: "user".to_string(),
        content: message.to_string(),
    });
    messages
}
