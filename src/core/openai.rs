//! OpenAI-compatible `chat/completions` client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{ChatRequest, ChatResponse};
use crate::core::completion::{ChatCompletion, CompletionRequest, ServiceError};
use crate::utils::url::construct_api_url;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError> {
        let chat_url = construct_api_url(&self.base_url, "chat/completions");
        let payload = ChatRequest {
            model: request.model,
            messages: request.messages,
            temperature: request.temperature,
            stream: false,
        };
        debug!(
            url = %chat_url,
            model = %payload.model,
            messages = payload.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(chat_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat completion request rejected");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: summarize_api_error(&body),
            });
        }

        parse_completion_body(&body)
    }
}

/// Pull the reply text out of a non-streaming completion response.
pub(crate) fn parse_completion_body(body: &str) -> Result<String, ServiceError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|err| {
        match serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .as_ref()
            .and_then(extract_error_summary)
        {
            Some(summary) => ServiceError::Decode(summary),
            None => ServiceError::Decode(err.to_string()),
        }
    })?;

    let choice = response.choices.into_iter().next().ok_or(ServiceError::EmptyReply)?;
    if let Some(reason) = choice.finish_reason.as_deref() {
        debug!(finish_reason = reason, "Chat completion finished");
    }
    match choice.message.content {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(ServiceError::EmptyReply),
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
}

/// One-line description of an error body: the JSON error message when there
/// is one, otherwise the whitespace-collapsed body.
fn summarize_api_error(error_text: &str) -> String {
    let trimmed = error_text.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .as_ref()
        .and_then(extract_error_summary)
        .unwrap_or_else(|| trimmed.split_whitespace().collect::<Vec<_>>().join(" "))
}
