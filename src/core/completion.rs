//! The seam between the conversation engine and whichever service produces
//! replies.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;

use crate::api::ChatMessage;

/// Everything a single round trip needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// Request in, reply text out.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError>;
}

#[derive(Debug)]
pub enum ServiceError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),

    /// The service answered with a non-success status.
    Api { status: u16, message: String },

    /// The response body was not a chat completion.
    Decode(String),

    /// The completion carried no message content.
    EmptyReply,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Transport(source) => write!(f, "Request failed: {source}"),
            ServiceError::Api { status, message } => write!(f, "HTTP {status}: {message}"),
            ServiceError::Decode(detail) => write!(f, "Unexpected response: {detail}"),
            ServiceError::EmptyReply => f.write_str("The service returned an empty reply"),
        }
    }
}

impl StdError for ServiceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ServiceError::Transport(source) => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err)
    }
}
