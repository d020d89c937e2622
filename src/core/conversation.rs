use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::ChatMessage;
use crate::core::completion::{ChatCompletion, CompletionRequest, ServiceError};
use crate::core::credentials::{require_api_key, MissingCredential};
use crate::core::openai::OpenAiClient;
use crate::core::prompt::{render_system_prompt, DEFAULT_SYSTEM_PROMPT, NO_DATA_CONTEXT};
use crate::core::transcript::Transcript;
use crate::dataset::{self, summarize, Dataset};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TURNS: usize = 50;

/// Explicit configuration for a [`ConversationEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub model: String,
    pub temperature: f32,
    /// Instruction template; `{data_context}` is replaced on every request.
    pub system_prompt: String,
    /// Turns of history kept for context, `None` for no limit.
    pub max_turns: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_turns: Some(DEFAULT_MAX_TURNS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NoDataset,
    DatasetLoaded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub path: PathBuf,
    pub data: Dataset,
    pub description: String,
}

#[derive(Debug)]
pub enum EngineError {
    MissingCredential(MissingCredential),
    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MissingCredential(err) => fmt::Display::fmt(err, f),
            EngineError::Client(err) => write!(f, "Failed to create HTTP client: {err}"),
        }
    }
}

impl StdError for EngineError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            EngineError::MissingCredential(err) => Some(err),
            EngineError::Client(err) => Some(err),
        }
    }
}

impl From<MissingCredential> for EngineError {
    fn from(err: MissingCredential) -> Self {
        EngineError::MissingCredential(err)
    }
}

/// Conversation memory plus the current dataset, turned into one completion
/// request per question.
pub struct ConversationEngine {
    completion: Box<dyn ChatCompletion>,
    settings: EngineSettings,
    transcript: Transcript,
    dataset: Option<LoadedDataset>,
}

impl ConversationEngine {
    pub fn new(settings: EngineSettings, completion: Box<dyn ChatCompletion>) -> Self {
        let transcript = Transcript::new(settings.max_turns);
        Self {
            completion,
            settings,
            transcript,
            dataset: None,
        }
    }

    /// Build an engine backed by an OpenAI-compatible endpoint.
    ///
    /// Fails with [`EngineError::MissingCredential`] when `api_key` is absent
    /// or blank.
    pub fn connect(
        settings: EngineSettings,
        api_key: Option<String>,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, EngineError> {
        let api_key = require_api_key(api_key)?;
        let client = OpenAiClient::new(api_key, base_url, timeout).map_err(EngineError::Client)?;
        info!(model = %settings.model, base_url, "Conversation engine ready");
        Ok(Self::new(settings, Box::new(client)))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> EngineState {
        match self.dataset {
            Some(_) => EngineState::DatasetLoaded,
            None => EngineState::NoDataset,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }

    pub fn dataset_description(&self) -> Option<&str> {
        self.dataset
            .as_ref()
            .map(|loaded| loaded.description.as_str())
    }

    /// Context string injected into the instruction template.
    pub fn data_context(&self) -> &str {
        self.dataset_description().unwrap_or(NO_DATA_CONTEXT)
    }

    /// Load `path` and make it the current dataset.
    ///
    /// Always returns a message for the user. A failed load leaves any
    /// previously loaded dataset in place.
    pub fn load_dataset(&mut self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        match dataset::load(path) {
            Ok(data) => {
                if let Some(table) = data.as_table() {
                    debug!(summary = ?summarize(table), "Dataset summary");
                }
                let description = describe_dataset(path, &data);
                let message = format!("Dataset loaded successfully: {description}");
                self.dataset = Some(LoadedDataset {
                    path: path.to_path_buf(),
                    data,
                    description,
                });
                message
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Dataset load failed");
                format!("Error loading dataset: {err}")
            }
        }
    }

    /// The request `ask(question)` would send right now.
    pub fn build_request(&self, question: &str) -> CompletionRequest {
        let mut messages = Vec::with_capacity(self.transcript.len() + 2);
        messages.push(ChatMessage::system(render_system_prompt(
            &self.settings.system_prompt,
            self.data_context(),
        )));
        messages.extend(self.transcript.messages().map(ChatMessage::from));
        messages.push(ChatMessage {
            role: crate::core::message::ROLE_USER.to_string(),
            content: question.to_string(),
        });

        CompletionRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            messages,
        }
    }

    /// Send `question` with the current context and record the exchange.
    ///
    /// The transcript only changes when the service replies.
    pub async fn ask(&mut self, question: &str) -> Result<String, ServiceError> {
        let request = self.build_request(question);
        let reply = self.completion.complete(request).await?;

        let evicted = self.transcript.push_turn(question, reply.clone());
        if evicted > 0 {
            debug!(evicted, "Dropped oldest turns from transcript");
        }
        Ok(reply)
    }
}

/// Human-readable description of a dataset for the instruction template.
pub fn describe_dataset(path: &Path, data: &Dataset) -> String {
    match data {
        Dataset::Table(table) => format!(
            "Dataset loaded from: {}\nShape: {} rows, {} columns\nColumns: {}",
            path.display(),
            table.row_count(),
            table.column_count(),
            table.column_names().collect::<Vec<_>>().join(", ")
        ),
        Dataset::Text(_) => format!("Text data loaded from: {}", path.display()),
    }
}

#[cfg(test)]
mod tests;
