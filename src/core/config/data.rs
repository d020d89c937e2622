use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::conversation::{
    EngineSettings, DEFAULT_MAX_TURNS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::core::prompt::DEFAULT_SYSTEM_PROMPT;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Model identifier sent with every request (e.g., "gpt-4o-mini")
    pub default_model: Option<String>,
    /// Sampling temperature; low values favor deterministic answers
    pub temperature: Option<f32>,
    /// OpenAI-compatible API base URL
    pub base_url: Option<String>,
    /// Turns of conversation history sent for context; 0 disables the limit
    pub max_turns: Option<usize>,
    /// HTTP timeout for a single request, in seconds
    pub request_timeout_secs: Option<u64>,
    /// Replacement instruction template; `{data_context}` marks where the
    /// dataset description goes
    pub system_prompt: Option<String>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/datachat/config.toml` → `~/.config/datachat/config.toml`
/// - Windows: paths are returned unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_turns(&self) -> Option<usize> {
        match self.max_turns {
            Some(0) => None,
            Some(turns) => Some(turns),
            None => Some(DEFAULT_MAX_TURNS),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Settings for the conversation engine with built-in defaults filled in.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            model: self.model().to_string(),
            temperature: self.temperature(),
            system_prompt: self
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_turns: self.max_turns(),
        }
    }
}
