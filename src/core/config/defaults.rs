use crate::core::config::data::Config;
use std::error::Error;
use std::fmt;

/// Keys accepted by `datachat set` / `datachat unset`.
pub const CONFIG_KEYS: &[&str] = &[
    "default-model",
    "temperature",
    "base-url",
    "max-turns",
    "request-timeout",
    "system-prompt",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    UnknownKey(String),
    InvalidValue { key: &'static str, reason: String },
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(
                f,
                "Unknown config key: {key} (expected one of: {})",
                CONFIG_KEYS.join(", ")
            ),
            SettingError::InvalidValue { key, reason } => {
                write!(f, "Invalid value for {key}: {reason}")
            }
        }
    }
}

impl Error for SettingError {}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingError>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| SettingError::InvalidValue {
            key,
            reason: err.to_string(),
        })
}

impl Config {
    /// Apply `key = value`, returning a confirmation line.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, SettingError> {
        match key {
            "default-model" => {
                let model = value.trim();
                if model.is_empty() {
                    return Err(SettingError::InvalidValue {
                        key: "default-model",
                        reason: "model name cannot be empty".to_string(),
                    });
                }
                self.default_model = Some(model.to_string());
            }
            "temperature" => {
                let temperature: f32 = parse_value("temperature", value)?;
                if !(0.0..=2.0).contains(&temperature) {
                    return Err(SettingError::InvalidValue {
                        key: "temperature",
                        reason: "must be between 0 and 2".to_string(),
                    });
                }
                self.temperature = Some(temperature);
            }
            "base-url" => {
                let url = value.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(SettingError::InvalidValue {
                        key: "base-url",
                        reason: "expected an http:// or https:// URL".to_string(),
                    });
                }
                self.base_url = Some(url.to_string());
            }
            "max-turns" => self.max_turns = Some(parse_value("max-turns", value)?),
            "request-timeout" => {
                self.request_timeout_secs = Some(parse_value("request-timeout", value)?)
            }
            "system-prompt" => self.system_prompt = Some(value.to_string()),
            other => return Err(SettingError::UnknownKey(other.to_string())),
        }
        Ok(format!("Set {key} to: {value}"))
    }

    pub fn unset_value(&mut self, key: &str) -> Result<String, SettingError> {
        match key {
            "default-model" => self.default_model = None,
            "temperature" => self.temperature = None,
            "base-url" => self.base_url = None,
            "max-turns" => self.max_turns = None,
            "request-timeout" => self.request_timeout_secs = None,
            "system-prompt" => self.system_prompt = None,
            other => return Err(SettingError::UnknownKey(other.to_string())),
        }
        Ok(format!("Unset {key}"))
    }
}
