use std::error::Error;
use std::fmt;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

const QUICK_FIXES: &[&str] = &[
    "export OPENAI_API_KEY=sk-...    # Set the key for this shell",
    "echo OPENAI_API_KEY=sk-... >> .env   # Or keep it in a .env file",
    "datachat --api-key sk-...       # Or pass it explicitly",
];

/// No API key was supplied explicitly or through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCredential;

impl MissingCredential {
    pub fn quick_fixes(&self) -> &'static [&'static str] {
        QUICK_FIXES
    }

    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl fmt::Display for MissingCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpenAI API key is required\n\nMake sure you have set your {API_KEY_ENV} in the environment or in a .env file."
        )
    }
}

impl Error for MissingCredential {}

/// Pick the explicit key if given, otherwise ask `env` for `OPENAI_API_KEY`.
/// Blank values count as missing.
pub fn resolve_api_key<F>(explicit: Option<&str>, env: F) -> Result<String, MissingCredential>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| env(API_KEY_ENV).filter(|key| !key.trim().is_empty()))
        .map(|key| key.trim().to_string())
        .ok_or(MissingCredential)
}

/// Accept a key handed straight to a constructor.
pub fn require_api_key(api_key: Option<String>) -> Result<String, MissingCredential> {
    resolve_api_key(api_key.as_deref(), |_| None)
}
