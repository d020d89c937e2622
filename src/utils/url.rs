//! Endpoint URL helpers.

use crate::core::openai::DEFAULT_OPENAI_BASE_URL;

/// Join `endpoint` onto `base_url` with exactly one slash between them.
///
/// ```
/// use datachat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.openai.com/v1/", "/chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// First non-blank candidate, in priority order, or the OpenAI endpoint.
pub fn resolve_base_url<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_OPENAI_BASE_URL)
        .to_string()
}
