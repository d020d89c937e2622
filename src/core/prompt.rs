//! Instruction template sent as the system message of every request.

pub const DATA_CONTEXT_PLACEHOLDER: &str = "{data_context}";

/// Context sent before any dataset has been loaded.
pub const NO_DATA_CONTEXT: &str = "No data loaded yet.";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful data analysis assistant. You help users explore and understand \
their data through natural conversation. When responding to questions about data, \
use the data context provided to give accurate, clear answers.

If you're asked about data that hasn't been loaded yet, politely ask the user to \
load a dataset first.

Current data context: {data_context}";

/// Substitute `data_context` into `template`.
///
/// Templates without the placeholder get the context appended on its own line.
pub fn render_system_prompt(template: &str, data_context: &str) -> String {
    if template.contains(DATA_CONTEXT_PLACEHOLDER) {
        template.replace(DATA_CONTEXT_PLACEHOLDER, data_context)
    } else {
        format!("{}\n\nCurrent data context: {}", template.trim_end(), data_context)
    }
}
