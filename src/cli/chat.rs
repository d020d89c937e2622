//! Interactive line loop: one line in, one reply out.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::commands::{parse_line, LineCommand};
use crate::core::conversation::ConversationEngine;
use crate::utils::logging::LoggingState;

pub const BANNER: &str = "=== Data Analysis Chatbot ===";
pub const USAGE_HINT: &str = "Type 'exit' to quit, 'load <file_path>' to load a dataset";

/// Read lines from `input` until `exit` or end of input.
///
/// Service failures are reported inline and do not end the loop.
pub async fn run_chat_loop<R, W>(
    engine: &mut ConversationEngine,
    logging: &LoggingState,
    mut input: R,
    output: &mut W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "\nYou: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            writeln!(output, "Goodbye!")?;
            return Ok(());
        }

        match parse_line(&line) {
            None => continue,
            Some(LineCommand::Exit) => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            Some(LineCommand::Load(path)) => {
                let message = engine.load_dataset(&path);
                if let Err(e) = logging.log_note(&message) {
                    warn!("Failed to log message: {e}");
                }
                writeln!(output, "Chatbot: {message}")?;
            }
            Some(LineCommand::Ask(question)) => match engine.ask(&question).await {
                Ok(reply) => {
                    if let Err(e) = logging.log_turn(&question, &reply) {
                        warn!("Failed to log message: {e}");
                    }
                    writeln!(output, "Chatbot: {reply}")?;
                }
                Err(err) => {
                    warn!(error = %err, "Question failed");
                    writeln!(output, "Chatbot: Error: {err}")?;
                }
            },
        }
    }
}
