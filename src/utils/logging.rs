//! Plain-text transcript log enabled with `--log <file>`.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct LoggingState {
    file_path: Option<PathBuf>,
}

impl LoggingState {
    pub fn disabled() -> Self {
        Self { file_path: None }
    }

    /// Enable logging to `path`, failing early when the file is not writable.
    pub fn new(log_file: Option<PathBuf>) -> io::Result<Self> {
        if let Some(path) = &log_file {
            Self::test_file_access(path)?;
        }
        Ok(Self {
            file_path: log_file,
        })
    }

    pub fn log_session_start(&self, model: &str) -> io::Result<()> {
        self.log_note(&format!(
            "Session started {} (model: {model})",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))
    }

    /// App-authored lines are prefixed with `## ` to set them apart from chat.
    pub fn log_note(&self, content: &str) -> io::Result<()> {
        self.log_message(&format!("## {content}"))
    }

    pub fn log_turn(&self, question: &str, reply: &str) -> io::Result<()> {
        self.log_message(&format!("You: {question}"))?;
        self.log_message(reply)
    }

    pub fn log_message(&self, content: &str) -> io::Result<()> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Blank line between messages, as on screen
        writeln!(writer)?;

        writer.flush()
    }

    fn test_file_access(path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()
    }
}
