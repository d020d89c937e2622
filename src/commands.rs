//! Parsing of lines typed at the chat prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// `exit`: end the session.
    Exit,
    /// `load <path>`: replace the current dataset.
    Load(String),
    /// Anything else: a question for the assistant.
    Ask(String),
}

/// Classify one input line. Blank lines yield `None`.
///
/// Command words are matched case-insensitively. `load` needs a following
/// space, so a bare `load` is treated as a question.
pub fn parse_line(input: &str) -> Option<LineCommand> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.eq_ignore_ascii_case("exit") {
        return Some(LineCommand::Exit);
    }

    if let Some(prefix) = trimmed.get(..5) {
        if prefix.eq_ignore_ascii_case("load ") {
            return Some(LineCommand::Load(trimmed[5..].trim().to_string()));
        }
    }

    Some(LineCommand::Ask(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_case_insensitive() {
        for input in ["exit", "EXIT", "  Exit \n"] {
            assert_eq!(parse_line(input), Some(LineCommand::Exit), "{input:?}");
        }
    }

    #[test]
    fn load_takes_the_trimmed_remainder_as_path() {
        assert_eq!(
            parse_line("load   data/sales.csv  "),
            Some(LineCommand::Load("data/sales.csv".to_string()))
        );
        assert_eq!(
            parse_line("LOAD My Data.xlsx"),
            Some(LineCommand::Load("My Data.xlsx".to_string()))
        );
    }

    #[test]
    fn other_text_is_a_question() {
        assert_eq!(
            parse_line("what columns are there?"),
            Some(LineCommand::Ask("what columns are there?".to_string()))
        );
        assert_eq!(parse_line("load"), Some(LineCommand::Ask("load".to_string())));
        assert_eq!(
            parse_line("loader settings?"),
            Some(LineCommand::Ask("loader settings?".to_string()))
        );
        assert_eq!(
            parse_line("exit now"),
            Some(LineCommand::Ask("exit now".to_string()))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert_eq!(parse_line("héllo"), Some(LineCommand::Ask("héllo".to_string())));
    }
}
