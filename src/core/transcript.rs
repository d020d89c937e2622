use std::collections::VecDeque;

use super::message::Message;

/// Conversation memory: user/assistant exchanges in call order.
///
/// Entries are only ever appended as whole turns (a user message followed by
/// the assistant reply). When `max_turns` is set, the oldest turns are
/// dropped once the limit is exceeded.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: VecDeque<Message>,
    max_turns: Option<usize>,
}

impl Transcript {
    pub fn new(max_turns: Option<usize>) -> Self {
        Self {
            messages: VecDeque::new(),
            max_turns,
        }
    }

    /// Record one completed exchange. Returns the number of turns evicted.
    pub fn push_turn(&mut self, question: impl Into<String>, reply: impl Into<String>) -> usize {
        self.messages.push_back(Message::user(question));
        self.messages.push_back(Message::assistant(reply));
        self.enforce_limit()
    }

    fn enforce_limit(&mut self) -> usize {
        let Some(limit) = self.max_turns else {
            return 0;
        };

        let mut evicted = 0;
        while self.turn_count() > limit {
            self.messages.pop_front();
            self.messages.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn messages(&self) -> impl ExactSizeIterator<Item = &Message> {
        self.messages.iter()
    }

    /// Number of entries (two per turn).
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn turn_count(&self) -> usize {
        self.messages.len() / 2
    }
}
