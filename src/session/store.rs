use crate::session::input::{self, GateDecision, Key};

/// Borrowed view of the store, taken once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub words: &'a [String],
    pub active_word: Option<&'a str>,
    pub user_input: &'a str,
    pub history: &'a [String],
}

/// Word list, input buffer and typed history for one practice run.
///
/// The active word is never stored: it is whatever sits at
/// `words[history.len()]`.
#[derive(Clone, Debug, Default)]
pub struct WordStore {
    words: Vec<String>,
    user_input: String,
    history: Vec<String>,
}

impl WordStore {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            user_input: String::new(),
            history: Vec::new(),
        }
    }

    /// Replace the word list wholesale and start over.
    pub fn set_word_list(&mut self, words: Vec<String>) {
        self.words = words;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.user_input.clear();
        self.history.clear();
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn active_index(&self) -> Option<usize> {
        let idx = self.history.len();
        (idx < self.words.len()).then_some(idx)
    }

    pub fn active_word(&self) -> Option<&str> {
        self.words.get(self.history.len()).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.active_word().is_none()
    }

    /// Run a key through the input gate and apply it if it passes.
    pub fn apply_keystroke(&mut self, key: Key) -> GateDecision {
        let decision = input::check(key, &self.user_input, self.active_word().unwrap_or(""));
        if decision.passes() {
            match key {
                Key::Char(ch) => self.user_input.push(ch),
                Key::Backspace => {
                    self.user_input.pop();
                }
                Key::Other => {}
            }
        }
        decision
    }

    /// Confirm the active word: the buffer moves to history and is cleared.
    ///
    /// Returns false when there is no active word, or when the buffer is
    /// empty and the active word is not (a stray space must not skip words).
    pub fn advance_word(&mut self) -> bool {
        let Some(active) = self.active_word() else {
            return false;
        };
        if self.user_input.is_empty() && !active.is_empty() {
            return false;
        }
        let typed = std::mem::take(&mut self.user_input);
        self.history.push(typed);
        true
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            words: &self.words,
            active_word: self.active_word(),
            user_input: &self.user_input,
            history: &self.history,
        }
    }
}
