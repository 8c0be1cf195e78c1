/// A key press as seen by the typing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    /// Anything else (arrows, function keys, ...). Never reaches the buffer.
    Other,
}

impl Key {
    pub fn is_space(self) -> bool {
        self == Key::Char(' ')
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuppressReason {
    Space,
    Overflow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Suppress(SuppressReason),
}

impl GateDecision {
    pub fn passes(self) -> bool {
        self == GateDecision::Pass
    }
}

/// Decide whether a key press may reach the input buffer.
///
/// Spaces never pass. Once the buffer is as long as the active word, only
/// backspace passes. An empty or missing active word therefore blocks every
/// key except backspace. Lengths are counted in chars.
pub fn check(key: Key, user_input: &str, active_word: &str) -> GateDecision {
    if key.is_space() {
        return GateDecision::Suppress(SuppressReason::Space);
    }
    if key != Key::Backspace && user_input.chars().count() >= active_word.chars().count() {
        return GateDecision::Suppress(SuppressReason::Overflow);
    }
    GateDecision::Pass
}
