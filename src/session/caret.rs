use ratatui::layout::{Position, Rect};

/// Fixed-advance caret placement.
///
/// Every char is assumed to be `char_advance` cells wide. Wide glyphs
/// (CJK, emoji) make the caret drift; measuring real widths would only
/// change `offset`, which must stay monotone and start at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretPositioner {
    char_advance: u16,
}

impl CaretPositioner {
    pub fn new(char_advance: u16) -> Self {
        Self {
            char_advance: char_advance.max(1),
        }
    }

    pub fn char_advance(&self) -> u16 {
        self.char_advance
    }

    /// Horizontal offset of the caret from the start of the active word.
    pub fn offset(&self, typed_len: usize) -> u16 {
        let typed = u16::try_from(typed_len).unwrap_or(u16::MAX);
        typed.saturating_mul(self.char_advance)
    }
}

impl Default for CaretPositioner {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Where the active word block landed on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordRef {
    pub index: usize,
    pub area: Rect,
}

/// Where the caret cell landed on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretRef {
    pub position: Position,
}

/// Reference slots republished after every render.
///
/// Both slots are set together or not at all, so a consumer never sees a
/// caret without its word or a block left over from an earlier frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementRefs {
    active_word: Option<WordRef>,
    caret: Option<CaretRef>,
}

impl ElementRefs {
    pub fn publish(&mut self, active: Option<(WordRef, CaretRef)>) {
        match active {
            Some((word, caret)) => {
                self.active_word = Some(word);
                self.caret = Some(caret);
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.active_word = None;
        self.caret = None;
    }

    pub fn active_word(&self) -> Option<WordRef> {
        self.active_word
    }

    pub fn caret(&self) -> Option<CaretRef> {
        self.caret
    }
}
