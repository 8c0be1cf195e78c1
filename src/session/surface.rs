//! Pure derivation of the typing surface from a store snapshot.

use crate::session::caret::CaretPositioner;
use crate::session::store::Snapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordState {
    /// Not reached yet.
    Before,
    Active,
    /// Has an entry in the typed history.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Plain,
    Correct,
    /// Typed past the end of a completed word.
    Extra,
}

/// Identity of a word block; the index disambiguates repeated words.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordKey {
    pub index: usize,
    pub word: String,
}

/// Identity of a glyph inside its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub position: usize,
    pub ch: char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub key: GlyphKey,
    pub ch: char,
    pub mark: Mark,
}

impl Glyph {
    fn new(position: usize, ch: char, mark: Mark) -> Self {
        Self {
            key: GlyphKey { position, ch },
            ch,
            mark,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caret {
    /// Cells from the start of the word block.
    pub offset: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBlock {
    pub key: WordKey,
    pub state: WordState,
    pub glyphs: Vec<Glyph>,
    /// Surplus chars from the typed history, after the word's own glyphs.
    pub extras: Vec<Glyph>,
    pub caret: Option<Caret>,
}

impl WordBlock {
    pub fn width(&self) -> usize {
        self.glyphs.len() + self.extras.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    pub blocks: Vec<WordBlock>,
}

impl Surface {
    pub fn active(&self) -> Option<&WordBlock> {
        self.blocks.iter().find(|b| b.state == WordState::Active)
    }
}

/// A position counts as correct only once it has been typed and matches.
///
/// For the active block `word_ch` and `active_ch` are the same char; the
/// comparison is kept so the block being drawn and the word being scored
/// can never silently disagree.
fn is_correct(word_ch: char, active_ch: Option<char>, typed_ch: Option<char>) -> bool {
    match (typed_ch, active_ch) {
        (Some(typed), Some(active)) => typed == active && active == word_ch,
        _ => false,
    }
}

/// Classify word `index` against the history length and the active word.
///
/// The index test is authoritative. The value test only guards against a
/// caller whose active word disagrees with the list: then nothing is active.
pub fn word_state(index: usize, word: &str, active_word: Option<&str>, history_len: usize) -> WordState {
    if index == history_len && active_word == Some(word) {
        WordState::Active
    } else if index < history_len {
        WordState::Done
    } else {
        WordState::Before
    }
}

pub fn build_surface(snapshot: &Snapshot<'_>, caret: &CaretPositioner) -> Surface {
    let history_len = snapshot.history.len();

    let blocks = snapshot
        .words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let state = word_state(index, word, snapshot.active_word, history_len);
            match state {
                WordState::Active => active_block(index, word, snapshot, caret),
                WordState::Done | WordState::Before => {
                    inactive_block(index, word, state, snapshot.history.get(index))
                }
            }
        })
        .collect();

    Surface { blocks }
}

fn active_block(index: usize, word: &str, snapshot: &Snapshot<'_>, caret: &CaretPositioner) -> WordBlock {
    let active: Vec<char> = snapshot.active_word.unwrap_or_default().chars().collect();
    let typed: Vec<char> = snapshot.user_input.chars().collect();

    let glyphs = word
        .chars()
        .enumerate()
        .map(|(k, ch)| {
            let mark = if is_correct(ch, active.get(k).copied(), typed.get(k).copied()) {
                Mark::Correct
            } else {
                Mark::Plain
            };
            Glyph::new(k, ch, mark)
        })
        .collect();

    WordBlock {
        key: WordKey { index, word: word.to_string() },
        state: WordState::Active,
        glyphs,
        extras: Vec::new(),
        caret: Some(Caret {
            offset: caret.offset(typed.len()),
        }),
    }
}

fn inactive_block(index: usize, word: &str, state: WordState, typed: Option<&String>) -> WordBlock {
    let word_len = word.chars().count();
    let glyphs = word
        .chars()
        .enumerate()
        .map(|(k, ch)| Glyph::new(k, ch, Mark::Plain))
        .collect();

    let extras = typed
        .map(|typed| {
            typed
                .chars()
                .enumerate()
                .skip(word_len)
                .map(|(k, ch)| Glyph::new(k, ch, Mark::Extra))
                .collect()
        })
        .unwrap_or_default();

    WordBlock {
        key: WordKey { index, word: word.to_string() },
        state,
        glyphs,
        extras,
        caret: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn render(words: &[&str], active: Option<&str>, input: &str, history: &[&str]) -> Surface {
        let words = owned(words);
        let history = owned(history);
        let snapshot = Snapshot {
            words: &words,
            active_word: active,
            user_input: input,
            history: &history,
        };
        build_surface(&snapshot, &CaretPositioner::new(1))
    }

    fn marks(block: &WordBlock) -> Vec<Mark> {
        block.glyphs.iter().map(|g| g.mark).collect()
    }

    #[test]
    fn test_partial_input_on_first_word() {
        let surface = render(&["cat", "dog"], Some("cat"), "ca", &[]);
        let cat = &surface.blocks[0];
        assert_eq!(cat.state, WordState::Active);
        assert_eq!(marks(cat), vec![Mark::Correct, Mark::Correct, Mark::Plain]);
        assert_eq!(cat.caret, Some(Caret { offset: 2 }));

        let dog = &surface.blocks[1];
        assert_eq!(dog.state, WordState::Before);
        assert!(dog.glyphs.iter().all(|g| g.mark == Mark::Plain));
        assert!(dog.extras.is_empty());
        assert!(dog.caret.is_none());
    }

    #[test]
    fn test_completed_word_with_extra_char() {
        let surface = render(&["cat", "dog"], Some("dog"), "", &["cats"]);
        let cat = &surface.blocks[0];
        assert_eq!(cat.state, WordState::Done);
        let extras: String = cat.extras.iter().map(|g| g.ch).collect();
        assert_eq!(extras, "s");
        assert!(cat.extras.iter().all(|g| g.mark == Mark::Extra));
        assert!(cat.glyphs.iter().all(|g| g.mark == Mark::Plain));

        let dog = &surface.blocks[1];
        assert_eq!(dog.state, WordState::Active);
        assert_eq!(dog.caret, Some(Caret { offset: 0 }));
    }

    #[test]
    fn test_mistyped_position_is_not_correct() {
        let surface = render(&["cat"], Some("cat"), "cx", &[]);
        assert_eq!(
            marks(&surface.blocks[0]),
            vec![Mark::Correct, Mark::Plain, Mark::Plain]
        );
    }

    #[test]
    fn test_correct_never_set_beyond_input() {
        let word = "abcdef";
        for n in 0..=word.len() {
            let input = &word[..n];
            let surface = render(&[word], Some(word), input, &[]);
            for (k, glyph) in surface.blocks[0].glyphs.iter().enumerate() {
                assert_eq!(glyph.mark == Mark::Correct, k < n, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_extras_keep_order_and_length() {
        let surface = render(&["go", "on"], Some("on"), "", &["gopher"]);
        let extras: String = surface.blocks[0].extras.iter().map(|g| g.ch).collect();
        assert_eq!(extras, "pher");
        let positions: Vec<usize> = surface.blocks[0].extras.iter().map(|g| g.key.position).collect();
        assert_eq!(positions, vec![2, 3, 4, 5]);
        assert_eq!(surface.blocks[0].width(), 6);
    }

    #[test]
    fn test_short_history_entry_has_no_extras() {
        let surface = render(&["cat", "dog"], Some("dog"), "", &["ca"]);
        assert!(surface.blocks[0].extras.is_empty());
    }

    #[test]
    fn test_exactly_one_active_at_history_index() {
        let words = ["a", "b", "c", "d"];
        for done in 0..words.len() {
            let history: Vec<&str> = words[..done].to_vec();
            let surface = render(&words, Some(words[done]), "", &history);
            let active: Vec<usize> = surface
                .blocks
                .iter()
                .filter(|b| b.state == WordState::Active)
                .map(|b| b.key.index)
                .collect();
            assert_eq!(active, vec![done]);
            for block in &surface.blocks {
                let expected = match block.key.index.cmp(&done) {
                    std::cmp::Ordering::Less => WordState::Done,
                    std::cmp::Ordering::Equal => WordState::Active,
                    std::cmp::Ordering::Greater => WordState::Before,
                };
                assert_eq!(block.state, expected);
            }
        }
    }

    #[test]
    fn test_duplicate_words_select_by_index() {
        let surface = render(&["the", "cat", "the"], Some("the"), "t", &["the", "cat"]);
        assert_eq!(surface.blocks[0].state, WordState::Done);
        assert_eq!(surface.blocks[2].state, WordState::Active);
        assert_eq!(surface.active().map(|b| b.key.index), Some(2));
    }

    #[test]
    fn test_mismatched_active_word_marks_nothing_active() {
        let surface = render(&["cat", "dog"], Some("dog"), "d", &[]);
        assert!(surface.active().is_none());
        assert!(surface.blocks.iter().all(|b| b.caret.is_none()));
    }

    #[test]
    fn test_finished_list_has_no_active_word() {
        let surface = render(&["cat", "dog"], None, "", &["cat", "dog"]);
        assert!(surface.active().is_none());
        assert!(surface.blocks.iter().all(|b| b.state == WordState::Done));
    }

    #[test]
    fn test_history_longer_than_list_is_ignored() {
        let surface = render(&["cat"], None, "", &["cats", "dog", "fox"]);
        assert_eq!(surface.blocks.len(), 1);
        assert_eq!(surface.blocks[0].extras.len(), 1);
    }

    #[test]
    fn test_empty_word_renders_empty_active_block() {
        let surface = render(&["", "dog"], Some(""), "", &[]);
        let block = &surface.blocks[0];
        assert_eq!(block.state, WordState::Active);
        assert!(block.glyphs.is_empty());
        assert_eq!(block.caret, Some(Caret { offset: 0 }));
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let surface = render(&[], None, "", &[]);
        assert!(surface.blocks.is_empty());
    }

    #[test]
    fn test_caret_uses_char_advance() {
        let words = owned(&["hello"]);
        let snapshot = Snapshot {
            words: &words,
            active_word: Some("hello"),
            user_input: "hel",
            history: &[],
        };
        let surface = build_surface(&snapshot, &CaretPositioner::new(2));
        assert_eq!(surface.blocks[0].caret, Some(Caret { offset: 6 }));
    }

    #[test]
    fn test_keys_unique_with_repeats() {
        let surface = render(&["aa", "aa", "aa"], Some("aa"), "a", &["aa"]);
        let word_keys: HashSet<&WordKey> = surface.blocks.iter().map(|b| &b.key).collect();
        assert_eq!(word_keys.len(), 3);
        for block in &surface.blocks {
            let glyph_keys: HashSet<GlyphKey> = block.glyphs.iter().map(|g| g.key).collect();
            assert_eq!(glyph_keys.len(), block.glyphs.len());
        }
    }

    #[test]
    fn test_word_state_classification() {
        assert_eq!(word_state(0, "a", Some("a"), 0), WordState::Active);
        assert_eq!(word_state(0, "a", Some("b"), 0), WordState::Before);
        assert_eq!(word_state(0, "a", Some("b"), 1), WordState::Done);
        assert_eq!(word_state(2, "a", None, 1), WordState::Before);
    }
}
