pub mod bundled;
pub mod loader;
#[cfg(feature = "network")]
pub mod remote;
pub mod user_dir;

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::LoadError;

/// Identifier of a word list, e.g. `english` or `rust`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordListId(String);

impl WordListId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids end up in file names and URLs, so only letters, digits, `-`
    /// and `_` are accepted.
    pub fn is_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for WordListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A back-end that can produce an ordered word list by id.
pub trait WordSource: Send + Sync {
    fn load(&self, id: &WordListId) -> Result<Vec<String>, LoadError>;

    /// Ids this source knows about without loading them.
    fn list(&self) -> Vec<WordListId> {
        Vec::new()
    }
}

/// Tries each source in turn. `NotFound` falls through; any other error
/// stops the search so a broken user file is reported instead of hidden.
pub struct ChainSource {
    sources: Vec<Box<dyn WordSource>>,
}

impl ChainSource {
    pub fn new(sources: Vec<Box<dyn WordSource>>) -> Self {
        Self { sources }
    }
}

impl WordSource for ChainSource {
    fn load(&self, id: &WordListId) -> Result<Vec<String>, LoadError> {
        for source in &self.sources {
            match source.load(id) {
                Err(err) if err.is_not_found() => continue,
                other => return other,
            }
        }
        Err(LoadError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<WordListId> {
        let mut ids: Vec<WordListId> = self.sources.iter().flat_map(|s| s.list()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordFile {
    List(Vec<String>),
    Named { words: Vec<String> },
}

/// Parse a word list file: a bare JSON array, or `{ "name": .., "words": [..] }`.
///
/// Surrounding whitespace is trimmed from each entry. Empty entries are
/// kept (they render as empty blocks) but a list with no entries at all
/// is an error, as is an entry with whitespace inside it: Space confirms
/// a word, so such an entry could never be typed out.
pub fn parse_word_list(id: &WordListId, content: &str) -> Result<Vec<String>, LoadError> {
    let file: WordFile = serde_json::from_str(content).map_err(|source| LoadError::Parse {
        id: id.to_string(),
        source,
    })?;
    let words: Vec<String> = match file {
        WordFile::List(words) | WordFile::Named { words } => {
            words.into_iter().map(|w| w.trim().to_string()).collect()
        }
    };
    if words.is_empty() {
        return Err(LoadError::Empty(id.to_string()));
    }
    if let Some(word) = words.iter().find(|w| w.chars().any(char::is_whitespace)) {
        return Err(LoadError::Whitespace {
            id: id.to_string(),
            word: word.clone(),
        });
    }
    Ok(words)
}

/// Pick the words for one run.
///
/// With `shuffle`, words are drawn at random with replacement, so repeats
/// are expected. Without it the list is taken in order. A `count` of 0
/// keeps the whole list (shuffled in place when requested).
pub fn sample<R: Rng>(words: &[String], count: usize, shuffle: bool, rng: &mut R) -> Vec<String> {
    if words.is_empty() {
        return Vec::new();
    }
    match (count, shuffle) {
        (0, false) => words.to_vec(),
        (0, true) => {
            let mut all = words.to_vec();
            all.shuffle(rng);
            all
        }
        (n, false) => words.iter().take(n).cloned().collect(),
        (n, true) => (0..n)
            .map(|_| words[rng.gen_range(0..words.len())].clone())
            .collect(),
    }
}
