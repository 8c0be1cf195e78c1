use std::io;

use thiserror::Error;

/// Why a word list could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown word list `{0}`")]
    NotFound(String),

    #[error("failed to read word list `{id}`")]
    Io {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("word list `{id}` is not a JSON array of words")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("word list `{0}` contains no words")]
    Empty(String),

    #[error("failed to fetch word list `{id}`: {reason}")]
    Fetch { id: String, reason: String },

    #[error("word list `{id}` has an entry with inner whitespace: {word:?}")]
    Whitespace { id: String, word: String },
}

impl LoadError {
    /// `NotFound` lets a chain of sources fall through to the next one.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}
