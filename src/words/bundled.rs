use rust_embed::Embed;

use crate::error::LoadError;
use crate::words::{WordListId, WordSource, parse_word_list};

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

/// Word lists compiled into the binary.
pub struct BundledSource;

impl WordSource for BundledSource {
    fn load(&self, id: &WordListId) -> Result<Vec<String>, LoadError> {
        let filename = format!("{id}.json");
        let file = WordAssets::get(&filename).ok_or_else(|| LoadError::NotFound(id.to_string()))?;
        let content = String::from_utf8_lossy(file.data.as_ref());
        parse_word_list(id, &content)
    }

    fn list(&self) -> Vec<WordListId> {
        WordAssets::iter()
            .filter_map(|f| f.strip_suffix(".json").map(WordListId::new))
            .collect()
    }
}
