use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::LoadError;
use crate::words::{WordListId, WordSource, parse_word_list};

/// Word lists dropped into `<config_dir>/wordtap/words/` as `<id>.json`.
pub struct UserDirSource {
    dir: PathBuf,
}

impl UserDirSource {
    pub fn new() -> Option<Self> {
        let dir = dirs::config_dir()?.join("wordtap").join("words");
        Some(Self { dir })
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, id: &WordListId) -> Option<PathBuf> {
        id.is_safe().then(|| self.dir.join(format!("{id}.json")))
    }
}

impl WordSource for UserDirSource {
    fn load(&self, id: &WordListId) -> Result<Vec<String>, LoadError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| LoadError::NotFound(id.to_string()))?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(id.to_string()));
            }
            Err(source) => {
                return Err(LoadError::Io {
                    id: id.to_string(),
                    source,
                });
            }
        };
        parse_word_list(id, &content)
    }

    fn list(&self) -> Vec<WordListId> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.strip_suffix(".json").map(WordListId::new)
            })
            .filter(|id| self.path_for(id).is_some())
            .collect()
    }
}
