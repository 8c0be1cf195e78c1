use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_word_list")]
    pub word_list: String,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_char_advance")]
    pub char_advance: u16,
    #[serde(default)]
    pub remote_base_url: Option<String>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_word_list() -> String {
    "english".to_string()
}
fn default_word_count() -> usize {
    50
}
fn default_shuffle() -> bool {
    true
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_char_advance() -> u16 {
    1
}
fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_list: default_word_list(),
            word_count: default_word_count(),
            shuffle: default_shuffle(),
            theme: default_theme(),
            char_advance: default_char_advance(),
            remote_base_url: None,
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Record `word_list` in the file at `path`, leaving the other saved
    /// settings as the file has them.
    pub fn save_word_list(path: &Path, word_list: &str) -> Result<()> {
        let mut on_disk = Self::load_from(path)?;
        on_disk.word_list = word_list.to_string();
        on_disk.save_to(path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordtap")
            .join("config.toml")
    }

    /// Clamp values a hand-edited file could set out of range.
    pub fn normalize(&mut self) {
        self.char_advance = self.char_advance.max(1);
        self.tick_rate_ms = self.tick_rate_ms.clamp(16, 1000);
        if self.word_list.trim().is_empty() {
            self.word_list = default_word_list();
        }
        if self
            .remote_base_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.remote_base_url = None;
        }
    }
}
