use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::event::AppEvent;
use crate::session::caret::CaretPositioner;
use crate::session::input::{GateDecision, Key};
use crate::session::store::WordStore;
use crate::session::surface::{Surface, build_surface};
use crate::ui::components::list_picker::ListPicker;
use crate::ui::components::typing_area::TypingAreaState;
use crate::ui::theme::Theme;
use crate::words::loader::{LoadOutcome, WordLoader};
use crate::words::{self, WordListId, WordSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    ListSelect,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub store: WordStore,
    pub caret: CaretPositioner,
    pub typing_state: TypingAreaState,
    pub picker: ListPicker,
    /// Id of the list currently on screen, once one has loaded.
    pub current_list: Option<WordListId>,
    /// Last load failure, shown until the next successful load.
    pub status: Option<String>,
    pub should_quit: bool,
    loader: WordLoader,
    events: Sender<AppEvent>,
    /// Config file that list switches are written to. `None` keeps them
    /// in memory, e.g. when the file on disk could not be read.
    config_path: Option<PathBuf>,
    source_words: Vec<String>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, theme: Theme, source: Arc<dyn WordSource>, events: Sender<AppEvent>) -> Self {
        let caret = CaretPositioner::new(config.char_advance);
        Self {
            screen: AppScreen::Typing,
            config,
            theme,
            store: WordStore::default(),
            caret,
            typing_state: TypingAreaState::default(),
            picker: ListPicker::default(),
            current_list: None,
            status: None,
            should_quit: false,
            loader: WordLoader::new(source),
            events,
            config_path: None,
            source_words: Vec::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    /// Ask the loader for the configured list; the result arrives as
    /// `AppEvent::WordsLoaded`.
    pub fn load_word_list(&mut self) -> u64 {
        let id = WordListId::new(self.config.word_list.clone());
        let tx = self.events.clone();
        self.loader.request(id, move |outcome| {
            let _ = tx.send(AppEvent::WordsLoaded(outcome));
        })
    }

    pub fn on_words_loaded(&mut self, outcome: LoadOutcome) {
        let Some(outcome) = self.loader.accept(outcome) else {
            return;
        };
        match outcome.result {
            Ok(words) => {
                tracing::info!(id = %outcome.id, count = words.len(), "word list loaded");
                self.source_words = words;
                self.current_list = Some(outcome.id);
                self.status = None;
                self.restart();
            }
            Err(err) => {
                let report = anyhow::Error::new(err);
                tracing::warn!(id = %outcome.id, error = %format!("{report:#}"), "word list load failed");
                self.status = Some(format!("{report:#}"));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Draw a fresh set of words from the loaded list and start over.
    pub fn restart(&mut self) {
        let sampled = words::sample(
            &self.source_words,
            self.config.word_count,
            self.config.shuffle,
            &mut self.rng,
        );
        self.store.set_word_list(sampled);
    }

    /// Type the same words again.
    pub fn retry(&mut self) {
        self.store.reset();
    }

    pub fn type_key(&mut self, key: Key) {
        if key.is_space() {
            // Never recorded; a space only confirms the word.
            if !self.store.advance_word() {
                tracing::trace!("space ignored: nothing to confirm");
            }
            return;
        }
        if let GateDecision::Suppress(reason) = self.store.apply_keystroke(key) {
            tracing::trace!(?key, ?reason, "key suppressed");
        }
    }

    pub fn surface(&self) -> Surface {
        build_surface(&self.store.snapshot(), &self.caret)
    }

    pub fn progress(&self) -> (usize, usize) {
        let total = self.store.words().len();
        (self.store.history().len().min(total), total)
    }

    pub fn open_list_picker(&mut self) {
        let items = self.loader.source().list();
        self.picker = ListPicker::open(items, &self.config.word_list);
        self.screen = AppScreen::ListSelect;
    }

    pub fn close_list_picker(&mut self) {
        self.screen = AppScreen::Typing;
    }

    /// Switch to the highlighted list and start loading it. The old words
    /// stay until the new ones arrive.
    ///
    /// Only `word_list` is written back to the config file; command line
    /// overrides held in `self.config` stay out of it.
    pub fn select_list(&mut self) {
        self.screen = AppScreen::Typing;
        let Some(id) = self.picker.selected_id().cloned() else {
            return;
        };
        if id.as_str() == self.config.word_list && self.current_list.as_ref() == Some(&id) {
            return;
        }
        self.config.word_list = id.to_string();
        if let Some(path) = &self.config_path {
            if let Err(err) = Config::save_word_list(path, id.as_str()) {
                tracing::warn!(error = %format!("{err:#}"), "failed to save word list choice");
            }
        }
        self.load_word_list();
    }
}
