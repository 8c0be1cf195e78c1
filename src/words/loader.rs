use std::sync::Arc;
use std::thread;

use crate::error::LoadError;
use crate::words::{WordListId, WordSource};

/// Result of one background load, tagged with the request that started it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub id: WordListId,
    pub result: Result<Vec<String>, LoadError>,
}

/// Runs word list loads off the UI thread.
///
/// Each request bumps a generation counter. Only the outcome of the most
/// recent request is accepted, so a slow load can never overwrite the
/// list chosen after it.
pub struct WordLoader {
    source: Arc<dyn WordSource>,
    latest: u64,
    pending: Option<WordListId>,
}

impl WordLoader {
    pub fn new(source: Arc<dyn WordSource>) -> Self {
        Self {
            source,
            latest: 0,
            pending: None,
        }
    }

    pub fn source(&self) -> &dyn WordSource {
        self.source.as_ref()
    }

    /// Start loading `id`; `deliver` is called from the loader thread.
    pub fn request<F>(&mut self, id: WordListId, deliver: F) -> u64
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        self.latest += 1;
        let generation = self.latest;
        if let Some(previous) = self.pending.replace(id.clone()) {
            tracing::debug!(%previous, %id, "superseding pending word list load");
        }
        tracing::info!(%id, generation, "loading word list");

        let source = Arc::clone(&self.source);
        thread::spawn(move || {
            let result = source.load(&id);
            deliver(LoadOutcome {
                generation,
                id,
                result,
            });
        });
        generation
    }

    /// Hand back `outcome` if it answers the latest request, else drop it.
    pub fn accept(&mut self, outcome: LoadOutcome) -> Option<LoadOutcome> {
        if outcome.generation != self.latest {
            tracing::debug!(
                id = %outcome.id,
                generation = outcome.generation,
                latest = self.latest,
                "discarding stale word list load"
            );
            return None;
        }
        self.pending = None;
        Some(outcome)
    }

    pub fn pending(&self) -> Option<&WordListId> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    /// Loads `slow` only after the test releases it.
    struct Gated {
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl WordSource for Gated {
        fn load(&self, id: &WordListId) -> Result<Vec<String>, LoadError> {
            if id.as_str() == "slow" {
                self.release.lock().unwrap().recv().unwrap();
            }
            if id.as_str() == "missing" {
                return Err(LoadError::NotFound(id.to_string()));
            }
            Ok(vec![id.to_string()])
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn latest_request_wins_over_slow_earlier_one() {
        let (release_tx, release_rx) = mpsc::channel();
        let mut loader = WordLoader::new(Arc::new(Gated {
            release: Mutex::new(release_rx),
        }));
        let (tx, rx) = mpsc::channel();

        let slow_tx = tx.clone();
        let slow = loader.request(WordListId::new("slow"), move |o| {
            let _ = slow_tx.send(o);
        });
        let fast = loader.request(WordListId::new("fast"), move |o| {
            let _ = tx.send(o);
        });
        assert!(fast > slow);

        let first = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(first.generation, fast);
        let accepted = loader.accept(first).unwrap();
        assert_eq!(accepted.result.unwrap(), vec!["fast".to_string()]);
        assert!(!loader.is_loading());

        release_tx.send(()).unwrap();
        let late = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(late.generation, slow);
        assert!(loader.accept(late).is_none());
    }

    #[test]
    fn failures_are_delivered_not_panicked() {
        let (_release_tx, release_rx) = mpsc::channel();
        let mut loader = WordLoader::new(Arc::new(Gated {
            release: Mutex::new(release_rx),
        }));
        let (tx, rx) = mpsc::channel();
        loader.request(WordListId::new("missing"), move |o| {
            let _ = tx.send(o);
        });
        assert_eq!(loader.pending(), Some(&WordListId::new("missing")));

        let outcome = loader.accept(rx.recv_timeout(WAIT).unwrap()).unwrap();
        assert!(outcome.result.unwrap_err().is_not_found());
    }
}
