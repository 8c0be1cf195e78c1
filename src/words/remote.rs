use std::time::Duration;

use crate::error::LoadError;
use crate::words::{WordListId, WordSource, parse_word_list};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches `<base_url>/<id>.json` over HTTP.
pub struct RemoteSource {
    base_url: String,
}

impl RemoteSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `None` for ids that could change the path of the request.
    pub fn url_for(&self, id: &WordListId) -> Option<String> {
        id.is_safe().then(|| format!("{}/{id}.json", self.base_url))
    }
}

impl WordSource for RemoteSource {
    fn load(&self, id: &WordListId) -> Result<Vec<String>, LoadError> {
        let url = self
            .url_for(id)
            .ok_or_else(|| LoadError::NotFound(id.to_string()))?;
        let fetch_err = |reason: String| LoadError::Fetch {
            id: id.to_string(),
            reason,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| fetch_err(e.to_string()))?;
        tracing::debug!(%url, "fetching word list");

        let response = client.get(&url).send().map_err(|e| fetch_err(e.to_string()))?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {status}")));
        }
        let body = response.text().map_err(|e| fetch_err(e.to_string()))?;
        parse_word_list(id, &body)
    }
}
