use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::GroupKey,
    group_by,
    protocol::{QueryKind, WordRecord},
    Grouped, Selector,
};
use tracing::{debug, warn};
use url::Url;

pub mod error;
pub mod view;

pub use error::LookupError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.datamuse.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SAVED_DELIMITER: &str = ", ";

/// Field of a rhyme result used to section the rendered list.
pub const RHYME_GROUP_FIELD: &str = "numSyllables";

#[async_trait]
pub trait WordLookup: Send + Sync {
    async fn lookup(&self, kind: QueryKind, word: &str) -> Result<Vec<WordRecord>, LookupError>;

    async fn rhymes(&self, word: &str) -> Result<Vec<WordRecord>, LookupError> {
        self.lookup(QueryKind::Rhymes, word).await
    }

    async fn similar(&self, word: &str) -> Result<Vec<WordRecord>, LookupError> {
        self.lookup(QueryKind::Similar, word).await
    }
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub max_results: Option<u32>,
    /// `None` leaves requests without an overall deadline.
    pub timeout: Option<Duration>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            max_results: None,
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

/// [`WordLookup`] backed by the Datamuse `/words` endpoint.
///
/// Each call issues exactly one GET. Overlapping calls are not de-duplicated
/// and failures are not retried.
#[derive(Debug, Clone)]
pub struct DatamuseClient {
    http: Client,
    base_url: String,
    max_results: Option<u32>,
}

impl DatamuseClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let parsed = Url::parse(config.base_url.trim()).map_err(|source| {
            LookupError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            }
        })?;
        if parsed.cannot_be_a_base() {
            return Err(LookupError::UnsupportedBaseUrl {
                url: config.base_url.clone(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            max_results: config.max_results,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WordLookup for DatamuseClient {
    async fn lookup(&self, kind: QueryKind, word: &str) -> Result<Vec<WordRecord>, LookupError> {
        let base_url = &self.base_url;
        let mut query = vec![(kind.param(), word.to_string())];
        if let Some(max) = self.max_results {
            query.push(("max", max.to_string()));
        }
        debug!(?kind, word, "querying word service");

        let body = self
            .http
            .get(format!("{base_url}/words"))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let records: Vec<WordRecord> = serde_json::from_str(&body).map_err(|error| {
            warn!(?kind, word, %error, "word service returned an unexpected body");
            error
        })?;
        debug!(?kind, word, count = records.len(), "word service answered");
        Ok(records)
    }
}

/// Sections rhyme results by syllable count.
pub fn group_rhymes(records: Vec<WordRecord>) -> Grouped<GroupKey, WordRecord> {
    group_by(records, Selector::field(RHYME_GROUP_FIELD))
}

/// In-memory list of words saved during one session.
///
/// Words are appended as given; saving the same word twice lists it twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedWords {
    words: Vec<String>,
}

impl SavedWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: impl Into<String>) {
        self.words.push(word.into());
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn display(&self, delimiter: &str) -> String {
        self.words.join(delimiter)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
