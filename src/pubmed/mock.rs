//! Mock API client for offline testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Error;
use crate::pubmed::PubMedApi;

/// A test double implementing [`PubMedApi`] with canned responses.
#[derive(Debug, Default)]
pub struct MockApi {
    ids: Mutex<Option<Vec<String>>>,
    fetch_xml: Mutex<Option<String>>,
    searches: Mutex<Vec<(String, usize)>>,
}

impl MockApi {
    /// Create a mock with no canned responses (empty results).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PMIDs returned by `search`.
    pub fn set_ids(&self, ids: Vec<String>) {
        *self.ids.lock().unwrap() = Some(ids);
    }

    /// Set the raw XML returned by `fetch`.
    pub fn set_fetch_xml(&self, xml: impl Into<String>) {
        *self.fetch_xml.lock().unwrap() = Some(xml.into());
    }

    /// Queries observed by `search`, in call order.
    pub fn recorded_searches(&self) -> Vec<(String, usize)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PubMedApi for MockApi {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::Validation("query must not be empty".to_string()));
        }
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        let ids = self.ids.lock().unwrap().clone().unwrap_or_default();
        Ok(ids.into_iter().take(max_results).collect())
    }

    async fn fetch(&self, _ids: &[String]) -> Result<String, Error> {
        let xml = self.fetch_xml.lock().unwrap().clone();
        Ok(xml.unwrap_or_else(|| "<PubmedArticleSet></PubmedArticleSet>".to_string()))
    }
}
