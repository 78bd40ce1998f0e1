//! E-utilities HTTP client with a minimum-interval rate gate.

use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;

use crate::error::Error;
use crate::pubmed::PubMedApi;

/// E-utilities API endpoints
const EUTILS_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EUTILS_EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// NCBI allows ~3 requests/second without an API key, ~10 with one.
const INTERVAL_WITHOUT_KEY: Duration = Duration::from_millis(334);
const INTERVAL_WITH_KEY: Duration = Duration::from_millis(100);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest response-body snippet carried inside an `Error::Api`.
const BODY_SNIPPET_LEN: usize = 256;

/// Client for the PubMed E-utilities API.
///
/// Issues the two-step esearch/efetch calls, attaching the optional
/// `email`/`api_key` identification parameters. A process-wide gate blocks
/// before each outbound request so that consecutive requests are spaced by
/// the documented minimum interval. No retries: transport failures surface
/// as [`Error::Network`], non-2xx statuses as [`Error::Api`].
pub struct EutilsClient {
    http: reqwest::Client,
    gate: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    email: Option<String>,
    api_key: Option<String>,
}

impl std::fmt::Debug for EutilsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EutilsClient")
            .field("email", &self.email)
            .field("has_api_key", &self.api_key.is_some())
            .field("interval", &self.request_interval())
            .finish_non_exhaustive()
    }
}

impl EutilsClient {
    /// Create a client. The rate-gate interval depends on whether an API
    /// key is supplied.
    pub fn new(email: Option<String>, api_key: Option<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        let interval = if api_key.is_some() {
            INTERVAL_WITH_KEY
        } else {
            INTERVAL_WITHOUT_KEY
        };
        let quota = Quota::with_period(interval)
            .ok_or_else(|| Error::Validation("rate-limit interval must be non-zero".to_string()))?
            .allow_burst(nonzero!(1u32));

        Ok(Self {
            http,
            gate: RateLimiter::direct(quota),
            email,
            api_key,
        })
    }

    /// Minimum spacing between outbound requests.
    pub fn request_interval(&self) -> Duration {
        if self.api_key.is_some() {
            INTERVAL_WITH_KEY
        } else {
            INTERVAL_WITHOUT_KEY
        }
    }

    fn identification_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
        params
    }

    fn build_search_url(&self, query: &str, max_results: usize) -> String {
        let mut params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("term".to_string(), query.to_string()),
            ("retmax".to_string(), max_results.to_string()),
            ("retmode".to_string(), "xml".to_string()),
            ("sort".to_string(), "relevance".to_string()),
        ];
        params.extend(self.identification_params());

        format!("{}?{}", EUTILS_ESEARCH_URL, encode_params(&params))
    }

    fn build_fetch_url(&self, ids: &[String]) -> String {
        let mut params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("id".to_string(), ids.join(",")),
            ("retmode".to_string(), "xml".to_string()),
            ("rettype".to_string(), "abstract".to_string()),
        ];
        params.extend(self.identification_params());

        format!("{}?{}", EUTILS_EFETCH_URL, encode_params(&params))
    }

    /// Wait for the rate gate, then issue a GET and return the body text.
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        self.gate.until_ready().await;

        tracing::debug!(%url, "Requesting E-utilities endpoint");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
            return Err(Error::Api {
                status: status.as_u16(),
                body: snippet,
            });
        }

        response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))
    }
}

fn encode_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl PubMedApi for EutilsClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::Validation("query must not be empty".to_string()));
        }

        let url = self.build_search_url(query, max_results);
        let xml = self.get_text(&url).await?;
        let ids = super::parser::parse_search_response(&xml)?;
        tracing::debug!(count = ids.len(), "esearch returned PMIDs");
        Ok(ids)
    }

    async fn fetch(&self, ids: &[String]) -> Result<String, Error> {
        if ids.is_empty() {
            return Ok("<PubmedArticleSet></PubmedArticleSet>".to_string());
        }
        let url = self.build_fetch_url(ids);
        self.get_text(&url).await
    }
}
