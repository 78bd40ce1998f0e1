//! PubMed E-utilities access: client abstraction, HTTP implementation,
//! and response parsing.

mod client;
pub mod mock;
pub mod parser;

pub use client::EutilsClient;
pub use mock::MockApi;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Error;
use crate::models::Paper;

/// The two-step E-utilities interface.
///
/// A single concrete implementation ([`EutilsClient`]) talks to NCBI;
/// [`MockApi`] implements the same seam for offline tests.
#[async_trait]
pub trait PubMedApi: Send + Sync + std::fmt::Debug {
    /// Search for PMIDs matching a query, capped at `max_results`.
    /// An empty query fails with [`Error::Validation`] before any I/O.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, Error>;

    /// Fetch the raw efetch XML for a batch of PMIDs.
    async fn fetch(&self, ids: &[String]) -> Result<String, Error>;
}

/// Run the search-then-fetch pipeline and return parsed papers in search
/// order. PMIDs missing from the fetched document set are skipped with a
/// warning rather than failing the batch.
pub async fn fetch_papers(
    api: &dyn PubMedApi,
    query: &str,
    max_results: usize,
) -> Result<Vec<Paper>, Error> {
    let ids = api.search(query, max_results).await?;
    if ids.is_empty() {
        tracing::info!(%query, "No papers found for query");
        return Ok(Vec::new());
    }
    tracing::info!(count = ids.len(), %query, "Fetching paper details");

    let xml = api.fetch(&ids).await?;
    let parsed = parser::parse_fetch_response(&xml)?;

    let mut by_id: HashMap<String, Paper> = parsed
        .into_iter()
        .map(|p| (p.pubmed_id.clone(), p))
        .collect();

    let mut papers = Vec::with_capacity(ids.len());
    for id in &ids {
        match by_id.remove(id) {
            Some(paper) => papers.push(paper),
            None => tracing::warn!(pmid = %id, "PMID missing from fetch response, skipping"),
        }
    }
    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_article_xml() -> String {
        r#"<PubmedArticleSet>
<PubmedArticle><MedlineCitation>
  <PMID>222</PMID>
  <Article><ArticleTitle>Second</ArticleTitle></Article>
</MedlineCitation></PubmedArticle>
<PubmedArticle><MedlineCitation>
  <PMID>111</PMID>
  <Article><ArticleTitle>First</ArticleTitle></Article>
</MedlineCitation></PubmedArticle>
</PubmedArticleSet>"#
            .to_string()
    }

    #[tokio::test]
    async fn test_fetch_papers_preserves_search_order() {
        let api = MockApi::new();
        api.set_ids(vec!["111".to_string(), "222".to_string()]);
        api.set_fetch_xml(two_article_xml());

        let papers = fetch_papers(&api, "anything", 10).await.unwrap();
        let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_fetch_papers_skips_missing_documents() {
        let api = MockApi::new();
        api.set_ids(vec!["111".to_string(), "999".to_string()]);
        api.set_fetch_xml(two_article_xml());

        let papers = fetch_papers(&api, "anything", 10).await.unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].pubmed_id, "111");
    }

    #[tokio::test]
    async fn test_fetch_papers_empty_search() {
        let api = MockApi::new();
        let papers = fetch_papers(&api, "no hits", 10).await.unwrap();
        assert!(papers.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_papers_empty_query_is_validation_error() {
        let api = MockApi::new();
        let err = fetch_papers(&api, "", 10).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(api.recorded_searches().is_empty());
    }
}
