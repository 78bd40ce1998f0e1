//! End-to-end pipeline tests over the mock client and fixture XML.

use pharma_papers::filter::filter_industry_papers;
use pharma_papers::pubmed::{fetch_papers, MockApi, PubMedApi};
use pharma_papers::{papers_to_csv_string, write_csv, AffiliationClassifier, Error};

const FETCH_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID Version="1">11111111</PMID>
      <Article>
        <Journal>
          <Title>Journal of Oncology</Title>
          <JournalIssue>
            <PubDate><Year>2023</Year><Month>Mar</Month><Day>15</Day></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>A novel kinase inhibitor</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Lee</LastName>
            <ForeName>Anna</ForeName>
            <AffiliationInfo>
              <Affiliation>Genentech Inc., South San Francisco, CA. anna.lee@gene.com</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author>
            <LastName>Cho</LastName>
            <ForeName>Brian</ForeName>
            <AffiliationInfo>
              <Affiliation>Dept. of Biology, Stanford University, Stanford, CA</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation>
      <PMID Version="1">22222222</PMID>
      <Article>
        <Journal>
          <JournalIssue>
            <PubDate><Year>2022</Year></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Campus flora survey</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Kim</LastName>
            <ForeName>Dana</ForeName>
            <AffiliationInfo>
              <Affiliation>Department of Botany, University of Washington, Seattle, WA</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

fn loaded_mock() -> MockApi {
    let api = MockApi::new();
    api.set_ids(vec!["11111111".to_string(), "22222222".to_string()]);
    api.set_fetch_xml(FETCH_XML);
    api
}

#[tokio::test]
async fn pipeline_produces_expected_csv() {
    let api = loaded_mock();
    let classifier = AffiliationClassifier::default();

    let papers = fetch_papers(&api, "kinase inhibitors", 100).await.unwrap();
    assert_eq!(papers.len(), 2);

    let filtered = filter_industry_papers(&classifier, papers);
    let csv = papers_to_csv_string(&classifier, &filtered).unwrap();

    assert_eq!(
        csv,
        "PubmedID,Title,Publication Date,Non-academic Author(s),\
         Company Affiliation(s),Corresponding Author Email\n\
         11111111,A novel kinase inhibitor,2023-03-15,Anna Lee,Genentech Inc,anna.lee@gene.com\n"
    );
}

#[tokio::test]
async fn pipeline_respects_max_results() {
    let api = loaded_mock();
    let papers = fetch_papers(&api, "kinase inhibitors", 1).await.unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].pubmed_id, "11111111");
    assert_eq!(api.recorded_searches(), vec![("kinase inhibitors".to_string(), 1)]);
}

#[tokio::test]
async fn empty_query_fails_before_any_call() {
    let api = loaded_mock();
    let err = fetch_papers(&api, "  ", 100).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(api.recorded_searches().is_empty());
}

#[tokio::test]
async fn zero_qualifying_papers_still_yields_header() {
    let api = MockApi::new();
    let classifier = AffiliationClassifier::default();

    let papers = fetch_papers(&api, "obscure topic", 100).await.unwrap();
    let filtered = filter_industry_papers(&classifier, papers);
    assert!(filtered.is_empty());

    let csv = papers_to_csv_string(&classifier, &filtered).unwrap();
    assert!(csv.starts_with("PubmedID,Title,"));
    assert_eq!(csv.lines().count(), 1);
}

#[tokio::test]
async fn export_to_file_round_trips() {
    let api = loaded_mock();
    let classifier = AffiliationClassifier::default();
    let papers = fetch_papers(&api, "kinase inhibitors", 100).await.unwrap();
    let filtered = filter_industry_papers(&classifier, papers);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let file = std::fs::File::create(&path).unwrap();
    write_csv(&classifier, &filtered, file).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let in_memory = papers_to_csv_string(&classifier, &filtered).unwrap();
    assert_eq!(written, in_memory);
}

#[tokio::test]
async fn mock_implements_the_client_seam() {
    // The pipeline accepts any PubMedApi implementation
    let api: &dyn PubMedApi = &loaded_mock();
    let ids = api.search("anything", 100).await.unwrap();
    assert_eq!(ids.len(), 2);
}
