//! Parsing of E-utilities XML responses into domain records.
//!
//! Top-level structure failures are fatal for the call; per-record problems
//! (missing title, unparseable author) degrade that record with a warning
//! rather than aborting the batch.

use std::sync::OnceLock;

use chrono::NaiveDate;
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;

use crate::error::Error;
use crate::models::{Author, Paper};

fn email_re() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
    })
}

/// Parse an esearch response into an ordered list of PMIDs.
///
/// An empty `IdList` is valid and yields an empty vector.
pub fn parse_search_response(xml: &str) -> Result<Vec<String>, Error> {
    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct ESearchResult {
        IdList: Option<IdList>,
    }

    #[derive(Debug, Deserialize)]
    struct IdList {
        #[serde(rename = "Id", default)]
        ids: Vec<String>,
    }

    let result: ESearchResult = from_str(xml)
        .map_err(|e| Error::Parse(format!("Failed to parse esearch XML: {}", e)))?;

    Ok(result.IdList.map(|l| l.ids).unwrap_or_default())
}

/// Parse an efetch response into papers, in document order.
pub fn parse_fetch_response(xml: &str) -> Result<Vec<Paper>, Error> {
    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct PubmedArticleSet {
        #[serde(rename = "PubmedArticle", default)]
        articles: Vec<PubmedArticle>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct PubmedArticle {
        MedlineCitation: Option<MedlineCitation>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct MedlineCitation {
        PMID: Option<Pmid>,
        Article: Option<Article>,
    }

    #[derive(Debug, Deserialize)]
    struct Pmid {
        #[serde(rename = "$text")]
        id: String,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct Article {
        Journal: Option<Journal>,
        ArticleTitle: Option<ArticleTitle>,
        Abstract: Option<Abstract>,
        AuthorList: Option<AuthorList>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct Journal {
        Title: Option<String>,
        JournalIssue: Option<JournalIssue>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct JournalIssue {
        PubDate: Option<PubDate>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct PubDate {
        Year: Option<String>,
        Month: Option<String>,
        Day: Option<String>,
        MedlineDate: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct ArticleTitle {
        #[serde(rename = "$text")]
        title: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Abstract {
        #[serde(rename = "AbstractText", default)]
        abstract_texts: Vec<AbstractText>,
    }

    #[derive(Debug, Deserialize)]
    struct AbstractText {
        #[serde(rename = "$text")]
        text: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct AuthorList {
        #[serde(rename = "Author", default)]
        authors: Vec<AuthorEntry>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct AuthorEntry {
        LastName: Option<String>,
        ForeName: Option<String>,
        Initials: Option<String>,
        CollectiveName: Option<String>,
        #[serde(rename = "AffiliationInfo", default)]
        affiliations: Vec<AffiliationInfo>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct AffiliationInfo {
        Affiliation: Option<String>,
    }

    let result: PubmedArticleSet =
        from_str(xml).map_err(|e| Error::Parse(format!("Failed to parse efetch XML: {}", e)))?;

    let mut papers = Vec::new();

    for article in result.articles {
        let citation = match article.MedlineCitation {
            Some(c) => c,
            None => {
                tracing::warn!("Skipping article without MedlineCitation");
                continue;
            }
        };

        let pubmed_id = match citation.PMID {
            Some(p) if !p.id.trim().is_empty() => p.id.trim().to_string(),
            _ => {
                tracing::warn!("Skipping article without PMID");
                continue;
            }
        };

        let article_body = citation.Article;

        let title = article_body
            .as_ref()
            .and_then(|a| a.ArticleTitle.as_ref())
            .and_then(|t| t.title.as_deref())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            tracing::warn!(pmid = %pubmed_id, "Record has no title, defaulting to empty");
        }

        let journal = article_body
            .as_ref()
            .and_then(|a| a.Journal.as_ref())
            .and_then(|j| j.Title.as_ref())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let publication_date = article_body
            .as_ref()
            .and_then(|a| a.Journal.as_ref())
            .and_then(|j| j.JournalIssue.as_ref())
            .and_then(|ji| ji.PubDate.as_ref())
            .and_then(|pd| {
                complete_date(
                    pd.Year.as_deref(),
                    pd.Month.as_deref(),
                    pd.Day.as_deref(),
                    pd.MedlineDate.as_deref(),
                )
            });

        let abstract_text = article_body.as_ref().and_then(|a| {
            a.Abstract.as_ref().and_then(|ab| {
                let joined = ab
                    .abstract_texts
                    .iter()
                    .filter_map(|t| t.text.as_deref())
                    .collect::<Vec<_>>()
                    .join(" ");
                if joined.is_empty() {
                    None
                } else {
                    Some(joined)
                }
            })
        });

        let mut authors = Vec::new();
        if let Some(list) = article_body.as_ref().and_then(|a| a.AuthorList.as_ref()) {
            // PubMed often lists an affiliation on one author of a group;
            // entries without one inherit the nearest preceding affiliation.
            // Best-effort heuristic over the upstream format, not a guarantee.
            let mut group_affiliation: Option<String> = None;
            for entry in &list.authors {
                let full_name = match assemble_name(
                    entry.LastName.as_deref(),
                    entry.ForeName.as_deref(),
                    entry.Initials.as_deref(),
                    entry.CollectiveName.as_deref(),
                ) {
                    Some(name) => name,
                    None => {
                        tracing::warn!(pmid = %pubmed_id, "Skipping author without a usable name");
                        continue;
                    }
                };

                let own_affiliation = entry
                    .affiliations
                    .iter()
                    .filter_map(|a| a.Affiliation.as_deref())
                    .map(str::trim)
                    .find(|a| !a.is_empty())
                    .map(str::to_string);
                // The email belongs to the author whose own affiliation
                // block carries it, never to authors inheriting the text.
                let email = own_affiliation
                    .as_deref()
                    .and_then(|a| email_re().find(a))
                    .map(|m| m.as_str().to_string());
                let is_corresponding = email.is_some();

                if own_affiliation.is_some() {
                    group_affiliation = own_affiliation.clone();
                }
                let affiliation = own_affiliation.or_else(|| group_affiliation.clone());

                authors.push(Author {
                    full_name,
                    affiliation,
                    email,
                    is_corresponding,
                });
            }
        }

        papers.push(Paper {
            pubmed_id,
            title,
            publication_date,
            authors,
            journal,
            abstract_text,
        });
    }

    Ok(papers)
}

/// Assemble a display name from PubMed author name parts.
///
/// Preference order matches the upstream convention: "ForeName LastName",
/// then "Initials LastName", then LastName alone, then CollectiveName.
fn assemble_name(
    last: Option<&str>,
    fore: Option<&str>,
    initials: Option<&str>,
    collective: Option<&str>,
) -> Option<String> {
    fn clean(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    match (clean(last), clean(fore), clean(initials)) {
        (Some(l), Some(f), _) => Some(format!("{} {}", f, l)),
        (Some(l), None, Some(i)) => Some(format!("{} {}", i, l)),
        (Some(l), None, None) => Some(l.to_string()),
        (None, _, _) => clean(collective).map(str::to_string),
    }
}

/// Complete a possibly partial publication date to a calendar date.
///
/// Missing month/day default to January / the 1st. A `MedlineDate` string
/// such as "2019 Nov-Dec" contributes its leading year only.
fn complete_date(
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
    medline_date: Option<&str>,
) -> Option<NaiveDate> {
    if let Some(year) = year.and_then(|y| y.trim().parse::<i32>().ok()) {
        let month = month.and_then(parse_month).unwrap_or(1);
        let day = day.and_then(|d| d.trim().parse::<u32>().ok()).unwrap_or(1);
        return NaiveDate::from_ymd_opt(year, month, day)
            .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
            .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    let year = medline_date.and_then(|s| {
        s.split(|c: char| !c.is_ascii_digit())
            .find(|t| t.len() == 4)
            .and_then(|t| t.parse::<i32>().ok())
    })?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

fn parse_month(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let name = s.get(..3)?.to_ascii_lowercase();
    let n = match name.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}
