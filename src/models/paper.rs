//! Paper and author models for PubMed records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::{AffiliationClassifier, Category};

/// An author of a research paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Full display name, assembled from ForeName/LastName or CollectiveName.
    /// Never empty: entries with no usable name are dropped at parse time.
    pub full_name: String,

    /// Raw affiliation text as it appears in the record
    pub affiliation: Option<String>,

    /// Email address, when one appears inside the affiliation text
    pub email: Option<String>,

    /// Whether this author's affiliation text carried the email token
    pub is_corresponding: bool,
}

impl Author {
    /// Create an author with just a name.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            affiliation: None,
            email: None,
            is_corresponding: false,
        }
    }

    /// Set the affiliation text.
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Mark this author as corresponding.
    pub fn corresponding(mut self) -> Self {
        self.is_corresponding = true;
        self
    }
}

/// A research paper fetched from PubMed.
///
/// Authors are kept in the order the record lists them. The industry-related
/// views (`non_academic_authors`, `company_affiliations`) are computed against
/// a classifier at filter/export time rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// PubMed identifier (PMID)
    pub pubmed_id: String,

    /// Article title; empty string when the record carries none
    pub title: String,

    /// Publication date, normalized to a calendar date.
    /// Partial dates are completed with day 1 / January.
    pub publication_date: Option<NaiveDate>,

    /// Authors in source order; may be empty
    pub authors: Vec<Author>,

    /// Journal title
    pub journal: Option<String>,

    /// Abstract text, sections joined with spaces
    pub abstract_text: Option<String>,
}

impl Paper {
    /// Create a paper with required fields.
    pub fn new(pubmed_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            pubmed_id: pubmed_id.into(),
            title: title.into(),
            publication_date: None,
            authors: Vec::new(),
            journal: None,
            abstract_text: None,
        }
    }

    /// Authors whose affiliation classifies as industry, in source order.
    pub fn non_academic_authors<'a>(
        &'a self,
        classifier: &AffiliationClassifier,
    ) -> Vec<&'a Author> {
        self.authors
            .iter()
            .filter(|a| classifier.classify(a.affiliation.as_deref()).category == Category::Industry)
            .collect()
    }

    /// Deduplicated company names of industry-affiliated authors,
    /// in first-seen order.
    pub fn company_affiliations(&self, classifier: &AffiliationClassifier) -> Vec<String> {
        let mut companies = Vec::new();
        for author in &self.authors {
            let result = classifier.classify(author.affiliation.as_deref());
            if let Some(company) = result.company {
                if !companies.contains(&company) {
                    companies.push(company);
                }
            }
        }
        companies
    }

    /// Email of the corresponding author, falling back to the first
    /// author with any email.
    pub fn corresponding_email(&self) -> Option<&str> {
        self.authors
            .iter()
            .find(|a| a.is_corresponding && a.email.is_some())
            .or_else(|| self.authors.iter().find(|a| a.email.is_some()))
            .and_then(|a| a.email.as_deref())
    }
}
