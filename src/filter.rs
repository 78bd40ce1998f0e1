//! Filtering papers down to those with industry-affiliated authors.

use std::collections::HashSet;

use crate::classify::AffiliationClassifier;
use crate::models::Paper;

/// Retain only papers with at least one industry-classified author.
/// Input order is preserved; pure, no I/O.
pub fn filter_industry_papers(
    classifier: &AffiliationClassifier,
    papers: Vec<Paper>,
) -> Vec<Paper> {
    papers
        .into_iter()
        .filter(|p| !p.non_academic_authors(classifier).is_empty())
        .collect()
}

/// Summary counts over a paper set, logged in debug mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStats {
    pub total_papers: usize,
    pub papers_with_industry_authors: usize,
    pub unique_companies: usize,
    pub total_industry_authors: usize,
    pub papers_with_corresponding_email: usize,
}

impl FilterStats {
    /// Collect statistics over a paper sequence.
    pub fn collect(classifier: &AffiliationClassifier, papers: &[Paper]) -> Self {
        let mut companies: HashSet<String> = HashSet::new();
        let mut papers_with_industry_authors = 0;
        let mut total_industry_authors = 0;
        let mut papers_with_corresponding_email = 0;

        for paper in papers {
            let industry = paper.non_academic_authors(classifier);
            if !industry.is_empty() {
                papers_with_industry_authors += 1;
                total_industry_authors += industry.len();
                companies.extend(paper.company_affiliations(classifier));
            }
            if paper.corresponding_email().is_some() {
                papers_with_corresponding_email += 1;
            }
        }

        Self {
            total_papers: papers.len(),
            papers_with_industry_authors,
            unique_companies: companies.len(),
            total_industry_authors,
            papers_with_corresponding_email,
        }
    }
}
