//! CSV export of qualifying papers.
//!
//! Six fixed columns; the header row is always written, even for an empty
//! paper set. Output is deterministic: the same input sequence yields
//! byte-identical bytes.

use std::io::Write;

use crate::classify::AffiliationClassifier;
use crate::error::Error;
use crate::models::Paper;

/// Fixed column headers, in output order.
pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Write papers as CSV to any writer.
pub fn write_csv<W: Write>(
    classifier: &AffiliationClassifier,
    papers: &[Paper],
    writer: W,
) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for paper in papers {
        wtr.write_record(paper_row(classifier, paper))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render papers to a CSV string.
pub fn papers_to_csv_string(
    classifier: &AffiliationClassifier,
    papers: &[Paper],
) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_csv(classifier, papers, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::Parse(format!("CSV output was not UTF-8: {}", e)))
}

fn paper_row(classifier: &AffiliationClassifier, paper: &Paper) -> [String; 6] {
    let authors = paper
        .non_academic_authors(classifier)
        .iter()
        .map(|a| a.full_name.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    let companies = paper.company_affiliations(classifier).join("; ");

    let date = paper
        .publication_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    [
        paper.pubmed_id.clone(),
        paper.title.clone(),
        date,
        authors,
        companies,
        paper.corresponding_email().unwrap_or_default().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use chrono::NaiveDate;

    fn sample_papers() -> Vec<Paper> {
        let mut paper = Paper::new("12345678", "A novel compound");
        paper.publication_date = NaiveDate::from_ymd_opt(2023, 3, 15);
        paper.authors = vec![
            Author::new("A. Lee")
                .with_affiliation("Genentech Inc., South San Francisco, CA")
                .with_email("a.lee@gene.com")
                .corresponding(),
            Author::new("B. Cho").with_affiliation("Dept. of Biology, Stanford University"),
        ];
        vec![paper]
    }

    #[test]
    fn test_header_always_written() {
        let classifier = AffiliationClassifier::default();
        let csv = papers_to_csv_string(&classifier, &[]).unwrap();
        assert_eq!(
            csv,
            "PubmedID,Title,Publication Date,Non-academic Author(s),\
             Company Affiliation(s),Corresponding Author Email\n"
        );
    }

    #[test]
    fn test_row_contents() {
        let classifier = AffiliationClassifier::default();
        let csv = papers_to_csv_string(&classifier, &sample_papers()).unwrap();
        let mut lines = csv.lines();
        lines.next(); // header
        let row = lines.next().unwrap();
        assert_eq!(
            row,
            "12345678,A novel compound,2023-03-15,A. Lee,Genentech Inc,a.lee@gene.com"
        );
    }

    #[test]
    fn test_academic_authors_excluded_from_row() {
        let classifier = AffiliationClassifier::default();
        let csv = papers_to_csv_string(&classifier, &sample_papers()).unwrap();
        assert!(!csv.contains("B. Cho"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let classifier = AffiliationClassifier::default();
        let mut papers = sample_papers();
        papers[0].title = "Aspirin, revisited: a \"classic\" drug".to_string();
        let csv = papers_to_csv_string(&classifier, &papers).unwrap();
        assert!(csv.contains("\"Aspirin, revisited: a \"\"classic\"\" drug\""));
    }

    #[test]
    fn test_export_is_deterministic() {
        let classifier = AffiliationClassifier::default();
        let papers = sample_papers();
        let first = papers_to_csv_string(&classifier, &papers).unwrap();
        let second = papers_to_csv_string(&classifier, &papers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_date_and_email_are_empty_fields() {
        let classifier = AffiliationClassifier::default();
        let mut paper = Paper::new("99", "Untitled work");
        paper.authors = vec![Author::new("C. Park").with_affiliation("Vertex, Boston, MA")];
        let csv = papers_to_csv_string(&classifier, &[paper]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "99,Untitled work,,C. Park,Vertex,");
    }
}
