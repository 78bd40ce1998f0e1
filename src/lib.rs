//! # pharma-papers
//!
//! Fetch research papers from PubMed and keep the ones with at least one
//! author affiliated with a pharmaceutical or biotech company, exported as
//! CSV.
//!
//! ## Architecture
//!
//! The pipeline is a single pass: query → esearch (PMIDs) → efetch (XML) →
//! parsed [`models::Paper`] records → industry filter → CSV export.
//!
//! - [`models`]: `Paper` and `Author` records
//! - [`classify`]: affiliation classification (academic vs. industry)
//! - [`pubmed`]: E-utilities client abstraction, HTTP implementation,
//!   response parsing, and an offline mock
//! - [`filter`]: industry-paper filter and summary statistics
//! - [`export`]: fixed-column CSV output
//! - [`error`]: the error taxonomy

pub mod classify;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod pubmed;

// Re-export commonly used types
pub use classify::{AffiliationClassifier, Category, Classification, ClassifierConfig};
pub use error::Error;
pub use export::{papers_to_csv_string, write_csv};
pub use filter::{filter_industry_papers, FilterStats};
pub use models::{Author, Paper};
pub use pubmed::{fetch_papers, EutilsClient, PubMedApi};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
