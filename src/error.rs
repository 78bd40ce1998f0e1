//! Error taxonomy for the fetch-parse-classify-export pipeline.

/// Errors that can occur while fetching and exporting papers.
///
/// Per-record parsing problems (a missing title, an unparseable author) are
/// recovered locally with warnings and never surface here; these variants
/// cover the fatal cases only.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input detected before any network call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Network or transport error, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx HTTP status from the E-utilities API
    #[error("PubMed API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// Response does not match the expected structure at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::Parse(format!("XML: {}", err))
    }
}
