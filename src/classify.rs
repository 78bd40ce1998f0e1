//! Affiliation classification: academic vs. pharma/biotech industry.
//!
//! The classifier is a pure function over an affiliation string. Term lists
//! are immutable configuration injected at construction, so tests can swap
//! in custom lists without touching process-wide state.

/// Classification category for an affiliation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Pharmaceutical/biotech company
    Industry,
    /// University, hospital, or other academic institution
    Academic,
    /// Absent, empty, or unrecognized affiliation
    Unknown,
}

/// Result of classifying a single affiliation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Company name; populated only when `category` is `Industry`
    pub company: Option<String>,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            category: Category::Unknown,
            company: None,
        }
    }
}

/// Term lists driving the classifier.
///
/// `known_companies` are canonical display names matched case-insensitively.
/// `industry_keywords` are strong domain terms ("pharmaceutical",
/// "therapeutics") that override an academic-term hit. `company_suffixes`
/// are corporate-form markers ("inc", "gmbh") that indicate industry only
/// when no academic term is present.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub known_companies: Vec<String>,
    pub industry_keywords: Vec<String>,
    pub company_suffixes: Vec<String>,
    pub academic_terms: Vec<String>,
}

fn to_strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            known_companies: to_strings(&[
                "Pfizer",
                "Novartis",
                "Roche",
                "Johnson & Johnson",
                "Merck",
                "GlaxoSmithKline",
                "GSK",
                "Sanofi",
                "AbbVie",
                "Bristol Myers Squibb",
                "AstraZeneca",
                "Eli Lilly",
                "Boehringer Ingelheim",
                "Bayer",
                "Takeda",
                "Gilead",
                "Biogen",
                "Regeneron",
                "Vertex",
                "Moderna",
                "BioNTech",
                "Amgen",
                "Genentech",
                "Celgene",
                "Novo Nordisk",
                "Daiichi Sankyo",
                "Illumina",
                "Thermo Fisher",
                "Agilent",
                "PerkinElmer",
            ]),
            industry_keywords: to_strings(&[
                "pharmaceutical",
                "pharmaceuticals",
                "pharma",
                "biotech",
                "biotechnology",
                "therapeutics",
                "biopharmaceutical",
                "biopharma",
                "biosciences",
                "biologics",
            ]),
            company_suffixes: to_strings(&[
                "inc",
                "inc.",
                "incorporated",
                "ltd",
                "ltd.",
                "limited",
                "corp",
                "corp.",
                "corporation",
                "llc",
                "plc",
                "gmbh",
                "co.",
                "holdings",
            ]),
            academic_terms: to_strings(&[
                "university",
                "college",
                "institute",
                "school",
                "school of medicine",
                "academy",
                "research center",
                "research centre",
                "medical center",
                "medical centre",
                "hospital",
                "clinic",
                "laboratory",
                "department",
                "dept",
                "faculty",
                "campus",
            ]),
        }
    }
}

/// Classifies affiliation strings against a fixed set of term lists.
#[derive(Debug, Clone, Default)]
pub struct AffiliationClassifier {
    config: ClassifierConfig,
}

impl AffiliationClassifier {
    /// Create a classifier with the built-in term lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom term lists.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify an affiliation string.
    ///
    /// Precedence, first match wins: absent or blank input is `Unknown`;
    /// an academic term yields `Academic` unless a known company or strong
    /// industry keyword is also present, in which case industry wins; a
    /// known-company or keyword match yields `Industry` with a company name.
    /// Never fails: any input maps to a result.
    pub fn classify(&self, affiliation: Option<&str>) -> Classification {
        let raw = match affiliation.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Classification::unknown(),
        };
        let lower = raw.to_lowercase();

        let company_hit = self
            .config
            .known_companies
            .iter()
            .find(|c| contains_term(&lower, &c.to_lowercase()));
        let keyword_hit = self
            .config
            .industry_keywords
            .iter()
            .any(|k| contains_term(&lower, k));
        let suffix_hit = self
            .config
            .company_suffixes
            .iter()
            .any(|k| contains_term(&lower, k));
        let academic_hit = self
            .config
            .academic_terms
            .iter()
            .any(|k| contains_term(&lower, k));

        // Company/keyword override beats the academic exclusion: a pharma
        // lab sited at a hospital is still industry. Bare corporate-form
        // suffixes do not override.
        if academic_hit && company_hit.is_none() && !keyword_hit {
            return Classification {
                category: Category::Academic,
                company: None,
            };
        }

        if let Some(canonical) = company_hit {
            return Classification {
                category: Category::Industry,
                company: Some(company_name(raw, canonical)),
            };
        }

        if keyword_hit || suffix_hit {
            return Classification {
                category: Category::Industry,
                company: Some(extract_company(raw)),
            };
        }

        Classification::unknown()
    }
}

/// Case-insensitive term match with word boundaries on both ends, so that
/// "inc" does not match inside "province" and "college" does not match
/// "Collegeville". Terms ending in '.' match that literal suffix.
fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(term) {
        let idx = start + pos;
        let end = idx + term.len();
        let before_ok = idx == 0 || !bytes[idx - 1].is_ascii_alphanumeric();
        let after_ok = term.ends_with('.')
            || end == haystack.len()
            || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = idx + 1;
    }
    false
}

/// Company name for a curated match: the leading clause of the affiliation
/// when it actually contains the matched name (keeps corporate forms like
/// "Genentech Inc"), else the canonical list entry.
fn company_name(raw: &str, canonical: &str) -> String {
    let clause = leading_clause(raw);
    if let Some(clause) = clause {
        if clause.to_lowercase().contains(&canonical.to_lowercase()) {
            return clause;
        }
    }
    canonical.to_string()
}

/// Best-effort company extraction for a keyword-only match: the leading
/// clause, else the whole string truncated to a bound.
fn extract_company(raw: &str) -> String {
    leading_clause(raw).unwrap_or_else(|| raw.chars().take(100).collect())
}

/// Substring before the first comma or semicolon, trimmed of whitespace and
/// a trailing period. None when too short to be a usable name.
fn leading_clause(raw: &str) -> Option<String> {
    let clause = raw
        .split(|c| c == ',' || c == ';')
        .next()
        .unwrap_or("")
        .trim()
        .trim_end_matches('.')
        .trim();
    if clause.len() >= 3 {
        Some(clause.to_string())
    } else {
        None
    }
}
