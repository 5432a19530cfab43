//! Candidate profile URLs and path tokenization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

use crate::tokenize::is_stopword;

/// Path segment marking a canonical company-profile URL.
pub const PROFILE_SEGMENT: &str = "/company/";

static PATH_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-/_]").expect("invalid PATH_SEPARATORS"));

/// Where a candidate URL was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    /// Built by slugifying the company name directly
    DirectGuess,
    /// Collected from a search results page
    Search,
}

impl std::fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateOrigin::DirectGuess => write!(f, "direct_guess"),
            CandidateOrigin::Search => write!(f, "search"),
        }
    }
}

/// A URL hypothesized to be the profile page for a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub origin: CandidateOrigin,
}

impl Candidate {
    pub fn direct_guess(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: CandidateOrigin::DirectGuess,
        }
    }

    pub fn from_search(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: CandidateOrigin::Search,
        }
    }
}

/// Extract the path component of a URL, lowercased. Scheme, host, query and
/// fragment are ignored. Server-relative inputs ("/company/acme") are taken
/// as-is; anything unparseable yields an empty path.
pub fn url_path(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        return parsed.path().to_lowercase();
    }
    let without_suffix = url.split(['?', '#']).next().unwrap_or("");
    if without_suffix.starts_with('/') {
        without_suffix.to_lowercase()
    } else {
        String::new()
    }
}

/// Tokens of a URL path: split on `-`, `/` and `_`, empties dropped, the
/// corporate stopword filter applied. A set, since order is irrelevant for
/// matching.
pub fn path_tokens(url: &str) -> BTreeSet<String> {
    let path = url_path(url);
    PATH_SEPARATORS
        .split(&path)
        .filter(|w| !w.is_empty() && !is_stopword(w))
        .map(String::from)
        .collect()
}

/// Last segment of the URL path ("" when the path is empty or just "/").
pub fn last_path_segment(url: &str) -> String {
    let path = url_path(url);
    path.trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Whether the URL path contains a company-profile segment. Used to prefer
/// canonical profile URLs over other page types a search may return.
pub fn has_profile_segment(url: &str) -> bool {
    url_path(url).contains(PROFILE_SEGMENT)
}
