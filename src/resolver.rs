//! Candidate Resolution Pipeline
//!
//! Turns a free-text company name into a best-first ordered list of candidate
//! profile URLs:
//! 1. A direct guess built by slugifying the name
//! 2. Profile-shaped links collected from a search results page
//! 3. A token-overlap pre-filter that drops obviously unrelated hits
//! 4. Scoring and a stable descending sort (earlier discovery wins ties)
//!
//! A failed or blocked search degrades to the direct guess alone; absence of
//! candidates is an empty list, never an error. Each resolution operates only
//! on its own inputs, so calls are independent and safe to run in parallel.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::candidate::{path_tokens, Candidate, CandidateOrigin, PROFILE_SEGMENT};
use crate::config::AppConfig;
use crate::score::{score_candidate, CandidateScore, ScoreWeights};
use crate::search::SearchClient;
use crate::tokenize::{core_tokens, slugify};

/// A candidate URL with its diagnostic score, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub url: String,
    pub origin: CandidateOrigin,
    pub score: CandidateScore,
}

/// Stateless resolver for company profile URLs. Holds only configuration;
/// every resolution is a pure function of the name and the search response.
#[derive(Debug, Clone)]
pub struct Resolver {
    base_url: String,
    weights: ScoreWeights,
    allowlist: HashSet<String>,
    max_candidates: usize,
}

impl Resolver {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.site.base_url.trim_end_matches('/').to_string(),
            weights: config.scoring.clone(),
            allowlist: config
                .resolver
                .short_brand_allowlist
                .iter()
                .map(|n| n.to_lowercase())
                .collect(),
            max_candidates: config.resolver.max_candidates,
        }
    }

    /// Override the number of candidates returned per company.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Build the direct-guess candidate from the slugified name, or `None`
    /// when slugification yields nothing plausible.
    pub fn direct_guess(&self, name: &str) -> Option<Candidate> {
        let slug = slugify(name);
        if slug.is_empty() {
            return None;
        }
        Some(Candidate::direct_guess(format!(
            "{}{}{}",
            self.base_url, PROFILE_SEGMENT, slug
        )))
    }

    /// Resolve a company name to a best-first candidate list: direct guess
    /// plus search hits, pre-filtered, scored and ranked. Search failures
    /// degrade to the direct guess alone.
    pub async fn resolve(&self, name: &str, search: &SearchClient) -> Vec<RankedCandidate> {
        let mut candidates = Vec::new();
        if let Some(guess) = self.direct_guess(name) {
            candidates.push(guess);
        }

        match search.search_candidates(name).await {
            Ok(urls) => {
                candidates.extend(urls.into_iter().map(Candidate::from_search));
            }
            Err(e) => {
                warn!(
                    "search unavailable for '{}' ({}); falling back to direct guess",
                    name, e
                );
            }
        }

        self.rank(name, candidates)
    }

    /// Pure ranking step: de-duplicate by URL (first seen wins), pre-filter,
    /// score and sort. Exposed separately so candidate lists from other
    /// discovery helpers can be ranked without a network call.
    pub fn rank(&self, name: &str, candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
        let tokens = core_tokens(name);

        // Very short or stopword-only names carry too little signal for the
        // overlap pre-filter; so do allow-listed brand abbreviations.
        let bypass_prefilter = tokens.is_empty()
            || tokens.iter().any(|t| t.len() <= 2)
            || self.allowlist.contains(&name.trim().to_lowercase());

        let mut seen = HashSet::new();
        let mut ranked: Vec<RankedCandidate> = Vec::new();

        for candidate in candidates {
            if !seen.insert(candidate.url.clone()) {
                continue;
            }

            if !bypass_prefilter {
                let ptk = path_tokens(&candidate.url);
                if tokens.intersection(&ptk).next().is_none() {
                    debug!("dropping unrelated candidate {}", candidate.url);
                    continue;
                }
            }

            let score = score_candidate(&tokens, &candidate.url, &self.weights);
            debug!(
                "scored {} -> {:.3} (jac={:.2} seq={:.2} contain={} profile={})",
                candidate.url,
                score.total,
                score.jaccard,
                score.sequence,
                score.contains_all_tokens,
                score.profile_path
            );
            ranked.push(RankedCandidate {
                url: candidate.url,
                origin: candidate.origin,
                score,
            });
        }

        // Stable sort: ties keep discovery order, guess before search hits.
        ranked.sort_by(|a, b| {
            b.score
                .total
                .partial_cmp(&a.score.total)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(self.max_candidates);
        ranked
    }
}
