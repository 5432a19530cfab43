//! Candidate Scoring
//!
//! Combines four signals into one weighted sum used to rank candidate URLs
//! for a single company name:
//! 1. Jaccard overlap between name tokens and path tokens
//! 2. Normalized edit-distance similarity between the joined name tokens and
//!    the last path segment
//! 3. A flat bonus when every name token appears in the path
//! 4. A flat bias toward canonical `/company/` profile paths
//!
//! Totals are not probabilities and are only comparable within one name's
//! candidate set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::candidate::{has_profile_segment, last_path_segment, path_tokens};
use crate::tokenize::joined_tokens;

/// Weights for the four scoring signals. The defaults are empirical
/// constants; they are configuration rather than invariants, but the worked
/// examples in the tests assume them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_jaccard_weight")]
    pub jaccard_weight: f64,
    #[serde(default = "default_sequence_weight")]
    pub sequence_weight: f64,
    #[serde(default = "default_containment_bonus")]
    pub containment_bonus: f64,
    #[serde(default = "default_profile_path_bias")]
    pub profile_path_bias: f64,
}

fn default_jaccard_weight() -> f64 {
    0.55
}

fn default_sequence_weight() -> f64 {
    0.20
}

fn default_containment_bonus() -> f64 {
    0.45
}

fn default_profile_path_bias() -> f64 {
    0.12
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            jaccard_weight: default_jaccard_weight(),
            sequence_weight: default_sequence_weight(),
            containment_bonus: default_containment_bonus(),
            profile_path_bias: default_profile_path_bias(),
        }
    }
}

/// Composite score for one (name, candidate URL) pair. Carries the component
/// values alongside the total so callers can log diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    /// Weighted sum of all signals
    pub total: f64,
    /// Raw Jaccard overlap, 0.0 - 1.0
    pub jaccard: f64,
    /// Raw sequence similarity, 0.0 - 1.0
    pub sequence: f64,
    /// Every name token appears in the path
    pub contains_all_tokens: bool,
    /// Path has a `/company/` segment
    pub profile_path: bool,
}

/// Jaccard overlap of two sets; 0.0 when either is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.union(b).count();
    inter as f64 / union as f64
}

/// Normalized Levenshtein similarity between two strings, 0.0 (different)
/// to 1.0 (identical). Case-insensitive.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let s1_lower = s1.to_lowercase();
    let s2_lower = s2.to_lowercase();

    if s1_lower == s2_lower {
        return 1.0;
    }

    if s1_lower.is_empty() || s2_lower.is_empty() {
        return 0.0;
    }

    let distance = levenshtein_distance(&s1_lower, &s2_lower);
    let max_len = s1_lower.chars().count().max(s2_lower.chars().count());

    1.0 - (distance as f64 / max_len as f64)
}

/// Score a candidate URL against a company's core token set.
pub fn score_candidate(
    name_tokens: &BTreeSet<String>,
    url: &str,
    weights: &ScoreWeights,
) -> CandidateScore {
    let ptk = path_tokens(url);

    let jac = jaccard(name_tokens, &ptk);

    let joined = joined_tokens(name_tokens);
    let last = last_path_segment(url).replace('-', " ");
    let sequence = similarity(&joined, &last);

    // Empty token sets must not earn the bonus: the vacuous-subset reading
    // would reward every candidate equally.
    let contains_all_tokens = !name_tokens.is_empty() && name_tokens.is_subset(&ptk);
    let profile_path = has_profile_segment(url);

    let total = weights.jaccard_weight * jac
        + weights.sequence_weight * sequence
        + if contains_all_tokens {
            weights.containment_bonus
        } else {
            0.0
        }
        + if profile_path {
            weights.profile_path_bias
        } else {
            0.0
        };

    CandidateScore {
        total,
        jaccard: jac,
        sequence,
        contains_all_tokens,
        profile_path,
    }
}

/// Calculate Levenshtein distance between two strings.
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len1][len2]
}
