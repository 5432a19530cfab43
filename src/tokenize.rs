//! Company Name Tokenization
//!
//! Reduces a free-text company name to the handful of words that actually
//! identify it:
//! - ASCII folding: NFKD decomposition, combining marks and non-ASCII dropped
//! - Ampersand variations: AT&T -> at and t
//! - Corporate/legal stopwords: Inc, Ltd, Corp, Holdings, Group, etc.
//! - Size cap: at most the 3 longest remaining words
//!
//! Also provides the slugifier used to build a direct profile-URL guess.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Generic corporate/legal terms carrying no identity signal.
/// Includes single-letter and two-letter jurisdiction codes (SA, AG, NV, ...).
const STOPWORDS: &[&str] = &[
    "co",
    "company",
    "companies",
    "corp",
    "corporation",
    "incorporated",
    "inc",
    "ltd",
    "limited",
    "llc",
    "plc",
    "holdings",
    "group",
    "international",
    "the",
    "and",
    "s",
    "a",
    "de",
    "sa",
    "spa",
    "ag",
    "nv",
    "se",
    "asa",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

static NON_TOKEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("invalid NON_TOKEN_CHARS"));

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("invalid NON_SLUG_CHARS"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid WHITESPACE"));

/// Maximum number of core tokens kept per name.
pub const MAX_CORE_TOKENS: usize = 3;

/// Check whether a word is a corporate/legal stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Decompose to NFKD and keep only base ASCII characters.
/// "Nestlé" -> "Nestle", "Søstrene" -> "Sstrene" (non-decomposable chars drop).
pub fn ascii_fold(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c) && c.is_ascii())
        .collect()
}

/// Normalize a name for tokenization: ASCII fold, lowercase, `&` -> " and ",
/// anything outside `[a-z0-9\s-]` becomes a space, whitespace collapsed.
pub fn normalize(s: &str) -> String {
    let folded = ascii_fold(s).to_lowercase().replace('&', " and ");
    let cleaned = NON_TOKEN_CHARS.replace_all(&folded, " ");
    WHITESPACE.replace_all(cleaned.trim(), " ").into_owned()
}

/// Derive the core token set for a company name.
///
/// Normalizes, splits on whitespace, drops stopwords and single-character
/// words, and when more than [`MAX_CORE_TOKENS`] words remain keeps the
/// longest ones (ties broken by original order). The result may be empty for
/// names made entirely of stopwords; callers treat that as a degraded-signal
/// condition, not an error.
pub fn core_tokens(name: &str) -> BTreeSet<String> {
    let normalized = normalize(name);
    let mut words: Vec<&str> = normalized
        .split_whitespace()
        .filter(|w| w.len() >= 2 && !is_stopword(w))
        .collect();

    if words.len() > MAX_CORE_TOKENS {
        // Longer words are assumed more discriminative. Stable sort keeps
        // the original order among equal lengths.
        words.sort_by_key(|w| std::cmp::Reverse(w.len()));
        words.truncate(MAX_CORE_TOKENS);
    }

    words.into_iter().map(String::from).collect()
}

/// Join a token set into the canonical comparison string: sorted, space-separated.
pub fn joined_tokens(tokens: &BTreeSet<String>) -> String {
    tokens
        .iter()
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Build a URL slug from a company name: ASCII fold, lowercase, `&` -> "and",
/// non-word characters stripped, whitespace runs become single hyphens.
/// Returns an empty string when nothing plausible survives.
pub fn slugify(name: &str) -> String {
    let folded = ascii_fold(name).to_lowercase().replace('&', " and ");
    let cleaned = NON_SLUG_CHARS.replace_all(&folded, " ");
    WHITESPACE
        .replace_all(&cleaned, "-")
        .trim_matches('-')
        .to_string()
}
