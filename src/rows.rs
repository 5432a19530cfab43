//! Parsing scraped section text into labeled count rows.
//!
//! Profile pages render "top ports" / "top lanes" sections as short text rows
//! like `"Shanghai, China — 1,234"`. These helpers turn such rows into
//! structured (label, count) pairs and strip navigation noise from raw page
//! text before it is logged or summarized.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ROW_DASH_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)[\s—–-]*\s(\d[\d,]*)\s*$").expect("invalid ROW_DASH_COUNT"));

static ROW_TRAILING_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(\d[\d,]*)\s*$").expect("invalid ROW_TRAILING_COUNT"));

static TRAILING_DASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[—–-]\s*$").expect("invalid TRAILING_DASH"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid WHITESPACE"));

/// Navigation/boilerplate markers; lines containing one carry no data.
const NAV_NOISE: &[&str] = &[
    "menu",
    "about",
    "contact",
    "login",
    "log in",
    "sign up",
    "free",
    "privacy",
    "terms",
    "copyright",
    "©",
    "all rights reserved",
    "press",
    "faqs",
    "pricing",
];

/// One parsed row: a label and its shipment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: u64,
}

/// Parse text rows of the form `"<label> — <count>"` (or label directly
/// followed by a grouped integer) into [`CountRow`]s, sorted by count
/// descending and truncated to `top_n`. Unparseable rows are skipped.
pub fn parse_count_rows(lines: &[String], top_n: usize) -> Vec<CountRow> {
    let mut rows = Vec::new();

    for line in lines {
        let captures = ROW_DASH_COUNT
            .captures(line)
            .or_else(|| ROW_TRAILING_COUNT.captures(line));
        let Some(captures) = captures else {
            continue;
        };

        let raw_label = captures.get(1).map(|m| m.as_str()).unwrap_or("").trim();
        let label = TRAILING_DASH.replace(raw_label, "").trim().to_string();
        if label.is_empty() {
            continue;
        }

        let raw_count = captures.get(2).map(|m| m.as_str()).unwrap_or("");
        let Ok(count) = raw_count.replace(',', "").parse::<u64>() else {
            continue;
        };

        rows.push(CountRow { label, count });
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(top_n);
    rows
}

/// Reduce raw scraped page text to a short readable snippet: drop empty and
/// noise lines, collapse whitespace, truncate with an ellipsis.
pub fn clean_snippet(raw: &str, limit: usize) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut kept_len = 0usize;

    for line in raw.lines() {
        let line = line.trim();
        if line.len() < 3 {
            continue;
        }
        let lowered = line.to_lowercase();
        if NAV_NOISE.iter().any(|marker| lowered.contains(marker)) {
            continue;
        }
        // Lines that are mostly digits/punctuation are layout artifacts.
        if line.chars().filter(|c| c.is_alphabetic()).count() < 5 {
            continue;
        }
        kept.push(line);
        kept_len += line.len();
        if kept_len > limit + limit / 2 {
            break;
        }
    }

    let joined = if kept.is_empty() {
        raw.replace('\n', " ")
    } else {
        kept.join(" ")
    };
    let collapsed = WHITESPACE.replace_all(joined.trim(), " ").into_owned();

    if collapsed.chars().count() > limit {
        let truncated: String = collapsed.chars().take(limit).collect();
        format!("{}…", truncated)
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_parse_count_rows_em_dash() {
        let rows = parse_count_rows(&lines(&["Shanghai, China — 1,234"]), 5);
        assert_eq!(
            rows,
            vec![CountRow {
                label: "Shanghai, China".to_string(),
                count: 1234
            }]
        );
    }

    #[test]
    fn test_parse_count_rows_plain_dash_and_bare() {
        let rows = parse_count_rows(&lines(&["Ningbo - 567", "Busan 89"]), 5);
        assert_eq!(rows[0].label, "Ningbo");
        assert_eq!(rows[0].count, 567);
        assert_eq!(rows[1].label, "Busan");
        assert_eq!(rows[1].count, 89);
    }

    #[test]
    fn test_parse_count_rows_sorted_descending() {
        let rows = parse_count_rows(
            &lines(&["Los Angeles — 120", "Savannah — 980", "Newark — 450"]),
            5,
        );
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Savannah", "Newark", "Los Angeles"]);
    }

    #[test]
    fn test_parse_count_rows_top_n() {
        let rows = parse_count_rows(
            &lines(&["A1x — 4", "B2x — 3", "C3x — 2", "D4x — 1"]),
            2,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].count, 4);
    }

    #[test]
    fn test_parse_count_rows_skips_unparseable() {
        let rows = parse_count_rows(&lines(&["View all shipments", "", "—"]), 5);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_clean_snippet_drops_noise() {
        let raw = "Menu\nLogin\nAcme Foods imports frozen vegetables\nAll rights reserved";
        let snippet = clean_snippet(raw, 200);
        assert_eq!(snippet, "Acme Foods imports frozen vegetables");
    }

    #[test]
    fn test_clean_snippet_truncates_with_ellipsis() {
        let raw = "Acme Foods imports frozen vegetables from twelve countries";
        let snippet = clean_snippet(raw, 10);
        assert!(snippet.ends_with('…'));
        assert_eq!(snippet.chars().count(), 11);
    }

    #[test]
    fn test_clean_snippet_falls_back_to_raw() {
        // Every line filtered: fall back to the collapsed raw text.
        let raw = "12\n34";
        let snippet = clean_snippet(raw, 50);
        assert_eq!(snippet, "12 34");
    }
}
