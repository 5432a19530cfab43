//! Detection of anti-bot challenge interstitials.
//!
//! Challenge pages come back with a 200 status and a small HTML shell, so
//! they have to be recognized by marker phrases before a results page is
//! trusted.

/// Marker phrases observed on challenge interstitials. Matched
/// case-insensitively against the raw HTML.
const CHALLENGE_MARKERS: &[&str] = &[
    "verifying you are human",
    "verify you are human",
    "needs to review the security of your connection",
    "performance & security by cloudflare",
    "enable javascript and cookies to continue",
    "just a moment",
    "cf-please-wait",
    "challenge-platform",
    "turnstile",
    "managed challenge",
    "checking your browser",
];

/// Whether an HTML document is a challenge interstitial rather than real
/// content.
pub fn is_challenge_page(html: &str) -> bool {
    let lowered = html.to_lowercase();
    CHALLENGE_MARKERS.iter().any(|m| lowered.contains(m))
}
