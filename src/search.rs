//! Search-results candidate collection
//!
//! Issues the one outbound request the resolver depends on: a bounded search
//! query against the target site, from which profile-shaped links are
//! collected in first-seen order. No retries happen at this layer; a failed
//! search is reported as a typed error and the resolver degrades to its
//! direct guess.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::challenge::is_challenge_page;
use crate::config::AppConfig;

/// Why a search yielded no candidate links.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("search results blocked by a challenge interstitial")]
    ChallengePage,
}

/// HTTP client for the target site's search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
    search_path: String,
    profile_prefixes: Vec<String>,
    max_links: usize,
}

impl SearchClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .user_agent(config.http.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            base_url: config.site.base_url.trim_end_matches('/').to_string(),
            search_path: config.site.search_path.clone(),
            profile_prefixes: config.site.profile_prefixes.clone(),
            max_links: config.site.max_search_links,
        })
    }

    /// Fetch the search results page for a company name and collect up to
    /// `max_search_links` profile-shaped links, de-duplicated, in page order.
    pub async fn search_candidates(&self, name: &str) -> Result<Vec<String>, SearchError> {
        let url = format!("{}{}", self.base_url, self.search_path);
        debug!("searching {} for '{}'", url, name);

        let response = self.client.get(&url).query(&[("q", name)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        if is_challenge_page(&body) {
            return Err(SearchError::ChallengePage);
        }

        let links =
            extract_profile_links(&body, &self.base_url, &self.profile_prefixes, self.max_links);
        debug!("search for '{}' produced {} candidate links", name, links.len());
        Ok(links)
    }
}

/// Collect profile-shaped anchor targets from a results page: hrefs starting
/// with one of the profile prefixes, absolutized against the base URL,
/// first-seen order, de-duplicated, capped.
pub fn extract_profile_links(
    html: &str,
    base_url: &str,
    profile_prefixes: &[String],
    max_links: usize,
) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector_src = profile_prefixes
        .iter()
        .map(|p| format!(r#"a[href^="{}"]"#, p))
        .collect::<Vec<String>>()
        .join(", ");
    let selector = match Selector::parse(&selector_src) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let base = base_url.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", base, href)
        };
        if seen.insert(absolute.clone()) {
            links.push(absolute);
            if links.len() >= max_links {
                break;
            }
        }
    }

    links
}
