//! Typed extraction of the embedded state payload on profile pages.
//!
//! The target site is a Next.js application and ships its page data as a
//! JSON blob, either assigned to `window.__NEXT_DATA__` or embedded in a
//! `<script id="__NEXT_DATA__">` tag. Rather than walking the payload with
//! untyped key lookups, the expected shape is modeled with serde structs and
//! a missing level is reported as a typed schema mismatch instead of a
//! silently empty result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static WINDOW_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)window\.__NEXT_DATA__\s*=\s*(\{.*?\});").expect("invalid WINDOW_STATE")
});

static SCRIPT_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script[^>]*id="__NEXT_DATA__"[^>]*>(.*?)</script>"#)
        .expect("invalid SCRIPT_STATE")
});

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("document carries no embedded state payload")]
    MissingPayload,

    #[error("embedded state payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("embedded state payload missing expected field: {0}")]
    SchemaMismatch(&'static str),
}

/// Company data carried by a profile page's embedded state.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "totalSeaShipments", default)]
    pub total_sea_shipments: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct StateEnvelope {
    props: Option<EnvelopeProps>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeProps {
    #[serde(rename = "pageProps")]
    page_props: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    company: Option<CompanyProfile>,
}

/// Locate the raw JSON text of the embedded state blob, if any.
pub fn extract_raw_state(html: &str) -> Option<&str> {
    WINDOW_STATE
        .captures(html)
        .or_else(|| SCRIPT_STATE.captures(html))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
}

/// Extract and validate the company profile from a page's embedded state.
pub fn extract_company_profile(html: &str) -> Result<CompanyProfile, PayloadError> {
    let raw = extract_raw_state(html).ok_or(PayloadError::MissingPayload)?;
    let envelope: StateEnvelope = serde_json::from_str(raw)?;

    envelope
        .props
        .ok_or(PayloadError::SchemaMismatch("props"))?
        .page_props
        .ok_or(PayloadError::SchemaMismatch("props.pageProps"))?
        .company
        .ok_or(PayloadError::SchemaMismatch("props.pageProps.company"))
}
