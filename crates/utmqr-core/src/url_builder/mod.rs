//! Tracking URL construction.
//!
//! Turns a base URL plus the three campaign tags into one canonical URL.
//! Bare hosts get `https://`; input the WHATWG parser rejects is merged
//! textually instead, so every non-empty base produces some output.

mod query;
mod scheme;

pub use query::QueryParams;
pub use scheme::{has_scheme_prefix, with_default_scheme};

use serde::{Deserialize, Serialize};
use url::Url;

pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";

/// The four raw form inputs. No trimming or validation happens on assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingParameters {
    pub base_url: String,
    pub source: String,
    pub medium: String,
    pub campaign: String,
}

impl TrackingParameters {
    pub fn new(
        base_url: impl Into<String>,
        source: impl Into<String>,
        medium: impl Into<String>,
        campaign: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            source: source.into(),
            medium: medium.into(),
            campaign: campaign.into(),
        }
    }

    /// True when the trimmed base URL is empty; nothing can be generated.
    pub fn is_blank(&self) -> bool {
        self.base_url.trim().is_empty()
    }

    /// The tracking URL for these inputs, or `""` when the base is blank.
    pub fn generated_url(&self) -> String {
        build(&self.base_url, &self.source, &self.medium, &self.campaign)
    }

    fn tags(&self) -> [(&'static str, &str); 3] {
        [
            (UTM_SOURCE, self.source.as_str()),
            (UTM_MEDIUM, self.medium.as_str()),
            (UTM_CAMPAIGN, self.campaign.as_str()),
        ]
    }
}

/// Outcome of strict parsing of the scheme-normalized base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedBase {
    Parsed(Url),
    Unparseable,
}

impl ParsedBase {
    pub fn parse(normalized: &str) -> Self {
        match Url::parse(normalized) {
            Ok(url) => ParsedBase::Parsed(url),
            Err(_) => ParsedBase::Unparseable,
        }
    }
}

/// Builds the tracking URL.
///
/// Each tag is trimmed; a non-empty tag sets its `utm_*` key, an empty one
/// removes the key. Every other query pair of the base is kept as is.
///
/// # Examples
///
/// - `build("example.com", "google", "", "")` → `"https://example.com/?utm_source=google"`
/// - `build("not a url", "x", "", "")` → `"not a url?utm_source=x"`
pub fn build(base: &str, source: &str, medium: &str, campaign: &str) -> String {
    let params = TrackingParameters::new(base, source, medium, campaign);
    let base = base.trim();
    if base.is_empty() {
        return String::new();
    }

    match ParsedBase::parse(&with_default_scheme(base)) {
        ParsedBase::Parsed(url) => merge_parsed(url, &params),
        ParsedBase::Unparseable => {
            tracing::debug!("base url not parseable, merging tags textually: {base:?}");
            merge_textual(base, &params)
        }
    }
}

fn apply_tags(query: &mut QueryParams, params: &TrackingParameters) {
    for (key, value) in params.tags() {
        let value = value.trim();
        if value.is_empty() {
            query.remove(key);
        } else {
            query.set(key, value);
        }
    }
}

fn merge_parsed(mut url: Url, params: &TrackingParameters) -> String {
    let mut query = QueryParams::parse(url.query().unwrap_or(""));
    apply_tags(&mut query, params);
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&query.serialize()));
    }
    url.into()
}

fn merge_textual(base: &str, params: &TrackingParameters) -> String {
    let (prefix, existing) = base.split_once('?').unwrap_or((base, ""));
    let mut query = QueryParams::parse(existing);
    apply_tags(&mut query, params);
    if query.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}?{}", query.serialize())
    }
}
