//! Export filename derivation.
//!
//! Every export is named `YYMMDD_<base url>_<campaign>.<ext>` with
//! filesystem-hostile characters replaced, capped at 200 characters.

mod sanitize;

pub use sanitize::{is_forbidden, sanitize_segment, FORBIDDEN_CHARS};

use chrono::{Local, NaiveDate};

/// Campaign segment used when the campaign is blank.
pub const NO_CAMPAIGN: &str = "nocampaign";

/// Hard cap on the filename length, in characters.
pub const MAX_FILENAME_CHARS: usize = 200;

/// Two-digit year, month and day, e.g. `250105` for 2025-01-05.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Builds an export filename for `date`.
///
/// A leading `http://` or `https://` is dropped from `base_url` before
/// sanitizing. Truncation to [`MAX_FILENAME_CHARS`] may cut into the
/// extension; that is accepted.
///
/// # Examples
///
/// - `export_filename_on("https://example.com/a", "", "png", 2025-01-05)` → `"250105_example.com_a_nocampaign.png"`
pub fn export_filename_on(base_url: &str, campaign: &str, extension: &str, date: NaiveDate) -> String {
    let url_part = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .unwrap_or(base_url);
    let url_part = sanitize_segment(url_part);

    let campaign = campaign.trim();
    let campaign_part = if campaign.is_empty() {
        NO_CAMPAIGN.to_string()
    } else {
        sanitize_segment(campaign)
    };

    let name = format!("{}_{url_part}_{campaign_part}.{extension}", date_stamp(date));
    truncate_chars(name, MAX_FILENAME_CHARS)
}

/// [`export_filename_on`] for today's local date.
pub fn export_filename(base_url: &str, campaign: &str, extension: &str) -> String {
    export_filename_on(base_url, campaign, extension, Local::now().date_naive())
}

fn truncate_chars(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => s[..cut].to_string(),
        None => s,
    }
}
