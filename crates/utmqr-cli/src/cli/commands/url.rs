//! `utmqr url <base>` – print the tracking URL.

use anyhow::Result;
use utmqr_core::session::SessionError;

use crate::cli::TagArgs;

pub fn run_url(tags: &TagArgs, json: bool) -> Result<()> {
    let params = tags.params();
    let url = params.generated_url();
    if url.is_empty() {
        anyhow::bail!(SessionError::EmptyBaseUrl);
    }

    if json {
        let out = serde_json::json!({ "params": params, "url": url });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{url}");
    }
    Ok(())
}
