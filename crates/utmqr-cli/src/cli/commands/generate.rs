//! `utmqr generate <base>` – build, render and export in one go.

use anyhow::Result;
use std::io::Write;
use std::time::Instant;
use utmqr_core::config::UtmQrConfig;
use utmqr_core::delivery;
use utmqr_core::export::ExportFormat;
use utmqr_core::session::{Field, Osc52Clipboard, Session};

use super::output_dir;
use crate::cli::GenerateArgs;

/// Requested formats in order, duplicates dropped; all four when none given.
pub(crate) fn selected_formats(requested: &[ExportFormat]) -> Vec<ExportFormat> {
    if requested.is_empty() {
        return ExportFormat::ALL.to_vec();
    }
    let mut out = Vec::with_capacity(requested.len());
    for f in requested {
        if !out.contains(f) {
            out.push(*f);
        }
    }
    out
}

/// Writes the report to `out`. The OSC 52 clipboard sequence goes to
/// `terminal` so `out` stays clean when piped.
pub fn run_generate<W: Write, T: Write>(
    cfg: &UtmQrConfig,
    args: &GenerateArgs,
    mut out: W,
    terminal: T,
) -> Result<()> {
    let mut session = Session::new(cfg);
    session.set(Field::BaseUrl, args.tags.base.as_str());
    session.set(Field::Source, args.tags.source.as_str());
    session.set(Field::Medium, args.tags.medium.as_str());
    session.set(Field::Campaign, args.tags.campaign.as_str());

    let now = Instant::now();
    let modules = session.generate(now)?.matrix.width();
    let url = session.generated_url().to_string();
    tracing::info!("generated {url} ({modules} modules)");

    let dir = output_dir(cfg, args.out_dir.as_deref())?;
    let mut artifacts = Vec::new();
    for format in selected_formats(&args.formats) {
        let Some(artifact) = session.export(format)? else {
            continue;
        };
        let target = if args.data_uri {
            delivery::data_uri(&artifact)
        } else {
            delivery::save(&dir, &artifact)?.display().to_string()
        };
        let mut entry = serde_json::json!({
            "format": artifact.format,
            "filename": artifact.filename,
            "mime": artifact.mime,
            "bytes": artifact.bytes.len(),
        });
        entry[if args.data_uri { "data_uri" } else { "path" }] = target.into();
        artifacts.push(entry);
    }

    if args.json {
        let report = serde_json::json!({
            "url": url,
            "modules": modules,
            "artifacts": artifacts,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{url}")?;
        for a in &artifacts {
            let target = a.get("path").or_else(|| a.get("data_uri"));
            if let Some(target) = target.and_then(|t| t.as_str()) {
                if args.data_uri {
                    writeln!(out, "{target}")?;
                } else {
                    writeln!(out, "Saved {target}")?;
                }
            }
        }
    }

    if args.copy {
        let mut clipboard = Osc52Clipboard::new(terminal);
        if session.copy_url(&mut clipboard, now).is_err() {
            eprintln!("Failed to copy the URL.");
        }
    }

    out.flush()?;
    session.teardown();
    Ok(())
}
