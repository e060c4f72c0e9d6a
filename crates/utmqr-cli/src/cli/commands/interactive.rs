//! `utmqr interactive` – edit the four inputs line by line.
//!
//! Every edit prints the recomputed URL. `generate` renders the current URL,
//! `save` exports the last render, `copy` puts the URL on the clipboard.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use utmqr_core::config::UtmQrConfig;
use utmqr_core::delivery;
use utmqr_core::export::ExportFormat;
use utmqr_core::session::{Field, Osc52Clipboard, Session, SessionEvent};

const HELP: &str = "\
commands:
  base <url>          set the base URL
  source <text>       set utm_source (empty clears it)
  medium <text>       set utm_medium
  campaign <text>     set utm_campaign
  show                print the inputs and the URL
  generate            render the QR code for the current URL
  save [formats...]   export png, svg, eps, pdf (default: all)
  copy                copy the URL to the clipboard
  help                this text
  quit                leave";

/// Longest wait for a pending delayed action before the next prompt.
const MAX_SETTLE: Duration = Duration::from_millis(250);

pub fn run_interactive<R: BufRead, W: Write>(
    cfg: &UtmQrConfig,
    out_dir: &Path,
    input: R,
    mut out: W,
) -> Result<()> {
    let mut session = Session::new(cfg);
    writeln!(out, "UTM QR code generator. Type `help` for commands.")?;
    prompt(&session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));

        match cmd.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "show" => show(&session, &mut out)?,
            "generate" => match session.generate(Instant::now()) {
                Ok(r) => writeln!(out, "rendered {} ({} modules)", r.value, r.matrix.width())?,
                Err(e) => writeln!(out, "{e}")?,
            },
            "save" => save(&session, rest, out_dir, &mut out)?,
            "copy" => {
                let mut clipboard = Osc52Clipboard::new(&mut out);
                let copied = session.copy_url(&mut clipboard, Instant::now());
                match copied {
                    Ok(true) => writeln!(out, "copied")?,
                    Ok(false) => writeln!(out, "nothing to copy")?,
                    Err(_) => writeln!(out, "Failed to copy the URL.")?,
                }
            }
            other => match other.parse::<Field>() {
                Ok(field) => {
                    session.set(field, rest);
                    writeln!(out, "url: {}", session.generated_url())?;
                }
                Err(e) => writeln!(out, "{e}; type `help`")?,
            },
        }

        settle(&mut session, &mut out)?;
        prompt(&session, &mut out)?;
    }

    session.teardown();
    writeln!(out)?;
    Ok(())
}

/// Waits briefly for a delayed action that is almost due, then reports what fired.
fn settle<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    let now = Instant::now();
    if let Some(deadline) = session.next_deadline() {
        let wait = deadline.saturating_duration_since(now);
        if wait <= MAX_SETTLE {
            std::thread::sleep(wait);
        }
    }
    for event in session.tick(Instant::now()) {
        match event {
            SessionEvent::Revealed => {
                if let Some(r) = session.rendered() {
                    writeln!(out, "QR code ready: {}", r.value)?;
                }
            }
            SessionEvent::CopiedReset => tracing::trace!("copied indicator reset"),
        }
    }
    Ok(())
}

fn prompt<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let mut marks = String::new();
    if session.is_copied() {
        marks.push_str("[copied] ");
    }
    if session.rendered().is_some() && !session.is_current() {
        marks.push_str("[qr outdated] ");
    }
    write!(out, "{marks}> ")?;
    out.flush()?;
    Ok(())
}

fn show<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let p = session.params();
    writeln!(out, "base:     {}", p.base_url)?;
    writeln!(out, "source:   {}", p.source)?;
    writeln!(out, "medium:   {}", p.medium)?;
    writeln!(out, "campaign: {}", p.campaign)?;
    if session.can_generate() {
        writeln!(out, "url:      {}", session.generated_url())?;
    } else {
        writeln!(out, "url:      (enter a base URL)")?;
    }
    Ok(())
}

fn save<W: Write>(session: &Session, args: &str, out_dir: &Path, out: &mut W) -> Result<()> {
    let mut formats = Vec::new();
    for word in args.split_whitespace() {
        match word.parse::<ExportFormat>() {
            Ok(f) => formats.push(f),
            Err(e) => {
                writeln!(out, "{e}")?;
                return Ok(());
            }
        }
    }
    if formats.is_empty() {
        formats = ExportFormat::ALL.to_vec();
    }

    for format in formats {
        match session.export(format) {
            Ok(Some(artifact)) => match delivery::save(out_dir, &artifact) {
                Ok(path) => writeln!(out, "saved {}", path.display())?,
                Err(e) => writeln!(out, "save failed: {e:#}")?,
            },
            // Nothing rendered yet; saving is only meaningful after `generate`.
            Ok(None) => {}
            Err(e) => writeln!(out, "export failed: {e}")?,
        }
    }
    Ok(())
}
