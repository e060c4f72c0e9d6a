//! `utmqr filename <base>` – show the export filename for today.

use utmqr_core::filename;

pub fn run_filename(base: &str, campaign: &str, ext: &str) {
    println!("{}", filename::export_filename(base, campaign, ext));
}
