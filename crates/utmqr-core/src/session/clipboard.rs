//! Clipboard collaborator.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Write(#[from] io::Error),
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can put text on the system clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Sets the clipboard through the terminal with an OSC 52 escape sequence.
///
/// Works over SSH and inside most terminal emulators; terminals that do not
/// support OSC 52 silently ignore it, which cannot be detected here.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc52_sequence() {
        let mut cb = Osc52Clipboard::new(Vec::new());
        cb.write_text("https://a.example/").unwrap();
        let out = String::from_utf8(cb.into_inner()).unwrap();
        assert_eq!(out, "\x1b]52;c;aHR0cHM6Ly9hLmV4YW1wbGUv\x07");
    }
}
