//! QR module matrix produced by the encoder.

use qrcode::{Color, EcLevel, QrCode};

use super::RenderError;
use crate::config::ErrorCorrection;

/// Width of the light border added around the symbol, in modules.
pub const QUIET_ZONE_MODULES: usize = 4;

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Square grid of dark/light modules, quiet zone included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encodes `value` as bytes at the given error-correction level.
    pub fn encode(value: &str, level: ErrorCorrection, quiet_zone: bool) -> Result<Self, RenderError> {
        let code = QrCode::with_error_correction_level(value.as_bytes(), EcLevel::from(level))?;
        let symbol_width = code.width();
        let colors = code.to_colors();

        let margin = if quiet_zone { QUIET_ZONE_MODULES } else { 0 };
        let width = symbol_width + 2 * margin;
        let mut dark = vec![false; width * width];
        for (i, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let (x, y) = (i % symbol_width, i / symbol_width);
                dark[(y + margin) * width + x + margin] = true;
            }
        }

        Ok(Self { width, dark })
    }

    /// Number of modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    /// Rows of modules, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.dark.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_zone_adds_border() {
        let bare = QrMatrix::encode("https://example.com/", ErrorCorrection::High, false).unwrap();
        let framed = QrMatrix::encode("https://example.com/", ErrorCorrection::High, true).unwrap();
        assert_eq!(framed.width(), bare.width() + 2 * QUIET_ZONE_MODULES);
        for i in 0..framed.width() {
            assert!(!framed.is_dark(i, 0));
            assert!(!framed.is_dark(0, i));
            assert!(!framed.is_dark(i, framed.width() - 1));
        }
        // Finder pattern corner sits right inside the border.
        assert!(framed.is_dark(QUIET_ZONE_MODULES, QUIET_ZONE_MODULES));
        assert!(bare.is_dark(0, 0));
    }

    #[test]
    fn higher_correction_needs_more_modules() {
        let value = "https://example.com/landing?utm_source=newsletter&utm_medium=email";
        let low = QrMatrix::encode(value, ErrorCorrection::Low, false).unwrap();
        let high = QrMatrix::encode(value, ErrorCorrection::High, false).unwrap();
        assert!(high.width() > low.width());
    }

    #[test]
    fn rows_cover_grid() {
        let m = QrMatrix::encode("x", ErrorCorrection::Medium, true).unwrap();
        assert_eq!(m.rows().count(), m.width());
        assert!(m.rows().all(|r| r.len() == m.width()));
    }

    #[test]
    fn oversized_value_fails() {
        let value = "a".repeat(5000);
        assert!(matches!(
            QrMatrix::encode(&value, ErrorCorrection::High, true),
            Err(RenderError::Encode(_))
        ));
    }
}
