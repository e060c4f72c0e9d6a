//! QR rendering.
//!
//! Encodes the tracking URL once and keeps both outputs the exporters read:
//! SVG markup at the configured logical size and a grayscale bitmap at the
//! configured pixel size.

mod matrix;
mod raster;
mod svg;

pub use matrix::{QrMatrix, QUIET_ZONE_MODULES};
pub use raster::{encode_png, to_bitmap};
pub use svg::to_svg;

use image::GrayImage;
use thiserror::Error;

use crate::config::{ErrorCorrection, UtmQrConfig};

#[derive(Debug, Error)]
pub enum RenderError {
    /// The value does not fit in a QR code at the chosen error-correction level.
    #[error("cannot encode value as QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("raster size {size}px is smaller than the {modules}-module code")]
    RasterTooSmall { size: u32, modules: usize },
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
    #[error("pdf generation failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub error_correction: ErrorCorrection,
    pub quiet_zone: bool,
    pub raster_size: u32,
    pub vector_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&UtmQrConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(cfg: &UtmQrConfig) -> Self {
        Self {
            error_correction: cfg.error_correction,
            quiet_zone: cfg.quiet_zone,
            raster_size: cfg.raster_size,
            vector_size: cfg.vector_size,
        }
    }
}

/// One rendered code: the encoded value plus its vector and raster forms.
#[derive(Debug, Clone)]
pub struct RenderedQr {
    pub value: String,
    pub matrix: QrMatrix,
    pub svg: String,
    pub bitmap: GrayImage,
}

/// Renders `value` into both representations.
pub fn render(value: &str, opts: &RenderOptions) -> Result<RenderedQr, RenderError> {
    let matrix = QrMatrix::encode(value, opts.error_correction, opts.quiet_zone)?;
    let svg = to_svg(&matrix, opts.vector_size);
    let bitmap = to_bitmap(&matrix, opts.raster_size)?;
    tracing::debug!(
        modules = matrix.width(),
        raster = opts.raster_size,
        "rendered qr code for {value}"
    );
    Ok(RenderedQr {
        value: value.to_string(),
        matrix,
        svg,
        bitmap,
    })
}
