//! Export artifacts for a rendered QR code.
//!
//! One request yields one named byte blob in one of four formats. The EPS
//! export is the SVG markup relabeled as PostScript: it is not converted,
//! and PostScript consumers that expect real EPS will not read it.

mod document;
mod text;

pub use document::{build_pdf, DocumentLayout};
pub use text::{text_width, wrap_text};

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DocumentConfig;
use crate::filename::export_filename_on;
use crate::render::{encode_png, RenderError, RenderedQr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raster image.
    Png,
    /// Vector image.
    Svg,
    /// Vector-print: the SVG markup under a PostScript MIME type.
    Eps,
    /// Single-page document.
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Svg,
        ExportFormat::Pdf,
        ExportFormat::Eps,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Eps => "eps",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml;charset=utf-8",
            ExportFormat::Eps => "application/postscript;charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format {0:?} (expected png, svg, eps or pdf)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "eps" => Ok(ExportFormat::Eps),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// A download request: what to encode, how to name it, which format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub encoded_value: String,
    pub base_url_for_naming: String,
    pub campaign_for_naming: String,
    pub format: ExportFormat,
}

/// A finished export, ready to hand to the file-delivery step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime: &'static str,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// Produces the artifact for `request` from `rendered`, named for `date`.
///
/// Returns `Ok(None)` when nothing has been rendered yet; exports are only
/// offered after a render, so this is a silent no-op rather than an error.
pub fn export_on(
    request: &ExportRequest,
    rendered: Option<&RenderedQr>,
    doc: &DocumentConfig,
    date: NaiveDate,
) -> Result<Option<Artifact>, RenderError> {
    let Some(rendered) = rendered else {
        tracing::debug!("export {} skipped: nothing rendered", request.format);
        return Ok(None);
    };

    let bytes = match request.format {
        ExportFormat::Png => encode_png(&rendered.bitmap)?,
        ExportFormat::Svg | ExportFormat::Eps => rendered.svg.clone().into_bytes(),
        ExportFormat::Pdf => build_pdf(&request.encoded_value, &rendered.bitmap, doc)?,
    };

    let filename = export_filename_on(
        &request.base_url_for_naming,
        &request.campaign_for_naming,
        request.format.extension(),
        date,
    );
    tracing::info!(format = %request.format, bytes = bytes.len(), "exported {filename}");

    Ok(Some(Artifact {
        filename,
        mime: request.format.mime(),
        format: request.format,
        bytes,
    }))
}

/// [`export_on`] named for today's local date.
pub fn export(
    request: &ExportRequest,
    rendered: Option<&RenderedQr>,
    doc: &DocumentConfig,
) -> Result<Option<Artifact>, RenderError> {
    export_on(request, rendered, doc, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};

    fn jan5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    fn request(format: ExportFormat) -> ExportRequest {
        ExportRequest {
            encoded_value: "https://shop.example/?utm_source=newsletter".to_string(),
            base_url_for_naming: "https://shop.example".to_string(),
            campaign_for_naming: String::new(),
            format,
        }
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!(" eps ".parse::<ExportFormat>(), Ok(ExportFormat::Eps));
        let err = "gif".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err, UnknownFormat("gif".to_string()));
        assert_eq!(
            err.to_string(),
            r#"unknown export format "gif" (expected png, svg, eps or pdf)"#
        );
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }

    #[test]
    fn nothing_rendered_is_noop() {
        let out = export_on(&request(ExportFormat::Png), None, &DocumentConfig::default(), jan5());
        assert!(out.unwrap().is_none());
    }

    #[test]
    fn eps_is_relabeled_svg() {
        let rendered = render("https://shop.example/?utm_source=newsletter", &RenderOptions::default())
            .unwrap();
        let doc = DocumentConfig::default();
        let svg = export_on(&request(ExportFormat::Svg), Some(&rendered), &doc, jan5())
            .unwrap()
            .unwrap();
        let eps = export_on(&request(ExportFormat::Eps), Some(&rendered), &doc, jan5())
            .unwrap()
            .unwrap();
        assert_eq!(svg.bytes, eps.bytes);
        assert_eq!(svg.mime, "image/svg+xml;charset=utf-8");
        assert_eq!(eps.mime, "application/postscript;charset=utf-8");
        assert_eq!(svg.filename, "250105_shop.example_nocampaign.svg");
        assert_eq!(eps.filename, "250105_shop.example_nocampaign.eps");
    }

    #[test]
    fn png_and_pdf_artifacts() {
        let rendered = render("https://shop.example/?utm_source=newsletter", &RenderOptions::default())
            .unwrap();
        let doc = DocumentConfig::default();
        let png = export_on(&request(ExportFormat::Png), Some(&rendered), &doc, jan5())
            .unwrap()
            .unwrap();
        assert!(png.bytes.starts_with(b"\x89PNG"));
        assert_eq!(png.filename, "250105_shop.example_nocampaign.png");

        let pdf = export_on(&request(ExportFormat::Pdf), Some(&rendered), &doc, jan5())
            .unwrap()
            .unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF-"));
        assert_eq!(pdf.mime, "application/pdf");
        assert_eq!(pdf.filename, "250105_shop.example_nocampaign.pdf");
    }
}
