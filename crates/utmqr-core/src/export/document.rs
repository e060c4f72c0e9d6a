//! Single-page PDF: title, wrapped URL text, and the QR bitmap below them.

use std::io::BufWriter;

use image::GrayImage;
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Pt, Px,
};

use super::text::wrap_text;
use crate::config::DocumentConfig;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.15;
/// Extra page height added below the image.
pub const BOTTOM_BUFFER: f64 = 20.0;
/// Space between the last URL line and the image.
pub const IMAGE_GAP: f64 = 10.0;
/// Portion of the font size that glyphs may extend below the baseline.
const DESCENT: f64 = 0.25;

/// Page geometry in top-down page units (y grows downwards from the top edge).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub padding: f64,
    pub title_font_size: f64,
    pub title_baseline: f64,
    pub url_font_size: f64,
    pub line_height: f64,
    pub url_lines: Vec<String>,
    /// Top of the URL text block.
    pub text_top: f64,
    pub image_top: f64,
    pub image_width: f64,
    pub image_height: f64,
}

impl DocumentLayout {
    /// Lays out the page for an image of `image_width`×`image_height` pixels.
    pub fn compute(url: &str, image_width: u32, image_height: u32, cfg: &DocumentConfig) -> Self {
        let padding = cfg.padding;
        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);
        let page_width = image_width + padding * 2.0;

        let title_block = cfg
            .title_block_height
            .max(cfg.title_font_size * (1.0 + DESCENT));
        let line_height = cfg.url_font_size * LINE_HEIGHT_FACTOR;
        let url_lines = wrap_text(&format!("URL: {url}"), page_width - padding * 2.0, cfg.url_font_size);
        let text_height = url_lines.len() as f64 * line_height;

        let text_top = padding + title_block;
        let image_top = text_top + text_height + IMAGE_GAP;
        let page_height = image_height + padding * 2.0 + title_block + text_height + BOTTOM_BUFFER;

        Self {
            page_width,
            page_height,
            padding,
            title_font_size: cfg.title_font_size,
            title_baseline: padding + cfg.title_font_size,
            url_font_size: cfg.url_font_size,
            line_height,
            url_lines,
            text_top,
            image_top,
            image_width,
            image_height,
        }
    }

    /// Baseline of URL line `index`, top-down.
    pub fn line_baseline(&self, index: usize) -> f64 {
        self.text_top + index as f64 * self.line_height + self.url_font_size
    }

    /// Lowest point any URL glyph can reach, top-down.
    pub fn text_bottom(&self) -> f64 {
        let last = self.url_lines.len().saturating_sub(1);
        self.line_baseline(last) + self.url_font_size * DESCENT
    }

    pub fn title_bottom(&self) -> f64 {
        self.title_baseline + self.title_font_size * DESCENT
    }

    pub fn image_bottom(&self) -> f64 {
        self.image_top + self.image_height
    }

    fn pdf_y(&self, top_down: f64) -> Mm {
        pt(self.page_height - top_down)
    }
}

fn pt(value: f64) -> Mm {
    Mm::from(Pt(value as f32))
}

/// Builds the PDF file for `url` with `bitmap` embedded at its native size.
pub fn build_pdf(
    url: &str,
    bitmap: &GrayImage,
    cfg: &DocumentConfig,
) -> Result<Vec<u8>, printpdf::Error> {
    let (w, h) = bitmap.dimensions();
    let layout = DocumentLayout::compute(url, w, h, cfg);
    tracing::debug!(
        lines = layout.url_lines.len(),
        width = layout.page_width,
        height = layout.page_height,
        "pdf layout"
    );

    let doc = PdfDocument::empty(url);
    let (page, layer) = doc.add_page(pt(layout.page_width), pt(layout.page_height), "QR code");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    layer.use_text(
        cfg.title.as_str(),
        layout.title_font_size as f32,
        pt(layout.padding),
        layout.pdf_y(layout.title_baseline),
        &font,
    );
    for (i, line) in layout.url_lines.iter().enumerate() {
        layer.use_text(
            line.as_str(),
            layout.url_font_size as f32,
            pt(layout.padding),
            layout.pdf_y(layout.line_baseline(i)),
            &font,
        );
    }

    let image = Image::from(ImageXObject {
        width: Px(w as usize),
        height: Px(h as usize),
        color_space: ColorSpace::Greyscale,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: bitmap.as_raw().clone(),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    });
    // 72 dpi: one bitmap pixel per page unit.
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(pt(layout.padding)),
            translate_y: Some(layout.pdf_y(layout.image_bottom())),
            dpi: Some(72.0),
            ..Default::default()
        },
    );

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_overlap(layout: &DocumentLayout) {
        assert!(layout.title_baseline - layout.title_font_size >= layout.padding - 1e-9);
        assert!(layout.title_bottom() <= layout.text_top + 1e-9, "title overlaps url text");
        assert!(layout.text_bottom() <= layout.image_top + 1e-9, "url text overlaps image");
        assert!(
            layout.image_bottom() <= layout.page_height - layout.padding + 1e-9,
            "image runs into bottom margin"
        );
        let max = layout.page_width - 2.0 * layout.padding;
        for line in &layout.url_lines {
            assert!(super::super::text::text_width(line, layout.url_font_size) <= max + 1e-9);
        }
    }

    #[test]
    fn short_url_single_line() {
        let cfg = DocumentConfig::default();
        let layout = DocumentLayout::compute("https://shop.example/", 512, 512, &cfg);
        assert_eq!(layout.url_lines, vec!["URL: https://shop.example/"]);
        assert!((layout.page_width - 592.0).abs() < 1e-9);
        // 512 + 80 + 30 + 11.5 + 20
        assert!((layout.page_height - 653.5).abs() < 1e-9);
        assert_no_overlap(&layout);
    }

    #[test]
    fn long_url_wraps_and_grows_page() {
        let cfg = DocumentConfig::default();
        let url = format!("https://shop.example/?utm_campaign={}", "z".repeat(600));
        let short = DocumentLayout::compute("https://shop.example/", 512, 512, &cfg);
        let long = DocumentLayout::compute(&url, 512, 512, &cfg);
        assert!(long.url_lines.len() > 3);
        assert!(long.page_height > short.page_height);
        assert_no_overlap(&long);
    }

    #[test]
    fn large_title_font_still_clear() {
        let cfg = DocumentConfig {
            title_font_size: 40.0,
            ..DocumentConfig::default()
        };
        let layout = DocumentLayout::compute("https://a.example/", 100, 100, &cfg);
        assert_no_overlap(&layout);
    }

    /// Reads the four numbers of the page's `/MediaBox` array.
    fn media_box(bytes: &[u8]) -> Vec<f64> {
        let key = b"/MediaBox";
        let at = bytes
            .windows(key.len())
            .position(|w| w == key)
            .expect("page has a media box");
        let rest = &bytes[at + key.len()..];
        let open = rest.iter().position(|&b| b == b'[').unwrap();
        let close = rest.iter().position(|&b| b == b']').unwrap();
        std::str::from_utf8(&rest[open + 1..close])
            .unwrap()
            .split_whitespace()
            .map(|n| n.parse().unwrap())
            .collect()
    }

    #[test]
    fn pdf_structure() {
        let bitmap = GrayImage::from_pixel(200, 200, image::Luma([255]));
        let bytes = build_pdf("https://shop.example/", &bitmap, &DocumentConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(16)..]).into_owned();
        assert!(tail.contains("%%EOF"));

        let has = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
        assert!(has(b"/Helvetica"));
        assert!(has(b"/DeviceGray"));
        assert!(has(b"/Width 200"));
        assert!(has(b"/Height 200"));

        let layout = DocumentLayout::compute("https://shop.example/", 200, 200, &DocumentConfig::default());
        let mb = media_box(&bytes);
        assert_eq!(mb.len(), 4);
        assert!((mb[2] - layout.page_width).abs() < 0.05, "width {}", mb[2]);
        assert!((mb[3] - layout.page_height).abs() < 0.05, "height {}", mb[3]);
        assert!((layout.page_height - 341.5).abs() < 1e-9);
    }
}
