use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// QR error-correction level. Higher levels survive more damage but hold less data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    #[default]
    High,
}

/// Page layout parameters for the PDF export (optional section in config.toml).
/// All lengths are PDF page units; the bitmap is embedded one pixel per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Title line printed above the URL text.
    pub title: String,
    /// Margin on every side of the page.
    pub padding: f64,
    /// Vertical space reserved for the title line.
    pub title_block_height: f64,
    pub title_font_size: f64,
    pub url_font_size: f64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Generated QR Code:".to_string(),
            padding: 40.0,
            title_block_height: 30.0,
            title_font_size: 14.0,
            url_font_size: 10.0,
        }
    }
}

/// Global configuration loaded from `~/.config/utmqr/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtmQrConfig {
    /// Directory exports are written to (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Error-correction level used when encoding the tracking URL.
    #[serde(default)]
    pub error_correction: ErrorCorrection,
    /// Side length in pixels of the PNG (and of the bitmap embedded in the PDF).
    pub raster_size: u32,
    /// Logical side length written into the SVG `width`/`height` attributes.
    pub vector_size: u32,
    /// Surround the code with the standard 4-module light border.
    pub quiet_zone: bool,
    /// Delay before the "copied" indicator resets, in milliseconds.
    pub copied_reset_ms: u64,
    /// Delay between a render and its reveal notice, in milliseconds.
    pub reveal_delay_ms: u64,
    /// Optional PDF layout; if missing, built-in defaults are used.
    #[serde(default)]
    pub document: Option<DocumentConfig>,
}

impl Default for UtmQrConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            error_correction: ErrorCorrection::High,
            raster_size: 512,
            vector_size: 256,
            quiet_zone: true,
            copied_reset_ms: 2000,
            reveal_delay_ms: 100,
            document: None,
        }
    }
}

impl UtmQrConfig {
    /// Document layout, falling back to defaults when the section is absent.
    pub fn document(&self) -> DocumentConfig {
        self.document.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("utmqr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UtmQrConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UtmQrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UtmQrConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
