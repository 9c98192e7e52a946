//! Collage configuration.
//!
//! Every style constant the composers use (canvas size, title bands, fonts,
//! colours, border widths) lives in one [`CollageConfig`] that is passed
//! explicitly into each composer. Nothing is hardcoded at the call sites.
//!
//! ## Config File
//!
//! A `collage.toml` passed with `--config` is merged on top of the stock
//! defaults, so it only needs the keys it wants to change:
//!
//! ```toml
//! [raster]
//! width = 1240          # half-resolution A4
//! height = 1754
//!
//! [border]
//! color = "#333333"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Run
//! `photo-collage gen-config` for the full documented file.

use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// All collage styling and geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    /// Border colour shared by both output targets.
    pub border: BorderConfig,
    /// Flattened PNG output.
    pub raster: RasterConfig,
    /// Editable DOCX output.
    pub document: DocumentConfig,
}

impl CollageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_hex_color(&self.border.color)?;
        parse_hex_color(&self.raster.background)?;
        parse_hex_color(&self.raster.text_color)?;

        let raster = &self.raster;
        if raster.width == 0 || raster.height == 0 {
            return Err(ConfigError::Validation(
                "raster.width and raster.height must be non-zero".into(),
            ));
        }
        if raster.title_band >= raster.height {
            return Err(ConfigError::Validation(
                "raster.title_band must be smaller than raster.height".into(),
            ));
        }
        if !(raster.title_font_size > 0.0) {
            return Err(ConfigError::Validation(
                "raster.title_font_size must be positive".into(),
            ));
        }

        let document = &self.document;
        if !(document.page_width > 0.0 && document.page_height > 0.0) {
            return Err(ConfigError::Validation(
                "document.page_width and document.page_height must be positive".into(),
            ));
        }
        if !(document.title_band >= 0.0 && document.title_band < document.page_height) {
            return Err(ConfigError::Validation(
                "document.title_band must be between 0 and document.page_height".into(),
            ));
        }
        if document.title_font_size == 0 {
            return Err(ConfigError::Validation(
                "document.title_font_size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Border settings shared by both targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderConfig {
    /// Border colour as `#rrggbb`.
    pub color: String,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
        }
    }
}

/// Flattened PNG output settings. All sizes are pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RasterConfig {
    /// Canvas width (A4 at 300 DPI by default).
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Height reserved above the grid when there is a title.
    pub title_band: u32,
    /// Title glyph height.
    pub title_font_size: f32,
    /// Border drawn flush with each resized image.
    pub border_width: u32,
    /// Canvas colour, also the colour of empty cells.
    pub background: String,
    /// Title colour.
    pub text_color: String,
    /// Scalable fonts to try for the title, first loadable wins. When none
    /// load, a built-in bitmap font is used.
    pub font_paths: Vec<PathBuf>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 2480,
            height: 3508,
            title_band: 250,
            title_font_size: 80.0,
            border_width: 5,
            background: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            font_paths: default_font_paths(),
        }
    }
}

fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// Editable DOCX output settings. Lengths are inches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    pub page_width: f64,
    pub page_height: f64,
    /// Page height reserved for the title paragraph when there is a title.
    pub title_band: f64,
    /// Title size in points.
    pub title_font_size: u32,
    /// Cell border width in eighths of a point (12 = 1.5pt).
    pub border_size: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_width: 8.0,
            page_height: 11.0,
            title_band: 0.6,
            title_font_size: 24,
            border_size: 12,
        }
    }
}

/// Parse a `#rrggbb` colour.
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, ConfigError> {
    let invalid = || ConfigError::Validation(format!("invalid colour {value:?}, expected #rrggbb"));
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Hex colour without the `#`, uppercased, as OOXML wants it.
pub fn ooxml_color(value: &str) -> Result<String, ConfigError> {
    let Rgb([r, g, b]) = parse_hex_color(value)?;
    Ok(format!("{r:02X}{g:02X}{b:02X}"))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CollageConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CollageConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CollageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, or the stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<CollageConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `collage.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Collage Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Border (both outputs)
# ---------------------------------------------------------------------------
[border]
color = "#000000"

# ---------------------------------------------------------------------------
# PNG output (sizes in pixels)
# ---------------------------------------------------------------------------
[raster]
# Canvas size. The default is A4 at 300 DPI.
width = 2480
height = 3508

# Band reserved above the grid when a title is given.
title_band = 250
title_font_size = 80.0

# Border drawn around each image, flush with its edges.
border_width = 5

background = "#ffffff"
text_color = "#000000"

# Scalable fonts tried in order for the title. If none can be loaded, a
# built-in bitmap font is used instead.
# font_paths = ["/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"]

# ---------------------------------------------------------------------------
# DOCX output (lengths in inches)
# ---------------------------------------------------------------------------
[document]
page_width = 8.0
page_height = 11.0

# Page height reserved for the title paragraph when a title is given.
title_band = 0.6

# Title size in points.
title_font_size = 24

# Cell border width in eighths of a point (12 = 1.5pt).
border_size = 12
"##
}
