//! Frontmatter configuration.
//!
//! The host parser hands the frontmatter over as a YAML/JSON value; this
//! module deserializes it into a flat [`Config`]. Every field is optional
//! and carries a hard default so a partially filled (or entirely missing)
//! frontmatter still renders. The fallback order config → theme → hard
//! default is implemented by the accessors here and in the render crate's
//! CSS composer, and is re-evaluated on every render so removing a user
//! override reveals the theme value again.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::model::Mode;

/// Errors emitted while deserializing frontmatter into a [`Config`].
///
/// These are surfaced to the caller of [`Config::from_frontmatter`] only;
/// the render path itself never fails and a caller may always fall back to
/// `Config::default()`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Top-level frontmatter node was not a mapping.
    #[error("Frontmatter must be a mapping at the top level")]
    InvalidRootType,
    /// A recognized field carried a value of the wrong shape.
    #[error("Frontmatter config error: {0}")]
    Parse(String),
}

/// A color override: a single solid color, or an ordered list of gradient
/// stops (used for heading gradient text and the dynamic background).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// One solid color (`#rrggbb` or any CSS color expression).
    Solid(String),
    /// Ordered gradient stops.
    Gradient(Vec<String>),
}

impl ColorValue {
    /// The gradient stops, treating a solid color as a single stop.
    pub fn stops(&self) -> Vec<&str> {
        match self {
            ColorValue::Solid(c) => vec![c.as_str()],
            ColorValue::Gradient(stops) => stops.iter().map(String::as_str).collect(),
        }
    }
}

/// Dynamic background mode: which resolved modes get the interpolated
/// gradient background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicBackground {
    /// Only in light mode.
    Light,
    /// Only in dark mode.
    Dark,
    /// In both modes.
    Both,
    /// Disabled.
    #[default]
    None,
}

impl DynamicBackground {
    /// Whether the dynamic background applies under the given mode name
    /// (`"light"` or `"dark"`).
    pub fn applies(self, mode: &str) -> bool {
        match self {
            DynamicBackground::Light => mode == "light",
            DynamicBackground::Dark => mode == "dark",
            DynamicBackground::Both => true,
            DynamicBackground::None => false,
        }
    }
}

/// Per-mode color overrides from the frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteOverride {
    /// General heading/title color override.
    pub title_color: Option<String>,
    /// Body text color override.
    pub body_color: Option<String>,
    /// Slide background override.
    pub background: Option<String>,
    /// Ordered gradient stops for the dynamic background.
    pub background_gradient: Option<Vec<String>>,
    /// Per-heading-level overrides, index 0 = H1. A gradient entry renders
    /// as gradient text.
    pub heading_colors: Option<Vec<ColorValue>>,
    /// Background override for the cover layout.
    pub cover_background: Option<String>,
    /// Background override for the title layout.
    pub title_background: Option<String>,
    /// Background override for the section layout.
    pub section_background: Option<String>,
}

impl PaletteOverride {
    /// Layout-specific background override for one of the centered layouts.
    pub fn layout_background(&self, layout: &str) -> Option<&str> {
        match layout {
            "cover" => self.cover_background.as_deref(),
            "title" => self.title_background.as_deref(),
            "section" => self.section_background.as_deref(),
            _ => None,
        }
    }
}

/// Flat frontmatter configuration.
///
/// Field names mirror the frontmatter keys (camelCase). All spacing values
/// are unitless multiples of the slide unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Theme name; resolved by the caller against its theme store.
    pub theme: Option<String>,
    /// Presentation-wide mode; a per-slide override wins.
    pub mode: Option<Mode>,

    /// Heading font family.
    pub heading_font: Option<String>,
    /// Body font family.
    pub body_font: Option<String>,
    /// Code font family.
    pub code_font: Option<String>,
    /// Requested heading weight (validated against the font-weight table).
    pub heading_weight: Option<u16>,
    /// Requested body weight.
    pub body_weight: Option<u16>,
    /// Heading size offset in slide units, added to the base scale.
    pub heading_size: Option<f64>,
    /// Body size offset in slide units.
    pub body_size: Option<f64>,

    /// Left content margin (slide units).
    pub content_left: Option<f64>,
    /// Right content margin (slide units).
    pub content_right: Option<f64>,
    /// Title block top offset (slide units).
    pub title_top: Option<f64>,
    /// Content area top offset (slide units).
    pub content_top: Option<f64>,
    /// Header top offset (slide units).
    pub header_top: Option<f64>,
    /// Footer bottom offset (slide units).
    pub footer_bottom: Option<f64>,
    /// User scale factor applied to the slide unit itself.
    pub slide_scale: Option<f64>,

    /// Light palette overrides.
    pub light: PaletteOverride,
    /// Dark palette overrides.
    pub dark: PaletteOverride,

    /// Header text (inline markdown), shown on every content slide.
    pub header: Option<String>,
    /// Footer text (inline markdown).
    pub footer: Option<String>,

    /// Which modes get the position-interpolated background.
    pub dynamic_background: DynamicBackground,
    /// Restart gradient progress at each section slide instead of
    /// spanning the whole deck.
    pub dynamic_background_restart: bool,
    /// Show the visible slide number on each slide.
    pub show_slide_numbers: bool,
    /// Render footnote blocks on ordinary slides (they always render on
    /// the footnotes layout and on auto-generated footnote slides).
    pub show_footnotes_on_slides: bool,
    /// Render `[text](url)` as anchors; when false links are stripped to
    /// their text.
    pub enable_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            mode: None,
            heading_font: None,
            body_font: None,
            code_font: None,
            heading_weight: None,
            body_weight: None,
            heading_size: None,
            body_size: None,
            content_left: None,
            content_right: None,
            title_top: None,
            content_top: None,
            header_top: None,
            footer_bottom: None,
            slide_scale: None,
            light: PaletteOverride::default(),
            dark: PaletteOverride::default(),
            header: None,
            footer: None,
            dynamic_background: DynamicBackground::None,
            dynamic_background_restart: false,
            show_slide_numbers: false,
            show_footnotes_on_slides: false,
            enable_links: true,
        }
    }
}

impl Config {
    /// Deserializes a frontmatter JSON value (as handed over by the host
    /// parser) into a `Config`. Unknown keys are ignored.
    pub fn from_frontmatter(value: &JsonValue) -> Result<Self, ConfigError> {
        match value {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::Object(_) => serde_json::from_value(value.clone())
                .map_err(|err| ConfigError::Parse(err.to_string())),
            _ => Err(ConfigError::InvalidRootType),
        }
    }

    /// Deserializes a raw YAML frontmatter block.
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let json =
            serde_json::to_value(yaml).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Self::from_frontmatter(&json)
    }

    /// Palette overrides for the given mode name (`"light"` / `"dark"`).
    pub fn palette(&self, mode: &str) -> &PaletteOverride {
        if mode == "dark" { &self.dark } else { &self.light }
    }

    /// Left content margin with its hard default.
    pub fn content_left(&self) -> f64 {
        self.content_left.unwrap_or(5.0)
    }

    /// Right content margin with its hard default.
    pub fn content_right(&self) -> f64 {
        self.content_right.unwrap_or(5.0)
    }

    /// Title top offset with its hard default.
    pub fn title_top(&self) -> f64 {
        self.title_top.unwrap_or(3.0)
    }

    /// Content top offset with its hard default.
    pub fn content_top(&self) -> f64 {
        self.content_top.unwrap_or(8.0)
    }

    /// Header top offset with its hard default.
    pub fn header_top(&self) -> f64 {
        self.header_top.unwrap_or(1.5)
    }

    /// Footer bottom offset with its hard default.
    pub fn footer_bottom(&self) -> f64 {
        self.footer_bottom.unwrap_or(1.5)
    }

    /// User scale factor with its hard default.
    pub fn slide_scale(&self) -> f64 {
        self.slide_scale.unwrap_or(1.0)
    }
}
