#![deny(missing_docs)]
//! deckmd core: presentation model, frontmatter config, themes, inline
//! rendering, font resolution, and the dynamic background interpolator.

/// Dynamic background gradient interpolation.
pub mod background;
/// Frontmatter configuration.
pub mod config;
/// Render diagnostics sink.
pub mod diag;
/// Font-weight fallback resolution.
pub mod fonts;
/// Inline markdown rendering.
pub mod inline;
/// Presentation data model.
pub mod model;
/// Theme model and built-in defaults.
pub mod theme;

pub use background::{
    Rgb, background_for_slide, gradient_position, gradient_stops, interpolate, parse_color,
};
pub use config::{ColorValue, Config, ConfigError, DynamicBackground, PaletteOverride};
pub use diag::{CollectSink, DiagnosticSink, LogSink, RenderEvent};
pub use fonts::{FontWeightTable, resolve_weight};
pub use inline::{InlineOptions, render_inline};
pub use model::{
    ColorScheme, ElementKind, Footnote, ImageData, ImageSize, Mode, PresentationDocument,
    ResolvedMode, Slide, SlideElement, SlideMetadata, collect_footnotes, visible_slide_count,
    visible_slide_number,
};
pub use theme::{
    ColorPreset, DEFAULT_THEME, FALLBACK_DARK_STOPS, FALLBACK_LIGHT_STOPS, ModeColors, Theme,
    ThemeColors, ThemeFonts, ThemeTemplate,
};
