//! Theme model and built-in defaults.
//!
//! A [`Theme`] is read-only for a render pass. It sits between the
//! frontmatter overrides and the hard defaults in every fallback chain:
//! config override → theme value → built-in default.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::config::ColorValue;

/// Font roles a theme template ships.
#[derive(Debug, Clone, Default)]
pub struct ThemeFonts {
    /// Heading font family.
    pub heading: Option<String>,
    /// Body font family.
    pub body: Option<String>,
    /// Code font family.
    pub code: Option<String>,
}

/// The static part of a theme: fonts and extra CSS classes applied to the
/// document root.
#[derive(Debug, Clone, Default)]
pub struct ThemeTemplate {
    /// Font families per role.
    pub fonts: ThemeFonts,
    /// Extra classes for the rendered document root.
    pub css_classes: Vec<String>,
}

/// An ordered color preset a theme offers for the dynamic background.
#[derive(Debug, Clone)]
pub struct ColorPreset {
    /// Preset name (shown by the host UI; unused by the engine).
    pub name: String,
    /// Gradient stops for light mode.
    pub light_stops: Vec<String>,
    /// Gradient stops for dark mode.
    pub dark_stops: Vec<String>,
}

impl ColorPreset {
    /// Stops for the given mode name.
    pub fn stops(&self, mode: &str) -> &[String] {
        if mode == "dark" {
            &self.dark_stops
        } else {
            &self.light_stops
        }
    }
}

/// Per-mode theme colors.
#[derive(Debug, Clone, Default)]
pub struct ModeColors {
    /// Per-heading-level colors, index 0 = H1.
    pub heading_colors: Vec<ColorValue>,
    /// General heading/title color.
    pub title_color: Option<String>,
    /// Body text color.
    pub text_color: Option<String>,
    /// General slide background.
    pub background: Option<String>,
    /// Layout-specific backgrounds keyed by layout tag
    /// (cover/title/section).
    pub layout_backgrounds: HashMap<String, String>,
}

/// Per-mode color data loaded from a theme's JSON payload.
#[derive(Debug, Clone, Default)]
pub struct ThemeColors {
    /// Light mode colors.
    pub light: ModeColors,
    /// Dark mode colors.
    pub dark: ModeColors,
}

impl ThemeColors {
    /// Colors for the given mode name.
    pub fn for_mode(&self, mode: &str) -> &ModeColors {
        if mode == "dark" { &self.dark } else { &self.light }
    }
}

/// A complete theme.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Fonts and document classes.
    pub template: ThemeTemplate,
    /// Ordered color presets; the first one feeds the dynamic background
    /// when the frontmatter carries no gradient override.
    pub presets: Vec<ColorPreset>,
    /// Optional per-mode color data.
    pub colors: Option<ThemeColors>,
}

impl Theme {
    /// Theme heading color for a level (1-based), falling back to the
    /// theme's general title color.
    pub fn heading_color(&self, mode: &str, level: u8) -> Option<&ColorValue> {
        let colors = self.colors.as_ref()?.for_mode(mode);
        colors
            .heading_colors
            .get(usize::from(level.saturating_sub(1)))
    }

    /// Theme general title color.
    pub fn title_color(&self, mode: &str) -> Option<&str> {
        self.colors
            .as_ref()
            .and_then(|c| c.for_mode(mode).title_color.as_deref())
    }

    /// Theme body text color.
    pub fn text_color(&self, mode: &str) -> Option<&str> {
        self.colors
            .as_ref()
            .and_then(|c| c.for_mode(mode).text_color.as_deref())
    }

    /// Theme general background.
    pub fn background(&self, mode: &str) -> Option<&str> {
        self.colors
            .as_ref()
            .and_then(|c| c.for_mode(mode).background.as_deref())
    }

    /// Theme background for one of the centered layouts, falling back to
    /// the theme's general background.
    pub fn layout_background(&self, mode: &str, layout: &str) -> Option<&str> {
        let colors = self.colors.as_ref()?.for_mode(mode);
        colors
            .layout_backgrounds
            .get(layout)
            .map(String::as_str)
            .or(colors.background.as_deref())
    }

    /// Gradient stops the theme offers for the dynamic background (first
    /// preset), if any.
    pub fn preset_stops(&self, mode: &str) -> Option<&[String]> {
        self.presets
            .first()
            .map(|p| p.stops(mode))
            .filter(|s| !s.is_empty())
    }
}

/// Built-in 3-stop gradient used for the dynamic background when neither
/// the frontmatter nor the theme supplies stops.
pub static FALLBACK_LIGHT_STOPS: [&str; 3] = ["#fdfdfd", "#e8edf4", "#d4e0ee"];
/// Dark-mode counterpart of [`FALLBACK_LIGHT_STOPS`].
pub static FALLBACK_DARK_STOPS: [&str; 3] = ["#16181d", "#1e2630", "#273244"];

/// The built-in default theme used when the caller supplies none.
pub static DEFAULT_THEME: Lazy<Theme> = Lazy::new(|| {
    let mut light_layouts = HashMap::new();
    light_layouts.insert("cover".to_string(), "#e8edf4".to_string());
    light_layouts.insert("section".to_string(), "#dde5ef".to_string());
    let mut dark_layouts = HashMap::new();
    dark_layouts.insert("cover".to_string(), "#1e2630".to_string());
    dark_layouts.insert("section".to_string(), "#273244".to_string());

    Theme {
        template: ThemeTemplate {
            fonts: ThemeFonts {
                heading: Some("Inter".to_string()),
                body: Some("Inter".to_string()),
                code: Some("JetBrains Mono".to_string()),
            },
            css_classes: vec!["deckmd-default".to_string()],
        },
        presets: vec![ColorPreset {
            name: "Slate".to_string(),
            light_stops: FALLBACK_LIGHT_STOPS.iter().map(|s| s.to_string()).collect(),
            dark_stops: FALLBACK_DARK_STOPS.iter().map(|s| s.to_string()).collect(),
        }],
        colors: Some(ThemeColors {
            light: ModeColors {
                heading_colors: Vec::new(),
                title_color: Some("#1b1f24".to_string()),
                text_color: Some("#2b3138".to_string()),
                background: Some("#fdfdfd".to_string()),
                layout_backgrounds: light_layouts,
            },
            dark: ModeColors {
                heading_colors: Vec::new(),
                title_color: Some("#f2f4f8".to_string()),
                text_color: Some("#d4d9e0".to_string()),
                background: Some("#16181d".to_string()),
                layout_backgrounds: dark_layouts,
            },
        }),
    }
});
