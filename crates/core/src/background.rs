//! Dynamic background interpolation.
//!
//! A deck-wide gradient is sampled per slide: the slide's normalized
//! position maps into an ordered list of color stops and the RGB channels
//! are interpolated linearly between the two surrounding stops. Position
//! is computed globally over the deck, or restarted at each section
//! divider when the frontmatter asks for it. Hidden slides never count.

use crate::config::Config;
use crate::model::Slide;
use crate::theme::{FALLBACK_DARK_STOPS, FALLBACK_LIGHT_STOPS, Theme};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#rgb` or `#rrggbb`. Anything else degrades to `None`; callers
/// fall through to the next stop source rather than failing.
pub fn parse_color(input: &str) -> Option<Rgb> {
    let hex = input.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Rgb {
                r: r * 17,
                g: g * 17,
                b: b * 17,
            })
        }
        6 => Some(Rgb {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        }),
        _ => None,
    }
}

/// Samples the gradient at normalized position `p` (clamped to `[0, 1]`).
///
/// With stops `[A, B]`: `p = 0` yields `A`, `p = 1` yields `B`, `p = 0.5`
/// is the channel-wise midpoint.
pub fn interpolate(stops: &[Rgb], p: f64) -> Option<Rgb> {
    let (first, rest) = stops.split_first()?;
    if rest.is_empty() {
        return Some(*first);
    }

    let p = p.clamp(0.0, 1.0);
    let segment = p * (stops.len() - 1) as f64;
    let i = (segment.floor() as usize).min(stops.len() - 2);
    let t = segment - i as f64;

    let a = stops[i];
    let b = stops[i + 1];
    let lerp = |x: u8, y: u8| -> u8 { (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8 };
    Some(Rgb {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
    })
}

/// Normalized gradient position of the slide at `index`.
///
/// Global policy: the slide's visible rank over all non-hidden slides.
/// Section-restart policy (`restart`): rank within the run of visible
/// slides between the nearest preceding visible `section` slide and the
/// next one. Hidden slides are excluded from both counting and position;
/// they (and out-of-range indexes) return `None`. A segment of one slide
/// sits at position 0.
pub fn gradient_position(slides: &[Slide], index: usize, restart: bool) -> Option<f64> {
    if slides.get(index).is_none_or(|s| s.hidden) {
        return None;
    }

    let visible: Vec<&Slide> = slides.iter().filter(|s| !s.hidden).collect();
    let v = slides[..index].iter().filter(|s| !s.hidden).count();

    if !restart {
        if visible.len() <= 1 {
            return Some(0.0);
        }
        return Some(v as f64 / (visible.len() - 1) as f64);
    }

    if visible[v].metadata.layout == "section" {
        // A divider starts its own segment.
        return Some(0.0);
    }

    // Segment bounds in visible order: exclusive of the section slides
    // themselves. No preceding section means the deck start.
    let seg_start = visible[..v]
        .iter()
        .rposition(|s| s.metadata.layout == "section")
        .map(|i| i as isize)
        .unwrap_or(-1);
    let seg_end = visible[v + 1..]
        .iter()
        .position(|s| s.metadata.layout == "section")
        .map(|i| (v + 1 + i) as isize)
        .unwrap_or(visible.len() as isize);

    let rank = v as isize - seg_start; // 1-based within the segment
    let count = seg_end - seg_start - 1;
    if count <= 1 {
        return Some(0.0);
    }
    Some((rank - 1) as f64 / (count - 1) as f64)
}

/// Gradient stops for a mode, walking the fallback chain: frontmatter
/// gradient override → theme preset → built-in 3-stop gradient. Stops
/// that fail to parse are dropped; an empty result falls through to the
/// next source.
pub fn gradient_stops(config: &Config, theme: &Theme, mode: &str) -> Vec<Rgb> {
    if let Some(stops) = config.palette(mode).background_gradient.as_ref() {
        let parsed: Vec<Rgb> = stops.iter().filter_map(|s| parse_color(s)).collect();
        if !parsed.is_empty() {
            return parsed;
        }
        log::warn!("dynamic background override for {mode} mode has no parsable stops");
    }
    if let Some(stops) = theme.preset_stops(mode) {
        let parsed: Vec<Rgb> = stops.iter().filter_map(|s| parse_color(s)).collect();
        if !parsed.is_empty() {
            return parsed;
        }
    }
    let fallback: &[&str] = if mode == "dark" {
        &FALLBACK_DARK_STOPS
    } else {
        &FALLBACK_LIGHT_STOPS
    };
    fallback.iter().filter_map(|s| parse_color(s)).collect()
}

/// The interpolated background color for a slide, or `None` when the
/// dynamic background does not apply: disabled for the mode, hidden
/// slide, or a per-mode per-layout frontmatter override that wins over
/// interpolation entirely.
pub fn background_for_slide(
    slides: &[Slide],
    index: usize,
    mode: &str,
    config: &Config,
    theme: &Theme,
) -> Option<String> {
    if !config.dynamic_background.applies(mode) {
        return None;
    }
    let slide = slides.get(index)?;
    if config
        .palette(mode)
        .layout_background(&slide.metadata.layout)
        .is_some()
    {
        return None;
    }
    let p = gradient_position(slides, index, config.dynamic_background_restart)?;
    let stops = gradient_stops(config, theme, mode);
    interpolate(&stops, p).map(Rgb::to_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DynamicBackground, PaletteOverride};
    use crate::model::SlideMetadata;
    use crate::theme::DEFAULT_THEME;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    fn slide(index: usize, layout: &str, hidden: bool) -> Slide {
        Slide {
            index,
            hidden,
            metadata: SlideMetadata {
                layout: layout.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_color("#ff8000"), Some(rgb(255, 128, 0)));
        assert_eq!(parse_color("#fff"), Some(rgb(255, 255, 255)));
        assert_eq!(parse_color(" #102030 "), Some(rgb(16, 32, 48)));
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn interpolation_endpoints_and_midpoint() {
        let stops = [rgb(0, 0, 0), rgb(200, 100, 50)];
        assert_eq!(interpolate(&stops, 0.0), Some(rgb(0, 0, 0)));
        assert_eq!(interpolate(&stops, 1.0), Some(rgb(200, 100, 50)));
        assert_eq!(interpolate(&stops, 0.5), Some(rgb(100, 50, 25)));
    }

    #[test]
    fn interpolation_clamps_and_degrades() {
        let stops = [rgb(10, 10, 10), rgb(20, 20, 20)];
        assert_eq!(interpolate(&stops, -1.0), Some(rgb(10, 10, 10)));
        assert_eq!(interpolate(&stops, 2.0), Some(rgb(20, 20, 20)));
        assert_eq!(interpolate(&[], 0.5), None);
        assert_eq!(interpolate(&[rgb(1, 2, 3)], 0.9), Some(rgb(1, 2, 3)));
    }

    #[test]
    fn three_stop_interpolation_picks_segment() {
        let stops = [rgb(0, 0, 0), rgb(100, 100, 100), rgb(200, 200, 200)];
        assert_eq!(interpolate(&stops, 0.25), Some(rgb(50, 50, 50)));
        assert_eq!(interpolate(&stops, 0.75), Some(rgb(150, 150, 150)));
    }

    #[test]
    fn global_position_excludes_hidden() {
        let slides = vec![
            slide(0, "cover", false),
            slide(1, "default", true),
            slide(2, "default", false),
            slide(3, "default", false),
        ];
        assert_eq!(gradient_position(&slides, 0, false), Some(0.0));
        assert_eq!(gradient_position(&slides, 1, false), None);
        assert_eq!(gradient_position(&slides, 2, false), Some(0.5));
        assert_eq!(gradient_position(&slides, 3, false), Some(1.0));
    }

    #[test]
    fn single_visible_slide_sits_at_start() {
        let slides = vec![slide(0, "default", false)];
        assert_eq!(gradient_position(&slides, 0, false), Some(0.0));
    }

    #[test]
    fn section_restart_positions() {
        // Positions restart after the divider regardless of global index.
        let slides = vec![
            slide(0, "cover", false),
            slide(1, "default", false),
            slide(2, "section", false),
            slide(3, "default", false),
            slide(4, "default", false),
            slide(5, "default", false),
        ];
        assert_eq!(gradient_position(&slides, 3, true), Some(0.0));
        assert_eq!(gradient_position(&slides, 4, true), Some(0.5));
        assert_eq!(gradient_position(&slides, 5, true), Some(1.0));
        // The divider itself starts its own segment.
        assert_eq!(gradient_position(&slides, 2, true), Some(0.0));
        // Slides before the first divider form their own segment.
        assert_eq!(gradient_position(&slides, 0, true), Some(0.0));
        assert_eq!(gradient_position(&slides, 1, true), Some(1.0));
    }

    #[test]
    fn section_restart_skips_hidden_dividers() {
        let slides = vec![
            slide(0, "section", true),
            slide(1, "default", false),
            slide(2, "default", false),
        ];
        // The hidden divider does not split the segment.
        assert_eq!(gradient_position(&slides, 1, true), Some(0.0));
        assert_eq!(gradient_position(&slides, 2, true), Some(1.0));
    }

    #[test]
    fn stops_fallback_chain() {
        let theme = &*DEFAULT_THEME;
        let mut config = Config::default();

        // Frontmatter override wins.
        config.light = PaletteOverride {
            background_gradient: Some(vec!["#000000".into(), "#ffffff".into()]),
            ..Default::default()
        };
        let stops = gradient_stops(&config, theme, "light");
        assert_eq!(stops[0], rgb(0, 0, 0));

        // Malformed override falls through to the theme preset.
        config.light.background_gradient = Some(vec!["nonsense".into()]);
        let stops = gradient_stops(&config, theme, "light");
        assert_eq!(stops.len(), 3);
    }

    #[test]
    fn layout_override_skips_interpolation() {
        let theme = &*DEFAULT_THEME;
        let mut config = Config {
            dynamic_background: DynamicBackground::Both,
            ..Default::default()
        };
        let slides = vec![slide(0, "cover", false), slide(1, "default", false)];
        assert!(background_for_slide(&slides, 0, "light", &config, theme).is_some());

        config.light.cover_background = Some("#123456".into());
        assert!(background_for_slide(&slides, 0, "light", &config, theme).is_none());
        // Other layouts still interpolate.
        assert!(background_for_slide(&slides, 1, "light", &config, theme).is_some());
    }

    #[test]
    fn disabled_mode_yields_nothing() {
        let theme = &*DEFAULT_THEME;
        let config = Config {
            dynamic_background: DynamicBackground::Dark,
            ..Default::default()
        };
        let slides = vec![slide(0, "default", false)];
        assert!(background_for_slide(&slides, 0, "light", &config, theme).is_none());
        assert!(background_for_slide(&slides, 0, "dark", &config, theme).is_some());
    }
}
