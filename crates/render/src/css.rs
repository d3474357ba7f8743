//! CSS variable composition.
//!
//! Every knob the frontmatter or theme exposes lands in a custom property
//! on the deck root, so the static base stylesheet never changes per
//! document. The fallback chain (config override → theme value → hard
//! default) is walked fresh on every render; removing an override reveals
//! the value beneath it on the next pass.

use deckmd_core::config::ColorValue;
use deckmd_core::diag::RenderEvent;
use deckmd_core::fonts::resolve_weight;
use deckmd_core::parse_color;

use crate::context::RenderContext;

/// Hard default fonts, used when neither config nor theme names one.
const DEFAULT_HEADING_FONT: &str = "Inter";
const DEFAULT_BODY_FONT: &str = "Inter";
const DEFAULT_CODE_FONT: &str = "JetBrains Mono";

/// Formats a unit multiple without a trailing `.0` for whole numbers.
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Escapes a font family for a CSS `font-family` value.
fn font_family_value(family: &str) -> String {
    format!("'{}'", family.replace('\'', "\\'"))
}

/// A requested weight validated against the cached table. An unknown
/// family carries no table, so the author's request passes through as
/// written; a substitution is reported through the sink.
fn validated_weight(ctx: &RenderContext<'_>, family: &str, requested: u16) -> u16 {
    match resolve_weight(ctx.fonts, family, requested) {
        Some(resolved) => {
            if resolved != requested {
                ctx.sink.emit(RenderEvent::FontWeightFallback {
                    family: family.to_string(),
                    requested,
                    resolved,
                });
            }
            resolved
        }
        None => requested,
    }
}

/// Reports hex-looking colors that fail to parse. The value is still
/// emitted (the browser drops an invalid declaration on its own); the
/// report exists so authors learn why a color silently did nothing.
fn check_color(ctx: &RenderContext<'_>, value: &str) {
    if value.starts_with('#') && parse_color(value).is_none() {
        ctx.sink.emit(RenderEvent::MalformedColor {
            value: value.to_string(),
        });
    }
}

/// Heading color for one mode and level, walking the full precedence
/// chain: config per-level → config general → theme per-level → theme
/// general.
fn heading_color(ctx: &RenderContext<'_>, mode: &str, level: u8) -> Option<ColorValue> {
    let palette = ctx.config.palette(mode);
    if let Some(value) = palette
        .heading_colors
        .as_ref()
        .and_then(|colors| colors.get(usize::from(level - 1)))
    {
        return Some(value.clone());
    }
    if let Some(color) = palette.title_color.as_deref() {
        return Some(ColorValue::Solid(color.to_string()));
    }
    if let Some(value) = ctx.theme.heading_color(mode, level) {
        return Some(value.clone());
    }
    ctx.theme
        .title_color(mode)
        .map(|c| ColorValue::Solid(c.to_string()))
}

/// Whether either mode resolves this heading level to gradient text. Such
/// headings carry a `data-gradient` attribute so the stylesheet can bind
/// `--h-gradient` to the per-level variable and clip it to the glyphs.
pub(crate) fn heading_uses_gradient(ctx: &RenderContext<'_>, level: u8) -> bool {
    ["light", "dark"]
        .into_iter()
        .any(|mode| matches!(heading_color(ctx, mode, level), Some(ColorValue::Gradient(_))))
}

/// Pushes one `--name:value;` declaration.
fn decl(out: &mut String, name: &str, value: &str) {
    out.push_str("--");
    out.push_str(name);
    out.push(':');
    out.push_str(value);
    out.push(';');
}

/// Composes the full custom-property block for the deck root. The result
/// goes into the root element's `style` attribute.
pub fn compose_variables(ctx: &RenderContext<'_>) -> String {
    let config = ctx.config;
    let mut out = String::new();

    // Geometry. The slide unit is the viewport mean scaled by the user
    // factor; every spacing value below is a multiple of it.
    decl(
        &mut out,
        "slide-unit",
        &format!(
            "calc((1vw + 1vh) / 2 * {})",
            fmt_number(config.slide_scale())
        ),
    );
    for (name, units) in [
        ("content-left", config.content_left()),
        ("content-right", config.content_right()),
        ("title-top", config.title_top()),
        ("content-top", config.content_top()),
        ("header-top", config.header_top()),
        ("footer-bottom", config.footer_bottom()),
    ] {
        decl(
            &mut out,
            name,
            &format!("calc({} * var(--slide-unit))", fmt_number(units)),
        );
    }

    // Fonts: config → theme → hard default per role.
    let theme_fonts = &ctx.theme.template.fonts;
    let heading_font = config
        .heading_font
        .as_deref()
        .or(theme_fonts.heading.as_deref())
        .unwrap_or(DEFAULT_HEADING_FONT);
    let body_font = config
        .body_font
        .as_deref()
        .or(theme_fonts.body.as_deref())
        .unwrap_or(DEFAULT_BODY_FONT);
    let code_font = config
        .code_font
        .as_deref()
        .or(theme_fonts.code.as_deref())
        .unwrap_or(DEFAULT_CODE_FONT);
    decl(&mut out, "heading-font", &font_family_value(heading_font));
    decl(&mut out, "body-font", &font_family_value(body_font));
    decl(&mut out, "code-font", &font_family_value(code_font));

    let heading_weight = validated_weight(ctx, heading_font, config.heading_weight.unwrap_or(700));
    let body_weight = validated_weight(ctx, body_font, config.body_weight.unwrap_or(400));
    decl(&mut out, "heading-weight", &heading_weight.to_string());
    decl(&mut out, "body-weight", &body_weight.to_string());

    // Size offsets in slide units, added to the base sizes by the
    // stylesheet.
    decl(
        &mut out,
        "heading-size-offset",
        &fmt_number(config.heading_size.unwrap_or(0.0)),
    );
    decl(
        &mut out,
        "body-size-offset",
        &fmt_number(config.body_size.unwrap_or(0.0)),
    );

    for mode in ["light", "dark"] {
        compose_mode_variables(ctx, mode, &mut out);
    }
    out
}

/// Per-mode color variables (`--light-*` / `--dark-*`).
fn compose_mode_variables(ctx: &RenderContext<'_>, mode: &str, out: &mut String) {
    let palette = ctx.config.palette(mode);

    let body_color = palette
        .body_color
        .as_deref()
        .or_else(|| ctx.theme.text_color(mode));
    if let Some(color) = body_color {
        check_color(ctx, color);
        decl(out, &format!("{mode}-body-color"), color);
    }

    let background = palette
        .background
        .as_deref()
        .or_else(|| ctx.theme.background(mode));
    if let Some(color) = background {
        check_color(ctx, color);
        decl(out, &format!("{mode}-background"), color);
    }

    // Layout backgrounds for the centered layouts, re-resolved each
    // render so a removed override reveals the theme value again.
    for layout in ["cover", "title", "section"] {
        let color = palette
            .layout_background(layout)
            .or_else(|| ctx.theme.layout_background(mode, layout));
        if let Some(color) = color {
            check_color(ctx, color);
            decl(out, &format!("{mode}-{layout}-background"), color);
        }
    }

    for level in 1..=6u8 {
        let Some(value) = heading_color(ctx, mode, level) else {
            continue;
        };
        for stop in value.stops() {
            check_color(ctx, stop);
        }
        match value {
            ColorValue::Solid(color) => {
                decl(out, &format!("{mode}-h{level}-color"), &color);
            }
            ColorValue::Gradient(stops) => {
                decl(
                    out,
                    &format!("{mode}-h{level}-gradient"),
                    &format!("linear-gradient(135deg,{})", stops.join(",")),
                );
            }
        }
    }
}

/// The static base stylesheet. Everything document-specific flows in
/// through the custom properties composed above.
pub static BASE_STYLESHEET: &str = r#"
.deckmd-deck { position: relative; }
.slide {
  position: relative;
  aspect-ratio: 16 / 9;
  overflow: hidden;
  font-family: var(--body-font);
  font-weight: var(--body-weight);
  font-size: calc((2 + var(--body-size-offset)) * var(--slide-unit));
}
.slide.light { color: var(--light-body-color); background: var(--light-background); }
.slide.dark { color: var(--dark-body-color); background: var(--dark-background); }
.slide-background { position: absolute; inset: 0; width: 100%; height: 100%; }

.slide h1, .slide h2, .slide h3, .slide h4, .slide h5, .slide h6 {
  font-family: var(--heading-font);
  font-weight: var(--heading-weight);
  margin: 0;
}
.slide h1 { font-size: calc((6 + var(--heading-size-offset)) * var(--slide-unit)); }
.slide h2 { font-size: calc((4.5 + var(--heading-size-offset)) * var(--slide-unit)); }
.slide h3 { font-size: calc((3 + var(--heading-size-offset)) * var(--slide-unit)); }
.slide.light h1 { color: var(--light-h1-color, inherit); }
.slide.light h2 { color: var(--light-h2-color, inherit); }
.slide.light h3 { color: var(--light-h3-color, inherit); }
.slide.dark h1 { color: var(--dark-h1-color, inherit); }
.slide.dark h2 { color: var(--dark-h2-color, inherit); }
.slide.dark h3 { color: var(--dark-h3-color, inherit); }
.slide.light h1[data-gradient] { --h-gradient: var(--light-h1-gradient); }
.slide.light h2[data-gradient] { --h-gradient: var(--light-h2-gradient); }
.slide.light h3[data-gradient] { --h-gradient: var(--light-h3-gradient); }
.slide.light h4[data-gradient] { --h-gradient: var(--light-h4-gradient); }
.slide.light h5[data-gradient] { --h-gradient: var(--light-h5-gradient); }
.slide.light h6[data-gradient] { --h-gradient: var(--light-h6-gradient); }
.slide.dark h1[data-gradient] { --h-gradient: var(--dark-h1-gradient); }
.slide.dark h2[data-gradient] { --h-gradient: var(--dark-h2-gradient); }
.slide.dark h3[data-gradient] { --h-gradient: var(--dark-h3-gradient); }
.slide.dark h4[data-gradient] { --h-gradient: var(--dark-h4-gradient); }
.slide.dark h5[data-gradient] { --h-gradient: var(--dark-h5-gradient); }
.slide.dark h6[data-gradient] { --h-gradient: var(--dark-h6-gradient); }
.slide h1[data-gradient], .slide h2[data-gradient], .slide h3[data-gradient],
.slide h4[data-gradient], .slide h5[data-gradient], .slide h6[data-gradient] {
  background: var(--h-gradient);
  -webkit-background-clip: text;
  background-clip: text;
  color: transparent;
}

.slide pre, .slide code { font-family: var(--code-font); }

.slide-body {
  position: absolute;
  inset: var(--content-top) var(--content-right) 0 var(--content-left);
}
.layout-cover .slide-body,
.layout-title .slide-body,
.layout-section .slide-body { inset: 0 var(--content-right) 0 var(--content-left); }
.slide.light.layout-cover { background: var(--light-cover-background, var(--light-background)); }
.slide.light.layout-title { background: var(--light-title-background, var(--light-background)); }
.slide.light.layout-section { background: var(--light-section-background, var(--light-background)); }
.slide.dark.layout-cover { background: var(--dark-cover-background, var(--dark-background)); }
.slide.dark.layout-title { background: var(--dark-title-background, var(--dark-background)); }
.slide.dark.layout-section { background: var(--dark-section-background, var(--dark-background)); }

.slide-centered {
  display: flex;
  flex-direction: column;
  justify-content: center;
  height: 100%;
  gap: calc(1 * var(--slide-unit));
}

.slot-header { margin-top: var(--title-top); }
.kicker {
  text-transform: uppercase;
  letter-spacing: 0.1em;
  font-size: calc(1.5 * var(--slide-unit));
  margin: 0 0 calc(0.5 * var(--slide-unit));
}

.slot-columns { display: grid; }
.slot-columns.columns-2 { gap: calc(3 * var(--slide-unit)); }
.slot-columns.columns-3 { gap: calc(2.5 * var(--slide-unit)); }

.slide-header {
  position: absolute;
  top: var(--header-top);
  left: var(--content-left);
  right: var(--content-right);
  font-size: calc(1.5 * var(--slide-unit));
}
.slide-footer {
  position: absolute;
  bottom: var(--footer-bottom);
  left: var(--content-left);
  right: var(--content-right);
  font-size: calc(1.5 * var(--slide-unit));
}
.slide-number {
  position: absolute;
  bottom: var(--footer-bottom);
  right: var(--content-right);
  font-size: calc(1.5 * var(--slide-unit));
}

.full-image { position: absolute; inset: 0; display: flex; }
.full-image img { width: 100%; height: 100%; }
.full-image-pair { display: grid; grid-template-columns: 1fr 1fr; }
@media (orientation: portrait) {
  .full-image-pair { grid-template-columns: 1fr; grid-template-rows: 1fr 1fr; }
}
.full-image-grid { display: grid; }
.full-image-grid.grid-3 { grid-template-columns: repeat(3, 1fr); }
.full-image-grid.grid-4 { grid-template-columns: repeat(2, 1fr); grid-template-rows: repeat(2, 1fr); }
.full-image-grid.grid-5 { grid-template-columns: repeat(6, 1fr); }
.full-image-grid.grid-5 .cell-0, .full-image-grid.grid-5 .cell-1 { grid-column: span 3; }
.full-image-grid.grid-5 .cell-2, .full-image-grid.grid-5 .cell-3, .full-image-grid.grid-5 .cell-4 { grid-column: span 2; }
.full-image-grid.grid-6 { grid-template-columns: repeat(3, 1fr); grid-template-rows: repeat(2, 1fr); }
.full-image-flex { flex-wrap: wrap; }
.full-image-flex img { width: auto; height: auto; flex: 1 1 30%; min-width: 0; }
.grid-cell { overflow: hidden; }
.grid-cell img { display: block; }

.half-image-split { position: absolute; inset: 0; display: grid; }
.half-image-split.split-vertical { grid-template-columns: 1fr 1fr; }
.half-image-split.split-horizontal { grid-template-rows: 1fr 1fr; }
.image-panel { overflow: hidden; }
.image-panel img { width: 100%; height: 100%; display: block; }
.content-panel {
  position: relative;
  padding: var(--content-top) var(--content-right) var(--footer-bottom) var(--content-left);
  display: flex;
  flex-direction: column;
}
.content-panel .panel-body { flex: 1; }

.caption-title { margin: var(--title-top) var(--content-right) 0 var(--content-left); }
.caption-image-slot { flex: 1; overflow: hidden; display: flex; }
.caption-image-slot img { width: 100%; height: 100%; }
.layout-caption .slide-body { display: flex; flex-direction: column; inset: 0; }
.caption-bar {
  margin: calc(1 * var(--slide-unit)) var(--content-right) var(--footer-bottom) var(--content-left);
  font-size: calc(1.5 * var(--slide-unit));
}

.footnote-block {
  position: absolute;
  bottom: var(--footer-bottom);
  left: var(--content-left);
  font-size: calc(1.2 * var(--slide-unit));
}
.footnote-block ol { margin: 0; padding-left: 1.2em; }
.footnote-ref { font-size: 0.7em; }

.slide.slide-hidden { display: none; }
.deckmd-deck[data-show-hidden] .slide.slide-hidden { display: block; opacity: 0.5; }

.deckmd-thumbnail .slide { pointer-events: none; }
"#;
