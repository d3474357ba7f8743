//! Footnote geometry and rendering.
//!
//! Footnotes are suppressed on ordinary slides unless the frontmatter
//! opts in; they always render for the `footnotes` layout and for
//! auto-generated footnote slides. On multi-column layouts the block's
//! width must equal the first visual column's width, so the expression
//! comes straight from the column engine's formula.

use deckmd_core::Config;
use deckmd_core::inline::render_inline;
use deckmd_core::model::Slide;

use crate::context::RenderContext;
use crate::layout::LayoutKind;
use crate::layout::columns::{ColumnRatio, column_width_expr};

/// Whether the slide renders its footnote block at all.
pub fn should_render(slide: &Slide, layout: LayoutKind, config: &Config) -> bool {
    if slide.footnotes.is_empty() {
        return false;
    }
    layout == LayoutKind::Footnotes
        || slide.is_auto_footnotes_slide()
        || config.show_footnotes_on_slides
}

/// Width expression for the footnote block so it lines up with the first
/// visual column. Single-column bodies need no explicit width.
pub fn footnote_width_expr(
    config: &Config,
    column_count: usize,
    ratio: ColumnRatio,
) -> Option<String> {
    if column_count <= 1 {
        return None;
    }
    Some(column_width_expr(config, column_count, ratio))
}

/// Renders the footnote block: an ordered list with presentation-wide
/// ordinals, optionally width-constrained to the first column.
pub fn render_block(ctx: &RenderContext<'_>, slide: &Slide, width: Option<&str>) -> String {
    if slide.footnotes.is_empty() {
        return String::new();
    }
    let opts = ctx.inline_options();
    let mut out = match width {
        Some(expr) => format!(r#"<div class="footnote-block" style="width:{expr}">"#),
        None => String::from(r#"<div class="footnote-block">"#),
    };
    out.push_str("<ol>");
    for footnote in &slide.footnotes {
        let ordinal = ctx
            .footnote_ordinals
            .get(&footnote.id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| footnote.id.clone());
        out.push_str(&format!(
            r#"<li value="{ordinal}" id="fn-{}">{}</li>"#,
            html_escape::encode_double_quoted_attribute(&footnote.id),
            render_inline(&footnote.content, &opts)
        ));
    }
    out.push_str("</ol></div>");
    out
}
