//! Document assembly.
//!
//! Builds the slide fragments and wraps them per render target. The slide
//! markup is shared across targets; only the outer chrome differs: a
//! thumbnail holds one scaled slide, preview and presentation stack the
//! visible slides, and export keeps hidden slides in the DOM behind a
//! marker class with the resolved scheme embedded as the toggle default.

use deckmd_core::background::background_for_slide;
use deckmd_core::inline::render_inline;
use deckmd_core::model::{PresentationDocument, Slide, visible_slide_number};

use crate::context::{RenderContext, RenderTarget};
use crate::css::{BASE_STYLESHEET, compose_variables};
use crate::layout::{self, LayoutKind, footnotes, partition, plan_columns};

/// Renders one slide to a `<section>` fragment.
pub fn render_slide(ctx: &RenderContext<'_>, doc: &PresentationDocument, index: usize) -> String {
    let Some(slide) = doc.slides.get(index) else {
        return String::new();
    };
    let layout = LayoutKind::for_slide(ctx, slide);
    let mode = ctx.mode_for(slide);

    let mut classes = format!("slide {} {}", mode.as_str(), layout.css_class());
    if let Some(custom) = slide.metadata.custom_class.as_deref() {
        classes.push(' ');
        classes.push_str(custom);
    }
    if slide.hidden {
        classes.push_str(" slide-hidden");
    }

    let mut style = String::new();
    if let Some(color) =
        background_for_slide(&doc.slides, index, mode.as_str(), ctx.config, ctx.theme)
    {
        style.push_str(&format!("background-color:{color};"));
    }

    let mut out = format!(
        r#"<section class="{}" data-slide-index="{index}""#,
        html_escape::encode_double_quoted_attribute(&classes)
    );
    if !style.is_empty() {
        out.push_str(&format!(r#" style="{style}""#));
    }
    out.push('>');

    if let Some(src) = slide.metadata.background_image.as_deref() {
        out.push_str(&render_background_image(ctx, slide, src));
    }

    let header = render_margin_text(ctx, layout, ctx.config.header.as_deref(), "slide-header");
    let footer = render_margin_text(ctx, layout, ctx.config.footer.as_deref(), "slide-footer");

    if layout.is_half_image() {
        let horizontal = layout == LayoutKind::HalfImageHorizontal;
        out.push_str(&layout::render_half_image(
            ctx, slide, horizontal, &header, &footer,
        ));
    } else {
        out.push_str(&header);
        out.push_str(r#"<div class="slide-body">"#);
        out.push_str(&layout::render_layout(ctx, slide, layout));
        out.push_str("</div>");
        out.push_str(&footer);
    }

    if ctx.config.show_slide_numbers {
        if let Some(number) = visible_slide_number(&doc.slides, index) {
            out.push_str(&format!(r#"<div class="slide-number">{number}</div>"#));
        }
    }

    if footnotes::should_render(slide, layout, ctx.config) {
        let width = plan_columns(layout, &partition(slide).body)
            .and_then(|plan| footnotes::footnote_width_expr(ctx.config, plan.count(), plan.ratio));
        out.push_str(&footnotes::render_block(ctx, slide, width.as_deref()));
    }

    out.push_str("</section>");
    out
}

/// Header/footer text from the frontmatter. Centered layouts (cover,
/// title, section) carry neither.
fn render_margin_text(
    ctx: &RenderContext<'_>,
    layout: LayoutKind,
    text: Option<&str>,
    class: &str,
) -> String {
    if layout.is_centered() {
        return String::new();
    }
    match text {
        Some(text) if !text.is_empty() => format!(
            r#"<div class="{class}">{}</div>"#,
            render_inline(text, &ctx.inline_options())
        ),
        _ => String::new(),
    }
}

fn render_background_image(ctx: &RenderContext<'_>, slide: &Slide, src: &str) -> String {
    let resolved = ctx.resolver.resolve(src, false);
    let mut style = String::from("object-fit:cover");
    if let Some(opacity) = slide.metadata.background_opacity.filter(|o| *o < 100) {
        style.push_str(&format!(";opacity:{}", f64::from(opacity) / 100.0));
    }
    format!(
        r#"<img class="slide-background" src="{}" alt="" style="{style}"/>"#,
        html_escape::encode_double_quoted_attribute(&resolved)
    )
}

/// Renders the whole document for the context's target.
pub fn render_document(ctx: &RenderContext<'_>, doc: &PresentationDocument) -> String {
    log::debug!(
        "rendering {} slides for {:?} target",
        doc.slides.len(),
        ctx.target
    );
    let mut root_classes = String::from("deckmd-deck");
    for class in &ctx.theme.template.css_classes {
        root_classes.push(' ');
        root_classes.push_str(class);
    }
    root_classes.push(' ');
    root_classes.push_str(match ctx.target {
        RenderTarget::Thumbnail => "deckmd-thumbnail",
        RenderTarget::Preview => "deckmd-preview",
        RenderTarget::Presentation => "deckmd-presentation",
        RenderTarget::Export => "deckmd-export",
    });

    let mut out = format!(
        r#"<div class="{}""#,
        html_escape::encode_double_quoted_attribute(&root_classes)
    );
    if ctx.target == RenderTarget::Export {
        // The export surface has no live host; the scheme resolved at
        // render time becomes the static toggle default.
        out.push_str(&format!(
            r#" data-scheme="{}""#,
            match ctx.scheme {
                deckmd_core::ColorScheme::Light => "light",
                deckmd_core::ColorScheme::Dark => "dark",
            }
        ));
    }
    out.push_str(&format!(
        r#" style="{}">"#,
        html_escape::encode_double_quoted_attribute(&compose_variables(ctx))
    ));
    out.push_str("<style>");
    out.push_str(BASE_STYLESHEET);
    out.push_str("</style>");

    match ctx.target {
        RenderTarget::Thumbnail => {
            // One slide only: the first visible one, or the first slide
            // of an all-hidden deck so the thumbnail is never blank.
            let index = doc
                .slides
                .iter()
                .position(|s| !s.hidden)
                .or(if doc.slides.is_empty() { None } else { Some(0) });
            if let Some(index) = index {
                out.push_str(&render_slide(ctx, doc, index));
            }
        }
        RenderTarget::Preview | RenderTarget::Presentation => {
            for index in 0..doc.slides.len() {
                if doc.slides[index].hidden {
                    continue;
                }
                out.push_str(&render_slide(ctx, doc, index));
            }
        }
        RenderTarget::Export => {
            // Hidden slides stay in the DOM behind the marker class.
            for index in 0..doc.slides.len() {
                out.push_str(&render_slide(ctx, doc, index));
            }
        }
    }

    out.push_str("</div>");
    out
}
