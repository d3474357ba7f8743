//! Image compositing.
//!
//! Covers the three placement strategies (full-image, half-image panels,
//! caption slots), the filter keyword mapping, and resolution of
//! pseudo-scheme sources through the externally populated SVG cache. A
//! cache miss renders a deterministic inline "loading" SVG so a later
//! pass can tell "still loading" apart from a real picture.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use deckmd_core::diag::RenderEvent;
use deckmd_core::model::ImageData;
use once_cell::sync::Lazy;

use crate::context::RenderContext;

/// Pseudo-scheme for drawings converted asynchronously by the host.
pub const EXCALIDRAW_SCHEME: &str = "excalidraw://";

/// Spin-animation marker the placeholder detection checks for.
const SPIN_MARKER: &str = "deckmd-spin";
/// Dash pattern the placeholder detection checks for.
const DASH_SIGNATURE: &str = "stroke-dasharray=\"62.8 37.7\"";

/// The inline "loading" SVG: a spinning dashed circle.
static LOADING_SVG: &str = concat!(
    r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 40" width="40" height="40">"##,
    r##"<style>@keyframes deckmd-spin{to{transform:rotate(360deg)}}</style>"##,
    r##"<circle cx="20" cy="20" r="16" fill="none" stroke="#8a8f98" stroke-width="4" "##,
    r##"stroke-dasharray="62.8 37.7" "##,
    r##"style="animation:deckmd-spin 1s linear infinite;transform-origin:center"/></svg>"##,
);

static LOADING_URI: Lazy<String> = Lazy::new(|| svg_data_uri(LOADING_SVG));

/// Base64 data URI for arbitrary SVG markup.
fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg))
}

/// The data URI used while a pseudo-scheme image is still converting.
pub fn loading_placeholder_uri() -> &'static str {
    &LOADING_URI
}

/// Whether a source is the loading placeholder: a base64 SVG data URI
/// whose decoded markup carries both the spin-animation marker and the
/// specific dash pattern. Both are required so a real drawing that merely
/// animates is not mistaken for the sentinel.
pub fn is_loading_placeholder(src: &str) -> bool {
    let Some(payload) = src.strip_prefix("data:image/svg+xml;base64,") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(payload) else {
        return false;
    };
    let Ok(svg) = String::from_utf8(decoded) else {
        return false;
    };
    svg.contains(SPIN_MARKER) && svg.contains(DASH_SIGNATURE)
}

/// Maps a filter keyword to its CSS function. Unknown keywords degrade to
/// no filter.
pub fn filter_css(keyword: &str) -> Option<&'static str> {
    match keyword {
        "darken" => Some("brightness(0.6)"),
        "lighten" => Some("brightness(1.4)"),
        "blur" => Some("blur(4px)"),
        "grayscale" => Some("grayscale(100%)"),
        "sepia" => Some("sepia(100%)"),
        _ => None,
    }
}

/// Resolves an image source to a displayable URL. Pseudo-scheme sources
/// go through the SVG cache (miss → loading placeholder); everything else
/// goes through the caller's resolver. Unresolvable sources pass through
/// unchanged so the `<img>` tag still renders.
pub fn resolve_src(ctx: &RenderContext<'_>, data: &ImageData) -> String {
    if let Some(key) = data.src.strip_prefix(EXCALIDRAW_SCHEME) {
        if let Some(svg) = ctx.svg_cache.and_then(|cache| cache.get(key)) {
            return svg_data_uri(svg);
        }
        ctx.sink.emit(RenderEvent::UnresolvedImage {
            src: data.src.clone(),
        });
        return loading_placeholder_uri().to_string();
    }
    ctx.resolver.resolve(&data.src, data.is_wiki_link)
}

/// Inline style for an image: object-fit/position always, filter and
/// opacity only when they do something.
pub fn image_style(data: &ImageData) -> String {
    let mut style = format!(
        "object-fit:{};object-position:{}% {}%",
        data.size.as_css(),
        data.x,
        data.y
    );
    if let Some(filter) = data.filter.as_deref().and_then(filter_css) {
        style.push_str(&format!(";filter:{filter}"));
    }
    if data.opacity < 100 {
        style.push_str(&format!(";opacity:{}", f64::from(data.opacity) / 100.0));
    }
    style
}

/// A bare `<img>` tag for in-column content.
pub fn render_inline_image(ctx: &RenderContext<'_>, data: &ImageData) -> String {
    format!(
        r#"<img class="content-image" src="{}" alt="{}" style="{}"/>"#,
        html_escape::encode_double_quoted_attribute(&resolve_src(ctx, data)),
        html_escape::encode_double_quoted_attribute(&data.alt),
        image_style(data)
    )
}

/// The full-image slide body: one image fills the slide; two share a
/// responsive split; three to six use a fixed grid class; more fall back
/// to flex wrap.
pub fn render_full_image(ctx: &RenderContext<'_>, images: &[&ImageData]) -> String {
    match images.len() {
        0 => String::new(),
        1 => format!(
            r#"<div class="full-image">{}</div>"#,
            full_slot_img(ctx, images[0])
        ),
        2 => format!(
            r#"<div class="full-image full-image-pair">{}{}</div>"#,
            full_slot_img(ctx, images[0]),
            full_slot_img(ctx, images[1])
        ),
        n @ 3..=6 => {
            let mut out = format!(r#"<div class="full-image full-image-grid grid-{n}">"#);
            for (i, image) in images.iter().enumerate() {
                out.push_str(&format!(
                    r#"<div class="grid-cell cell-{i}">{}</div>"#,
                    full_slot_img(ctx, image)
                ));
            }
            out.push_str("</div>");
            out
        }
        _ => {
            let mut out = String::from(r#"<div class="full-image full-image-flex">"#);
            for image in images {
                out.push_str(&full_slot_img(ctx, image));
            }
            out.push_str("</div>");
            out
        }
    }
}

/// The edge-to-edge image panel of a half-image layout.
pub fn render_image_panel(ctx: &RenderContext<'_>, images: &[&ImageData]) -> String {
    let mut out = String::from(r#"<div class="image-panel">"#);
    for image in images {
        out.push_str(&full_slot_img(ctx, image));
    }
    out.push_str("</div>");
    out
}

/// The full-bleed image slot of the caption layout.
pub fn render_caption_slot(ctx: &RenderContext<'_>, images: &[&ImageData]) -> String {
    let mut out = String::from(r#"<div class="caption-image-slot">"#);
    for image in images {
        out.push_str(&full_slot_img(ctx, image));
    }
    out.push_str("</div>");
    out
}

fn full_slot_img(ctx: &RenderContext<'_>, data: &ImageData) -> String {
    format!(
        r#"<img class="slot-image" src="{}" alt="{}" style="{}"/>"#,
        html_escape::encode_double_quoted_attribute(&resolve_src(ctx, data)),
        html_escape::encode_double_quoted_attribute(&data.alt),
        image_style(data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckmd_core::model::ImageSize;
    use deckmd_core::{Config, PresentationDocument};

    fn image(src: &str) -> ImageData {
        ImageData {
            src: src.to_string(),
            ..Default::default()
        }
    }

    fn with_ctx(f: impl FnOnce(&RenderContext<'_>)) {
        let config = Config::default();
        let doc = PresentationDocument::default();
        let ctx = RenderContext::with_defaults(&config, &doc);
        f(&ctx);
    }

    #[test]
    fn filter_keyword_mapping() {
        assert_eq!(filter_css("darken"), Some("brightness(0.6)"));
        assert_eq!(filter_css("lighten"), Some("brightness(1.4)"));
        assert_eq!(filter_css("blur"), Some("blur(4px)"));
        assert_eq!(filter_css("grayscale"), Some("grayscale(100%)"));
        assert_eq!(filter_css("sepia"), Some("sepia(100%)"));
        assert_eq!(filter_css("sparkle"), None);
    }

    #[test]
    fn style_includes_fit_position_and_effects() {
        let data = ImageData {
            size: ImageSize::Contain,
            x: 20,
            y: 80,
            filter: Some("blur".into()),
            opacity: 45,
            ..image("a.png")
        };
        let style = image_style(&data);
        assert!(style.contains("object-fit:contain"));
        assert!(style.contains("object-position:20% 80%"));
        assert!(style.contains("filter:blur(4px)"));
        assert!(style.contains("opacity:0.45"));
    }

    #[test]
    fn full_opacity_is_not_emitted() {
        let style = image_style(&image("a.png"));
        assert!(!style.contains("opacity"));
    }

    #[test]
    fn placeholder_svg_decodes_intact() {
        let uri = loading_placeholder_uri();
        let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(BASE64.decode(payload).unwrap()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        // The hex stroke color must survive into the markup verbatim.
        assert!(svg.contains(r##"stroke="#8a8f98""##), "{svg}");
    }

    #[test]
    fn placeholder_detection_round_trip() {
        let uri = loading_placeholder_uri();
        assert!(is_loading_placeholder(uri));
        assert!(!is_loading_placeholder("https://example.com/a.png"));
        // A plain SVG data URI without the sentinel markers is a real image.
        let other = svg_data_uri("<svg><circle r=\"5\"/></svg>");
        assert!(!is_loading_placeholder(&other));
        // The spin marker alone is not enough.
        let spinning = svg_data_uri("<svg><style>@keyframes deckmd-spin{}</style></svg>");
        assert!(!is_loading_placeholder(&spinning));
    }

    #[test]
    fn cache_miss_renders_placeholder() {
        with_ctx(|ctx| {
            let html = render_inline_image(ctx, &image("excalidraw://drawing.excalidraw"));
            let src = html.split("src=\"").nth(1).unwrap();
            let src = &src[..src.find('"').unwrap()];
            assert!(is_loading_placeholder(src));
        });
    }

    #[test]
    fn cache_hit_embeds_converted_svg() {
        let config = Config::default();
        let doc = PresentationDocument::default();
        let mut cache = crate::context::SvgCache::new();
        cache.insert(
            "drawing.excalidraw".to_string(),
            "<svg><rect width=\"4\"/></svg>".to_string(),
        );
        let ctx = RenderContext::with_defaults(&config, &doc).svg_cache(&cache);
        let html = render_inline_image(&ctx, &image("excalidraw://drawing.excalidraw"));
        let src = html.split("src=\"").nth(1).unwrap();
        let src = &src[..src.find('"').unwrap()];
        assert!(!is_loading_placeholder(src));
        assert!(src.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn grid_class_tracks_image_count() {
        with_ctx(|ctx| {
            let imgs: Vec<ImageData> = (0..4).map(|i| image(&format!("{i}.png"))).collect();
            let refs: Vec<&ImageData> = imgs.iter().collect();
            let html = render_full_image(ctx, &refs);
            assert!(html.contains("full-image-grid grid-4"));
            assert_eq!(html.matches("<img").count(), 4);
        });
    }

    #[test]
    fn seven_images_fall_back_to_flex() {
        with_ctx(|ctx| {
            let imgs: Vec<ImageData> = (0..7).map(|i| image(&format!("{i}.png"))).collect();
            let refs: Vec<&ImageData> = imgs.iter().collect();
            let html = render_full_image(ctx, &refs);
            assert!(html.contains("full-image-flex"));
        });
    }

    #[test]
    fn pair_renders_split() {
        with_ctx(|ctx| {
            let a = image("a.png");
            let b = image("b.png");
            let html = render_full_image(ctx, &[&a, &b]);
            assert!(html.contains("full-image-pair"));
            assert_eq!(html.matches("<img").count(), 2);
        });
    }
}
