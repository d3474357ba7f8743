//! Layout dispatch and templates.
//!
//! A slide's layout tag routes to one of 14 renderers. The half-image
//! variants are structurally different from everything else: they replace
//! the whole-slide header/footer/body wrapper with a two-panel split, so
//! the document assembler special-cases them before the content-only
//! dispatch below ever runs.

pub mod columns;
pub mod footnotes;
pub mod images;

use deckmd_core::diag::RenderEvent;
use deckmd_core::model::{ElementKind, ImageData, Slide, SlideElement};

use crate::context::RenderContext;
use crate::elements::render_element;
use columns::{ColumnPlan, ColumnRatio};

/// The closed set of layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Centered cover slide.
    Cover,
    /// Centered title slide.
    Title,
    /// Centered section divider (also restarts the dynamic background
    /// when section-restart is on).
    Section,
    /// Auto-detected column flow.
    Default,
    /// One explicit column.
    OneColumn,
    /// Two equal columns.
    TwoColumns,
    /// Three equal columns.
    ThreeColumns,
    /// Two columns, 1:2 split.
    TwoColumnsNarrowWide,
    /// Two columns, 2:1 split.
    TwoColumnsWideNarrow,
    /// Images fill the slide.
    FullImage,
    /// Title bar, full-bleed image, optional caption bar.
    Caption,
    /// Vertical two-panel split, image edge-to-edge.
    HalfImage,
    /// Horizontal two-panel split.
    HalfImageHorizontal,
    /// Content plus the full footnote list.
    Footnotes,
}

impl LayoutKind {
    /// Parses a layout tag. Unknown tags yield `None`; callers fall back
    /// to [`LayoutKind::Default`].
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "cover" => Some(Self::Cover),
            "title" => Some(Self::Title),
            "section" => Some(Self::Section),
            "default" | "" => Some(Self::Default),
            "1-column" => Some(Self::OneColumn),
            "2-columns" => Some(Self::TwoColumns),
            "3-columns" => Some(Self::ThreeColumns),
            "2-columns-1+2" => Some(Self::TwoColumnsNarrowWide),
            "2-columns-2+1" => Some(Self::TwoColumnsWideNarrow),
            "full-image" => Some(Self::FullImage),
            "caption" => Some(Self::Caption),
            "half-image" => Some(Self::HalfImage),
            "half-image-horizontal" => Some(Self::HalfImageHorizontal),
            "footnotes" => Some(Self::Footnotes),
            _ => None,
        }
    }

    /// Resolves a slide's layout tag, reporting unknown tags through the
    /// diagnostics sink before falling back to the default layout.
    pub fn for_slide(ctx: &RenderContext<'_>, slide: &Slide) -> Self {
        match Self::parse(&slide.metadata.layout) {
            Some(layout) => layout,
            None => {
                ctx.sink.emit(RenderEvent::UnknownLayout {
                    slide: slide.index,
                    tag: slide.metadata.layout.clone(),
                });
                Self::Default
            }
        }
    }

    /// CSS class for the slide element.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Cover => "layout-cover",
            Self::Title => "layout-title",
            Self::Section => "layout-section",
            Self::Default => "layout-default",
            Self::OneColumn => "layout-one-column",
            Self::TwoColumns => "layout-two-columns",
            Self::ThreeColumns => "layout-three-columns",
            Self::TwoColumnsNarrowWide => "layout-two-columns-narrow-wide",
            Self::TwoColumnsWideNarrow => "layout-two-columns-wide-narrow",
            Self::FullImage => "layout-full-image",
            Self::Caption => "layout-caption",
            Self::HalfImage => "layout-half-image",
            Self::HalfImageHorizontal => "layout-half-image-horizontal",
            Self::Footnotes => "layout-footnotes",
        }
    }

    /// Centered layouts render everything in one flex container.
    pub fn is_centered(self) -> bool {
        matches!(self, Self::Cover | Self::Title | Self::Section)
    }

    /// Half-image layouts bypass the generic slide wrapper.
    pub fn is_half_image(self) -> bool {
        matches!(self, Self::HalfImage | Self::HalfImageHorizontal)
    }

    /// Visual column count and ratio for explicit column layouts.
    pub fn column_spec(self) -> Option<(usize, ColumnRatio)> {
        match self {
            Self::OneColumn => Some((1, ColumnRatio::Equal)),
            Self::TwoColumns => Some((2, ColumnRatio::Equal)),
            Self::ThreeColumns => Some((3, ColumnRatio::Equal)),
            Self::TwoColumnsNarrowWide => Some((2, ColumnRatio::NarrowWide)),
            Self::TwoColumnsWideNarrow => Some((2, ColumnRatio::WideNarrow)),
            Self::Footnotes => Some((1, ColumnRatio::Equal)),
            _ => None,
        }
    }
}

/// A slide's visible elements split by role: slide headers (kickers plus
/// H1/H2), images, and everything else. H3+ headings stay in the body as
/// in-column separators.
#[derive(Debug, Default)]
pub struct Partitioned<'a> {
    /// Kickers and H1/H2 headings.
    pub headers: Vec<&'a SlideElement>,
    /// Image data of visible image elements.
    pub images: Vec<&'a ImageData>,
    /// Remaining body content, including image elements so column flow
    /// keeps them in place.
    pub body: Vec<&'a SlideElement>,
}

/// Partitions a slide's visible elements.
pub fn partition(slide: &Slide) -> Partitioned<'_> {
    let mut parts = Partitioned::default();
    for element in slide.visible_elements() {
        if element.is_slide_header() || element.kind == ElementKind::Kicker {
            parts.headers.push(element);
            continue;
        }
        if let Some(data) = element.image.as_ref().filter(|_| element.kind == ElementKind::Image) {
            parts.images.push(data);
        }
        parts.body.push(element);
    }
    parts
}

/// Column plan the active layout produces for a slide body: auto-detect
/// for `default`, the fixed spec for explicit column layouts.
pub fn plan_columns<'a>(layout: LayoutKind, body: &[&'a SlideElement]) -> Option<ColumnPlan<'a>> {
    match layout.column_spec() {
        Some((count, ratio)) => Some(columns::explicit(body, count, ratio)),
        None if layout == LayoutKind::Default => Some(columns::auto_detect(body)),
        None => None,
    }
}

/// Renders the content body of a slide for every layout except the
/// half-image pair (handled by the document assembler).
pub fn render_layout(ctx: &RenderContext<'_>, slide: &Slide, layout: LayoutKind) -> String {
    let parts = partition(slide);

    if layout.is_centered() {
        let mut out = String::from(r#"<div class="slide-centered">"#);
        for element in slide.visible_elements() {
            out.push_str(&render_element(ctx, element));
        }
        out.push_str("</div>");
        return out;
    }

    match layout {
        LayoutKind::FullImage => {
            let mut out = String::new();
            if !parts.headers.is_empty() {
                out.push_str(&render_slot_header(ctx, &parts.headers));
            }
            out.push_str(&images::render_full_image(ctx, &parts.images));
            out
        }
        LayoutKind::Caption => render_caption(ctx, &parts),
        _ => {
            let mut out = render_slot_header(ctx, &parts.headers);
            if let Some(plan) = plan_columns(layout, &parts.body) {
                out.push_str(&render_columns(ctx, &plan));
            }
            out
        }
    }
}

/// The `slot-header` block shared by the default and column layouts.
fn render_slot_header(ctx: &RenderContext<'_>, headers: &[&SlideElement]) -> String {
    let mut out = String::from(r#"<div class="slot-header">"#);
    for element in headers {
        out.push_str(&render_element(ctx, element));
    }
    out.push_str("</div>");
    out
}

/// The `slot-columns` grid.
fn render_columns(ctx: &RenderContext<'_>, plan: &ColumnPlan<'_>) -> String {
    let count = plan.count();
    let mut out = format!(
        r#"<div class="slot-columns columns-{count}" style="grid-template-columns:{}">"#,
        plan.ratio.grid_template(count)
    );
    for column in &plan.columns {
        if column.is_empty() {
            out.push_str(r#"<div class="column column-empty"></div>"#);
            continue;
        }
        out.push_str(r#"<div class="column">"#);
        for element in column {
            out.push_str(&render_element(ctx, element));
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

/// Caption layout: title bar, full-bleed image slot, optional caption bar
/// built from the remaining text content.
fn render_caption(ctx: &RenderContext<'_>, parts: &Partitioned<'_>) -> String {
    let mut out = String::new();
    if !parts.headers.is_empty() {
        out.push_str(r#"<div class="caption-title">"#);
        for element in &parts.headers {
            out.push_str(&render_element(ctx, element));
        }
        out.push_str("</div>");
    }
    out.push_str(&images::render_caption_slot(ctx, &parts.images));
    let captions: Vec<&&SlideElement> = parts
        .body
        .iter()
        .filter(|e| e.kind != ElementKind::Image)
        .collect();
    if !captions.is_empty() {
        out.push_str(r#"<div class="caption-bar">"#);
        for element in captions {
            out.push_str(&render_element(ctx, element));
        }
        out.push_str("</div>");
    }
    out
}

/// Whether the half-image split puts the image panel first (left or top):
/// true when the slide's first visible element is an image. This is
/// derived from content order, not explicit configuration.
pub fn image_panel_first(slide: &Slide) -> bool {
    slide
        .visible_elements()
        .next()
        .is_some_and(|e| e.kind == ElementKind::Image)
}

/// Renders the two-panel half-image body. `header_html`/`footer_html` are
/// the already-rendered slide header and footer, which move inside the
/// content panel for these layouts.
pub fn render_half_image(
    ctx: &RenderContext<'_>,
    slide: &Slide,
    horizontal: bool,
    header_html: &str,
    footer_html: &str,
) -> String {
    let parts = partition(slide);
    let image_first = image_panel_first(slide);
    let split = if horizontal {
        "split-horizontal"
    } else {
        "split-vertical"
    };
    let order = if image_first {
        "image-first"
    } else {
        "image-last"
    };

    let panel = images::render_image_panel(ctx, &parts.images);
    let mut content = String::from(r#"<div class="content-panel">"#);
    content.push_str(header_html);
    content.push_str(&render_slot_header(ctx, &parts.headers));
    content.push_str(r#"<div class="panel-body">"#);
    for element in parts.body.iter().filter(|e| e.kind != ElementKind::Image) {
        content.push_str(&render_element(ctx, element));
    }
    content.push_str("</div>");
    content.push_str(footer_html);
    content.push_str("</div>");

    let mut out = format!(r#"<div class="half-image-split {split} {order}">"#);
    if image_first {
        out.push_str(&panel);
        out.push_str(&content);
    } else {
        out.push_str(&content);
        out.push_str(&panel);
    }
    out.push_str("</div>");
    out
}
