//! Presentation data model.
//!
//! The model is produced by an external markdown-to-model parser and is
//! immutable for the duration of a render pass. Everything here is plain
//! data; the render crate consumes it without mutating it.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A complete presentation: frontmatter configuration plus an ordered
/// sequence of slides.
#[derive(Debug, Clone, Default)]
pub struct PresentationDocument {
    /// Parsed frontmatter configuration.
    pub config: Config,
    /// Slides in document order.
    pub slides: Vec<Slide>,
}

/// A single slide.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    /// Zero-based position in the document (including hidden slides).
    pub index: usize,
    /// Per-slide metadata (layout tag, mode override, background image).
    pub metadata: SlideMetadata,
    /// Content elements in source order.
    pub elements: Vec<SlideElement>,
    /// Speaker notes, one entry per note line.
    pub speaker_notes: Vec<String>,
    /// Footnote definitions attached to this slide.
    pub footnotes: Vec<Footnote>,
    /// Hidden slides are excluded from visible numbering and gradient
    /// position counting but still render (export mode toggles them).
    pub hidden: bool,
}

impl Slide {
    /// Returns the content elements with `visible: true`.
    pub fn visible_elements(&self) -> impl Iterator<Item = &SlideElement> {
        self.elements.iter().filter(|e| e.visible)
    }

    /// An auto-generated footnotes slide carries no elements but a
    /// non-empty footnote list. It always renders its footnote block.
    pub fn is_auto_footnotes_slide(&self) -> bool {
        self.elements.is_empty() && !self.footnotes.is_empty()
    }
}

/// Per-slide metadata.
#[derive(Debug, Clone, Default)]
pub struct SlideMetadata {
    /// Raw layout tag (one of the 14 recognized variants; unknown tags
    /// fall back to the default layout at dispatch time).
    pub layout: String,
    /// Per-slide light/dark/system override; wins over the
    /// presentation-wide default.
    pub mode: Option<Mode>,
    /// Optional background image path.
    pub background_image: Option<String>,
    /// Background image opacity, 0-100.
    pub background_opacity: Option<u8>,
    /// Extra CSS class applied to the slide element.
    pub custom_class: Option<String>,
}

/// Color mode for a slide or the whole presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the caller-supplied color scheme.
    System,
}

/// The scheme value a host supplies at render time. `Mode::System`
/// resolves against this rather than a CSS media query so export output
/// can embed the resolved value as a static toggle default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Host is in light mode.
    #[default]
    Light,
    /// Host is in dark mode.
    Dark,
}

impl Mode {
    /// Resolves `System` against the caller-supplied scheme.
    pub fn resolve(self, scheme: ColorScheme) -> ResolvedMode {
        match self {
            Mode::Light => ResolvedMode::Light,
            Mode::Dark => ResolvedMode::Dark,
            Mode::System => match scheme {
                ColorScheme::Light => ResolvedMode::Light,
                ColorScheme::Dark => ResolvedMode::Dark,
            },
        }
    }
}

/// A fully resolved mode (no `system` indirection left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMode {
    /// Light mode.
    Light,
    /// Dark mode.
    Dark,
}

impl ResolvedMode {
    /// CSS class / variable prefix for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedMode::Light => "light",
            ResolvedMode::Dark => "dark",
        }
    }
}

/// A typed content element on a slide.
#[derive(Debug, Clone)]
pub struct SlideElement {
    /// Element variant.
    pub kind: ElementKind,
    /// Raw text content (inline markdown is rendered at output time).
    pub content: String,
    /// Invisible elements are skipped entirely.
    pub visible: bool,
    /// Zero-based column assignment; unset means not column-assigned.
    /// Out-of-range values are clamped by the consuming layout.
    pub column_index: Option<usize>,
    /// Present only for image elements.
    pub image: Option<ImageData>,
}

impl SlideElement {
    /// Creates a visible element of the given kind with raw content.
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            visible: true,
            column_index: None,
            image: None,
        }
    }

    /// Creates a visible image element.
    pub fn image(data: ImageData) -> Self {
        Self {
            kind: ElementKind::Image,
            content: String::new(),
            visible: true,
            column_index: None,
            image: Some(data),
        }
    }

    /// True for H1/H2 headings, which act as slide headers. H3+ headings
    /// are body content usable as in-column separators.
    pub fn is_slide_header(&self) -> bool {
        matches!(self.kind, ElementKind::Heading(level) if level <= 2)
    }
}

/// Element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Heading with level 1-6.
    Heading(u8),
    /// Plain paragraph.
    Paragraph,
    /// Bullet or ordered list (raw line-per-item content).
    List,
    /// Blockquote.
    Blockquote,
    /// Image (see [`SlideElement::image`]).
    Image,
    /// Fenced code block.
    Code,
    /// Markdown table (best-effort structure).
    Table,
    /// Math expression.
    Math,
    /// Kicker line rendered above the slide heading.
    Kicker,
}

/// Object-fit behavior for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// Fill the slot, cropping as needed.
    #[default]
    Cover,
    /// Letterbox to fit entirely inside the slot.
    Contain,
}

impl ImageSize {
    /// The CSS `object-fit` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            ImageSize::Cover => "cover",
            ImageSize::Contain => "contain",
        }
    }
}

/// Image placement and effect data.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Source path as written by the author (may use the
    /// `excalidraw://` pseudo-scheme).
    pub src: String,
    /// Alt text.
    pub alt: String,
    /// Object-fit behavior.
    pub size: ImageSize,
    /// Horizontal object-position percentage.
    pub x: u8,
    /// Vertical object-position percentage.
    pub y: u8,
    /// Optional filter keyword (darken, lighten, blur, grayscale, sepia).
    pub filter: Option<String>,
    /// Opacity 0-100; only emitted when below 100.
    pub opacity: u8,
    /// Whether the source came from a wiki-link (`![[...]]`).
    pub is_wiki_link: bool,
}

impl Default for ImageData {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            size: ImageSize::Cover,
            x: 50,
            y: 50,
            filter: None,
            opacity: 100,
            is_wiki_link: false,
        }
    }
}

/// A footnote definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    /// Reference identifier (the `id` in `[^id]`).
    pub id: String,
    /// Raw footnote text.
    pub content: String,
}

/// 1-based visible slide number of the slide at `index`, counting only
/// non-hidden slides up to and including it. `None` when the slide itself
/// is hidden.
pub fn visible_slide_number(slides: &[Slide], index: usize) -> Option<usize> {
    if slides.get(index).is_none_or(|s| s.hidden) {
        return None;
    }
    Some(slides[..=index].iter().filter(|s| !s.hidden).count())
}

/// Number of non-hidden slides in the deck.
pub fn visible_slide_count(slides: &[Slide]) -> usize {
    slides.iter().filter(|s| !s.hidden).count()
}

/// Collects footnotes presentation-wide, deduplicated by first-seen
/// content: a footnote repeated on two slides keeps one entry (and thus
/// one ordinal at render time).
pub fn collect_footnotes(doc: &PresentationDocument) -> Vec<Footnote> {
    let mut seen = Vec::new();
    for slide in &doc.slides {
        for footnote in &slide.footnotes {
            if !seen
                .iter()
                .any(|f: &Footnote| f.content == footnote.content)
            {
                seen.push(footnote.clone());
            }
        }
    }
    seen
}
