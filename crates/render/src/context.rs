//! Immutable render context.
//!
//! One context value is constructed per render call and passed down by
//! reference. There are no setters and no interior mutability: a host
//! embedding the engine across threads snapshots a fresh context per
//! logical render (the engine enforces no locking of its own).

use std::collections::HashMap;

use deckmd_core::diag::{DiagnosticSink, LogSink};
use deckmd_core::fonts::FontWeightTable;
use deckmd_core::inline::InlineOptions;
use deckmd_core::model::{ColorScheme, Mode, ResolvedMode, Slide};
use deckmd_core::theme::{DEFAULT_THEME, Theme};
use deckmd_core::{Config, collect_footnotes, PresentationDocument};

/// The rendering surface a call targets. The HTML differs per target
/// (scaling wrapper, navigation chrome, export toggles) but the slide
/// markup itself is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// Inline thumbnail: one slide, scaled down.
    Thumbnail,
    /// Live preview surface.
    #[default]
    Preview,
    /// Full-screen presentation surface.
    Presentation,
    /// Static export; hidden slides stay in the DOM behind a marker
    /// class and the resolved scheme is embedded as a toggle default.
    Export,
}

/// Resolves author-written image paths to displayable URLs. The engine
/// never touches a filesystem; the host decides what a path means.
pub trait ImageResolver {
    /// Resolves `path`; `is_wiki_link` marks `![[...]]` sources.
    fn resolve(&self, path: &str, is_wiki_link: bool) -> String;
}

impl<F> ImageResolver for F
where
    F: Fn(&str, bool) -> String,
{
    fn resolve(&self, path: &str, is_wiki_link: bool) -> String {
        self(path, is_wiki_link)
    }
}

/// Identity resolver: paths pass through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughResolver;

impl ImageResolver for PassthroughResolver {
    fn resolve(&self, path: &str, _is_wiki_link: bool) -> String {
        path.to_string()
    }
}

/// Externally populated cache of pre-converted SVG markup, keyed by the
/// source path of a pseudo-scheme image. The engine only reads it; a miss
/// renders the loading placeholder.
pub type SvgCache = HashMap<String, String>;

/// Everything a render call needs, snapshotted once.
pub struct RenderContext<'a> {
    /// Frontmatter configuration.
    pub config: &'a Config,
    /// Active theme.
    pub theme: &'a Theme,
    /// Caller-supplied scheme that `system` mode resolves against.
    pub scheme: ColorScheme,
    /// Target surface.
    pub target: RenderTarget,
    /// Image path resolver.
    pub resolver: &'a dyn ImageResolver,
    /// Cached font weights per family.
    pub fonts: &'a FontWeightTable,
    /// Optional pre-converted SVG cache for pseudo-scheme sources.
    pub svg_cache: Option<&'a SvgCache>,
    /// Diagnostics sink.
    pub sink: &'a dyn DiagnosticSink,
    /// Presentation-wide footnote ordinals (id → 1-based number),
    /// precomputed from the document so references number consistently
    /// across slides.
    pub footnote_ordinals: HashMap<String, usize>,
}

static DEFAULT_RESOLVER: PassthroughResolver = PassthroughResolver;
static DEFAULT_FONTS: once_cell::sync::Lazy<FontWeightTable> =
    once_cell::sync::Lazy::new(FontWeightTable::new);
static DEFAULT_SINK: LogSink = LogSink;

impl<'a> RenderContext<'a> {
    /// Creates a context with passthrough resolver, empty font table,
    /// no SVG cache, and the log sink. Footnote ordinals are collected
    /// from the document up front.
    pub fn new(config: &'a Config, theme: &'a Theme, doc: &PresentationDocument) -> Self {
        let mut ordinals = HashMap::new();
        for (i, footnote) in collect_footnotes(doc).iter().enumerate() {
            ordinals.entry(footnote.id.clone()).or_insert(i + 1);
        }
        Self {
            config,
            theme,
            scheme: ColorScheme::Light,
            target: RenderTarget::Preview,
            resolver: &DEFAULT_RESOLVER,
            fonts: &DEFAULT_FONTS,
            svg_cache: None,
            sink: &DEFAULT_SINK,
            footnote_ordinals: ordinals,
        }
    }

    /// Creates a context against the built-in default theme.
    pub fn with_defaults(config: &'a Config, doc: &PresentationDocument) -> Self {
        Self::new(config, &DEFAULT_THEME, doc)
    }

    /// Sets the render target.
    pub fn target(mut self, target: RenderTarget) -> Self {
        self.target = target;
        self
    }

    /// Sets the color scheme that `system` mode resolves against.
    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the image resolver.
    pub fn resolver(mut self, resolver: &'a dyn ImageResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the font-weight table.
    pub fn fonts(mut self, fonts: &'a FontWeightTable) -> Self {
        self.fonts = fonts;
        self
    }

    /// Sets the SVG cache.
    pub fn svg_cache(mut self, cache: &'a SvgCache) -> Self {
        self.svg_cache = Some(cache);
        self
    }

    /// Sets the diagnostics sink.
    pub fn sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    /// Resolved mode for a slide: the per-slide override wins over the
    /// presentation-wide default; `system` resolves against the caller
    /// scheme.
    pub fn mode_for(&self, slide: &Slide) -> ResolvedMode {
        slide
            .metadata
            .mode
            .or(self.config.mode)
            .unwrap_or(Mode::Light)
            .resolve(self.scheme)
    }

    /// Inline rendering options derived from this context.
    pub fn inline_options(&self) -> InlineOptions<'_> {
        InlineOptions {
            links_enabled: self.config.enable_links,
            footnote_ordinals: Some(&self.footnote_ordinals),
        }
    }
}
