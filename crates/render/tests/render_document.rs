//! End-to-end renders over whole documents.

use deckmd_core::config::{DynamicBackground, PaletteOverride};
use deckmd_core::model::{
    ColorScheme, ElementKind, Footnote, ImageData, PresentationDocument, Slide, SlideElement,
    SlideMetadata,
};
use deckmd_core::{CollectSink, Config, RenderEvent};
use deckmd_render::{RenderContext, RenderTarget, SvgCache, render_document, render_slide};

fn slide(layout: &str, elements: Vec<SlideElement>) -> Slide {
    Slide {
        metadata: SlideMetadata {
            layout: layout.to_string(),
            ..Default::default()
        },
        elements,
        ..Default::default()
    }
}

fn deck(slides: Vec<Slide>, config: Config) -> PresentationDocument {
    let mut doc = PresentationDocument {
        config,
        slides,
    };
    for (i, s) in doc.slides.iter_mut().enumerate() {
        s.index = i;
    }
    doc
}

fn text(content: &str) -> SlideElement {
    SlideElement::new(ElementKind::Paragraph, content)
}

fn heading(level: u8, content: &str) -> SlideElement {
    SlideElement::new(ElementKind::Heading(level), content)
}

#[test]
fn mixed_deck_renders_every_slide_in_order() {
    let mut tagged = text("right column");
    tagged.column_index = Some(1);
    let doc = deck(
        vec![
            slide("cover", vec![heading(1, "Launch Review")]),
            slide("default", vec![heading(2, "Agenda"), text("left"), tagged]),
            slide("section", vec![heading(1, "Part Two")]),
            slide(
                "2-columns-1+2",
                vec![heading(2, "Split"), text("narrow"), text("more")],
            ),
        ],
        Config::default(),
    );
    let ctx = RenderContext::with_defaults(&doc.config, &doc);
    let html = render_document(&ctx, &doc);

    assert_eq!(html.matches("<section").count(), 4);
    // The base stylesheet mentions layout classes too; look only at the
    // slide markup after it.
    let body = &html[html.find("</style>").unwrap()..];
    let cover = body.find("layout-cover").unwrap();
    let agenda = body.find("layout-default").unwrap();
    let section = body.find("layout-section").unwrap();
    let split = body.find("layout-two-columns-narrow-wide").unwrap();
    assert!(cover < agenda && agenda < section && section < split);

    // The tagged element produced a two-column grid on the default slide.
    assert!(body.contains(r#"slot-columns columns-2"#));
    // The ratio layout carries its fraction template.
    assert!(body.contains("grid-template-columns:1fr 2fr"));
}

#[test]
fn section_restart_resets_background_progress() {
    let stops = vec!["#000000".to_string(), "#ffffff".to_string()];
    let config = Config {
        dynamic_background: DynamicBackground::Both,
        dynamic_background_restart: true,
        light: PaletteOverride {
            background_gradient: Some(stops),
            // The section layout gets an explicit background so the
            // divider itself is excluded from interpolation.
            section_background: Some("#333333".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    let doc = deck(
        vec![
            slide("default", vec![text("a")]),
            slide("default", vec![text("b")]),
            slide("section", vec![heading(1, "Next")]),
            slide("default", vec![text("c")]),
            slide("default", vec![text("d")]),
        ],
        config,
    );
    let ctx = RenderContext::with_defaults(&doc.config, &doc);

    // First segment spans the two slides before the divider.
    assert!(render_slide(&ctx, &doc, 0).contains("background-color:#000000"));
    assert!(render_slide(&ctx, &doc, 1).contains("background-color:#ffffff"));
    // The layout override wins over interpolation on the divider.
    assert!(!render_slide(&ctx, &doc, 2).contains("background-color:#"));
    // Progress restarts after the divider.
    assert!(render_slide(&ctx, &doc, 3).contains("background-color:#000000"));
    assert!(render_slide(&ctx, &doc, 4).contains("background-color:#ffffff"));
}

#[test]
fn footnote_reference_and_block_share_ordinals() {
    let mut first = slide("default", vec![heading(2, "Claim"), text("as shown[^src]")]);
    first.footnotes.push(Footnote {
        id: "src".into(),
        content: "the source".into(),
    });
    let mut notes = slide("footnotes", vec![heading(2, "Notes")]);
    notes.footnotes.push(Footnote {
        id: "src".into(),
        content: "the source".into(),
    });
    let doc = deck(vec![first, notes], Config::default());
    let ctx = RenderContext::with_defaults(&doc.config, &doc);

    let referencing = render_slide(&ctx, &doc, 0);
    assert!(referencing.contains(r#"<sup class="footnote-ref" data-footnote="src">1</sup>"#));
    // Suppressed on the ordinary slide by default.
    assert!(!referencing.contains("footnote-block"));

    let listing = render_slide(&ctx, &doc, 1);
    assert!(listing.contains(r#"<li value="1" id="fn-src">the source</li>"#));
}

#[test]
fn excalidraw_sources_resolve_through_the_cache() {
    let drawing = SlideElement::image(ImageData {
        src: "excalidraw://arch.excalidraw".into(),
        ..Default::default()
    });
    let pending = SlideElement::image(ImageData {
        src: "excalidraw://wip.excalidraw".into(),
        ..Default::default()
    });
    let doc = deck(
        vec![slide("full-image", vec![drawing, pending])],
        Config::default(),
    );

    let mut cache = SvgCache::new();
    cache.insert(
        "arch.excalidraw".to_string(),
        "<svg><rect width=\"9\"/></svg>".to_string(),
    );
    let sink = CollectSink::new();
    let ctx = RenderContext::with_defaults(&doc.config, &doc)
        .svg_cache(&cache)
        .sink(&sink);
    let html = render_document(&ctx, &doc);

    let sources: Vec<&str> = html
        .split("src=\"")
        .skip(1)
        .map(|rest| &rest[..rest.find('"').unwrap()])
        .collect();
    assert_eq!(sources.len(), 2);
    assert!(!deckmd_render::is_loading_placeholder(sources[0]));
    assert!(deckmd_render::is_loading_placeholder(sources[1]));

    let events = sink.take();
    assert!(events.iter().any(|e| matches!(
        e,
        RenderEvent::UnresolvedImage { src } if src == "excalidraw://wip.excalidraw"
    )));
}

#[test]
fn unknown_layout_degrades_to_default_with_report() {
    let doc = deck(
        vec![slide("spiral", vec![heading(1, "T"), text("body")])],
        Config::default(),
    );
    let sink = CollectSink::new();
    let ctx = RenderContext::with_defaults(&doc.config, &doc).sink(&sink);
    let html = render_slide(&ctx, &doc, 0);

    assert!(html.contains("layout-default"));
    assert!(html.contains("slot-header"));
    assert!(sink.take().iter().any(|e| matches!(
        e,
        RenderEvent::UnknownLayout { slide: 0, tag } if tag == "spiral"
    )));
}

#[test]
fn export_embeds_scheme_and_keeps_hidden_slides() {
    let mut hidden = slide("default", vec![text("draft")]);
    hidden.hidden = true;
    let doc = deck(
        vec![slide("cover", vec![heading(1, "T")]), hidden],
        Config {
            mode: Some(deckmd_core::Mode::System),
            ..Default::default()
        },
    );
    let ctx = RenderContext::with_defaults(&doc.config, &doc)
        .target(RenderTarget::Export)
        .scheme(ColorScheme::Dark);
    let html = render_document(&ctx, &doc);

    assert!(html.contains(r#"data-scheme="dark""#));
    // System mode resolved against the caller scheme.
    assert!(html.contains("slide dark layout-cover"));
    assert_eq!(html.matches("<section").count(), 2);
    assert!(html.contains("layout-default slide-hidden"));

    // The same deck in preview drops the hidden slide entirely.
    let ctx = RenderContext::with_defaults(&doc.config, &doc);
    let preview = render_document(&ctx, &doc);
    assert_eq!(preview.matches("<section").count(), 1);
}

#[test]
fn half_image_deck_places_margins_inside_the_content_panel() {
    let doc = deck(
        vec![slide(
            "half-image-horizontal",
            vec![
                heading(2, "Caption side"),
                text("explanation"),
                SlideElement::image(ImageData {
                    src: "diagram.png".into(),
                    ..Default::default()
                }),
            ],
        )],
        Config {
            footer: Some("**acme** internal".into()),
            ..Default::default()
        },
    );
    let ctx = RenderContext::with_defaults(&doc.config, &doc);
    let html = render_slide(&ctx, &doc, 0);

    assert!(html.contains("split-horizontal image-last"));
    let panel = html.find(r#"class="content-panel""#).unwrap();
    let footer = html.find(r#"class="slide-footer""#).unwrap();
    let end_of_split = html.rfind("</section>").unwrap();
    assert!(panel < footer && footer < end_of_split);
    assert!(html.contains("<strong>acme</strong> internal"));
}

#[test]
fn gradient_heading_text_is_wired_end_to_end() {
    let config = Config {
        light: PaletteOverride {
            heading_colors: Some(vec![deckmd_core::ColorValue::Gradient(vec![
                "#ff0000".into(),
                "#0000ff".into(),
            ])]),
            ..Default::default()
        },
        ..Default::default()
    };
    let doc = deck(
        vec![slide("default", vec![heading(1, "Big"), text("body")])],
        config,
    );
    let ctx = RenderContext::with_defaults(&doc.config, &doc);
    let html = render_document(&ctx, &doc);

    // The composed variable, the marked heading, and the stylesheet rule
    // that connects them must all be present.
    assert!(html.contains("--light-h1-gradient:linear-gradient(135deg,#ff0000,#0000ff);"));
    let markup = &html[html.find("</style>").unwrap()..];
    assert!(markup.contains("<h1 data-gradient>Big</h1>"), "{markup}");
    assert!(deckmd_render::BASE_STYLESHEET.contains("var(--light-h1-gradient)"));
}

#[test]
fn links_toggle_applies_document_wide() {
    let doc = deck(
        vec![slide(
            "default",
            vec![text("see [docs](https://example.com)")],
        )],
        Config {
            enable_links: false,
            ..Default::default()
        },
    );
    let ctx = RenderContext::with_defaults(&doc.config, &doc);
    let html = render_document(&ctx, &doc);
    assert!(!html.contains("<a href"));
    assert!(html.contains("see docs"));
}
