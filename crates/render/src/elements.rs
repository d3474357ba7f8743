//! Per-element HTML rendering.
//!
//! Every element kind renders a best-effort structure: malformed lists
//! and tables emit whatever rows and items can be recovered rather than
//! nothing, per the no-blackout contract of a live preview surface.

use deckmd_core::inline::render_inline;
use deckmd_core::model::{ElementKind, SlideElement};

use crate::context::RenderContext;
use crate::layout::images;

/// Renders one slide element to HTML.
pub fn render_element(ctx: &RenderContext<'_>, element: &SlideElement) -> String {
    let opts = ctx.inline_options();
    match element.kind {
        ElementKind::Heading(level) => {
            let level = level.clamp(1, 6);
            let gradient = if crate::css::heading_uses_gradient(ctx, level) {
                " data-gradient"
            } else {
                ""
            };
            format!(
                "<h{level}{gradient}>{}</h{level}>",
                render_inline(&element.content, &opts)
            )
        }
        ElementKind::Kicker => format!(
            r#"<p class="kicker">{}</p>"#,
            render_inline(&element.content, &opts)
        ),
        ElementKind::Paragraph => {
            format!("<p>{}</p>", render_inline(&element.content, &opts))
        }
        ElementKind::Blockquote => render_blockquote(ctx, &element.content),
        ElementKind::List => render_list(ctx, &element.content),
        ElementKind::Code => render_code(&element.content),
        ElementKind::Table => render_table(ctx, &element.content),
        ElementKind::Math => format!(
            r#"<span class="math">{}</span>"#,
            html_escape::encode_text(&element.content)
        ),
        ElementKind::Image => match &element.image {
            Some(data) => images::render_inline_image(ctx, data),
            None => String::new(),
        },
    }
}

fn render_blockquote(ctx: &RenderContext<'_>, content: &str) -> String {
    let opts = ctx.inline_options();
    let text: Vec<&str> = content
        .lines()
        .map(|line| {
            line.trim_start()
                .strip_prefix('>')
                .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
                .unwrap_or(line)
        })
        .collect();
    format!(
        "<blockquote><p>{}</p></blockquote>",
        render_inline(&text.join("\n"), &opts)
    )
}

fn render_code(content: &str) -> String {
    // The model usually carries the bare code body, but a fenced block
    // that survived parsing is recovered here: strip the fences and pick
    // up the language tag.
    let mut lines: Vec<&str> = content.lines().collect();
    let mut lang: Option<&str> = None;
    if !lines.is_empty() && lines[0].trim_start().starts_with("```") {
        let first = lines.remove(0);
        let tag = first.trim_start().trim_start_matches('`').trim();
        if !tag.is_empty() {
            lang = Some(tag);
        }
        if lines
            .last()
            .is_some_and(|l| l.trim_start().starts_with("```"))
        {
            lines.pop();
        }
    }

    let mut out = String::from("<pre>");
    match lang {
        Some(lang) => out.push_str(&format!(
            r#"<code class="language-{}">"#,
            html_escape::encode_double_quoted_attribute(lang)
        )),
        None => out.push_str("<code>"),
    }
    out.push_str(&html_escape::encode_text(&lines.join("\n")));
    out.push_str("</code></pre>");
    out
}

/// Indentation depth of a list line: each tab counts one level, spaces
/// count in pairs. Mixed tab/space input resolves left to right, which
/// follows the rule as written even where the intent is ambiguous.
fn list_depth(line: &str) -> (usize, &str) {
    let mut depth = 0usize;
    let mut spaces = 0usize;
    let mut offset = 0usize;
    for c in line.chars() {
        match c {
            '\t' => {
                depth += 1;
                spaces = 0;
            }
            ' ' => {
                spaces += 1;
                if spaces == 2 {
                    depth += 1;
                    spaces = 0;
                }
            }
            _ => break,
        }
        offset += c.len_utf8();
    }
    (depth, &line[offset..])
}

/// Splits an item line into (ordered, text). Lines without a recognized
/// marker still become items so malformed lists keep their content.
fn list_item(line: &str) -> (bool, &str) {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return (false, rest);
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        for sep in [". ", ") "] {
            if let Some(rest) = rest.strip_prefix(sep) {
                return (true, rest);
            }
        }
    }
    (false, line)
}

fn render_list(ctx: &RenderContext<'_>, content: &str) -> String {
    let opts = ctx.inline_options();
    let mut out = String::new();
    // Stack of open list tags, one per nesting level.
    let mut stack: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (depth, rest) = list_depth(line);
        let (ordered, text) = list_item(rest.trim_end());
        let tag = if ordered { "ol" } else { "ul" };

        while stack.len() > depth + 1 {
            let closed = stack.pop().unwrap_or("ul");
            out.push_str(&format!("</{closed}>"));
        }
        while stack.len() < depth + 1 {
            stack.push(tag);
            out.push_str(&format!("<{tag}>"));
        }

        out.push_str(&format!("<li>{}</li>", render_inline(text, &opts)));
    }

    while let Some(closed) = stack.pop() {
        out.push_str(&format!("</{closed}>"));
    }
    out
}

fn render_table(ctx: &RenderContext<'_>, content: &str) -> String {
    let opts = ctx.inline_options();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Separator rows (|---|:---:|) only carry alignment; skipped.
        if trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
        {
            continue;
        }
        let cells: Vec<String> = trimmed
            .trim_matches('|')
            .split('|')
            .map(|cell| render_inline(cell.trim(), &opts))
            .collect();
        rows.push(cells);
    }

    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::from("<table><thead><tr>");
    for cell in &rows[0] {
        out.push_str(&format!("<th>{cell}</th>"));
    }
    out.push_str("</tr></thead>");
    if rows.len() > 1 {
        out.push_str("<tbody>");
        for row in &rows[1..] {
            out.push_str("<tr>");
            for cell in row {
                out.push_str(&format!("<td>{cell}</td>"));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody>");
    }
    out.push_str("</table>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckmd_core::{Config, PresentationDocument};

    fn with_ctx(f: impl FnOnce(&RenderContext<'_>)) {
        let config = Config::default();
        let doc = PresentationDocument::default();
        let ctx = RenderContext::with_defaults(&config, &doc);
        f(&ctx);
    }

    #[test]
    fn heading_levels_clamped() {
        with_ctx(|ctx| {
            let h = render_element(ctx, &SlideElement::new(ElementKind::Heading(2), "Title"));
            assert_eq!(h, "<h2>Title</h2>");
            let h = render_element(ctx, &SlideElement::new(ElementKind::Heading(9), "Deep"));
            assert_eq!(h, "<h6>Deep</h6>");
        });
    }

    #[test]
    fn gradient_heading_carries_marker_attribute() {
        let config = Config {
            light: deckmd_core::PaletteOverride {
                heading_colors: Some(vec![deckmd_core::ColorValue::Gradient(vec![
                    "#ff0000".into(),
                    "#0000ff".into(),
                ])]),
                ..Default::default()
            },
            ..Default::default()
        };
        let doc = PresentationDocument::default();
        let ctx = RenderContext::with_defaults(&config, &doc);
        let html = render_element(&ctx, &SlideElement::new(ElementKind::Heading(1), "Big"));
        assert_eq!(html, "<h1 data-gradient>Big</h1>");
        // Solid-colored levels carry no marker.
        let html = render_element(&ctx, &SlideElement::new(ElementKind::Heading(2), "Plain"));
        assert_eq!(html, "<h2>Plain</h2>");
    }

    #[test]
    fn blockquote_strips_markers() {
        with_ctx(|ctx| {
            let html = render_element(
                ctx,
                &SlideElement::new(ElementKind::Blockquote, "> quoted\n> **line**"),
            );
            assert_eq!(
                html,
                "<blockquote><p>quoted<br/><strong>line</strong></p></blockquote>"
            );
        });
    }

    #[test]
    fn flat_list_renders_items() {
        with_ctx(|ctx| {
            let html = render_element(ctx, &SlideElement::new(ElementKind::List, "- a\n- b"));
            assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
        });
    }

    #[test]
    fn ordered_list_detected() {
        with_ctx(|ctx| {
            let html = render_element(ctx, &SlideElement::new(ElementKind::List, "1. a\n2. b"));
            assert_eq!(html, "<ol><li>a</li><li>b</li></ol>");
        });
    }

    #[test]
    fn nested_list_by_tabs_and_spaces() {
        with_ctx(|ctx| {
            let html = render_element(
                ctx,
                &SlideElement::new(ElementKind::List, "- a\n\t- b\n  - c\n- d"),
            );
            assert_eq!(
                html,
                "<ul><li>a</li><ul><li>b</li><li>c</li></ul><li>d</li></ul>"
            );
        });
    }

    #[test]
    fn malformed_list_line_keeps_content() {
        with_ctx(|ctx| {
            let html = render_element(
                ctx,
                &SlideElement::new(ElementKind::List, "- ok\nno marker here"),
            );
            assert!(html.contains("<li>no marker here</li>"));
        });
    }

    #[test]
    fn table_with_separator_row() {
        with_ctx(|ctx| {
            let html = render_element(
                ctx,
                &SlideElement::new(
                    ElementKind::Table,
                    "| Name | Age |\n| --- | --- |\n| Alice | 30 |",
                ),
            );
            assert!(html.contains("<thead><tr><th>Name</th><th>Age</th></tr></thead>"));
            assert!(html.contains("<tbody><tr><td>Alice</td><td>30</td></tr></tbody>"));
        });
    }

    #[test]
    fn ragged_table_rows_still_render() {
        with_ctx(|ctx| {
            let html = render_element(
                ctx,
                &SlideElement::new(ElementKind::Table, "| A | B |\n| only-one |"),
            );
            assert!(html.contains("<td>only-one</td>"));
        });
    }

    #[test]
    fn code_block_escapes_and_recovers_fences() {
        with_ctx(|ctx| {
            let html = render_element(
                ctx,
                &SlideElement::new(ElementKind::Code, "```rust\nlet x = 1 < 2;\n```"),
            );
            assert_eq!(
                html,
                "<pre><code class=\"language-rust\">let x = 1 &lt; 2;</code></pre>"
            );

            let bare = render_element(ctx, &SlideElement::new(ElementKind::Code, "a < b"));
            assert_eq!(bare, "<pre><code>a &lt; b</code></pre>");
        });
    }

    #[test]
    fn math_is_escaped_verbatim() {
        with_ctx(|ctx| {
            let html = render_element(ctx, &SlideElement::new(ElementKind::Math, "a^2 < b"));
            assert_eq!(html, r#"<span class="math">a^2 &lt; b</span>"#);
        });
    }

    #[test]
    fn image_without_data_renders_nothing() {
        with_ctx(|ctx| {
            let html = render_element(ctx, &SlideElement::new(ElementKind::Image, ""));
            assert!(html.is_empty());
        });
    }
}
