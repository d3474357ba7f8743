//! Inline markdown renderer.
//!
//! A deterministic, single-pass ordered pipeline over raw element text.
//! The order of the substitution rules matters because the patterns
//! overlap: bold must run before italic (`**` before `*`), footnote
//! references before links, and the escaped-newline form must be swapped
//! out through a placeholder before the unescaped newline rule runs.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Options for one inline rendering pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineOptions<'a> {
    /// Render `[text](url)` as external-opening anchors; when false the
    /// link is stripped to its text.
    pub links_enabled: bool,
    /// Presentation-wide footnote ordinals (id → 1-based number). When
    /// absent, references display their raw id.
    pub footnote_ordinals: Option<&'a HashMap<String, usize>>,
}

static FOOTNOTE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\^([^\]\s]+)\](:?)").expect("footnote ref pattern"));
static BOLD_STARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static BOLD_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("bold underscore pattern"));
static ITALIC_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("italic pattern"));
static ITALIC_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([^_\n]+)_").expect("italic underscore pattern"));
static HIGHLIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==([^=\n]+)==").expect("highlight pattern"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern"));
static WIKI_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").expect("wiki link pattern"));
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("markdown link pattern"));

/// Placeholder that keeps the escaped `\n` form out of reach of the
/// unescaped-newline rule. Swapped back after line breaks are emitted.
const ESCAPED_NEWLINE_MARK: &str = "DECKMDESCAPEDNLMARK";

/// Renders inline markdown to HTML.
///
/// The input is raw author text; entities are escaped first, so the
/// output is safe to embed directly.
pub fn render_inline(text: &str, opts: &InlineOptions<'_>) -> String {
    // 1. Entities.
    let mut out = html_escape::encode_text(text).into_owned();

    // 2. Footnote references. The regex crate has no lookahead, so the
    // optional trailing `:` is captured and definition-looking matches
    // are left untouched.
    out = FOOTNOTE_REF
        .replace_all(&out, |caps: &Captures<'_>| {
            if &caps[2] == ":" {
                return caps[0].to_string();
            }
            let id = &caps[1];
            let label = opts
                .footnote_ordinals
                .and_then(|ordinals| ordinals.get(id))
                .map(|n| n.to_string())
                .unwrap_or_else(|| id.to_string());
            format!(r#"<sup class="footnote-ref" data-footnote="{id}">{label}</sup>"#)
        })
        .into_owned();

    // 3. Bold, before italic so `**` is consumed first.
    out = BOLD_STARS.replace_all(&out, "<strong>$1</strong>").into_owned();
    out = BOLD_UNDERSCORES
        .replace_all(&out, "<strong>$1</strong>")
        .into_owned();

    // 4. Italic.
    out = ITALIC_STAR.replace_all(&out, "<em>$1</em>").into_owned();
    out = ITALIC_UNDERSCORE.replace_all(&out, "<em>$1</em>").into_owned();

    // 5. Highlight.
    out = HIGHLIGHT.replace_all(&out, "<mark>$1</mark>").into_owned();

    // 6. Inline code.
    out = INLINE_CODE.replace_all(&out, "<code>$1</code>").into_owned();

    // 7. Links. Wiki-links always collapse to display text; markdown
    // links become anchors only when links are enabled.
    out = WIKI_LINK
        .replace_all(&out, |caps: &Captures<'_>| {
            match caps.get(2) {
                Some(display) => display.as_str().to_string(),
                None => wiki_link_label(&caps[1]).to_string(),
            }
        })
        .into_owned();
    out = if opts.links_enabled {
        MARKDOWN_LINK
            .replace_all(&out, |caps: &Captures<'_>| {
                format!(
                    r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                    html_escape::encode_double_quoted_attribute(&caps[2]),
                    &caps[1]
                )
            })
            .into_owned()
    } else {
        MARKDOWN_LINK.replace_all(&out, "$1").into_owned()
    };

    // 8. Newlines, with the escaped form parked behind a placeholder.
    out = out.replace("\\\\n", ESCAPED_NEWLINE_MARK);
    out = out.replace("\\n", "<br/>");
    out = out.replace('\n', "<br/>");
    out.replace(ESCAPED_NEWLINE_MARK, "\\n")
}

/// Display label for a bare wiki-link target: the last path segment with
/// any `#heading` suffix removed.
fn wiki_link_label(target: &str) -> &str {
    let last = target.rsplit('/').next().unwrap_or(target);
    match last.split_once('#') {
        Some((page, _)) if !page.is_empty() => page,
        _ => last,
    }
}
