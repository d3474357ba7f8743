//! Column flow engine.
//!
//! Two modes: auto-detect (the `default` layout groups elements by their
//! `columnIndex`) and explicit (the `N-columns` layouts fix a visual
//! column count and ratio). Elements are never dropped: indexes past the
//! visual count merge into the last column, and explicit layouts with no
//! column-tagged content keep empty placeholder columns so the geometry
//! survives later edits.
//!
//! The width expression helpers live here so the footnote geometry engine
//! can reuse the exact same formula; any divergence desyncs the footnote
//! block from the column grid above it.

use deckmd_core::Config;
use deckmd_core::model::SlideElement;

/// Ratio split for two-column layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnRatio {
    /// All columns share equally.
    #[default]
    Equal,
    /// 1:2 split.
    NarrowWide,
    /// 2:1 split.
    WideNarrow,
}

impl ColumnRatio {
    /// CSS `grid-template-columns` value for this ratio.
    pub fn grid_template(self, count: usize) -> String {
        match self {
            ColumnRatio::Equal => format!("repeat({count}, 1fr)"),
            ColumnRatio::NarrowWide => "1fr 2fr".to_string(),
            ColumnRatio::WideNarrow => "2fr 1fr".to_string(),
        }
    }
}

/// A slide's body content distributed over visual columns.
#[derive(Debug)]
pub struct ColumnPlan<'a> {
    /// One bucket per visual column, in order. Empty buckets render as
    /// placeholder columns.
    pub columns: Vec<Vec<&'a SlideElement>>,
    /// Ratio split.
    pub ratio: ColumnRatio,
}

impl ColumnPlan<'_> {
    /// Number of visual columns.
    pub fn count(&self) -> usize {
        self.columns.len()
    }
}

/// Auto-detect mode (the `default` layout): column count is
/// `min(max(columnIndex) + 1, 3)`; untagged content lands in the first
/// column; with no tagged element at all, everything goes to one column.
pub fn auto_detect<'a>(elements: &[&'a SlideElement]) -> ColumnPlan<'a> {
    let max_index = elements.iter().filter_map(|e| e.column_index).max();
    let count = max_index.map_or(1, |max| (max + 1).min(3));
    distribute(elements, count, ColumnRatio::Equal)
}

/// Explicit mode: the layout fixes the visual count and ratio.
pub fn explicit<'a>(
    elements: &[&'a SlideElement],
    visual_count: usize,
    ratio: ColumnRatio,
) -> ColumnPlan<'a> {
    distribute(elements, visual_count.max(1), ratio)
}

/// Buckets elements into `count` columns. Overflow merge rule: any index
/// at or past `count - 1` goes to the last column, never dropped.
fn distribute<'a>(
    elements: &[&'a SlideElement],
    count: usize,
    ratio: ColumnRatio,
) -> ColumnPlan<'a> {
    let mut columns: Vec<Vec<&SlideElement>> = vec![Vec::new(); count];
    for element in elements {
        let index = element.column_index.unwrap_or(0).min(count - 1);
        columns[index].push(element);
    }
    ColumnPlan { columns, ratio }
}

/// Total gap in slide units between columns: one 3-unit gap for two
/// columns, two gaps totalling 5 units for three.
pub fn gap_units(count: usize) -> f64 {
    match count {
        0 | 1 => 0.0,
        2 => 3.0,
        _ => 5.0,
    }
}

/// Formats a unit multiple without a trailing `.0` for whole numbers.
fn fmt_units(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// CSS width expression for the first visual column, in slide-unit terms:
/// content width (100% minus both margins) minus the column gap, divided
/// per the ratio. With default 5-unit margins and two equal columns this
/// is `calc((100% - 10 * var(--slide-unit) - 3 * var(--slide-unit)) / 2)`.
pub fn column_width_expr(config: &Config, count: usize, ratio: ColumnRatio) -> String {
    let margins = fmt_units(config.content_left() + config.content_right());
    if count <= 1 {
        return format!("calc(100% - {margins} * var(--slide-unit))");
    }
    let gap = fmt_units(gap_units(count));
    let available = format!("100% - {margins} * var(--slide-unit) - {gap} * var(--slide-unit)");
    match ratio {
        ColumnRatio::Equal => format!("calc(({available}) / {count})"),
        ColumnRatio::NarrowWide => format!("calc(({available}) * 1 / 3)"),
        ColumnRatio::WideNarrow => format!("calc(({available}) * 2 / 3)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckmd_core::model::{ElementKind, SlideElement};

    fn element(column_index: Option<usize>) -> SlideElement {
        SlideElement {
            column_index,
            ..SlideElement::new(ElementKind::Paragraph, "x")
        }
    }

    #[test]
    fn auto_detect_counts_from_max_index() {
        let elements = vec![element(Some(0)), element(Some(2)), element(None)];
        let refs: Vec<&SlideElement> = elements.iter().collect();
        let plan = auto_detect(&refs);
        assert_eq!(plan.count(), 3);
        assert_eq!(plan.columns[0].len(), 2); // tagged 0 + untagged
        assert_eq!(plan.columns[2].len(), 1);
    }

    #[test]
    fn auto_detect_without_tags_is_single_column() {
        let elements = vec![element(None), element(None)];
        let refs: Vec<&SlideElement> = elements.iter().collect();
        let plan = auto_detect(&refs);
        assert_eq!(plan.count(), 1);
        assert_eq!(plan.columns[0].len(), 2);
    }

    #[test]
    fn auto_detect_caps_at_three() {
        let elements = vec![element(Some(7))];
        let refs: Vec<&SlideElement> = elements.iter().collect();
        let plan = auto_detect(&refs);
        assert_eq!(plan.count(), 3);
        assert_eq!(plan.columns[2].len(), 1);
    }

    #[test]
    fn explicit_overflow_merges_into_last_column() {
        let elements = vec![
            element(Some(0)),
            element(Some(1)),
            element(Some(2)),
            element(Some(5)),
        ];
        let refs: Vec<&SlideElement> = elements.iter().collect();
        let plan = explicit(&refs, 2, ColumnRatio::Equal);
        assert_eq!(plan.count(), 2);
        assert_eq!(plan.columns[0].len(), 1);
        // Indexes 1, 2 and 5 all merge into the last visual column.
        assert_eq!(plan.columns[1].len(), 3);
    }

    #[test]
    fn explicit_without_tags_fills_first_and_keeps_placeholders() {
        let elements = vec![element(None), element(None)];
        let refs: Vec<&SlideElement> = elements.iter().collect();
        let plan = explicit(&refs, 3, ColumnRatio::Equal);
        assert_eq!(plan.count(), 3);
        assert_eq!(plan.columns[0].len(), 2);
        assert!(plan.columns[1].is_empty());
        assert!(plan.columns[2].is_empty());
    }

    #[test]
    fn two_column_width_formula_matches_contract() {
        let config = Config::default();
        assert_eq!(
            column_width_expr(&config, 2, ColumnRatio::Equal),
            "calc((100% - 10 * var(--slide-unit) - 3 * var(--slide-unit)) / 2)"
        );
    }

    #[test]
    fn three_column_width_uses_five_unit_gap() {
        let config = Config::default();
        assert_eq!(
            column_width_expr(&config, 3, ColumnRatio::Equal),
            "calc((100% - 10 * var(--slide-unit) - 5 * var(--slide-unit)) / 3)"
        );
    }

    #[test]
    fn ratio_widths_scale_the_first_column() {
        let config = Config::default();
        assert_eq!(
            column_width_expr(&config, 2, ColumnRatio::NarrowWide),
            "calc((100% - 10 * var(--slide-unit) - 3 * var(--slide-unit)) * 1 / 3)"
        );
        assert_eq!(
            column_width_expr(&config, 2, ColumnRatio::WideNarrow),
            "calc((100% - 10 * var(--slide-unit) - 3 * var(--slide-unit)) * 2 / 3)"
        );
    }

    #[test]
    fn custom_margins_feed_the_formula() {
        let config = Config {
            content_left: Some(4.0),
            content_right: Some(2.0),
            ..Default::default()
        };
        assert_eq!(
            column_width_expr(&config, 2, ColumnRatio::Equal),
            "calc((100% - 6 * var(--slide-unit) - 3 * var(--slide-unit)) / 2)"
        );
    }

    #[test]
    fn grid_templates() {
        assert_eq!(ColumnRatio::Equal.grid_template(3), "repeat(3, 1fr)");
        assert_eq!(ColumnRatio::NarrowWide.grid_template(2), "1fr 2fr");
        assert_eq!(ColumnRatio::WideNarrow.grid_template(2), "2fr 1fr");
    }
}
