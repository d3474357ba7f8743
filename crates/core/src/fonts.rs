//! Font-weight fallback resolution.
//!
//! The host supplies a table of the weights it actually has cached per
//! font family. A requested weight that is missing resolves to a usable
//! substitute instead of failing: a heavier face reads acceptably, so the
//! smallest available weight at or above the request wins, and only when
//! nothing heavier exists does the numerically nearest weight apply.

use std::collections::HashMap;

/// Cached weights per font family. Absence of a family means no
/// validation is performed for it.
#[derive(Debug, Clone, Default)]
pub struct FontWeightTable {
    weights: HashMap<String, Vec<u16>>,
}

impl FontWeightTable {
    /// Creates an empty table (no validation for any family).
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the cached weights for a family.
    pub fn insert(&mut self, family: impl Into<String>, mut weights: Vec<u16>) {
        weights.sort_unstable();
        weights.dedup();
        self.weights.insert(family.into(), weights);
    }

    /// Available weights for a family, if the family is known.
    pub fn available(&self, family: &str) -> Option<&[u16]> {
        self.weights.get(family).map(Vec::as_slice)
    }
}

/// Resolves a requested weight against the cached weights for `family`.
///
/// Returns `None` when the family is unknown or has no cached weights,
/// meaning no weight constraint should be emitted. Never fails.
pub fn resolve_weight(table: &FontWeightTable, family: &str, requested: u16) -> Option<u16> {
    let available = table.available(family)?;
    if available.is_empty() {
        return None;
    }
    if available.contains(&requested) {
        return Some(requested);
    }

    let resolved = available
        .iter()
        .copied()
        .filter(|w| *w >= requested)
        .min()
        .unwrap_or_else(|| {
            // Nothing heavier: nearest by absolute distance.
            available
                .iter()
                .copied()
                .min_by_key(|w| requested.abs_diff(*w))
                .unwrap_or(requested)
        });

    if resolved != requested {
        log::debug!("font weight {requested} unavailable for '{family}', using {resolved}");
    }
    Some(resolved)
}
