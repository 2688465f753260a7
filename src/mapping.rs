// src/mapping.rs
//! Direct mapping of known aliases onto canonical names.
//!
//! Runs before clustering with a stricter threshold than the clusterer, so
//! recurring problem spellings land on a fixed name without dragging
//! unrelated small clusters together.

use crate::clean::is_unknown;
use crate::rulebook::SynonymGroup;
use crate::similarity;
use tracing::debug;

/// Default confidence a value must exceed to be mapped onto an alias.
pub const DEFAULT_MAPPING_THRESHOLD: f64 = 0.9;

/// Returns the canonical name `value` maps to, if any.
///
/// Canonical names are fixed points. Otherwise groups are tried in table
/// order; the first group with an alias whose ratio to `value` exceeds
/// `threshold` wins.
#[must_use]
pub fn map_value<'a>(value: &str, table: &'a [SynonymGroup], threshold: f64) -> Option<&'a str> {
    if is_unknown(value) {
        return None;
    }
    if let Some(group) = table.iter().find(|group| group.canonical == value) {
        return Some(group.canonical.as_str());
    }
    table
        .iter()
        .find(|group| {
            group
                .aliases
                .iter()
                .any(|alias| similarity::exceeds(value, alias, threshold))
        })
        .map(|group| group.canonical.as_str())
}

/// Applies the synonym table to every value independently.
#[must_use]
pub fn apply_known_mappings(values: &[String], table: &[SynonymGroup], threshold: f64) -> Vec<String> {
    if table.is_empty() {
        return values.to_vec();
    }

    values
        .iter()
        .map(|value| match map_value(value, table, threshold) {
            Some(canonical) => {
                if canonical != value {
                    debug!(from = %value, to = %canonical, "direct mapping");
                }
                canonical.to_string()
            }
            None => value.clone(),
        })
        .collect()
}
