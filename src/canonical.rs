// src/canonical.rs
//! Canonical-label selection for a cluster.

use crate::clean::{is_unknown, UNKNOWN};
use crate::cluster::{Cluster, FrequencyTable};
use crate::rulebook::CategoryProfile;

/// Picks the member that represents `cluster`.
///
/// Highest frequency wins; equal frequencies go to the alphabetically
/// earliest value so that reports are reproducible across runs.
#[must_use]
pub fn select_canonical<'a>(cluster: &'a Cluster, table: &FrequencyTable) -> Option<&'a str> {
    cluster
        .members
        .iter()
        .max_by(|a, b| {
            table
                .count(a)
                .cmp(&table.count(b))
                .then_with(|| b.cmp(a))
        })
        .map(String::as_str)
}

/// Formats a cleaned value for display: each whitespace-delimited token is
/// capitalised, except the profile's acronyms, which are upper-cased.
#[must_use]
pub fn display_label(value: &str, profile: Option<&CategoryProfile>) -> String {
    if is_unknown(value) {
        return UNKNOWN.to_string();
    }

    value
        .split_whitespace()
        .map(|token| {
            if profile.is_some_and(|p| p.is_acronym(&token.to_lowercase())) {
                token.to_uppercase()
            } else {
                capitalize(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulebook::Rulebook;

    fn cluster_of(members: &[&str]) -> Cluster {
        Cluster {
            members: members.iter().map(|m| (*m).to_string()).collect(),
            occurrences: 0,
        }
    }

    #[test]
    fn most_frequent_member_wins() {
        let table = FrequencyTable::from_values(&["farnham", "fareham", "fareham"]);
        let cluster = cluster_of(&["farnham", "fareham"]);
        assert_eq!(select_canonical(&cluster, &table), Some("fareham"));
    }

    #[test]
    fn ties_break_alphabetically() {
        let table = FrequencyTable::from_values(&["zeta college", "beta college"]);
        let cluster = cluster_of(&["zeta college", "beta college"]);
        assert_eq!(select_canonical(&cluster, &table), Some("beta college"));
    }

    #[test]
    fn empty_cluster_has_no_canonical() {
        let table = FrequencyTable::default();
        assert_eq!(select_canonical(&cluster_of(&[]), &table), None);
    }

    #[test]
    fn display_is_title_case() {
        assert_eq!(display_label("fareham college", None), "Fareham College");
        assert_eq!(display_label("Unknown", None), "Unknown");
    }

    #[test]
    fn acronyms_stay_upper_case() {
        let book = Rulebook::builtin();
        let college = book.profile(Some("college"));
        assert_eq!(display_label("bmet college", college), "BMET College");
        assert_eq!(display_label("bmet college", None), "Bmet College");
    }
}
