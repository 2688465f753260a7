// src/cluster/mod.rs
//! Similarity clustering over the distinct cleaned values of one batch.
//!
//! Values are first folded into a [`FrequencyTable`], so the pairwise work is
//! quadratic in the number of distinct spellings, not in the number of
//! documents. The [`UNKNOWN`](crate::clean::UNKNOWN) sentinel is never
//! clustered.
//!
//! Two strategies produce the partition:
//! - [`ClusterStrategy::Connected`]: connected components of the graph whose
//!   edges join values with `ratio > threshold`. Independent of input order,
//!   and raising the threshold can only split clusters.
//! - [`ClusterStrategy::Greedy`]: the frequency-ordered sweep used by the
//!   legacy dashboard reports. Each unassigned value opens a cluster and
//!   absorbs every still-unassigned value similar to *it*. Kept for report
//!   parity; a value claimed early cannot move to a closer cluster later.

pub mod union_find;

use crate::clean::is_unknown;
use crate::similarity;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use union_find::UnionFind;

/// Default similarity threshold for clustering.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Below this many distinct values the edge scan stays on one thread.
const PARALLEL_MIN_VALUES: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStrategy {
    #[default]
    Connected,
    Greedy,
}

impl ClusterStrategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Greedy => "greedy",
        }
    }
}

/// Occurrence counts of cleaned values, ordered most frequent first.
/// Equal counts keep first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl FrequencyTable {
    #[must_use]
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for value in values {
            let value = value.as_ref();
            match counts.get_mut(value) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(value.to_string(), 1);
                    first_seen.push(value.to_string());
                }
            }
        }

        // Stable sort keeps first-encounter order among equal counts.
        let mut order = first_seen;
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));

        Self { counts, order }
    }

    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Distinct values, most frequent first.
    #[must_use]
    pub fn ordered(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A set of distinct cleaned values judged similar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Distinct members, most frequent first.
    pub members: Vec<String>,
    /// Total occurrences of all members in the batch.
    pub occurrences: usize,
}

impl Cluster {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.members.iter().any(|m| m == value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Clusters a batch of cleaned values.
#[must_use]
pub fn cluster<S: AsRef<str>>(
    values: &[S],
    threshold: f64,
    strategy: ClusterStrategy,
) -> Vec<Cluster> {
    cluster_table(&FrequencyTable::from_values(values), threshold, strategy)
}

/// Clusters the distinct values of an existing frequency table.
///
/// Clusters are returned in the frequency order of their most frequent member.
#[must_use]
pub fn cluster_table(
    table: &FrequencyTable,
    threshold: f64,
    strategy: ClusterStrategy,
) -> Vec<Cluster> {
    let candidates: Vec<&str> = table
        .ordered()
        .iter()
        .map(String::as_str)
        .filter(|v| !is_unknown(v))
        .collect();

    let groups = match strategy {
        ClusterStrategy::Connected => connected_groups(&candidates, threshold),
        ClusterStrategy::Greedy => greedy_groups(&candidates, threshold),
    };

    groups
        .into_iter()
        .map(|indices| {
            let members: Vec<String> = indices.iter().map(|&i| candidates[i].to_string()).collect();
            let occurrences = members.iter().map(|m| table.count(m)).sum();
            Cluster {
                members,
                occurrences,
            }
        })
        .collect()
}

fn connected_groups(values: &[&str], threshold: f64) -> Vec<Vec<usize>> {
    let n = values.len();
    let row = |i: usize| -> Vec<(usize, usize)> {
        ((i + 1)..n)
            .filter(|&j| similarity::exceeds(values[i], values[j], threshold))
            .map(|j| (i, j))
            .collect()
    };

    let edges: Vec<(usize, usize)> = if n >= PARALLEL_MIN_VALUES {
        (0..n).into_par_iter().flat_map_iter(row).collect()
    } else {
        (0..n).flat_map(row).collect()
    };

    let mut uf = UnionFind::new(n);
    for (i, j) in edges {
        uf.union(i, j);
    }
    uf.groups()
}

fn greedy_groups(values: &[&str], threshold: f64) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; values.len()];
    let mut groups = Vec::new();

    for i in 0..values.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut group = vec![i];

        for j in 0..values.len() {
            if assigned[j] {
                continue;
            }
            if similarity::exceeds(values[i], values[j], threshold) {
                assigned[j] = true;
                group.push(j);
            }
        }
        groups.push(group);
    }
    groups
}
