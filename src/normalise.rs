// src/normalise.rs
//! Field normalisation: clean, map, cluster and label one field across a
//! whole batch of documents.
//!
//! Results are a function of the full batch. Normalising a subset, or the
//! same values alongside different neighbours, can produce different
//! clusters and labels.

use crate::canonical::{display_label, select_canonical};
use crate::clean::{clean_text, is_unknown, UNKNOWN};
use crate::cluster::{cluster_table, FrequencyTable};
use crate::config::EngineConfig;
use crate::document;
use crate::mapping::{apply_known_mappings, map_value};
use crate::rulebook::CategoryProfile;
use crate::split::split_components;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Joins the component labels of a combined answer into one label.
pub const COMPONENT_SEPARATOR: &str = ", ";

/// A cluster with its chosen representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalGroup {
    /// Display label, e.g. "Fareham College".
    pub label: String,
    /// The cleaned member the label was formatted from.
    pub canonical: String,
    /// Distinct cleaned members, most frequent first.
    pub members: Vec<String>,
    /// Raw occurrences absorbed.
    pub occurrences: usize,
}

/// Outcome of normalising one batch of raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalisationResult {
    /// One label per input value, in input order. A combined answer gets its
    /// component labels joined with [`COMPONENT_SEPARATOR`].
    pub labels: Vec<String>,
    /// Component labels per input value, in input order. Single answers have
    /// exactly one.
    pub components: Vec<Vec<String>>,
    /// Every distinct raw value seen -> its label. Absent values are keyed
    /// by the sentinel.
    pub original_to_canonical: BTreeMap<String, String>,
    /// Component label -> every raw occurrence it absorbed, in input order.
    pub cluster_info: BTreeMap<String, Vec<String>>,
    /// Clusters with their labels, most frequent first. `Unknown` never
    /// appears here.
    pub groups: Vec<CanonicalGroup>,
}

impl NormalisationResult {
    /// Occurrence count per component label (including `Unknown`). A
    /// combined answer counts once towards each of its components.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.cluster_info
            .iter()
            .map(|(label, originals)| (label.clone(), originals.len()))
            .collect()
    }

    /// Label for a raw value seen in this batch.
    #[must_use]
    pub fn label_for(&self, raw: &str) -> Option<&str> {
        self.original_to_canonical.get(raw).map(String::as_str)
    }

    /// Distinct raw spellings absorbed by `label`, in first-seen order.
    #[must_use]
    pub fn variations(&self, label: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for raw in self.cluster_info.get(label).into_iter().flatten() {
            if !seen.contains(&raw.as_str()) {
                seen.push(raw);
            }
        }
        seen
    }
}

/// The normalisation engine. Holds only immutable configuration, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Normaliser {
    config: EngineConfig,
}

impl Normaliser {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn profile(&self, category: Option<&str>) -> Option<&CategoryProfile> {
        self.config.rulebook.profile(category)
    }

    /// Cleans one raw value under `category`'s rules.
    #[must_use]
    pub fn clean(&self, text: Option<&str>, category: Option<&str>) -> String {
        clean_text(text, self.profile(category))
    }

    /// Applies `category`'s synonym table to cleaned values.
    #[must_use]
    pub fn apply_known_mappings(&self, values: &[String], category: Option<&str>) -> Vec<String> {
        match self.profile(category) {
            Some(profile) => {
                apply_known_mappings(values, &profile.synonyms, self.config.mapping_threshold)
            }
            None => values.to_vec(),
        }
    }

    /// Maps a cleaned value, splitting it into components first when the
    /// whole value has no synonym and the profile lists components.
    fn expand(&self, value: &str, category: Option<&str>) -> Vec<String> {
        let Some(profile) = self.profile(category) else {
            return vec![value.to_string()];
        };
        if let Some(canonical) = map_value(value, &profile.synonyms, self.config.mapping_threshold) {
            if canonical != value {
                debug!(from = %value, to = %canonical, "direct mapping");
            }
            return vec![canonical.to_string()];
        }

        let parts = split_components(value, &profile.components);
        if parts.len() > 1 {
            debug!(value = %value, parts = parts.len(), "split combined value");
        }
        let mut unique: Vec<String> = Vec::with_capacity(parts.len());
        for part in self.apply_known_mappings(&parts, category) {
            if !unique.contains(&part) {
                unique.push(part);
            }
        }
        unique
    }

    /// Normalises a batch of raw values.
    #[must_use]
    pub fn normalise_values(&self, raw: &[Option<&str>], category: Option<&str>) -> NormalisationResult {
        if raw.is_empty() {
            return NormalisationResult::default();
        }
        let profile = self.profile(category);

        let expanded: Vec<Vec<String>> = raw
            .iter()
            .map(|v| self.expand(&clean_text(*v, profile), category))
            .collect();
        let flat: Vec<&String> = expanded.iter().flatten().collect();

        let table = FrequencyTable::from_values(&flat);
        let clusters = cluster_table(&table, self.config.cluster_threshold, self.config.strategy);

        let mut label_of: HashMap<&str, String> = HashMap::new();
        let mut groups = Vec::with_capacity(clusters.len());
        for cluster in &clusters {
            let Some(canonical) = select_canonical(cluster, &table) else {
                continue;
            };
            let label = display_label(canonical, profile);
            for member in &cluster.members {
                label_of.insert(member.as_str(), label.clone());
            }
            groups.push(CanonicalGroup {
                label,
                canonical: canonical.to_string(),
                members: cluster.members.clone(),
                occurrences: cluster.occurrences,
            });
        }

        debug!(
            category = category.unwrap_or("-"),
            values = raw.len(),
            distinct = table.len(),
            clusters = groups.len(),
            "normalised batch"
        );

        let mut result = NormalisationResult {
            labels: Vec::with_capacity(raw.len()),
            components: Vec::with_capacity(raw.len()),
            groups,
            ..NormalisationResult::default()
        };
        for (original, parts) in raw.iter().zip(&expanded) {
            let key = original.unwrap_or(UNKNOWN).to_string();
            let mut labels: Vec<String> = Vec::with_capacity(parts.len());
            for part in parts {
                let label = if is_unknown(part) {
                    UNKNOWN.to_string()
                } else {
                    label_of
                        .get(part.as_str())
                        .cloned()
                        .unwrap_or_else(|| display_label(part, profile))
                };
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            for label in &labels {
                result.cluster_info.entry(label.clone()).or_default().push(key.clone());
            }
            let joined = labels.join(COMPONENT_SEPARATOR);
            result.original_to_canonical.insert(key, joined.clone());
            result.labels.push(joined);
            result.components.push(labels);
        }
        result
    }

    /// Normalises the value at `field_path` across `documents`. Every
    /// document receives exactly one label.
    #[must_use]
    pub fn normalise_field(
        &self,
        documents: &[Value],
        field_path: &str,
        category: Option<&str>,
    ) -> NormalisationResult {
        let raw: Vec<Option<&str>> = documents
            .iter()
            .map(|doc| document::text_at(doc, field_path))
            .collect();
        self.normalise_values(&raw, category)
    }
}
