// src/stats/mod.rs
//! Per-field statistics over a document collection.
//!
//! The aggregator runs the normaliser over each tracked field, tallies
//! labels, scans transcripts for course types and subject mentions, and can
//! build a reduced per-document payload for a later bulk update. It never
//! writes anywhere itself.

pub mod buckets;
pub mod detect;

pub use buckets::{percentage, PercentageRange};

use crate::document::{lookup, non_blank_at, text_at};
use crate::normalise::{NormalisationResult, Normaliser};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const USERNAME_PATH: &str = "username";
pub const COLLEGE_PATH: &str = "college";
pub const GENDER_PATH: &str = "gender";
pub const AGE_GROUP_PATH: &str = "age_group";
pub const STUDY_FIELD_PATH: &str = "responses.about_user.study_field";
pub const TRANSCRIPT_PATH: &str = "transcript";

const STATED_GENDER_PATH: &str = "responses.about_user.gender";
const OVER_25_PATH: &str = "responses.about_user.over_25";

/// Label counts per tracked field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldStats {
    pub total_documents: usize,
    pub college: BTreeMap<String, usize>,
    pub gender: BTreeMap<String, usize>,
    pub age_group: BTreeMap<String, usize>,
    /// Clustered study field.
    pub subjects: BTreeMap<String, usize>,
    /// Subjects detected in study field + transcript, once per document.
    pub subject_mentions: BTreeMap<String, usize>,
    pub course_types: BTreeMap<String, usize>,
}

/// One line of a breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRow {
    pub label: String,
    pub count: usize,
    pub percentage: u32,
    pub range: PercentageRange,
}

impl FieldStats {
    /// Rows for `counts`, largest first, ties alphabetical. Percentages are
    /// relative to the total document count.
    #[must_use]
    pub fn rows(&self, counts: &BTreeMap<String, usize>) -> Vec<StatRow> {
        let mut rows: Vec<StatRow> = counts
            .iter()
            .map(|(label, &count)| StatRow {
                label: label.clone(),
                count,
                percentage: percentage(count, self.total_documents),
                range: PercentageRange::from_counts(count, self.total_documents),
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        rows
    }
}

/// Normalised fields for one document, keyed by username for a bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub college: String,
    pub gender: String,
    pub age_group: String,
    pub study_field: String,
    pub subjects: Vec<String>,
    pub course_types: Vec<String>,
}

/// Everything an aggregation run produces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregation {
    pub stats: FieldStats,
    pub colleges: NormalisationResult,
    pub genders: NormalisationResult,
    pub age_groups: NormalisationResult,
    pub subjects: NormalisationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<Vec<DocumentUpdate>>,
}

pub struct StatsAggregator<'a> {
    normaliser: &'a Normaliser,
    with_updates: bool,
}

impl<'a> StatsAggregator<'a> {
    #[must_use]
    pub fn new(normaliser: &'a Normaliser) -> Self {
        Self {
            normaliser,
            with_updates: false,
        }
    }

    /// Also build one [`DocumentUpdate`] per input document.
    #[must_use]
    pub fn with_updates(mut self, enabled: bool) -> Self {
        self.with_updates = enabled;
        self
    }

    #[must_use]
    pub fn aggregate(&self, documents: &[Value]) -> Aggregation {
        let n = self.normaliser;

        let colleges = n.normalise_field(documents, COLLEGE_PATH, Some("college"));
        let subjects = n.normalise_field(documents, STUDY_FIELD_PATH, Some("subject"));

        let gender_raw: Vec<Option<&str>> = documents.iter().map(gender_value).collect();
        let genders = n.normalise_values(&gender_raw, Some("gender"));

        let age_raw: Vec<Option<&str>> = documents.iter().map(age_group_value).collect();
        let age_groups = n.normalise_values(&age_raw, Some("age_group"));

        let mentions: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| {
                detect::subject_mentions(
                    text_at(doc, STUDY_FIELD_PATH),
                    text_at(doc, TRANSCRIPT_PATH),
                )
            })
            .collect();
        let courses: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| detect::course_types(text_at(doc, TRANSCRIPT_PATH).unwrap_or_default()))
            .collect();

        let stats = FieldStats {
            total_documents: documents.len(),
            college: colleges.counts(),
            gender: genders.counts(),
            age_group: age_groups.counts(),
            subjects: subjects.counts(),
            subject_mentions: tally(&mentions),
            course_types: tally(&courses),
        };

        info!(
            documents = stats.total_documents,
            colleges = stats.college.len(),
            subjects = stats.subjects.len(),
            "aggregated field stats"
        );

        let updates = self.with_updates.then(|| {
            documents
                .iter()
                .zip(mentions)
                .zip(courses)
                .enumerate()
                .map(|(i, ((doc, subject_list), course_list))| {
                    let username = text_at(doc, USERNAME_PATH).map(str::to_string);
                    if username.is_none() {
                        warn!(index = i, "document has no username; update cannot be matched");
                    }
                    DocumentUpdate {
                        username,
                        college: colleges.labels[i].clone(),
                        gender: genders.labels[i].clone(),
                        age_group: age_groups.labels[i].clone(),
                        study_field: subjects.labels[i].clone(),
                        subjects: subject_list,
                        course_types: course_list,
                    }
                })
                .collect()
        });

        Aggregation {
            stats,
            colleges,
            genders,
            age_groups,
            subjects,
            updates,
        }
    }
}

/// Top-level `gender`, else inferred from the stated gender answer.
fn gender_value(doc: &Value) -> Option<&str> {
    if let Some(gender) = non_blank_at(doc, GENDER_PATH) {
        return Some(gender);
    }
    let stated = text_at(doc, STATED_GENDER_PATH)?.to_lowercase();
    if stated.contains("female") {
        Some("Female")
    } else if stated.contains("male") {
        Some("Male")
    } else if stated.contains("binary") {
        Some("Non-binary")
    } else {
        None
    }
}

/// Top-level `age_group`, else derived from the `over_25` answer.
fn age_group_value(doc: &Value) -> Option<&str> {
    if let Some(age) = non_blank_at(doc, AGE_GROUP_PATH) {
        return Some(age);
    }
    let over_25 = lookup(doc, OVER_25_PATH).and_then(Value::as_bool)?;
    Some(if over_25 { "Over 25" } else { "Under 25" })
}

fn tally(per_doc: &[Vec<String>]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for labels in per_doc {
        for label in labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
    }
    counts
}
