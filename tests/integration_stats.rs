// tests/integration_stats.rs
use fieldnorm_core::report;
use fieldnorm_core::stats::{percentage, FieldStats, PercentageRange};
use fieldnorm_core::{Normaliser, StatsAggregator, UNKNOWN};
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn colleges(fareham: usize, moulton: usize) -> Vec<Value> {
    let mut docs = Vec::new();
    for i in 0..fareham {
        docs.push(json!({"username": format!("f{i}"), "college": "Fareham College", "gender": "Female"}));
    }
    for i in 0..moulton {
        docs.push(json!({"username": format!("m{i}"), "college": "moulton", "gender": "Male"}));
    }
    docs
}

#[test]
fn test_bucket_boundaries() {
    assert_eq!(PercentageRange::from_counts(30, 100).label(), "15-30%");
    assert_eq!(PercentageRange::from_counts(31, 100).label(), "30-70%");
    assert_eq!(PercentageRange::from_fraction(0.3), PercentageRange::From15To30);
    assert_eq!(PercentageRange::from_percent(14.99), PercentageRange::Under15);
    assert_eq!(PercentageRange::from_percent(85.0), PercentageRange::From71To85);
    assert_eq!(PercentageRange::from_percent(85.5), PercentageRange::Over85);
    assert_eq!(PercentageRange::from_counts(0, 0), PercentageRange::Under15);
}

#[test]
fn test_row_range_matches_shown_percentage() {
    let stats = FieldStats {
        total_documents: 47,
        ..FieldStats::default()
    };
    let counts = BTreeMap::from([("Fareham College".to_string(), 7)]);
    let row = &stats.rows(&counts)[0];
    assert_eq!(row.percentage, 15);
    assert_eq!(row.range.label(), "15-30%");

    let stats = FieldStats {
        total_documents: 200,
        ..FieldStats::default()
    };
    let counts = BTreeMap::from([("Moulton College".to_string(), 61)]);
    let row = &stats.rows(&counts)[0];
    assert_eq!(row.percentage, 30);
    assert_eq!(row.range, PercentageRange::from_percent(f64::from(row.percentage)));
}

#[test]
fn test_percentages_round_half_to_even() {
    assert_eq!(percentage(1, 8), 12);
    assert_eq!(percentage(3, 8), 38);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(5, 0), 0);
}

#[test]
fn test_field_counts() {
    let n = Normaliser::default();
    let agg = StatsAggregator::new(&n).aggregate(&colleges(3, 7));
    let stats = &agg.stats;
    assert_eq!(stats.total_documents, 10);
    assert_eq!(stats.college["Fareham College"], 3);
    assert_eq!(stats.college["Moulton College"], 7);
    assert_eq!(stats.gender["Female"], 3);
    assert_eq!(stats.age_group[UNKNOWN], 10);
    assert!(agg.updates.is_none());

    let rows = stats.rows(&stats.college);
    assert_eq!(rows[0].label, "Moulton College");
    assert_eq!(rows[0].percentage, 70);
    assert_eq!(rows[1].percentage, 30);
    assert_eq!(rows[1].range.label(), "15-30%");
}

#[test]
fn test_markdown_report() {
    let n = Normaliser::default();
    let agg = StatsAggregator::new(&n).aggregate(&colleges(3, 7));
    let md = report::format_report(&agg, "markdown");
    assert!(md.contains("| College | Count | Percentage |"));
    assert!(md.contains("| Fareham College | 3 | 30% |"));
    assert!(md.contains("| Moulton College | 7 | 70% |"));
    assert!(md.contains("### Subjects Mentioned"));
}

#[test]
fn test_json_report_parses() {
    let n = Normaliser::default();
    let agg = StatsAggregator::new(&n).aggregate(&colleges(1, 1));
    let parsed: Value = serde_json::from_str(&report::format_report(&agg, "json")).unwrap();
    assert!(parsed.is_object());
}

#[test]
fn test_update_payloads() {
    let docs = vec![
        json!({
            "username": "u1",
            "college": "fareham",
            "transcript": "I did my A-levels then an apprenticeship",
            "responses": {"about_user": {"study_field": "Maths", "over_25": true}}
        }),
        json!({"college": "Moulton College"}),
    ];
    let n = Normaliser::default();
    let agg = StatsAggregator::new(&n).with_updates(true).aggregate(&docs);
    let updates = agg.updates.unwrap();
    assert_eq!(updates.len(), 2);

    let first = &updates[0];
    assert_eq!(first.username.as_deref(), Some("u1"));
    assert_eq!(first.college, "Fareham College");
    assert_eq!(first.study_field, "Mathematics");
    assert_eq!(first.age_group, "Over 25");
    assert_eq!(first.gender, UNKNOWN);
    assert_eq!(first.course_types, vec!["A-levels", "Apprenticeships"]);
    assert_eq!(first.subjects, vec!["Mathematics"]);

    assert!(updates[1].username.is_none());
    let json = report::format_updates_json(&updates);
    let parsed: Vec<Value> = serde_json::from_str(&json).unwrap();
    assert!(parsed[1].get("username").is_none());
    assert_eq!(parsed[1]["study_field"], UNKNOWN);
}

#[test]
fn test_details_list_merged_variations() {
    let n = Normaliser::default();
    let r = n.normalise_values(
        &[Some("Fareham College"), Some("fareham"), Some("Fareham"), Some("Art")],
        Some("college"),
    );
    let details = report::format_normalisation_details(&r, "College");
    assert!(details.contains("**Fareham College** (3 variations)"));
    assert!(!details.contains("**Art**"));
}
