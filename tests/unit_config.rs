// tests/unit_config.rs
use fieldnorm_core::config::{EngineConfig, CONFIG_FILE};
use fieldnorm_core::rulebook::Rulebook;
use fieldnorm_core::{ClusterStrategy, NormaliseError, Normaliser};
use std::fs;

#[test]
fn test_load_explicit_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join(CONFIG_FILE);
    fs::write(&path, "[engine]\ncluster_threshold = 0.8\nstrategy = \"greedy\"").unwrap();
    let c = EngineConfig::load(Some(&path)).unwrap();
    assert!((c.cluster_threshold - 0.8).abs() < f64::EPSILON);
    assert_eq!(c.strategy, ClusterStrategy::Greedy);
    assert!(c.rulebook.profile(Some("college")).is_some());
}

#[test]
fn test_missing_file_is_io_error() {
    let d = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(Some(&d.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, NormaliseError::Io { .. }));
}

#[test]
fn test_bad_pattern_is_reported() {
    let err = EngineConfig::from_toml("[categories.college]\npatterns = [{ pattern = '(' }]")
        .unwrap_err();
    assert!(matches!(err, NormaliseError::Regex { ref category, .. } if category == "college"));
}

#[test]
fn test_custom_synonyms_drive_normalisation() {
    let toml = r#"
[categories.region]
synonyms = [{ canonical = "North East", aliases = ["NE", "north-east england"] }]
"#;
    let n = Normaliser::new(EngineConfig::from_toml(toml).unwrap());
    let r = n.normalise_values(&[Some("North-East England"), Some("ne")], Some("region"));
    assert_eq!(r.labels, vec!["North East", "North East"]);
}

#[test]
fn test_category_override_replaces_builtin() {
    let c = EngineConfig::from_toml("[categories.college]\nacronyms = [\"uca\"]").unwrap();
    let profile = c.rulebook.profile(Some("college")).unwrap();
    assert!(profile.known_names.is_empty());
    assert!(profile.is_acronym("uca"));
}

#[test]
fn test_threshold_validation() {
    assert!(EngineConfig::default().with_threshold(-0.1).validate().is_err());
    assert!(EngineConfig::default().with_threshold(1.0).validate().is_ok());
}

#[test]
fn test_injected_rulebook_replaces_builtin() {
    let toml = r#"
[categories.college]
suffixes = ["campus"]
known_names = [{ pattern = '\bsolent\b', label = "Solent University" }]
"#;
    let config = EngineConfig::default().with_rulebook(Rulebook::from_toml(toml).unwrap());
    assert!(config.rulebook.profile(Some("subject")).is_none());

    let n = Normaliser::new(config);
    let r = n.normalise_values(
        &[Some("Solent"), Some("Fareham"), Some("Eastleigh Campus")],
        Some("college"),
    );
    assert_eq!(r.labels, vec!["Solent University", "Fareham", "Eastleigh Campus"]);
}
