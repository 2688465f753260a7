// tests/unit_cluster.rs
use fieldnorm_core::canonical::select_canonical;
use fieldnorm_core::cluster::{cluster_table, ClusterStrategy, FrequencyTable};
use fieldnorm_core::UNKNOWN;

fn sample() -> Vec<String> {
    let raw = [
        "fareham college",
        "fareham college",
        "fareham colege",
        "fareham collge",
        "farnborough college",
        "moulton college",
        "moulton colleg",
        "biology",
        "biolgy",
        "chemistry",
        "art",
        "art and design",
        UNKNOWN,
        UNKNOWN,
    ];
    raw.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_clusters_partition_known_values() {
    let table = FrequencyTable::from_values(&sample());
    for strategy in [ClusterStrategy::Connected, ClusterStrategy::Greedy] {
        let clusters = cluster_table(&table, 0.85, strategy);
        let mut seen: Vec<&str> = clusters
            .iter()
            .flat_map(|c| c.members.iter().map(String::as_str))
            .collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total, "a value landed in two clusters");
        assert_eq!(total, table.len() - 1, "every value except Unknown is clustered");
        assert!(!seen.contains(&UNKNOWN));
        assert!(clusters.iter().all(|c| !c.is_empty()));
    }
}

#[test]
fn test_connected_threshold_monotonicity() {
    let table = FrequencyTable::from_values(&sample());
    let thresholds = [0.0, 0.5, 0.7, 0.85, 0.9, 0.95, 1.0];
    for pair in thresholds.windows(2) {
        let loose = cluster_table(&table, pair[0], ClusterStrategy::Connected);
        let strict = cluster_table(&table, pair[1], ClusterStrategy::Connected);
        assert!(loose.len() <= strict.len());
        for fine in &strict {
            assert!(
                loose.iter().any(|coarse| fine.members.iter().all(|m| coarse.contains(m))),
                "{:?} split across clusters at {}",
                fine.members,
                pair[0]
            );
        }
    }
}

#[test]
fn test_threshold_one_keeps_values_apart() {
    let table = FrequencyTable::from_values(&sample());
    let clusters = cluster_table(&table, 1.0, ClusterStrategy::Connected);
    assert!(clusters.iter().all(|c| c.len() == 1));
}

#[test]
fn test_canonical_dominates_its_cluster() {
    let table = FrequencyTable::from_values(&sample());
    for cluster in cluster_table(&table, 0.85, ClusterStrategy::Connected) {
        let canonical = select_canonical(&cluster, &table).unwrap();
        assert!(cluster.contains(canonical));
        for member in &cluster.members {
            let (mc, cc) = (table.count(member), table.count(canonical));
            assert!(mc < cc || (mc == cc && canonical <= member.as_str()));
        }
    }
}

#[test]
fn test_typo_merges_into_majority_spelling() {
    let table = FrequencyTable::from_values(&sample());
    let clusters = cluster_table(&table, 0.85, ClusterStrategy::Connected);
    let fareham = clusters.iter().find(|c| c.contains("fareham colege")).unwrap();
    assert!(fareham.contains("fareham college"));
    assert_eq!(select_canonical(fareham, &table), Some("fareham college"));
    assert_eq!(fareham.occurrences, 4);
    let biology = clusters.iter().find(|c| c.contains("biology")).unwrap();
    assert!(!biology.contains("chemistry"));
}

#[test]
fn test_large_batch_matches_across_strategies() {
    // Enough distinct values to take the parallel edge path.
    let values: Vec<String> = (0..200).map(|i| format!("college number {i:03}")).collect();
    let table = FrequencyTable::from_values(&values);
    let strict = cluster_table(&table, 0.99, ClusterStrategy::Connected);
    assert_eq!(strict.len(), 200);
    let loose = cluster_table(&table, 0.5, ClusterStrategy::Connected);
    assert_eq!(loose.len(), 1);
}
