// tests/unit_similarity.rs
use fieldnorm_core::similarity::{exceeds, ratio, upper_bound};

#[test]
fn test_identity_and_symmetry() {
    let words = ["fareham college", "fareham collge", "biology", "chemistry", "", "é"];
    for a in words {
        assert!((ratio(a, a) - 1.0).abs() < f64::EPSILON);
        for b in words {
            assert!((ratio(a, b) - ratio(b, a)).abs() < f64::EPSILON, "{a} / {b}");
            let r = ratio(a, b);
            assert!((0.0..=1.0).contains(&r));
        }
    }
}

#[test]
fn test_known_values() {
    // LCS("abcd", "abed") = 3 -> 6 / 8
    assert!((ratio("abcd", "abed") - 0.75).abs() < 1e-12);
    assert!(ratio("abc", "xyz").abs() < f64::EPSILON);
    assert!(ratio("cirencester college", "cirencester colege") > 0.95);
    assert!(ratio("biology", "chemistry") < 0.5);
}

#[test]
fn test_upper_bound_never_below_ratio() {
    let pairs = [("art", "art and design"), ("maths", "mathematics"), ("a", "")];
    for (a, b) in pairs {
        assert!(upper_bound(a, b) >= ratio(a, b));
    }
}

#[test]
fn test_exceeds_is_strict() {
    assert!(!exceeds("abcd", "abed", 0.75));
    assert!(exceeds("abcd", "abed", 0.74));
    assert!(!exceeds("same", "same", 1.0));
}
