// src/similarity.rs
//! String similarity ratio shared by direct mapping and clustering.
//!
//! The ratio is `2 * M / T`, where `M` is the length of the longest common
//! subsequence and `T` the combined length of both strings, counted in
//! characters. It is symmetric and `ratio(a, a) == 1.0`.

/// Similarity of two strings in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * lcs_length(&a, &b) as f64 / total as f64
}

/// Best ratio two strings of these lengths could reach.
///
/// Used to skip the quadratic comparison when even a perfect overlap could
/// not clear a threshold.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn upper_bound(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    let total = la + lb;
    if total == 0 {
        return 1.0;
    }
    2.0 * la.min(lb) as f64 / total as f64
}

/// `true` when `ratio(a, b)` is strictly above `threshold`.
#[must_use]
pub fn exceeds(a: &str, b: &str, threshold: f64) -> bool {
    upper_bound(a, b) > threshold && ratio(a, b) > threshold
}

// Two-row DP; the shorter string indexes the row.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for &lc in long {
        for (j, &sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}
