// src/stats/buckets.rs
//! Percentages and the coarse ranges used in summary reports.

use serde::Serialize;
use std::fmt;

/// Human-readable percentage band. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PercentageRange {
    Under15,
    From15To30,
    From30To70,
    From71To85,
    Over85,
}

impl PercentageRange {
    /// Buckets a percentage in `[0, 100]`.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent < 15.0 {
            Self::Under15
        } else if percent <= 30.0 {
            Self::From15To30
        } else if percent <= 70.0 {
            Self::From30To70
        } else if percent <= 85.0 {
            Self::From71To85
        } else {
            Self::Over85
        }
    }

    /// Buckets a fraction in `[0, 1]`.
    ///
    /// The scaled value is snapped to 1e-9 first so that fractions such as
    /// 0.3 land on the boundary they name rather than just above it.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        Self::from_percent((fraction * 100.0 * 1e9).round() / 1e9)
    }

    /// Buckets `count` out of `total` by its rounded [`percentage`], so the
    /// band always agrees with the percentage shown next to it. An empty
    /// total is `Under15`.
    #[must_use]
    pub fn from_counts(count: usize, total: usize) -> Self {
        Self::from_percent(f64::from(percentage(count, total)))
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Under15 => "under 15%",
            Self::From15To30 => "15-30%",
            Self::From30To70 => "30-70%",
            Self::From71To85 => "71-85%",
            Self::Over85 => "over 85%",
        }
    }
}

impl fmt::Display for PercentageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole-number percentage of `count` in `total`, rounding halves to even.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round_ties_even() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_on_upper_bound() {
        let cases = [
            (0.0, "under 15%"),
            (14.9, "under 15%"),
            (15.0, "15-30%"),
            (30.0, "15-30%"),
            (31.0, "30-70%"),
            (70.0, "30-70%"),
            (70.5, "71-85%"),
            (85.0, "71-85%"),
            (85.1, "over 85%"),
            (100.0, "over 85%"),
        ];
        for (percent, label) in cases {
            assert_eq!(PercentageRange::from_percent(percent).label(), label, "{percent}");
        }
    }

    #[test]
    fn fractions_hit_exact_boundaries() {
        assert_eq!(PercentageRange::from_fraction(0.3), PercentageRange::From15To30);
        assert_eq!(PercentageRange::from_fraction(0.31), PercentageRange::From30To70);
        assert_eq!(PercentageRange::from_fraction(0.7), PercentageRange::From30To70);
        assert_eq!(PercentageRange::from_counts(3, 10), PercentageRange::From15To30);
        assert_eq!(PercentageRange::from_counts(0, 0), PercentageRange::Under15);
    }

    #[test]
    fn percentage_rounds_half_to_even() {
        assert_eq!(percentage(1, 8), 12); // 12.5
        assert_eq!(percentage(3, 8), 38); // 37.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn counts_bucket_by_rounded_percentage() {
        // 14.89% shows as 15%, 30.5% as 30%.
        assert_eq!(PercentageRange::from_counts(7, 47), PercentageRange::From15To30);
        assert_eq!(PercentageRange::from_counts(61, 200), PercentageRange::From15To30);
        for total in 1..=120 {
            for count in 0..=total {
                let shown = f64::from(percentage(count, total));
                assert_eq!(
                    PercentageRange::from_counts(count, total),
                    PercentageRange::from_percent(shown),
                    "{count}/{total}"
                );
            }
        }
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(PercentageRange::Over85.to_string(), "over 85%");
    }
}
