//! Suspiciousness techniques (spectrum-based fault localization formulas)
//!
//! Each technique maps an element's spectrum to a suspiciousness score. With
//! `ef`/`ep` the failing/passing tests that executed the element, `tf`/`tp`
//! the failing/passing totals and `nf = tf - ef`:
//!
//! ```text
//! dstar2     ef^2 / (nf + ep)
//! dstar3     ef^3 / (nf + ep)
//! jaccard    ef / (ef + nf + ep)
//! ochiai     ef / sqrt(tf * (ef + ep))
//! tarantula  (ef / tf) / ((ef / tf) + (ep / tp))
//! zoltar     ef / (ef + nf + ep + 10000 * nf * ep / ef)
//! ```
//!
//! ## Division by zero
//!
//! Any division whose denominator is exactly zero yields `NaN` for that
//! element, and `NaN` operands propagate. A score is never `±inf` and a
//! degenerate element is never silently scored `0`. The ranker collates all
//! `NaN` scores into one tie group below every real score.
//!
//! Tarantula uses the full denominator `(ef/tf) + (ep/tp)`. Dropping the
//! parentheses reduces it to `1 + ep/tp`, which is not Tarantula.

use crate::result::{CulpritError, CulpritResult};
use crate::spectrum::{ElementCounts, ElementStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Zoltar's penalty weight on elements executed by passing tests
const ZOLTAR_PENALTY: f64 = 10_000.0;

/// Suspiciousness formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    /// DStar with exponent 2
    Dstar2,
    /// DStar with exponent 3
    Dstar3,
    /// Jaccard similarity coefficient
    Jaccard,
    /// Ochiai (cosine similarity)
    Ochiai,
    /// Tarantula
    Tarantula,
    /// Zoltar
    Zoltar,
}

impl Technique {
    /// Every technique, in display order
    pub const ALL: [Self; 6] = [
        Self::Dstar2,
        Self::Dstar3,
        Self::Jaccard,
        Self::Ochiai,
        Self::Tarantula,
        Self::Zoltar,
    ];

    /// Accepted technique names
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.name()).collect()
    }

    /// Name used on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dstar2 => "dstar2",
            Self::Dstar3 => "dstar3",
            Self::Jaccard => "jaccard",
            Self::Ochiai => "ochiai",
            Self::Tarantula => "tarantula",
            Self::Zoltar => "zoltar",
        }
    }

    /// Formula in `ef`/`ep`/`tf`/`tp`/`nf` notation
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            Self::Dstar2 => "ef^2 / (nf + ep)",
            Self::Dstar3 => "ef^3 / (nf + ep)",
            Self::Jaccard => "ef / (ef + nf + ep)",
            Self::Ochiai => "ef / sqrt(tf * (ef + ep))",
            Self::Tarantula => "(ef / tf) / ((ef / tf) + (ep / tp))",
            Self::Zoltar => "ef / (ef + nf + ep + 10000 * nf * ep / ef)",
        }
    }

    /// Score a single element given the global totals
    #[must_use]
    pub fn score_element(
        self,
        counts: ElementCounts,
        total_failed: usize,
        total_passed: usize,
    ) -> f64 {
        let ef = counts.ef as f64;
        let ep = counts.ep as f64;
        let tf = total_failed as f64;
        let tp = total_passed as f64;
        let nf = tf - ef;

        match self {
            Self::Dstar2 => ratio(ef.powi(2), nf + ep),
            Self::Dstar3 => ratio(ef.powi(3), nf + ep),
            Self::Jaccard => ratio(ef, ef + nf + ep),
            Self::Ochiai => ratio(ef, (tf * (ef + ep)).sqrt()),
            Self::Tarantula => {
                let fail_ratio = ratio(ef, tf);
                let pass_ratio = ratio(ep, tp);
                ratio(fail_ratio, fail_ratio + pass_ratio)
            }
            Self::Zoltar => {
                let penalty = ratio(ZOLTAR_PENALTY * nf * ep, ef);
                ratio(ef, ef + nf + ep + penalty)
            }
        }
    }

    /// Score every element of an aggregated spectrum.
    ///
    /// Output is index-aligned with the matrix columns. Elements are scored
    /// independently of each other.
    #[must_use]
    pub fn score(self, stats: &ElementStats) -> Vec<f64> {
        let scores: Vec<f64> = (0..stats.num_elements())
            .map(|e| self.score_element(stats.counts(e), stats.total_failed, stats.total_passed))
            .collect();
        debug!(
            technique = self.name(),
            elements = scores.len(),
            nan = scores.iter().filter(|s| s.is_nan()).count(),
            "scored elements"
        );
        scores
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Technique {
    type Err = CulpritError;

    fn from_str(s: &str) -> CulpritResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| CulpritError::UnsupportedTechnique {
                name: s.to_string(),
                valid: Self::names(),
            })
    }
}

/// `num / den`, or `NaN` when the denominator is exactly zero
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        f64::NAN
    } else {
        num / den
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::matrix::CoverageMatrix;
    use crate::spectrum::aggregate;

    const EPS: f64 = 1e-9;

    fn sample_stats() -> ElementStats {
        aggregate(&CoverageMatrix::parse("1 0 1 +\n0 1 1 +\n1 1 0 -\n").unwrap())
    }

    fn counts(ef: usize, ep: usize) -> ElementCounts {
        ElementCounts { ep, ef }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_every_name() {
            for technique in Technique::ALL {
                assert_eq!(technique.name().parse::<Technique>().unwrap(), technique);
            }
        }

        #[test]
        fn test_display_matches_name() {
            assert_eq!(Technique::Ochiai.to_string(), "ochiai");
            assert_eq!(Technique::Dstar3.to_string(), "dstar3");
        }

        #[test]
        fn test_parse_unknown_name() {
            let err = "barinel".parse::<Technique>().unwrap_err();
            match err {
                CulpritError::UnsupportedTechnique { name, valid } => {
                    assert_eq!(name, "barinel");
                    assert_eq!(valid.len(), Technique::ALL.len());
                    assert!(valid.contains(&"tarantula"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_parse_is_case_sensitive() {
            assert!("Ochiai".parse::<Technique>().is_err());
        }

        #[test]
        fn test_serde_uses_lowercase_names() {
            let json = serde_json::to_string(&Technique::Tarantula).unwrap();
            assert_eq!(json, "\"tarantula\"");
            let back: Technique = serde_json::from_str("\"dstar2\"").unwrap();
            assert_eq!(back, Technique::Dstar2);
        }
    }

    mod formula_tests {
        use super::*;

        #[test]
        fn test_ochiai_sample() {
            let scores = Technique::Ochiai.score(&sample_stats());
            assert_eq!(scores.len(), 3);
            assert!((scores[0] - 1.0 / 2.0_f64.sqrt()).abs() < EPS);
            assert!((scores[1] - 1.0 / 2.0_f64.sqrt()).abs() < EPS);
            assert_eq!(scores[2], 0.0);
        }

        #[test]
        fn test_dstar2() {
            // ef=2, tf=3 -> nf=1, ep=1: 4 / 2
            let score = Technique::Dstar2.score_element(counts(2, 1), 3, 5);
            assert!((score - 2.0).abs() < EPS);
        }

        #[test]
        fn test_dstar3() {
            // ef=2, tf=3 -> nf=1, ep=1: 8 / 2
            let score = Technique::Dstar3.score_element(counts(2, 1), 3, 5);
            assert!((score - 4.0).abs() < EPS);
        }

        #[test]
        fn test_jaccard() {
            // ef / (tf + ep) = 2 / (3 + 1)
            let score = Technique::Jaccard.score_element(counts(2, 1), 3, 5);
            assert!((score - 0.5).abs() < EPS);
        }

        #[test]
        fn test_tarantula_canonical_form() {
            // (1/1) / ((1/1) + (1/2)) = 2/3
            let score = Technique::Tarantula.score_element(counts(1, 1), 1, 2);
            assert!((score - 2.0 / 3.0).abs() < EPS);
            // The unparenthesized `(ef/tf)/(ef/tf) + ep/tp` would give 1.5
            assert!((score - 1.5).abs() > 0.1);
        }

        #[test]
        fn test_tarantula_bounded() {
            for ef in 0..=4 {
                for ep in 0..=4 {
                    let score = Technique::Tarantula.score_element(counts(ef, ep), 4, 4);
                    if ef + ep > 0 {
                        assert!((0.0..=1.0).contains(&score), "ef={ef} ep={ep} -> {score}");
                    }
                }
            }
        }

        #[test]
        fn test_tarantula_only_failing_coverage_is_one() {
            let score = Technique::Tarantula.score_element(counts(3, 0), 3, 7);
            assert!((score - 1.0).abs() < EPS);
        }

        #[test]
        fn test_zoltar() {
            // ef=2, nf=1, ep=1: 2 / (2 + 1 + 1 + 10000*1*1/2)
            let score = Technique::Zoltar.score_element(counts(2, 1), 3, 5);
            assert!((score - 2.0 / 5004.0).abs() < EPS);
        }

        #[test]
        fn test_zoltar_perfect_element() {
            // executed by every failing test and no passing test
            let score = Technique::Zoltar.score_element(counts(3, 0), 3, 5);
            assert!((score - 1.0).abs() < EPS);
        }

        #[test]
        fn test_score_is_idempotent() {
            let stats = sample_stats();
            for technique in Technique::ALL {
                let a = technique.score(&stats);
                let b = technique.score(&stats);
                assert_eq!(format!("{a:?}"), format!("{b:?}"));
            }
        }
    }

    mod division_by_zero_tests {
        use super::*;

        #[test]
        fn test_ochiai_unexecuted_element_is_nan() {
            assert!(Technique::Ochiai.score_element(counts(0, 0), 2, 3).is_nan());
        }

        #[test]
        fn test_ochiai_no_failing_tests_is_nan() {
            assert!(Technique::Ochiai.score_element(counts(0, 2), 0, 3).is_nan());
        }

        #[test]
        fn test_jaccard_and_dstar_unexecuted_with_no_failures_is_nan() {
            for technique in [Technique::Jaccard, Technique::Dstar2, Technique::Dstar3] {
                assert!(
                    technique.score_element(counts(0, 0), 0, 3).is_nan(),
                    "{technique} should be NaN"
                );
            }
        }

        #[test]
        fn test_jaccard_and_dstar_unexecuted_with_failures_is_zero() {
            for technique in [Technique::Jaccard, Technique::Dstar2, Technique::Dstar3] {
                assert_eq!(technique.score_element(counts(0, 0), 2, 3), 0.0);
            }
        }

        #[test]
        fn test_dstar_zero_denominator_is_nan_not_infinite() {
            // ef == tf and ep == 0 -> nf + ep == 0
            let score = Technique::Dstar2.score_element(counts(2, 0), 2, 3);
            assert!(score.is_nan());
            let score = Technique::Dstar3.score_element(counts(2, 0), 2, 3);
            assert!(score.is_nan());
        }

        #[test]
        fn test_tarantula_no_failing_tests_is_nan() {
            assert!(Technique::Tarantula.score_element(counts(0, 1), 0, 2).is_nan());
        }

        #[test]
        fn test_tarantula_no_passing_tests_is_nan() {
            assert!(Technique::Tarantula.score_element(counts(1, 0), 2, 0).is_nan());
        }

        #[test]
        fn test_tarantula_unexecuted_element_is_nan() {
            assert!(Technique::Tarantula.score_element(counts(0, 0), 2, 2).is_nan());
        }

        #[test]
        fn test_zoltar_not_executed_by_failures_is_nan() {
            assert!(Technique::Zoltar.score_element(counts(0, 3), 2, 3).is_nan());
        }

        #[test]
        fn test_no_technique_produces_infinity() {
            for technique in Technique::ALL {
                for ef in 0..=2 {
                    for ep in 0..=2 {
                        for (tf, tp) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
                            if ef > tf || ep > tp {
                                continue;
                            }
                            let score = technique.score_element(counts(ef, ep), tf, tp);
                            assert!(!score.is_infinite(), "{technique} ef={ef} ep={ep}");
                        }
                    }
                }
            }
        }

        #[test]
        fn test_score_empty_stats() {
            for technique in Technique::ALL {
                assert!(technique.score(&ElementStats::zeroed(0)).is_empty());
            }
        }

        #[test]
        fn test_score_zero_tests_is_all_nan() {
            for technique in Technique::ALL {
                let scores = technique.score(&ElementStats::zeroed(3));
                assert!(scores.iter().all(|s| s.is_nan()), "{technique}");
            }
        }
    }
}
