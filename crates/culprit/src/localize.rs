//! One-shot localization pipeline: aggregate, score, rank.

use crate::matrix::CoverageMatrix;
use crate::rank::{rank, RankVector};
use crate::report::{assemble, OutputLimit, ReportLine};
use crate::result::CulpritResult;
use crate::spectrum::{aggregate, ElementStats};
use crate::technique::Technique;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything derived from one matrix under one technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    /// Technique used for scoring
    pub technique: Technique,
    /// Aggregated pass/fail counts
    pub stats: ElementStats,
    /// Suspiciousness per element
    pub scores: Vec<f64>,
    /// Dense rank per element
    pub ranks: RankVector,
}

impl Localization {
    /// Assemble ranked report lines against element descriptions
    ///
    /// # Errors
    /// Returns [`crate::CulpritError::MalformedInput`] if the number of
    /// descriptions differs from the number of elements.
    pub fn report(
        &self,
        descriptions: &[String],
        limit: OutputLimit,
    ) -> CulpritResult<Vec<ReportLine>> {
        assemble(descriptions, &self.scores, &self.ranks, limit)
    }

    /// Number of elements
    #[must_use]
    pub fn num_elements(&self) -> usize {
        self.scores.len()
    }
}

/// Run aggregation, scoring and ranking over a matrix.
#[must_use]
pub fn localize(matrix: &CoverageMatrix, technique: Technique) -> Localization {
    let stats = aggregate(matrix);
    let scores = technique.score(&stats);
    let ranks = rank(&scores);
    info!(
        technique = %technique,
        tests = matrix.num_tests(),
        elements = scores.len(),
        "localization complete"
    );
    Localization {
        technique,
        stats,
        scores,
        ranks,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample() -> CoverageMatrix {
        CoverageMatrix::parse("1 0 1 +\n0 1 1 +\n1 1 0 -\n").unwrap()
    }

    #[test]
    fn test_localize_end_to_end_ochiai() {
        let result = localize(&sample(), Technique::Ochiai);
        assert_eq!(result.stats.total_passed, 2);
        assert_eq!(result.stats.total_failed, 1);
        assert_eq!(result.stats.ep, vec![1, 1, 2]);
        assert_eq!(result.stats.ef, vec![1, 1, 0]);
        assert!((result.scores[0] - 0.7071).abs() < 1e-4);
        assert!((result.scores[1] - 0.7071).abs() < 1e-4);
        assert_eq!(result.scores[2], 0.0);
        assert_eq!(result.ranks.ranks(), &[1, 1, 2]);
    }

    #[test]
    fn test_localize_report() {
        let result = localize(&sample(), Technique::Ochiai);
        let descriptions = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let lines = result.report(&descriptions, OutputLimit::MaxRank(1)).unwrap();
        let text: Vec<_> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "Rank: 1 | Suspiciousness: 0.7071 | a",
                "Rank: 1 | Suspiciousness: 0.7071 | b",
            ]
        );
    }

    #[test]
    fn test_localize_lengths_agree() {
        for technique in Technique::ALL {
            let result = localize(&sample(), technique);
            assert_eq!(result.num_elements(), 3);
            assert_eq!(result.ranks.len(), 3);
            assert_eq!(result.technique, technique);
        }
    }

    #[test]
    fn test_localize_empty_matrix() {
        let result = localize(&CoverageMatrix::new(0), Technique::Tarantula);
        assert!(result.scores.is_empty());
        assert!(result.ranks.is_empty());
    }

    #[test]
    fn test_localize_no_tests_all_tied_nan() {
        let result = localize(&CoverageMatrix::new(4), Technique::Jaccard);
        assert!(result.scores.iter().all(|s| s.is_nan()));
        assert_eq!(result.ranks.ranks(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_tarantula_without_passing_tests() {
        let matrix = CoverageMatrix::parse("1 0 -\n1 1 -\n").unwrap();
        let result = localize(&matrix, Technique::Tarantula);
        assert!(result.scores.iter().all(|s| s.is_nan()));
    }
}
