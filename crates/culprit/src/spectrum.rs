//! Program spectrum aggregation.
//!
//! Collapses a coverage matrix into per-element visitation counts:
//!
//! ```text
//! ep[e] = passing tests that executed e
//! ef[e] = failing tests that executed e
//! ```
//!
//! plus the global pass/fail totals. Every suspiciousness formula is a
//! function of these four numbers only.

use crate::matrix::{CoverageMatrix, Outcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Visitation counts for a single element
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    /// Passing tests that executed this element
    pub ep: usize,
    /// Failing tests that executed this element
    pub ef: usize,
}

/// Aggregated per-element pass/fail counts for one matrix
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStats {
    /// Executions by passing tests, one entry per element
    pub ep: Vec<usize>,
    /// Executions by failing tests, one entry per element
    pub ef: Vec<usize>,
    /// Total passing tests
    pub total_passed: usize,
    /// Total failing tests
    pub total_failed: usize,
}

impl ElementStats {
    /// All-zero stats over `num_elements` elements
    #[must_use]
    pub fn zeroed(num_elements: usize) -> Self {
        Self {
            ep: vec![0; num_elements],
            ef: vec![0; num_elements],
            total_passed: 0,
            total_failed: 0,
        }
    }

    /// Number of elements
    #[must_use]
    pub fn num_elements(&self) -> usize {
        self.ep.len()
    }

    /// Total tests, passing and failing
    #[must_use]
    pub const fn total_tests(&self) -> usize {
        self.total_passed + self.total_failed
    }

    /// Counts for one element
    ///
    /// # Panics
    /// Panics if `element` is out of range.
    #[must_use]
    pub fn counts(&self, element: usize) -> ElementCounts {
        ElementCounts {
            ep: self.ep[element],
            ef: self.ef[element],
        }
    }

    /// Record one test run over its coverage row
    pub fn record(&mut self, row: &[bool], outcome: Outcome) {
        let (target, total) = match outcome {
            Outcome::Pass => (&mut self.ep, &mut self.total_passed),
            Outcome::Fail => (&mut self.ef, &mut self.total_failed),
        };
        *total += 1;
        for (count, &visited) in target.iter_mut().zip(row) {
            *count += usize::from(visited);
        }
    }
}

/// Aggregate a coverage matrix into per-element pass/fail counts.
///
/// Single pass over the rows. A matrix with no tests yields all-zero stats
/// over the matrix's declared element count.
#[must_use]
pub fn aggregate(matrix: &CoverageMatrix) -> ElementStats {
    let mut stats = ElementStats::zeroed(matrix.num_elements());
    for (row, outcome) in matrix.rows() {
        stats.record(row, outcome);
    }
    debug!(
        elements = stats.num_elements(),
        passed = stats.total_passed,
        failed = stats.total_failed,
        "aggregated coverage spectrum"
    );
    stats
}
