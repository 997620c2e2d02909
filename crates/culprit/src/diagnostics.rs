//! Dataset diagnostics
//!
//! Technique-independent statistics over a coverage matrix, useful to judge
//! whether a dataset is amenable to fault localization at all (e.g. a matrix
//! with no failing tests, or one where failing tests visit almost nothing).
//!
//! Counts are plain integers. Every ratio or average whose denominator is
//! zero (no tests, no elements, or an empty pass/fail subset) is `NaN`; none
//! of these functions fail.
//!
//! The `percentage_*` and `coverage_*` values are fractions in `[0, 1]`.

use crate::matrix::{CoverageMatrix, Outcome};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Failing tests
#[must_use]
pub fn num_failing_tests(matrix: &CoverageMatrix) -> usize {
    count_outcomes(matrix, Outcome::Fail)
}

/// Passing tests
#[must_use]
pub fn num_passing_tests(matrix: &CoverageMatrix) -> usize {
    count_outcomes(matrix, Outcome::Pass)
}

/// All tests, `T`
#[must_use]
pub fn num_tests(matrix: &CoverageMatrix) -> usize {
    matrix.num_tests()
}

/// Fraction of tests that fail
#[must_use]
pub fn percentage_failing_tests(matrix: &CoverageMatrix) -> f64 {
    fraction(num_failing_tests(matrix), num_tests(matrix))
}

/// Fraction of tests that pass
#[must_use]
pub fn percentage_passing_tests(matrix: &CoverageMatrix) -> f64 {
    fraction(num_passing_tests(matrix), num_tests(matrix))
}

/// All elements, `E`
#[must_use]
pub fn num_elements(matrix: &CoverageMatrix) -> usize {
    matrix.num_elements()
}

/// Elements executed by at least one test
#[must_use]
pub fn num_visited_elements(matrix: &CoverageMatrix) -> usize {
    count_visited(matrix, |_| true)
}

/// Elements executed by no test
#[must_use]
pub fn num_not_visited_elements(matrix: &CoverageMatrix) -> usize {
    num_elements(matrix) - num_visited_elements(matrix)
}

/// Sum of all matrix entries
#[must_use]
pub fn num_visitations(matrix: &CoverageMatrix) -> usize {
    visitations(matrix, |_| true)
}

/// Visitations over the `T * E` cells of the matrix
#[must_use]
pub fn sparsity(matrix: &CoverageMatrix) -> f64 {
    let (tests, elements) = matrix.shape();
    fraction(num_visitations(matrix), tests * elements)
}

/// Fraction of elements executed by at least one test
#[must_use]
pub fn coverage(matrix: &CoverageMatrix) -> f64 {
    fraction(num_visited_elements(matrix), num_elements(matrix))
}

/// Fraction of all elements executed by at least one passing test
#[must_use]
pub fn coverage_passing_tests(matrix: &CoverageMatrix) -> f64 {
    fraction(count_visited(matrix, Outcome::is_pass), num_elements(matrix))
}

/// Fraction of all elements executed by at least one failing test
#[must_use]
pub fn coverage_failing_tests(matrix: &CoverageMatrix) -> f64 {
    fraction(count_visited(matrix, Outcome::is_fail), num_elements(matrix))
}

/// Mean number of elements executed per test
#[must_use]
pub fn avg_num_visited_elements(matrix: &CoverageMatrix) -> f64 {
    fraction(num_visitations(matrix), num_tests(matrix))
}

/// Mean number of elements executed per passing test
#[must_use]
pub fn avg_num_pass_visited_elements(matrix: &CoverageMatrix) -> f64 {
    fraction(
        visitations(matrix, Outcome::is_pass),
        num_passing_tests(matrix),
    )
}

/// Mean number of elements executed per failing test
#[must_use]
pub fn avg_num_fail_visited_elements(matrix: &CoverageMatrix) -> f64 {
    fraction(
        visitations(matrix, Outcome::is_fail),
        num_failing_tests(matrix),
    )
}

/// Every diagnostic for one matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Tests, `T`
    pub num_tests: usize,
    /// Passing tests
    pub num_passing_tests: usize,
    /// Failing tests
    pub num_failing_tests: usize,
    /// Fraction of tests that pass
    pub percentage_passing_tests: f64,
    /// Fraction of tests that fail
    pub percentage_failing_tests: f64,
    /// Elements, `E`
    pub num_elements: usize,
    /// Elements executed by at least one test
    pub num_visited_elements: usize,
    /// Elements executed by no test
    pub num_not_visited_elements: usize,
    /// Sum of all matrix entries
    pub num_visitations: usize,
    /// Visitations over `T * E`
    pub sparsity: f64,
    /// Fraction of elements executed by any test
    pub coverage: f64,
    /// Fraction of elements executed by a passing test
    pub coverage_passing_tests: f64,
    /// Fraction of elements executed by a failing test
    pub coverage_failing_tests: f64,
    /// Mean elements executed per test
    pub avg_num_visited_elements: f64,
    /// Mean elements executed per passing test
    pub avg_num_pass_visited_elements: f64,
    /// Mean elements executed per failing test
    pub avg_num_fail_visited_elements: f64,
}

impl DiagnosticsReport {
    /// Compute every diagnostic for `matrix`
    #[must_use]
    pub fn from_matrix(matrix: &CoverageMatrix) -> Self {
        Self {
            num_tests: num_tests(matrix),
            num_passing_tests: num_passing_tests(matrix),
            num_failing_tests: num_failing_tests(matrix),
            percentage_passing_tests: percentage_passing_tests(matrix),
            percentage_failing_tests: percentage_failing_tests(matrix),
            num_elements: num_elements(matrix),
            num_visited_elements: num_visited_elements(matrix),
            num_not_visited_elements: num_not_visited_elements(matrix),
            num_visitations: num_visitations(matrix),
            sparsity: sparsity(matrix),
            coverage: coverage(matrix),
            coverage_passing_tests: coverage_passing_tests(matrix),
            coverage_failing_tests: coverage_failing_tests(matrix),
            avg_num_visited_elements: avg_num_visited_elements(matrix),
            avg_num_pass_visited_elements: avg_num_pass_visited_elements(matrix),
            avg_num_fail_visited_elements: avg_num_fail_visited_elements(matrix),
        }
    }
}

/// Render diagnostics as labelled text, one statistic per line
#[must_use]
pub fn render_diagnostics_report(report: &DiagnosticsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Matrix shape: {} tests x {} elements",
        report.num_tests, report.num_elements
    );
    let counts = [
        ("Failing tests", report.num_failing_tests),
        ("Passing tests", report.num_passing_tests),
        ("Tests", report.num_tests),
        ("Elements", report.num_elements),
        ("Visited elements", report.num_visited_elements),
        ("Not visited elements", report.num_not_visited_elements),
        ("Visitations", report.num_visitations),
    ];
    for (label, value) in counts {
        let _ = writeln!(out, "{label:<32}{value}");
    }
    let ratios = [
        ("Sparsity", report.sparsity),
        ("Passing tests (fraction)", report.percentage_passing_tests),
        ("Failing tests (fraction)", report.percentage_failing_tests),
        ("Coverage", report.coverage),
        ("Coverage by passing tests", report.coverage_passing_tests),
        ("Coverage by failing tests", report.coverage_failing_tests),
        ("Avg visited elements", report.avg_num_visited_elements),
        ("Avg visited by passing tests", report.avg_num_pass_visited_elements),
        ("Avg visited by failing tests", report.avg_num_fail_visited_elements),
    ];
    for (label, value) in ratios {
        let _ = writeln!(out, "{label:<32}{value:.4}");
    }
    out
}

/// Render diagnostics as pretty JSON (`NaN` becomes `null`)
#[must_use]
pub fn render_diagnostics_json(report: &DiagnosticsReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

fn count_outcomes(matrix: &CoverageMatrix, wanted: Outcome) -> usize {
    matrix.outcomes().iter().filter(|&&o| o == wanted).count()
}

/// Columns executed by at least one test whose outcome passes `include`
fn count_visited(matrix: &CoverageMatrix, include: impl Fn(Outcome) -> bool) -> usize {
    let mut visited = vec![false; matrix.num_elements()];
    for (row, outcome) in matrix.rows() {
        if !include(outcome) {
            continue;
        }
        for (seen, &cell) in visited.iter_mut().zip(row) {
            *seen |= cell;
        }
    }
    visited.into_iter().filter(|&v| v).count()
}

/// Set cells in the rows whose outcome passes `include`
fn visitations(matrix: &CoverageMatrix, include: impl Fn(Outcome) -> bool) -> usize {
    matrix
        .rows()
        .filter(|&(_, outcome)| include(outcome))
        .map(|(row, _)| row.iter().filter(|&&cell| cell).count())
        .sum()
}

fn fraction(num: usize, den: usize) -> f64 {
    if den == 0 {
        f64::NAN
    } else {
        num as f64 / den as f64
    }
}
