//! Coverage matrix and test outcomes.
//!
//! ## Text format
//!
//! One row per test, whitespace-separated. Every field but the last is a
//! `0`/`1` coverage flag (one per program element); the last field is the
//! outcome marker, `+` for a passing test and `-` for a failing one.
//!
//! ```text
//! 1 0 1 +
//! 0 1 1 +
//! 1 1 0 -
//! ```
//!
//! Blank lines are ignored. Every row must carry the same number of flags.

use crate::result::{read_text, CulpritError, CulpritResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Test passed (`+`)
    Pass,
    /// Test failed (`-`)
    Fail,
}

impl Outcome {
    /// Parse an outcome marker, `+` or `-`
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "+" => Some(Self::Pass),
            "-" => Some(Self::Fail),
            _ => None,
        }
    }

    /// The text marker for this outcome
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Pass => '+',
            Self::Fail => '-',
        }
    }

    /// Check if this is a passing outcome
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Check if this is a failing outcome
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Binary test-by-element coverage matrix with one outcome per test.
///
/// Rows are tests, columns are program elements. The column count is
/// declared by the matrix itself, so a matrix with zero tests still knows
/// how many elements it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct CoverageMatrix {
    num_elements: usize,
    /// Row-major coverage flags, `num_tests * num_elements` long
    cells: Vec<bool>,
    outcomes: Vec<Outcome>,
}

impl CoverageMatrix {
    /// Create a matrix with no tests over `num_elements` elements
    #[must_use]
    pub const fn new(num_elements: usize) -> Self {
        Self {
            num_elements,
            cells: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Build a matrix from in-memory rows.
    ///
    /// # Errors
    /// Returns [`CulpritError::MalformedInput`] if a row's length differs
    /// from `num_elements`. The reported line is the 1-based row index.
    pub fn from_rows<I>(num_elements: usize, rows: I) -> CulpritResult<Self>
    where
        I: IntoIterator<Item = (Vec<bool>, Outcome)>,
    {
        let mut matrix = Self::new(num_elements);
        for (idx, (row, outcome)) in rows.into_iter().enumerate() {
            if row.len() != num_elements {
                return Err(CulpritError::malformed(
                    idx + 1,
                    format!(
                        "expected {num_elements} coverage flags, found {}",
                        row.len()
                    ),
                ));
            }
            matrix.cells.extend_from_slice(&row);
            matrix.outcomes.push(outcome);
        }
        Ok(matrix)
    }

    /// Parse the whitespace-delimited text format described in the module docs.
    ///
    /// # Errors
    /// Returns [`CulpritError::MalformedInput`] on ragged rows, outcome
    /// markers other than `+`/`-`, and coverage flags other than `0`/`1`.
    pub fn parse(text: &str) -> CulpritResult<Self> {
        let mut num_elements: Option<usize> = None;
        let mut cells = Vec::new();
        let mut outcomes = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let Some((marker, flags)) = fields.split_last() else {
                continue;
            };

            let outcome = Outcome::from_marker(marker).ok_or_else(|| {
                CulpritError::malformed(
                    line_no,
                    format!("outcome marker must be '+' or '-', found '{marker}'"),
                )
            })?;

            match num_elements {
                None => num_elements = Some(flags.len()),
                Some(expected) if expected != flags.len() => {
                    return Err(CulpritError::malformed(
                        line_no,
                        format!(
                            "expected {expected} coverage flags, found {}",
                            flags.len()
                        ),
                    ));
                }
                Some(_) => {}
            }

            for flag in flags {
                cells.push(parse_flag(flag, line_no)?);
            }
            outcomes.push(outcome);
        }

        let matrix = Self {
            num_elements: num_elements.unwrap_or(0),
            cells,
            outcomes,
        };
        debug!(
            tests = matrix.num_tests(),
            elements = matrix.num_elements(),
            "parsed coverage matrix"
        );
        Ok(matrix)
    }

    /// Read and parse a matrix file
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or
    /// [`CulpritError::MalformedInput`] if it is not UTF-8 or does not parse.
    pub fn load(path: &Path) -> CulpritResult<Self> {
        let content = read_text(path)?;
        Self::parse(&content)
    }

    /// Number of tests (rows), `T`
    #[must_use]
    pub fn num_tests(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of program elements (columns), `E`
    #[must_use]
    pub const fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Outcome of every test, in row order
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Coverage flags of test `test`
    ///
    /// # Panics
    /// Panics if `test >= num_tests()`.
    #[must_use]
    pub fn row(&self, test: usize) -> &[bool] {
        let start = test * self.num_elements;
        &self.cells[start..start + self.num_elements]
    }

    /// Whether test `test` executed element `element`
    ///
    /// # Panics
    /// Panics if `test >= num_tests()` or `element >= num_elements()`.
    #[must_use]
    pub fn covers(&self, test: usize, element: usize) -> bool {
        self.row(test)[element]
    }

    /// Iterate over `(coverage row, outcome)` pairs in row order
    pub fn rows(&self) -> impl Iterator<Item = (&[bool], Outcome)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .map(move |(test, &outcome)| (self.row(test), outcome))
    }

    /// `(num_tests, num_elements)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_tests(), self.num_elements)
    }
}

/// Serialized form of a [`CoverageMatrix`], checked before use
#[derive(Debug, Deserialize)]
struct RawMatrix {
    num_elements: usize,
    cells: Vec<bool>,
    outcomes: Vec<Outcome>,
}

impl TryFrom<RawMatrix> for CoverageMatrix {
    type Error = CulpritError;

    fn try_from(raw: RawMatrix) -> CulpritResult<Self> {
        let expected = raw.outcomes.len().checked_mul(raw.num_elements);
        if expected != Some(raw.cells.len()) {
            return Err(CulpritError::malformed_input(format!(
                "{} tests x {} elements does not match {} coverage flags",
                raw.outcomes.len(),
                raw.num_elements,
                raw.cells.len()
            )));
        }
        Ok(Self {
            num_elements: raw.num_elements,
            cells: raw.cells,
            outcomes: raw.outcomes,
        })
    }
}

impl FromStr for CoverageMatrix {
    type Err = CulpritError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_flag(flag: &str, line_no: usize) -> CulpritResult<bool> {
    match flag {
        "0" => Ok(false),
        "1" => Ok(true),
        other if other.parse::<i64>().is_ok() => Err(CulpritError::malformed(
            line_no,
            format!("coverage flag must be 0 or 1, found '{other}'"),
        )),
        other => Err(CulpritError::malformed(
            line_no,
            format!("non-numeric coverage flag '{other}'"),
        )),
    }
}
