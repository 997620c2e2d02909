//! Ranked report assembly
//!
//! Pairs each element description with its rank and score, orders the lines
//! from most to least suspicious and applies an optional [`OutputLimit`].

use crate::rank::RankVector;
use crate::result::{CulpritError, CulpritResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which ranked lines to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputLimit {
    /// Every element
    #[default]
    All,
    /// The first `n` lines in rank order
    Top(usize),
    /// Every line whose rank is at most `r`
    MaxRank(usize),
}

impl OutputLimit {
    /// Build a limit from the two optional selectors.
    ///
    /// # Errors
    /// Returns [`CulpritError::ConflictingLimit`] if both are given or
    /// either is zero.
    pub fn from_options(top: Option<usize>, max_rank: Option<usize>) -> CulpritResult<Self> {
        match (top, max_rank) {
            (Some(_), Some(_)) => Err(CulpritError::conflicting_limit(
                "do not specify a rank and a number of outputs together",
            )),
            (Some(0), None) => Err(CulpritError::conflicting_limit(
                "number of outputs has to be positive",
            )),
            (None, Some(0)) => Err(CulpritError::conflicting_limit("rank has to be positive")),
            (Some(n), None) => Ok(Self::Top(n)),
            (None, Some(r)) => Ok(Self::MaxRank(r)),
            (None, None) => Ok(Self::All),
        }
    }

    /// Number of leading lines of `lines` this limit keeps.
    ///
    /// `lines` must already be in rank order.
    #[must_use]
    pub fn cutoff(self, lines: &[ReportLine]) -> usize {
        match self {
            Self::All => lines.len(),
            Self::Top(n) => n.min(lines.len()),
            Self::MaxRank(max) => lines.partition_point(|line| line.rank <= max),
        }
    }
}

/// One annotated element in a ranked report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Element index (matrix column)
    pub element: usize,
    /// Dense rank, 1 = most suspicious
    pub rank: usize,
    /// Suspiciousness score (`NaN` when undefined)
    pub score: f64,
    /// Element description from the spectra file
    pub description: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rank: {} | Suspiciousness: {:.4} | {}",
            self.rank, self.score, self.description
        )
    }
}

/// Assemble ranked report lines.
///
/// Lines come out in ascending rank; inside a tie group they keep the order
/// the ranker assigned (original element order).
///
/// # Errors
/// Returns [`CulpritError::MalformedInput`] if the descriptions, scores and
/// ranks do not all describe the same number of elements.
pub fn assemble(
    descriptions: &[String],
    scores: &[f64],
    ranks: &RankVector,
    limit: OutputLimit,
) -> CulpritResult<Vec<ReportLine>> {
    if descriptions.len() != scores.len() {
        return Err(CulpritError::malformed_input(format!(
            "spectra lists {} elements but the matrix has {}",
            descriptions.len(),
            scores.len()
        )));
    }
    if ranks.len() != scores.len() {
        return Err(CulpritError::malformed_input(format!(
            "{} ranks for {} scores",
            ranks.len(),
            scores.len()
        )));
    }

    let mut lines: Vec<ReportLine> = ranks
        .order()
        .iter()
        .map(|&element| ReportLine {
            element,
            rank: ranks.ranks()[element],
            score: scores[element],
            description: descriptions[element].clone(),
        })
        .collect();
    lines.truncate(limit.cutoff(&lines));
    Ok(lines)
}

/// Render report lines as text, one per line
#[must_use]
pub fn render_report_text(lines: &[ReportLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

/// Render report lines as a pretty JSON array (`NaN` scores become `null`)
#[must_use]
pub fn render_report_json(lines: &[ReportLine]) -> String {
    serde_json::to_string_pretty(lines).unwrap_or_else(|_| "[]".to_string())
}
