//! Dense, tie-aware ranking of suspiciousness scores.
//!
//! Elements are ordered by descending score, stable on the original index.
//! Equal scores share a rank and the next distinct score gets the following
//! integer, so `[0.9, 0.5, 0.5, 0.1]` ranks as `[1, 2, 2, 3]` (never the
//! competition ranking `[1, 2, 2, 4]`).
//!
//! `NaN` scores sort after every real score and are tied with each other, so
//! they always share the largest rank.

use crate::result::{CulpritError, CulpritResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// Dense ranks for a score vector, plus the order they were assigned in
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRanks")]
pub struct RankVector {
    /// Rank per element, index-aligned with the scores (1 = most suspicious)
    ranks: Vec<usize>,
    /// Element indices from most to least suspicious
    order: Vec<usize>,
}

impl RankVector {
    /// Rank per element, index-aligned with the scores
    #[must_use]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Element indices in ranked order; ties keep their original index order
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Rank of one element
    #[must_use]
    pub fn get(&self, element: usize) -> Option<usize> {
        self.ranks.get(element).copied()
    }

    /// Number of ranked elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether there are no ranked elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Largest rank present, `None` when empty
    #[must_use]
    pub fn max_rank(&self) -> Option<usize> {
        self.order.last().map(|&e| self.ranks[e])
    }

    /// Consume into the plain rank vector
    #[must_use]
    pub fn into_ranks(self) -> Vec<usize> {
        self.ranks
    }
}

/// Serialized form of a [`RankVector`], checked before use
#[derive(Debug, Deserialize)]
struct RawRanks {
    ranks: Vec<usize>,
    order: Vec<usize>,
}

impl TryFrom<RawRanks> for RankVector {
    type Error = CulpritError;

    /// `order` must be a permutation of the element indices, and ranks must
    /// be positive and non-decreasing along it.
    fn try_from(raw: RawRanks) -> CulpritResult<Self> {
        if raw.order.len() != raw.ranks.len() {
            return Err(CulpritError::malformed_input(format!(
                "rank order lists {} elements but there are {} ranks",
                raw.order.len(),
                raw.ranks.len()
            )));
        }
        let mut seen = vec![false; raw.ranks.len()];
        let mut previous = 1;
        for &element in &raw.order {
            match seen.get_mut(element) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(CulpritError::malformed_input(format!(
                        "element {element} appears twice in the rank order"
                    )))
                }
                None => {
                    return Err(CulpritError::malformed_input(format!(
                        "element {element} is out of range for {} ranks",
                        raw.ranks.len()
                    )))
                }
            }
            let rank = raw.ranks[element];
            if rank < previous {
                return Err(CulpritError::malformed_input(format!(
                    "rank {rank} of element {element} breaks the rank order"
                )));
            }
            previous = rank;
        }
        Ok(Self {
            ranks: raw.ranks,
            order: raw.order,
        })
    }
}

/// Rank scores densely, most suspicious first.
#[must_use]
pub fn rank(scores: &[f64]) -> RankVector {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));

    let mut ranks = vec![0; scores.len()];
    let mut previous: Option<(usize, f64)> = None;
    for &element in &order {
        let score = scores[element];
        let rank = match previous {
            None => 1,
            Some((prev_rank, prev_score)) if same_score(prev_score, score) => prev_rank,
            Some((prev_rank, _)) => prev_rank + 1,
        };
        ranks[element] = rank;
        previous = Some((rank, score));
    }

    let ranked = RankVector { ranks, order };
    trace!(
        elements = ranked.len(),
        max_rank = ?ranked.max_rank(),
        "ranked scores"
    );
    ranked
}

/// Descending order with every `NaN` after every real number
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

fn same_score(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
