//! Linear scoring model for global alignment
//!
//! A single match score, a single mismatch score and one gap penalty that is
//! charged per gap position. There is no separate gap-open cost.

use serde::{Deserialize, Serialize};

/// Symbol inserted into an aligned sequence opposite an extra symbol in the other.
pub const GAP: u8 = b'-';

/// Scalar match/mismatch/gap scoring parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringModel {
    /// Score for two identical symbols
    pub match_score: i32,
    /// Score for two different symbols
    pub mismatch_score: i32,
    /// Score added for every symbol aligned against a gap
    pub gap_penalty: i32,
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self {
            match_score: 2,
            mismatch_score: -1,
            gap_penalty: -2,
        }
    }
}

impl ScoringModel {
    pub fn new(match_score: i32, mismatch_score: i32, gap_penalty: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_penalty,
        }
    }

    /// Score of aligning `a` against `b`, widened to the accumulator type.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i64 {
        if a == b {
            i64::from(self.match_score)
        } else {
            i64::from(self.mismatch_score)
        }
    }

    #[inline]
    pub fn gap_penalty(&self) -> i64 {
        i64::from(self.gap_penalty)
    }

    /// Score of one aligned column, either side possibly a gap.
    ///
    /// Two gaps in the same column never come out of a global traceback, so
    /// that case is scored as `None`.
    pub fn column_score(&self, a: u8, b: u8) -> Option<i64> {
        match (a == GAP, b == GAP) {
            (true, true) => None,
            (true, false) | (false, true) => Some(self.gap_penalty()),
            (false, false) => Some(self.score(a, b)),
        }
    }

    /// Whether the parameters follow the usual ordering
    /// (`match > mismatch` and `match > gap`). Not enforced anywhere.
    pub fn is_conventional(&self) -> bool {
        self.match_score > self.mismatch_score && self.match_score > self.gap_penalty
    }
}
