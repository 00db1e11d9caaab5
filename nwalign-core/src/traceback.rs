//! Traceback through a filled [`AlignmentMatrix`]
//!
//! Walks from `(n, m)` back to `(0, 0)`, at each cell taking the first move in
//! [`Move::PRIORITY`] whose predecessor explains the cell's score. Several
//! optimal alignments may exist; the fixed priority picks exactly one of them.

use crate::error::{AlignError, Result};
use crate::matrix::AlignmentMatrix;
use crate::scoring::{ScoringModel, GAP};

/// A single step of the traceback path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Symbol of seq1 aligned with symbol of seq2
    Diagonal,
    /// Symbol of seq1 aligned with a gap in seq2
    Up,
    /// Symbol of seq2 aligned with a gap in seq1
    Left,
}

impl Move {
    /// Tie-break order: diagonal before up, up before left.
    pub const PRIORITY: [Move; 3] = [Move::Diagonal, Move::Up, Move::Left];
}

/// One optimal global alignment: two equal-length gapped sequences and the score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub seq1: Vec<u8>,
    pub seq2: Vec<u8>,
    pub score: i64,
}

impl AlignedPair {
    /// Number of aligned columns
    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// Iterate over aligned columns as `(seq1 symbol, seq2 symbol)`
    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.seq1.iter().copied().zip(self.seq2.iter().copied())
    }

    /// Recompute the score column by column.
    ///
    /// Returns [`AlignError::MalformedAlignment`] for unequal lengths or a
    /// column with two gaps.
    pub fn rescore(&self, scoring: &ScoringModel) -> Result<i64> {
        if self.seq1.len() != self.seq2.len() {
            return Err(AlignError::malformed(format!(
                "aligned sequences differ in length ({} vs {})",
                self.seq1.len(),
                self.seq2.len()
            )));
        }
        self.columns().enumerate().try_fold(0i64, |total, (k, (a, b))| {
            scoring
                .column_score(a, b)
                .map(|s| total + s)
                .ok_or_else(|| AlignError::malformed(format!("gap aligned to gap at column {k}")))
        })
    }
}

/// Reconstruct one optimal alignment from `matrix`.
///
/// `matrix` must have been built from `seq1`, `seq2` and `scoring`.
pub fn traceback(
    matrix: &AlignmentMatrix,
    seq1: &[u8],
    seq2: &[u8],
    scoring: &ScoringModel,
) -> Result<AlignedPair> {
    if matrix.rows() != seq1.len() + 1 || matrix.cols() != seq2.len() + 1 {
        return Err(AlignError::malformed(format!(
            "matrix is {}x{} but sequences have lengths {} and {}",
            matrix.rows(),
            matrix.cols(),
            seq1.len(),
            seq2.len()
        )));
    }

    let gap = scoring.gap_penalty();
    let capacity = seq1.len() + seq2.len();
    let mut out1 = Vec::with_capacity(capacity);
    let mut out2 = Vec::with_capacity(capacity);

    let (mut i, mut j) = (seq1.len(), seq2.len());
    while i > 0 || j > 0 {
        let current = matrix.get(i, j);
        let step = Move::PRIORITY.into_iter().find(|mv| match mv {
            Move::Diagonal => {
                i > 0 && j > 0
                    && matrix.get(i - 1, j - 1) + scoring.score(seq1[i - 1], seq2[j - 1]) == current
            }
            Move::Up => i > 0 && matrix.get(i - 1, j) + gap == current,
            Move::Left => j > 0 && matrix.get(i, j - 1) + gap == current,
        });

        match step {
            Some(Move::Diagonal) => {
                out1.push(seq1[i - 1]);
                out2.push(seq2[j - 1]);
                i -= 1;
                j -= 1;
            }
            Some(Move::Up) => {
                out1.push(seq1[i - 1]);
                out2.push(GAP);
                i -= 1;
            }
            Some(Move::Left) => {
                out1.push(GAP);
                out2.push(seq2[j - 1]);
                j -= 1;
            }
            None => {
                return Err(AlignError::malformed(format!(
                    "no predecessor explains score {current} at cell ({i}, {j})"
                )));
            }
        }
    }

    out1.reverse();
    out2.reverse();

    Ok(AlignedPair {
        seq1: out1,
        seq2: out2,
        score: matrix.score(),
    })
}
