//! Dynamic-programming matrix for linear-gap global alignment
//!
//! The matrix is stored as one flat, pre-sized buffer in row-major order.
//! Cell `(i, j)` holds the best score for aligning the first `i` symbols of
//! `seq1` with the first `j` symbols of `seq2`.
//!
//! When only the optimal score is needed, [`score_only`] runs the same
//! recurrence while keeping two rows, in `O(min(n, m))` memory.
//!
//! Scoring parameters are `i32`; every cell accumulates in `i64`.

use crate::error::{AlignError, Result};
use crate::scoring::{ScoringModel, GAP};

/// Filled `(n + 1) x (m + 1)` score table for one alignment call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl AlignmentMatrix {
    /// Fill the matrix for `seq1` (rows) against `seq2` (columns).
    pub fn build(seq1: &[u8], seq2: &[u8], scoring: &ScoringModel) -> Result<Self> {
        Self::build_with_limit(seq1, seq2, scoring, None)
    }

    /// Like [`AlignmentMatrix::build`], but refuses to allocate more than
    /// `max_cells` cells.
    pub fn build_with_limit(
        seq1: &[u8],
        seq2: &[u8],
        scoring: &ScoringModel,
        max_cells: Option<usize>,
    ) -> Result<Self> {
        validate_inputs(seq1, seq2)?;

        let rows = seq1.len() + 1;
        let cols = seq2.len() + 1;
        let total = cell_count(seq1.len(), seq2.len()).ok_or(AlignError::MatrixTooLarge {
            rows,
            cols,
            limit: usize::MAX,
        })?;
        if let Some(limit) = max_cells {
            if total > limit {
                return Err(AlignError::MatrixTooLarge { rows, cols, limit });
            }
        }

        log::debug!(
            "Filling {}x{} alignment matrix ({} cells, ~{} bytes)",
            rows,
            cols,
            total,
            total * std::mem::size_of::<i64>()
        );

        let gap = scoring.gap_penalty();
        let mut cells = vec![0i64; total];

        // Row 0: a prefix of seq2 aligned entirely against gaps
        for (j, cell) in cells[..cols].iter_mut().enumerate() {
            *cell = j as i64 * gap;
        }

        for i in 1..rows {
            let a = seq1[i - 1];
            let (above, rest) = cells.split_at_mut(i * cols);
            let prev = &above[(i - 1) * cols..];
            let cur = &mut rest[..cols];

            cur[0] = i as i64 * gap;
            for j in 1..cols {
                let diagonal = prev[j - 1] + scoring.score(a, seq2[j - 1]);
                let up = prev[j] + gap;
                let left = cur[j - 1] + gap;
                cur[j] = diagonal.max(up).max(left);
            }
        }

        Ok(Self { rows, cols, cells })
    }

    /// Number of rows, `len(seq1) + 1`
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `len(seq2) + 1`
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Score stored at `(i, j)`.
    ///
    /// # Panics
    /// If `i >= rows()` or `j >= cols()`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        self.cells[i * self.cols + j]
    }

    /// One full row of the matrix
    pub fn row(&self, i: usize) -> &[i64] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// Optimal global alignment score, the bottom-right cell.
    pub fn score(&self) -> i64 {
        self.cells[self.cells.len() - 1]
    }

    /// Approximate memory cost of the full matrix for sequences of length `n` and `m`.
    pub fn estimated_bytes(n: usize, m: usize) -> Option<usize> {
        cell_count(n, m)?.checked_mul(std::mem::size_of::<i64>())
    }
}

/// Optimal global score computed with two rows instead of the full matrix.
///
/// Uses the shorter sequence for the row width; the global score does not
/// depend on which sequence indexes rows.
pub fn score_only(seq1: &[u8], seq2: &[u8], scoring: &ScoringModel) -> Result<i64> {
    validate_inputs(seq1, seq2)?;

    let (outer, inner) = if seq2.len() <= seq1.len() {
        (seq1, seq2)
    } else {
        (seq2, seq1)
    };
    let gap = scoring.gap_penalty();

    let mut prev: Vec<i64> = (0..=inner.len()).map(|j| j as i64 * gap).collect();
    let mut cur = vec![0i64; inner.len() + 1];

    for (i, &a) in outer.iter().enumerate() {
        cur[0] = (i as i64 + 1) * gap;
        for j in 1..=inner.len() {
            let diagonal = prev[j - 1] + scoring.score(a, inner[j - 1]);
            let up = prev[j] + gap;
            let left = cur[j - 1] + gap;
            cur[j] = diagonal.max(up).max(left);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    Ok(prev[inner.len()])
}

/// Reject inputs the engine cannot align.
pub(crate) fn validate_inputs(seq1: &[u8], seq2: &[u8]) -> Result<()> {
    if seq1.is_empty() || seq2.is_empty() {
        return Err(AlignError::invalid_input(format!(
            "cannot align empty sequence (lengths {} and {})",
            seq1.len(),
            seq2.len()
        )));
    }
    for (name, seq) in [("seq1", seq1), ("seq2", seq2)] {
        if let Some(pos) = seq.iter().position(|&b| b == GAP) {
            return Err(AlignError::invalid_input(format!(
                "{name} contains the gap symbol '-' at position {pos}"
            )));
        }
    }
    Ok(())
}

fn cell_count(n: usize, m: usize) -> Option<usize> {
    n.checked_add(1)?.checked_mul(m.checked_add(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_initialization() {
        let scoring = ScoringModel::default();
        let matrix = AlignmentMatrix::build(b"GATTACA", b"GCAT", &scoring).unwrap();

        assert_eq!(matrix.rows(), 8);
        assert_eq!(matrix.cols(), 5);
        assert_eq!(matrix.get(0, 0), 0);
        for i in 1..matrix.rows() {
            assert_eq!(matrix.get(i, 0), -2 * i as i64);
        }
        for j in 1..matrix.cols() {
            assert_eq!(matrix.get(0, j), -2 * j as i64);
        }
    }

    #[test]
    fn test_recurrence_small_case() {
        // seq1 = "AC", seq2 = "A", match 2 / mismatch -1 / gap -2
        //        -   A
        //   -    0  -2
        //   A   -2   2
        //   C   -4   0
        let scoring = ScoringModel::default();
        let matrix = AlignmentMatrix::build(b"AC", b"A", &scoring).unwrap();

        assert_eq!(matrix.row(0), &[0, -2]);
        assert_eq!(matrix.row(1), &[-2, 2]);
        assert_eq!(matrix.row(2), &[-4, 0]);
        assert_eq!(matrix.score(), 0);
    }

    #[test]
    fn test_identical_sequences_score() {
        let scoring = ScoringModel::default();
        let matrix = AlignmentMatrix::build(b"ATGC", b"ATGC", &scoring).unwrap();
        assert_eq!(matrix.score(), 8);
    }

    #[test]
    fn test_empty_input_rejected() {
        let scoring = ScoringModel::default();
        let err = AlignmentMatrix::build(b"", b"ATGC", &scoring).unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(_)));

        let err = AlignmentMatrix::build(b"ATGC", b"", &scoring).unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(_)));

        assert!(matches!(
            score_only(b"", b"", &scoring),
            Err(AlignError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_gap_symbol_rejected() {
        let scoring = ScoringModel::default();
        let err = AlignmentMatrix::build(b"AT-GC", b"ATGC", &scoring).unwrap_err();
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_cell_limit() {
        let scoring = ScoringModel::default();
        let err = AlignmentMatrix::build_with_limit(b"ATGC", b"ATGC", &scoring, Some(24)).unwrap_err();
        assert_eq!(
            err,
            AlignError::MatrixTooLarge {
                rows: 5,
                cols: 5,
                limit: 24
            }
        );

        let matrix = AlignmentMatrix::build_with_limit(b"ATGC", b"ATGC", &scoring, Some(25)).unwrap();
        assert_eq!(matrix.score(), 8);
    }

    #[test]
    fn test_score_only_matches_full_matrix() {
        let scoring = ScoringModel::default();
        let pairs: [(&[u8], &[u8]); 5] = [
            (b"GATTACA", b"GCATGCU"),
            (b"ATGC", b"ATG"),
            (b"A", b"AAAAAA"),
            (b"ACGTACGTTT", b"TTACG"),
            (b"MKVLAAGIV", b"MKVAGIVL"),
        ];
        for (seq1, seq2) in pairs {
            let full = AlignmentMatrix::build(seq1, seq2, &scoring).unwrap().score();
            assert_eq!(score_only(seq1, seq2, &scoring).unwrap(), full);
        }
    }

    #[test]
    fn test_estimated_bytes() {
        assert_eq!(AlignmentMatrix::estimated_bytes(3, 4), Some(160));
        assert_eq!(AlignmentMatrix::estimated_bytes(usize::MAX, 2), None);
    }

    #[test]
    fn test_large_gap_penalty_does_not_overflow() {
        let scoring = ScoringModel::new(2, -1, -1_500_000_000);
        let matrix = AlignmentMatrix::build(b"AC", b"A", &scoring).unwrap();

        assert_eq!(matrix.get(2, 0), -3_000_000_000);
        assert_eq!(matrix.score(), -1_499_999_998);
        assert_eq!(score_only(b"AC", b"A", &scoring).unwrap(), -1_499_999_998);
    }

    #[test]
    fn test_score_beyond_i32_range() {
        let scoring = ScoringModel::new(100_000, -1, -1);
        let seq = vec![b'A'; 30_000];

        assert_eq!(score_only(&seq, &seq, &scoring).unwrap(), 3_000_000_000);

        let extreme = ScoringModel::new(i32::MAX, i32::MIN, i32::MIN);
        let matrix = AlignmentMatrix::build(b"AAAA", b"AAAA", &extreme).unwrap();
        assert_eq!(matrix.score(), 4 * i64::from(i32::MAX));
    }
}
