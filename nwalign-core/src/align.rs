//! Global pairwise alignment entry points
//!
//! [`align`] runs the whole pipeline for one pair of sequences: matrix fill,
//! traceback and statistics. Every call owns its own buffers, so independent
//! calls can run on different threads without coordination.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{AlignError, Result};
use crate::matrix::{self, AlignmentMatrix};
use crate::scoring::ScoringModel;
use crate::stats::AlignmentStatistics;
use crate::traceback::{self, AlignedPair};

/// Complete result of one global alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub aligned_seq1: String,
    pub aligned_seq2: String,
    pub score: i64,
    #[serde(flatten)]
    pub statistics: AlignmentStatistics,
}

impl AlignmentResult {
    fn from_pair(pair: AlignedPair) -> Result<Self> {
        let statistics = AlignmentStatistics::from_aligned(&pair)?;
        Ok(Self {
            aligned_seq1: bytes_to_string(&pair.seq1),
            aligned_seq2: bytes_to_string(&pair.seq2),
            score: pair.score,
            statistics,
        })
    }

    /// Re-score the aligned strings column by column under `scoring`.
    pub fn rescore(&self, scoring: &ScoringModel) -> Result<i64> {
        self.to_aligned_pair()?.rescore(scoring)
    }

    /// Byte form of the aligned strings.
    ///
    /// Fails with [`AlignError::MalformedAlignment`] if either string holds a
    /// character outside the single-byte range.
    pub fn to_aligned_pair(&self) -> Result<AlignedPair> {
        Ok(AlignedPair {
            seq1: string_to_bytes(&self.aligned_seq1)?,
            seq2: string_to_bytes(&self.aligned_seq2)?,
            score: self.score,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Reusable aligner carrying a scoring model and an optional memory budget
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    scoring: ScoringModel,
    max_cells: Option<usize>,
}

impl Aligner {
    pub fn new(scoring: ScoringModel) -> Self {
        Self {
            scoring,
            max_cells: None,
        }
    }

    /// Refuse full alignments whose matrix would exceed `max_cells` cells.
    /// [`Aligner::score_only`] is not affected.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    pub fn scoring(&self) -> &ScoringModel {
        &self.scoring
    }

    pub fn max_cells(&self) -> Option<usize> {
        self.max_cells
    }

    /// Fill the score matrix without running the traceback.
    pub fn build_matrix(&self, seq1: &[u8], seq2: &[u8]) -> Result<AlignmentMatrix> {
        AlignmentMatrix::build_with_limit(seq1, seq2, &self.scoring, self.max_cells)
    }

    /// Optimal alignment of `seq1` against `seq2`, with statistics.
    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> Result<AlignmentResult> {
        let start = Instant::now();

        let matrix = self.build_matrix(seq1, seq2)?;
        let pair = traceback::traceback(&matrix, seq1, seq2, &self.scoring)?;
        drop(matrix);

        let result = AlignmentResult::from_pair(pair)?;
        log::debug!(
            "Aligned {} x {} symbols in {:.3}s: score {}, identity {:.2}%",
            seq1.len(),
            seq2.len(),
            start.elapsed().as_secs_f64(),
            result.score,
            result.statistics.identity_percent
        );
        Ok(result)
    }

    /// Optimal score only, using two matrix rows.
    pub fn score_only(&self, seq1: &[u8], seq2: &[u8]) -> Result<i64> {
        matrix::score_only(seq1, seq2, &self.scoring)
    }
}

/// Align two sequences under `scoring`.
pub fn align(seq1: &[u8], seq2: &[u8], scoring: &ScoringModel) -> Result<AlignmentResult> {
    Aligner::new(*scoring).align(seq1, seq2)
}

// Symbols are single bytes; map each byte to one char so lengths are preserved.
fn bytes_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn string_to_bytes(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .enumerate()
        .map(|(k, c)| {
            u8::try_from(c)
                .map_err(|_| AlignError::malformed(format!("symbol {c:?} at column {k} is not a single byte")))
        })
        .collect()
}
