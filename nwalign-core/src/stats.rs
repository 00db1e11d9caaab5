//! Statistics derived from an aligned pair

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AlignError, Result};
use crate::scoring::GAP;
use crate::traceback::AlignedPair;

/// Match, mismatch and gap counts of one alignment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStatistics {
    /// Number of aligned columns
    pub length: usize,
    pub matches: usize,
    /// Columns with two different non-gap symbols
    pub mismatches: usize,
    /// Gap symbols in the first aligned sequence
    pub gaps_seq1: usize,
    /// Gap symbols in the second aligned sequence
    pub gaps_seq2: usize,
    pub total_gaps: usize,
    /// `100 * matches / length`
    pub identity_percent: f64,
    /// `100 * total_gaps / (2 * length)`: gaps over all symbol slots of both rows
    pub gap_percentage: f64,
}

impl AlignmentStatistics {
    /// Count columns of `pair` in a single pass.
    ///
    /// Fails with [`AlignError::MalformedAlignment`] if the two rows differ
    /// in length, are empty, or have a column with two gaps.
    pub fn from_aligned(pair: &AlignedPair) -> Result<Self> {
        Self::from_rows(&pair.seq1, &pair.seq2)
    }

    pub fn from_rows(aligned1: &[u8], aligned2: &[u8]) -> Result<Self> {
        if aligned1.len() != aligned2.len() {
            return Err(AlignError::malformed(format!(
                "aligned sequences differ in length ({} vs {})",
                aligned1.len(),
                aligned2.len()
            )));
        }
        if aligned1.is_empty() {
            return Err(AlignError::malformed("alignment has no columns"));
        }

        let mut matches = 0;
        let mut mismatches = 0;
        let mut gaps_seq1 = 0;
        let mut gaps_seq2 = 0;

        for (k, (&a, &b)) in aligned1.iter().zip(aligned2).enumerate() {
            match (a == GAP, b == GAP) {
                (true, true) => {
                    return Err(AlignError::malformed(format!(
                        "gap aligned to gap at column {k}"
                    )));
                }
                (true, false) => gaps_seq1 += 1,
                (false, true) => gaps_seq2 += 1,
                (false, false) if a == b => matches += 1,
                (false, false) => mismatches += 1,
            }
        }

        let length = aligned1.len();
        let total_gaps = gaps_seq1 + gaps_seq2;

        Ok(Self {
            length,
            matches,
            mismatches,
            gaps_seq1,
            gaps_seq2,
            total_gaps,
            identity_percent: 100.0 * matches as f64 / length as f64,
            gap_percentage: 100.0 * total_gaps as f64 / (2 * length) as f64,
        })
    }

    /// Share of columns that match; same value as `identity_percent`.
    pub fn match_percentage(&self) -> f64 {
        self.identity_percent
    }

    pub fn mismatch_percentage(&self) -> f64 {
        100.0 * self.mismatches as f64 / self.length as f64
    }

    pub fn identity_tier(&self) -> IdentityTier {
        IdentityTier::classify(self.identity_percent)
    }
}

/// Coarse biological reading of an identity percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityTier {
    NearlyIdentical,
    HighlySimilar,
    ModeratelySimilar,
    Similar,
    WeakSimilarity,
    HighlyDivergent,
}

impl IdentityTier {
    pub fn classify(identity_percent: f64) -> Self {
        match identity_percent {
            x if x >= 95.0 => Self::NearlyIdentical,
            x if x >= 85.0 => Self::HighlySimilar,
            x if x >= 75.0 => Self::ModeratelySimilar,
            x if x >= 60.0 => Self::Similar,
            x if x >= 40.0 => Self::WeakSimilarity,
            _ => Self::HighlyDivergent,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NearlyIdentical => "Same species or very close relatives",
            Self::HighlySimilar => "Same genus, close species",
            Self::ModeratelySimilar => "Related species, same family",
            Self::Similar => "Different families but same order",
            Self::WeakSimilarity => "Distant relatives",
            Self::HighlyDivergent => "Very distant relatives or unrelated sequences",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NearlyIdentical => "NEARLY IDENTICAL",
            Self::HighlySimilar => "HIGHLY SIMILAR",
            Self::ModeratelySimilar => "MODERATELY SIMILAR",
            Self::Similar => "SIMILAR",
            Self::WeakSimilarity => "WEAK SIMILARITY",
            Self::HighlyDivergent => "HIGHLY DIVERGENT",
        }
    }
}

impl fmt::Display for IdentityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.description())
    }
}
