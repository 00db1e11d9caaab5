//! One-against-many alignment and cross-alignment summaries

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::align::{Aligner, AlignmentResult};
use crate::error::{AlignError, Result};
use crate::types::Sequence;

/// Outcome of aligning the reference against one candidate
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub candidate_id: String,
    pub outcome: Result<AlignmentResult>,
}

/// Align `reference` against every candidate in parallel.
///
/// Entries come back in candidate order. A failed candidate is reported in
/// its entry and does not stop the others.
pub fn batch_align(reference: &Sequence, candidates: &[Sequence], aligner: &Aligner) -> Vec<BatchEntry> {
    log::info!(
        "Aligning reference {} ({} bp) against {} candidate(s)",
        reference.id,
        reference.len(),
        candidates.len()
    );

    let entries: Vec<BatchEntry> = candidates
        .par_iter()
        .map(|candidate| BatchEntry {
            candidate_id: candidate.id.clone(),
            outcome: aligner.align(reference.as_bytes(), candidate.as_bytes()),
        })
        .collect();

    for (i, entry) in entries.iter().enumerate() {
        match &entry.outcome {
            Ok(result) => log::info!(
                "[{}/{}] {}: score {} | identity {:.2}%",
                i + 1,
                entries.len(),
                entry.candidate_id,
                result.score,
                result.statistics.identity_percent
            ),
            Err(e) => log::warn!("[{}/{}] {}: {}", i + 1, entries.len(), entry.candidate_id, e),
        }
    }

    entries
}

/// Aggregate view over several alignment results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub num_alignments: usize,
    pub avg_identity: f64,
    pub max_identity: f64,
    pub min_identity: f64,
    pub avg_score: f64,
    pub max_score: i64,
    pub min_score: i64,
    pub avg_length: f64,
    pub identities: Vec<f64>,
    pub scores: Vec<i64>,
    pub lengths: Vec<usize>,
}

impl BatchSummary {
    pub fn from_results<'a, I>(results: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a AlignmentResult>,
    {
        let mut identities = Vec::new();
        let mut scores = Vec::new();
        let mut lengths = Vec::new();
        for result in results {
            identities.push(result.statistics.identity_percent);
            scores.push(result.score);
            lengths.push(result.statistics.length);
        }

        if identities.is_empty() {
            return Err(AlignError::invalid_input("no alignment results to summarize"));
        }

        let n = identities.len() as f64;
        Ok(Self {
            num_alignments: identities.len(),
            avg_identity: identities.iter().sum::<f64>() / n,
            max_identity: identities.iter().copied().fold(f64::MIN, f64::max),
            min_identity: identities.iter().copied().fold(f64::MAX, f64::min),
            avg_score: scores.iter().map(|&s| s as f64).sum::<f64>() / n,
            max_score: scores.iter().copied().max().unwrap_or_default(),
            min_score: scores.iter().copied().min().unwrap_or_default(),
            avg_length: lengths.iter().sum::<usize>() as f64 / n,
            identities,
            scores,
            lengths,
        })
    }

    /// Summarize the successful entries of a batch
    pub fn from_entries(entries: &[BatchEntry]) -> Result<Self> {
        Self::from_results(entries.iter().filter_map(|e| e.outcome.as_ref().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringModel;

    fn candidates() -> Vec<Sequence> {
        vec![
            Sequence::new("same", b"ATGC".to_vec()),
            Sequence::new("short", b"ATG".to_vec()),
            Sequence::new("empty", Vec::new()),
            Sequence::new("diverged", b"TACG".to_vec()),
        ]
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let reference = Sequence::new("ref", b"ATGC".to_vec());
        let aligner = Aligner::new(ScoringModel::default());

        let entries = batch_align(&reference, &candidates(), &aligner);

        let ids: Vec<&str> = entries.iter().map(|e| e.candidate_id.as_str()).collect();
        assert_eq!(ids, ["same", "short", "empty", "diverged"]);
        assert_eq!(entries[0].outcome.as_ref().unwrap().score, 8);
        assert_eq!(entries[1].outcome.as_ref().unwrap().score, 4);
        assert!(matches!(entries[2].outcome, Err(AlignError::InvalidInput(_))));
        assert!(entries[3].outcome.is_ok());
    }

    #[test]
    fn test_batch_matches_sequential_alignment() {
        let reference = Sequence::new("ref", b"GATTACAGATTACA".to_vec());
        let aligner = Aligner::new(ScoringModel::default());
        let pool: Vec<Sequence> = (0..16)
            .map(|i| Sequence::new(format!("c{i}"), b"GCATGCUAGATTA"[..(i % 12) + 1].to_vec()))
            .collect();

        let entries = batch_align(&reference, &pool, &aligner);
        for (entry, candidate) in entries.iter().zip(&pool) {
            let expected = aligner.align(reference.as_bytes(), candidate.as_bytes()).unwrap();
            assert_eq!(entry.outcome.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_summary() {
        let reference = Sequence::new("ref", b"ATGC".to_vec());
        let aligner = Aligner::new(ScoringModel::default());
        let entries = batch_align(&reference, &candidates()[..2], &aligner);

        let summary = BatchSummary::from_entries(&entries).unwrap();
        assert_eq!(summary.num_alignments, 2);
        assert_eq!(summary.max_identity, 100.0);
        assert_eq!(summary.min_identity, 75.0);
        assert!((summary.avg_identity - 87.5).abs() < 1e-9);
        assert_eq!(summary.max_score, 8);
        assert_eq!(summary.min_score, 4);
        assert!((summary.avg_score - 6.0).abs() < 1e-9);
        assert!((summary.avg_length - 4.0).abs() < 1e-9);
        assert_eq!(summary.scores, [8, 4]);
    }

    #[test]
    fn test_summary_requires_results() {
        let empty: Vec<AlignmentResult> = Vec::new();
        assert!(BatchSummary::from_results(&empty).is_err());
    }
}
