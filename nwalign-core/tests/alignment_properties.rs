use nwalign_core::*;
use proptest::prelude::*;

fn dna(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop::sample::select(b"ACGT".to_vec()), 1..=max_len)
}

fn scoring_models() -> impl Strategy<Value = ScoringModel> {
    (-5i32..=5, -5i32..=5, -5i32..=5).prop_map(|(m, x, g)| ScoringModel::new(m, x, g))
}

#[test]
fn identical_atgc() {
    let result = align(b"ATGC", b"ATGC", &ScoringModel::default()).unwrap();
    assert_eq!(result.score, 8);
    assert_eq!(result.statistics.identity_percent, 100.0);
    assert_eq!(result.statistics.matches, 4);
    assert_eq!(result.statistics.mismatches, 0);
    assert_eq!(result.statistics.total_gaps, 0);
}

#[test]
fn gattaca_exact_alignment() {
    // Diagonal-first traceback keeps both sequences ungapped here
    let result = align(b"GATTACA", b"GCATGCU", &ScoringModel::default()).unwrap();
    assert_eq!(result.statistics.length, 7);
    assert_eq!(result.aligned_seq1, "GATTACA");
    assert_eq!(result.aligned_seq2, "GCATGCU");
    assert_eq!(result.score, 2);
    assert_eq!(result.statistics.matches, 3);
    assert_eq!(result.statistics.mismatches, 4);
}

#[test]
fn atgc_against_atg() {
    let result = align(b"ATGC", b"ATG", &ScoringModel::default()).unwrap();
    assert_eq!(result.statistics.total_gaps, 1);
    assert!(result.statistics.identity_percent < 100.0);
    assert_eq!(result.statistics.length, 4);
    assert_eq!(result.aligned_seq2, "ATG-");
}

#[test]
fn empty_sequence_is_invalid_input() {
    let err = align(b"", b"ATGC", &ScoringModel::default()).unwrap_err();
    assert!(matches!(err, AlignError::InvalidInput(_)));
}

#[test]
fn tie_break_is_deterministic() {
    let scoring = ScoringModel::default();
    let first = align(b"AAGT", b"AGT", &scoring).unwrap();
    for _ in 0..5 {
        assert_eq!(align(b"AAGT", b"AGT", &scoring).unwrap(), first);
    }
    // Diagonal is taken whenever it explains the cell, so the lone gap
    // lands as far left as possible.
    assert_eq!(first.aligned_seq1, "AAGT");
    assert_eq!(first.aligned_seq2, "-AGT");
}

#[test]
fn protein_alphabet() {
    let result = align(b"MKVLAAGIV", b"MKVAGIVL", &ScoringModel::default()).unwrap();
    assert_eq!(result.rescore(&ScoringModel::default()).unwrap(), result.score);
    assert!(result.statistics.matches >= 6);
}

proptest! {
    #[test]
    fn self_alignment_is_perfect(seq in dna(64)) {
        let result = align(&seq, &seq, &ScoringModel::default()).unwrap();
        let expected = String::from_utf8(seq.clone()).unwrap();
        prop_assert_eq!(result.statistics.identity_percent, 100.0);
        prop_assert_eq!(result.statistics.mismatches, 0);
        prop_assert_eq!(result.statistics.total_gaps, 0);
        prop_assert_eq!(&result.aligned_seq1, &expected);
        prop_assert_eq!(&result.aligned_seq2, &expected);
    }

    #[test]
    fn column_counts_add_up(a in dna(48), b in dna(48), scoring in scoring_models()) {
        let result = align(&a, &b, &scoring).unwrap();
        let stats = &result.statistics;
        prop_assert_eq!(result.aligned_seq1.len(), stats.length);
        prop_assert_eq!(result.aligned_seq2.len(), stats.length);

        let single_gap_columns = result
            .aligned_seq1
            .bytes()
            .zip(result.aligned_seq2.bytes())
            .filter(|&(x, y)| (x == GAP) != (y == GAP))
            .count();
        prop_assert_eq!(single_gap_columns, stats.total_gaps);
        prop_assert_eq!(stats.matches + stats.mismatches + single_gap_columns, stats.length);

        // Removing gaps gives back the inputs
        let ungapped1: Vec<u8> = result.aligned_seq1.bytes().filter(|&c| c != GAP).collect();
        let ungapped2: Vec<u8> = result.aligned_seq2.bytes().filter(|&c| c != GAP).collect();
        prop_assert_eq!(ungapped1, a);
        prop_assert_eq!(ungapped2, b);
    }

    #[test]
    fn traceback_is_sound(a in dna(48), b in dna(48), scoring in scoring_models()) {
        let result = align(&a, &b, &scoring).unwrap();
        prop_assert_eq!(result.rescore(&scoring).unwrap(), result.score);
    }

    #[test]
    fn score_is_symmetric(a in dna(48), b in dna(48), scoring in scoring_models()) {
        let forward = align(&a, &b, &scoring).unwrap();
        let backward = align(&b, &a, &scoring).unwrap();
        prop_assert_eq!(forward.score, backward.score);
    }

    #[test]
    fn score_only_agrees_with_full_matrix(a in dna(64), b in dna(64), scoring in scoring_models()) {
        let full = AlignmentMatrix::build(&a, &b, &scoring).unwrap().score();
        prop_assert_eq!(score_only(&a, &b, &scoring).unwrap(), full);
    }

    #[test]
    fn full_i32_parameter_range_is_exact(
        a in dna(24),
        b in dna(24),
        (m, x, g) in (any::<i32>(), any::<i32>(), any::<i32>()),
    ) {
        let scoring = ScoringModel::new(m, x, g);
        let result = align(&a, &b, &scoring).unwrap();
        prop_assert_eq!(result.rescore(&scoring).unwrap(), result.score);
        prop_assert_eq!(score_only(&a, &b, &scoring).unwrap(), result.score);
    }

    #[test]
    fn gap_percentage_uses_both_rows(a in dna(32), b in dna(32)) {
        let stats = align(&a, &b, &ScoringModel::default()).unwrap().statistics;
        let expected = 100.0 * stats.total_gaps as f64 / (2 * stats.length) as f64;
        prop_assert!((stats.gap_percentage - expected).abs() < 1e-9);
    }
}
