//! Align command implementation - one pair of sequences, full report

use anyhow::{Context, Result};
use nwalign_core::io::find_fasta_files;
use nwalign_core::{export_results, AlignError, Aligner, AlignmentResult, FastaParser, ReportLabels, Sequence};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CliError;
use crate::ScoringArgs;

/// Where the two input sequences come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignInputs {
    Files { seq1: PathBuf, seq2: PathBuf },
    /// Auto-detect; `None` falls back to the configured data directory
    Directory(Option<PathBuf>),
}

impl AlignInputs {
    pub fn from_args(seq1: Option<PathBuf>, seq2: Option<PathBuf>, data: Option<PathBuf>) -> Self {
        match (seq1, seq2) {
            (Some(seq1), Some(seq2)) => Self::Files { seq1, seq2 },
            _ => Self::Directory(data),
        }
    }

    fn resolve(self, config: &Config) -> Result<(PathBuf, PathBuf)> {
        match self {
            Self::Files { seq1, seq2 } => Ok((seq1, seq2)),
            Self::Directory(dir) => {
                let dir = dir.unwrap_or_else(|| config.general.data_dir.clone());
                detect_pair(&dir)
            }
        }
    }
}

/// First two FASTA files of `dir` in file-name order
pub fn detect_pair(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    if !dir.is_dir() {
        return Err(CliError::directory_not_found(dir.to_path_buf()).into());
    }

    let files = find_fasta_files(dir)
        .with_context(|| format!("Failed to scan {} for FASTA files", dir.display()))?;
    match files.as_slice() {
        [first, second, rest @ ..] => {
            if !rest.is_empty() {
                log::warn!(
                    "Found {} FASTA files in {}, using the first two",
                    files.len(),
                    dir.display()
                );
            }
            Ok((first.clone(), second.clone()))
        }
        _ => Err(CliError::NotEnoughInputs {
            path: dir.to_path_buf(),
            needed: 2,
            found: files.len(),
        }
        .into()),
    }
}

pub fn execute(
    config: &Config,
    inputs: AlignInputs,
    out: Option<PathBuf>,
    base_name: Option<String>,
    scoring: &ScoringArgs,
    score_only: bool,
    no_export: bool,
) -> Result<()> {
    let (path1, path2) = inputs.resolve(config)?;
    let seq1 = read_sequence(&path1)?;
    let seq2 = read_sequence(&path2)?;

    let scoring = scoring.resolve(config.scoring);
    log::info!(
        "Parameters: match={}, mismatch={}, gap={}",
        scoring.match_score,
        scoring.mismatch_score,
        scoring.gap_penalty
    );
    if !scoring.is_conventional() {
        log::warn!("Match score does not exceed mismatch and gap scores; results may be unintuitive");
    }

    let mut aligner = Aligner::new(scoring);
    if let Some(limit) = config.limits.max_cells() {
        aligner = aligner.with_max_cells(limit);
    }

    if score_only {
        let score = aligner
            .score_only(seq1.as_bytes(), seq2.as_bytes())
            .context("Alignment failed")?;
        println!("{}\t{}\t{}", seq1.id, seq2.id, score);
        return Ok(());
    }

    let result = match aligner.align(seq1.as_bytes(), seq2.as_bytes()) {
        Ok(result) => result,
        Err(e @ AlignError::MatrixTooLarge { .. }) => {
            return Err(e).context("Sequences too long for a full alignment; rerun with --score-only or raise limits.max_matrix_cells");
        }
        Err(e) => return Err(e).context("Alignment failed"),
    };

    println!("{}", summary(&result, &seq1, &seq2));

    if no_export {
        return Ok(());
    }

    let out_dir = out.unwrap_or_else(|| config.output.directory.clone());
    let base_name = base_name.unwrap_or_else(|| config.output.base_name.clone());
    let labels = ReportLabels {
        seq1: &seq1.id,
        seq2: &seq2.id,
    };
    let files = export_results(&result, &out_dir, &base_name, labels, config.output.line_width)?;
    println!("Results exported to: {}", out_dir.display());
    println!("  - JSON: {}", files.json.display());
    println!("  - Text: {}", files.text.display());

    Ok(())
}

fn read_sequence(path: &Path) -> Result<Sequence> {
    let seq = FastaParser::read_first(path)
        .with_context(|| format!("Failed to read sequence from {}", path.display()))?;
    log::info!("{}: {} ({} bp)", path.display(), seq.id, seq.len());
    Ok(seq)
}

/// Console summary of one alignment
pub fn summary(result: &AlignmentResult, seq1: &Sequence, seq2: &Sequence) -> String {
    let stats = &result.statistics;
    let rule = "=".repeat(70);
    [
        rule.clone(),
        "ALIGNMENT STATISTICS".to_string(),
        rule.clone(),
        format!("Score:              {}", result.score),
        format!("Alignment Length:   {} bp", stats.length),
        format!("Matches:            {} ({:.2}%)", stats.matches, stats.match_percentage()),
        format!("Mismatches:         {} ({:.2}%)", stats.mismatches, stats.mismatch_percentage()),
        format!("Gaps (Total):       {} ({:.2}%)", stats.total_gaps, stats.gap_percentage),
        format!("  - {} gaps:  {}", seq1.id, stats.gaps_seq1),
        format!("  - {} gaps:  {}", seq2.id, stats.gaps_seq2),
        format!("Identity:           {:.2}%", stats.identity_percent),
        format!("Interpretation:     {}", stats.identity_tier()),
        rule,
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_detect_pair_sorted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "z_second.fasta", ">b\nATG\n");
        write(dir.path(), "a_first.fa", ">a\nATGC\n");

        let (first, second) = detect_pair(dir.path()).unwrap();
        assert!(first.ends_with("a_first.fa"));
        assert!(second.ends_with("z_second.fasta"));
    }

    #[test]
    fn test_detect_pair_needs_two_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "only.fasta", ">a\nATGC\n");

        let err = detect_pair(dir.path()).unwrap_err();
        assert!(err.to_string().contains("found 1"));
        assert!(detect_pair(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_execute_writes_reports() {
        let dir = TempDir::new().unwrap();
        let seq1 = write(dir.path(), "s1.fasta", ">sequence1\nGATTACA\n");
        let seq2 = write(dir.path(), "s2.fasta", ">sequence2\ngcatgcu\n");
        let out = dir.path().join("out");

        execute(
            &Config::default(),
            AlignInputs::Files { seq1, seq2 },
            Some(out.clone()),
            Some("pair".to_string()),
            &ScoringArgs::default(),
            false,
            false,
        )
        .unwrap();

        let json = fs::read_to_string(out.join("pair.json")).unwrap();
        let result: AlignmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.aligned_seq1, "GATTACA");
        assert_eq!(result.aligned_seq2, "GCATGCU");
        assert!(fs::read_to_string(out.join("pair.txt")).unwrap().contains("sequence2 gaps"));
    }

    #[test]
    fn test_execute_respects_matrix_limit() {
        let dir = TempDir::new().unwrap();
        let seq1 = write(dir.path(), "s1.fasta", ">a\nATGCATGCATGC\n");
        let seq2 = write(dir.path(), "s2.fasta", ">b\nATGCATGC\n");
        let mut config = Config::default();
        config.limits.max_matrix_cells = 50;

        let inputs = AlignInputs::Files { seq1, seq2 };
        let err = execute(&config, inputs.clone(), None, None, &ScoringArgs::default(), false, true).unwrap_err();
        assert!(err.to_string().contains("--score-only"));

        execute(&config, inputs, None, None, &ScoringArgs::default(), true, true).unwrap();
    }

    #[test]
    fn test_summary_lists_tier() {
        let seq1 = Sequence::new("x", b"ATGC".to_vec());
        let seq2 = Sequence::new("y", b"ATGC".to_vec());
        let result = nwalign_core::align(seq1.as_bytes(), seq2.as_bytes(), &Default::default()).unwrap();
        let text = summary(&result, &seq1, &seq2);
        assert!(text.contains("Identity:           100.00%"));
        assert!(text.contains("NEARLY IDENTICAL"));
    }
}
