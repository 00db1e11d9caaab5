//! Batch command implementation - one reference against a directory of candidates

use anyhow::{anyhow, Context, Result};
use nwalign_core::io::find_fasta_files;
use nwalign_core::{batch_align, export_results, Aligner, BatchSummary, FastaParser, ReportLabels, Sequence};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CliError;
use crate::ScoringArgs;

/// File written next to the per-candidate reports
pub const SUMMARY_FILE: &str = "batch_summary.json";

pub fn execute(
    config: &Config,
    reference: PathBuf,
    dir: PathBuf,
    out: PathBuf,
    scoring: &ScoringArgs,
) -> Result<()> {
    if !dir.is_dir() {
        return Err(CliError::directory_not_found(dir).into());
    }

    let reference_seq = FastaParser::read_first(&reference)
        .with_context(|| format!("Failed to read reference from {}", reference.display()))?;

    let candidates = load_candidates(&dir, &reference)?;
    if candidates.is_empty() {
        return Err(CliError::NotEnoughInputs {
            path: dir,
            needed: 1,
            found: 0,
        }
        .into());
    }

    let mut aligner = Aligner::new(scoring.resolve(config.scoring));
    if let Some(limit) = config.limits.max_cells() {
        aligner = aligner.with_max_cells(limit);
    }

    let entries = batch_align(&reference_seq, &candidates, &aligner);

    fs::create_dir_all(&out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let stems = report_stems(entries.iter().map(|e| e.candidate_id.as_str()));
    for (entry, stem) in entries.iter().zip(&stems) {
        if let Ok(result) = &entry.outcome {
            let labels = ReportLabels {
                seq1: &reference_seq.id,
                seq2: &entry.candidate_id,
            };
            let base_name = format!("{stem}_alignment");
            export_results(result, &out, &base_name, labels, config.output.line_width)?;
        }
    }

    let failed = entries.iter().filter(|e| e.outcome.is_err()).count();
    let summary = BatchSummary::from_entries(&entries)
        .map_err(|_| anyhow!("All {} candidate alignments failed", entries.len()))?;

    let summary_path = out.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize batch summary")?;
    fs::write(&summary_path, json)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    println!("Batch analysis complete: {} aligned, {} failed", summary.num_alignments, failed);
    println!(
        "Identity: avg {:.2}% | max {:.2}% | min {:.2}%",
        summary.avg_identity, summary.max_identity, summary.min_identity
    );
    println!(
        "Score:    avg {:.1} | max {} | min {}",
        summary.avg_score, summary.max_score, summary.min_score
    );
    println!("Results saved to: {}", out.display());

    Ok(())
}

/// First record of every FASTA file in `dir`, skipping the reference file itself
fn load_candidates(dir: &Path, reference: &Path) -> Result<Vec<Sequence>> {
    let reference = fs::canonicalize(reference).ok();
    let files = find_fasta_files(dir)
        .with_context(|| format!("Failed to scan {} for FASTA files", dir.display()))?;
    log::info!("Found {} FASTA file(s) in {}", files.len(), dir.display());

    let mut candidates = Vec::with_capacity(files.len());
    for file in files {
        if reference.is_some() && fs::canonicalize(&file).ok() == reference {
            log::debug!("Skipping reference file {}", file.display());
            continue;
        }
        match FastaParser::read_first(&file) {
            Ok(seq) => candidates.push(seq),
            Err(e) => log::warn!("{}: {}", file.display(), e),
        }
    }
    Ok(candidates)
}

/// Make a sequence identifier safe to use as a file name
fn file_stem_for(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

/// One distinct file stem per candidate, in order.
///
/// A stem already taken by an earlier candidate gets a `_2`, `_3`, ... suffix.
fn report_stems<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    ids.into_iter()
        .map(|id| {
            let base = file_stem_for(id);
            let mut stem = base.clone();
            let mut n = 1;
            while !taken.insert(stem.clone()) {
                n += 1;
                stem = format!("{base}_{n}");
            }
            if n > 1 {
                log::warn!("Duplicate candidate id {id}, writing reports as {stem}_alignment");
            }
            stem
        })
        .collect()
}
