//! Human-readable and JSON reports for alignment results

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::align::AlignmentResult;
use crate::scoring::GAP;

/// Default number of alignment columns per block
pub const DEFAULT_LINE_WIDTH: usize = 60;

const WIDE_RULE: usize = 100;
const NARROW_RULE: usize = 80;

/// Identifiers printed next to each aligned row
#[derive(Debug, Clone, Copy)]
pub struct ReportLabels<'a> {
    pub seq1: &'a str,
    pub seq2: &'a str,
}

impl Default for ReportLabels<'_> {
    fn default() -> Self {
        Self {
            seq1: "Seq1",
            seq2: "Seq2",
        }
    }
}

/// Paths written by [`export_results`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFiles {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Marker for one aligned column: `|` match, `.` mismatch, space for a gap
pub fn match_symbol(a: u8, b: u8) -> char {
    if a == GAP || b == GAP {
        ' '
    } else if a == b {
        '|'
    } else {
        '.'
    }
}

/// Render the aligned rows in blocks of `line_width` columns with a match line between them.
pub fn format_alignment(result: &AlignmentResult, line_width: usize) -> String {
    let width = line_width.max(1);
    let row1 = result.aligned_seq1.as_bytes();
    let row2 = result.aligned_seq2.as_bytes();

    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(out, "PAIRWISE ALIGNMENT");
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(out);

    for (block1, block2) in row1.chunks(width).zip(row2.chunks(width)) {
        let markers: String = block1
            .iter()
            .zip(block2)
            .map(|(&a, &b)| match_symbol(a, b))
            .collect();
        let _ = writeln!(out, "Seq1: {}", String::from_utf8_lossy(block1));
        let _ = writeln!(out, "      {}", markers);
        let _ = writeln!(out, "Seq2: {}", String::from_utf8_lossy(block2));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(out, "Legend: | = match, . = mismatch, (space) = gap");
    let _ = write!(out, "{}", "=".repeat(WIDE_RULE));
    out
}

/// Statistics block followed by the formatted alignment.
pub fn text_report(result: &AlignmentResult, labels: ReportLabels<'_>, line_width: usize) -> String {
    let stats = &result.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(NARROW_RULE));
    let _ = writeln!(out, "NEEDLEMAN-WUNSCH ALIGNMENT RESULT");
    let _ = writeln!(out, "{}", "=".repeat(NARROW_RULE));
    let _ = writeln!(out);
    let _ = writeln!(out, "ALIGNMENT STATISTICS");
    let _ = writeln!(out, "{}", "-".repeat(NARROW_RULE));
    let _ = writeln!(out, "Score:              {}", result.score);
    let _ = writeln!(out, "Length:             {} bp", stats.length);
    let _ = writeln!(
        out,
        "Matches:            {} ({:.2}%)",
        stats.matches,
        stats.match_percentage()
    );
    let _ = writeln!(
        out,
        "Mismatches:         {} ({:.2}%)",
        stats.mismatches,
        stats.mismatch_percentage()
    );
    let _ = writeln!(out, "Gaps (Total):       {}", stats.total_gaps);
    let _ = writeln!(out, "  - {} gaps:    {}", labels.seq1, stats.gaps_seq1);
    let _ = writeln!(out, "  - {} gaps:    {}", labels.seq2, stats.gaps_seq2);
    let _ = writeln!(out, "Identity:           {:.2}%", stats.identity_percent);
    let _ = writeln!(out, "Gap Percentage:     {:.2}%", stats.gap_percentage);
    let _ = writeln!(out, "Interpretation:     {}", stats.identity_tier());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(NARROW_RULE));
    let _ = writeln!(out, "ALIGNMENT");
    let _ = writeln!(out, "{}", "-".repeat(NARROW_RULE));
    let _ = writeln!(out);
    out.push_str(&format_alignment(result, line_width));
    out.push('\n');
    out
}

/// Write `<base_name>.json` and `<base_name>.txt` into `output_dir`.
pub fn export_results(
    result: &AlignmentResult,
    output_dir: &Path,
    base_name: &str,
    labels: ReportLabels<'_>,
    line_width: usize,
) -> Result<ExportedFiles> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let json = output_dir.join(format!("{base_name}.json"));
    let content = result
        .to_json()
        .context("Failed to serialize alignment result")?;
    fs::write(&json, content)
        .with_context(|| format!("Failed to write JSON report: {}", json.display()))?;

    let text = output_dir.join(format!("{base_name}.txt"));
    fs::write(&text, text_report(result, labels, line_width))
        .with_context(|| format!("Failed to write text report: {}", text.display()))?;

    log::info!("Results exported to {}", output_dir.display());
    log::debug!("  JSON: {}", json.display());
    log::debug!("  Text: {}", text.display());

    Ok(ExportedFiles { json, text })
}
