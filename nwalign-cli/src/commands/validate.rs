//! Validate command implementation - FASTA record statistics

use anyhow::{Context, Result};
use nwalign_core::{FastaParser, FastaSummary};
use std::path::PathBuf;

pub fn execute(fasta: PathBuf, json: bool) -> Result<()> {
    let summary = FastaParser::summarize(&fasta)
        .with_context(|| format!("Failed to validate FASTA file: {}", fasta.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render(&summary));
    }
    Ok(())
}

fn render(summary: &FastaSummary) -> String {
    let mut lines = vec![
        format!("File:             {}", summary.file.display()),
        format!("Sequences:        {}", summary.num_sequences),
        format!("Total length:     {} bp", summary.total_length),
        format!("Average length:   {:.1} bp", summary.average_length),
        format!("Min / max length: {} / {} bp", summary.min_length, summary.max_length),
    ];
    lines.extend(summary.sequences.iter().map(|(id, len)| format!("  {id}\t{len}")));
    lines.join("\n")
}
