//! FASTA sequence file reading and writing
//!
//! Parsing is done with the needletail library; gzipped inputs (`.gz`) are
//! decompressed with flate2. Every sequence handed to the aligner is
//! converted to uppercase here, so the engine itself never has to care
//! about case.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use needletail::parse_fastx_reader;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Sequence;

/// Default number of sequence characters per FASTA line
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// File extensions recognised as FASTA when scanning directories
pub const FASTA_EXTENSIONS: [&str; 2] = ["fasta", "fa"];

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("FASTA file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

/// FASTA/FASTQ parser producing uppercase [`Sequence`] records
pub struct FastaParser;

impl FastaParser {
    /// Read the first record of a FASTA file
    pub fn read_first<P: AsRef<Path>>(path: P) -> Result<Sequence, FastaError> {
        Self::parse_file(path)?
            .into_iter()
            .next()
            .ok_or(FastaError::EmptyFile)
    }

    /// Read every record of a FASTA file
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>, FastaError> {
        Self::parse_file(path)
    }

    fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>, FastaError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FastaError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(FastaError::EmptyFile);
        }

        let is_gz = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"));
        if is_gz {
            Self::parse_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::parse_reader(BufReader::new(file))
        }
    }

    /// Parse FASTA/FASTQ data from any readable source
    pub fn parse_reader<R: Read + Send>(reader: R) -> Result<Vec<Sequence>, FastaError> {
        let mut sequences = Vec::new();
        let mut fastx_reader =
            parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;

        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            sequences.push(Self::record_to_sequence(record.id(), &record.seq()));
        }

        if sequences.is_empty() {
            Err(FastaError::EmptyFile)
        } else {
            log::debug!("Parsed {} sequence record(s)", sequences.len());
            Ok(sequences)
        }
    }

    /// Split the header line into identifier and description
    fn record_to_sequence(header: &[u8], seq: &[u8]) -> Sequence {
        let header = String::from_utf8_lossy(header);
        let header = header.trim();
        let (id, description) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) if !rest.trim().is_empty() => (id, Some(rest.trim().to_string())),
            Some((id, _)) => (id, None),
            None => (header, None),
        };

        Sequence {
            id: id.to_string(),
            description,
            data: seq.to_ascii_uppercase(),
        }
    }

    /// Basic statistics about the records of a FASTA file
    pub fn summarize<P: AsRef<Path>>(path: P) -> Result<FastaSummary, FastaError> {
        let path = path.as_ref();
        let sequences = Self::parse_file(path)?;
        Ok(FastaSummary::from_sequences(path, &sequences))
    }
}

/// Record counts and length statistics of one FASTA file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastaSummary {
    pub file: PathBuf,
    pub num_sequences: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub min_length: usize,
    pub max_length: usize,
    /// `(id, length)` per record in file order
    pub sequences: Vec<(String, usize)>,
}

impl FastaSummary {
    fn from_sequences(path: &Path, sequences: &[Sequence]) -> Self {
        let lengths = sequences.iter().map(Sequence::len);
        let total_length: usize = lengths.clone().sum();

        Self {
            file: path.to_path_buf(),
            num_sequences: sequences.len(),
            total_length,
            average_length: total_length as f64 / sequences.len().max(1) as f64,
            min_length: lengths.clone().min().unwrap_or(0),
            max_length: lengths.max().unwrap_or(0),
            sequences: sequences.iter().map(|s| (s.id.clone(), s.len())).collect(),
        }
    }
}

/// Write `sequence` as a single FASTA record wrapped at `line_width` characters.
///
/// Parent directories are created as needed.
pub fn write_fasta<P: AsRef<Path>>(
    path: P,
    sequence: &Sequence,
    line_width: usize,
) -> Result<(), FastaError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    match &sequence.description {
        Some(desc) if !desc.is_empty() => writeln!(out, ">{} {}", sequence.id, desc)?,
        _ => writeln!(out, ">{}", sequence.id)?,
    }
    for chunk in sequence.data.chunks(line_width.max(1)) {
        out.write_all(chunk)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// FASTA files directly inside `dir`, sorted by file name
pub fn find_fasta_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, FastaError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(FastaError::NotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_fasta = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| {
                    FASTA_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
                });
        if is_fasta {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
