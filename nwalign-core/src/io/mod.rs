//! File format I/O for nwalign
//!
//! Sequences enter the engine through the FASTA reader; nothing in the
//! alignment core depends on a file format.

pub mod fasta;

pub use fasta::{
    find_fasta_files, write_fasta, FastaError, FastaParser, FastaSummary, DEFAULT_LINE_WIDTH,
    FASTA_EXTENSIONS,
};
