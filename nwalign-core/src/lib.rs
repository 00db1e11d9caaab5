//! nwalign Core Library
//!
//! Optimal global (Needleman-Wunsch) alignment of two sequences under a
//! linear match/mismatch/gap scoring model, with alignment statistics,
//! FASTA I/O, report export and one-against-many batch alignment.
//!
//! ```
//! use nwalign_core::{align, ScoringModel};
//!
//! let result = align(b"GATTACA", b"GCATGCU", &ScoringModel::default()).unwrap();
//! assert_eq!(result.statistics.length, 7);
//! ```

pub mod error;
pub mod scoring;
pub mod matrix;
pub mod traceback;
pub mod stats;
pub mod align;
pub mod types;
pub mod io;
pub mod report;
pub mod batch;

// Re-export commonly used types and functions
pub use align::{align, Aligner, AlignmentResult};
pub use batch::{batch_align, BatchEntry, BatchSummary};
pub use error::{AlignError, Result};
pub use io::{FastaError, FastaParser, FastaSummary};
pub use matrix::{score_only, AlignmentMatrix};
pub use report::{export_results, format_alignment, text_report, ExportedFiles, ReportLabels};
pub use scoring::{ScoringModel, GAP};
pub use stats::{AlignmentStatistics, IdentityTier};
pub use traceback::{traceback, AlignedPair, Move};
pub use types::Sequence;

/// Version information for the nwalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
