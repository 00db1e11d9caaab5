use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::{Config, DEFAULT_CONFIG_FILE};
use nwalign_core::ScoringModel;

#[derive(Parser)]
#[command(name = "nwalign")]
#[command(about = "nwalign - Optimal global pairwise sequence alignment")]
#[command(version)]
#[command(long_about = "
nwalign computes the optimal global (Needleman-Wunsch) alignment of two
nucleotide or protein sequences and reports identity, mismatch and gap statistics.

Examples:
  nwalign align --seq1 ref.fasta --seq2 query.fasta --out results/
  nwalign align --data data/ --match 3 --mismatch -2 --gap -3
  nwalign align --seq1 chr_a.fa --seq2 chr_b.fa --score-only
  nwalign batch --reference ref.fasta --dir candidates/ --out batch_output/
  nwalign validate sample.fasta
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Scoring overrides shared by the alignment commands
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Score for identical symbols
    #[arg(short = 'm', long = "match", allow_negative_numbers = true)]
    pub match_score: Option<i32>,

    /// Score for differing symbols
    #[arg(long, allow_negative_numbers = true)]
    pub mismatch: Option<i32>,

    /// Score per gap position
    #[arg(short, long, allow_negative_numbers = true)]
    pub gap: Option<i32>,
}

impl ScoringArgs {
    /// Apply command-line overrides on top of the configured model
    pub fn resolve(&self, base: ScoringModel) -> ScoringModel {
        ScoringModel {
            match_score: self.match_score.unwrap_or(base.match_score),
            mismatch_score: self.mismatch.unwrap_or(base.mismatch_score),
            gap_penalty: self.gap.unwrap_or(base.gap_penalty),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two sequences and export JSON and text reports
    Align {
        /// First sequence file (FASTA, first record is used)
        #[arg(long, requires = "seq2")]
        seq1: Option<PathBuf>,

        /// Second sequence file (FASTA, first record is used)
        #[arg(long, requires = "seq1")]
        seq2: Option<PathBuf>,

        /// Folder to auto-detect the first two FASTA files from
        #[arg(short, long, conflicts_with_all = ["seq1", "seq2"])]
        data: Option<PathBuf>,

        /// Output directory for reports
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// File stem for the exported reports
        #[arg(long)]
        base_name: Option<String>,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Compute only the optimal score in linear memory
        #[arg(long)]
        score_only: bool,

        /// Print results without writing report files
        #[arg(long)]
        no_export: bool,
    },

    /// Align a reference against every FASTA file in a directory
    Batch {
        /// Reference sequence file
        #[arg(short, long)]
        reference: PathBuf,

        /// Directory with candidate FASTA files
        #[arg(short, long)]
        dir: PathBuf,

        /// Output directory for per-candidate reports and the summary
        #[arg(short, long, default_value = "batch_output")]
        out: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Show record counts and length statistics of a FASTA file
    Validate {
        /// FASTA file to inspect
        fasta: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration to a TOML file
    InitConfig {
        /// Destination file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Print the configuration instead of writing it
        #[arg(long, conflicts_with = "force")]
        print: bool,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Set global thread count
    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    // Execute the requested command
    match cli.command {
        Commands::Align {
            seq1,
            seq2,
            data,
            out,
            base_name,
            scoring,
            score_only,
            no_export,
        } => {
            commands::align::execute(
                &config,
                commands::align::AlignInputs::from_args(seq1, seq2, data),
                out,
                base_name,
                &scoring,
                score_only,
                no_export,
            )?;
        }

        Commands::Batch {
            reference,
            dir,
            out,
            scoring,
        } => {
            commands::batch::execute(&config, reference, dir, out, &scoring)?;
        }

        Commands::Validate { fasta, json } => {
            commands::validate::execute(fasta, json)?;
        }

        Commands::InitConfig { path, force, print } => {
            if print {
                print!("{}", Config::example_toml()?);
            } else {
                commands::init_config::execute(&path, force)?;
            }
        }
    }

    Ok(())
}
