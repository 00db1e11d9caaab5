//! Error handling for the nwalign CLI

use std::path::PathBuf;
use thiserror::Error;

/// User-facing failures detected by the CLI before the engine runs
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Need at least {needed} FASTA files in {path}, found {found}")]
    NotEnoughInputs {
        path: PathBuf,
        needed: usize,
        found: usize,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn directory_not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}
