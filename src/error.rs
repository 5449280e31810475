//! Error types for automoc
//!
//! Two families of errors exist. [`AutomocError`] covers conditions that end the
//! run immediately: a malformed manifest, an explicit companion include whose
//! header cannot be found, or an I/O failure on the files automoc owns.
//! [`GenerationError`] covers a single generator invocation; those are logged,
//! latched into the run's failure flag and never abort the run on their own.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomocError {
    #[error("failed to open manifest {path}: {source}")]
    ManifestOpen { path: PathBuf, source: io::Error },

    /// The manifest did not contain the expected section label.
    #[error("syntax error in {path} at line {line}: expected {expected:?}, found {found:?}")]
    ManifestSyntax {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },

    #[error(
        "The file \"{source_file}\" includes the moc file \"{include}\", but {}",
        describe_candidates(.candidates)
    )]
    MissingHeader {
        source_file: PathBuf,
        include: String,
        candidates: Vec<String>,
    },

    #[error("failed to write {path}: {source}")]
    OutputWrite { path: PathBuf, source: io::Error },

    #[error("failed to update the timestamp of {path}: {source}")]
    Touch { path: PathBuf, source: io::Error },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn describe_candidates(candidates: &[String]) -> String {
    match candidates {
        [single] => format!("\"{}\" does not exist.", single),
        [first, second] => format!("neither \"{}\" nor \"{}\" exist.", first, second),
        _ => format!("none of {:?} exist.", candidates),
    }
}

/// Failure of a single generator invocation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("process for {output} failed to start: {source}")]
    FailedToStart { output: PathBuf, source: io::Error },

    #[error("process for {output} failed: {status}")]
    ExitStatus { output: PathBuf, status: ExitStatus },

    #[error("waiting for the process for {output} failed: {source}")]
    Wait { output: PathBuf, source: io::Error },

    #[error("generator task for {output} did not complete: {message}")]
    Aborted { output: PathBuf, message: String },
}

impl GenerationError {
    pub fn output(&self) -> &PathBuf {
        match self {
            GenerationError::FailedToStart { output, .. }
            | GenerationError::ExitStatus { output, .. }
            | GenerationError::Wait { output, .. }
            | GenerationError::Aborted { output, .. } => output,
        }
    }
}

pub type Result<T, E = AutomocError> = std::result::Result<T, E>;
