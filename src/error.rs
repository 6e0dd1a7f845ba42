// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run before any output is written.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("no input file selected")]
    NoSource,
    #[error("cannot open input file {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed reading line {line} of input: {source}")]
    ReadFailure {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// A single output destination that could not be created or written.
#[derive(Debug, Error)]
#[error("cannot write {}: {source}", .path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
