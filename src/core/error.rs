//! Centralised error types used across the crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Precise configuration faults, all detected before any file is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid logging priority label '{0}'")]
    UnknownLoggingPriority(String),
    #[error("invalid output format label '{0}' (expected one of: clog, cout, org)")]
    UnknownOutputFormat(String),
    #[error("missing input file(s)")]
    NoInputFiles,
    #[error("environment variable '{name}' referenced by '{path}' is not set")]
    UnresolvedVariable { name: String, path: String },
    #[error("malformed environment variable reference in '{0}'")]
    MalformedVariable(String),
}

/// Driver operation invoked out of sequence.
#[derive(Debug, Error)]
#[error("cannot {operation} while driver is {state}")]
pub struct LifecycleError {
    pub operation: &'static str,
    pub state: &'static str,
}

/// What went wrong on a given archive line.
#[derive(Debug, Error)]
pub enum ArchiveErrorKind {
    #[error("I/O error: {0}")]
    Io(io::Error),
    #[error("malformed header: {0}")]
    BadHeader(String),
    #[error("invalid {field} value '{text}'")]
    BadFloat { field: &'static str, text: String },
    #[error("expected {expected} columns, got {got}")]
    BadColumnCount { expected: usize, got: usize },
    #[error("bin [{low}, {high}) has an empty range")]
    EmptyRange { low: f64, high: f64 },
    #[error("bin starting at {low} does not follow previous upper edge {prev_high}")]
    NotContiguous { prev_high: f64, low: f64 },
    #[error("duplicate histogram name '{0}'")]
    DuplicateName(String),
    #[error("histogram '{0}' is not terminated by 'end'")]
    Unterminated(String),
    #[error("{field} '{text}' contains the reserved character '|'")]
    ReservedChar { field: &'static str, text: String },
    #[error("content outside of a histogram block")]
    OutsideBlock,
}

/// Failure loading a pool archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot read archive '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {kind}")]
    Parse {
        line: usize,
        #[source]
        kind: ArchiveErrorKind,
    },
}

/// Faults raised while encoding or writing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("histogram '{name}' has unsupported kind '{class}'")]
    UnsupportedKind { name: String, class: String },
    #[error("histogram '{0}' is 2D; only 1D histograms can be tabulated")]
    Unsupported2D(String),
    #[error("histogram '{name}' has {bins} bins but the table has {rows} rows")]
    BinCountMismatch {
        name: String,
        rows: usize,
        bins: usize,
    },
    #[error("no histogram named '{0}' in pool")]
    UnknownHistogram(String),
    #[error("cannot write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
