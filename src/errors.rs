//! Error types for the filing compiler, rate aggregation, and report sinks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Per-row failures while compiling one election's filings. Contained at
/// the per-file orchestration boundary: the file is skipped with a
/// diagnostic, the run continues.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The row lacks one of the fields the compiler cannot work without.
    #[error("row {row}: missing required field {field}")]
    MissingRequiredField { row: usize, field: &'static str },

    /// A "VOTE FOR N" office-title suffix whose count token is not an
    /// integer. Never silently defaulted.
    #[error("row {row}: office {office:?} has vote-for token {token:?}, not a count")]
    MalformedOfficeTitle {
        row: usize,
        office: String,
        token: String,
    },

    /// A declaration value outside Valid / Void / Withdrew / Under Review.
    #[error("row {row}: unknown declaration {value:?}")]
    UnknownDeclaration { row: usize, value: String },
}

/// Failures reading a filings CSV (the row source).
#[derive(Debug, Error)]
pub enum FilingsError {
    #[error("unable to read {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Failures computing uncontested rates. These propagate to the caller of
/// the aggregation entry points rather than being contained.
#[derive(Debug, Error, PartialEq)]
pub enum RatesError {
    /// The denominator of a rate is zero. Surfaced explicitly so a missing
    /// group can never masquerade as a genuine 0% uncontested outcome.
    #[error("no races for location {location:?} (group {group:?}); rate undefined")]
    ZeroDenominator {
        location: String,
        group: Option<String>,
    },

    /// An election-type label matching both markers at once.
    #[error("election type {label:?} contains both 'primary' and 'general'")]
    AmbiguousElectionLabel { label: String },
}

/// Failures writing report files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV write error for {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON write error for {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why one input file was skipped. All variants are contained at the
/// orchestration boundary (skip, warn, continue).
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file name {name:?} does not encode an election date")]
    NoDateSegment { name: String },

    #[error("file name date segment {digits:?} is not MMDDYYYY")]
    BadDate {
        digits: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Filings(#[from] FilingsError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Rates(#[from] RatesError),
}
