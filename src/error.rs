//! Error types for campus graph operations

use std::path::PathBuf;
use thiserror::Error;

use crate::graph::LocationId;

/// Every condition a graph, query or persistence call can report.
///
/// None of these are fatal: a failed insertion simply does not happen and the
/// graph stays in its previous valid state.
#[derive(Debug, Error)]
pub enum CampusError {
    #[error("location id {0} already exists")]
    DuplicateId(LocationId),

    #[error("invalid location reference in path {from} -> {to}")]
    InvalidReference { from: LocationId, to: LocationId },

    #[error("unknown location id {0}")]
    UnknownLocation(LocationId),

    #[error("no path exists between {from} and {to}")]
    Unreachable { from: LocationId, to: LocationId },

    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("location {id} cannot be saved: {reason}")]
    Unsavable { id: LocationId, reason: &'static str },

    #[error("path is empty, nothing to export")]
    EmptyPath,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CampusError {
    pub(crate) fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}
