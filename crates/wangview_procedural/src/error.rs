//! # Generation Error Types
//!
//! All errors that can occur while building graphs and generating maps.

use thiserror::Error;
use wangview_core::GridError;

use crate::terrain::Terrain;

/// Errors that can occur in terrain generation.
#[derive(Error, Debug)]
pub enum WangError {
    /// Adjacency data violates the clique invariants.
    #[error("malformed terrain graph: {0}")]
    MalformedGraph(String),

    /// A query was anchored on a label the graph has no entry for.
    #[error("unknown terrain label: {0}")]
    UnknownLabel(Terrain),

    /// The window of labels above a cell had an impossible length.
    #[error("invalid neighbor context: {up} labels above (expected 0, 2 or 3)")]
    InvalidContext {
        /// Number of labels sampled from the previous row.
        up: usize,
    },

    /// No terrain is compatible with the neighbours of a cell.
    #[error("no terrain options left at column {column}")]
    ExhaustedOptions {
        /// Column of the failing cell.
        column: usize,
    },

    /// The previous row does not match the requested width.
    #[error("previous row has width {found}, expected {expected}")]
    RowWidthMismatch {
        /// Requested row width.
        expected: usize,
        /// Width of the supplied previous row.
        found: usize,
    },

    /// Bounded grid contract violation.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed.
    #[error("failed to parse {format}: {message}")]
    Parse {
        /// "TOML" or "JSON".
        format: &'static str,
        /// Parser message.
        message: String,
    },
}

impl From<toml::de::Error> for WangError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse {
            format: "TOML",
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WangError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            format: "JSON",
            message: err.to_string(),
        }
    }
}

/// Result type for generation operations.
pub type WangResult<T> = Result<T, WangError>;
