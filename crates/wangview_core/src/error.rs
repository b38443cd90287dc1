//! # Grid Error Types
//!
//! Contract violations of the bounded grid.

use thiserror::Error;

/// Errors that can occur when writing to or reading from a [`BoundedGrid`].
///
/// [`BoundedGrid`]: crate::grid::BoundedGrid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A line did not match the length fixed for its axis.
    #[error("wrong length {axis} added: expected {expected}, got {found}")]
    DimensionMismatch {
        /// "row" or "column".
        axis: &'static str,
        /// Length fixed by the first line on this axis.
        expected: usize,
        /// Length supplied.
        found: usize,
    },

    /// The first line on an axis is longer than the grid's capacity.
    #[error("first {axis} too long: capacity {max}, got {found}")]
    LineTooLong {
        /// "row" or "column".
        axis: &'static str,
        /// Declared maximum.
        max: usize,
        /// Length supplied.
        found: usize,
    },

    /// A line with no values was supplied.
    #[error("cannot add an empty {axis}")]
    EmptyLine {
        /// "row" or "column".
        axis: &'static str,
    },

    /// A read was outside the populated area.
    #[error("index ({x}, {y}) out of range for {width}x{height} grid")]
    IndexOutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Populated width.
        width: usize,
        /// Populated height.
        height: usize,
    },
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
