//! # Wangview Core
//!
//! Storage shared by the generator and the renderer.
//!
//! ## Architecture Rules
//!
//! 1. **Bounded** - A grid never holds more than its declared capacity
//! 2. **Streaming** - New rows/columns rotate the oldest ones out
//! 3. **Strict** - Wrong line lengths and bad indices are errors
//!
//! ## Example
//!
//! ```rust
//! use wangview_core::BoundedGrid;
//!
//! let mut grid = BoundedGrid::new(3, 2);
//! grid.add_line(vec![1, 2, 3], true, false).unwrap();
//! grid.add_line(vec![4, 5, 6], true, false).unwrap();
//! assert!(grid.is_full());
//!
//! // Rotates the first row out
//! grid.add_line(vec![7, 8, 9], true, false).unwrap();
//! assert_eq!(*grid.at(0, 0).unwrap(), 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod grid;

pub use error::{GridError, GridResult};
pub use grid::{AxisState, BoundedGrid};
