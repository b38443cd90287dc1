//! # Wangview Procedural Generation
//!
//! Corner-constrained terrain maps for Wang-tile rendering.
//!
//! Every grid point carries a terrain label. A tile is drawn over each 2x2
//! window of points, so the four labels of a window must appear together in
//! one clique of the terrain hypergraph.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same map
//! 2. **Greedy**: Left to right, top to bottom, no backtracking
//! 3. **Streamable**: Rows are generated lazily into a bounded grid
//! 4. **Honest**: Dead ends are errors; no fallback terrain is invented
//!
//! ## Core Components
//!
//! - `ConstraintGraph`: Terrain cliques and candidate queries
//! - `NeighborContext`: The fixed labels around the next cell
//! - `RowGenerator`: One corner-consistent row
//! - `RowStream`: Lazy Markov sequence of rows
//! - `MapSession`: Grid filling, fixed maps, scrolling and retries
//!
//! ## Example
//!
//! ```rust
//! use wangview_procedural::{rows, ConstraintGraph, MapSeed};
//!
//! let graph = ConstraintGraph::from_json_str(
//!     r#"{"a": [["a","b"],["c","a"]], "b": [["a","b"],["b","c"]], "c": [["b","c"],["c","a"]]}"#,
//! ).unwrap();
//!
//! let mut rng = MapSeed::new(42).rng();
//! for row in rows(&graph, 10, 10, &mut rng) {
//!     let row = row.unwrap();
//!     assert_eq!(row.len(), 10);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod context;
pub mod error;
pub mod fixed_map;
pub mod generator;
pub mod hypergraph;
pub mod session;
pub mod stream;
pub mod terrain;

pub use config::{MapSettings, WangviewConfig, DEFAULT_MAX_ATTEMPTS};
pub use context::NeighborContext;
pub use error::{WangError, WangResult};
pub use fixed_map::FixedMap;
pub use generator::RowGenerator;
pub use hypergraph::{Clique, ConstraintGraph, RawGraph};
pub use session::{Direction, MapSession};
pub use stream::{rows, RowStream};
pub use terrain::{MapSeed, Row, Terrain};
