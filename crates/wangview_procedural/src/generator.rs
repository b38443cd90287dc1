//! # Row Generator
//!
//! Greedy left-to-right generation of one terrain row.
//!
//! For column `i` the window above is `previous[i-1..=i+1]` clipped to the
//! row: two labels at either edge, three in the interior. The label chosen
//! at column `i` becomes the left neighbour of column `i+1`. Each label is
//! drawn uniformly from the candidate set.
//!
//! There is no backtracking. A cell with no candidates fails the row with
//! `ExhaustedOptions`; retrying is the caller's decision.

use rand::Rng;

use crate::context::NeighborContext;
use crate::error::{WangError, WangResult};
use crate::hypergraph::ConstraintGraph;
use crate::terrain::{Row, Terrain};

/// Generates rows against one constraint graph.
#[derive(Clone, Copy, Debug)]
pub struct RowGenerator<'g> {
    graph: &'g ConstraintGraph,
}

impl<'g> RowGenerator<'g> {
    /// Creates a generator for `graph`.
    #[inline]
    #[must_use]
    pub const fn new(graph: &'g ConstraintGraph) -> Self {
        Self { graph }
    }

    /// Returns the graph this generator queries.
    #[inline]
    #[must_use]
    pub const fn graph(&self) -> &'g ConstraintGraph {
        self.graph
    }

    /// Generates one row of `width` labels.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of labels in the row
    /// * `previous` - Row directly above, if any
    /// * `rng` - Random source for the uniform draws
    ///
    /// # Errors
    ///
    /// - `RowWidthMismatch` if `previous` is not `width` long
    /// - `ExhaustedOptions` if a column has no candidates
    /// - `UnknownLabel` if a fixed label is not a key of the graph
    pub fn generate_row<R: Rng>(
        &self,
        width: usize,
        previous: Option<&[Terrain]>,
        rng: &mut R,
    ) -> WangResult<Row> {
        if let Some(previous) = previous {
            if previous.len() != width {
                return Err(WangError::RowWidthMismatch {
                    expected: width,
                    found: previous.len(),
                });
            }
        }

        let mut row: Row = Vec::with_capacity(width);
        for column in 0..width {
            let up = previous.map_or(&[][..], |previous| up_window(previous, column));
            let context = NeighborContext::from_window(row.last(), up)?;
            let candidates = context.resolve(self.graph)?;

            if candidates.is_empty() {
                tracing::debug!(column, ?context, "no terrain options left");
                return Err(WangError::ExhaustedOptions { column });
            }

            let pick = rng.gen_range(0..candidates.len());
            // Candidates iterate in label order, so the draw is reproducible.
            let label = candidates
                .into_iter()
                .nth(pick)
                .ok_or(WangError::ExhaustedOptions { column })?;
            row.push(label);
        }

        tracing::trace!(width, constrained = previous.is_some(), "row generated");
        Ok(row)
    }
}

/// The labels of `previous` that are corner-adjacent to `column`.
fn up_window(previous: &[Terrain], column: usize) -> &[Terrain] {
    let start = column.saturating_sub(1);
    let end = (column + 2).min(previous.len());
    &previous[start..end]
}
