//! # Neighbor Context
//!
//! The labels already fixed around the cell being generated.
//!
//! ```text
//!   previous row:   up0   up1   up2
//!                      \   |   /
//!   current row:  left ── [ ? ]
//! ```
//!
//! A cell sits at the shared corner of up to two tiles above it. The tile to
//! the upper-left has corners `left, up0, up1, ?`; the tile to the
//! upper-right has corners `up1, up2, ?` plus a cell generated later. Both
//! tiles must be drawable, so with three labels above the candidate set is
//! the intersection of two queries.

use std::collections::BTreeSet;

use crate::error::{WangError, WangResult};
use crate::hypergraph::ConstraintGraph;
use crate::terrain::Terrain;

/// Which already-fixed labels constrain the next cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NeighborContext<'a> {
    /// First cell of the first row.
    NoConstraint,
    /// Later cells of the first row.
    LeftOnly(&'a Terrain),
    /// First cell of a later row (two labels above).
    UpPair(&'a Terrain, &'a Terrain),
    /// Three labels above and nothing to the left.
    ///
    /// The row generator never produces this; it exists for callers that
    /// resolve a single point against a fixed window.
    UpTriple(&'a Terrain, &'a Terrain, &'a Terrain),
    /// Last cell of a later row (clipped at the right edge).
    LeftAndUpPair(&'a Terrain, &'a Terrain, &'a Terrain),
    /// Interior cell of a later row.
    LeftAndUpTriple(&'a Terrain, &'a Terrain, &'a Terrain, &'a Terrain),
}

impl<'a> NeighborContext<'a> {
    /// Classifies a cell from its left neighbour and the window above it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidContext` unless `up` holds 0, 2 or 3 labels.
    pub fn from_window(left: Option<&'a Terrain>, up: &'a [Terrain]) -> WangResult<Self> {
        let context = match (left, up) {
            (None, []) => Self::NoConstraint,
            (Some(l), []) => Self::LeftOnly(l),
            (None, [u0, u1]) => Self::UpPair(u0, u1),
            (None, [u0, u1, u2]) => Self::UpTriple(u0, u1, u2),
            (Some(l), [u0, u1]) => Self::LeftAndUpPair(l, u0, u1),
            (Some(l), [u0, u1, u2]) => Self::LeftAndUpTriple(l, u0, u1, u2),
            (_, up) => return Err(WangError::InvalidContext { up: up.len() }),
        };
        Ok(context)
    }

    /// Returns the labels that may be placed at this cell.
    ///
    /// # Errors
    ///
    /// Propagates `UnknownLabel` from the graph queries.
    pub fn resolve(&self, graph: &ConstraintGraph) -> WangResult<BTreeSet<Terrain>> {
        match *self {
            Self::NoConstraint => graph.candidates_for(&[]),
            Self::LeftOnly(l) => graph.candidates_for(&[l.clone()]),
            Self::UpPair(u0, u1) => graph.candidates_for(&[u0.clone(), u1.clone()]),
            Self::LeftAndUpPair(l, u0, u1) => {
                graph.candidates_for(&[l.clone(), u0.clone(), u1.clone()])
            }
            Self::UpTriple(u0, u1, u2) => {
                let upper_left = graph.candidates_for(&[u0.clone(), u1.clone()])?;
                let upper_right = graph.candidates_for(&[u1.clone(), u2.clone()])?;
                Ok(&upper_left & &upper_right)
            }
            Self::LeftAndUpTriple(l, u0, u1, u2) => {
                let upper_left = graph.candidates_for(&[l.clone(), u0.clone(), u1.clone()])?;
                let upper_right = graph.candidates_for(&[u1.clone(), u2.clone()])?;
                Ok(&upper_left & &upper_right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(name: &str) -> Terrain {
        Terrain::from(name)
    }

    fn set(names: &[&str]) -> BTreeSet<Terrain> {
        names.iter().map(|&name| t(name)).collect()
    }

    /// Four terrains where grass touches everything and water only touches
    /// sand. Mixed cliques make the two upper tiles disagree.
    fn coast_graph() -> ConstraintGraph {
        ConstraintGraph::from_json_str(
            r#"{
                "g": [["g","s"],["g","d"],["g","s","d"]],
                "s": [["g","s"],["s","w"],["g","s","d"]],
                "d": [["g","d"],["g","s","d"]],
                "w": [["s","w"]]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_window_classification() {
        let row = vec![t("a"), t("b"), t("c")];
        let left = t("x");

        assert_eq!(NeighborContext::from_window(None, &[]).unwrap(), NeighborContext::NoConstraint);
        assert_eq!(
            NeighborContext::from_window(Some(&left), &row[..2]).unwrap(),
            NeighborContext::LeftAndUpPair(&left, &row[0], &row[1])
        );
        assert_eq!(
            NeighborContext::from_window(Some(&left), &row).unwrap(),
            NeighborContext::LeftAndUpTriple(&left, &row[0], &row[1], &row[2])
        );
        assert_eq!(
            NeighborContext::from_window(None, &row).unwrap(),
            NeighborContext::UpTriple(&row[0], &row[1], &row[2])
        );
    }

    #[test]
    fn test_invalid_window_lengths() {
        let row = vec![t("a"), t("b"), t("c"), t("d")];
        assert!(matches!(
            NeighborContext::from_window(None, &row[..1]),
            Err(WangError::InvalidContext { up: 1 })
        ));
        assert!(matches!(
            NeighborContext::from_window(Some(&row[0]), &row),
            Err(WangError::InvalidContext { up: 4 })
        ));
    }

    #[test]
    fn test_triple_is_intersection_of_subqueries() {
        let graph = coast_graph();
        let (l, u0, u1, u2) = (t("d"), t("g"), t("s"), t("w"));

        let x = graph.candidates_for(&[l.clone(), u0.clone(), u1.clone()]).unwrap();
        let y = graph.candidates_for(&[u1.clone(), u2.clone()]).unwrap();
        assert_eq!(x, set(&["g", "s", "d"]));
        assert_eq!(y, set(&["s", "w"]));

        let context = NeighborContext::LeftAndUpTriple(&l, &u0, &u1, &u2);
        let resolved = context.resolve(&graph).unwrap();
        assert_eq!(resolved, x.intersection(&y).cloned().collect());
        assert_eq!(resolved, set(&["s"]));
    }

    #[test]
    fn test_up_triple_without_left() {
        let graph = coast_graph();
        let (u0, u1, u2) = (t("g"), t("s"), t("w"));
        let resolved = NeighborContext::UpTriple(&u0, &u1, &u2).resolve(&graph).unwrap();
        assert_eq!(resolved, set(&["s"]));
    }

    #[test]
    fn test_pair_is_single_query() {
        let graph = coast_graph();
        let (l, u0, u1) = (t("g"), t("s"), t("d"));
        let resolved = NeighborContext::LeftAndUpPair(&l, &u0, &u1).resolve(&graph).unwrap();
        assert_eq!(resolved, set(&["g", "s", "d"]));

        let resolved = NeighborContext::UpPair(&u0, &t("w")).resolve(&graph).unwrap();
        assert_eq!(resolved, set(&["s", "w"]));
    }

    #[test]
    fn test_no_constraint_and_left_only() {
        let graph = coast_graph();
        assert_eq!(
            NeighborContext::NoConstraint.resolve(&graph).unwrap(),
            set(&["d", "g", "s", "w"])
        );
        let water = t("w");
        assert_eq!(NeighborContext::LeftOnly(&water).resolve(&graph).unwrap(), set(&["s", "w"]));
    }

    #[test]
    fn test_dead_end_is_empty_not_error() {
        let graph = coast_graph();
        let (l, u0, u1) = (t("w"), t("g"), t("s"));
        let resolved = NeighborContext::LeftAndUpPair(&l, &u0, &u1).resolve(&graph).unwrap();
        assert!(resolved.is_empty());
    }
}
