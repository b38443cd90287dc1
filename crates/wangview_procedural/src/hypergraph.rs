//! # Constraint Graph
//!
//! **Terrain hypergraph: which labels may meet at one grid point**
//!
//! Each hyperedge ("clique") is a set of terrain labels that may all appear
//! at the four corners of a single tile. The graph maps every anchor label to
//! the cliques containing it.
//!
//! ## Queries
//!
//! `candidates_for(labels)` answers "which terrains can share a tile with all
//! of these labels":
//!
//! 1. Take the cliques of the first label
//! 2. Keep only cliques that also contain every later label (AND)
//! 3. Return the union of the surviving cliques' members (OR)
//!
//! ## Example
//!
//! ```rust
//! use wangview_procedural::{ConstraintGraph, Terrain};
//!
//! let graph = ConstraintGraph::from_json_str(
//!     r#"{"a": [["a","b"],["c","a"]], "b": [["a","b"],["b","c"]], "c": [["b","c"],["c","a"]]}"#,
//! ).unwrap();
//!
//! let options = graph.candidates_for(&[Terrain::from("a"), Terrain::from("b")]).unwrap();
//! assert_eq!(options.len(), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{WangError, WangResult};
use crate::terrain::Terrain;

/// Raw adjacency input: label -> list of cliques, each a list of labels.
///
/// This is the shape of Wangscape's `terrain_hypergraph.json`.
pub type RawGraph = BTreeMap<String, Vec<Vec<String>>>;

/// An immutable set of labels that may co-occur at one point.
///
/// Equality, ordering and hashing are by membership.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clique(BTreeSet<Terrain>);

impl Clique {
    /// Creates a clique from its members. Duplicates collapse.
    #[must_use]
    pub fn new<I, L>(members: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Terrain>,
    {
        Self(members.into_iter().map(Into::into).collect())
    }

    /// Returns true if `label` is a member.
    #[inline]
    #[must_use]
    pub fn contains(&self, label: &Terrain) -> bool {
        self.0.contains(label)
    }

    /// Iterates members in label order.
    pub fn iter(&self) -> impl Iterator<Item = &Terrain> {
        self.0.iter()
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the clique has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Clique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label}")?;
        }
        f.write_str("}")
    }
}

/// Immutable terrain adjacency model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintGraph {
    /// Anchor label -> cliques containing it.
    cliques: BTreeMap<Terrain, BTreeSet<Clique>>,
}

impl ConstraintGraph {
    /// Builds a graph from raw adjacency data.
    ///
    /// Entries repeated for the same label are merged; identical cliques
    /// collapse. A label that only appears inside cliques (never as a key)
    /// is allowed: it can be a candidate but never an anchor.
    ///
    /// # Errors
    ///
    /// Returns `MalformedGraph` if:
    /// - a clique is empty
    /// - a clique listed under a label does not contain that label
    /// - a clique contains another key label that does not list it
    pub fn build<I, K, C, L>(raw: I) -> WangResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<C>)>,
        K: Into<Terrain>,
        C: IntoIterator<Item = L>,
        L: Into<Terrain>,
    {
        let mut cliques: BTreeMap<Terrain, BTreeSet<Clique>> = BTreeMap::new();

        for (key, entries) in raw {
            let key = key.into();
            let slot = cliques.entry(key.clone()).or_default();
            for members in entries {
                let clique = Clique::new(members);
                if clique.is_empty() {
                    return Err(WangError::MalformedGraph(format!(
                        "empty clique listed under '{key}'"
                    )));
                }
                if !clique.contains(&key) {
                    return Err(WangError::MalformedGraph(format!(
                        "clique {clique} listed under '{key}' does not contain it"
                    )));
                }
                slot.insert(clique);
            }
        }

        let graph = Self { cliques };
        graph.check_symmetry()?;

        tracing::debug!(
            labels = graph.len(),
            cliques = graph.clique_count(),
            "constraint graph built"
        );
        Ok(graph)
    }

    /// Builds a graph from a JSON object of the [`RawGraph`] shape.
    ///
    /// # Errors
    ///
    /// Returns `Parse` on invalid JSON, otherwise as [`ConstraintGraph::build`].
    pub fn from_json_str(json: &str) -> WangResult<Self> {
        let raw: RawGraph = serde_json::from_str(json)?;
        Self::build(raw)
    }

    /// Every clique member that is itself a key must list the clique.
    fn check_symmetry(&self) -> WangResult<()> {
        for (key, cliques) in &self.cliques {
            for clique in cliques {
                for member in clique.iter().filter(|&member| member != key) {
                    if let Some(member_cliques) = self.cliques.get(member) {
                        if !member_cliques.contains(clique) {
                            return Err(WangError::MalformedGraph(format!(
                                "clique {clique} listed under '{key}' is missing from '{member}'"
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the terrains compatible with every label in `labels`.
    ///
    /// With no labels, every anchor label in the graph is a candidate. An
    /// empty result is valid: no terrain fits all given labels at once.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLabel` if `labels[0]` has no entry in the graph.
    pub fn candidates_for(&self, labels: &[Terrain]) -> WangResult<BTreeSet<Terrain>> {
        let Some((anchor, rest)) = labels.split_first() else {
            return Ok(self.cliques.keys().cloned().collect());
        };

        let mut surviving: Vec<&Clique> = self
            .cliques
            .get(anchor)
            .ok_or_else(|| WangError::UnknownLabel(anchor.clone()))?
            .iter()
            .collect();

        for label in rest {
            surviving.retain(|clique| clique.contains(label));
            if surviving.is_empty() {
                break;
            }
        }

        Ok(surviving.into_iter().flat_map(Clique::iter).cloned().collect())
    }

    /// Returns true if some clique contains every label in `labels`.
    #[must_use]
    pub fn allows(&self, labels: &[Terrain]) -> bool {
        self.cliques
            .values()
            .flatten()
            .any(|clique| labels.iter().all(|label| clique.contains(label)))
    }

    /// Returns the cliques anchored on `label`, if it is a key.
    #[must_use]
    pub fn cliques_for(&self, label: &Terrain) -> Option<&BTreeSet<Clique>> {
        self.cliques.get(label)
    }

    /// Returns true if `label` is a key of the graph.
    #[must_use]
    pub fn contains(&self, label: &Terrain) -> bool {
        self.cliques.contains_key(label)
    }

    /// Iterates the key labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &Terrain> {
        self.cliques.keys()
    }

    /// Returns the number of key labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cliques.len()
    }

    /// Returns true if the graph has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cliques.is_empty()
    }

    /// Returns the number of distinct cliques.
    #[must_use]
    pub fn clique_count(&self) -> usize {
        self.cliques
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }
}
