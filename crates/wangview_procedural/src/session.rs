//! # Map Session
//!
//! Owns everything one map view needs: the constraint graph, the bounded
//! terrain grid and the random source.
//!
//! ## Responsibilities
//!
//! - **Regenerate**: build a complete new map ("new map" request)
//! - **Fixed maps**: load an explicit map instead of generating one
//! - **Scroll**: generate one line next to a border and rotate it in
//! - **Retry policy**: dead ends are retried here, bounded by
//!   `max_attempts`; the generator itself never retries
//!
//! A regeneration builds into a fresh grid and only replaces the current one
//! on success, so a failed request leaves the previous map intact.
//!
//! ## Example
//!
//! ```rust
//! use wangview_procedural::{ConstraintGraph, MapSession, MapSettings, MapSeed, Direction};
//!
//! let graph = ConstraintGraph::from_json_str(
//!     r#"{"a": [["a","b"],["c","a"]], "b": [["a","b"],["b","c"]], "c": [["b","c"],["c","a"]]}"#,
//! ).unwrap();
//! let settings = MapSettings::new(12, 8).with_seed(MapSeed::new(42));
//!
//! let mut session = MapSession::new(graph, settings).unwrap();
//! session.regenerate().unwrap();
//! session.scroll(Direction::Right).unwrap();
//! assert!(session.grid().is_full());
//! ```

use rand_chacha::ChaCha8Rng;
use wangview_core::BoundedGrid;

use crate::config::{MapSettings, WangviewConfig};
use crate::error::{WangError, WangResult};
use crate::fixed_map::FixedMap;
use crate::generator::RowGenerator;
use crate::hypergraph::ConstraintGraph;
use crate::stream;
use crate::terrain::{MapSeed, Terrain};

/// Side of the map a scrolled line is added to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// New row above the top row.
    Up,
    /// New row below the bottom row.
    Down,
    /// New column left of the left column.
    Left,
    /// New column right of the right column.
    Right,
}

impl Direction {
    /// Returns true if the new line is a row.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Returns true if the new line goes before row/column 0.
    #[inline]
    #[must_use]
    pub const fn is_top_left(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

/// One map view: graph, terrain grid and random source.
#[derive(Debug)]
pub struct MapSession {
    graph: ConstraintGraph,
    settings: MapSettings,
    seed: MapSeed,
    grid: BoundedGrid<Terrain>,
    rng: ChaCha8Rng,
    /// Number of regenerations requested so far.
    generation: u64,
}

impl MapSession {
    /// Creates a session with an empty grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the settings are invalid.
    pub fn new(graph: ConstraintGraph, settings: MapSettings) -> WangResult<Self> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_default();

        Ok(Self {
            grid: BoundedGrid::new(settings.width, settings.height),
            rng: seed.rng(),
            graph,
            settings,
            seed,
            generation: 0,
        })
    }

    /// Creates a session from a configuration file and fills it, from the
    /// fixed map if one is configured, otherwise by generation.
    ///
    /// # Errors
    ///
    /// Returns configuration, graph and generation errors.
    pub fn from_config(config: &WangviewConfig) -> WangResult<Self> {
        let mut session = Self::new(config.graph()?, config.map.clone())?;
        match &config.fixed_map {
            Some(fixed) => session.load_fixed_map(fixed)?,
            None => session.regenerate()?,
        }
        Ok(session)
    }

    /// Returns the terrain grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &BoundedGrid<Terrain> {
        &self.grid
    }

    /// Returns the constraint graph.
    #[inline]
    #[must_use]
    pub const fn graph(&self) -> &ConstraintGraph {
        &self.graph
    }

    /// Returns the map settings.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Returns the session seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> MapSeed {
        self.seed
    }

    /// Returns how many regenerations have been requested.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the corner labels of the tile at `(x, y)`, ordered
    /// `(x,y), (x,y+1), (x+1,y), (x+1,y+1)`.
    ///
    /// # Errors
    ///
    /// Returns a grid index error outside the map.
    pub fn corners(&self, x: usize, y: usize) -> WangResult<[&Terrain; 4]> {
        Ok(self.grid.corners(x, y)?)
    }

    /// Replaces the map with a newly generated one.
    ///
    /// The n-th map of a session is drawn from `seed.derive(n)`, so maps are
    /// reproducible individually. Dead ends restart the whole map with fresh
    /// draws, up to `max_attempts` times.
    ///
    /// # Errors
    ///
    /// Returns `ExhaustedOptions` once the attempts are used up, or any
    /// other generation error immediately. The previous map is kept.
    pub fn regenerate(&mut self) -> WangResult<()> {
        self.generation += 1;
        let map_seed = self.seed.derive(self.generation);
        let mut rng = map_seed.rng();
        let (width, height) = (self.settings.width, self.settings.height);

        let mut attempt = 1;
        let grid = loop {
            match build_grid(&self.graph, width, height, &mut rng) {
                Ok(grid) => break grid,
                Err(err @ WangError::ExhaustedOptions { .. }) if attempt < self.settings.max_attempts => {
                    tracing::warn!(attempt, error = %err, "map generation hit a dead end, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };

        self.grid = grid;
        self.rng = rng;
        tracing::info!(
            generation = self.generation,
            seed = map_seed.value(),
            attempts = attempt,
            width,
            height,
            "map regenerated"
        );
        Ok(())
    }

    /// Replaces the map with an explicit one.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the map is malformed or not the session's size
    /// - `UnknownLabel` if it uses a label the graph does not know
    pub fn load_fixed_map(&mut self, map: &FixedMap) -> WangResult<()> {
        map.validate()?;
        if (map.width, map.height) != (self.settings.width, self.settings.height) {
            return Err(WangError::InvalidConfig(format!(
                "fixed map is {}x{} but the session map is {}x{}",
                map.width, map.height, self.settings.width, self.settings.height
            )));
        }
        if let Some(unknown) = map.labels().find(|&label| !self.graph.contains(label)) {
            return Err(WangError::UnknownLabel(unknown.clone()));
        }

        let mut grid = BoundedGrid::new(self.settings.width, self.settings.height);
        map.fill(&mut grid)?;

        let undrawable = grid
            .corner_windows()
            .filter(|(_, _, corners)| {
                let corners: Vec<Terrain> = corners.iter().map(|&label| label.clone()).collect();
                !self.graph.allows(&corners)
            })
            .count();
        if undrawable > 0 {
            tracing::warn!(undrawable, "fixed map has tiles with no matching clique");
        }

        self.grid = grid;
        tracing::info!(width = map.width, height = map.height, "fixed map loaded");
        Ok(())
    }

    /// Generates one line next to a border and rotates it into the map.
    ///
    /// The border line constrains the new line exactly as a previous row
    /// constrains the next one; the corner rule is symmetric, so columns use
    /// the same generator. The opposite line is evicted.
    ///
    /// # Errors
    ///
    /// - a grid index error if the map is empty
    /// - `ExhaustedOptions` once `max_attempts` lines have hit dead ends
    ///
    /// The grid is unchanged on error.
    pub fn scroll(&mut self, direction: Direction) -> WangResult<()> {
        let horizontal = direction.is_horizontal();
        let top_left = direction.is_top_left();
        let border: Vec<Terrain> = self
            .grid
            .border(horizontal, top_left)?
            .into_iter()
            .cloned()
            .collect();

        let generator = RowGenerator::new(&self.graph);
        let mut attempt = 1;
        let line = loop {
            match generator.generate_row(border.len(), Some(border.as_slice()), &mut self.rng) {
                Ok(line) => break line,
                Err(err @ WangError::ExhaustedOptions { .. }) if attempt < self.settings.max_attempts => {
                    tracing::warn!(attempt, ?direction, error = %err, "scrolled line hit a dead end, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };

        self.grid.add_line(line, horizontal, top_left)?;
        tracing::debug!(?direction, attempts = attempt, "map scrolled");
        Ok(())
    }
}

/// Fills a fresh grid with `height` streamed rows.
fn build_grid(
    graph: &ConstraintGraph,
    width: usize,
    height: usize,
    rng: &mut ChaCha8Rng,
) -> WangResult<BoundedGrid<Terrain>> {
    let mut grid = BoundedGrid::new(width, height);
    for row in stream::rows(graph, width, height - 1, rng) {
        grid.add_line(row?, true, false)?;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> ConstraintGraph {
        ConstraintGraph::from_json_str(
            r#"{"a": [["a","b"],["c","a"]], "b": [["a","b"],["b","c"]], "c": [["b","c"],["c","a"]]}"#,
        )
        .unwrap()
    }

    fn snapshot(session: &MapSession) -> Vec<Vec<Terrain>> {
        session
            .grid()
            .rows()
            .map(|row| row.cloned().collect())
            .collect()
    }

    fn assert_drawable(session: &MapSession) {
        for (x, y, corners) in session.grid().corner_windows() {
            let corners: Vec<Terrain> = corners.iter().map(|&label| label.clone()).collect();
            assert!(session.graph().allows(&corners), "tile ({x}, {y}) is not drawable");
        }
    }

    #[test]
    fn test_regenerate_fills_grid() {
        let settings = MapSettings::new(9, 6).with_seed(MapSeed::new(1));
        let mut session = MapSession::new(triangle(), settings).unwrap();
        assert!(session.grid().is_empty());

        session.regenerate().unwrap();
        assert!(session.grid().is_full());
        assert_eq!(session.generation(), 1);
        assert_drawable(&session);
    }

    #[test]
    fn test_regenerations_are_reproducible_per_seed() {
        let settings = MapSettings::new(10, 10).with_seed(MapSeed::new(2024));
        let mut a = MapSession::new(triangle(), settings.clone()).unwrap();
        let mut b = MapSession::new(triangle(), settings).unwrap();

        a.regenerate().unwrap();
        b.regenerate().unwrap();
        assert_eq!(snapshot(&a), snapshot(&b));

        a.regenerate().unwrap();
        b.regenerate().unwrap();
        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(a.generation(), 2);
    }

    #[test]
    fn test_scroll_keeps_map_drawable() {
        let settings = MapSettings::new(7, 5).with_seed(MapSeed::new(8));
        let mut session = MapSession::new(triangle(), settings).unwrap();
        session.regenerate().unwrap();

        for direction in [Direction::Down, Direction::Right, Direction::Up, Direction::Left] {
            let before = snapshot(&session);
            session.scroll(direction).unwrap();
            let after = snapshot(&session);

            assert_eq!((session.grid().width(), session.grid().height()), (7, 5));
            assert_drawable(&session);
            match direction {
                Direction::Down => assert_eq!(after[0], before[1]),
                Direction::Up => assert_eq!(after[1], before[0]),
                Direction::Right => assert_eq!(after[0][0], before[0][1]),
                Direction::Left => assert_eq!(after[0][1], before[0][0]),
            }
        }
    }

    #[test]
    fn test_scroll_on_empty_grid_fails() {
        let mut session = MapSession::new(triangle(), MapSettings::new(4, 4)).unwrap();
        assert!(matches!(session.scroll(Direction::Down), Err(WangError::Grid(_))));
    }

    #[test]
    fn test_fixed_map_loaded() {
        let mut session = MapSession::new(triangle(), MapSettings::new(3, 2)).unwrap();
        let map = FixedMap::from_rows([["a", "b", "c"], ["b", "c", "a"]]).unwrap();
        session.load_fixed_map(&map).unwrap();

        assert!(session.grid().is_full());
        let corners = session.corners(1, 0).unwrap();
        assert_eq!(corners.map(Terrain::as_str), ["b", "c", "c", "a"]);
    }

    #[test]
    fn test_fixed_map_checks() {
        let mut session = MapSession::new(triangle(), MapSettings::new(3, 2)).unwrap();

        let wrong_size = FixedMap::from_rows([["a", "b"], ["b", "a"]]).unwrap();
        assert!(matches!(
            session.load_fixed_map(&wrong_size),
            Err(WangError::InvalidConfig(_))
        ));

        let unknown = FixedMap::from_rows([["a", "b", "q"], ["b", "c", "a"]]).unwrap();
        assert!(matches!(
            session.load_fixed_map(&unknown),
            Err(WangError::UnknownLabel(label)) if label.as_str() == "q"
        ));
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_failed_regeneration_keeps_previous_map() {
        // "w" is only a clique member: a first-row cell can pick it, and the
        // next cell then anchors on a label with no entry
        let graph = ConstraintGraph::build(vec![("a", vec![vec!["a", "w"]])]).unwrap();
        let mut session = MapSession::new(graph, MapSettings::new(6, 6).with_seed(MapSeed::new(3))).unwrap();
        let fixed = FixedMap::from_rows(vec![vec!["a"; 6]; 6]).unwrap();
        session.load_fixed_map(&fixed).unwrap();

        let mut failures = 0;
        for _ in 0..20 {
            match session.regenerate() {
                Ok(()) => {}
                Err(WangError::UnknownLabel(label)) => {
                    assert_eq!(label.as_str(), "w");
                    failures += 1;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(failures > 0, "a member-only label should eventually be drawn");
        assert!(session.grid().is_full());
    }

    #[test]
    fn test_direction_flags() {
        assert!(Direction::Up.is_horizontal() && Direction::Up.is_top_left());
        assert!(Direction::Down.is_horizontal() && !Direction::Down.is_top_left());
        assert!(!Direction::Left.is_horizontal() && Direction::Left.is_top_left());
        assert!(!Direction::Right.is_horizontal() && !Direction::Right.is_top_left());
    }
}
