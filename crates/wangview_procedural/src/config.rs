//! # Configuration
//!
//! Map settings, the terrain graph and an optional fixed map, loaded from
//! one TOML file at startup.
//!
//! ```toml
//! [map]
//! width = 32
//! height = 20
//! seed = 42
//! max_attempts = 16
//!
//! [terrain]
//! a = [["a", "b"], ["c", "a"]]
//! b = [["a", "b"], ["b", "c"]]
//! c = [["b", "c"], ["c", "a"]]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WangError, WangResult};
use crate::fixed_map::FixedMap;
use crate::hypergraph::{ConstraintGraph, RawGraph};
use crate::terrain::MapSeed;

/// Whole-map retries after a dead end, unless configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Smallest map that holds one tile (2x2 corner points).
pub const MIN_MAP_DIMENSION: usize = 2;

const fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// Size and generation policy of a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapSettings {
    /// Terrain points per row.
    pub width: usize,
    /// Terrain points per column.
    pub height: usize,
    /// Session seed; the default seed when absent.
    #[serde(default)]
    pub seed: Option<MapSeed>,
    /// Attempts per map or scrolled line before a dead end is reported.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl MapSettings {
    /// Creates settings with the default seed and retry budget.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the session seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: MapSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a dimension is below two points or no
    /// attempts are allowed.
    pub fn validate(&self) -> WangResult<()> {
        if self.width < MIN_MAP_DIMENSION || self.height < MIN_MAP_DIMENSION {
            return Err(WangError::InvalidConfig(format!(
                "map must be at least {MIN_MAP_DIMENSION}x{MIN_MAP_DIMENSION} points, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_attempts == 0 {
            return Err(WangError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WangviewConfig {
    /// Map settings.
    pub map: MapSettings,
    /// Terrain hypergraph, label -> cliques.
    pub terrain: RawGraph,
    /// Explicit map used instead of generation.
    #[serde(default)]
    pub fixed_map: Option<FixedMap>,
}

impl WangviewConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Parse` on invalid TOML and `InvalidConfig` on bad values.
    pub fn from_toml_str(text: &str) -> WangResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`WangviewConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> WangResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first problem.
    pub fn validate(&self) -> WangResult<()> {
        self.map.validate()?;
        if self.terrain.is_empty() {
            return Err(WangError::InvalidConfig(
                "terrain table must list at least one label".to_string(),
            ));
        }
        if let Some(fixed) = &self.fixed_map {
            fixed.validate()?;
            if (fixed.width, fixed.height) != (self.map.width, self.map.height) {
                return Err(WangError::InvalidConfig(format!(
                    "fixed map is {}x{} but the map is {}x{}",
                    fixed.width, fixed.height, self.map.width, self.map.height
                )));
            }
        }
        Ok(())
    }

    /// Builds the constraint graph from the `[terrain]` table.
    ///
    /// # Errors
    ///
    /// Returns `MalformedGraph` on inconsistent cliques.
    pub fn graph(&self) -> WangResult<ConstraintGraph> {
        ConstraintGraph::build(self.terrain.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"
        [map]
        width = 10
        height = 8
        seed = 42

        [terrain]
        a = [["a", "b"], ["c", "a"]]
        b = [["a", "b"], ["b", "c"]]
        c = [["b", "c"], ["c", "a"]]
    "#;

    #[test]
    fn test_parse_basic() {
        let config = WangviewConfig::from_toml_str(BASIC).unwrap();
        assert_eq!(config.map.width, 10);
        assert_eq!(config.map.seed, Some(MapSeed::new(42)));
        assert_eq!(config.map.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(config.fixed_map.is_none());
        assert_eq!(config.graph().unwrap().len(), 3);
    }

    #[test]
    fn test_fixed_map_section() {
        let text = r#"
            [map]
            width = 2
            height = 2

            [terrain]
            a = [["a", "b"]]
            b = [["a", "b"]]

            [fixed_map]
            width = 2
            height = 2
            rows = [["a", "b"], ["b", "a"]]
        "#;
        let config = WangviewConfig::from_toml_str(text).unwrap();
        assert_eq!(config.fixed_map.unwrap().rows.len(), 2);
    }

    #[test]
    fn test_fixed_map_size_must_match() {
        let text = r#"
            [map]
            width = 3
            height = 2

            [terrain]
            a = [["a"]]

            [fixed_map]
            width = 2
            height = 2
            rows = [["a", "a"], ["a", "a"]]
        "#;
        let result = WangviewConfig::from_toml_str(text);
        assert!(matches!(result, Err(WangError::InvalidConfig(_))));
    }

    #[test]
    fn test_tiny_map_rejected() {
        let settings = MapSettings::new(1, 5);
        assert!(matches!(settings.validate(), Err(WangError::InvalidConfig(_))));
        let settings = MapSettings::new(5, 5).with_max_attempts(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let text = BASIC.replace("seed = 42", "sed = 42");
        let result = WangviewConfig::from_toml_str(&text);
        assert!(matches!(result, Err(WangError::Parse { format: "TOML", .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = WangviewConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(WangError::Io(_))));
    }
}
