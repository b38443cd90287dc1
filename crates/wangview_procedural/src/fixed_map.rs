//! # Fixed Maps
//!
//! An explicit terrain grid that bypasses generation entirely, e.g. a
//! hand-authored test scene. It is written into the grid through the same
//! `add_line` contract as generated rows, so the same dimension rules apply.

use serde::{Deserialize, Serialize};
use wangview_core::BoundedGrid;

use crate::error::{WangError, WangResult};
use crate::terrain::{Row, Terrain};

/// Explicit terrain grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedMap {
    /// Points per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Row data, top to bottom.
    pub rows: Vec<Row>,
}

impl FixedMap {
    /// Creates a fixed map from rows, taking the dimensions from the data.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rows are ragged or empty.
    pub fn from_rows<I, R, L>(rows: I) -> WangResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = L>,
        L: Into<Terrain>,
    {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let map = Self {
            width: rows.first().map_or(0, Vec::len),
            height: rows.len(),
            rows,
        };
        map.validate()?;
        Ok(map)
    }

    /// Parses a fixed map from JSON.
    ///
    /// # Errors
    ///
    /// Returns `Parse` on invalid JSON and `InvalidConfig` on bad dimensions.
    pub fn from_json_str(json: &str) -> WangResult<Self> {
        let map: Self = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    /// Checks the declared dimensions against the row data.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first mismatch.
    pub fn validate(&self) -> WangResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WangError::InvalidConfig(format!(
                "fixed map must not be empty (got {}x{})",
                self.width, self.height
            )));
        }
        if self.rows.len() != self.height {
            return Err(WangError::InvalidConfig(format!(
                "fixed map declares {} rows but has {}",
                self.height,
                self.rows.len()
            )));
        }
        if let Some((y, row)) = self.rows.iter().enumerate().find(|(_, row)| row.len() != self.width) {
            return Err(WangError::InvalidConfig(format!(
                "fixed map row {y} has {} points, expected {}",
                row.len(),
                self.width
            )));
        }
        Ok(())
    }

    /// Appends every row to `grid`, top to bottom.
    ///
    /// # Errors
    ///
    /// Propagates grid dimension errors.
    pub fn fill(&self, grid: &mut BoundedGrid<Terrain>) -> WangResult<()> {
        for row in &self.rows {
            grid.add_line(row.iter().cloned(), true, false)?;
        }
        Ok(())
    }

    /// Iterates the label of every point, row-major.
    pub fn labels(&self) -> impl Iterator<Item = &Terrain> {
        self.rows.iter().flatten()
    }
}
