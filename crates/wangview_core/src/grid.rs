//! # Bounded Grid
//!
//! Fixed-capacity two-dimensional ring buffer for streamed map data.
//!
//! ## Axis Lifecycle
//!
//! ```text
//!   Empty ──add──▶ Growing(n) ──add──▶ Full ──add──▶ Rotating
//!                     │  ▲                             │  ▲
//!                     └──┘                             └──┘
//! ```
//!
//! The first line added on an axis fixes the length of every later line on
//! that axis. Once an axis reaches its maximum, each new line evicts the line
//! at the opposite end, so capacity never grows past the declared size.
//!
//! ## Coordinates
//!
//! `x` selects a column and `y` selects a row. Row 0 is the top, column 0 is
//! the left edge. Inserting "at start" means above row 0 (rows) or left of
//! column 0 (columns).

use std::collections::vec_deque;
use std::collections::VecDeque;
use std::fmt;

use crate::error::{GridError, GridResult};

/// Occupancy of one grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisState {
    /// No lines on this axis.
    Empty,
    /// Fewer lines than the maximum.
    Growing(usize),
    /// At capacity, nothing evicted yet.
    Full,
    /// At capacity, at least one line evicted since the last clear.
    Rotating,
}

/// Fixed-capacity 2D buffer of rows and columns.
///
/// # Example
///
/// ```rust
/// use wangview_core::BoundedGrid;
///
/// let mut grid = BoundedGrid::new(2, 2);
/// grid.add_line(vec!['a', 'b'], true, false).unwrap();
/// grid.add_line(vec!['c', 'd'], true, false).unwrap();
///
/// // Scroll right: new column on the right, left column evicted
/// grid.add_line(vec!['e', 'f'], false, false).unwrap();
/// assert_eq!(grid.row(0).unwrap().copied().collect::<Vec<_>>(), vec!['b', 'e']);
/// ```
#[derive(Clone, Debug)]
pub struct BoundedGrid<T> {
    /// Row-major storage; every row holds exactly `width` values.
    rows: VecDeque<VecDeque<T>>,
    /// Populated column count.
    width: usize,
    /// Populated row count (always `rows.len()`).
    height: usize,
    /// Declared column capacity.
    max_width: usize,
    /// Declared row capacity.
    max_height: usize,
    /// A row has been evicted since the last clear.
    rows_rotated: bool,
    /// A column has been evicted since the last clear.
    columns_rotated: bool,
}

impl<T> BoundedGrid<T> {
    /// Creates an empty grid with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero.
    #[must_use]
    pub fn new(max_width: usize, max_height: usize) -> Self {
        assert!(max_width > 0, "Grid width capacity must be greater than zero");
        assert!(max_height > 0, "Grid height capacity must be greater than zero");

        Self {
            rows: VecDeque::with_capacity(max_height),
            width: 0,
            height: 0,
            max_width,
            max_height,
            rows_rotated: false,
            columns_rotated: false,
        }
    }

    /// Returns the populated width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the populated height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the declared column capacity.
    #[inline]
    #[must_use]
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Returns the declared row capacity.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Returns true if nothing has been added since creation or the last clear.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Returns true if both axes are at their declared maximum.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.width == self.max_width && self.height == self.max_height
    }

    /// Returns the state of the row axis (`horizontal`) or the column axis.
    #[must_use]
    pub const fn axis_state(&self, horizontal: bool) -> AxisState {
        let (count, max, rotated) = if horizontal {
            (self.height, self.max_height, self.rows_rotated)
        } else {
            (self.width, self.max_width, self.columns_rotated)
        };

        if count == 0 {
            AxisState::Empty
        } else if count < max {
            AxisState::Growing(count)
        } else if rotated {
            AxisState::Rotating
        } else {
            AxisState::Full
        }
    }

    /// Removes all contents, keeping the declared capacity.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.width = 0;
        self.height = 0;
        self.rows_rotated = false;
        self.columns_rotated = false;
    }

    /// Adds a row (`horizontal`) or a column, at the start or the end.
    ///
    /// When the axis is already at capacity the line at the opposite end is
    /// evicted.
    ///
    /// # Returns
    ///
    /// `true` if a line was evicted to make room.
    ///
    /// # Errors
    ///
    /// - `EmptyLine` if `values` is empty
    /// - `LineTooLong` if the first line on an axis exceeds the capacity
    /// - `DimensionMismatch` if a later line has the wrong length
    pub fn add_line<I>(&mut self, values: I, horizontal: bool, insert_at_start: bool) -> GridResult<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let line: Vec<T> = values.into_iter().collect();
        if horizontal {
            self.add_row(line, insert_at_start)
        } else {
            self.add_column(line, insert_at_start)
        }
    }

    fn add_row(&mut self, line: Vec<T>, insert_at_start: bool) -> GridResult<bool> {
        check_line("row", line.len(), self.width, self.max_width)?;

        let evicted = self.height == self.max_height;
        if evicted {
            if insert_at_start {
                self.rows.pop_back();
            } else {
                self.rows.pop_front();
            }
            self.rows_rotated = true;
            tracing::trace!(at_start = insert_at_start, "grid row evicted");
        } else {
            self.height += 1;
        }

        self.width = line.len();
        let row: VecDeque<T> = line.into();
        if insert_at_start {
            self.rows.push_front(row);
        } else {
            self.rows.push_back(row);
        }

        Ok(evicted)
    }

    fn add_column(&mut self, line: Vec<T>, insert_at_start: bool) -> GridResult<bool> {
        check_line("column", line.len(), self.height, self.max_height)?;

        if self.height == 0 {
            self.height = line.len();
            let capacity = self.max_width;
            self.rows
                .extend((0..line.len()).map(|_| VecDeque::with_capacity(capacity)));
        }

        let evicted = self.width == self.max_width;
        for (row, value) in self.rows.iter_mut().zip(line) {
            if evicted {
                if insert_at_start {
                    row.pop_back();
                } else {
                    row.pop_front();
                }
            }
            if insert_at_start {
                row.push_front(value);
            } else {
                row.push_back(value);
            }
        }

        if evicted {
            self.columns_rotated = true;
            tracing::trace!(at_start = insert_at_start, "grid column evicted");
        } else {
            self.width += 1;
        }

        Ok(evicted)
    }

    /// Returns the value at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` outside the populated area.
    pub fn at(&self, x: usize, y: usize) -> GridResult<&T> {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or_else(|| self.out_of_range(x, y))
    }

    /// Returns an iterator over row `y`, left to right.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `y` is not a populated row.
    pub fn row(&self, y: usize) -> GridResult<vec_deque::Iter<'_, T>> {
        self.rows
            .get(y)
            .map(VecDeque::iter)
            .ok_or_else(|| self.out_of_range(0, y))
    }

    /// Returns an iterator over column `x`, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `x` is not a populated column.
    pub fn column(&self, x: usize) -> GridResult<impl Iterator<Item = &T> + '_> {
        if x >= self.width {
            return Err(self.out_of_range(x, 0));
        }
        Ok(self.rows.iter().map(move |row| &row[x]))
    }

    /// Returns one of the four borders.
    ///
    /// `horizontal` selects the top/bottom row, otherwise the left/right
    /// column; `top_left` selects the top or left side.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` on an empty grid.
    pub fn border(&self, horizontal: bool, top_left: bool) -> GridResult<Vec<&T>> {
        if self.is_empty() {
            return Err(self.out_of_range(0, 0));
        }
        if horizontal {
            let y = if top_left { 0 } else { self.height - 1 };
            Ok(self.row(y)?.collect())
        } else {
            let x = if top_left { 0 } else { self.width - 1 };
            Ok(self.column(x)?.collect())
        }
    }

    /// Returns the four corner values of the tile whose top-left point is
    /// `(x, y)`, ordered `(x,y), (x,y+1), (x+1,y), (x+1,y+1)`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` unless `(x + 1, y + 1)` is populated.
    pub fn corners(&self, x: usize, y: usize) -> GridResult<[&T; 4]> {
        Ok([
            self.at(x, y)?,
            self.at(x, y + 1)?,
            self.at(x + 1, y)?,
            self.at(x + 1, y + 1)?,
        ])
    }

    /// Iterates every 2x2 corner window row-major as `(x, y, corners)`.
    pub fn corner_windows(&self) -> impl Iterator<Item = (usize, usize, [&T; 4])> + '_ {
        let tiles_x = self.width.saturating_sub(1);
        let tiles_y = self.height.saturating_sub(1);
        (0..tiles_y).flat_map(move |y| {
            (0..tiles_x).map(move |x| {
                let upper = &self.rows[y];
                let lower = &self.rows[y + 1];
                (x, y, [&upper[x], &lower[x], &upper[x + 1], &lower[x + 1]])
            })
        })
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = vec_deque::Iter<'_, T>> + '_ {
        self.rows.iter().map(VecDeque::iter)
    }

    fn out_of_range(&self, x: usize, y: usize) -> GridError {
        GridError::IndexOutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Validates a line against the length fixed for its axis (`fixed == 0`
/// while the axis is unset).
fn check_line(axis: &'static str, found: usize, fixed: usize, max: usize) -> GridResult<()> {
    if found == 0 {
        return Err(GridError::EmptyLine { axis });
    }
    if fixed == 0 {
        if found > max {
            return Err(GridError::LineTooLong { axis, max, found });
        }
    } else if found != fixed {
        return Err(GridError::DimensionMismatch {
            axis,
            expected: fixed,
            found,
        });
    }
    Ok(())
}

impl<T: fmt::Display> fmt::Display for BoundedGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, value) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}
