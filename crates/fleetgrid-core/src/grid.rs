//! The base occupancy grid shared by every fleet.

use crate::coord::{BaseCoord, Footprint};
use crate::error::GridError;
use std::fmt;

/// Terrain characters treated as passable. Everything else is blocked.
pub const PASSABLE_TERRAIN: [char; 2] = ['.', 'G'];

/// Why a base cell cannot be occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockCause {
    /// The cell lies outside the grid.
    OutOfBounds,
    /// The cell is inside the grid but blocked.
    Wall,
}

impl fmt::Display for BlockCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::Wall => write!(f, "wall"),
        }
    }
}

/// One base cell of a footprint that is not passable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockedCell {
    /// The cell (may lie outside the grid).
    pub coord: BaseCoord,
    /// Why it is blocked.
    pub cause: BlockCause,
}

/// A rectangular grid of passable/blocked base cells.
///
/// Immutable after construction. Cells are stored row-major.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{BaseCoord, BaseGrid};
///
/// let grid = BaseGrid::from_rows(4, 2, &["..@.", "...."]).unwrap();
/// assert!(grid.is_passable(BaseCoord::new(1, 0)));
/// assert!(!grid.is_passable(BaseCoord::new(2, 0)));
/// assert!(!grid.is_passable(BaseCoord::new(4, 0))); // out of bounds
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BaseGrid {
    width: u32,
    height: u32,
    passable: Vec<bool>,
}

impl BaseGrid {
    /// Build from a row-major passability vector of `width * height` cells.
    pub fn new(width: u32, height: u32, passable: Vec<bool>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if passable.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: passable.len(),
            });
        }
        Ok(Self {
            width,
            height,
            passable,
        })
    }

    /// A fully passable grid.
    pub fn open(width: u32, height: u32) -> Result<Self, GridError> {
        Self::from_fn(width, height, |_| true)
    }

    /// Build by evaluating `passable` at every cell, row-major.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut passable: impl FnMut(BaseCoord) -> bool,
    ) -> Result<Self, GridError> {
        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                cells.push(passable(BaseCoord::new(x, y)));
            }
        }
        Self::new(width, height, cells)
    }

    /// Build from terrain rows against a declared size.
    ///
    /// Characters in [`PASSABLE_TERRAIN`] are passable. A row count or row
    /// length that disagrees with the declared size is a fatal error.
    pub fn from_rows<S: AsRef<str>>(
        width: u32,
        height: u32,
        rows: &[S],
    ) -> Result<Self, GridError> {
        if rows.len() != height as usize {
            return Err(GridError::RowCountMismatch {
                declared: height,
                actual: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width as usize {
                return Err(GridError::RowLengthMismatch {
                    row: i,
                    declared: width,
                    actual: len,
                });
            }
            cells.extend(row.chars().map(|ch| PASSABLE_TERRAIN.contains(&ch)));
        }
        Self::new(width, height, cells)
    }

    /// Parse map text: `key value` header lines (`width` and `height`
    /// required, others such as `type` ignored), a `map` marker line, then
    /// the terrain rows.
    ///
    /// Blank lines after the marker are skipped; trailing `\r` is stripped.
    ///
    /// ```
    /// use fleetgrid_core::BaseGrid;
    ///
    /// let text = "type octile\nheight 2\nwidth 3\nmap\n.@.\n...\n";
    /// let grid = BaseGrid::parse_map(text).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (3, 2));
    /// assert_eq!(grid.passable_count(), 5);
    /// ```
    pub fn parse_map(text: &str) -> Result<Self, GridError> {
        let mut width = None;
        let mut height = None;
        let mut lines = text.lines();

        for line in lines.by_ref() {
            let line = line.trim_end_matches('\r').trim();
            if line == "map" {
                break;
            }
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(GridError::InvalidHeader {
                    line: line.to_string(),
                });
            };
            let slot = match key {
                "width" => &mut width,
                "height" => &mut height,
                _ => continue,
            };
            let parsed: u32 = value.parse().map_err(|_| GridError::InvalidHeader {
                line: line.to_string(),
            })?;
            *slot = Some(parsed);
        }

        let width = width.ok_or(GridError::MissingHeader { field: "width" })?;
        let height = height.ok_or(GridError::MissingHeader { field: "height" })?;
        let rows: Vec<&str> = lines
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        Self::from_rows(width, height, &rows[..])
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.passable.len()
    }

    /// Number of passable cells.
    pub fn passable_count(&self) -> usize {
        self.passable.iter().filter(|&&p| p).count()
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: BaseCoord) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Whether `cell` is inside the grid and passable.
    pub fn is_passable(&self, cell: BaseCoord) -> bool {
        self.contains(cell)
            && self.passable[(cell.y as usize) * (self.width as usize) + (cell.x as usize)]
    }

    /// Whether every cell of `fp` is inside the grid and passable.
    ///
    /// Stops at the first blocked cell.
    pub fn footprint_passable(&self, fp: &Footprint) -> bool {
        fp.within(self.width, self.height) && fp.cells().all(|c| self.is_passable(c))
    }

    /// The cells of `fp` that make it unplaceable.
    ///
    /// Walls inside the grid are listed row-major. If the footprint leaves
    /// the grid, one trailing [`BlockCause::OutOfBounds`] record at its
    /// first outside cell (row-major) stands for the whole outside part, so
    /// the result never holds more than `width * height + 1` records.
    pub fn blocked_cells(&self, fp: &Footprint) -> Vec<BlockedCell> {
        let mut out = Vec::new();
        let o = fp.origin();
        let size = u64::from(fp.size());
        let x_end = u64::from(o.x) + size;
        let y_end = u64::from(o.y) + size;

        // Clipped to the grid; both bounds fit in u32.
        let x_stop = x_end.min(u64::from(self.width)) as u32;
        let y_stop = y_end.min(u64::from(self.height)) as u32;
        for y in o.y..y_stop {
            for x in o.x..x_stop {
                let coord = BaseCoord::new(x, y);
                if !self.is_passable(coord) {
                    out.push(BlockedCell {
                        coord,
                        cause: BlockCause::Wall,
                    });
                }
            }
        }

        if !fp.within(self.width, self.height) {
            let coord = if o.y >= self.height {
                o
            } else if x_end > u64::from(self.width) {
                BaseCoord::new(o.x.max(self.width), o.y)
            } else {
                BaseCoord::new(o.x, self.height)
            };
            out.push(BlockedCell {
                coord,
                cause: BlockCause::OutOfBounds,
            });
        }
        out
    }
}

impl fmt::Debug for BaseGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("passable", &self.passable_count())
            .finish()
    }
}

impl fmt::Display for BaseGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = if self.is_passable(BaseCoord::new(x, y)) {
                    '.'
                } else {
                    '@'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
