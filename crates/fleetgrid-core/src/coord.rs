//! Coordinate spaces, cell sizes, footprints and base-grid rectangles.
//!
//! Two coordinate systems coexist:
//!
//! - [`BaseCoord`]: a cell of the shared base occupancy grid.
//! - [`TilingCoord`]: a cell of the fleet grid induced by one [`CellSize`].
//!   Tiling cell `(fx, fy)` covers the base square
//!   `[fx*cs, (fx+1)*cs) x [fy*cs, (fy+1)*cs)`. Tiles never overlap.
//!
//! The only way across is [`TilingCoord::to_base`], [`BaseCoord::to_tiling`]
//! and [`BaseCoord::containing_tile`]; nothing else in the workspace divides
//! or multiplies coordinates by a cell size.
//!
//! Both coordinate types order row-major (`y` first, then `x`), so the
//! minimum of a set is its top-left-most cell.

use crate::error::GridError;
use std::cmp::Ordering;
use std::fmt;

/// Unit moves in the four cardinal directions, as `(dx, dy)`.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// ── CellSize ───────────────────────────────────────────────────────

/// Side length, in base cells, of the square footprint shared by one fleet.
///
/// Always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellSize(u32);

impl CellSize {
    /// A single base cell.
    pub const ONE: CellSize = CellSize(1);

    /// Create a cell size, rejecting zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetgrid_core::CellSize;
    ///
    /// assert_eq!(CellSize::new(3).unwrap().get(), 3);
    /// assert!(CellSize::new(0).is_err());
    /// ```
    pub fn new(cs: u32) -> Result<Self, GridError> {
        if cs == 0 {
            return Err(GridError::ZeroCellSize);
        }
        Ok(Self(cs))
    }

    /// The side length.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of base cells covered by one footprint.
    pub fn area(self) -> u64 {
        u64::from(self.0) * u64::from(self.0)
    }
}

impl TryFrom<u32> for CellSize {
    type Error = GridError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── BaseCoord ──────────────────────────────────────────────────────

/// A cell of the shared base grid, `x` = column, `y` = row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BaseCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl BaseCoord {
    /// Construct from column and row.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The tiling cell whose top-left corner is exactly this cell, or
    /// `None` if the coordinate is not aligned to `cs` on both axes.
    pub fn to_tiling(self, cs: CellSize) -> Option<TilingCoord> {
        if self.is_aligned(cs) {
            Some(self.containing_tile(cs))
        } else {
            None
        }
    }

    /// The tiling cell that covers this base cell.
    pub fn containing_tile(self, cs: CellSize) -> TilingCoord {
        TilingCoord::new(self.x / cs.get(), self.y / cs.get())
    }

    /// Whether both axes are multiples of `cs`.
    pub fn is_aligned(self, cs: CellSize) -> bool {
        self.x % cs.get() == 0 && self.y % cs.get() == 0
    }

    /// Move by `(dx, dy)`, or `None` if the result would be negative or
    /// overflow.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// The `cs x cs` block whose top-left corner is this cell.
    pub fn footprint(self, cs: CellSize) -> Footprint {
        Footprint::new(self, cs)
    }
}

impl Ord for BaseCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for BaseCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BaseCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// ── TilingCoord ────────────────────────────────────────────────────

/// A cell of the fleet grid for some cell size.
///
/// A `TilingCoord` carries no cell size of its own; it is only meaningful
/// next to the [`CellSize`] of the fleet grid it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilingCoord {
    /// Fleet-grid column.
    pub x: u32,
    /// Fleet-grid row.
    pub y: u32,
}

impl TilingCoord {
    /// Construct from fleet-grid column and row.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The base cell at this tile's top-left corner.
    pub fn to_base(self, cs: CellSize) -> BaseCoord {
        BaseCoord::new(self.x * cs.get(), self.y * cs.get())
    }

    /// The base cells covered by this tile.
    pub fn footprint(self, cs: CellSize) -> Footprint {
        Footprint::new(self.to_base(cs), cs)
    }

    /// Move by `(dx, dy)`, or `None` if the result would be negative.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl Ord for TilingCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for TilingCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TilingCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

// ── Footprint ──────────────────────────────────────────────────────

/// A square block of base cells: `[x, x+size) x [y, y+size)`.
///
/// Footprints may extend past the edge of a grid; bounds are the grid's
/// concern ([`BaseGrid::footprint_passable`](crate::BaseGrid::footprint_passable)).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    origin: BaseCoord,
    size: u32,
}

impl Footprint {
    /// The `cs x cs` block with top-left corner `origin`.
    pub fn new(origin: BaseCoord, cs: CellSize) -> Self {
        Self {
            origin,
            size: cs.get(),
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> BaseCoord {
        self.origin
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    fn x_end(&self) -> u64 {
        u64::from(self.origin.x) + u64::from(self.size)
    }

    fn y_end(&self) -> u64 {
        u64::from(self.origin.y) + u64::from(self.size)
    }

    /// Whether the footprint lies entirely inside a `width x height` grid.
    pub fn within(&self, width: u32, height: u32) -> bool {
        self.x_end() <= u64::from(width) && self.y_end() <= u64::from(height)
    }

    /// Whether `cell` lies inside the footprint.
    pub fn contains(&self, cell: BaseCoord) -> bool {
        cell.x >= self.origin.x
            && cell.y >= self.origin.y
            && u64::from(cell.x) < self.x_end()
            && u64::from(cell.y) < self.y_end()
    }

    /// Whether the two footprints share at least one base cell.
    pub fn intersects(&self, other: &Footprint) -> bool {
        u64::from(self.origin.x) < other.x_end()
            && u64::from(other.origin.x) < self.x_end()
            && u64::from(self.origin.y) < other.y_end()
            && u64::from(other.origin.y) < self.y_end()
    }

    /// The exact base cells shared by both footprints, row-major.
    pub fn overlap(&self, other: &Footprint) -> Vec<BaseCoord> {
        self.overlap_within(other, u32::MAX, u32::MAX)
    }

    /// Shared cells inside `[0, width) x [0, height)`, row-major.
    ///
    /// Footprints that leave a grid may still intersect outside it; those
    /// cells are not listed, so the result is bounded by the grid area.
    pub fn overlap_within(&self, other: &Footprint, width: u32, height: u32) -> Vec<BaseCoord> {
        if !self.intersects(other) {
            return Vec::new();
        }
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        // Clipped to u32 bounds, so the casts cannot truncate.
        let x1 = self.x_end().min(other.x_end()).min(u64::from(width)) as u32;
        let y1 = self.y_end().min(other.y_end()).min(u64::from(height)) as u32;
        let mut out = Vec::new();
        for y in y0..y1 {
            for x in x0..x1 {
                out.push(BaseCoord::new(x, y));
            }
        }
        out
    }

    /// Every base cell of the footprint, row-major.
    ///
    /// Cells whose coordinates would not fit in `u32` are skipped; they can
    /// never be inside a grid.
    pub fn cells(&self) -> impl Iterator<Item = BaseCoord> + '_ {
        let x0 = self.origin.x;
        let x1 = x0.saturating_add(self.size);
        let y0 = self.origin.y;
        let y1 = y0.saturating_add(self.size);
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| BaseCoord::new(x, y)))
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.origin, self.size)
    }
}

// ── BaseRect ───────────────────────────────────────────────────────

/// A half-open rectangle of base cells: `[x, x+width) x [y, y+height)`.
///
/// Used to carve a map into placement regions (rooms either side of a
/// wall, corridor ends).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BaseRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in base cells.
    pub width: u32,
    /// Height in base cells.
    pub height: u32,
}

impl BaseRect {
    /// Construct from corner and extent.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `cell` lies inside the rectangle.
    pub fn contains(&self, cell: BaseCoord) -> bool {
        cell.x >= self.x
            && cell.y >= self.y
            && u64::from(cell.x) < u64::from(self.x) + u64::from(self.width)
            && u64::from(cell.y) < u64::from(self.y) + u64::from(self.height)
    }

    /// Whether every cell of `fp` lies inside the rectangle.
    pub fn contains_footprint(&self, fp: &Footprint) -> bool {
        let o = fp.origin();
        let size = u64::from(fp.size());
        o.x >= self.x
            && o.y >= self.y
            && u64::from(o.x) + size <= u64::from(self.x) + u64::from(self.width)
            && u64::from(o.y) + size <= u64::from(self.y) + u64::from(self.height)
    }
}

impl fmt::Display for BaseRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{})x[{},{})",
            self.x,
            u64::from(self.x) + u64::from(self.width),
            self.y,
            u64::from(self.y) + u64::from(self.height)
        )
    }
}

// ── Region ─────────────────────────────────────────────────────────

/// A placement region: an anchor rectangle plus optional extensions.
///
/// A footprint belongs to the region when it lies wholly inside the anchor
/// or wholly inside one extension. A fleet may use the region only when a
/// block of its size fits in the anchor ([`admits`](Region::admits)); the
/// extensions alone never qualify it. An intersection's corridor is an
/// anchor, and the half of the plaza next to it an extension.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    anchor: BaseRect,
    extensions: Vec<BaseRect>,
}

impl Region {
    /// A region of one rectangle.
    pub fn new(anchor: BaseRect) -> Self {
        Self {
            anchor,
            extensions: Vec::new(),
        }
    }

    /// Add an extension rectangle.
    pub fn with_extension(mut self, rect: BaseRect) -> Self {
        self.extensions.push(rect);
        self
    }

    /// The anchor rectangle.
    pub fn anchor(&self) -> BaseRect {
        self.anchor
    }

    /// Anchor first, then extensions in insertion order.
    pub fn rects(&self) -> impl Iterator<Item = &BaseRect> + '_ {
        std::iter::once(&self.anchor).chain(&self.extensions)
    }

    /// Whether a `cs x cs` block fits inside the anchor.
    pub fn admits(&self, cs: CellSize) -> bool {
        self.anchor.width >= cs.get() && self.anchor.height >= cs.get()
    }

    /// Whether `fp` lies wholly inside one of the rectangles.
    pub fn contains_footprint(&self, fp: &Footprint) -> bool {
        self.rects().any(|r| r.contains_footprint(fp))
    }
}

impl From<BaseRect> for Region {
    fn from(rect: BaseRect) -> Self {
        Self::new(rect)
    }
}
