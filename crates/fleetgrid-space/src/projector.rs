//! Projection of the base grid onto a per-footprint tiling.

use fleetgrid_core::{BaseGrid, CellSize, Footprint, TilingCoord, DIRECTIONS};
use indexmap::IndexSet;
use smallvec::SmallVec;

/// The tiling grid seen by agents of one cell size.
///
/// Tile `(fx, fy)` covers base cells `[fx*cs, (fx+1)*cs) x [fy*cs, (fy+1)*cs)`.
/// The grid is `floor(width/cs) x floor(height/cs)` tiles; base cells in
/// the leftover right/bottom strip belong to no tile. A tile is valid when
/// all `cs*cs` base cells under it are passable, and only valid tiles are
/// stored, in row-major order.
#[derive(Clone, Debug)]
pub struct FleetGrid {
    cell_size: CellSize,
    width: u32,
    height: u32,
    valid: IndexSet<TilingCoord>,
}

/// Project `grid` onto the tiling for `cs`.
///
/// A map smaller than one tile on either axis yields an empty fleet grid,
/// not an error.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{BaseGrid, CellSize, TilingCoord};
/// use fleetgrid_space::project;
///
/// let grid = BaseGrid::from_rows(5, 4, &[".....", ".@...", ".....", "....."]).unwrap();
/// let fleet = project(&grid, CellSize::new(2).unwrap());
/// assert_eq!((fleet.width(), fleet.height()), (2, 2));
/// assert!(!fleet.is_valid(TilingCoord::new(0, 0))); // covers the wall
/// assert_eq!(fleet.len(), 3);
/// ```
pub fn project(grid: &BaseGrid, cs: CellSize) -> FleetGrid {
    let width = grid.width() / cs.get();
    let height = grid.height() / cs.get();
    let mut valid = IndexSet::new();
    for fy in 0..height {
        for fx in 0..width {
            let tile = TilingCoord::new(fx, fy);
            if grid.footprint_passable(&tile.footprint(cs)) {
                valid.insert(tile);
            }
        }
    }
    FleetGrid {
        cell_size: cs,
        width,
        height,
        valid,
    }
}

impl FleetGrid {
    /// Cell size this grid was projected for.
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// Number of tile columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of tile rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of valid tiles.
    pub fn len(&self) -> usize {
        self.valid.len()
    }

    /// Whether no tile is valid.
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Whether `tile` is inside the grid and fully passable.
    pub fn is_valid(&self, tile: TilingCoord) -> bool {
        self.valid.contains(&tile)
    }

    /// Valid tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = TilingCoord> + '_ {
        self.valid.iter().copied()
    }

    /// Valid 4-connected neighbours of `tile`.
    pub fn neighbours(&self, tile: TilingCoord) -> SmallVec<[TilingCoord; 4]> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| tile.offset(dx, dy))
            .filter(|n| self.valid.contains(n))
            .collect()
    }

    /// Number of valid neighbours of `tile`.
    ///
    /// Tiles with two or fewer are corridor cells: an agent parked there
    /// may cut the only path through.
    pub fn degree(&self, tile: TilingCoord) -> usize {
        self.neighbours(tile).len()
    }

    /// Base cells covered by `tile`.
    pub fn footprint(&self, tile: TilingCoord) -> Footprint {
        tile.footprint(self.cell_size)
    }
}
