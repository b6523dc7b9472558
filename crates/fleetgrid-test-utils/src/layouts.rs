//! Benchmark map layouts.
//!
//! - [`bottleneck_doors`]: two rooms split by a one-column wall, with stacked
//!   doors of increasing height. A door of height `h` admits fleets with
//!   `cs <= h`, so each fleet sees a different connectivity.
//! - [`intersection`]: a square plaza with four corridors of independent
//!   widths radiating north, south, east and west.
//! - [`cooperative_clearing`]: two rooms joined by one long passage wide
//!   enough for the largest fleet, so agents swapping sides must clear it
//!   for each other.
//! - [`corridor_speed`]: two open areas joined by stacked corridors of
//!   widths 7, 5, 3 and 1; each fleet picks a corridor it fits through.

use fleetgrid_core::{BaseCoord, BaseGrid, BaseRect, Region};

/// One opening in the dividing wall: rows `[start_row, end_row)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub start_row: u32,
    pub end_row: u32,
}

impl Door {
    pub fn height(&self) -> u32 {
        self.end_row - self.start_row
    }
}

/// A generated bottleneck map plus the geometry tests need.
#[derive(Clone, Debug)]
pub struct BottleneckLayout {
    pub grid: BaseGrid,
    pub wall_col: u32,
    pub doors: Vec<Door>,
}

impl BottleneckLayout {
    /// Room A, left of the dividing wall (inside the outer wall).
    pub fn room_a(&self) -> BaseRect {
        BaseRect::new(1, 1, self.wall_col - 1, self.grid.height() - 2)
    }

    /// Room B, right of the dividing wall (inside the outer wall).
    pub fn room_b(&self) -> BaseRect {
        let x = self.wall_col + 1;
        BaseRect::new(x, 1, self.grid.width() - 1 - x, self.grid.height() - 2)
    }
}

/// Build a `map_size x map_size` bottleneck map.
///
/// Outer walls on every edge; a dividing wall at `map_size / 2`. Doors are
/// cut in ascending height order, each starting on a row aligned to its own
/// height, separated by `gap` wall rows. Doors that would reach the bottom
/// wall are skipped.
pub fn bottleneck_doors(map_size: u32, door_heights: &[u32], gap: u32) -> BottleneckLayout {
    let wall_col = map_size / 2;
    let mut heights = door_heights.to_vec();
    heights.sort_unstable();

    let mut doors = Vec::new();
    let mut row = gap;
    for dh in heights {
        let start_row = row.div_ceil(dh) * dh;
        let end_row = start_row + dh;
        if end_row >= map_size - 1 {
            continue;
        }
        doors.push(Door { start_row, end_row });
        row = end_row + gap;
    }

    let grid = BaseGrid::from_fn(map_size, map_size, |c| {
        if c.x == 0 || c.y == 0 || c.x == map_size - 1 || c.y == map_size - 1 {
            return false;
        }
        if c.x == wall_col {
            return doors
                .iter()
                .any(|d| (d.start_row..d.end_row).contains(&c.y));
        }
        true
    })
    .expect("bottleneck_doors: non-empty map");

    BottleneckLayout {
        grid,
        wall_col,
        doors,
    }
}

/// Corridor widths of an [`intersection`], in base cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorridorWidths {
    pub north: u32,
    pub south: u32,
    pub east: u32,
    pub west: u32,
}

impl Default for CorridorWidths {
    fn default() -> Self {
        Self {
            north: 7,
            south: 7,
            east: 5,
            west: 3,
        }
    }
}

/// A generated intersection map.
#[derive(Clone, Debug)]
pub struct IntersectionLayout {
    pub grid: BaseGrid,
    pub center: BaseRect,
    pub north: BaseRect,
    pub south: BaseRect,
    pub east: BaseRect,
    pub west: BaseRect,
}

impl IntersectionLayout {
    /// Corridors in N, S, E, W order.
    pub fn corridors(&self) -> [BaseRect; 4] {
        [self.north, self.south, self.east, self.west]
    }

    /// Endpoint regions in N, S, E, W order.
    ///
    /// Each region is its corridor plus the half of the plaza facing it, so
    /// a fleet too wide for a corridor's tiles can still start or finish on
    /// that side of the plaza. A region only admits fleets that fit its
    /// corridor.
    pub fn endpoint_regions(&self) -> Vec<Region> {
        let c = self.center;
        let mid_x = c.x + c.width / 2;
        let mid_y = c.y + c.height / 2;
        let north_half = BaseRect::new(c.x, c.y, c.width, mid_y - c.y);
        let south_half = BaseRect::new(c.x, mid_y, c.width, c.y + c.height - mid_y);
        let east_half = BaseRect::new(mid_x, c.y, c.x + c.width - mid_x, c.height);
        let west_half = BaseRect::new(c.x, c.y, mid_x - c.x, c.height);
        vec![
            Region::new(self.north).with_extension(north_half),
            Region::new(self.south).with_extension(south_half),
            Region::new(self.east).with_extension(east_half),
            Region::new(self.west).with_extension(west_half),
        ]
    }
}

/// Build a `map_size x map_size` intersection.
///
/// Everything is wall except a central plaza of roughly `center_size`
/// cells, snapped outward to multiples of `align`, and four corridors
/// running from the plaza to the map edges. Each corridor is aligned to
/// its own width, so a corridor of width `w` admits fleets with `cs <= w`
/// when `w` divides the fleet's tiling.
pub fn intersection(
    map_size: u32,
    center_size: u32,
    widths: CorridorWidths,
    align: u32,
) -> IntersectionLayout {
    let center_start = ((map_size / 2).saturating_sub(center_size / 2) / align) * align;
    let center_end = (center_start + center_size).div_ceil(align) * align;
    let center_end = center_end.min(map_size);
    let mid = center_start + (center_end - center_start) / 2;
    let snap = |w: u32| (mid.saturating_sub(w / 2) / w) * w;

    let center = BaseRect::new(
        center_start,
        center_start,
        center_end - center_start,
        center_end - center_start,
    );
    let north = BaseRect::new(snap(widths.north), 0, widths.north, center_start);
    let south = BaseRect::new(
        snap(widths.south),
        center_end,
        widths.south,
        map_size - center_end,
    );
    let east = BaseRect::new(
        center_end,
        snap(widths.east),
        map_size - center_end,
        widths.east,
    );
    let west = BaseRect::new(0, snap(widths.west), center_start, widths.west);

    let open = [center, north, south, east, west];
    let grid = BaseGrid::from_fn(map_size, map_size, |c: BaseCoord| {
        open.iter().any(|r| r.contains(c))
    })
    .expect("intersection: non-empty map");

    IntersectionLayout {
        grid,
        center,
        north,
        south,
        east,
        west,
    }
}

/// A generated cooperative clearing map.
#[derive(Clone, Debug)]
pub struct ClearingLayout {
    pub grid: BaseGrid,
    /// Free cells left of the passage zone.
    pub room_a: BaseRect,
    /// Free cells right of the passage zone.
    pub room_b: BaseRect,
    /// The tunnel through the passage zone.
    pub passage: BaseRect,
}

/// Passage height; the largest benchmark cell size.
const CLEARING_PASSAGE_WIDTH: u32 = 7;

/// Build a `map_size x map_size` cooperative clearing map.
///
/// Outer walls on every edge. A wall zone `3 * 7` columns wide sits in the
/// middle, cut by one passage 7 rows high starting on the multiple of 7 at
/// or above the middle row.
pub fn cooperative_clearing(map_size: u32) -> ClearingLayout {
    let length = 3 * CLEARING_PASSAGE_WIDTH;
    let wall_start = map_size.saturating_sub(length) / 2;
    let wall_end = wall_start + length;
    let row_start = (map_size / 2 / CLEARING_PASSAGE_WIDTH) * CLEARING_PASSAGE_WIDTH;
    let passage = BaseRect::new(wall_start, row_start, length, CLEARING_PASSAGE_WIDTH);

    let grid = BaseGrid::from_fn(map_size, map_size, |c| {
        if c.x == 0 || c.y == 0 || c.x + 1 == map_size || c.y + 1 == map_size {
            return false;
        }
        (c.x < wall_start || c.x >= wall_end) || passage.contains(c)
    })
    .expect("cooperative_clearing: non-empty map");

    ClearingLayout {
        grid,
        room_a: BaseRect::new(1, 1, wall_start.saturating_sub(1), map_size.saturating_sub(2)),
        room_b: BaseRect::new(
            wall_end,
            1,
            map_size.saturating_sub(wall_end + 1),
            map_size.saturating_sub(2),
        ),
        passage,
    }
}

/// A generated corridor speed map.
#[derive(Clone, Debug)]
pub struct CorridorSpeedLayout {
    pub grid: BaseGrid,
    /// The open area on the left edge.
    pub left: BaseRect,
    /// The open area on the right edge.
    pub right: BaseRect,
    /// Corridors top to bottom.
    pub corridors: Vec<BaseRect>,
}

const SPEED_OPEN_WIDTH: u32 = 28;
const SPEED_CORRIDOR_WIDTHS: [u32; 8] = [7, 7, 5, 5, 3, 3, 1, 1];

/// Build a `map_size x map_size` corridor speed map.
///
/// Open areas 28 columns wide on both edges, joined by horizontal
/// corridors stacked from the top. Each corridor starts on a row aligned
/// to its own width, at least one wall row below the previous one.
/// Corridors that would run off the bottom edge are dropped.
pub fn corridor_speed(map_size: u32) -> CorridorSpeedLayout {
    let open = SPEED_OPEN_WIDTH.min(map_size / 2);
    let span = map_size - 2 * open;
    let left = BaseRect::new(0, 0, open, map_size);
    let right = BaseRect::new(map_size - open, 0, open, map_size);

    let mut corridors = Vec::new();
    let mut row: u32 = 0;
    for w in SPEED_CORRIDOR_WIDTHS {
        let start = row.div_ceil(w) * w;
        if start + w > map_size {
            break;
        }
        corridors.push(BaseRect::new(open, start, span, w));
        row = start + w + 1;
    }

    let grid = BaseGrid::from_fn(map_size, map_size, |c| {
        left.contains(c) || right.contains(c) || corridors.iter().any(|r| r.contains(c))
    })
    .expect("corridor_speed: non-empty map");

    CorridorSpeedLayout {
        grid,
        left,
        right,
        corridors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetgrid_core::CellSize;

    #[test]
    fn doors_are_aligned_and_separated() {
        let layout = bottleneck_doors(105, &[1, 3, 5, 7], 7);
        assert_eq!(layout.wall_col, 52);
        assert_eq!(
            layout.doors,
            vec![
                Door { start_row: 7, end_row: 8 },
                Door { start_row: 15, end_row: 18 },
                Door { start_row: 25, end_row: 30 },
                Door { start_row: 42, end_row: 49 },
            ]
        );
        for d in &layout.doors {
            assert_eq!(d.start_row % d.height(), 0);
        }
    }

    #[test]
    fn wall_is_closed_outside_doors() {
        let layout = bottleneck_doors(105, &[3], 7);
        let g = &layout.grid;
        assert!(!g.is_passable(BaseCoord::new(52, 8)));
        assert!(g.is_passable(BaseCoord::new(52, 9)));
        assert!(g.is_passable(BaseCoord::new(52, 11)));
        assert!(!g.is_passable(BaseCoord::new(52, 12)));
        assert!(!g.is_passable(BaseCoord::new(0, 50)));
    }

    #[test]
    fn rooms_exclude_walls() {
        let layout = bottleneck_doors(21, &[1], 3);
        let a = layout.room_a();
        let b = layout.room_b();
        assert!(a.contains(BaseCoord::new(1, 1)));
        assert!(a.contains(BaseCoord::new(9, 19)));
        assert!(!a.contains(BaseCoord::new(10, 5)));
        assert!(b.contains(BaseCoord::new(11, 1)));
        assert!(b.contains(BaseCoord::new(19, 19)));
        assert!(!b.contains(BaseCoord::new(20, 5)));
    }

    #[test]
    fn intersection_geometry() {
        let layout = intersection(105, 28, CorridorWidths::default(), 7);
        assert_eq!(layout.center, BaseRect::new(35, 35, 28, 28));
        assert_eq!(layout.north, BaseRect::new(42, 0, 7, 35));
        assert_eq!(layout.east, BaseRect::new(63, 45, 42, 5));
        assert_eq!(layout.west, BaseRect::new(0, 48, 35, 3));
        assert!(layout.grid.is_passable(BaseCoord::new(45, 0)));
        assert!(!layout.grid.is_passable(BaseCoord::new(0, 0)));
    }

    #[test]
    fn narrow_corridor_admits_only_small_fleets() {
        let layout = intersection(105, 28, CorridorWidths::default(), 7);
        let g = &layout.grid;
        let cs3 = CellSize::new(3).unwrap();
        let cs5 = CellSize::new(5).unwrap();
        assert!(g.footprint_passable(&BaseCoord::new(0, 48).footprint(cs3)));
        assert!(!g.footprint_passable(&BaseCoord::new(0, 45).footprint(cs5)));
        assert!(!g.footprint_passable(&BaseCoord::new(0, 50).footprint(cs5)));
        assert!(g.footprint_passable(&BaseCoord::new(100, 45).footprint(cs5)));
    }

    #[test]
    fn endpoint_regions_split_the_plaza() {
        let layout = intersection(105, 28, CorridorWidths::default(), 7);
        let regions = layout.endpoint_regions();
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0].anchor(), layout.north);
        let north: Vec<_> = regions[0].rects().copied().collect();
        assert_eq!(north[1], BaseRect::new(35, 35, 28, 14));
        let east: Vec<_> = regions[2].rects().copied().collect();
        assert_eq!(east[1], BaseRect::new(49, 35, 14, 28));

        // A 7x7 block in the plaza's west half belongs to the west region,
        // but the 3-wide west corridor never admits it.
        let cs7 = CellSize::new(7).unwrap();
        let fp = BaseCoord::new(35, 42).footprint(cs7);
        assert!(regions[3].contains_footprint(&fp));
        assert!(!regions[3].admits(cs7));
        assert!(regions[3].admits(CellSize::new(3).unwrap()));
    }

    #[test]
    fn clearing_passage_is_the_only_crossing() {
        let layout = cooperative_clearing(105);
        assert_eq!(layout.passage, BaseRect::new(42, 49, 21, 7));
        assert_eq!(layout.room_a, BaseRect::new(1, 1, 41, 103));
        assert_eq!(layout.room_b, BaseRect::new(63, 1, 41, 103));
        let g = &layout.grid;
        assert!(g.is_passable(BaseCoord::new(50, 49)));
        assert!(g.is_passable(BaseCoord::new(62, 55)));
        assert!(!g.is_passable(BaseCoord::new(50, 48)));
        assert!(!g.is_passable(BaseCoord::new(50, 56)));
        assert!(!g.is_passable(BaseCoord::new(0, 50)));
        let cs7 = CellSize::new(7).unwrap();
        assert!(g.footprint_passable(&BaseCoord::new(42, 49).footprint(cs7)));
    }

    #[test]
    fn speed_corridors_are_aligned_to_their_width() {
        let layout = corridor_speed(105);
        let rows: Vec<(u32, u32)> = layout.corridors.iter().map(|r| (r.y, r.height)).collect();
        assert_eq!(
            rows,
            vec![(0, 7), (14, 7), (25, 5), (35, 5), (42, 3), (48, 3), (52, 1), (54, 1)]
        );
        for r in &layout.corridors {
            assert_eq!(r.y % r.height, 0);
            assert_eq!((r.x, r.width), (28, 49));
        }
        assert_eq!(layout.right, BaseRect::new(77, 0, 28, 105));
        let g = &layout.grid;
        assert!(g.is_passable(BaseCoord::new(50, 52)));
        assert!(!g.is_passable(BaseCoord::new(50, 53)));
        assert!(g.is_passable(BaseCoord::new(0, 104)));
        assert!(!g.is_passable(BaseCoord::new(50, 104)));
    }
}
