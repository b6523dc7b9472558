//! Test utilities for fleetgrid development.
//!
//! Grid fixtures ([`open_grid`], [`ascii_grid`], [`wall_with_door`]) and
//! the benchmark layouts in [`layouts`]. Fixtures panic on malformed input;
//! they are for tests and benches only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod layouts;

use fleetgrid_core::{Agent, AgentId, BaseCoord, BaseGrid, BaseRect, CellSize, FleetId};
use std::ops::Range;

pub use layouts::{
    bottleneck_doors, cooperative_clearing, corridor_speed, intersection, BottleneckLayout,
    ClearingLayout, CorridorSpeedLayout, CorridorWidths, Door, IntersectionLayout,
};

/// A fully passable `width x height` grid.
pub fn open_grid(width: u32, height: u32) -> BaseGrid {
    BaseGrid::open(width, height).expect("open_grid: non-empty dimensions")
}

/// Build a grid from terrain rows; width is taken from the first row.
///
/// `.` and `G` are passable, anything else is a wall.
pub fn ascii_grid(rows: &[&str]) -> BaseGrid {
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    BaseGrid::from_rows(width, rows.len() as u32, rows).expect("ascii_grid: well-formed rows")
}

/// An open grid split by a wall column at `wall_x`, with the rows in
/// `door` left open.
///
/// An empty `door` range closes the wall completely.
pub fn wall_with_door(width: u32, height: u32, wall_x: u32, door: Range<u32>) -> BaseGrid {
    BaseGrid::from_fn(width, height, |c| c.x != wall_x || door.contains(&c.y))
        .expect("wall_with_door: non-empty dimensions")
}

/// The regions strictly left and strictly right of a wall column.
///
/// Panics when `wall_x` is not a column of `grid`.
pub fn rooms_either_side(grid: &BaseGrid, wall_x: u32) -> (BaseRect, BaseRect) {
    assert!(
        wall_x < grid.width(),
        "rooms_either_side: wall_x {wall_x} outside a {}-wide grid",
        grid.width()
    );
    let left = BaseRect::new(0, 0, wall_x, grid.height());
    let right = BaseRect::new(wall_x + 1, 0, grid.width() - wall_x - 1, grid.height());
    (left, right)
}

pub fn cs(n: u32) -> CellSize {
    CellSize::new(n).expect("cs: non-zero cell size")
}

/// A hand-written agent, for validator tests.
pub fn agent(id: u32, cell_size: u32, start: (u32, u32), goal: (u32, u32)) -> Agent {
    Agent {
        id: AgentId(id),
        fleet: FleetId(0),
        cell_size: cs(cell_size),
        start: BaseCoord::new(start.0, start.1),
        goal: BaseCoord::new(goal.0, goal.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_with_door_leaves_only_door_open() {
        let grid = wall_with_door(10, 10, 5, 5..6);
        assert!(grid.is_passable(BaseCoord::new(5, 5)));
        assert!(!grid.is_passable(BaseCoord::new(5, 4)));
        assert!(!grid.is_passable(BaseCoord::new(5, 6)));
        assert_eq!(grid.passable_count(), 91);
    }

    #[test]
    fn rooms_either_side_exclude_wall() {
        let grid = open_grid(10, 4);
        let (left, right) = rooms_either_side(&grid, 5);
        assert!(left.contains(BaseCoord::new(4, 3)));
        assert!(!left.contains(BaseCoord::new(5, 0)));
        assert!(right.contains(BaseCoord::new(6, 0)));
        assert!(right.contains(BaseCoord::new(9, 3)));
        assert!(!right.contains(BaseCoord::new(5, 0)));
    }

    #[test]
    fn wall_on_the_last_column_leaves_an_empty_right_room() {
        let (left, right) = rooms_either_side(&open_grid(6, 2), 5);
        assert_eq!(left.width, 5);
        assert!(right.is_empty());
    }

    #[test]
    #[should_panic(expected = "wall_x 6 outside a 6-wide grid")]
    fn wall_past_the_grid_panics() {
        rooms_either_side(&open_grid(6, 2), 6);
    }
}
