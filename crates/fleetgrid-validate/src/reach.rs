//! Block reachability: breadth-first search over rigid-block positions.
//!
//! The state is the block's top-left base cell. A block of side `cs` on a
//! `w x h` grid has at most `(w-cs+1) * (h-cs+1)` positions, so the search
//! is finite and always terminates. A move shifts the block one base cell
//! in a cardinal direction and is legal when the whole destination
//! footprint is in bounds and passable. Other agents are ignored.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use fleetgrid_core::{BaseCoord, BaseGrid, CellSize, DIRECTIONS};

/// Shortest block path from `start` to `goal`, both ends included.
///
/// `None` when either endpoint footprint is blocked or no path exists.
/// When `start == goal` with a passable footprint the path is `[start]`.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{BaseCoord, BaseGrid, CellSize};
/// use fleetgrid_validate::find_block_path;
///
/// // A 2x2 block cannot squeeze through a one-cell gap.
/// let grid = BaseGrid::from_rows(5, 4, &["..@..", ".....", "..@..", "..@.."]).unwrap();
/// let cs2 = CellSize::new(2).unwrap();
/// let (a, b) = (BaseCoord::new(0, 2), BaseCoord::new(3, 2));
/// assert!(find_block_path(&grid, cs2, a, b).is_none());
/// assert_eq!(find_block_path(&grid, CellSize::ONE, a, b).unwrap().len(), 6);
/// ```
pub fn find_block_path(
    grid: &BaseGrid,
    cs: CellSize,
    start: BaseCoord,
    goal: BaseCoord,
) -> Option<Vec<BaseCoord>> {
    if !grid.footprint_passable(&start.footprint(cs))
        || !grid.footprint_passable(&goal.footprint(cs))
    {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    // Passable footprints imply cs <= width and cs <= height.
    let cols = (grid.width() - cs.get() + 1) as usize;
    let rows = (grid.height() - cs.get() + 1) as usize;
    let index = |c: BaseCoord| (c.y as usize) * cols + (c.x as usize);

    let mut parent: Vec<Option<BaseCoord>> = vec![None; cols * rows];
    let mut visited = vec![false; cols * rows];
    let mut queue = VecDeque::new();
    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        for &(dx, dy) in &DIRECTIONS {
            let Some(next) = pos.offset(dx, dy) else {
                continue;
            };
            if (next.x as usize) >= cols || (next.y as usize) >= rows {
                continue;
            }
            let i = index(next);
            if visited[i] || !grid.footprint_passable(&next.footprint(cs)) {
                continue;
            }
            visited[i] = true;
            parent[i] = Some(pos);
            if next == goal {
                return Some(unwind(&parent, index, start, goal));
            }
            queue.push_back(next);
        }
    }
    None
}

fn unwind(
    parent: &[Option<BaseCoord>],
    index: impl Fn(BaseCoord) -> usize,
    start: BaseCoord,
    goal: BaseCoord,
) -> Vec<BaseCoord> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        match parent[index(cur)] {
            Some(p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Whether a `cs x cs` block can travel from `start` to `goal`.
pub fn block_reachable(grid: &BaseGrid, cs: CellSize, start: BaseCoord, goal: BaseCoord) -> bool {
    find_block_path(grid, cs, start, goal).is_some()
}

// ── Replay ─────────────────────────────────────────────────────────

/// Why a block path failed replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// The path has no positions.
    Empty,
    /// The path does not begin at the start.
    WrongStart {
        /// Expected first position.
        expected: BaseCoord,
        /// Actual first position.
        found: BaseCoord,
    },
    /// The path does not end at the goal.
    WrongEnd {
        /// Expected last position.
        expected: BaseCoord,
        /// Actual last position.
        found: BaseCoord,
    },
    /// A position's footprint is out of bounds or touches a wall.
    Blocked {
        /// Index into the path.
        step: usize,
        /// The offending position.
        at: BaseCoord,
    },
    /// Two consecutive positions are not one cardinal step apart.
    NotAdjacent {
        /// Index of the second position.
        step: usize,
        /// Previous position.
        from: BaseCoord,
        /// This position.
        to: BaseCoord,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty path"),
            Self::WrongStart { expected, found } => {
                write!(f, "path starts at {found}, expected {expected}")
            }
            Self::WrongEnd { expected, found } => {
                write!(f, "path ends at {found}, expected {expected}")
            }
            Self::Blocked { step, at } => write!(f, "step {step}: block at {at} is blocked"),
            Self::NotAdjacent { step, from, to } => {
                write!(f, "step {step}: {from} -> {to} is not a unit move")
            }
        }
    }
}

impl Error for ReplayError {}

/// Re-walk `path` one move at a time, checking every position.
pub fn replay_block_path(
    grid: &BaseGrid,
    cs: CellSize,
    path: &[BaseCoord],
    start: BaseCoord,
    goal: BaseCoord,
) -> Result<(), ReplayError> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Err(ReplayError::Empty);
    };
    if first != start {
        return Err(ReplayError::WrongStart {
            expected: start,
            found: first,
        });
    }
    if last != goal {
        return Err(ReplayError::WrongEnd {
            expected: goal,
            found: last,
        });
    }
    for (step, &at) in path.iter().enumerate() {
        if !grid.footprint_passable(&at.footprint(cs)) {
            return Err(ReplayError::Blocked { step, at });
        }
        if step > 0 {
            let from = path[step - 1];
            if from.x.abs_diff(at.x) + from.y.abs_diff(at.y) != 1 {
                return Err(ReplayError::NotAdjacent { step, from, to: at });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetgrid_test_utils::{ascii_grid, cs, open_grid, wall_with_door};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn c(x: u32, y: u32) -> BaseCoord {
        BaseCoord::new(x, y)
    }

    // ── Search ──────────────────────────────────────────────────

    #[test]
    fn same_position_is_trivially_reachable() {
        let grid = open_grid(3, 3);
        assert_eq!(find_block_path(&grid, cs(2), c(1, 1), c(1, 1)), Some(vec![c(1, 1)]));
    }

    #[test]
    fn blocked_endpoint_is_unreachable() {
        let grid = ascii_grid(&["...", ".@.", "..."]);
        assert!(find_block_path(&grid, cs(2), c(0, 0), c(1, 1)).is_none());
        assert!(find_block_path(&grid, cs(2), c(0, 0), c(2, 0)).is_none());
    }

    #[test]
    fn path_is_shortest_on_open_grid() {
        let grid = open_grid(6, 6);
        let path = find_block_path(&grid, cs(2), c(0, 0), c(4, 3)).unwrap();
        assert_eq!(path.len(), 8);
        replay_block_path(&grid, cs(2), &path, c(0, 0), c(4, 3)).unwrap();
    }

    #[test]
    fn block_slides_off_the_tiling() {
        // A 2x2 block reaches an odd column through intermediate positions.
        let grid = open_grid(5, 2);
        let path = find_block_path(&grid, cs(2), c(0, 0), c(3, 0)).unwrap();
        assert_eq!(path, vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0)]);
    }

    #[test]
    fn door_height_limits_block_size() {
        let grid = wall_with_door(10, 10, 5, 4..6);
        assert!(block_reachable(&grid, cs(2), c(0, 0), c(8, 8)));
        assert!(!block_reachable(&grid, cs(3), c(0, 0), c(7, 7)));
    }

    #[test]
    fn closed_wall_separates_rooms() {
        let grid = wall_with_door(10, 10, 5, 0..0);
        assert!(!block_reachable(&grid, CellSize::ONE, c(0, 0), c(9, 9)));
        assert!(block_reachable(&grid, CellSize::ONE, c(0, 0), c(4, 9)));
    }

    // ── Replay ──────────────────────────────────────────────────

    #[test]
    fn replay_rejects_bad_paths() {
        let grid = ascii_grid(&["...", ".@.", "..."]);
        let one = CellSize::ONE;
        assert_eq!(
            replay_block_path(&grid, one, &[], c(0, 0), c(0, 0)),
            Err(ReplayError::Empty)
        );
        assert_eq!(
            replay_block_path(&grid, one, &[c(0, 0), c(2, 0)], c(0, 0), c(2, 0)),
            Err(ReplayError::NotAdjacent {
                step: 1,
                from: c(0, 0),
                to: c(2, 0)
            })
        );
        assert_eq!(
            replay_block_path(&grid, one, &[c(1, 0), c(1, 1), c(1, 2)], c(1, 0), c(1, 2)),
            Err(ReplayError::Blocked {
                step: 1,
                at: c(1, 1)
            })
        );
        assert!(matches!(
            replay_block_path(&grid, one, &[c(0, 0), c(1, 0)], c(0, 0), c(2, 0)),
            Err(ReplayError::WrongEnd { .. })
        ));
        assert!(matches!(
            replay_block_path(&grid, one, &[c(1, 0), c(2, 0)], c(0, 0), c(2, 0)),
            Err(ReplayError::WrongStart { .. })
        ));
    }

    // ── Soundness ───────────────────────────────────────────────

    /// Fixpoint of legal moves from `start`, computed without a queue.
    fn reachable_set(grid: &BaseGrid, size: CellSize, start: BaseCoord) -> HashSet<BaseCoord> {
        let mut seen = HashSet::new();
        if !grid.footprint_passable(&start.footprint(size)) {
            return seen;
        }
        seen.insert(start);
        loop {
            let mut added = false;
            let current: Vec<BaseCoord> = seen.iter().copied().collect();
            for pos in current {
                for &(dx, dy) in &DIRECTIONS {
                    if let Some(n) = pos.offset(dx, dy) {
                        if grid.footprint_passable(&n.footprint(size)) && seen.insert(n) {
                            added = true;
                        }
                    }
                }
            }
            if !added {
                return seen;
            }
        }
    }

    fn arb_case() -> impl Strategy<Value = (BaseGrid, u32, BaseCoord, BaseCoord)> {
        (2u32..10, 2u32..10, 1u32..3).prop_flat_map(|(w, h, size)| {
            (
                proptest::collection::vec(proptest::bool::weighted(0.75), (w * h) as usize),
                0..w,
                0..h,
                0..w,
                0..h,
            )
                .prop_map(move |(cells, sx, sy, gx, gy)| {
                    (
                        BaseGrid::new(w, h, cells).unwrap(),
                        size,
                        BaseCoord::new(sx, sy),
                        BaseCoord::new(gx, gy),
                    )
                })
        })
    }

    proptest! {
        #[test]
        fn search_agrees_with_fixpoint((grid, size, start, goal) in arb_case()) {
            let size = cs(size);
            let truth = reachable_set(&grid, size, start).contains(&goal);
            match find_block_path(&grid, size, start, goal) {
                Some(path) => {
                    prop_assert!(truth);
                    prop_assert!(replay_block_path(&grid, size, &path, start, goal).is_ok());
                }
                None => prop_assert!(!truth),
            }
        }
    }
}
