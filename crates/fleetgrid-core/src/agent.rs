//! Committed agents, in base-grid coordinates.

use crate::coord::{BaseCoord, CellSize, Footprint, TilingCoord};
use crate::id::{AgentId, FleetId};
use std::fmt;

/// One agent of a scenario: a `cell_size x cell_size` block with a start
/// and a goal, both given as base-grid top-left corners.
///
/// Produced by the placement engine and consumed unchanged by the
/// validator. Hand-written scenarios may hold misaligned coordinates; the
/// validator reports those rather than rejecting construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Agent {
    /// Unique id, assigned in placement order.
    pub id: AgentId,
    /// Fleet this agent belongs to.
    pub fleet: FleetId,
    /// Footprint side length.
    pub cell_size: CellSize,
    /// Start block, top-left base cell.
    pub start: BaseCoord,
    /// Goal block, top-left base cell.
    pub goal: BaseCoord,
}

impl Agent {
    /// Base cells covered at the start.
    pub fn start_footprint(&self) -> Footprint {
        self.start.footprint(self.cell_size)
    }

    /// Base cells covered at the goal.
    pub fn goal_footprint(&self) -> Footprint {
        self.goal.footprint(self.cell_size)
    }

    /// The start as a fleet-grid tile, if aligned.
    pub fn start_tile(&self) -> Option<TilingCoord> {
        self.start.to_tiling(self.cell_size)
    }

    /// The goal as a fleet-grid tile, if aligned.
    pub fn goal_tile(&self) -> Option<TilingCoord> {
        self.goal.to_tiling(self.cell_size)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "agent {} fleet={} cs={} {} -> {}",
            self.id, self.fleet, self.cell_size, self.start, self.goal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_follow_alignment() {
        let a = Agent {
            id: AgentId(0),
            fleet: FleetId(1),
            cell_size: CellSize::new(2).unwrap(),
            start: BaseCoord::new(4, 2),
            goal: BaseCoord::new(5, 2),
        };
        assert_eq!(a.start_tile(), Some(TilingCoord::new(2, 1)));
        assert_eq!(a.goal_tile(), None);
        assert_eq!(a.goal_footprint().cells().count(), 4);
        assert_eq!(a.to_string(), "agent 0 fleet=1 cs=2 (4,2) -> (5,2)");
    }
}
