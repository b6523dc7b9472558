//! Base-cell occupancy shared by every fleet of one scenario.

use fleetgrid_core::{BaseCoord, Footprint};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

// ── ReservationConflict ────────────────────────────────────────────

/// What a rejected footprint collided with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictWith {
    /// A cell already reserved as some agent's start.
    Starts,
    /// A cell already reserved as some agent's goal.
    Goals,
    /// The goal overlaps the start of the same pair.
    OwnStart,
}

impl fmt::Display for ConflictWith {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starts => write!(f, "reserved starts"),
            Self::Goals => write!(f, "reserved goals"),
            Self::OwnStart => write!(f, "its own start"),
        }
    }
}

/// A reservation that would break ledger disjointness.
///
/// The placement engine checks candidates before committing, so this only
/// surfaces from direct ledger use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationConflict {
    /// The footprint that was rejected.
    pub footprint: Footprint,
    /// What it collided with.
    pub with: ConflictWith,
    /// The colliding base cells, row-major.
    pub cells: Vec<BaseCoord>,
}

impl fmt::Display for ReservationConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "footprint {} overlaps {} at", self.footprint, self.with)?;
        for (i, c) in self.cells.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{c}")?;
        }
        Ok(())
    }
}

impl Error for ReservationConflict {}

// ── OccupancyLedger ────────────────────────────────────────────────

/// Base cells claimed as starts and as goals, across all fleets.
///
/// Grows monotonically during a scenario build. Every reservation is
/// checked against *both* sets, so no agent can start on another agent's
/// resting position or rest on another agent's spawn.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{BaseCoord, CellSize};
/// use fleetgrid_placement::OccupancyLedger;
///
/// let mut ledger = OccupancyLedger::new();
/// let big = BaseCoord::new(0, 0).footprint(CellSize::new(3).unwrap());
/// let small = BaseCoord::new(2, 2).footprint(CellSize::ONE);
/// ledger.reserve_goal(&big).unwrap();
/// assert!(ledger.conflicts(&small));
/// assert!(ledger.reserve_start(&small).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OccupancyLedger {
    starts: HashSet<BaseCoord>,
    goals: HashSet<BaseCoord>,
}

impl OccupancyLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `fp` touches any reserved start cell.
    pub fn start_conflicts(&self, fp: &Footprint) -> bool {
        fp.cells().any(|c| self.starts.contains(&c))
    }

    /// Whether `fp` touches any reserved goal cell.
    pub fn goal_conflicts(&self, fp: &Footprint) -> bool {
        fp.cells().any(|c| self.goals.contains(&c))
    }

    /// Whether `fp` touches any reserved cell at all.
    pub fn conflicts(&self, fp: &Footprint) -> bool {
        fp.cells()
            .any(|c| self.starts.contains(&c) || self.goals.contains(&c))
    }

    /// Reserve `fp` as a start.
    pub fn reserve_start(&mut self, fp: &Footprint) -> Result<(), ReservationConflict> {
        self.check_free(fp)?;
        self.starts.extend(fp.cells());
        Ok(())
    }

    /// Reserve `fp` as a goal.
    pub fn reserve_goal(&mut self, fp: &Footprint) -> Result<(), ReservationConflict> {
        self.check_free(fp)?;
        self.goals.extend(fp.cells());
        Ok(())
    }

    /// Reserve a start and its goal together, or neither.
    ///
    /// Fails when either footprint touches the ledger or the two overlap
    /// each other.
    pub fn commit_pair(
        &mut self,
        start: &Footprint,
        goal: &Footprint,
    ) -> Result<(), ReservationConflict> {
        self.check_free(start)?;
        self.check_free(goal)?;
        let own = start.overlap(goal);
        if !own.is_empty() {
            return Err(ReservationConflict {
                footprint: *goal,
                with: ConflictWith::OwnStart,
                cells: own,
            });
        }
        self.starts.extend(start.cells());
        self.goals.extend(goal.cells());
        Ok(())
    }

    /// Number of base cells reserved as starts.
    pub fn reserved_starts(&self) -> usize {
        self.starts.len()
    }

    /// Number of base cells reserved as goals.
    pub fn reserved_goals(&self) -> usize {
        self.goals.len()
    }

    /// Whether `cell` is reserved as a start.
    pub fn is_start(&self, cell: BaseCoord) -> bool {
        self.starts.contains(&cell)
    }

    /// Whether `cell` is reserved as a goal.
    pub fn is_goal(&self, cell: BaseCoord) -> bool {
        self.goals.contains(&cell)
    }

    fn check_free(&self, fp: &Footprint) -> Result<(), ReservationConflict> {
        for (set, with) in [
            (&self.starts, ConflictWith::Starts),
            (&self.goals, ConflictWith::Goals),
        ] {
            let cells: Vec<BaseCoord> = fp.cells().filter(|c| set.contains(c)).collect();
            if !cells.is_empty() {
                return Err(ReservationConflict {
                    footprint: *fp,
                    with,
                    cells,
                });
            }
        }
        Ok(())
    }
}
