//! Validation diagnostics.

use std::collections::BTreeSet;
use std::fmt;

use fleetgrid_core::{AgentId, BaseCoord, BlockedCell, CellSize, Footprint};

/// The individual checks the validator runs, in the order it runs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Check {
    /// Start footprint in bounds and passable.
    StartFootprint,
    /// Goal footprint in bounds and passable.
    GoalFootprint,
    /// Start and goal aligned to the fleet tiling.
    Alignment,
    /// No two start footprints overlap.
    StartOverlap,
    /// No two goal footprints overlap.
    GoalOverlap,
    /// No start footprint overlaps any goal footprint.
    StartGoalOverlap,
    /// The goal is reachable by the rigid block.
    Reachability,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartFootprint => "start footprint",
            Self::GoalFootprint => "goal footprint",
            Self::Alignment => "alignment",
            Self::StartOverlap => "start overlap",
            Self::GoalOverlap => "goal overlap",
            Self::StartGoalOverlap => "start/goal overlap",
            Self::Reachability => "reachability",
        };
        f.write_str(name)
    }
}

/// Which end of an agent a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The start position.
    Start,
    /// The goal position.
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// One failed check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A footprint leaves the grid or covers a wall.
    BlockedFootprint {
        /// Offending agent.
        agent: AgentId,
        /// Which end.
        endpoint: Endpoint,
        /// The footprint checked.
        footprint: Footprint,
        /// In-grid walls row-major, then at most one out-of-bounds record
        /// (see [`BaseGrid::blocked_cells`](fleetgrid_core::BaseGrid::blocked_cells)).
        cells: Vec<BlockedCell>,
    },
    /// A coordinate is not a multiple of the cell size.
    Misaligned {
        /// Offending agent.
        agent: AgentId,
        /// Which end.
        endpoint: Endpoint,
        /// The coordinate.
        coord: BaseCoord,
        /// The agent's cell size.
        cell_size: CellSize,
    },
    /// Two footprints share base cells.
    ///
    /// For [`Check::StartGoalOverlap`], `first` owns the start and `second`
    /// the goal; they may be the same agent.
    FootprintOverlap {
        /// [`Check::StartOverlap`], [`Check::GoalOverlap`] or
        /// [`Check::StartGoalOverlap`].
        check: Check,
        /// First agent.
        first: AgentId,
        /// Second agent.
        second: AgentId,
        /// Shared cells inside the grid, row-major. Empty when the
        /// footprints meet only outside it.
        cells: Vec<BaseCoord>,
    },
    /// No block path joins start and goal.
    Unreachable {
        /// Offending agent.
        agent: AgentId,
        /// Start position.
        start: BaseCoord,
        /// Goal position.
        goal: BaseCoord,
        /// The agent's cell size.
        cell_size: CellSize,
    },
}

impl Violation {
    /// The check this violation failed.
    pub fn check(&self) -> Check {
        match self {
            Self::BlockedFootprint {
                endpoint: Endpoint::Start,
                ..
            } => Check::StartFootprint,
            Self::BlockedFootprint {
                endpoint: Endpoint::Goal,
                ..
            } => Check::GoalFootprint,
            Self::Misaligned { .. } => Check::Alignment,
            Self::FootprintOverlap { check, .. } => *check,
            Self::Unreachable { .. } => Check::Reachability,
        }
    }

    /// Agents involved, without duplicates.
    pub fn agents(&self) -> Vec<AgentId> {
        match self {
            Self::BlockedFootprint { agent, .. }
            | Self::Misaligned { agent, .. }
            | Self::Unreachable { agent, .. } => vec![*agent],
            Self::FootprintOverlap { first, second, .. } if first == second => vec![*first],
            Self::FootprintOverlap { first, second, .. } => vec![*first, *second],
        }
    }
}

fn write_cells<T: fmt::Display>(f: &mut fmt::Formatter<'_>, cells: &[T]) -> fmt::Result {
    if cells.is_empty() {
        return f.write_str(" cells outside the grid");
    }
    for (i, c) in cells.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        write!(f, "{sep}{c}")?;
    }
    Ok(())
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockedFootprint {
                agent,
                endpoint,
                footprint,
                cells,
            } => {
                write!(f, "agent {agent}: {endpoint} footprint {footprint} blocked at")?;
                for (i, b) in cells.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{} ({})", b.coord, b.cause)?;
                }
                Ok(())
            }
            Self::Misaligned {
                agent,
                endpoint,
                coord,
                cell_size,
            } => write!(
                f,
                "agent {agent}: {endpoint} {coord} not aligned to cs={cell_size}"
            ),
            Self::FootprintOverlap {
                check: Check::StartGoalOverlap,
                first,
                second,
                cells,
            } => {
                write!(f, "agent {first} start overlaps agent {second} goal at")?;
                write_cells(f, cells)
            }
            Self::FootprintOverlap {
                check,
                first,
                second,
                cells,
            } => {
                let what = if *check == Check::GoalOverlap {
                    "goal"
                } else {
                    "start"
                };
                write!(f, "agents {first} and {second}: {what} footprints overlap at")?;
                write_cells(f, cells)
            }
            Self::Unreachable {
                agent,
                start,
                goal,
                cell_size,
            } => write!(
                f,
                "agent {agent}: goal unreachable, no cs={cell_size} block path {start} -> {goal}"
            ),
        }
    }
}

/// Outcome of one validation run.
///
/// Violations are ordered by check, then by agent order of the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    agents_checked: usize,
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn new(agents_checked: usize, violations: Vec<Violation>) -> Self {
        Self {
            agents_checked,
            violations,
        }
    }

    /// Whether every check passed.
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of agents examined.
    pub fn agents_checked(&self) -> usize {
        self.agents_checked
    }

    /// Every violation found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of one check.
    pub fn by_check(&self, check: Check) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.check() == check)
    }

    /// Ids of every agent named by some violation, ascending.
    pub fn agents_with_violations(&self) -> Vec<AgentId> {
        self.violations
            .iter()
            .flat_map(Violation::agents)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.ok() { "ok" } else { "FAILED" };
        write!(
            f,
            "{verdict}: {} agents, {} violations",
            self.agents_checked,
            self.violations.len()
        )?;
        for v in &self.violations {
            write!(f, "\n  [{}] {v}", v.check())?;
        }
        Ok(())
    }
}
