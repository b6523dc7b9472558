//! The per-fleet placement engine.
//!
//! For each agent the engine shuffles its candidate pools, walks start
//! candidates until one is free in the ledger, and for that start walks
//! goal candidates until one is free, disjoint from the start, and
//! connected to it. Both walks are bounded by [`PlacementConfig`] budgets,
//! so an unsatisfiable request ends in [`Outcome::Exhausted`] instead of
//! spinning.
//!
//! Goals on corridor tiles (few valid neighbours) are deferred: the first
//! one seen is kept as a fallback and used only if no open tile qualifies.

use std::fmt;

use fleetgrid_core::{BaseRect, Footprint, Region, TilingCoord};
use fleetgrid_space::{Component, Connectivity, FleetGrid};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::PlacementConfig;
use crate::ledger::OccupancyLedger;

// ── Results ────────────────────────────────────────────────────────

/// A committed start/goal pair on one fleet grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Start tile.
    pub start: TilingCoord,
    /// Goal tile.
    pub goal: TilingCoord,
    /// Whether the goal came from the corridor fallback.
    pub corridor_goal: bool,
}

/// Why an agent could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExhaustReason {
    /// Every examined start candidate touched the ledger.
    NoFreeStart,
    /// Free starts existed but none had a free, connected goal.
    NoReachableGoal,
}

impl fmt::Display for ExhaustReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFreeStart => write!(f, "no free start"),
            Self::NoReachableGoal => write!(f, "no reachable goal"),
        }
    }
}

/// Result of one placement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A pair was found and committed to the ledger.
    Placed(Placement),
    /// The retry budget ran out; the ledger is unchanged.
    Exhausted(ExhaustReason),
}

/// Everything placed for one fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleetPlacement {
    /// Committed pairs, in placement order.
    pub placements: Vec<Placement>,
    /// Number of agents asked for.
    pub requested: usize,
    /// Set when placement stopped early.
    pub exhausted: Option<ExhaustReason>,
}

impl FleetPlacement {
    /// Number of committed pairs.
    pub fn placed(&self) -> usize {
        self.placements.len()
    }

    /// Whether every requested agent was placed.
    pub fn is_complete(&self) -> bool {
        self.placements.len() == self.requested
    }
}

// ── CandidatePools ─────────────────────────────────────────────────

/// Tiles a fleet may draw starts and goals from.
#[derive(Clone, Debug, PartialEq)]
pub enum CandidatePools {
    /// One start pool and one goal pool.
    Paired {
        /// Start candidates.
        starts: Vec<TilingCoord>,
        /// Goal candidates.
        goals: Vec<TilingCoord>,
        /// Probability that an agent swaps the two pools.
        reverse_probability: f64,
    },
    /// Disjoint endpoint regions. Each agent starts in one and finishes in
    /// another.
    Regions(Vec<Vec<TilingCoord>>),
}

impl CandidatePools {
    /// Starts and goals both drawn from one component.
    pub fn component(component: &Component) -> Self {
        Self::Paired {
            starts: component.cells().to_vec(),
            goals: component.cells().to_vec(),
            reverse_probability: 0.0,
        }
    }

    /// Starts from tiles whose footprint lies inside `start_region`, goals
    /// from tiles inside `goal_region`, both in row-major order.
    ///
    /// `reverse_probability` is clamped to `[0, 1]`; NaN counts as `0`.
    pub fn split(
        fleet: &FleetGrid,
        start_region: &BaseRect,
        goal_region: &BaseRect,
        reverse_probability: f64,
    ) -> Self {
        let reverse_probability = if reverse_probability.is_nan() {
            0.0
        } else {
            reverse_probability.clamp(0.0, 1.0)
        };
        Self::Paired {
            starts: tiles_inside(fleet, |fp| start_region.contains_footprint(fp)),
            goals: tiles_inside(fleet, |fp| goal_region.contains_footprint(fp)),
            reverse_probability,
        }
    }

    /// One pool per region that admits the fleet's cell size and holds at
    /// least one of its tiles, in region order.
    pub fn regions(fleet: &FleetGrid, regions: &[Region]) -> Self {
        let pools = regions
            .iter()
            .filter(|r| r.admits(fleet.cell_size()))
            .map(|r| tiles_inside(fleet, |fp| r.contains_footprint(fp)))
            .filter(|pool| !pool.is_empty())
            .collect();
        Self::Regions(pools)
    }
}

fn tiles_inside(fleet: &FleetGrid, inside: impl Fn(&Footprint) -> bool) -> Vec<TilingCoord> {
    fleet.iter().filter(|&t| inside(&fleet.footprint(t))).collect()
}

// ── Engine ─────────────────────────────────────────────────────────

/// Place one agent, committing its pair to `ledger` on success.
///
/// Start candidates are `starts` shuffled, at most
/// `config.start_attempts` of them. `goals` is shuffled once per call and
/// walked as a ring: each free start examines the next
/// `config.goal_attempts` goals after those the previous start examined,
/// so a pool larger than the goal budget is still covered.
pub fn place_one<R: Rng + ?Sized>(
    fleet: &FleetGrid,
    connectivity: &Connectivity,
    starts: &[TilingCoord],
    goals: &[TilingCoord],
    ledger: &mut OccupancyLedger,
    config: &PlacementConfig,
    rng: &mut R,
) -> Outcome {
    let mut start_order = starts.to_vec();
    start_order.shuffle(rng);
    let mut goal_order = goals.to_vec();
    goal_order.shuffle(rng);
    let window = config.goal_attempts.min(goal_order.len());
    let mut cursor = 0;

    let mut saw_free_start = false;
    for &start in start_order.iter().take(config.start_attempts) {
        let start_fp = fleet.footprint(start);
        if ledger.conflicts(&start_fp) {
            continue;
        }
        saw_free_start = true;

        let candidates = goal_order.iter().copied().cycle().skip(cursor).take(window);
        cursor = (cursor + window) % goal_order.len().max(1);
        let Some((goal, corridor_goal)) =
            choose_goal(fleet, connectivity, start, candidates, ledger, config)
        else {
            continue;
        };
        let goal_fp = fleet.footprint(goal);
        if let Err(conflict) = ledger.commit_pair(&start_fp, &goal_fp) {
            log::warn!("rejected pre-checked pair {start} -> {goal}: {conflict}");
            continue;
        }
        return Outcome::Placed(Placement {
            start,
            goal,
            corridor_goal,
        });
    }

    Outcome::Exhausted(if saw_free_start {
        ExhaustReason::NoReachableGoal
    } else {
        ExhaustReason::NoFreeStart
    })
}

fn choose_goal(
    fleet: &FleetGrid,
    connectivity: &Connectivity,
    start: TilingCoord,
    candidates: impl Iterator<Item = TilingCoord>,
    ledger: &OccupancyLedger,
    config: &PlacementConfig,
) -> Option<(TilingCoord, bool)> {
    let start_fp = fleet.footprint(start);
    let mut fallback = None;
    for goal in candidates {
        if goal == start {
            continue;
        }
        let goal_fp = fleet.footprint(goal);
        if goal_fp.intersects(&start_fp) || ledger.conflicts(&goal_fp) {
            continue;
        }
        if !connectivity.connected(start, goal) {
            continue;
        }
        if config.avoid_corridor_goals && fleet.degree(goal) <= config.corridor_max_degree {
            fallback.get_or_insert(goal);
            continue;
        }
        return Some((goal, false));
    }
    fallback.map(|g| (g, true))
}

/// Try every ordered pair of distinct regions in shuffled order until one
/// places the agent.
fn place_between_regions<R: Rng + ?Sized>(
    fleet: &FleetGrid,
    connectivity: &Connectivity,
    regions: &[Vec<TilingCoord>],
    ledger: &mut OccupancyLedger,
    config: &PlacementConfig,
    rng: &mut R,
) -> Outcome {
    let n = regions.len();
    let mut routes: Vec<(usize, usize)> = (0..n)
        .flat_map(|s| (0..n).filter(move |&g| g != s).map(move |g| (s, g)))
        .collect();
    routes.shuffle(rng);

    let mut reason = ExhaustReason::NoFreeStart;
    for (s, g) in routes {
        match place_one(fleet, connectivity, &regions[s], &regions[g], ledger, config, rng) {
            Outcome::Placed(p) => return Outcome::Placed(p),
            Outcome::Exhausted(ExhaustReason::NoReachableGoal) => {
                reason = ExhaustReason::NoReachableGoal;
            }
            Outcome::Exhausted(ExhaustReason::NoFreeStart) => {}
        }
    }
    Outcome::Exhausted(reason)
}

/// Place up to `count` agents from `pools`, stopping at the first
/// exhausted attempt.
///
/// Paired pools with a non-zero reverse probability draw one `bool` per
/// agent before its attempt and swap starts and goals on `true`. Region
/// pools try each ordered region pair in a fresh shuffled order per agent.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{BaseGrid, CellSize};
/// use fleetgrid_placement::{place, CandidatePools, OccupancyLedger, PlacementConfig};
/// use fleetgrid_space::{project, Connectivity};
/// use rand::SeedableRng;
///
/// let grid = BaseGrid::open(6, 6).unwrap();
/// let fleet = project(&grid, CellSize::new(3).unwrap());
/// let conn = Connectivity::analyze(&fleet);
/// let pools = CandidatePools::component(conn.largest().unwrap());
/// let mut ledger = OccupancyLedger::new();
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
///
/// let result = place(&fleet, &conn, &pools, 5, &mut ledger,
///                    &PlacementConfig::default(), &mut rng);
/// assert_eq!(result.placed(), 2);
/// assert!(!result.is_complete());
/// ```
pub fn place<R: Rng + ?Sized>(
    fleet: &FleetGrid,
    connectivity: &Connectivity,
    pools: &CandidatePools,
    count: usize,
    ledger: &mut OccupancyLedger,
    config: &PlacementConfig,
    rng: &mut R,
) -> FleetPlacement {
    let mut placements = Vec::with_capacity(count);
    let mut exhausted = None;

    for _ in 0..count {
        let outcome = match pools {
            CandidatePools::Paired {
                starts,
                goals,
                reverse_probability,
            } => {
                let p = *reverse_probability;
                let reversed = p > 0.0 && rng.random_bool(p.min(1.0));
                let (starts, goals) = if reversed {
                    (goals, starts)
                } else {
                    (starts, goals)
                };
                place_one(fleet, connectivity, starts, goals, ledger, config, rng)
            }
            CandidatePools::Regions(regions) => {
                place_between_regions(fleet, connectivity, regions, ledger, config, rng)
            }
        };
        match outcome {
            Outcome::Placed(p) => placements.push(p),
            Outcome::Exhausted(reason) => {
                exhausted = Some(reason);
                break;
            }
        }
    }

    FleetPlacement {
        placements,
        requested: count,
        exhausted,
    }
}
