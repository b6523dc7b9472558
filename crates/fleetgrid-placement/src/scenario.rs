//! Multi-fleet scenario construction.
//!
//! Projection and connectivity are computed once per distinct cell size,
//! then fleets are placed largest cell size first against one shared
//! [`OccupancyLedger`]. Agent ids follow placement order.

use std::cmp::Reverse;
use std::fmt;

use fleetgrid_core::{Agent, AgentId, BaseGrid, CellSize, FleetId};
use fleetgrid_space::{project, Connectivity, FleetGrid, FleetGridSummary};
use indexmap::IndexMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, PlacementStrategy, ScenarioConfig};
use crate::engine::{place, CandidatePools, ExhaustReason};
use crate::ledger::OccupancyLedger;

// ── Reports ────────────────────────────────────────────────────────

/// Why a fleet had nothing to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DegenerateReason {
    /// The fleet grid has no valid tile (cell size too large for the map,
    /// or every tile touches a wall).
    NoValidTiles,
    /// No valid tile lies inside the start region.
    EmptyStartRegion,
    /// No valid tile lies inside the goal region.
    EmptyGoalRegion,
    /// Fewer than two endpoint regions admit the cell size and hold a
    /// valid tile.
    TooFewRegions,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValidTiles => write!(f, "no valid tiles"),
            Self::EmptyStartRegion => write!(f, "start region holds no valid tile"),
            Self::EmptyGoalRegion => write!(f, "goal region holds no valid tile"),
            Self::TooFewRegions => write!(f, "fewer than two usable regions"),
        }
    }
}

/// How placement went for one fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FleetStatus {
    /// Every requested agent was placed.
    Complete,
    /// Placement stopped early.
    UnderPlaced(ExhaustReason),
    /// The fleet had no candidates; zero agents were placed.
    Degenerate(DegenerateReason),
}

impl fmt::Display for FleetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::UnderPlaced(r) => write!(f, "under-placed ({r})"),
            Self::Degenerate(r) => write!(f, "degenerate ({r})"),
        }
    }
}

/// Per-fleet placement counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleetReport {
    /// Fleet id (request index).
    pub fleet: FleetId,
    /// Footprint side length.
    pub cell_size: CellSize,
    /// Agents asked for.
    pub requested: usize,
    /// Agents placed.
    pub placed: usize,
    /// Outcome.
    pub status: FleetStatus,
    /// Statistics of the fleet grid the agents were drawn from.
    pub grid: FleetGridSummary,
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fleet {} cs={}: {}/{} placed, {}",
            self.fleet, self.cell_size, self.placed, self.requested, self.status
        )
    }
}

/// A built scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Seed the scenario was built from.
    pub seed: u64,
    /// Agents sorted by id, in base-grid coordinates.
    pub agents: Vec<Agent>,
    /// One report per fleet, in request order.
    pub fleets: Vec<FleetReport>,
}

impl Scenario {
    /// Total agents placed.
    pub fn placed(&self) -> usize {
        self.agents.len()
    }

    /// Total agents requested.
    pub fn requested(&self) -> usize {
        self.fleets.iter().map(|r| r.requested).sum()
    }

    /// Whether every fleet was fully placed.
    pub fn is_complete(&self) -> bool {
        self.fleets.iter().all(|r| r.status == FleetStatus::Complete)
    }

    /// Reports of fleets that fell short.
    pub fn shortfalls(&self) -> impl Iterator<Item = &FleetReport> + '_ {
        self.fleets
            .iter()
            .filter(|r| r.status != FleetStatus::Complete)
    }

    /// Agents of one fleet.
    pub fn fleet_agents(&self, fleet: FleetId) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter().filter(move |a| a.fleet == fleet)
    }
}

// ── Builder ────────────────────────────────────────────────────────

struct Analysed {
    fleet: FleetGrid,
    connectivity: Connectivity,
    summary: FleetGridSummary,
}

/// Fleet indices, largest cell size first, ties in request order.
fn placement_order(config: &ScenarioConfig) -> Vec<usize> {
    let mut order: Vec<usize> = (0..config.fleets.len()).collect();
    order.sort_by_key(|&i| Reverse(config.fleets[i].cell_size));
    order
}

fn analyse(grid: &BaseGrid, config: &ScenarioConfig) -> IndexMap<CellSize, Analysed> {
    let mut cache = IndexMap::new();
    for i in placement_order(config) {
        let cs = config.fleets[i].cell_size;
        cache.entry(cs).or_insert_with(|| {
            let fleet = project(grid, cs);
            let connectivity = Connectivity::analyze(&fleet);
            let summary = connectivity.summary(&fleet);
            log::info!("fleet grid {summary}");
            Analysed {
                fleet,
                connectivity,
                summary,
            }
        });
    }
    cache
}

/// Build one scenario.
///
/// Fails only on invalid configuration; shortfalls are reported in
/// [`Scenario::fleets`].
///
/// # Examples
///
/// ```
/// use fleetgrid_core::BaseGrid;
/// use fleetgrid_placement::{build_scenario, FleetRequest, FleetStatus, ScenarioConfig};
///
/// let grid = BaseGrid::open(6, 6).unwrap();
/// let config = ScenarioConfig::new(vec![FleetRequest::new(3, 5).unwrap()]).with_seed(1);
/// let scenario = build_scenario(&grid, &config).unwrap();
/// assert_eq!(scenario.placed(), 2);
/// assert!(matches!(scenario.fleets[0].status, FleetStatus::UnderPlaced(_)));
/// ```
pub fn build_scenario(grid: &BaseGrid, config: &ScenarioConfig) -> Result<Scenario, ConfigError> {
    config.validate(grid)?;
    let cache = analyse(grid, config);
    Ok(place_all(&cache, config, config.seed))
}

/// Build one scenario per seed, sharing projection and connectivity.
pub fn build_batch(
    grid: &BaseGrid,
    config: &ScenarioConfig,
    seeds: impl IntoIterator<Item = u64>,
) -> Result<Vec<Scenario>, ConfigError> {
    config.validate(grid)?;
    let cache = analyse(grid, config);
    Ok(seeds
        .into_iter()
        .map(|seed| place_all(&cache, config, seed))
        .collect())
}

fn place_all(cache: &IndexMap<CellSize, Analysed>, config: &ScenarioConfig, seed: u64) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ledger = OccupancyLedger::new();
    let mut agents = Vec::new();
    let mut reports: Vec<Option<FleetReport>> = vec![None; config.fleets.len()];

    for i in placement_order(config) {
        let request = config.fleets[i];
        let fleet_id = FleetId(u32::try_from(i).expect("fleet count validated"));
        let cs = request.cell_size;
        let Some(analysed) = cache.get(&cs) else {
            continue;
        };

        let mut report = FleetReport {
            fleet: fleet_id,
            cell_size: cs,
            requested: request.count,
            placed: 0,
            status: FleetStatus::Complete,
            grid: analysed.summary,
        };
        if request.count == 0 {
            reports[i] = Some(report);
            continue;
        }

        let pools = match candidate_pools(analysed, &config.strategy) {
            Ok(pools) => pools,
            Err(reason) => {
                log::warn!("fleet {fleet_id} cs={cs} is degenerate: {reason}");
                report.status = FleetStatus::Degenerate(reason);
                reports[i] = Some(report);
                continue;
            }
        };

        let result = place(
            &analysed.fleet,
            &analysed.connectivity,
            &pools,
            request.count,
            &mut ledger,
            &config.placement,
            &mut rng,
        );

        for p in &result.placements {
            let agent = Agent {
                id: AgentId(u32::try_from(agents.len()).expect("agent count validated")),
                fleet: fleet_id,
                cell_size: cs,
                start: p.start.to_base(cs),
                goal: p.goal.to_base(cs),
            };
            log::debug!("{agent}");
            agents.push(agent);
        }

        report.placed = result.placed();
        if let Some(reason) = result.exhausted {
            log::warn!(
                "fleet {fleet_id} cs={cs}: placed {}/{} ({reason})",
                result.placed(),
                request.count
            );
            report.status = FleetStatus::UnderPlaced(reason);
        }
        reports[i] = Some(report);
    }

    let fleets: Vec<FleetReport> = reports.into_iter().flatten().collect();
    log::info!(
        "scenario seed={seed}: placed {}/{} agents across {} fleets",
        agents.len(),
        fleets.iter().map(|r| r.requested).sum::<usize>(),
        fleets.len()
    );
    Scenario {
        seed,
        agents,
        fleets,
    }
}

fn candidate_pools(
    analysed: &Analysed,
    strategy: &PlacementStrategy,
) -> Result<CandidatePools, DegenerateReason> {
    if analysed.fleet.is_empty() {
        return Err(DegenerateReason::NoValidTiles);
    }
    match strategy {
        PlacementStrategy::LargestComponent => analysed
            .connectivity
            .largest()
            .map(CandidatePools::component)
            .ok_or(DegenerateReason::NoValidTiles),
        PlacementStrategy::Split {
            start_region,
            goal_region,
            reverse_probability,
        } => {
            let pools = CandidatePools::split(
                &analysed.fleet,
                start_region,
                goal_region,
                *reverse_probability,
            );
            match &pools {
                CandidatePools::Paired { starts, .. } if starts.is_empty() => {
                    Err(DegenerateReason::EmptyStartRegion)
                }
                CandidatePools::Paired { goals, .. } if goals.is_empty() => {
                    Err(DegenerateReason::EmptyGoalRegion)
                }
                _ => Ok(pools),
            }
        }
        PlacementStrategy::Regions(regions) => {
            let pools = CandidatePools::regions(&analysed.fleet, regions);
            match &pools {
                CandidatePools::Regions(usable) if usable.len() < 2 => {
                    Err(DegenerateReason::TooFewRegions)
                }
                _ => Ok(pools),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FleetRequest;
    use fleetgrid_core::{BaseRect, Region};
    use fleetgrid_test_utils::{open_grid, wall_with_door};

    fn req(cs: u32, count: usize) -> FleetRequest {
        FleetRequest::new(cs, count).unwrap()
    }

    #[test]
    fn placement_order_is_largest_first_and_stable() {
        let config = ScenarioConfig::new(vec![req(1, 1), req(3, 1), req(1, 1), req(3, 1)]);
        assert_eq!(placement_order(&config), vec![1, 3, 0, 2]);
    }

    #[test]
    fn duplicate_cell_sizes_share_one_projection() {
        let config = ScenarioConfig::new(vec![req(2, 1), req(1, 1), req(2, 1)]);
        let cache = analyse(&open_grid(8, 8), &config);
        assert_eq!(cache.len(), 2);
        let sizes: Vec<u32> = cache.keys().map(|c| c.get()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn ids_follow_placement_order() {
        let config = ScenarioConfig::new(vec![req(1, 2), req(2, 2)]).with_seed(4);
        let scenario = build_scenario(&open_grid(12, 12), &config).unwrap();
        assert!(scenario.is_complete());
        let fleets: Vec<u32> = scenario.agents.iter().map(|a| a.fleet.0).collect();
        assert_eq!(fleets, vec![1, 1, 0, 0]);
        let ids: Vec<u32> = scenario.agents.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(scenario.fleets[0].fleet, FleetId(0));
        assert_eq!(scenario.fleet_agents(FleetId(1)).count(), 2);
    }

    #[test]
    fn oversized_fleet_is_degenerate() {
        let config = ScenarioConfig::new(vec![req(5, 3), req(1, 1)]);
        let scenario = build_scenario(&open_grid(4, 4), &config).unwrap();
        assert_eq!(
            scenario.fleets[0].status,
            FleetStatus::Degenerate(DegenerateReason::NoValidTiles)
        );
        assert_eq!(scenario.fleets[0].placed, 0);
        assert_eq!(scenario.fleets[1].status, FleetStatus::Complete);
        assert_eq!(scenario.shortfalls().count(), 1);
    }

    #[test]
    fn exhausted_fleet_stops_but_later_fleets_run() {
        // The cs=3 fleet fills the left 6x6 block; column 6 stays free for cs=1.
        let config = ScenarioConfig::new(vec![req(3, 5), req(1, 2)]).with_seed(2);
        let scenario = build_scenario(&open_grid(7, 6), &config).unwrap();
        assert_eq!(scenario.fleets[0].placed, 2);
        assert_eq!(
            scenario.fleets[0].status,
            FleetStatus::UnderPlaced(ExhaustReason::NoFreeStart)
        );
        assert_eq!(scenario.fleets[1].status, FleetStatus::Complete);
        for a in scenario.fleet_agents(FleetId(1)) {
            assert_eq!((a.start.x, a.goal.x), (6, 6));
        }
    }

    #[test]
    fn zero_count_fleet_is_complete() {
        let config = ScenarioConfig::new(vec![req(9, 0)]);
        let scenario = build_scenario(&open_grid(4, 4), &config).unwrap();
        assert!(scenario.is_complete());
        assert!(scenario.agents.is_empty());
    }

    #[test]
    fn split_region_without_tiles_is_degenerate() {
        // The start region is only one column wide; no cs=2 tile fits in it.
        let config = ScenarioConfig::new(vec![req(2, 1)]).with_strategy(PlacementStrategy::Split {
            start_region: BaseRect::new(0, 0, 1, 6),
            goal_region: BaseRect::new(2, 0, 4, 6),
            reverse_probability: 0.0,
        });
        let scenario = build_scenario(&open_grid(6, 6), &config).unwrap();
        assert_eq!(
            scenario.fleets[0].status,
            FleetStatus::Degenerate(DegenerateReason::EmptyStartRegion)
        );
    }

    #[test]
    fn split_strategy_crosses_the_wall() {
        let grid = wall_with_door(10, 10, 5, 4..6);
        let config = ScenarioConfig::new(vec![req(1, 4)])
            .with_seed(9)
            .with_strategy(PlacementStrategy::Split {
                start_region: BaseRect::new(0, 0, 5, 10),
                goal_region: BaseRect::new(6, 0, 4, 10),
                reverse_probability: 0.0,
            });
        let scenario = build_scenario(&grid, &config).unwrap();
        assert!(scenario.is_complete());
        for a in &scenario.agents {
            assert!(a.start.x < 5);
            assert!(a.goal.x > 5);
        }
    }

    #[test]
    fn region_strategy_needs_two_usable_regions() {
        // The west region is one column wide, so only the east one admits cs=2.
        let regions = vec![
            Region::new(BaseRect::new(0, 0, 1, 8)),
            Region::new(BaseRect::new(4, 0, 4, 8)),
        ];
        let config = ScenarioConfig::new(vec![req(2, 2), req(1, 2)])
            .with_seed(3)
            .with_strategy(PlacementStrategy::Regions(regions));
        let scenario = build_scenario(&open_grid(8, 8), &config).unwrap();
        assert_eq!(
            scenario.fleets[0].status,
            FleetStatus::Degenerate(DegenerateReason::TooFewRegions)
        );
        assert_eq!(scenario.fleets[1].status, FleetStatus::Complete);
        for a in scenario.fleet_agents(FleetId(1)) {
            assert_ne!(a.start.x < 1, a.goal.x < 1);
        }
    }

    #[test]
    fn oversized_id_space_is_rejected_before_placement() {
        let config = ScenarioConfig::new(vec![req(1, u32::MAX as usize), req(1, 1)]);
        match build_scenario(&open_grid(4, 4), &config) {
            Err(ConfigError::CountOverflow { what: "agents", .. }) => {}
            other => panic!("expected CountOverflow, got {other:?}"),
        }
    }

    #[test]
    fn invalid_config_is_an_error() {
        let config = ScenarioConfig::default();
        assert_eq!(
            build_scenario(&open_grid(4, 4), &config),
            Err(ConfigError::NoFleets)
        );
    }

    #[test]
    fn report_display() {
        let config = ScenarioConfig::new(vec![req(3, 5)]).with_seed(2);
        let scenario = build_scenario(&open_grid(6, 6), &config).unwrap();
        assert_eq!(
            scenario.fleets[0].to_string(),
            "fleet 0 cs=3: 2/5 placed, under-placed (no free start)"
        );
    }
}
