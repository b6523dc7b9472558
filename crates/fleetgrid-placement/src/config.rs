//! Scenario configuration, validation, and error types.
//!
//! [`ScenarioConfig`] is the input to [`build_scenario`](crate::build_scenario).
//! [`validate()`](ScenarioConfig::validate) checks it against the target
//! grid before any RNG is drawn.

use std::error::Error;
use std::fmt;

use fleetgrid_core::{BaseGrid, BaseRect, CellSize, GridError, Region};

// ── PlacementConfig ────────────────────────────────────────────────

/// Retry budgets and goal preferences for the placement engine.
///
/// Budgets are per agent. Start candidates are walked in shuffled order;
/// for each free start, the next `goal_attempts` goals of a shuffled goal
/// order are examined, the walk resuming where the previous start left
/// off. A fleet stops at its first agent that exhausts the budget and is
/// reported under-placed; later fleets still run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Start candidates examined per agent before giving up. Default: 1000.
    pub start_attempts: usize,
    /// Goal candidates examined per start candidate. Default: 1000.
    pub goal_attempts: usize,
    /// Prefer goals off corridors, falling back to a corridor goal when no
    /// open one is found. Default: true.
    pub avoid_corridor_goals: bool,
    /// Tiles with at most this many valid neighbours count as corridor
    /// tiles. Default: 2.
    pub corridor_max_degree: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            start_attempts: 1000,
            goal_attempts: 1000,
            avoid_corridor_goals: true,
            corridor_max_degree: 2,
        }
    }
}

impl PlacementConfig {
    /// Check the retry budgets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                field: "start_attempts",
            });
        }
        if self.goal_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                field: "goal_attempts",
            });
        }
        Ok(())
    }
}

// ── PlacementStrategy ──────────────────────────────────────────────

/// Where a fleet's starts and goals are drawn from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PlacementStrategy {
    /// Starts and goals both come from the fleet grid's largest connected
    /// component.
    #[default]
    LargestComponent,
    /// Starts come from tiles whose footprint lies inside `start_region`,
    /// goals from tiles inside `goal_region`. Every pair is checked for
    /// connectivity explicitly.
    Split {
        /// Region starts are drawn from.
        start_region: BaseRect,
        /// Region goals are drawn from.
        goal_region: BaseRect,
        /// Probability that an agent runs goal region to start region
        /// instead. `0.0` sends everyone one way, `0.5` splits traffic
        /// evenly. Must lie in `[0, 1]`.
        reverse_probability: f64,
    },
    /// Each agent starts in one region and finishes in a different one,
    /// the ordered pair chosen uniformly among regions that admit the
    /// fleet's cell size and hold at least one of its tiles.
    Regions(Vec<Region>),
}

// ── FleetRequest ───────────────────────────────────────────────────

/// How many agents of one cell size to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleetRequest {
    /// Footprint side length shared by the fleet.
    pub cell_size: CellSize,
    /// Number of agents requested.
    pub count: usize,
}

impl FleetRequest {
    /// Request `count` agents of side `cell_size`, rejecting zero sizes.
    pub fn new(cell_size: u32, count: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            cell_size: CellSize::new(cell_size)?,
            count,
        })
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`ScenarioConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A malformed grid or cell size.
    Grid(GridError),
    /// A retry budget is zero.
    ZeroAttempts {
        /// Name of the offending field.
        field: &'static str,
    },
    /// No fleets were requested.
    NoFleets,
    /// Fleet ids or agent ids would not fit in `u32`.
    CountOverflow {
        /// `"fleets"` or `"agents"`.
        what: &'static str,
        /// The requested count.
        value: u128,
    },
    /// A region rectangle has zero area.
    EmptyRegion {
        /// `"start_region"`, `"goal_region"` or `"regions"`.
        which: &'static str,
    },
    /// A region rectangle extends past the grid.
    RegionOutOfBounds {
        /// `"start_region"`, `"goal_region"` or `"regions"`.
        which: &'static str,
        /// The offending region.
        region: BaseRect,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A reverse probability outside `[0, 1]`, or NaN.
    InvalidProbability {
        /// The configured value.
        value: f64,
    },
    /// A multi-region strategy needs at least two regions.
    TooFewRegions {
        /// Regions configured.
        count: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::ZeroAttempts { field } => write!(f, "{field} must be at least 1"),
            Self::NoFleets => write!(f, "no fleets requested"),
            Self::CountOverflow { what, value } => {
                write!(f, "{value} {what} requested, ids are limited to u32")
            }
            Self::EmptyRegion { which } => write!(f, "{which} has zero area"),
            Self::RegionOutOfBounds {
                which,
                region,
                width,
                height,
            } => write!(f, "{which} {region} exceeds the {width}x{height} grid"),
            Self::InvalidProbability { value } => {
                write!(f, "reverse_probability {value} is not in [0, 1]")
            }
            Self::TooFewRegions { count } => {
                write!(f, "{count} regions configured, at least 2 required")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── ScenarioConfig ─────────────────────────────────────────────────

/// Everything needed to build one scenario from a base grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioConfig {
    /// Fleets in request order. The position of a request is its
    /// [`FleetId`](fleetgrid_core::FleetId). Cell sizes may repeat.
    pub fleets: Vec<FleetRequest>,
    /// RNG seed. Same grid, fleets and seed give the same scenario.
    pub seed: u64,
    /// Engine budgets and preferences.
    pub placement: PlacementConfig,
    /// Candidate pools.
    pub strategy: PlacementStrategy,
}

impl ScenarioConfig {
    /// A config for `fleets` with default placement settings and seed 0.
    pub fn new(fleets: Vec<FleetRequest>) -> Self {
        Self {
            fleets,
            ..Self::default()
        }
    }

    /// Replace the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the strategy.
    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check structural invariants against the target grid.
    ///
    /// 1. At least one fleet is requested.
    /// 2. Fleet and agent counts fit the `u32` id space.
    /// 3. Retry budgets are non-zero.
    /// 4. Regions are non-empty and inside the grid; a split's reverse
    ///    probability lies in `[0, 1]`; a multi-region strategy names at
    ///    least two regions.
    pub fn validate(&self, grid: &BaseGrid) -> Result<(), ConfigError> {
        // 1. Fleets.
        if self.fleets.is_empty() {
            return Err(ConfigError::NoFleets);
        }

        // 2. Id space.
        let fleets = self.fleets.len() as u128;
        if fleets > u128::from(u32::MAX) {
            return Err(ConfigError::CountOverflow {
                what: "fleets",
                value: fleets,
            });
        }
        let agents: u128 = self.fleets.iter().map(|f| f.count as u128).sum();
        if agents > u128::from(u32::MAX) {
            return Err(ConfigError::CountOverflow {
                what: "agents",
                value: agents,
            });
        }

        // 3. Budgets.
        self.placement.validate()?;

        // 4. Regions.
        match &self.strategy {
            PlacementStrategy::LargestComponent => {}
            PlacementStrategy::Split {
                start_region,
                goal_region,
                reverse_probability,
            } => {
                check_region("start_region", start_region, grid)?;
                check_region("goal_region", goal_region, grid)?;
                if !(0.0..=1.0).contains(reverse_probability) {
                    return Err(ConfigError::InvalidProbability {
                        value: *reverse_probability,
                    });
                }
            }
            PlacementStrategy::Regions(regions) => {
                if regions.len() < 2 {
                    return Err(ConfigError::TooFewRegions {
                        count: regions.len(),
                    });
                }
                for rect in regions.iter().flat_map(|r| r.rects()) {
                    check_region("regions", rect, grid)?;
                }
            }
        }

        Ok(())
    }
}

fn check_region(which: &'static str, region: &BaseRect, grid: &BaseGrid) -> Result<(), ConfigError> {
    if region.is_empty() {
        return Err(ConfigError::EmptyRegion { which });
    }
    let x_end = u64::from(region.x) + u64::from(region.width);
    let y_end = u64::from(region.y) + u64::from(region.height);
    if x_end > u64::from(grid.width()) || y_end > u64::from(grid.height()) {
        return Err(ConfigError::RegionOutOfBounds {
            which,
            region: *region,
            width: grid.width(),
            height: grid.height(),
        });
    }
    Ok(())
}
