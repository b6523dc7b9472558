//! Benchmark profiles for fleetgrid.
//!
//! - [`bottleneck_profile`]: 105x105 bottleneck-doors map, fleets of
//!   cs 1, 3, 5 and 7 crossing from room A to room B
//! - [`intersection_profile`]: 105x105 intersection, every fleet travelling
//!   between two of the four corridor ends it fits
//! - [`clearing_profile`]: 105x105 cooperative clearing map, 60% of agents
//!   heading left to right
//! - [`corridor_speed_profile`]: 105x105 corridor speed map, traffic split
//!   evenly between the two open areas
//! - [`FLEET_SIZES`]: the cell sizes every map is built around

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fleetgrid_core::BaseGrid;
use fleetgrid_placement::{FleetRequest, PlacementStrategy, ScenarioConfig};
use fleetgrid_test_utils::{
    bottleneck_doors, cooperative_clearing, corridor_speed, intersection, CorridorWidths,
};

/// Cell sizes of the benchmark fleets. 105 is their least common multiple.
pub const FLEET_SIZES: [u32; 4] = [1, 3, 5, 7];

/// Side length of every benchmark map.
pub const MAP_SIZE: u32 = 105;

/// Share of cooperative clearing agents that start in the left room.
pub const CLEARING_LEFT_TO_RIGHT: f64 = 0.6;

fn fleets(per_fleet: usize, sizes: &[u32]) -> Vec<FleetRequest> {
    sizes
        .iter()
        .map(|&cs| FleetRequest {
            cell_size: fleetgrid_test_utils::cs(cs),
            count: per_fleet,
        })
        .collect()
}

/// The bottleneck-doors map with one door per fleet size and
/// `per_fleet` agents in every fleet, all starting in room A.
pub fn bottleneck_profile(seed: u64, per_fleet: usize) -> (BaseGrid, ScenarioConfig) {
    let max_cs = FLEET_SIZES[FLEET_SIZES.len() - 1];
    let layout = bottleneck_doors(MAP_SIZE, &FLEET_SIZES, max_cs);
    let config = ScenarioConfig::new(fleets(per_fleet, &FLEET_SIZES))
        .with_seed(seed)
        .with_strategy(PlacementStrategy::Split {
            start_region: layout.room_a(),
            goal_region: layout.room_b(),
            reverse_probability: 0.0,
        });
    (layout.grid, config)
}

/// The intersection map with traffic between corridor ends.
///
/// Each fleet uses only the corridors at least as wide as its cell size,
/// together with the plaza half facing each one.
pub fn intersection_profile(seed: u64, per_fleet: usize) -> (BaseGrid, ScenarioConfig) {
    let layout = intersection(MAP_SIZE, 28, CorridorWidths::default(), 7);
    let config = ScenarioConfig::new(fleets(per_fleet, &FLEET_SIZES))
        .with_seed(seed)
        .with_strategy(PlacementStrategy::Regions(layout.endpoint_regions()));
    (layout.grid, config)
}

/// The cooperative clearing map with agents swapping rooms.
pub fn clearing_profile(seed: u64, per_fleet: usize) -> (BaseGrid, ScenarioConfig) {
    let layout = cooperative_clearing(MAP_SIZE);
    let config = ScenarioConfig::new(fleets(per_fleet, &FLEET_SIZES))
        .with_seed(seed)
        .with_strategy(PlacementStrategy::Split {
            start_region: layout.room_a,
            goal_region: layout.room_b,
            reverse_probability: 1.0 - CLEARING_LEFT_TO_RIGHT,
        });
    (layout.grid, config)
}

/// The corridor speed map with half the agents in each direction.
pub fn corridor_speed_profile(seed: u64, per_fleet: usize) -> (BaseGrid, ScenarioConfig) {
    let layout = corridor_speed(MAP_SIZE);
    let config = ScenarioConfig::new(fleets(per_fleet, &FLEET_SIZES))
        .with_seed(seed)
        .with_strategy(PlacementStrategy::Split {
            start_region: layout.left,
            goal_region: layout.right,
            reverse_probability: 0.5,
        });
    (layout.grid, config)
}
