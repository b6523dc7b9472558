//! Start/goal placement for multi-fleet scenarios.
//!
//! The [`OccupancyLedger`] records every base cell already claimed as a
//! start or a goal by any fleet. The [`engine`] samples non-colliding,
//! mutually reachable pairs for one fleet at a time against that ledger,
//! and [`build_scenario`] drives it across all fleets, largest cell size
//! first, from a seeded RNG.
//!
//! Running out of room is a routine outcome of random generation, so
//! under-placement and degenerate fleets are reported through
//! [`FleetStatus`] rather than as errors. Only malformed configuration
//! produces a [`ConfigError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod ledger;
pub mod scenario;

pub use config::{ConfigError, FleetRequest, PlacementConfig, PlacementStrategy, ScenarioConfig};
pub use engine::{place, place_one, CandidatePools, ExhaustReason, FleetPlacement, Outcome, Placement};
pub use ledger::{ConflictWith, OccupancyLedger, ReservationConflict};
pub use scenario::{
    build_batch, build_scenario, DegenerateReason, FleetReport, FleetStatus, Scenario,
};
