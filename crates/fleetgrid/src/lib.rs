//! fleetgrid: scenario construction and validation for heterogeneous
//! multi-agent pathfinding.
//!
//! Agents come in fleets of square footprints of different sizes sharing
//! one occupancy map. Each fleet sees the map through its own
//! non-overlapping tiling; starts and goals are drawn per fleet but
//! reserved in shared base-grid cells, so no two agents ever collide at
//! spawn or at rest. A finished scenario is then re-checked from scratch,
//! including rigid-block reachability of every goal.
//!
//! This is the facade crate re-exporting every layer.
//!
//! # Quick start
//!
//! ```rust
//! use fleetgrid::prelude::*;
//!
//! let grid = BaseGrid::parse_map(
//!     "type octile\nheight 4\nwidth 8\nmap\n........\n........\n........\n........\n",
//! )
//! .unwrap();
//! let config = ScenarioConfig::new(vec![
//!     FleetRequest::new(2, 2).unwrap(),
//!     FleetRequest::new(1, 3).unwrap(),
//! ])
//! .with_seed(7);
//!
//! let scenario = build_scenario(&grid, &config).unwrap();
//! assert!(scenario.is_complete());
//!
//! let report = validate(&grid, &scenario.agents, &ValidatorConfig::default());
//! assert!(report.ok(), "{report}");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fleetgrid-core` | coordinates, footprints, base grid, agents |
//! | [`space`] | `fleetgrid-space` | fleet-grid projection and connectivity |
//! | [`placement`] | `fleetgrid-placement` | occupancy ledger, placement engine, scenario builder |
//! | [`validate`] | `fleetgrid-validate` | block reachability and scenario validation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates, footprints, base grid and agents (`fleetgrid-core`).
pub use fleetgrid_core as types;

/// Fleet-grid projection and connectivity (`fleetgrid-space`).
///
/// [`space::project`] builds a [`space::FleetGrid`] for one cell size;
/// [`space::Connectivity`] labels its 4-connected components.
pub use fleetgrid_space as space;

/// Occupancy ledger, placement engine and scenario builder
/// (`fleetgrid-placement`).
pub use fleetgrid_placement as placement;

/// Block reachability and scenario validation (`fleetgrid-validate`).
pub use fleetgrid_validate as validate;

/// Common imports for building and checking scenarios.
///
/// ```rust
/// use fleetgrid::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use fleetgrid_core::{
        Agent, AgentId, BaseCoord, BaseGrid, BaseRect, CellSize, FleetId, Footprint, GridError,
        Region, TilingCoord,
    };

    // Space
    pub use fleetgrid_space::{project, Connectivity, FleetGrid, FleetGridSummary};

    // Placement
    pub use fleetgrid_placement::{
        build_batch, build_scenario, ConfigError, FleetReport, FleetRequest, FleetStatus,
        PlacementConfig, PlacementStrategy, Scenario, ScenarioConfig,
    };

    // Validation
    pub use fleetgrid_validate::{validate, Check, ValidationReport, ValidatorConfig, Violation};
}
