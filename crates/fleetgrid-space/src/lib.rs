//! Fleet grids and their connectivity.
//!
//! For each distinct footprint size the shared [`BaseGrid`](fleetgrid_core::BaseGrid)
//! is projected onto a non-overlapping tiling ([`FleetGrid`]); a tile is
//! valid only when every base cell under it is passable. [`Connectivity`]
//! then partitions the valid tiles into 4-connected [`Component`]s.
//!
//! Both steps are pure functions of `(grid, cell_size)` and are computed
//! once per distinct cell size.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod projector;

pub use connectivity::{components, Component, ComponentId, Connectivity, FleetGridSummary};
pub use projector::{project, FleetGrid};
