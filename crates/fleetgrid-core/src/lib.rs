//! Core types for fleetgrid scenario construction.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! two coordinate spaces every other layer works in (the shared base grid
//! and the per-footprint tiling grid), square [`Footprint`]s, the immutable
//! [`BaseGrid`] occupancy map, agent and fleet identifiers, and the
//! [`GridError`] type for malformed input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod coord;
pub mod error;
pub mod grid;
pub mod id;

pub use agent::Agent;
pub use coord::{BaseCoord, BaseRect, CellSize, Footprint, Region, TilingCoord, DIRECTIONS};
pub use error::GridError;
pub use grid::{BaseGrid, BlockCause, BlockedCell, PASSABLE_TERRAIN};
pub use id::{AgentId, FleetId};
