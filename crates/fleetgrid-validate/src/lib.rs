//! Ground-truth validation of built scenarios.
//!
//! [`validate`] re-checks a finished agent list against the base grid
//! without trusting anything the placement engine computed: footprints are
//! re-scanned cell by cell, overlaps are recomputed pairwise across all
//! fleets, and reachability is decided by a breadth-first search over the
//! top-left positions of a rigid `cs x cs` block ([`find_block_path`]).
//!
//! Every failure is a [`Violation`] naming the check, the agents involved
//! and the offending coordinates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod reach;
pub mod report;
pub mod validator;

pub use reach::{block_reachable, find_block_path, replay_block_path, ReplayError};
pub use report::{Check, Endpoint, ValidationReport, Violation};
pub use validator::{validate, ValidatorConfig};
