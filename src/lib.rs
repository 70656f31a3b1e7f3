//! Backtracking wave function collapse solver for tile-based terrain layouts
//!
//! A catalog of tile types with per-edge connector labels is compiled into a
//! compatibility table, then every cell of a rectangular grid is assigned a tile
//! orientation such that all neighbouring edges agree, or the search proves that
//! no such layout exists.

#![forbid(unsafe_code)]

/// Constraint model and search: domains, propagation, trail and the search driver
pub mod algorithm;
/// Catalog loading, presets, exports, command-line interface and error handling
pub mod io;
/// Grid state, directions and tile catalog data structures
pub mod spatial;

pub use algorithm::compatibility::{CompatibilityTable, ConnectorRule, ExactMatch};
pub use algorithm::executor::{SolveConfig, SolveOutcome, SolveReport, Solver, solve};
pub use io::error::{ForgeError, Result};
pub use spatial::tiles::{TileCatalog, TileType};
