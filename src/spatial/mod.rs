//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and edge indexing
//! - Grid state with per-cell domains
//! - Solved layouts
//! - Tile types and catalogs

/// Cardinal directions
pub mod direction;
/// Grid state management and domain mutation
pub mod grid;
/// Solved layouts and tile assignments
pub mod layout;
/// Tile types, edge labels and catalog validation
pub mod tiles;

pub use grid::GridState;
