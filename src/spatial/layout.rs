//! Solved tile layouts handed to mesh and texture consumers

use crate::io::error::{ForgeError, Result};
use crate::spatial::GridState;
use crate::spatial::tiles::TileCatalog;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Tile and orientation assigned to one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAssignment {
    /// ID of the placed tile
    pub tile_id: u32,
    /// Index into the tile's rotation list
    pub rotation: usize,
}

/// Fully assigned grid, indexed `y * width + x`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSolvedGrid")]
pub struct SolvedGrid {
    width: usize,
    height: usize,
    cells: Vec<TileAssignment>,
}

// Unchecked shape of a layout as read from JSON
#[derive(Deserialize)]
struct RawSolvedGrid {
    width: usize,
    height: usize,
    cells: Vec<TileAssignment>,
}

impl TryFrom<RawSolvedGrid> for SolvedGrid {
    type Error = ForgeError;

    fn try_from(raw: RawSolvedGrid) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.cells)
    }
}

impl SolvedGrid {
    /// Wrap assignments in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if the cell count does not equal `width * height`
    pub fn new(width: usize, height: usize, cells: Vec<TileAssignment>) -> Result<Self> {
        let expected = width.checked_mul(height);
        if expected != Some(cells.len()) {
            let reason = expected.map_or_else(
                || format!("a {width}x{height} grid is too large"),
                |count| format!("expected {count} cells for a {width}x{height} grid"),
            );
            return Err(crate::io::error::invalid_parameter(
                "cells",
                &cells.len(),
                &reason,
            ));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Read the assignments out of a fully collapsed grid
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvariantViolation`] if a cell is still open and
    /// [`ForgeError::InvalidTileIndex`] if a variant is unknown to the catalog
    pub fn from_grid(grid: &GridState, catalog: &TileCatalog) -> Result<Self> {
        let mut cells = Vec::with_capacity(grid.cell_count());
        for cell in 0..grid.cell_count() {
            let variant = grid.assigned(cell).ok_or(ForgeError::InvariantViolation {
                operation: "from_grid",
                cell,
                reason: "cell is not collapsed".to_string(),
            })?;
            let invalid = || ForgeError::InvalidTileIndex {
                index: variant,
                max_tiles: catalog.variant_count(),
            };
            let tile_id = catalog.variant_tile_id(variant).ok_or_else(invalid)?;
            let rotation = catalog.variant(variant).ok_or_else(invalid)?.rotation;
            cells.push(TileAssignment { tile_id, rotation });
        }
        Self::new(grid.width(), grid.height(), cells)
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All assignments in linear cell order
    pub fn cells(&self) -> &[TileAssignment] {
        &self.cells
    }

    /// Assignment at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<TileAssignment> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Tile IDs as a `height x width` array
    pub fn tile_ids(&self) -> Array2<u32> {
        Array2::from_shape_fn((self.height, self.width), |(y, x)| {
            self.get(x, y).map_or(0, |assignment| assignment.tile_id)
        })
    }
}
