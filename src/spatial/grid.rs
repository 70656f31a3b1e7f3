//! Grid state: per-cell domains and assignments
//!
//! Cells are addressed by linear index `y * width + x`. Every cell owns a
//! fixed-size bitset of the variants still possible there. Mutations go through
//! [`GridState::assign`] and [`GridState::remove_from_domain`], which record
//! every change on a [`Trail`] so the search can undo them exactly.

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::trail::{Trail, TrailEntry};
use crate::io::error::{ForgeError, Result};
use crate::spatial::direction::Direction;

/// Domains and assignments for every cell of a rectangular grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    variant_count: usize,
    domains: Vec<TileBitset>,
    assigned: Vec<Option<usize>>,
    collapsed_count: usize,
}

impl GridState {
    /// Create a grid where every cell may still take every variant
    pub fn new(width: usize, height: usize, variant_count: usize) -> Self {
        let cell_count = width * height;
        Self {
            width,
            height,
            variant_count,
            domains: vec![TileBitset::all(variant_count); cell_count],
            assigned: vec![None; cell_count],
            collapsed_count: 0,
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Size of a full domain
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Linear index of `(x, y)`, if in bounds
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// `(x, y)` coordinates of a linear index
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        if self.width == 0 {
            (0, 0)
        } else {
            (cell % self.width, cell / self.width)
        }
    }

    /// Neighbouring cell in the given direction, if in bounds
    pub fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        if cell >= self.cell_count() {
            return None;
        }
        let (x, y) = self.coordinates(cell);
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.index(nx, ny)
    }

    /// In-bounds neighbours in north, east, south, west order
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.neighbor(cell, direction)?)))
    }

    /// Whether every cell has been assigned
    pub const fn is_fully_collapsed(&self) -> bool {
        self.collapsed_count == self.domains.len()
    }

    /// Number of collapsed cells
    pub const fn collapsed_count(&self) -> usize {
        self.collapsed_count
    }

    /// Whether a cell has been assigned
    pub fn is_collapsed(&self, cell: usize) -> bool {
        self.assigned.get(cell).copied().flatten().is_some()
    }

    /// Variant assigned to a cell, if collapsed
    pub fn assigned(&self, cell: usize) -> Option<usize> {
        self.assigned.get(cell).copied().flatten()
    }

    /// Candidates still possible at a cell
    pub fn domain(&self, cell: usize) -> Option<&TileBitset> {
        self.domains.get(cell)
    }

    /// Number of candidates still possible at a cell (0 when out of bounds)
    pub fn domain_size(&self, cell: usize) -> usize {
        self.domains.get(cell).map_or(0, TileBitset::count)
    }

    /// All domains in linear cell order
    pub fn domains(&self) -> &[TileBitset] {
        &self.domains
    }

    /// Collapse a cell to one variant
    ///
    /// Every other candidate is removed from the domain and logged on the trail,
    /// followed by the collapse itself, so rewinding restores the prior domain.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvariantViolation`] if the cell is out of bounds,
    /// already collapsed, or does not have `variant` in its domain
    pub fn assign(&mut self, cell: usize, variant: usize, trail: &mut Trail) -> Result<()> {
        if self.is_collapsed(cell) {
            return Err(violation("assign", cell, "cell is already collapsed"));
        }
        let domain = self
            .domains
            .get_mut(cell)
            .ok_or_else(|| violation("assign", cell, "cell is out of bounds"))?;
        if !domain.contains(variant) {
            return Err(violation(
                "assign",
                cell,
                format!("variant {variant} is not in the domain"),
            ));
        }

        for other in domain.to_vec() {
            if other != variant {
                domain.remove(other);
                trail.record(TrailEntry::Removed {
                    cell,
                    variant: other,
                });
            }
        }

        if let Some(slot) = self.assigned.get_mut(cell) {
            *slot = Some(variant);
        }
        self.collapsed_count += 1;
        trail.record(TrailEntry::Collapsed { cell });
        Ok(())
    }

    /// Remove one candidate from an uncollapsed cell
    ///
    /// Returns whether the domain changed; removals are logged on the trail.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvariantViolation`] if the cell is out of bounds or
    /// collapsed, since only open domains are ever pruned
    pub fn remove_from_domain(
        &mut self,
        cell: usize,
        variant: usize,
        trail: &mut Trail,
    ) -> Result<bool> {
        if self.is_collapsed(cell) {
            return Err(violation(
                "remove_from_domain",
                cell,
                "cannot prune a collapsed cell",
            ));
        }
        let domain = self
            .domains
            .get_mut(cell)
            .ok_or_else(|| violation("remove_from_domain", cell, "cell is out of bounds"))?;
        let removed = domain.remove(variant);
        if removed {
            trail.record(TrailEntry::Removed { cell, variant });
        }
        Ok(removed)
    }

    /// Undo one trail entry
    ///
    /// Only the trail calls this, replaying its entries newest first.
    pub(crate) fn revert(&mut self, entry: TrailEntry) {
        match entry {
            TrailEntry::Removed { cell, variant } => {
                if let Some(domain) = self.domains.get_mut(cell) {
                    domain.insert(variant);
                }
            }
            TrailEntry::Collapsed { cell } => {
                if let Some(slot) = self.assigned.get_mut(cell) {
                    if slot.take().is_some() {
                        self.collapsed_count -= 1;
                    }
                }
            }
        }
    }
}

fn violation(operation: &'static str, cell: usize, reason: impl ToString) -> ForgeError {
    ForgeError::InvariantViolation {
        operation,
        cell,
        reason: reason.to_string(),
    }
}
