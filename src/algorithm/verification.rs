//! Adjacency checks for finished layouts

use crate::algorithm::compatibility::CompatibilityTable;
use crate::spatial::direction::Direction;
use crate::spatial::layout::SolvedGrid;
use crate::spatial::tiles::TileCatalog;

/// A pair of neighbouring cells whose facing edges do not match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Linear index of the first cell
    pub cell: usize,
    /// Side of `cell` on which `neighbor` lies
    pub direction: Direction,
    /// Linear index of the neighbouring cell
    pub neighbor: usize,
}

/// List every incompatible east and south neighbour pair in a layout
///
/// Assignments naming unknown tiles or rotations count as violations with
/// every neighbour. An empty result means the layout is valid.
pub fn find_violations(
    layout: &SolvedGrid,
    catalog: &TileCatalog,
    table: &CompatibilityTable,
) -> Vec<Violation> {
    let variant_of = |x: usize, y: usize| {
        layout
            .get(x, y)
            .and_then(|assignment| catalog.variant_index(assignment.tile_id, assignment.rotation))
    };

    let mut violations = Vec::new();
    for y in 0..layout.height() {
        for x in 0..layout.width() {
            let cell = y * layout.width() + x;
            let here = variant_of(x, y);
            for (direction, nx, ny) in [(Direction::East, x + 1, y), (Direction::South, x, y + 1)] {
                if nx >= layout.width() || ny >= layout.height() {
                    continue;
                }
                let there = variant_of(nx, ny);
                let compatible = match (here, there) {
                    (Some(a), Some(b)) => table.variants_compatible(a, direction, b),
                    _ => false,
                };
                if !compatible {
                    violations.push(Violation {
                        cell,
                        direction,
                        neighbor: ny * layout.width() + nx,
                    });
                }
            }
        }
    }
    violations
}

/// Whether a layout satisfies every adjacency constraint
pub fn is_valid(layout: &SolvedGrid, catalog: &TileCatalog, table: &CompatibilityTable) -> bool {
    find_violations(layout, catalog, table).is_empty()
}
