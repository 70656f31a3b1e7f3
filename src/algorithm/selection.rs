//! Cell and candidate ordering heuristics
//!
//! Cells are chosen by minimum remaining values, candidates by least
//! constraining value. Ties always fall back to the lower index so repeated
//! solves of the same problem take the same path.

use crate::algorithm::compatibility::CompatibilityTable;
use crate::algorithm::propagation::count_eliminated;
use crate::spatial::GridState;

/// Open cell with the fewest remaining candidates
///
/// Ties are broken by lowest linear index. Returns `None` once every cell is
/// collapsed. A single-candidate cell ends the scan early since nothing can
/// beat it.
pub fn select_cell(grid: &GridState) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for cell in 0..grid.cell_count() {
        if grid.is_collapsed(cell) {
            continue;
        }
        let size = grid.domain_size(cell);
        if best.is_none_or(|(_, best_size)| size < best_size) {
            best = Some((cell, size));
            if size <= 1 {
                break;
            }
        }
    }

    best.map(|(cell, _)| cell)
}

/// Candidates of `cell` ordered by least constraining value
///
/// The score of a candidate is the number of options it would remove from
/// open neighbours. Equal scores keep variant order, which is tile ID then
/// rotation index.
pub fn order_candidates(grid: &GridState, table: &CompatibilityTable, cell: usize) -> Vec<usize> {
    let Some(domain) = grid.domain(cell) else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, usize)> = domain
        .iter()
        .map(|variant| (count_eliminated(grid, table, cell, variant), variant))
        .collect();
    scored.sort_unstable();

    scored.into_iter().map(|(_, variant)| variant).collect()
}
