use crate::{
    algorithm::compatibility::CompatibilityTable,
    algorithm::trail::Trail,
    io::error::{ForgeError, Result},
    spatial::{GridState, direction::Direction},
};

/// Outcome of pruning the neighbours of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationResult {
    /// Every neighbour kept at least one candidate
    Consistent {
        /// Number of candidates removed across all neighbours
        removals: usize,
    },
    /// A neighbour's domain became empty
    Conflict {
        /// Linear index of the emptied cell
        cell: usize,
    },
}

impl PropagationResult {
    /// Whether propagation found a contradiction
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Remove neighbour candidates that no longer have a compatible partner at `origin`
///
/// Each open neighbour keeps only the variants supported by some member of the
/// origin's current domain in the connecting direction. Removals are recorded on
/// the trail. Stops at the first neighbour left with an empty domain; the
/// caller undoes the partial work by rewinding the trail frame.
///
/// Only immediate neighbours are examined; the search calls this again after
/// every further collapse. A second call on an unchanged grid removes nothing.
///
/// # Errors
///
/// Returns [`ForgeError::InvariantViolation`] if `origin` is out of bounds
pub fn propagate(
    grid: &mut GridState,
    table: &CompatibilityTable,
    trail: &mut Trail,
    origin: usize,
) -> Result<PropagationResult> {
    let origin_domain = grid
        .domain(origin)
        .cloned()
        .ok_or(ForgeError::InvariantViolation {
            operation: "propagate",
            cell: origin,
            reason: "origin is out of bounds".to_string(),
        })?;

    let mut removals = 0;

    for direction in Direction::ALL {
        let Some(neighbor) = grid.neighbor(origin, direction) else {
            continue;
        };
        if grid.is_collapsed(neighbor) {
            continue;
        }

        let support = table.support(&origin_domain, direction);
        let unsupported: Vec<usize> = grid
            .domain(neighbor)
            .map(|domain| {
                domain
                    .iter()
                    .filter(|&variant| !support.contains(variant))
                    .collect()
            })
            .unwrap_or_default();

        for variant in unsupported {
            if grid.remove_from_domain(neighbor, variant, trail)? {
                removals += 1;
            }
        }

        if grid.domain_size(neighbor) == 0 {
            log::trace!("propagation from cell {origin} emptied cell {neighbor}");
            return Ok(PropagationResult::Conflict { cell: neighbor });
        }
    }

    Ok(PropagationResult::Consistent { removals })
}

/// Count the candidates a variant at `cell` would remove from its open neighbours
///
/// This is the least-constraining-value score; nothing is modified.
pub fn count_eliminated(
    grid: &GridState,
    table: &CompatibilityTable,
    cell: usize,
    variant: usize,
) -> usize {
    grid.neighbors(cell)
        .filter(|&(_, neighbor)| !grid.is_collapsed(neighbor))
        .map(|(direction, neighbor)| {
            match (grid.domain(neighbor), table.allowed(variant, direction)) {
                (Some(domain), Some(allowed)) => domain.count_outside(allowed),
                (Some(domain), None) => domain.count(),
                _ => 0,
            }
        })
        .sum()
}
