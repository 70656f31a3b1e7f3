//! Adjacency rules derived from tile edge connectors
//!
//! The table is compiled once per catalog. For every variant and direction it
//! stores the bitset of variants that may sit on that side, and it keeps the
//! tile-level projection (some rotation of A next to some rotation of B) for
//! callers that reason about tile types rather than orientations.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{ForgeError, Result, invalid_catalog};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{ConnectorLabel, TileCatalog};
use ndarray::{Array2, Array3};
use std::collections::{HashMap, HashSet};

/// Decides whether two facing edge labels may touch
///
/// Implementations must be commutative; the table build rejects rules that
/// are not, since an asymmetric rule would make adjacency depend on which
/// cell was collapsed first.
pub trait ConnectorRule {
    /// Whether an edge labelled `a` may face an edge labelled `b`
    fn matches(&self, a: &ConnectorLabel, b: &ConnectorLabel) -> bool;
}

impl<F> ConnectorRule for F
where
    F: Fn(&ConnectorLabel, &ConnectorLabel) -> bool,
{
    fn matches(&self, a: &ConnectorLabel, b: &ConnectorLabel) -> bool {
        self(a, b)
    }
}

/// Labels match when they are identical
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactMatch;

impl ConnectorRule for ExactMatch {
    fn matches(&self, a: &ConnectorLabel, b: &ConnectorLabel) -> bool {
        a == b
    }
}

/// Labels are symbol sets (`"sand|grass"`) that match when they share a symbol
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlapMatch;

impl ConnectorRule for OverlapMatch {
    fn matches(&self, a: &ConnectorLabel, b: &ConnectorLabel) -> bool {
        a.symbols().any(|symbol| b.symbols().any(|other| other == symbol))
    }
}

/// Explicit socket compatibility pairs
///
/// Every pair is stored in both orders, so the rule is commutative by
/// construction. A label is only compatible with itself if that pair is listed.
#[derive(Clone, Debug, Default)]
pub struct SocketTable {
    pairs: HashSet<(String, String)>,
}

impl SocketTable {
    /// Create a socket table from label pairs
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::default();
        for (a, b) in pairs {
            table.allow(a, b);
        }
        table
    }

    /// Allow two labels to face each other
    pub fn allow(&mut self, a: &str, b: &str) {
        self.pairs.insert((a.to_string(), b.to_string()));
        self.pairs.insert((b.to_string(), a.to_string()));
    }
}

impl ConnectorRule for SocketTable {
    fn matches(&self, a: &ConnectorLabel, b: &ConnectorLabel) -> bool {
        self.pairs
            .contains(&(a.as_str().to_string(), b.as_str().to_string()))
    }
}

/// Precomputed adjacency relation over tile variants and tiles
///
/// Immutable after construction and safe to share between concurrent solves.
#[derive(Clone, Debug)]
pub struct CompatibilityTable {
    variant_count: usize,
    /// Allowed neighbours, indexed by `direction * variant_count + variant`
    allowed: Vec<TileBitset>,
    /// Tile-level projection, indexed by `[direction, tile_a, tile_b]`
    tile_pairs: Array3<bool>,
    variant_tiles: Vec<usize>,
    tile_indices: HashMap<u32, usize>,
}

impl CompatibilityTable {
    /// Build the table with exact label equality
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is malformed
    pub fn build(catalog: &TileCatalog) -> Result<Self> {
        Self::build_with(catalog, &ExactMatch)
    }

    /// Build the table with a custom connector rule
    ///
    /// Variant `b` is allowed on side `d` of variant `a` when `a`'s edge facing
    /// `d` matches `b`'s edge facing the opposite way.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidCatalog`] if the rule is not commutative over
    /// the labels used by the catalog, or if a variant lacks edge data
    pub fn build_with(catalog: &TileCatalog, rule: &impl ConnectorRule) -> Result<Self> {
        let labels: Vec<&ConnectorLabel> = catalog.labels().into_iter().collect();
        let label_index: HashMap<&ConnectorLabel, usize> = labels
            .iter()
            .enumerate()
            .map(|(index, &label)| (label, index))
            .collect();

        let label_matches = Self::label_matrix(&labels, rule)?;

        let variant_count = catalog.variant_count();
        let tile_count = catalog.len();

        // Resolve every variant's edges to label indices up front
        let mut edge_labels = Vec::with_capacity(variant_count);
        for variant in 0..variant_count {
            let edges = catalog
                .variant_edges(variant)
                .ok_or(ForgeError::InvalidTileIndex {
                    index: variant,
                    max_tiles: variant_count,
                })?;
            let mut indices = [0_usize; 4];
            for (slot, direction) in indices.iter_mut().zip(Direction::ALL) {
                *slot = label_index
                    .get(edges.edge(direction))
                    .copied()
                    .ok_or_else(|| {
                        invalid_catalog(&format!("unindexed label '{}'", edges.edge(direction)))
                    })?;
            }
            edge_labels.push(indices);
        }

        let variant_tiles: Vec<usize> = catalog
            .variants()
            .iter()
            .map(|variant| variant.tile_index)
            .collect();

        let mut allowed = Vec::with_capacity(variant_count * Direction::ALL.len());
        let mut tile_pairs = Array3::from_elem((Direction::ALL.len(), tile_count, tile_count), false);

        for direction in Direction::ALL {
            let facing = direction.opposite();
            for (a, edges_a) in edge_labels.iter().enumerate() {
                let mut row = TileBitset::new(variant_count);
                let label_a = edges_a.get(direction.index()).copied().unwrap_or(0);
                for (b, edges_b) in edge_labels.iter().enumerate() {
                    let label_b = edges_b.get(facing.index()).copied().unwrap_or(0);
                    if label_matches.get([label_a, label_b]).copied().unwrap_or(false) {
                        row.insert(b);
                        let tile_a = variant_tiles.get(a).copied().unwrap_or(0);
                        let tile_b = variant_tiles.get(b).copied().unwrap_or(0);
                        if let Some(pair) =
                            tile_pairs.get_mut([direction.index(), tile_a, tile_b])
                        {
                            *pair = true;
                        }
                    }
                }
                allowed.push(row);
            }
        }

        let tile_indices = catalog
            .tiles()
            .iter()
            .enumerate()
            .map(|(index, tile)| (tile.id(), index))
            .collect();

        log::debug!(
            "built compatibility table: {tile_count} tiles, {variant_count} variants, {} labels",
            labels.len()
        );

        Ok(Self {
            variant_count,
            allowed,
            tile_pairs,
            variant_tiles,
            tile_indices,
        })
    }

    // Evaluates the rule once per label pair and rejects non-commutative rules
    fn label_matrix(labels: &[&ConnectorLabel], rule: &impl ConnectorRule) -> Result<Array2<bool>> {
        let count = labels.len();
        let mut matrix = Array2::from_elem((count, count), false);
        for (i, &a) in labels.iter().enumerate() {
            for (j, &b) in labels.iter().enumerate() {
                if let Some(cell) = matrix.get_mut([i, j]) {
                    *cell = rule.matches(a, b);
                }
            }
        }

        for (i, &a) in labels.iter().enumerate() {
            for (j, &b) in labels.iter().enumerate().skip(i + 1) {
                if matrix.get([i, j]) != matrix.get([j, i]) {
                    return Err(invalid_catalog(&format!(
                        "connector rule is not commutative for labels '{a}' and '{b}'"
                    )));
                }
            }
        }

        Ok(matrix)
    }

    /// Number of variants covered by the table
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Number of tile types covered by the table
    pub fn tile_count(&self) -> usize {
        self.tile_pairs.dim().1
    }

    /// Variants allowed on the given side of `variant`
    pub fn allowed(&self, variant: usize, direction: Direction) -> Option<&TileBitset> {
        if variant >= self.variant_count {
            return None;
        }
        self.allowed
            .get(direction.index() * self.variant_count + variant)
    }

    /// Whether variant `b` may sit on side `direction` of variant `a`
    pub fn variants_compatible(&self, a: usize, direction: Direction, b: usize) -> bool {
        self.allowed(a, direction)
            .is_some_and(|row| row.contains(b))
    }

    /// Whether some rotation of tile `b` may sit on side `direction` of some
    /// rotation of tile `a` (catalog indices)
    pub fn tiles_compatible(&self, a: usize, direction: Direction, b: usize) -> bool {
        self.tile_pairs
            .get([direction.index(), a, b])
            .copied()
            .unwrap_or(false)
    }

    /// Tile-level compatibility by tile ID
    pub fn compatible(&self, a: u32, direction: Direction, b: u32) -> bool {
        match (self.tile_indices.get(&a), self.tile_indices.get(&b)) {
            (Some(&a), Some(&b)) => self.tiles_compatible(a, direction, b),
            _ => false,
        }
    }

    /// Catalog index of the tile a variant belongs to
    pub fn variant_tile(&self, variant: usize) -> Option<usize> {
        self.variant_tiles.get(variant).copied()
    }

    /// Union of the neighbours allowed on side `direction` by any member of `domain`
    ///
    /// A variant outside the result has no supporting partner in `domain`.
    pub fn support(&self, domain: &TileBitset, direction: Direction) -> TileBitset {
        let mut support = TileBitset::new(self.variant_count);
        for variant in domain.iter() {
            if let Some(row) = self.allowed(variant, direction) {
                support.union_with(row);
            }
        }
        support
    }

    /// Check `compatible(a, d, b) == compatible(b, opposite(d), a)` for every entry
    pub fn is_symmetric(&self) -> bool {
        Direction::ALL.into_iter().all(|direction| {
            (0..self.variant_count).all(|a| {
                (0..self.variant_count).all(|b| {
                    self.variants_compatible(a, direction, b)
                        == self.variants_compatible(b, direction.opposite(), a)
                })
            })
        })
    }
}
