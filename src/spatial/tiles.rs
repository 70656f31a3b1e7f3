//! Tile catalog data structures
//!
//! A tile type carries one or more rotation variants, each described by the
//! connector labels on its four edges. The catalog validates tile definitions
//! and flattens them into variants (tile and rotation pairs), which are the
//! values the solver assigns to cells.

use crate::io::configuration::{LABEL_SET_SEPARATOR, MAX_VARIANTS, ROTATION_COUNT};
use crate::io::error::{Result, invalid_catalog};
use crate::spatial::direction::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Opaque connector symbol on one tile edge
///
/// A label may hold several symbols separated by `|`; only
/// [`crate::algorithm::compatibility::OverlapMatch`] looks inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorLabel(String);

impl ConnectorLabel {
    /// Create a label from any string
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The raw label text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual symbols of a label set, trimmed and without empty entries
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.0
            .split(LABEL_SET_SEPARATOR)
            .map(str::trim)
            .filter(|symbol| !symbol.is_empty())
    }

    fn is_blank(&self) -> bool {
        self.symbols().next().is_none()
    }
}

impl From<&str> for ConnectorLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ConnectorLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for ConnectorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connector labels on the four edges of one tile orientation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeLabels {
    /// Edge facing north
    pub north: ConnectorLabel,
    /// Edge facing east
    pub east: ConnectorLabel,
    /// Edge facing south
    pub south: ConnectorLabel,
    /// Edge facing west
    pub west: ConnectorLabel,
}

impl EdgeLabels {
    /// Create edge labels in north, east, south, west order
    pub fn new(
        north: impl Into<ConnectorLabel>,
        east: impl Into<ConnectorLabel>,
        south: impl Into<ConnectorLabel>,
        west: impl Into<ConnectorLabel>,
    ) -> Self {
        Self {
            north: north.into(),
            east: east.into(),
            south: south.into(),
            west: west.into(),
        }
    }

    /// Same label on every edge
    pub fn uniform(label: impl Into<ConnectorLabel>) -> Self {
        let label = label.into();
        Self {
            north: label.clone(),
            east: label.clone(),
            south: label.clone(),
            west: label,
        }
    }

    /// Label on the edge facing the given direction
    pub const fn edge(&self, direction: Direction) -> &ConnectorLabel {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }

    /// Edges after turning the tile clockwise by `quarter_turns`
    ///
    /// The edge that faced north faces east after one turn.
    #[must_use]
    pub fn rotated_clockwise(&self, quarter_turns: usize) -> Self {
        // The edge now facing `d` used to face `d` turned back by the same amount
        let back = ROTATION_COUNT - quarter_turns % ROTATION_COUNT;
        let source = |direction: Direction| self.edge(direction.rotated_clockwise(back)).clone();
        Self {
            north: source(Direction::North),
            east: source(Direction::East),
            south: source(Direction::South),
            west: source(Direction::West),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &ConnectorLabel> {
        Direction::ALL.into_iter().map(|direction| self.edge(direction))
    }
}

/// A tile type and its rotation variants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileType {
    id: u32,
    name: Option<String>,
    rotations: Vec<EdgeLabels>,
    color: Option<[u8; 3]>,
}

impl TileType {
    /// Create a tile from explicit per-rotation edge labels
    ///
    /// The position in `rotations` is the rotation index reported in solved grids.
    pub const fn new(id: u32, rotations: Vec<EdgeLabels>) -> Self {
        Self {
            id,
            name: None,
            rotations,
            color: None,
        }
    }

    /// Create a tile from base edges and a list of clockwise quarter turns
    ///
    /// Duplicate turns (modulo four) are dropped, order is preserved.
    pub fn with_turns(id: u32, base: &EdgeLabels, quarter_turns: &[usize]) -> Self {
        let mut seen = HashSet::new();
        let rotations = quarter_turns
            .iter()
            .map(|turns| turns % ROTATION_COUNT)
            .filter(|turns| seen.insert(*turns))
            .map(|turns| base.rotated_clockwise(turns))
            .collect();
        Self::new(id, rotations)
    }

    /// A tile with the same label on every edge and a single rotation
    pub fn symmetric(id: u32, label: impl Into<ConnectorLabel>) -> Self {
        Self::new(id, vec![EdgeLabels::uniform(label)])
    }

    /// Attach a display name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a preview colour
    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = Some(color);
        self
    }

    /// Stable tile identifier
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Optional display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Edge labels for every rotation, indexed by rotation index
    pub fn rotations(&self) -> &[EdgeLabels] {
        &self.rotations
    }

    /// Number of rotation variants
    pub const fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Optional preview colour
    pub const fn color(&self) -> Option<[u8; 3]> {
        self.color
    }
}

/// One assignable value: a tile in a specific rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileVariant {
    /// Index of the tile in the catalog
    pub tile_index: usize,
    /// Index into the tile's rotation list
    pub rotation: usize,
}

/// Validated, immutable collection of tile types
///
/// Variants are ordered by tile ID, then rotation index, so comparing variant
/// indices compares tile IDs first.
#[derive(Clone, Debug)]
pub struct TileCatalog {
    tiles: Vec<TileType>,
    variants: Vec<TileVariant>,
}

impl TileCatalog {
    /// Validate tile definitions and build the variant list
    ///
    /// # Errors
    ///
    /// Returns [`crate::ForgeError::InvalidCatalog`] if:
    /// - The catalog has no tiles
    /// - Two tiles share an ID
    /// - A tile has no rotations
    /// - An edge label is empty
    /// - The total number of variants exceeds the supported maximum
    pub fn new(tiles: Vec<TileType>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_catalog(&"catalog contains no tiles"));
        }

        let mut ids = HashSet::with_capacity(tiles.len());
        for tile in &tiles {
            if !ids.insert(tile.id) {
                return Err(invalid_catalog(&format!("duplicate tile id {}", tile.id)));
            }
            if tile.rotations.is_empty() {
                return Err(invalid_catalog(&format!(
                    "tile {} has no rotations",
                    tile.id
                )));
            }
            for (rotation, edges) in tile.rotations.iter().enumerate() {
                if edges.iter().any(ConnectorLabel::is_blank) {
                    return Err(invalid_catalog(&format!(
                        "tile {} rotation {rotation} has an empty edge label",
                        tile.id
                    )));
                }
            }
        }

        let mut order: Vec<usize> = (0..tiles.len()).collect();
        order.sort_by_key(|&index| tiles.get(index).map_or(u32::MAX, TileType::id));

        let variants: Vec<TileVariant> = order
            .into_iter()
            .flat_map(|tile_index| {
                let count = tiles.get(tile_index).map_or(0, TileType::rotation_count);
                (0..count).map(move |rotation| TileVariant {
                    tile_index,
                    rotation,
                })
            })
            .collect();

        if variants.len() > MAX_VARIANTS {
            return Err(invalid_catalog(&format!(
                "catalog has {} tile variants (max: {MAX_VARIANTS})",
                variants.len()
            )));
        }

        Ok(Self { tiles, variants })
    }

    /// Tiles in the order they were supplied
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Tile at a catalog index
    pub fn tile(&self, index: usize) -> Option<&TileType> {
        self.tiles.get(index)
    }

    /// Catalog index of the tile with the given ID
    pub fn tile_index(&self, id: u32) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == id)
    }

    /// Number of tile types
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog has no tiles (never true for a validated catalog)
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All variants in solver order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Number of variants, which is the size of every cell domain
    pub const fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Variant at a solver index
    pub fn variant(&self, index: usize) -> Option<TileVariant> {
        self.variants.get(index).copied()
    }

    /// Edge labels of a variant
    pub fn variant_edges(&self, index: usize) -> Option<&EdgeLabels> {
        let variant = self.variants.get(index)?;
        self.tiles
            .get(variant.tile_index)?
            .rotations
            .get(variant.rotation)
    }

    /// Tile ID of a variant
    pub fn variant_tile_id(&self, index: usize) -> Option<u32> {
        let variant = self.variants.get(index)?;
        self.tiles.get(variant.tile_index).map(TileType::id)
    }

    /// Solver index of a tile ID and rotation
    pub fn variant_index(&self, id: u32, rotation: usize) -> Option<usize> {
        let tile_index = self.tile_index(id)?;
        self.variants.iter().position(|variant| {
            variant.tile_index == tile_index && variant.rotation == rotation
        })
    }

    /// Every distinct connector label used by the catalog, sorted
    pub fn labels(&self) -> BTreeSet<&ConnectorLabel> {
        self.tiles
            .iter()
            .flat_map(|tile| tile.rotations.iter())
            .flat_map(EdgeLabels::iter)
            .collect()
    }
}
