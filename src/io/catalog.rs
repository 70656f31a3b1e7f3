//! JSON catalog and layout files
//!
//! A catalog file lists tiles and, optionally, the connector rule:
//!
//! ```json
//! {
//!   "rule": { "kind": "exact" },
//!   "tiles": [
//!     { "id": 0, "name": "grass", "edges": { "north": "g", "east": "g", "south": "g", "west": "g" } },
//!     { "id": 1, "edges": { "north": "w", "east": "c", "south": "g", "west": "c" }, "turns": [0, 90, 180, 270] },
//!     { "id": 2, "rotations": [ { "north": "a", "east": "b", "south": "a", "west": "b" } ] }
//!   ]
//! }
//! ```
//!
//! A tile gives either explicit `rotations` or base `edges` plus clockwise
//! `turns` in degrees (default `[0]`).

use crate::algorithm::compatibility::{
    CompatibilityTable, ExactMatch, OverlapMatch, SocketTable,
};
use crate::algorithm::executor::{SolveMetrics, Solver};
use crate::io::error::{ForgeError, Result, invalid_catalog};
use crate::spatial::layout::SolvedGrid;
use crate::spatial::tiles::{EdgeLabels, TileCatalog, TileType};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Connector rule named in a catalog file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Identical labels match
    #[default]
    Exact,
    /// `|`-separated label sets match when they share a symbol
    Overlap,
    /// Only the listed label pairs match (in either order)
    Sockets {
        /// Compatible label pairs
        pairs: Vec<[String; 2]>,
    },
}

impl RuleSpec {
    /// Build the compatibility table for a catalog under this rule
    ///
    /// # Errors
    ///
    /// Returns an error if the rule fails validation against the catalog
    pub fn build_table(&self, catalog: &TileCatalog) -> Result<CompatibilityTable> {
        match self {
            Self::Exact => CompatibilityTable::build_with(catalog, &ExactMatch),
            Self::Overlap => CompatibilityTable::build_with(catalog, &OverlapMatch),
            Self::Sockets { pairs } => {
                let table = SocketTable::new(pairs.iter().map(|[a, b]| (a.as_str(), b.as_str())));
                CompatibilityTable::build_with(catalog, &table)
            }
        }
    }
}

/// One tile entry of a catalog file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Stable tile ID
    pub id: u32,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit edge labels per rotation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rotations: Vec<EdgeLabels>,
    /// Base edge labels, rotated by `turns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeLabels>,
    /// Clockwise rotations of `edges` in degrees
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turns: Vec<u16>,
    /// Optional preview colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

impl TileDefinition {
    /// Convert to a tile type
    ///
    /// # Errors
    ///
    /// Returns an error if both or neither of `rotations` and `edges` are given,
    /// or a turn is not a multiple of 90 degrees
    pub fn to_tile(&self) -> Result<TileType> {
        let mut tile = match (&self.edges, self.rotations.is_empty()) {
            (Some(_), false) => {
                return Err(invalid_catalog(&format!(
                    "tile {} gives both 'edges' and 'rotations'",
                    self.id
                )));
            }
            (None, true) => {
                return Err(invalid_catalog(&format!(
                    "tile {} needs 'edges' or 'rotations'",
                    self.id
                )));
            }
            (None, false) => TileType::new(self.id, self.rotations.clone()),
            (Some(edges), true) => {
                let degrees = if self.turns.is_empty() {
                    vec![0]
                } else {
                    self.turns.clone()
                };
                let mut quarter_turns = Vec::with_capacity(degrees.len());
                for turn in degrees {
                    if turn % 90 != 0 {
                        return Err(invalid_catalog(&format!(
                            "tile {} turn {turn} is not a multiple of 90 degrees",
                            self.id
                        )));
                    }
                    quarter_turns.push(usize::from(turn / 90));
                }
                TileType::with_turns(self.id, edges, &quarter_turns)
            }
        };
        if let Some(name) = &self.name {
            tile = tile.named(name.clone());
        }
        if let Some(color) = self.color {
            tile = tile.with_color(color);
        }
        Ok(tile)
    }

    /// Describe an existing tile with explicit rotations
    pub fn from_tile(tile: &TileType) -> Self {
        Self {
            id: tile.id(),
            name: tile.name().map(str::to_string),
            rotations: tile.rotations().to_vec(),
            edges: None,
            turns: Vec::new(),
            color: tile.color(),
        }
    }
}

/// Top-level catalog file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Connector rule, exact matching when absent
    #[serde(default)]
    pub rule: RuleSpec,
    /// Tile definitions
    pub tiles: Vec<TileDefinition>,
}

impl CatalogFile {
    /// Parse catalog JSON; `origin` names the source in error messages
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::JsonFormat`] if the JSON does not fit the schema
    pub fn parse(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| ForgeError::JsonFormat {
            document: "catalog",
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ForgeError::FileSystem {
            path: path.to_path_buf(),
            operation: "read catalog",
            source,
        })?;
        Self::parse(&json, path)
    }

    /// Describe a validated catalog under the given rule
    pub fn from_catalog(catalog: &TileCatalog, rule: RuleSpec) -> Self {
        Self {
            rule,
            tiles: catalog.tiles().iter().map(TileDefinition::from_tile).collect(),
        }
    }

    /// Validate tiles into a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if any tile definition or the catalog is malformed
    pub fn to_catalog(&self) -> Result<TileCatalog> {
        let tiles = self
            .tiles
            .iter()
            .map(TileDefinition::to_tile)
            .collect::<Result<Vec<_>>>()?;
        TileCatalog::new(tiles)
    }

    /// Validate the catalog and build a solver with the file's rule
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or rule is malformed
    pub fn to_solver(&self) -> Result<Solver> {
        let catalog = self.to_catalog()?;
        let table = self.rule.build_table(&catalog)?;
        Solver::from_parts(Arc::new(catalog), Arc::new(table))
    }

    /// Write the catalog as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self, "catalog")
    }
}

/// Solved layout with solve metrics, as written to disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    /// The solved grid
    pub grid: SolvedGrid,
    /// Rejected candidates during the solve
    pub backtracks: usize,
    /// Wall-clock solve time in milliseconds
    pub duration_ms: f64,
}

impl LayoutFile {
    /// Pair a solved grid with its metrics
    pub fn new(grid: SolvedGrid, metrics: &SolveMetrics) -> Self {
        Self {
            grid,
            backtracks: metrics.backtracks,
            duration_ms: metrics.duration_ms(),
        }
    }

    /// Write the layout as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self, "layout")
    }

    /// Read a layout file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ForgeError::FileSystem {
            path: path.to_path_buf(),
            operation: "read layout",
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ForgeError::JsonFormat {
            document: "layout",
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_json(path: &Path, value: &impl Serialize, document: &'static str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ForgeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| ForgeError::JsonFormat {
        document,
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| ForgeError::FileSystem {
        path: path.to_path_buf(),
        operation: "write file",
        source,
    })
}
