//! Built-in catalogs for quick generation and benchmarking

use crate::io::configuration::ROTATION_COUNT;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::{EdgeLabels, TileCatalog, TileType};
use rand::{Rng, SeedableRng, rngs::StdRng};

const ALL_TURNS: [usize; ROTATION_COUNT] = [0, 1, 2, 3];

/// Terrain catalog with grass, sand and water areas joined by transition tiles
///
/// Shore tiles put water on one side and sand on the other; meadow tiles do the
/// same for sand and grass. Both come in all four rotations. Rock only borders
/// rock.
///
/// # Errors
///
/// Never fails for the built-in definitions; the `Result` comes from catalog
/// validation
pub fn terrain_catalog() -> Result<TileCatalog> {
    TileCatalog::new(vec![
        TileType::symmetric(0, "grass")
            .named("grass")
            .with_color([86, 160, 62]),
        TileType::symmetric(1, "sand")
            .named("sand")
            .with_color([222, 200, 140]),
        TileType::symmetric(2, "water")
            .named("water")
            .with_color([48, 98, 184]),
        TileType::with_turns(
            3,
            &EdgeLabels::new("water", "shore", "sand", "shore"),
            &ALL_TURNS,
        )
        .named("shore")
        .with_color([150, 170, 170]),
        TileType::with_turns(
            4,
            &EdgeLabels::new("sand", "meadow", "grass", "meadow"),
            &ALL_TURNS,
        )
        .named("meadow")
        .with_color([160, 180, 96]),
        TileType::symmetric(5, "rock")
            .named("rock")
            .with_color([120, 112, 104]),
    ])
}

/// Names of the built-in presets accepted by [`preset_catalog`]
pub const PRESET_NAMES: [&str; 2] = ["terrain", "single"];

/// Look up a built-in catalog by name
///
/// `single` is one self-compatible tile, which always solves without
/// backtracking.
///
/// # Errors
///
/// Returns an error for an unknown preset name
pub fn preset_catalog(name: &str) -> Result<TileCatalog> {
    match name {
        "terrain" => terrain_catalog(),
        "single" => TileCatalog::new(vec![
            TileType::symmetric(0, "plain")
                .named("plain")
                .with_color([120, 170, 90]),
        ]),
        _ => Err(invalid_parameter(
            "preset",
            &name,
            &format!("expected one of {}", PRESET_NAMES.join(", ")),
        )),
    }
}

/// Generate a reproducible catalog with random edge labels
///
/// Tile 0 carries `c0` on every edge so a uniform layout always exists; the
/// other tiles draw each edge from `c0..c{label_count}` and come in all four
/// rotations.
///
/// # Errors
///
/// Returns an error if `tile_count` or `label_count` is zero
pub fn random_catalog(seed: u64, tile_count: usize, label_count: usize) -> Result<TileCatalog> {
    if tile_count == 0 {
        return Err(invalid_parameter("tiles", &tile_count, &"must be positive"));
    }
    if label_count == 0 {
        return Err(invalid_parameter("labels", &label_count, &"must be positive"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut label = || format!("c{}", rng.random_range(0..label_count));

    let mut tiles = Vec::with_capacity(tile_count);
    tiles.push(TileType::symmetric(0, "c0"));
    for id in 1..tile_count {
        let edges = EdgeLabels::new(label(), label(), label(), label());
        tiles.push(TileType::with_turns(id as u32, &edges, &ALL_TURNS));
    }

    TileCatalog::new(tiles)
}
