//! PNG previews of solved layouts

use crate::io::error::{ForgeError, Result};
use crate::spatial::layout::SolvedGrid;
use crate::spatial::tiles::TileCatalog;
use image::{ImageBuffer, Rgb};
use std::collections::HashMap;
use std::path::Path;

// Spreads generated hues so neighbouring tile IDs get distinct colours
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Preview colour for every tile ID in the catalog
///
/// Tiles without an explicit colour get a generated one derived from their
/// catalog position, so the palette is stable across runs.
pub fn tile_palette(catalog: &TileCatalog) -> HashMap<u32, [u8; 3]> {
    catalog
        .tiles()
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let color = tile.color().unwrap_or_else(|| generated_color(index));
            (tile.id(), color)
        })
        .collect()
}

fn generated_color(index: usize) -> [u8; 3] {
    let hue = (index as f64 * GOLDEN_RATIO_CONJUGATE).fract();
    hsv_to_rgb(hue, 0.55, 0.85)
}

// Hue in [0, 1)
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let sector = hue * 6.0;
    let chroma = value * saturation;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let channel = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b)]
}

// Pixel extent of `cells` cells, or an error when it does not fit in a u32
fn scaled_extent(cells: usize, cell_pixels: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(cell_pixels))
        .ok_or_else(|| {
            crate::io::error::invalid_parameter(
                "cell_pixels",
                &cell_pixels,
                &format!("{cells} cells at this size exceed the maximum image extent"),
            )
        })
}

/// Render a solved layout as a PNG, one `cell_pixels` square per cell
///
/// A darker pixel in the top-left corner of each cell marks tiles with a
/// non-zero rotation so orientation changes stay visible.
///
/// # Errors
///
/// Returns an error if:
/// - `cell_pixels` is zero, or the scaled image would not fit in `u32` pixels
/// - A cell names a tile that is not in the catalog
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(
    layout: &SolvedGrid,
    catalog: &TileCatalog,
    cell_pixels: u32,
    output_path: &Path,
) -> Result<()> {
    if cell_pixels == 0 {
        return Err(crate::io::error::invalid_parameter(
            "cell_pixels",
            &cell_pixels,
            &"must be positive",
        ));
    }

    let width = scaled_extent(layout.width(), cell_pixels)?;
    let height = scaled_extent(layout.height(), cell_pixels)?;
    let palette = tile_palette(catalog);
    let mut img = ImageBuffer::new(width, height);

    for y in 0..layout.height() {
        for x in 0..layout.width() {
            let Some(assignment) = layout.get(x, y) else {
                continue;
            };
            let color = palette
                .get(&assignment.tile_id)
                .copied()
                .ok_or(ForgeError::InvalidTileIndex {
                    index: assignment.tile_id as usize,
                    max_tiles: catalog.len(),
                })?;
            let marker = color.map(|channel| channel / 2);

            for py in 0..cell_pixels {
                for px in 0..cell_pixels {
                    let is_marker = assignment.rotation > 0 && px == 0 && py == 0;
                    let rgb = if is_marker { marker } else { color };
                    // Both products are below the checked image extent
                    img.put_pixel(
                        x as u32 * cell_pixels + px,
                        y as u32 * cell_pixels + py,
                        Rgb(rgb),
                    );
                }
            }
        }
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ForgeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| ForgeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
