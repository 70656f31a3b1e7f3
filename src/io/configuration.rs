//! Solver constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Maximum number of tile variants (tile and rotation pairs) in one catalog
pub const MAX_VARIANTS: usize = 4_096;

/// Number of quarter turns a tile can be rotated through
pub const ROTATION_COUNT: usize = 4;

/// Separator between symbols of a connector label set
pub const LABEL_SET_SEPARATOR: char = '|';

// Default values for configurable parameters
/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 100;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 100;

/// Default seed for generated benchmark catalogs
pub const DEFAULT_SEED: u64 = 42;

/// Default number of solves per benchmark run
pub const DEFAULT_BENCHMARK_RUNS: usize = 10;
/// Default number of tile types in a generated benchmark catalog
pub const DEFAULT_BENCHMARK_TILES: usize = 8;
/// Default number of distinct connector labels in a generated benchmark catalog
pub const DEFAULT_BENCHMARK_LABELS: usize = 3;

// Output settings
/// Suffix added to solved grid filenames
pub const OUTPUT_SUFFIX: &str = "_layout";
/// Side length in pixels of one cell in preview images
pub const PREVIEW_CELL_PIXELS: u32 = 4;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
