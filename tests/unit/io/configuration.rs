//! Tests for solver constants and configuration defaults

#[cfg(test)]
mod tests {
    use tileforge::io::configuration::{
        DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, LABEL_SET_SEPARATOR, MAX_GRID_DIMENSION,
        MAX_VARIANTS, OUTPUT_SUFFIX, PREVIEW_CELL_PIXELS, PROGRESS_BAR_WIDTH, ROTATION_COUNT,
    };

    // Tests maximum grid dimension value
    // Verified by reducing dimension limit
    #[test]
    fn test_max_grid_dimension() {
        assert_eq!(MAX_GRID_DIMENSION, 10_000);
    }

    // Tests default grid fits within the limit
    // Verified by raising the default above the limit
    #[test]
    fn test_default_dimensions_within_limit() {
        assert!(DEFAULT_WIDTH > 0 && DEFAULT_WIDTH <= MAX_GRID_DIMENSION);
        assert!(DEFAULT_HEIGHT > 0 && DEFAULT_HEIGHT <= MAX_GRID_DIMENSION);
    }

    // Tests the variant limit covers a full set of rotations
    #[test]
    fn test_variant_limit() {
        assert_eq!(ROTATION_COUNT, 4);
        assert_eq!(MAX_VARIANTS % ROTATION_COUNT, 0);
    }

    // Tests label set separator
    // Verified by changing separator to a comma
    #[test]
    fn test_label_set_separator() {
        assert_eq!(LABEL_SET_SEPARATOR, '|');
    }

    // Tests default seed value
    // Verified by changing seed value
    #[test]
    fn test_default_seed() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests output settings
    // Verified by changing suffix and sizes
    #[test]
    fn test_output_settings() {
        assert_eq!(OUTPUT_SUFFIX, "_layout");
        assert!(PREVIEW_CELL_PIXELS > 0);
        assert_eq!(PROGRESS_BAR_WIDTH, 40);
    }
}
