/// Benchmark runs over repeated solves
pub mod benchmark;
/// JSON catalog and layout files
pub mod catalog;
/// Command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG previews of solved layouts
pub mod image;
/// Built-in and generated catalogs
pub mod presets;
/// Terminal progress display
pub mod progress;
