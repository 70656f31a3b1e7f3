//! Error types and context management for catalog, solver and export operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all crate operations
///
/// Only configuration problems and I/O failures are errors. Search outcomes such as
/// an unsatisfiable catalog or an exhausted budget are reported as
/// [`crate::algorithm::executor::SolveOutcome`] values instead.
#[derive(Debug)]
pub enum ForgeError {
    /// Tile catalog failed validation
    InvalidCatalog {
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// Solver or CLI parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Variant or tile index exceeds the catalog
    InvalidTileIndex {
        /// The invalid index
        index: usize,
        /// Number of valid entries
        max_tiles: usize,
    },

    /// Grid state was driven into a state the search never produces
    ///
    /// Occurs when, for example, a domain removal targets a collapsed cell.
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Linear index of the cell involved
        cell: usize,
        /// Description of the violated invariant
        reason: String,
    },

    /// Catalog or layout JSON did not fit the expected schema
    JsonFormat {
        /// Kind of document, such as `"catalog"` or `"layout"`
        document: &'static str,
        /// Path of the file being read or written
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCatalog { reason } => {
                write!(f, "Invalid tile catalog: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::InvariantViolation {
                operation,
                cell,
                reason,
            } => {
                write!(f, "Invariant violated in {operation} at cell {cell}: {reason}")
            }
            Self::JsonFormat {
                document,
                path,
                source,
            } => {
                write!(f, "Invalid {document} JSON in '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ForgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JsonFormat { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ForgeError {
    /// Whether this error stems from malformed input rather than I/O or a bug
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCatalog { .. } | Self::InvalidParameter { .. } | Self::JsonFormat { .. }
        )
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, ForgeError>;

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ForgeError {
    ForgeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid catalog error
pub fn invalid_catalog(reason: &impl ToString) -> ForgeError {
    ForgeError::InvalidCatalog {
        reason: reason.to_string(),
    }
}
