//! Error types and context management for reshuffle operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all reshuffle operations
#[derive(Debug)]
pub enum ReshuffleError {
    /// Grid dimensions are not exact multiples of the tile size
    ///
    /// Also raised for a tile size of zero, which cannot partition any grid.
    DimensionMismatch {
        /// Grid height in samples
        height: usize,
        /// Grid width in samples
        width: usize,
        /// Requested tile size
        tile_size: usize,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet transform requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a frame or grid to disk
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

    /// Array computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for ReshuffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                height,
                width,
                tile_size: 0,
            } => {
                write!(
                    f,
                    "Dimension mismatch: tile size must be at least 1 (grid {height}x{width}, K=0)"
                )
            }
            Self::DimensionMismatch {
                height,
                width,
                tile_size,
            } => {
                write!(
                    f,
                    "Dimension mismatch: grid {height}x{width} is not divisible by tile size K={tile_size}"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
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
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for ReshuffleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reshuffle results
pub type Result<T> = std::result::Result<T, ReshuffleError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation was working on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches errors converted without a known path or operation
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attach the path and operation of a filesystem call
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<ReshuffleError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors produced by the blanket From impls carry placeholders
            match &mut error {
                ReshuffleError::ImageLoad { path, .. } | ReshuffleError::ImageExport { path, .. } => {
                    if let Some(context_path) = &context.path {
                        path.clone_from(context_path);
                    }
                }
                ReshuffleError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = &context.path {
                        path.clone_from(context_path);
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            operation: Some(operation),
        })
    }
}

impl From<image::ImageError> for ReshuffleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ReshuffleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<ndarray::ShapeError> for ReshuffleError {
    fn from(err: ndarray::ShapeError) -> Self {
        computation_error("array reshape", &err)
    }
}

/// Create a dimension mismatch error for a grid and tile size
pub const fn dimension_mismatch(height: usize, width: usize, tile_size: usize) -> ReshuffleError {
    ReshuffleError::DimensionMismatch {
        height,
        width,
        tile_size,
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ReshuffleError {
    ReshuffleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> ReshuffleError {
    ReshuffleError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> ReshuffleError {
    ReshuffleError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
