//! Error types for tileset loading, pattern placement and compositing

use std::fmt;
use std::path::PathBuf;

/// Main error type for all editing operations
///
/// Every variant is recoverable: the caller is expected to drop the
/// rejected action, and the map is left exactly as it was before the call.
#[derive(Debug)]
pub enum EditorError {
    /// Tile size is zero or does not evenly divide the atlas width
    InvalidTileSize {
        /// Requested tile size in pixels
        tile_size: u32,
        /// Width of the atlas image in pixels
        atlas_width: u32,
        /// Why the tile size was rejected
        reason: String,
    },

    /// A placement or region reaches outside the grid or atlas
    OutOfBounds {
        /// Operation that was rejected
        operation: &'static str,
        /// Requested left edge (cells)
        x: i64,
        /// Requested top edge (cells)
        y: i64,
        /// Requested width (cells)
        width: u32,
        /// Requested height (cells)
        height: u32,
        /// Size of the area being addressed (columns, rows)
        bounds: (u32, u32),
    },

    /// Painting was requested while no tileset region is selected
    EmptySelection {
        /// Operation that required a selection
        operation: &'static str,
    },

    /// Layer index exceeds the layers owned by the map
    InvalidLayer {
        /// The invalid layer index
        index: usize,
        /// Number of layers in the map
        layer_count: usize,
    },

    /// A pattern raster disagrees with its region or with the target layer
    PatternMismatch {
        /// Description of the mismatch
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

    /// Failed to load a tileset image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a composited image to disk
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

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize {
                tile_size,
                atlas_width,
                reason,
            } => {
                write!(
                    f,
                    "Invalid tile size {tile_size} for atlas {atlas_width}px wide: {reason}"
                )
            }
            Self::OutOfBounds {
                operation,
                x,
                y,
                width,
                height,
                bounds,
            } => {
                write!(
                    f,
                    "{operation}: {width}x{height} at ({x}, {y}) is outside the {}x{} bounds",
                    bounds.0, bounds.1
                )
            }
            Self::EmptySelection { operation } => {
                write!(f, "{operation}: no tileset region is selected")
            }
            Self::InvalidLayer { index, layer_count } => {
                write!(
                    f,
                    "Layer index {index} is out of bounds (layer count: {layer_count})"
                )
            }
            Self::PatternMismatch { reason } => {
                write!(f, "Pattern mismatch: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for editor results
pub type Result<T> = std::result::Result<T, EditorError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EditorError {
    EditorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out-of-bounds error for a `width`x`height` block at (`x`, `y`)
pub fn out_of_bounds(
    operation: &'static str,
    (x, y): (i64, i64),
    (width, height): (u32, u32),
    bounds: (u32, u32),
) -> EditorError {
    EditorError::OutOfBounds {
        operation,
        x,
        y,
        width,
        height,
        bounds,
    }
}

/// Create a pattern mismatch error
pub fn pattern_mismatch(reason: &impl ToString) -> EditorError {
    EditorError::PatternMismatch {
        reason: reason.to_string(),
    }
}
