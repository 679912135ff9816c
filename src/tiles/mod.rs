//! Tile atlas access and stamp patterns

/// Stamp patterns and the wrap-while-dragging tiler
pub mod pattern;
/// Tile atlas loaded from an image
pub mod tileset;

pub use pattern::{TilePattern, tile_pattern};
pub use tileset::Tileset;
