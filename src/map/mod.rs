//! Layers, maps and compositing

/// Merging layer rasters into one displayable image
pub mod compositor;
/// A single paintable layer
pub mod layer;
/// A map owning its layers and shared tileset
pub mod tilemap;

pub use compositor::compose;
pub use layer::Layer;
pub use tilemap::TileMap;
