//! Tile compositing and pattern placement for grid-based map editors
//!
//! A rectangular region is picked from a tileset atlas and stamped onto one
//! layer of a map. While a stroke is dragged, the stamp is re-phased so the
//! pattern repeats seamlessly from the cell where the stroke began. Each layer
//! keeps its tile index grid and its rendered raster in sync, and the map
//! composites all layers into one image with hidden layers dimmed.

#![forbid(unsafe_code)]

/// Pointer input dispatch and scripted strokes
pub mod editor;
/// Errors, configuration, image files and the command-line driver
pub mod io;
/// Layers, maps and compositing
pub mod map;
/// Regions, cells and tile index grids
pub mod spatial;
/// Tileset atlas and stamp patterns
pub mod tiles;

pub use io::error::{EditorError, Result};
pub use map::{Layer, TileMap};
pub use spatial::{Cell, Region};
pub use tiles::{TilePattern, Tileset, tile_pattern};
