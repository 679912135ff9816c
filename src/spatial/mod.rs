//! Grid coordinates and tile index storage
//!
//! This module contains spatial-related functionality including:
//! - Regions and cells measured in tile units
//! - The per-layer tile index grid

/// Tile index grid with painted-cell tracking
pub mod grid;
/// Regions in tile units and signed grid cells
pub mod region;

pub use grid::TileGrid;
pub use region::{Cell, Region};
