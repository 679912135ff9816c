//! A named map: an ordered stack of layers sharing one tileset

use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_LAYER_COUNT, DEFAULT_MAP_NAME,
};
use crate::io::error::{EditorError, Result, invalid_parameter};
use crate::map::compositor::compose;
use crate::map::layer::Layer;
use crate::tiles::pattern::TilePattern;
use crate::tiles::tileset::Tileset;

/// Layers in paint order (index 0 is the bottom) over a shared tileset
#[derive(Debug, Clone)]
pub struct TileMap {
    name: String,
    width: u32,
    height: u32,
    tileset: Arc<Tileset>,
    layers: Vec<Layer>,
}

impl TileMap {
    /// Create a map of `layer_count` empty `width` x `height` layers
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or too large to rasterize, or
    /// `layer_count` is zero
    pub fn new(
        name: impl Into<String>,
        tileset: Arc<Tileset>,
        (width, height): (u32, u32),
        layer_count: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "grid size",
                &format!("{width}x{height}"),
                &"map must be at least one tile in each direction",
            ));
        }
        if layer_count == 0 {
            return Err(invalid_parameter(
                "layer count",
                &layer_count,
                &"map needs at least one layer",
            ));
        }

        let layers = (0..layer_count)
            .map(|_| Layer::new(Arc::clone(&tileset), width, height))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            width,
            height,
            tileset,
            layers,
        })
    }

    /// Create a map with the default name, size and layer count
    ///
    /// # Errors
    ///
    /// Propagates errors from [`TileMap::new`]
    pub fn with_defaults(tileset: Arc<Tileset>) -> Result<Self> {
        Self::new(
            DEFAULT_MAP_NAME,
            tileset,
            (DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
            DEFAULT_LAYER_COUNT,
        )
    }

    /// Map name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile edge length in pixels
    pub fn tile_size(&self) -> u32 {
        self.tileset.tile_size()
    }

    /// Grid size in tiles
    pub const fn grid_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Full map size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let tile_size = self.tile_size();
        (
            self.width.saturating_mul(tile_size),
            self.height.saturating_mul(tile_size),
        )
    }

    /// Shared tileset
    pub const fn tileset(&self) -> &Arc<Tileset> {
        &self.tileset
    }

    /// Layers in paint order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Borrow a layer
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a layer of this map
    pub fn layer(&self, index: usize) -> Result<&Layer> {
        let layer_count = self.layers.len();
        self.layers
            .get(index)
            .ok_or(EditorError::InvalidLayer { index, layer_count })
    }

    /// Mutably borrow a layer
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a layer of this map
    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer> {
        let layer_count = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(EditorError::InvalidLayer { index, layer_count })
    }

    /// Stamp `pattern` on layer `layer` at grid cell (`x`, `y`)
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist or the placement is
    /// rejected by [`Layer::place`]
    pub fn place(&mut self, layer: usize, x: i32, y: i32, pattern: &TilePattern) -> Result<()> {
        self.layer_mut(layer)?.place(x, y, pattern)
    }

    /// Show or hide one layer
    ///
    /// # Errors
    ///
    /// Returns an error if `layer` is not a layer of this map
    pub fn set_visible(&mut self, layer: usize, visible: bool) -> Result<()> {
        self.layer_mut(layer)?.set_visible(visible);
        Ok(())
    }

    /// Make `index` the only visible layer and rebuild every layer image
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a layer of this map
    pub fn select_layer(&mut self, index: usize) -> Result<()> {
        self.layer(index)?;
        for (position, layer) in self.layers.iter_mut().enumerate() {
            layer.set_visible(position == index);
        }
        debug!("selected layer {index}");
        self.remake_image();
        Ok(())
    }

    /// Rebuild every layer's raster from its index grid
    pub fn remake_image(&mut self) {
        for layer in &mut self.layers {
            layer.remake_image();
        }
    }

    /// Rebuild one layer's raster from its index grid
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a layer of this map
    pub fn remake_layer(&mut self, index: usize) -> Result<()> {
        self.layer_mut(index)?.remake_image();
        Ok(())
    }

    /// Composite all layers into one image
    pub fn compose(&self) -> RgbaImage {
        compose(self)
    }
}
