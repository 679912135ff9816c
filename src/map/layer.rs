//! A paintable grid of tile indices and the raster rendered from it
//!
//! Every mutation updates the index grid and the raster together, and only
//! after the whole request has been validated, so a rejected placement
//! leaves the layer untouched.

use std::sync::Arc;

use image::{RgbaImage, imageops};
use tracing::{debug, warn};

use crate::io::configuration::MAX_PIXEL_DIMENSION;
use crate::io::error::{Result, invalid_parameter, out_of_bounds, pattern_mismatch};
use crate::spatial::grid::TileGrid;
use crate::spatial::region::Region;
use crate::tiles::pattern::TilePattern;
use crate::tiles::tileset::Tileset;

/// One independently paintable layer of a map
#[derive(Debug, Clone)]
pub struct Layer {
    tileset: Arc<Tileset>,
    grid: TileGrid,
    raster: RgbaImage,
    visible: bool,
}

impl Layer {
    /// Create a visible, unpainted `width` x `height` layer
    ///
    /// # Errors
    ///
    /// Returns an error if the raster would exceed [`MAX_PIXEL_DIMENSION`]
    /// pixels in either direction
    pub fn new(tileset: Arc<Tileset>, width: u32, height: u32) -> Result<Self> {
        let (pixel_width, pixel_height) = pixel_extent(width, height, tileset.tile_size())?;
        Ok(Self {
            tileset,
            grid: TileGrid::new(width, height),
            raster: RgbaImage::new(pixel_width, pixel_height),
            visible: true,
        })
    }

    /// Create a layer fully painted from row-major `indices` and render it
    ///
    /// # Errors
    ///
    /// Returns an error if `indices` does not hold one entry per cell or an
    /// index does not address a tile in the atlas
    pub fn from_indices(
        tileset: Arc<Tileset>,
        width: u32,
        height: u32,
        indices: &[u32],
    ) -> Result<Self> {
        let cell_count = width as usize * height as usize;
        if indices.len() != cell_count {
            return Err(invalid_parameter(
                "indices",
                &indices.len(),
                &format!("a {width}x{height} layer needs {cell_count} indices"),
            ));
        }
        let tile_count = tileset.tile_count();
        if let Some(&bad) = indices.iter().find(|&&index| index >= tile_count) {
            return Err(invalid_parameter(
                "tile index",
                &bad,
                &format!("atlas holds {tile_count} tiles"),
            ));
        }

        let mut layer = Self::new(tileset, width, height)?;
        let whole = Region::new(0, 0, width, height)?;
        layer.grid.write_block(&whole, indices)?;
        layer.remake_image();
        Ok(layer)
    }

    /// Width in tiles
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in tiles
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Tile edge length in pixels
    pub fn tile_size(&self) -> u32 {
        self.tileset.tile_size()
    }

    /// Raster size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    /// Shared tileset backing this layer
    pub const fn tileset(&self) -> &Arc<Tileset> {
        &self.tileset
    }

    /// Tile index grid
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Rendered pixels
    pub const fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Whether the layer is drawn at full opacity when composited
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the layer; hidden layers are still composited, dimmed
    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Painted tile index at (`x`, `y`), or `None` if never painted
    pub fn tile_at(&self, x: u32, y: u32) -> Option<u32> {
        self.grid.tile_at(x, y)
    }

    /// Stamp `pattern` with its top-left tile at grid cell (`x`, `y`)
    ///
    /// Writes the indices the pattern shows into the grid and replaces the
    /// matching raster block with the pattern pixels (no blending).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern uses a different tile size than the layer
    /// - Any part of the pattern would land outside the grid
    /// - The pattern region reaches outside the atlas
    pub fn place(&mut self, x: i32, y: i32, pattern: &TilePattern) -> Result<()> {
        if pattern.tile_size() != self.tile_size() {
            return Err(pattern_mismatch(&format!(
                "pattern uses {}px tiles but the layer uses {}px tiles",
                pattern.tile_size(),
                self.tile_size()
            )));
        }

        let (width, height) = (pattern.region().width(), pattern.region().height());
        let out_of_grid = || {
            out_of_bounds(
                "place pattern",
                (i64::from(x), i64::from(y)),
                (width, height),
                (self.width(), self.height()),
            )
        };
        let (Ok(left), Ok(top)) = (u32::try_from(x), u32::try_from(y)) else {
            return Err(out_of_grid());
        };
        let target = Region::new(left, top, width, height)?;
        if !target.fits_within(self.width(), self.height()) {
            return Err(out_of_grid());
        }

        let indices = pattern.indices(&self.tileset)?;
        self.grid.write_block(&target, &indices)?;

        let tile_size = i64::from(self.tile_size());
        imageops::replace(
            &mut self.raster,
            pattern.raster(),
            i64::from(left) * tile_size,
            i64::from(top) * tile_size,
        );

        debug!("drawing pattern at ({x}, {y})");
        Ok(())
    }

    /// Rebuild the raster from the index grid
    ///
    /// Painted cells are redrawn from the atlas; unpainted cells are cleared
    /// to transparent.
    pub fn remake_image(&mut self) {
        let (pixel_width, pixel_height) = self.raster.dimensions();
        let tile_size = i64::from(self.tile_size());
        let mut raster = RgbaImage::new(pixel_width, pixel_height);

        for (x, y, index) in self.grid.painted_cells() {
            match self.tileset.tile_image(index) {
                Ok(tile) => imageops::replace(
                    &mut raster,
                    &tile,
                    i64::from(x) * tile_size,
                    i64::from(y) * tile_size,
                ),
                Err(error) => warn!("leaving cell ({x}, {y}) blank: {error}"),
            }
        }

        self.raster = raster;
        debug!(painted = self.grid.painted_count(), "rebuilt layer image");
    }
}

/// Pixel size of a `width` x `height` grid of `tile_size` tiles
///
/// # Errors
///
/// Returns an error if either side exceeds [`MAX_PIXEL_DIMENSION`]
pub fn pixel_extent(width: u32, height: u32, tile_size: u32) -> Result<(u32, u32)> {
    let side = |tiles: u32| {
        tiles
            .checked_mul(tile_size)
            .filter(|&pixels| pixels <= MAX_PIXEL_DIMENSION)
    };
    match (side(width), side(height)) {
        (Some(pixel_width), Some(pixel_height)) => Ok((pixel_width, pixel_height)),
        _ => Err(invalid_parameter(
            "grid size",
            &format!("{width}x{height}"),
            &format!(
                "{tile_size}px tiles exceed the {MAX_PIXEL_DIMENSION}px raster limit"
            ),
        )),
    }
}
