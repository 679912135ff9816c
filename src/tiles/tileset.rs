//! Tile atlas with a one-time transparency pass
//!
//! The atlas color found at pixel (0, 0) is treated as background and made
//! fully transparent everywhere when the tileset is loaded. After that the
//! atlas is never mutated again and can be shared read-only between layers.

use image::{Rgba, RgbaImage, imageops};
use tracing::info;

use crate::io::configuration::TRANSPARENT;
use crate::io::error::{EditorError, Result, invalid_parameter, out_of_bounds};
use crate::spatial::region::Region;
use crate::tiles::pattern::TilePattern;

/// Immutable tile atlas addressed by flat tile indices
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    atlas: RgbaImage,
    tile_size: u32,
    tiles_per_row: u32,
    tile_rows: u32,
    transparency_key: Rgba<u8>,
}

impl Tileset {
    /// Build a tileset from an atlas image
    ///
    /// Every pixel matching the color at (0, 0) exactly is rewritten to
    /// transparent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` is zero
    /// - `tile_size` does not evenly divide the atlas width
    /// - The atlas is shorter than one tile
    pub fn load(image: RgbaImage, tile_size: u32) -> Result<Self> {
        let (atlas_width, atlas_height) = image.dimensions();
        let reject = |reason: &str| EditorError::InvalidTileSize {
            tile_size,
            atlas_width,
            reason: reason.to_string(),
        };

        if tile_size == 0 {
            return Err(reject("tile size must be positive"));
        }
        if atlas_width == 0 || atlas_width % tile_size != 0 {
            return Err(reject("tile size must evenly divide the atlas width"));
        }
        if atlas_height < tile_size {
            return Err(reject("atlas is shorter than one tile"));
        }

        let mut atlas = image;
        let transparency_key = *atlas.get_pixel(0, 0);
        for pixel in atlas.pixels_mut() {
            if *pixel == transparency_key {
                *pixel = Rgba(TRANSPARENT);
            }
        }

        let tiles_per_row = atlas_width / tile_size;
        let tile_rows = atlas_height / tile_size;
        info!(
            tile_size,
            tiles_per_row, tile_rows, "loaded tileset {atlas_width}x{atlas_height}"
        );

        Ok(Self {
            atlas,
            tile_size,
            tiles_per_row,
            tile_rows,
            transparency_key,
        })
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tile columns in the atlas
    pub const fn tiles_per_row(&self) -> u32 {
        self.tiles_per_row
    }

    /// Number of complete tile rows in the atlas
    pub const fn tile_rows(&self) -> u32 {
        self.tile_rows
    }

    /// Total number of addressable tiles
    pub const fn tile_count(&self) -> u32 {
        self.tiles_per_row * self.tile_rows
    }

    /// Background color that was keyed out at load time
    pub const fn transparency_key(&self) -> Rgba<u8> {
        self.transparency_key
    }

    /// The atlas after the transparency pass
    pub const fn atlas(&self) -> &RgbaImage {
        &self.atlas
    }

    /// Atlas cell (`column`, `row`) backing a flat tile index
    pub const fn tile_cell(&self, index: u32) -> (u32, u32) {
        (index % self.tiles_per_row, index / self.tiles_per_row)
    }

    /// Flat tile index of every cell in `region`, row-major
    ///
    /// The index of selection cell (`px`, `py`) is
    /// `region.x + px + tiles_per_row * (region.y + py)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the region reaches outside the atlas
    pub fn indices_for(&self, region: &Region) -> Result<Vec<u32>> {
        self.check_region(region, "tile indices")?;
        Ok(region
            .offsets()
            .map(|(px, py)| region.x() + px + self.tiles_per_row * (region.y() + py))
            .collect())
    }

    /// Exact pixel crop of the atlas covering `region`
    ///
    /// # Errors
    ///
    /// Returns an error if the region reaches outside the atlas
    pub fn sub_image(&self, region: &Region) -> Result<RgbaImage> {
        self.check_region(region, "tileset crop")?;
        let (x, y, width, height) = region.pixel_rect(self.tile_size);
        Ok(imageops::crop_imm(&self.atlas, x, y, width, height).to_image())
    }

    /// Capture `region` as a stamp pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the region reaches outside the atlas
    pub fn pattern(&self, region: &Region) -> Result<TilePattern> {
        TilePattern::new(*region, self.sub_image(region)?, self.tile_size)
    }

    /// Pixels of a single tile
    ///
    /// # Errors
    ///
    /// Returns an error if `index` does not address a tile in the atlas
    pub fn tile_image(&self, index: u32) -> Result<RgbaImage> {
        if index >= self.tile_count() {
            return Err(invalid_parameter(
                "tile index",
                &index,
                &format!("atlas holds {} tiles", self.tile_count()),
            ));
        }
        let (column, row) = self.tile_cell(index);
        let tile = imageops::crop_imm(
            &self.atlas,
            column * self.tile_size,
            row * self.tile_size,
            self.tile_size,
            self.tile_size,
        );
        Ok(tile.to_image())
    }

    fn check_region(&self, region: &Region, operation: &'static str) -> Result<()> {
        if region.fits_within(self.tiles_per_row, self.tile_rows) {
            Ok(())
        } else {
            Err(out_of_bounds(
                operation,
                (i64::from(region.x()), i64::from(region.y())),
                (region.width(), region.height()),
                (self.tiles_per_row, self.tile_rows),
            ))
        }
    }
}
