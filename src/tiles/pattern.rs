//! Stamp patterns and seamless wrapping while dragging
//!
//! A pattern is an immutable region of the tileset plus the pixels captured
//! for it. While a stroke is dragged across the map, the pattern is re-phased
//! for every cell it is stamped at, so the repetition stays anchored to the
//! cell where the stroke began instead of restarting at each step.

use image::{Rgba, RgbaImage, imageops};

use crate::io::configuration::PREVIEW_FILL_COLOR;
use crate::io::error::{Result, pattern_mismatch};
use crate::spatial::region::{Cell, Region};
use crate::tiles::tileset::Tileset;

/// Rectangular group of tiles captured as a stamp
///
/// `phase` is the wrap offset in tiles applied by [`tile_pattern`]: the tile
/// drawn at pattern offset `p` is the region tile at `(p - phase) mod size`.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePattern {
    region: Region,
    raster: RgbaImage,
    tile_size: u32,
    phase: (u32, u32),
}

impl TilePattern {
    /// Wrap a raster captured for `region`
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or the raster is not exactly
    /// `region.width * tile_size` by `region.height * tile_size` pixels
    pub fn new(region: Region, raster: RgbaImage, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(pattern_mismatch(&"tile size must be positive"));
        }
        let (_, _, expected_width, expected_height) = region.pixel_rect(tile_size);
        if raster.dimensions() != (expected_width, expected_height) {
            return Err(pattern_mismatch(&format!(
                "raster is {}x{} but a {}x{} region of {tile_size}px tiles needs {expected_width}x{expected_height}",
                raster.width(),
                raster.height(),
                region.width(),
                region.height(),
            )));
        }
        Ok(Self {
            region,
            raster,
            tile_size,
            phase: (0, 0),
        })
    }

    /// Tileset region the pattern was captured from
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Captured pixels
    pub const fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Wrap offset in tiles, (0, 0) for a freshly captured pattern
    pub const fn phase(&self) -> (u32, u32) {
        self.phase
    }

    /// Region tile shown at pattern offset (`px`, `py`)
    pub const fn source_offset(&self, px: u32, py: u32) -> (u32, u32) {
        let (width, height) = (self.region.width(), self.region.height());
        (
            (px % width + width - self.phase.0) % width,
            (py % height + height - self.phase.1) % height,
        )
    }

    /// Atlas indices actually shown by this pattern, row-major
    ///
    /// Equal to [`Tileset::indices_for`] for an unshifted pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the region reaches outside the tileset's atlas
    pub fn indices(&self, tileset: &Tileset) -> Result<Vec<u32>> {
        let base = tileset.indices_for(&self.region)?;
        if self.phase == (0, 0) {
            return Ok(base);
        }

        let width = self.region.width() as usize;
        Ok(self
            .region
            .offsets()
            .filter_map(|(px, py)| {
                let (sx, sy) = self.source_offset(px, py);
                base.get(sx as usize + width * sy as usize).copied()
            })
            .collect())
    }
}

/// Re-phase `pattern` for a stamp at `target` in a stroke that began at `origin`
///
/// The canvas is first filled with [`PREVIEW_FILL_COLOR`], then the pattern
/// raster is drawn at the 3x3 combinations of `offset - size`, `offset`,
/// `offset + size` on each axis, replacing destination pixels. With the
/// offset reduced by a non-negative modulo, these draws always cover the
/// whole canvas, so the fill never survives.
pub fn tile_pattern(origin: Cell, target: Cell, pattern: &TilePattern) -> TilePattern {
    let region = pattern.region;
    let (columns, rows) = (i64::from(region.width()), i64::from(region.height()));
    let offset_x = (i64::from(origin.x) - i64::from(target.x)).rem_euclid(columns);
    let offset_y = (i64::from(origin.y) - i64::from(target.y)).rem_euclid(rows);

    let tile_size = i64::from(pattern.tile_size);
    let (pixel_width, pixel_height) = pattern.raster.dimensions();
    let (span_x, span_y) = (i64::from(pixel_width), i64::from(pixel_height));

    let mut canvas = RgbaImage::from_pixel(pixel_width, pixel_height, Rgba(PREVIEW_FILL_COLOR));
    for shift_x in [-span_x, 0, span_x] {
        for shift_y in [-span_y, 0, span_y] {
            imageops::replace(
                &mut canvas,
                &pattern.raster,
                offset_x * tile_size + shift_x,
                offset_y * tile_size + shift_y,
            );
        }
    }

    TilePattern {
        region,
        raster: canvas,
        tile_size: pattern.tile_size,
        phase: (
            ((i64::from(pattern.phase.0) + offset_x) % columns) as u32,
            ((i64::from(pattern.phase.1) + offset_y) % rows) as u32,
        ),
    }
}
