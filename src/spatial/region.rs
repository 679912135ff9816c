//! Rectangles measured in tile units and signed grid cells

use crate::io::error::{Result, invalid_parameter};

/// A grid cell addressed in tile units
///
/// Coordinates are signed: a drag that leaves the map widget keeps reporting
/// cells left of or above the map, and the wrap arithmetic must accept them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Cell {
    /// Create a cell from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in tile units, at least one tile in each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Region {
    /// Create a region, rejecting empty rectangles
    ///
    /// # Errors
    ///
    /// Returns an error if `width` or `height` is zero
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "region",
                &format!("{width}x{height}"),
                &"width and height must be at least one tile",
            ));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// A single-tile region
    pub const fn single(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
        }
    }

    /// Smallest region containing both cells (the union of their 1x1 regions)
    pub fn spanning(a: (u32, u32), b: (u32, u32)) -> Self {
        let (min_x, max_x) = (a.0.min(b.0), a.0.max(b.0));
        let (min_y, max_y) = (a.1.min(b.1), a.1.max(b.1));
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    /// Left edge in tiles
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Top edge in tiles
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Width in tiles
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of tiles covered
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the region lies inside a `columns` x `rows` grid
    pub const fn fits_within(&self, columns: u32, rows: u32) -> bool {
        self.x as u64 + self.width as u64 <= columns as u64
            && self.y as u64 + self.height as u64 <= rows as u64
    }

    /// Clamp the region into a `columns` x `rows` grid
    ///
    /// Returns `None` when the grid itself is empty.
    pub fn bounded_to(self, columns: u32, rows: u32) -> Option<Self> {
        if columns == 0 || rows == 0 {
            return None;
        }
        let x = self.x.min(columns - 1);
        let y = self.y.min(rows - 1);
        Some(Self {
            x,
            y,
            width: self.width.min(columns - x),
            height: self.height.min(rows - y),
        })
    }

    /// Pixel rectangle `(x, y, width, height)` covered at the given tile size
    pub const fn pixel_rect(&self, tile_size: u32) -> (u32, u32, u32, u32) {
        (
            self.x * tile_size,
            self.y * tile_size,
            self.width * tile_size,
            self.height * tile_size,
        )
    }

    /// Offsets `(px, py)` of every tile inside the region, row-major
    pub fn offsets(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |py| (0..width).map(move |px| (px, py)))
    }
}
