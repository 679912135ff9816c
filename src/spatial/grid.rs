//! Tile index grid with a painted-cell mask
//!
//! Index 0 is a real atlas reference (the tile at atlas cell (0, 0)), so a
//! separate bit mask records which cells have ever been painted.

use bitvec::prelude::*;
use ndarray::Array2;

use crate::io::error::{Result, out_of_bounds};
use crate::spatial::region::Region;

/// Flat grid of atlas tile indices, stored row-major as (`row`, `col`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    indices: Array2<u32>,
    painted: BitVec,
}

impl TileGrid {
    /// Create a `width` x `height` grid with every cell unpainted
    pub fn new(width: u32, height: u32) -> Self {
        let (rows, cols) = (height as usize, width as usize);
        Self {
            indices: Array2::zeros((rows, cols)),
            painted: bitvec![0; rows * cols],
        }
    }

    /// Width in cells
    pub fn width(&self) -> u32 {
        self.indices.ncols() as u32
    }

    /// Height in cells
    pub fn height(&self) -> u32 {
        self.indices.nrows() as u32
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Stored index at (`x`, `y`), painted or not
    pub fn index_at(&self, x: u32, y: u32) -> Option<u32> {
        self.indices.get((y as usize, x as usize)).copied()
    }

    /// Painted tile index at (`x`, `y`), or `None` if never painted
    pub fn tile_at(&self, x: u32, y: u32) -> Option<u32> {
        if self.is_painted(x, y) {
            self.index_at(x, y)
        } else {
            None
        }
    }

    /// Check whether (`x`, `y`) has been painted
    pub fn is_painted(&self, x: u32, y: u32) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        let flat = x as usize + self.width() as usize * y as usize;
        self.painted.get(flat).is_some_and(|bit| *bit)
    }

    /// Write `values` row-major into the block described by `region`
    ///
    /// # Errors
    ///
    /// Returns an error if the block leaves the grid or `values` does not
    /// hold exactly one index per cell. Nothing is written on error.
    pub fn write_block(&mut self, region: &Region, values: &[u32]) -> Result<()> {
        if !region.fits_within(self.width(), self.height()) || values.len() != region.cell_count()
        {
            return Err(out_of_bounds(
                "write tile block",
                (i64::from(region.x()), i64::from(region.y())),
                (region.width(), region.height()),
                (self.width(), self.height()),
            ));
        }

        let width = self.width() as usize;
        for ((px, py), &value) in region.offsets().zip(values) {
            let (x, y) = ((region.x() + px) as usize, (region.y() + py) as usize);
            if let Some(cell) = self.indices.get_mut((y, x)) {
                *cell = value;
            }
            self.painted.set(x + width * y, true);
        }
        Ok(())
    }

    /// Indices inside `region`, row-major
    ///
    /// # Errors
    ///
    /// Returns an error if the block leaves the grid
    pub fn read_block(&self, region: &Region) -> Result<Vec<u32>> {
        if !region.fits_within(self.width(), self.height()) {
            return Err(out_of_bounds(
                "read tile block",
                (i64::from(region.x()), i64::from(region.y())),
                (region.width(), region.height()),
                (self.width(), self.height()),
            ));
        }
        Ok(region
            .offsets()
            .filter_map(|(px, py)| self.index_at(region.x() + px, region.y() + py))
            .collect())
    }

    /// All indices in row-major order
    pub fn to_flat(&self) -> Vec<u32> {
        self.indices.iter().copied().collect()
    }

    /// Iterate `(x, y, index)` over painted cells, row-major
    pub fn painted_cells(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.indices
            .indexed_iter()
            .filter(|&((row, col), _)| self.is_painted(col as u32, row as u32))
            .map(|((row, col), &index)| (col as u32, row as u32, index))
    }

    /// Number of painted cells
    pub fn painted_count(&self) -> usize {
        self.painted.count_ones()
    }
}
