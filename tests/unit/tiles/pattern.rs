//! Tests for stamp patterns and wrapping while dragging

#[cfg(test)]
mod tests {
    use crate::{TILE, fixture_tileset, tile_color};
    use image::{Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tilepaint::io::configuration::PREVIEW_FILL_COLOR;
    use tilepaint::{Cell, EditorError, Region, TilePattern, tile_pattern};

    fn strip_pattern() -> (std::sync::Arc<tilepaint::Tileset>, TilePattern) {
        let tileset = fixture_tileset(3, 2);
        let pattern = tileset.pattern(&Region::new(0, 0, 3, 1).unwrap()).unwrap();
        (tileset, pattern)
    }

    fn tile_center(pattern: &TilePattern, column: u32, row: u32) -> Rgba<u8> {
        *pattern
            .raster()
            .get_pixel(column * TILE + TILE / 2, row * TILE + TILE / 2)
    }

    // Tests rasters must match region size times tile size
    // Verified by skipping the dimension check
    #[test]
    fn test_new_validates_raster_size() {
        let region = Region::new(0, 0, 2, 1).unwrap();

        assert!(TilePattern::new(region, RgbaImage::new(2 * TILE, TILE), TILE).is_ok());
        assert!(matches!(
            TilePattern::new(region, RgbaImage::new(TILE, TILE), TILE),
            Err(EditorError::PatternMismatch { .. })
        ));
        assert!(TilePattern::new(region, RgbaImage::new(0, 0), 0).is_err());
    }

    // Tests equal origin and target reproduce the pattern pixel for pixel
    // Verified by drawing only the shifted copies
    #[test]
    fn test_zero_offset_is_identity() {
        let tileset = fixture_tileset(4, 3);
        let pattern = tileset.pattern(&Region::new(1, 0, 3, 2).unwrap()).unwrap();

        for cell in [Cell::new(0, 0), Cell::new(7, -3), Cell::new(-5, 11)] {
            let tiled = tile_pattern(cell, cell, &pattern);
            assert_eq!(tiled, pattern);
        }
    }

    // Tests dragging one cell left shifts the repetition right by one tile
    // Verified by using a truncating remainder instead of modulo
    #[test]
    fn test_drag_left_wraps_forward() {
        let (tileset, pattern) = strip_pattern();
        let tiled = tile_pattern(Cell::new(5, 0), Cell::new(4, 0), &pattern);

        assert_eq!(tiled.phase(), (1, 0));
        assert_eq!(tile_center(&tiled, 0, 0), tile_color(2));
        assert_eq!(tile_center(&tiled, 1, 0), tile_color(0));
        assert_eq!(tile_center(&tiled, 2, 0), tile_color(1));
        assert_eq!(tiled.indices(&tileset).unwrap(), vec![2, 0, 1]);
    }

    // Tests dragging one cell right keeps the stroke anchored to its origin
    // Verified by negating the offset
    #[test]
    fn test_drag_right_wraps_backward() {
        let (tileset, pattern) = strip_pattern();
        let tiled = tile_pattern(Cell::new(0, 0), Cell::new(1, 0), &pattern);

        assert_eq!(tiled.phase(), (2, 0));
        assert_eq!(tiled.indices(&tileset).unwrap(), vec![1, 2, 0]);
        assert_eq!(tile_center(&tiled, 0, 0), tile_color(1));
    }

    // Tests shifting the target by whole pattern sizes leaves the result unchanged
    // Verified by reducing the offset modulo the wrong axis
    #[test]
    fn test_periodicity() {
        let tileset = fixture_tileset(4, 3);
        let pattern = tileset.pattern(&Region::new(0, 1, 3, 2).unwrap()).unwrap();
        let (width, height) = (3, 2);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let origin = Cell::new(rng.random_range(-20..20), rng.random_range(-20..20));
            let target = Cell::new(rng.random_range(-20..20), rng.random_range(-20..20));
            let k = rng.random_range(-4..=4);
            let j = rng.random_range(-4..=4);
            let shifted = Cell::new(target.x - k * width, target.y - j * height);

            assert_eq!(
                tile_pattern(origin, target, &pattern),
                tile_pattern(origin, shifted, &pattern),
                "origin {origin:?} target {target:?} k {k} j {j}"
            );
        }
    }

    // Tests the sentinel fill is always fully covered
    // Verified by drawing only the unshifted and positive copies
    #[test]
    fn test_fill_never_survives() {
        let tileset = fixture_tileset(4, 3);
        let pattern = tileset.pattern(&Region::new(0, 0, 3, 3).unwrap()).unwrap();
        let fill = Rgba(PREVIEW_FILL_COLOR);

        for dx in -3..=3 {
            for dy in -3..=3 {
                let tiled = tile_pattern(Cell::new(0, 0), Cell::new(dx, dy), &pattern);
                assert!(tiled.raster().pixels().all(|pixel| *pixel != fill));
                assert_eq!(tiled.raster().dimensions(), pattern.raster().dimensions());
            }
        }
    }

    // Tests every tile of a shifted raster shows the atlas tile its indices name
    // Verified by composing phases with subtraction
    #[test]
    fn test_indices_match_raster_after_repeated_tiling() {
        let tileset = fixture_tileset(4, 3);
        let pattern = tileset.pattern(&Region::new(1, 1, 3, 2).unwrap()).unwrap();
        let once = tile_pattern(Cell::new(0, 0), Cell::new(2, 1), &pattern);
        let twice = tile_pattern(Cell::new(4, 4), Cell::new(3, 4), &once);

        for tiled in [&once, &twice] {
            let indices = tiled.indices(&tileset).unwrap();
            for (position, index) in indices.iter().enumerate() {
                let (column, row) = (position as u32 % 3, position as u32 / 3);
                assert_eq!(tile_center(tiled, column, row), tile_color(*index));
            }
        }
    }

    // Tests source offsets invert the phase
    // Verified by adding the phase instead of subtracting
    #[test]
    fn test_source_offset() {
        let (_, pattern) = strip_pattern();
        let tiled = tile_pattern(Cell::new(5, 0), Cell::new(4, 0), &pattern);

        assert_eq!(pattern.source_offset(2, 0), (2, 0));
        assert_eq!(tiled.source_offset(0, 0), (2, 0));
        assert_eq!(tiled.source_offset(1, 0), (0, 0));
    }
}
