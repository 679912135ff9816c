//! Tests for map construction, layer access and layer selection

#[cfg(test)]
mod tests {
    use crate::{TILE, fixture_tileset};
    use std::sync::Arc;
    use tilepaint::io::configuration::{
        DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_LAYER_COUNT, DEFAULT_MAP_NAME,
    };
    use tilepaint::{EditorError, Region, TileMap};

    // Tests default maps use the configured name, size and layer count
    // Verified by changing the default layer count
    #[test]
    fn test_with_defaults() {
        let map = TileMap::with_defaults(fixture_tileset(2, 2)).unwrap();

        assert_eq!(map.name(), DEFAULT_MAP_NAME);
        assert_eq!(map.grid_size(), (DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT));
        assert_eq!(map.layer_count(), DEFAULT_LAYER_COUNT);
        assert_eq!(
            map.pixel_size(),
            (DEFAULT_GRID_WIDTH * TILE, DEFAULT_GRID_HEIGHT * TILE)
        );
    }

    // Tests every layer shares the map's tileset
    // Verified by cloning the tileset per layer
    #[test]
    fn test_layers_share_tileset() {
        let tileset = fixture_tileset(2, 2);
        let map = TileMap::new("shared", Arc::clone(&tileset), (3, 3), 3).unwrap();

        for layer in map.layers() {
            assert!(Arc::ptr_eq(layer.tileset(), &tileset));
        }
        assert!(Arc::ptr_eq(map.tileset(), &tileset));
    }

    // Tests empty grids and zero layers are rejected
    // Verified by removing the layer count check
    #[test]
    fn test_new_rejects_degenerate_maps() {
        let tileset = fixture_tileset(2, 2);

        assert!(TileMap::new("a", Arc::clone(&tileset), (0, 4), 1).is_err());
        assert!(TileMap::new("b", Arc::clone(&tileset), (4, 0), 1).is_err());
        assert!(TileMap::new("c", tileset, (4, 4), 0).is_err());
    }

    // Tests a huge grid is reported as an error rather than overflowing
    // Verified by removing the pixel extent check
    #[test]
    fn test_new_rejects_huge_grid() {
        let tileset = fixture_tileset(2, 2);

        assert!(matches!(
            TileMap::new("wide", Arc::clone(&tileset), (1_000_000_000, 1), 1),
            Err(EditorError::InvalidParameter { .. })
        ));
        assert!(TileMap::new("tall", tileset, (1, u32::MAX), 2).is_err());
    }

    // Tests placement is routed to the chosen layer only
    // Verified by always placing on layer 0
    #[test]
    fn test_place_on_layer() {
        let tileset = fixture_tileset(3, 3);
        let mut map = TileMap::new("m", Arc::clone(&tileset), (4, 4), 2).unwrap();
        let pattern = tileset.pattern(&Region::single(2, 1)).unwrap();

        map.place(1, 3, 3, &pattern).unwrap();

        assert_eq!(map.layer(1).unwrap().tile_at(3, 3), Some(5));
        assert_eq!(map.layer(0).unwrap().tile_at(3, 3), None);
    }

    // Tests out-of-range layer indices are reported
    // Verified by clamping the index to the last layer
    #[test]
    fn test_invalid_layer() {
        let tileset = fixture_tileset(2, 2);
        let mut map = TileMap::new("m", Arc::clone(&tileset), (2, 2), 2).unwrap();
        let pattern = tileset.pattern(&Region::single(0, 0)).unwrap();

        assert!(matches!(
            map.layer(2),
            Err(EditorError::InvalidLayer {
                index: 2,
                layer_count: 2
            })
        ));
        assert!(map.place(5, 0, 0, &pattern).is_err());
        assert!(map.set_visible(9, false).is_err());
        assert!(map.select_layer(2).is_err());
        assert!(map.remake_layer(2).is_err());
    }

    // Tests selecting a layer hides all others
    // Verified by leaving previous visibility untouched
    #[test]
    fn test_select_layer() {
        let mut map = TileMap::new("m", fixture_tileset(2, 2), (2, 2), 4).unwrap();
        map.set_visible(2, false).unwrap();

        map.select_layer(2).unwrap();

        let visible: Vec<bool> = map.layers().iter().map(|layer| layer.is_visible()).collect();
        assert_eq!(visible, vec![false, false, true, false]);
    }

    // Tests rebuilding every layer keeps painted content
    // Verified by clearing rasters without redrawing
    #[test]
    fn test_remake_image_preserves_content() {
        let tileset = fixture_tileset(3, 3);
        let mut map = TileMap::new("m", Arc::clone(&tileset), (4, 4), 2).unwrap();
        let pattern = tileset.pattern(&Region::new(0, 1, 2, 2).unwrap()).unwrap();
        map.place(0, 1, 1, &pattern).unwrap();
        let before = map.layer(0).unwrap().raster().clone();

        map.remake_image();
        map.remake_layer(1).unwrap();

        assert_eq!(*map.layer(0).unwrap().raster(), before);
    }
}
