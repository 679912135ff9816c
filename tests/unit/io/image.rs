//! Tests for tileset loading, upscaling and PNG export

#[cfg(test)]
mod tests {
    use crate::{KEY, TILE, atlas_image, tile_color};
    use image::{Rgba, RgbaImage};
    use tilepaint::EditorError;
    use tilepaint::io::configuration::MAX_PIXEL_DIMENSION;
    use tilepaint::io::image::{export_png, load_tileset, upscale};

    // Tests a saved atlas loads back as a tileset with the key removed
    // Verified by skipping the transparency key
    #[test]
    fn test_load_tileset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.png");
        atlas_image(3, 2).save(&path).unwrap();

        let tileset = load_tileset(&path, TILE).unwrap();

        assert_eq!(tileset.tile_count(), 6);
        assert_eq!(tileset.transparency_key(), KEY);
        assert_eq!(tileset.atlas().get_pixel(0, 0).0[3], 0);
        assert_eq!(*tileset.atlas().get_pixel(TILE, 0), tile_color(1));
    }

    // Tests a missing file is reported as an image load error
    // Verified by mapping open failures to file system errors
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_tileset(dir.path().join("missing.png"), TILE);

        assert!(matches!(result, Err(EditorError::ImageLoad { .. })));
    }

    // Tests a tile size that does not divide the atlas is rejected
    // Verified by truncating the last partial column
    #[test]
    fn test_load_bad_tile_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.png");
        atlas_image(3, 2).save(&path).unwrap();

        assert!(matches!(
            load_tileset(&path, 5),
            Err(EditorError::InvalidTileSize { .. })
        ));
    }

    // Tests nearest-neighbour upscaling keeps hard pixel edges
    // Verified by using a smoothing filter
    #[test]
    fn test_upscale() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let scaled = upscale(&image, 3).unwrap();

        assert_eq!(scaled.dimensions(), (6, 3));
        assert_eq!(*scaled.get_pixel(2, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*scaled.get_pixel(3, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(upscale(&image, 1).unwrap(), image);
        assert!(upscale(&image, 0).is_err());
    }

    // Tests scale factors that overflow or exceed the raster limit are rejected
    // Verified by multiplying the image size unchecked
    #[test]
    fn test_upscale_rejects_oversized() {
        let image = RgbaImage::new(8, 2);

        assert!(matches!(
            upscale(&image, u32::MAX),
            Err(EditorError::InvalidParameter { parameter: "scale", .. })
        ));
        assert!(upscale(&image, MAX_PIXEL_DIMENSION / 8 + 1).is_err());
        assert_eq!(
            upscale(&image, MAX_PIXEL_DIMENSION / 8).unwrap().width(),
            MAX_PIXEL_DIMENSION
        );
    }

    // Tests export creates missing directories and writes a readable PNG
    // Verified by disabling directory creation
    #[test]
    fn test_export_png_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("deep").join("map.png");
        let image = RgbaImage::from_pixel(5, 4, Rgba([10, 20, 30, 128]));

        export_png(&image, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded, image);
    }

    // Tests exporting to an unknown format is reported as an export error
    // Verified by ignoring the save result
    #[test]
    fn test_export_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.unknown");
        let image = RgbaImage::new(1, 1);

        assert!(matches!(
            export_png(&image, &path),
            Err(EditorError::ImageExport { .. })
        ));
    }
}
