//! PNG loading for tilesets and export of composited maps

use std::path::Path;

use image::{RgbaImage, imageops};
use tracing::info;

use crate::io::configuration::MAX_PIXEL_DIMENSION;
use crate::io::error::{EditorError, Result, invalid_parameter};
use crate::tiles::tileset::Tileset;

/// Load a tileset atlas from an image file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The tile size is rejected by [`Tileset::load`]
pub fn load_tileset<P: AsRef<Path>>(path: P, tile_size: u32) -> Result<Tileset> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| EditorError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("loading tileset {}", path.display());
    Tileset::load(image.to_rgba8(), tile_size)
}

/// Enlarge an image by an integer factor without smoothing
///
/// # Errors
///
/// Returns an error if `factor` is zero or the enlarged image would exceed
/// [`MAX_PIXEL_DIMENSION`] pixels in either direction
pub fn upscale(image: &RgbaImage, factor: u32) -> Result<RgbaImage> {
    if factor == 0 {
        return Err(invalid_parameter(
            "scale",
            &factor,
            &"scale must be at least 1",
        ));
    }
    if factor == 1 {
        return Ok(image.clone());
    }

    let scaled = |side: u32| {
        side.checked_mul(factor)
            .filter(|&pixels| pixels <= MAX_PIXEL_DIMENSION)
    };
    let (Some(width), Some(height)) = (scaled(image.width()), scaled(image.height())) else {
        return Err(invalid_parameter(
            "scale",
            &factor,
            &format!(
                "a {}x{} image scaled by {factor} exceeds {MAX_PIXEL_DIMENSION}px",
                image.width(),
                image.height()
            ),
        ));
    };
    Ok(imageops::resize(
        image,
        width,
        height,
        imageops::FilterType::Nearest,
    ))
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EditorError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image.save(path).map_err(|e| EditorError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(
        "exported {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
