//! Painter's-order compositing of layer rasters
//!
//! Visible layers are drawn at full opacity; hidden layers are drawn at a
//! fixed reduced opacity so they stay visible as context while editing.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::io::configuration::{HIDDEN_LAYER_OPACITY, VISIBLE_LAYER_OPACITY};
use crate::map::layer::Layer;
use crate::map::tilemap::TileMap;

/// Opacity a layer is composited with
pub const fn layer_opacity(layer: &Layer) -> f32 {
    if layer.is_visible() {
        VISIBLE_LAYER_OPACITY
    } else {
        HIDDEN_LAYER_OPACITY
    }
}

/// Composite every layer of `map` onto a transparent canvas of the map's size
pub fn compose(map: &TileMap) -> RgbaImage {
    let (width, height) = map.pixel_size();
    compose_layers(map.layers(), width, height)
}

/// Composite `layers` bottom to top onto a transparent `width` x `height` canvas
pub fn compose_layers(layers: &[Layer], width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for layer in layers {
        draw_with_opacity(&mut canvas, layer.raster(), layer_opacity(layer));
    }
    debug!(layers = layers.len(), "composited {width}x{height} image");
    canvas
}

/// Draw `source` over `canvas` at the origin, scaling its alpha by `opacity`
///
/// Pixels of `source` beyond the canvas are ignored.
pub fn draw_with_opacity(canvas: &mut RgbaImage, source: &RgbaImage, opacity: f32) {
    for (x, y, pixel) in source.enumerate_pixels() {
        if let Some(target) = canvas.get_pixel_mut_checked(x, y) {
            *target = blend_over(*target, *pixel, opacity);
        }
    }
}

/// Source-over blend of straight-alpha pixels with an extra opacity factor
pub fn blend_over(destination: Rgba<u8>, source: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let [sr, sg, sb, sa] = source.0;
    let [dr, dg, db, da] = destination.0;

    let source_alpha = f32::from(sa) / 255.0 * opacity.clamp(0.0, 1.0);
    if source_alpha <= 0.0 {
        return destination;
    }
    let destination_alpha = f32::from(da) / 255.0;
    let out_alpha = destination_alpha.mul_add(1.0 - source_alpha, source_alpha);

    let channel = |s: u8, d: u8| {
        let mixed = f32::from(s).mul_add(
            source_alpha,
            f32::from(d) * destination_alpha * (1.0 - source_alpha),
        ) / out_alpha;
        mixed.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(sr, dr),
        channel(sg, dg),
        channel(sb, db),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
