//! Editor constants and runtime configuration defaults

// Map defaults used when a new map is created
/// Tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 8;
/// Map width in tiles
pub const DEFAULT_GRID_WIDTH: u32 = 32;
/// Map height in tiles
pub const DEFAULT_GRID_HEIGHT: u32 = 32;
/// Number of layers in a new map
pub const DEFAULT_LAYER_COUNT: usize = 4;
/// Name given to a new map
pub const DEFAULT_MAP_NAME: &str = "Map001";

// Safety limit to prevent excessive memory allocation
/// Maximum width or height of a layer raster or exported image, in pixels
pub const MAX_PIXEL_DIMENSION: u32 = 16_384;

// Compositing
/// Opacity of a visible layer
pub const VISIBLE_LAYER_OPACITY: f32 = 1.0;
/// Opacity of a hidden layer, drawn as a dimmed ghost for context
pub const HIDDEN_LAYER_OPACITY: f32 = 0.5;
/// Fully transparent pixel
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
/// Fill of a preview canvas before the pattern is wrapped across it
pub const PREVIEW_FILL_COLOR: [u8; 4] = [255, 255, 255, 255];

// Presentation
/// Pixel magnification applied when exporting the composite
pub const DEFAULT_UI_SCALE: u32 = 4;
/// Suffix added to exported map filenames
pub const OUTPUT_SUFFIX: &str = "_map";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
