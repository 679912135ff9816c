//! Command-line driver that paints scripted strokes and exports the composite

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{Level, info, warn};

use crate::editor::session::EditSession;
use crate::editor::stroke::Stroke;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_LAYER_COUNT, DEFAULT_MAP_NAME,
    DEFAULT_TILE_SIZE, DEFAULT_UI_SCALE, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_png, load_tileset, upscale};
use crate::io::progress::ProgressManager;
use crate::map::tilemap::TileMap;

#[derive(Parser, Debug)]
#[command(name = "tilepaint")]
#[command(
    author,
    version,
    about = "Paint tileset patterns onto a layered tile map and export the result"
)]
/// Command-line arguments for the map painter
pub struct Cli {
    /// Tileset PNG; the color of its top-left pixel is keyed out
    #[arg(value_name = "TILESET")]
    pub tileset: PathBuf,

    /// Tile edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Map width in tiles
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: u32,

    /// Map height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: u32,

    /// Number of layers
    #[arg(short, long, default_value_t = DEFAULT_LAYER_COUNT)]
    pub layers: usize,

    /// Stroke to paint, as LAYER/RX,RY,RW,RH/X0,Y0[/X1,Y1] (repeatable)
    #[arg(short, long = "stroke", value_name = "STROKE")]
    pub strokes: Vec<Stroke>,

    /// Show only this layer at full opacity; the others are dimmed
    #[arg(long, value_name = "LAYER")]
    pub select_layer: Option<usize>,

    /// Pixel magnification of the exported image
    #[arg(long, default_value_t = DEFAULT_UI_SCALE)]
    pub scale: u32,

    /// Output PNG path (defaults to <TILESET stem>_map.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most detailed log level to emit
    pub const fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Where the composite is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.tileset))
    }

    fn default_output_path(tileset: &Path) -> PathBuf {
        let stem = tileset.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = tileset.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Replays strokes through an editing session and exports the composite
pub struct MapPainter {
    cli: Cli,
}

impl MapPainter {
    /// Create a painter for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the map, paint every stroke, and write the composite
    ///
    /// Stroke events rejected by the session are logged and skipped, the
    /// same way an interactive editor ignores a paint action it cannot apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the tileset cannot be loaded, the map cannot be
    /// created, the selected layer does not exist, or the export fails
    pub fn run(&self) -> Result<PathBuf> {
        let tileset = Arc::new(load_tileset(&self.cli.tileset, self.cli.tile_size)?);
        let mut map = TileMap::new(
            DEFAULT_MAP_NAME,
            tileset,
            (self.cli.width, self.cli.height),
            self.cli.layers,
        )?;

        self.paint_strokes(&mut map);

        if let Some(index) = self.cli.select_layer {
            map.select_layer(index)?;
        }

        let composite = upscale(&map.compose(), self.cli.scale)?;
        let output_path = self.cli.output_path();
        export_png(&composite, &output_path)?;
        Ok(output_path)
    }

    /// Replay every stroke on `map`, returning how many events changed it
    ///
    /// Strokes with an endpoint off the map are skipped before they are
    /// expanded into events.
    pub fn paint_strokes(&self, map: &mut TileMap) -> usize {
        let (columns, rows) = map.grid_size();
        let strokes: Vec<(usize, &Stroke)> = self
            .cli
            .strokes
            .iter()
            .enumerate()
            .filter(|(index, stroke)| {
                let on_map = stroke.lies_within(columns, rows);
                if !on_map {
                    warn!(
                        "skipping stroke {}: endpoints ({}, {}) and ({}, {}) must lie on the {columns}x{rows} map",
                        index + 1,
                        stroke.from.x,
                        stroke.from.y,
                        stroke.to.x,
                        stroke.to.y
                    );
                }
                on_map
            })
            .collect();

        let total_events = strokes
            .iter()
            .map(|(_, stroke)| stroke.events().len())
            .sum();
        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(total_events));

        let mut session = EditSession::new();
        let mut changes = 0;

        for (position, (index, stroke)) in strokes.iter().enumerate() {
            if let Some(pm) = &progress {
                pm.start_stroke(position, strokes.len());
            }
            if let Err(error) = session.set_current_layer(map, stroke.layer) {
                warn!("skipping stroke {}: {error}", index + 1);
                if let Some(pm) = &progress {
                    pm.skip(stroke.events().len());
                }
                continue;
            }
            session.set_selection(Some(stroke.selection));

            for event in stroke.events() {
                match session.handle(map, event) {
                    Ok(true) => changes += 1,
                    Ok(false) => {}
                    Err(error) => warn!("stroke {} event {event:?} rejected: {error}", index + 1),
                }
                if let Some(pm) = &progress {
                    pm.advance();
                }
            }
        }

        if let Some(pm) = &progress {
            pm.finish();
        }
        info!("painted {} strokes ({changes} stamps)", strokes.len());
        changes
    }
}
