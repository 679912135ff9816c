//! Input dispatch for the tileset picker and the map canvas
//!
//! The presentation layer converts raw mouse input into [`InputEvent`]s in
//! grid coordinates and routes them here. Picking on the tileset produces a
//! [`Region`]; pressing and dragging on the map stamps that region.
//!
//! ```text
//! NoSelection --pick--> SelectionActive --press--> Painting --release--> SelectionActive
//! ```

use tracing::debug;

use crate::io::error::{EditorError, Result};
use crate::map::tilemap::TileMap;
use crate::spatial::region::{Cell, Region};
use crate::tiles::pattern::{TilePattern, tile_pattern};
use crate::tiles::tileset::Tileset;

/// Pointer input already converted to grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Button pressed over a cell
    Press(Cell),
    /// Pointer moved to a cell with the button held
    Drag(Cell),
    /// Button released
    Release,
}

/// Where an editing session is in the pick/paint cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing picked from the tileset; painting is refused
    NoSelection,
    /// A tileset region is picked and ready to stamp
    SelectionActive,
    /// A stroke is in progress
    Painting {
        /// Cell where the stroke began
        origin: Cell,
        /// Last cell stamped
        last: Cell,
    },
}

/// Rectangle selection over the tileset grid
#[derive(Debug, Clone, Default)]
pub struct TilesetPicker {
    anchor: Option<(u32, u32)>,
    selection: Option<Region>,
}

impl TilesetPicker {
    /// Create a picker with nothing selected
    pub const fn new() -> Self {
        Self {
            anchor: None,
            selection: None,
        }
    }

    /// Current selection
    pub const fn selection(&self) -> Option<Region> {
        self.selection
    }

    /// Drop the selection
    pub const fn clear(&mut self) {
        self.anchor = None;
        self.selection = None;
    }

    /// Update the selection from pointer input on the tileset
    ///
    /// A press outside the atlas is ignored. While dragging, the selection
    /// spans the pressed cell and the pointer cell, clamped to the atlas.
    pub fn handle(&mut self, tileset: &Tileset, event: InputEvent) -> Option<Region> {
        let (columns, rows) = (tileset.tiles_per_row(), tileset.tile_rows());
        match event {
            InputEvent::Press(cell) => {
                if let (Ok(x), Ok(y)) = (u32::try_from(cell.x), u32::try_from(cell.y)) {
                    if x < columns && y < rows {
                        self.anchor = Some((x, y));
                        self.selection = Some(Region::single(x, y));
                    }
                }
            }
            InputEvent::Drag(cell) => {
                if let Some(anchor) = self.anchor {
                    let clamp = |value: i32, limit: u32| {
                        u32::try_from(value.max(0)).unwrap_or(0).min(limit - 1)
                    };
                    let corner = (clamp(cell.x, columns), clamp(cell.y, rows));
                    self.selection = Some(Region::spanning(anchor, corner));
                }
            }
            InputEvent::Release => {}
        }
        self.selection
    }
}

/// Editing state shared by the picker and the map canvas
#[derive(Debug, Clone)]
pub struct EditSession {
    picker: TilesetPicker,
    current_layer: usize,
    state: SessionState,
    brush: Option<TilePattern>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create a session on layer 0 with nothing picked
    pub const fn new() -> Self {
        Self {
            picker: TilesetPicker::new(),
            current_layer: 0,
            state: SessionState::NoSelection,
            brush: None,
        }
    }

    /// Current state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Picked tileset region
    pub const fn selection(&self) -> Option<Region> {
        self.picker.selection()
    }

    /// Layer that strokes paint on
    pub const fn current_layer(&self) -> usize {
        self.current_layer
    }

    /// Route pointer input on the tileset to the picker
    pub fn pick(&mut self, tileset: &Tileset, event: InputEvent) -> Option<Region> {
        let selection = self.picker.handle(tileset, event);
        self.sync_selection_state();
        selection
    }

    /// Replace the picked region directly
    pub fn set_selection(&mut self, region: Option<Region>) {
        self.picker.clear();
        if let Some(region) = region {
            self.picker.selection = Some(region);
        }
        self.sync_selection_state();
    }

    /// Paint on `index` without changing layer visibility
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a layer of `map`
    pub fn set_current_layer(&mut self, map: &TileMap, index: usize) -> Result<()> {
        map.layer(index)?;
        self.current_layer = index;
        Ok(())
    }

    /// Paint on `index` and make it the only visible layer
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a layer of `map`
    pub fn select_layer(&mut self, map: &mut TileMap, index: usize) -> Result<()> {
        map.select_layer(index)?;
        self.current_layer = index;
        Ok(())
    }

    /// Route pointer input on the map canvas
    ///
    /// Returns whether the map was modified. A press stamps the picked
    /// region as is; each drag onto a new cell stamps it re-phased against
    /// the stroke origin. A drag back onto the last stamped cell is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a press arrives with no region picked, or a stamp
    /// is rejected by the layer. A rejected stamp leaves the map unchanged.
    pub fn handle(&mut self, map: &mut TileMap, event: InputEvent) -> Result<bool> {
        match event {
            InputEvent::Press(cell) => {
                let Some(region) = self.picker.selection() else {
                    return Err(EditorError::EmptySelection {
                        operation: "press on map",
                    });
                };
                let brush = map.tileset().pattern(&region)?;
                self.state = SessionState::Painting {
                    origin: cell,
                    last: cell,
                };
                let placed = map.place(self.current_layer, cell.x, cell.y, &brush);
                self.brush = Some(brush);
                placed.map(|()| true)
            }
            InputEvent::Drag(cell) => {
                let SessionState::Painting { origin, last } = self.state else {
                    return Ok(false);
                };
                if cell == last {
                    return Ok(false);
                }
                self.state = SessionState::Painting { origin, last: cell };
                let Some(brush) = &self.brush else {
                    return Err(EditorError::EmptySelection {
                        operation: "drag on map",
                    });
                };
                let preview = tile_pattern(origin, cell, brush);
                map.place(self.current_layer, cell.x, cell.y, &preview)?;
                Ok(true)
            }
            InputEvent::Release => {
                if matches!(self.state, SessionState::Painting { .. }) {
                    debug!("stroke finished");
                }
                self.state = SessionState::NoSelection;
                self.brush = None;
                self.sync_selection_state();
                Ok(false)
            }
        }
    }

    fn sync_selection_state(&mut self) {
        if matches!(self.state, SessionState::Painting { .. }) {
            return;
        }
        self.state = if self.picker.selection().is_some() {
            SessionState::SelectionActive
        } else {
            SessionState::NoSelection
        };
    }
}
