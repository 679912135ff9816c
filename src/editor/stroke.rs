//! Scripted straight-line strokes
//!
//! A stroke names a layer, a tileset region and one or two map cells, written
//! as `LAYER/RX,RY,RW,RH/X0,Y0[/X1,Y1]`. It expands into the pointer events a
//! user would produce by pressing at the first cell and dragging in a straight
//! line to the second.

use std::str::FromStr;

use crate::editor::session::InputEvent;
use crate::io::error::{EditorError, Result, invalid_parameter};
use crate::spatial::region::{Cell, Region};

/// One press-drag-release gesture on a single layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    /// Layer painted on
    pub layer: usize,
    /// Tileset region used as the brush
    pub selection: Region,
    /// Cell pressed
    pub from: Cell,
    /// Cell released over
    pub to: Cell,
}

impl Stroke {
    /// Cells visited from `from` to `to`, both included
    pub fn path(&self) -> Vec<Cell> {
        line_cells(self.from, self.to)
    }

    /// Whether both endpoints lie on a `columns` x `rows` grid
    pub fn lies_within(&self, columns: u32, rows: u32) -> bool {
        let on_grid = |cell: Cell| {
            u32::try_from(cell.x).is_ok_and(|x| x < columns)
                && u32::try_from(cell.y).is_ok_and(|y| y < rows)
        };
        on_grid(self.from) && on_grid(self.to)
    }

    /// Pointer events of the gesture
    pub fn events(&self) -> Vec<InputEvent> {
        let path = self.path();
        let mut events = Vec::with_capacity(path.len() + 1);
        let mut cells = path.into_iter();
        if let Some(first) = cells.next() {
            events.push(InputEvent::Press(first));
        }
        events.extend(cells.map(InputEvent::Drag));
        events.push(InputEvent::Release);
        events
    }
}

impl FromStr for Stroke {
    type Err = EditorError;

    fn from_str(text: &str) -> Result<Self> {
        let reject = |reason: &str| invalid_parameter("stroke", &text, &reason);
        let parts: Vec<&str> = text.split('/').collect();

        let (layer, region, from, to) = match parts.as_slice() {
            [layer, region, from] => (*layer, *region, *from, None),
            [layer, region, from, to] => (*layer, *region, *from, Some(*to)),
            _ => return Err(reject("expected LAYER/RX,RY,RW,RH/X0,Y0[/X1,Y1]")),
        };

        let layer = layer
            .trim()
            .parse::<usize>()
            .map_err(|e| reject(&format!("layer: {e}")))?;

        let region_values = parse_numbers::<u32>(region)
            .map_err(|e| reject(&format!("region: {e}")))?;
        let [x, y, width, height] = region_values.as_slice() else {
            return Err(reject("region needs four values"));
        };
        let selection = Region::new(*x, *y, *width, *height)?;

        let from = parse_cell(from).map_err(|e| reject(&format!("start cell: {e}")))?;
        let to = match to {
            Some(cell) => parse_cell(cell).map_err(|e| reject(&format!("end cell: {e}")))?,
            None => from,
        };

        Ok(Self {
            layer,
            selection,
            from,
            to,
        })
    }
}

fn parse_numbers<T: FromStr>(text: &str) -> std::result::Result<Vec<T>, T::Err> {
    text.split(',').map(|value| value.trim().parse::<T>()).collect()
}

fn parse_cell(text: &str) -> std::result::Result<Cell, String> {
    let values = parse_numbers::<i32>(text).map_err(|e| e.to_string())?;
    match values.as_slice() {
        [x, y] => Ok(Cell::new(*x, *y)),
        _ => Err(format!("expected X,Y but got '{text}'")),
    }
}

/// Every grid cell on the line from `from` to `to`, endpoints included
pub fn line_cells(from: Cell, to: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();

    let dx = (i64::from(to.x) - i64::from(from.x)).abs();
    let dy = -(i64::from(to.y) - i64::from(from.y)).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };
    let mut error = dx + dy;

    let (mut x, mut y) = (from.x, from.y);
    loop {
        cells.push(Cell::new(x, y));

        if x == to.x && y == to.y {
            break;
        }

        // x and y only step toward their endpoint, so they stay in i32 range
        let doubled = 2 * error;
        if doubled >= dy {
            if x == to.x {
                break;
            }
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            if y == to.y {
                break;
            }
            error += dx;
            y += step_y;
        }
    }

    cells
}
