//! Mapping between stage units and terminal cells.

use ratatui::layout::Rect;

use crate::config::StageConfig;
use crate::puzzle::Interactable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Door,
    Interactable(usize),
}

/// A stage projected onto a rectangle of cells.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub area: Rect,
    pub width: f32,
    pub height: f32,
}

impl Projection {
    pub fn new(area: Rect, stage: &StageConfig) -> Self {
        Projection {
            area,
            width: stage.width,
            height: stage.height,
        }
    }

    /// Cell holding the stage point `(x, y)`, clamped into the area.
    pub fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cols = self.area.width.saturating_sub(1) as f32;
        let rows = self.area.height.saturating_sub(1) as f32;
        let col = (x / self.width * cols).round().clamp(0.0, cols) as u16;
        let row = (y / self.height * rows).round().clamp(0.0, rows) as u16;
        (self.area.x + col, self.area.y + row)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }
}

fn near(a: (u16, u16), b: (u16, u16)) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

/// What a click at `(column, row)` lands on. Interactables win over the door
/// when both are under the pointer; the nearest one is picked.
pub fn hit_test(
    projection: &Projection,
    door: (f32, f32),
    interactables: &[Interactable],
    column: u16,
    row: u16,
) -> Option<Target> {
    if !projection.contains(column, row) {
        return None;
    }
    let click = (column, row);
    let spot = interactables
        .iter()
        .enumerate()
        .map(|(i, s)| (i, projection.cell(s.x, s.y)))
        .filter(|(_, cell)| near(*cell, click))
        .min_by_key(|(_, cell)| cell.0.abs_diff(click.0) + cell.1.abs_diff(click.1))
        .map(|(i, _)| Target::Interactable(i));
    if spot.is_some() {
        return spot;
    }
    near(projection.cell(door.0, door.1), click).then_some(Target::Door)
}
