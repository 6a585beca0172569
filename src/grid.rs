//! Terminal cell grid ↔ pixel-space viewport.
//!
//! Screen layout (rows):
//!   0        HUD
//!   1        top border
//!   2..h-2   play area
//!   h-2      bottom border
//!   h-1      controls hint
//! Column 0 and column w-1 are the side walls.

use crate::entities::Viewport;

/// Pixels covered by one terminal cell.  Roughly the aspect of a real glyph.
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 25.0;

pub const PLAY_LEFT: u16 = 1;
pub const PLAY_TOP: u16 = 2;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGrid {
    pub cols: u16,
    pub rows: u16,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Large enough to hold the HUD, borders and a playable field.
    pub fn fits(&self) -> bool {
        self.cols >= MIN_COLS && self.rows >= MIN_ROWS
    }

    pub fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    pub fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(4)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.play_cols() as f32 * CELL_WIDTH,
            self.play_rows() as f32 * CELL_HEIGHT,
        )
    }

    /// Centre of a terminal cell in pixel space, or `None` outside the play area.
    pub fn to_world(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        let c = col.checked_sub(PLAY_LEFT)?;
        let r = row.checked_sub(PLAY_TOP)?;
        if c >= self.play_cols() || r >= self.play_rows() {
            return None;
        }
        Some((
            (c as f32 + 0.5) * CELL_WIDTH,
            (r as f32 + 0.5) * CELL_HEIGHT,
        ))
    }

    /// Terminal cell holding a pixel-space point, or `None` when it is off-screen.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let c = (x / CELL_WIDTH).floor();
        let r = (y / CELL_HEIGHT).floor();
        if c >= self.play_cols() as f32 || r >= self.play_rows() as f32 {
            return None;
        }
        Some((PLAY_LEFT + c as u16, PLAY_TOP + r as u16))
    }
}
