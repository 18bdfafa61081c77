//! Drawing a [`Grid`] onto a [`Canvas`].

use gridstar_core::{CellKind, Coord, Grid};

use crate::canvas::{Canvas, Color, Glyph};

// Colours
const COL_EMPTY_FG: Color = Color::from_rgb(90, 90, 100);
const COL_BARRIER: Color = Color::from_rgb(235, 235, 235);
const COL_START: Color = Color::from_rgb(255, 165, 0);
const COL_END: Color = Color::from_rgb(64, 224, 208);
const COL_OPEN: Color = Color::from_rgb(0, 170, 0);
const COL_CLOSED: Color = Color::from_rgb(170, 30, 30);
const COL_PATH: Color = Color::from_rgb(128, 0, 128);
const COL_LABEL: Color = Color::from_rgb(20, 20, 20);
pub const COL_STATUS_FG: Color = Color::from_rgb(200, 200, 200);
pub const COL_STATUS_BG: Color = Color::from_rgb(30, 30, 50);

/// The glyph used for a cell classification.
pub fn glyph_for(kind: CellKind) -> Glyph {
    match kind {
        CellKind::Empty => Glyph::new('·', COL_EMPTY_FG, Color::DEFAULT),
        CellKind::Barrier => Glyph::new(' ', Color::DEFAULT, COL_BARRIER),
        CellKind::Start => Glyph::new('S', COL_LABEL, COL_START),
        CellKind::End => Glyph::new('E', COL_LABEL, COL_END),
        CellKind::Open => Glyph::new(' ', Color::DEFAULT, COL_OPEN),
        CellKind::Closed => Glyph::new(' ', Color::DEFAULT, COL_CLOSED),
        CellKind::Path => Glyph::new(' ', Color::DEFAULT, COL_PATH),
    }
}

/// Draw every cell of `grid` with its top-left corner at `origin`, one
/// terminal cell per grid cell.
pub fn draw_grid(canvas: &mut Canvas, grid: &Grid, origin: Coord) {
    for cell in grid {
        canvas.set(origin + cell.pos(), glyph_for(cell.kind()));
    }
}

/// Draw a full-width status line on canvas row `row`.
pub fn draw_status(canvas: &mut Canvas, row: i32, text: &str) {
    let blank: String = " ".repeat(canvas.width().max(0) as usize);
    canvas.print(Coord::new(row, 0), &blank, COL_STATUS_FG, COL_STATUS_BG);
    canvas.print(Coord::new(row, 0), text, COL_STATUS_FG, COL_STATUS_BG);
}
