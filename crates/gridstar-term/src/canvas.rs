//! A fixed-size character canvas and frame diffing.
//!
//! The application draws a whole [`Canvas`] each time; [`compute_frame`]
//! reduces two canvases to the glyphs that changed so the driver only
//! writes those.

use gridstar_core::Coord;

// ---------------------------------------------------------------------------
// Color / Glyph
// ---------------------------------------------------------------------------

/// A 24-bit colour, or the terminal's default.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    rgb: Option<(u8, u8, u8)>,
}

impl Color {
    /// The terminal's own foreground/background.
    pub const DEFAULT: Self = Self { rgb: None };

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: Some((r, g, b)) }
    }

    /// The RGB triple, or `None` for [`Color::DEFAULT`].
    #[inline]
    pub const fn rgb(self) -> Option<(u8, u8, u8)> {
        self.rgb
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One terminal cell: a character with colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Color::DEFAULT, Color::DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A `width × height` array of glyphs addressed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width: w,
            height: h,
            glyphs: vec![Glyph::default(); (w * h) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, pos: Coord) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 || pos.row >= self.height || pos.col >= self.width {
            return None;
        }
        Some((pos.row * self.width + pos.col) as usize)
    }

    /// Glyph at `pos`, or the default glyph outside the canvas.
    pub fn at(&self, pos: Coord) -> Glyph {
        self.index(pos)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `pos`. No-op outside the canvas.
    pub fn set(&mut self, pos: Coord, glyph: Glyph) {
        if let Some(i) = self.index(pos) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write `text` left to right from `pos`, clipped at the right edge.
    pub fn print(&mut self, pos: Coord, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(pos.shift(0, i as i32), Glyph::new(ch, fg, bg));
        }
    }

    /// Reset every glyph to the default.
    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }
}

// ---------------------------------------------------------------------------
// Frame / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Coord,
}

/// The set of glyph changes between two canvases.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Glyphs of `curr` that differ from `prev`. When the sizes differ every
/// glyph of `curr` is included.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let resized = prev.width != curr.width || prev.height != curr.height;
    let mut cells = Vec::new();
    for row in 0..curr.height {
        for col in 0..curr.width {
            let pos = Coord::new(row, col);
            let glyph = curr.at(pos);
            if resized || prev.at(pos) != glyph {
                cells.push(FrameCell { glyph, pos });
            }
        }
    }
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}
