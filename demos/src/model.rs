//! The visualiser state and its reaction to input.

use std::fmt;

use gridstar_core::{CellId, CellKind, Coord, Grid, Observer, SearchOutcome, search_with};
use gridstar_term::view::{draw_grid, draw_status};
use gridstar_term::{Canvas, Key, Msg, MouseAction};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Args;

const HELP: &str =
    "click: start/end/wall  right: erase  space: search  c: new  x: reset  r: random  q: quit";

/// What the application loop must do after an update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run a search between the two endpoints.
    Search { start: CellId, end: CellId },
    /// Leave the application.
    End,
}

/// The line shown under the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Ready,
    NeedEndpoints,
    Searching,
    Found(usize),
    NoPath,
    Cancelled,
    Scattered(usize),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::NeedEndpoints => f.write_str("place a start and an end first"),
            Self::Searching => f.write_str("searching (Esc cancels)"),
            Self::Found(len) => write!(f, "path length {len}"),
            Self::NoPath => f.write_str("no path"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::Scattered(n) => write!(f, "scattered {n} barriers"),
        }
    }
}

/// Canvas size needed for a grid of `rows`: the grid, a status line and a
/// help line.
pub fn canvas_size(rows: usize) -> (i32, i32) {
    let width = rows.max(HELP.chars().count()) as i32;
    (width, rows as i32 + 2)
}

/// Draw `grid` with a status line and the key help below it.
pub fn render(canvas: &mut Canvas, grid: &Grid, status: Status) {
    canvas.clear();
    draw_grid(canvas, grid, Coord::ZERO);
    let row = grid.rows() as i32;
    draw_status(canvas, row, &format!(" {status}"));
    draw_status(canvas, row + 1, HELP);
}

/// Grid editing state of the visualiser.
pub struct Visualizer {
    grid: Grid,
    rows: usize,
    density: f64,
    rng: StdRng,
    status: Status,
}

impl Visualizer {
    pub fn new(args: &Args) -> Self {
        let rows = args.rows as usize;
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            grid: Grid::new(rows),
            rows,
            density: args.density,
            rng,
            status: Status::Ready,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Apply one input message.
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { key } => self.on_key(key),
            Msg::Mouse { action, pos } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Screen { .. } => None,
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Space => match (self.grid.start(), self.grid.end()) {
                (Some(start), Some(end)) => return Some(Effect::Search { start, end }),
                _ => self.status = Status::NeedEndpoints,
            },
            Key::Char('c') => {
                self.grid = Grid::new(self.rows);
                self.status = Status::Ready;
                log::info!("new {}x{} grid", self.rows, self.rows);
            }
            Key::Char('x') => {
                self.grid.reset();
                self.status = Status::Ready;
                log::info!("grid reset");
            }
            Key::Char('r') => {
                self.grid.clear_trace();
                let n = self.grid.scatter_barriers(&mut self.rng, self.density);
                self.status = Status::Scattered(n);
            }
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Coord) {
        // one terminal cell per grid cell; positions off the grid are ignored
        let Ok(cell) = self.grid.cell_at_pixel(pos.col, pos.row) else {
            return;
        };
        let (id, kind, at) = (cell.id(), cell.kind(), cell.pos());

        let target = match action {
            MouseAction::Main => {
                if self.grid.start().is_none() && kind != CellKind::End {
                    CellKind::Start
                } else if self.grid.end().is_none() && kind != CellKind::Start {
                    CellKind::End
                } else if !kind.is_endpoint() {
                    CellKind::Barrier
                } else {
                    return;
                }
            }
            MouseAction::Secondary => CellKind::Empty,
            _ => return,
        };

        if kind == target {
            return;
        }
        if self.grid.classify(id, target).is_ok() {
            log::debug!("{at} -> {target:?}");
        }
    }

    /// Clear the previous trace, prepare adjacency and search from `start`
    /// to `end`, reporting each step to `observer`. `cancelled` tells
    /// whether a [`SearchOutcome::NotFound`] came from the observer.
    pub fn search<O: Observer + ?Sized>(
        &mut self,
        start: CellId,
        end: CellId,
        observer: &mut O,
        cancelled: impl FnOnce() -> bool,
    ) -> gridstar_core::Result<()> {
        self.grid.clear_trace();
        self.grid.prepare_for_search();
        self.status = Status::Searching;

        let outcome = search_with(&mut self.grid, start, end, observer)?;
        self.status = match outcome {
            SearchOutcome::Found(path) => Status::Found(path.len()),
            SearchOutcome::NotFound if cancelled() => Status::Cancelled,
            SearchOutcome::NotFound => Status::NoPath,
        };
        log::info!("search finished: {}", self.status);
        Ok(())
    }

    /// Draw the current state.
    pub fn draw(&self, canvas: &mut Canvas) {
        render(canvas, &self.grid, self.status);
    }
}
