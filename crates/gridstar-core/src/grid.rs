//! The [`Grid`] type: a square arena of [`Cell`]s in row-major order.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::cell::{Cell, CellId, CellKind, GridTag};
use crate::error::{Error, Result};
use crate::geom::Coord;

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// A `rows × rows` grid of cells.
///
/// The grid owns every cell and tracks the single Start and End cell. Cells
/// refer to each other only through [`CellId`]s issued by this grid.
#[derive(Debug)]
pub struct Grid {
    tag: GridTag,
    rows: usize,
    cell_size: u32,
    cells: Vec<Cell>,
    start: Option<usize>,
    end: Option<usize>,
    // bumped whenever a cell gains or loses Barrier
    revision: u64,
    prepared: Option<u64>,
}

impl Grid {
    /// Create a grid of Empty cells with a cell size of one pixel.
    pub fn new(rows: usize) -> Self {
        Self::with_cell_size(rows, 1)
    }

    /// Create a grid of Empty cells, mapping `cell_size` pixels to one cell
    /// in [`cell_at_pixel`](Grid::cell_at_pixel). A zero size is taken as 1.
    pub fn with_cell_size(rows: usize, cell_size: u32) -> Self {
        let tag = GridTag(NEXT_TAG.fetch_add(1, Ordering::Relaxed));
        let mut cells = Vec::with_capacity(rows * rows);
        for index in 0..rows * rows {
            let pos = Coord::new((index / rows) as i32, (index % rows) as i32);
            cells.push(Cell::new(CellId { grid: tag, index }, pos));
        }
        Self {
            tag,
            rows,
            cell_size: cell_size.max(1),
            cells,
            start: None,
            end: None,
            revision: 0,
            prepared: None,
        }
    }

    /// Side length.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Pixels per cell, for [`cell_at_pixel`](Grid::cell_at_pixel).
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Coord) -> bool {
        self.index(pos.row, pos.col).is_some()
    }

    /// The current Start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<CellId> {
        self.start.map(|i| self.cells[i].id())
    }

    /// The current End cell, if any.
    #[inline]
    pub fn end(&self) -> Option<CellId> {
        self.end.map(|i| self.cells[i].id())
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Bounds-checked lookup by row and column.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell> {
        let i = self.index(row, col).ok_or(Error::OutOfRange {
            row,
            col,
            rows: self.rows,
        })?;
        Ok(&self.cells[i])
    }

    /// Id of the cell at `(row, col)`.
    pub fn id_at(&self, row: i32, col: i32) -> Result<CellId> {
        self.cell_at(row, col).map(Cell::id)
    }

    /// Look a cell up by id.
    pub fn cell(&self, id: CellId) -> Result<&Cell> {
        let i = self.check(id)?;
        Ok(&self.cells[i])
    }

    /// Map a pixel position to the cell under it. `x` runs along columns
    /// and `y` along rows.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Result<&Cell> {
        // in i64 so sizes above i32::MAX stay positive; dividing by a size
        // of at least 1 keeps the quotient within i32
        let size = i64::from(self.cell_size);
        let row = i64::from(y).div_euclid(size) as i32;
        let col = i64::from(x).div_euclid(size) as i32;
        self.cell_at(row, col)
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of cells currently of `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Classify a cell, keeping at most one Start and one End.
    ///
    /// Making a cell Start demotes any previous Start to Empty (same for
    /// End). Overwriting an endpoint with anything else clears that
    /// endpoint. Trace kinds (`Open`, `Closed`, `Path`) never overwrite an
    /// endpoint.
    pub fn classify(&mut self, id: CellId, kind: CellKind) -> Result<()> {
        let i = self.check(id)?;
        let before = self.cells[i].kind();

        match kind {
            CellKind::Start => {
                if let Some(old) = self.start.filter(|&s| s != i) {
                    self.set_kind(old, CellKind::Empty);
                }
                if self.end == Some(i) {
                    self.end = None;
                }
                self.start = Some(i);
            }
            CellKind::End => {
                if let Some(old) = self.end.filter(|&e| e != i) {
                    self.set_kind(old, CellKind::Empty);
                }
                if self.start == Some(i) {
                    self.start = None;
                }
                self.end = Some(i);
            }
            _ if kind.is_trace() && before.is_endpoint() => return Ok(()),
            _ => {
                if self.start == Some(i) {
                    self.start = None;
                }
                if self.end == Some(i) {
                    self.end = None;
                }
            }
        }

        self.set_kind(i, kind);
        log::trace!("{} -> {:?}", self.cells[i].pos(), kind);
        Ok(())
    }

    /// Return a single cell to Empty, clearing the start/end slot if it was
    /// an endpoint.
    pub fn reset_cell(&mut self, id: CellId) -> Result<()> {
        self.classify(id, CellKind::Empty)
    }

    /// Return every cell to Empty without reallocating. Outstanding
    /// [`CellId`]s stay valid.
    pub fn reset(&mut self) {
        for c in &mut self.cells {
            c.reset();
            c.neighbors.clear();
        }
        self.start = None;
        self.end = None;
        self.revision += 1;
        self.prepared = None;
    }

    /// Return Open, Closed and Path cells to Empty, keeping barriers and
    /// endpoints.
    pub fn clear_trace(&mut self) {
        for c in &mut self.cells {
            if c.kind().is_trace() {
                c.reset();
            }
        }
    }

    /// Turn each cell that is neither an endpoint nor already a barrier into
    /// a barrier with probability `density` (clamped to `0.0..=1.0`).
    /// Returns how many cells were converted.
    pub fn scatter_barriers<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> usize {
        let p = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut placed = 0;
        for i in 0..self.cells.len() {
            let kind = self.cells[i].kind();
            if kind.is_endpoint() || kind == CellKind::Barrier {
                continue;
            }
            if rng.random_bool(p) {
                self.set_kind(i, CellKind::Barrier);
                placed += 1;
            }
        }
        log::debug!("scattered {placed} barriers at density {p}");
        placed
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Recompute the adjacency list of every cell from the current barrier
    /// set. Must run after the last barrier edit and before a search.
    pub fn prepare_for_search(&mut self) {
        for i in 0..self.cells.len() {
            let neighbors = self.cells[i].compute_neighbors(self);
            self.cells[i].neighbors = neighbors;
        }
        self.prepared = Some(self.revision);
        log::debug!(
            "prepared adjacency for {}x{} grid (revision {})",
            self.rows,
            self.rows,
            self.revision
        );
    }

    /// Whether adjacency is current with respect to the barrier set.
    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.prepared == Some(self.revision)
    }

    // -----------------------------------------------------------------------
    // Crate-internal helpers
    // -----------------------------------------------------------------------

    /// Flat index of `(row, col)`, or `None` when out of range. Each axis is
    /// checked against its own bound.
    #[inline]
    pub(crate) fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (r, c) = (row as usize, col as usize);
        if r >= self.rows || c >= self.rows {
            return None;
        }
        Some(r * self.rows + c)
    }

    /// Validate that `id` was issued by this grid and return its index.
    #[inline]
    pub(crate) fn check(&self, id: CellId) -> Result<usize> {
        if id.grid != self.tag || id.index >= self.cells.len() {
            return Err(Error::ForeignCell(id));
        }
        Ok(id.index)
    }

    /// Reject a search against missing or outdated adjacency.
    pub(crate) fn ensure_prepared(&self) -> Result<()> {
        match self.prepared {
            None => Err(Error::NotPrepared),
            Some(r) if r != self.revision => Err(Error::StaleAdjacency),
            Some(_) => Ok(()),
        }
    }

    #[inline]
    pub(crate) fn tag(&self) -> GridTag {
        self.tag
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_by_index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    fn set_kind(&mut self, i: usize, kind: CellKind) {
        let was_barrier = self.cells[i].is_barrier();
        self.cells[i].classify(kind);
        if was_barrier != self.cells[i].is_barrier() {
            self.revision += 1;
        }
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
