//! The [`Cell`] type: one grid position with a classification and an
//! adjacency list.

use std::fmt;

use crate::geom::Coord;
use crate::grid::Grid;

/// Identity of the grid that issued a [`CellId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct GridTag(pub(crate) u64);

/// Handle naming one cell of one grid.
///
/// Ids are cheap to copy and are what adjacency lists, predecessor maps and
/// the search entry points deal in. An id from one grid is rejected by any
/// other grid, including a rebuilt replacement of the same size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellId {
    pub(crate) grid: GridTag,
    pub(crate) index: usize,
}

impl CellId {
    /// Row-major index of the cell inside its grid.
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} of grid {}", self.index, self.grid.0)
    }
}

/// Classification of a cell.
///
/// `Empty`, `Barrier`, `Start` and `End` are written by edits. `Open`,
/// `Closed` and `Path` form the search trace and never overwrite an
/// endpoint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Discovered, waiting in the frontier.
    Open,
    /// Expanded; its neighbours have been considered.
    Closed,
    /// On the reconstructed shortest path.
    Path,
}

impl CellKind {
    /// Whether this kind is written by the search rather than by edits.
    #[inline]
    pub const fn is_trace(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Whether this kind marks a search endpoint.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// A single grid position.
#[derive(Clone, Debug)]
pub struct Cell {
    id: CellId,
    pos: Coord,
    kind: CellKind,
    pub(crate) neighbors: Vec<CellId>,
}

impl Cell {
    pub(crate) fn new(id: CellId, pos: Coord) -> Self {
        Self {
            id,
            pos,
            kind: CellKind::Empty,
            neighbors: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Coord {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.kind == CellKind::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.kind == CellKind::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == CellKind::End
    }

    /// Adjacency as of the last [`Grid::prepare_for_search`].
    #[inline]
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// Set the classification. Trace kinds leave a Start or End cell
    /// untouched. Returns whether the kind changed.
    pub(crate) fn classify(&mut self, kind: CellKind) -> bool {
        if kind.is_trace() && self.kind.is_endpoint() {
            return false;
        }
        let changed = self.kind != kind;
        self.kind = kind;
        changed
    }

    pub(crate) fn mark_open(&mut self) {
        self.classify(CellKind::Open);
    }

    pub(crate) fn mark_closed(&mut self) {
        self.classify(CellKind::Closed);
    }

    pub(crate) fn mark_path(&mut self) {
        self.classify(CellKind::Path);
    }

    /// Back to `Empty`, whatever the current kind.
    pub(crate) fn reset(&mut self) {
        self.kind = CellKind::Empty;
    }

    /// Compute this cell's adjacency in `grid`: the cells one row below, one
    /// row above, one column right and one column left, skipping anything
    /// out of bounds or currently a barrier.
    pub fn compute_neighbors(&self, grid: &Grid) -> Vec<CellId> {
        self.pos
            .neighbors_4()
            .into_iter()
            .filter_map(|p| grid.cell_at(p.row, p.col).ok())
            .filter(|c| !c.is_barrier())
            .map(Cell::id)
            .collect()
    }
}
