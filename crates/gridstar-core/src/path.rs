//! Predecessor maps, path reconstruction and the resulting [`Path`].

use crate::cell::{CellId, GridTag};
use crate::error::Result;
use crate::geom::Coord;
use crate::grid::Grid;

/// Maps each reached cell to the cell it was reached from on its best known
/// path. Produced by the search; consumed by `reconstruct`.
#[derive(Clone, Debug)]
pub(crate) struct PredecessorMap {
    grid: GridTag,
    parents: Vec<Option<usize>>,
}

impl PredecessorMap {
    pub(crate) fn new(grid: &Grid) -> Self {
        Self {
            grid: grid.tag(),
            parents: vec![None; grid.len()],
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, idx: usize, parent: usize) {
        self.parents[idx] = Some(parent);
    }

    /// Predecessor of `id`, or `None` for the start, unreached cells and ids
    /// of another grid.
    pub(crate) fn get(&self, id: CellId) -> Option<CellId> {
        if id.grid != self.grid {
            return None;
        }
        let parent = (*self.parents.get(id.index)?)?;
        Some(CellId {
            grid: self.grid,
            index: parent,
        })
    }
}

/// One-shot walk from the goal back towards the start.
///
/// Yields the goal first, then each predecessor, marking every yielded cell
/// Path as it goes (Start and End keep their kind). The start itself is never
/// yielded, so the number of items is the path's edge count.
pub(crate) struct Reconstruct<'g> {
    grid: &'g mut Grid,
    came_from: PredecessorMap,
    next: Option<usize>,
}

/// Begin reconstructing the path ending at `end`.
pub(crate) fn reconstruct(
    grid: &mut Grid,
    came_from: PredecessorMap,
    end: CellId,
) -> Result<Reconstruct<'_>> {
    let end = grid.check(end)?;
    let next = match came_from.parents.get(end) {
        Some(Some(_)) if came_from.grid == grid.tag() => Some(end),
        _ => None,
    };
    Ok(Reconstruct {
        grid,
        came_from,
        next,
    })
}

impl Reconstruct<'_> {
    /// Read access to the grid between steps.
    pub(crate) fn grid(&self) -> &Grid {
        self.grid
    }
}

impl Iterator for Reconstruct<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        let current = self.next.take()?;
        self.grid.cell_mut(current).mark_path();
        // the start has no predecessor and ends the walk without being
        // yielded
        if let Some(parent) = self.came_from.parents[current] {
            if self.came_from.parents[parent].is_some() {
                self.next = Some(parent);
            }
        }
        Some(self.grid.cell_by_index(current).id())
    }
}

/// A shortest path, ordered from start to end inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Coord>) -> Self {
        Self { cells }
    }

    /// Number of steps (edges), one less than the number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells from start to end.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.cells.contains(&pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    /// Chain (0,0) -> (0,1) -> (0,2) -> (1,2) by hand.
    fn chain(g: &Grid) -> PredecessorMap {
        let mut m = PredecessorMap::new(g);
        let i = |r, c| g.id_at(r, c).unwrap().index();
        m.set(i(0, 1), i(0, 0));
        m.set(i(0, 2), i(0, 1));
        m.set(i(1, 2), i(0, 2));
        m
    }

    #[test]
    fn walk_yields_end_then_predecessors_without_start() {
        let mut g = Grid::new(3);
        let start = g.id_at(0, 0).unwrap();
        let end = g.id_at(1, 2).unwrap();
        g.classify(start, CellKind::Start).unwrap();
        g.classify(end, CellKind::End).unwrap();
        let m = chain(&g);

        let walked: Vec<Coord> = {
            let ids: Vec<CellId> = reconstruct(&mut g, m, end).unwrap().collect();
            ids.into_iter().map(|id| g.cell(id).unwrap().pos()).collect()
        };
        assert_eq!(
            walked,
            vec![Coord::new(1, 2), Coord::new(0, 2), Coord::new(0, 1)]
        );
        assert_eq!(g.count(CellKind::Path), 2);
        assert!(g.cell(start).unwrap().is_start());
        assert!(g.cell(end).unwrap().is_end());
    }

    #[test]
    fn marks_are_applied_lazily() {
        let mut g = Grid::new(3);
        let end = g.id_at(1, 2).unwrap();
        let m = chain(&g);
        let mut walk = reconstruct(&mut g, m, end).unwrap();
        walk.next();
        assert_eq!(walk.grid().count(CellKind::Path), 1);
        walk.next();
        assert_eq!(walk.grid().count(CellKind::Path), 2);
        assert!(walk.next().is_some());
        assert_eq!(walk.grid().count(CellKind::Path), 3);
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn unreached_end_yields_nothing() {
        let mut g = Grid::new(3);
        let m = PredecessorMap::new(&g);
        let end = g.id_at(2, 2).unwrap();
        assert_eq!(reconstruct(&mut g, m, end).unwrap().count(), 0);
    }

    #[test]
    fn predecessor_lookup() {
        let g = Grid::new(3);
        let m = chain(&g);
        assert_eq!(m.get(g.id_at(0, 1).unwrap()), Some(g.id_at(0, 0).unwrap()));
        assert_eq!(m.get(g.id_at(0, 0).unwrap()), None);
        let other = Grid::new(3);
        assert_eq!(m.get(other.id_at(0, 1).unwrap()), None);
    }

    #[test]
    fn path_len_counts_edges() {
        let p = Path::new(vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.start(), Some(Coord::new(0, 0)));
        assert_eq!(p.end(), Some(Coord::new(1, 1)));
        assert!(p.contains(Coord::new(0, 1)));
        assert!(Path::new(vec![]).is_empty());
    }
}
