//! A* search over a prepared [`Grid`].

use std::ops::ControlFlow;

use crate::cell::{CellId, CellKind};
use crate::error::{Error, Result};
use crate::frontier::{Frontier, UNREACHABLE};
use crate::grid::Grid;
use crate::heuristic::manhattan;
use crate::path::{Path, PredecessorMap, reconstruct};

/// What the engine just did, reported to an [`Observer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was popped from the frontier and its neighbours considered.
    Expanded(CellId),
    /// A cell was walked during path reconstruction.
    Traced(CellId),
}

/// Synchronous hook called after every engine step, typically to redraw.
///
/// Returning [`ControlFlow::Break`] cancels the search; it then returns
/// [`SearchOutcome::NotFound`] and the marks applied so far stay in place.
pub trait Observer {
    /// Called with the grid as it stands after `step`.
    fn on_step(&mut self, grid: &Grid, step: Step) -> ControlFlow<()>;
}

impl<F> Observer for F
where
    F: FnMut(&Grid, Step) -> ControlFlow<()>,
{
    fn on_step(&mut self, grid: &Grid, step: Step) -> ControlFlow<()> {
        self(grid, step)
    }
}

/// An observer that never interrupts.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quiet;

impl Observer for Quiet {
    #[inline]
    fn on_step(&mut self, _grid: &Grid, _step: Step) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Result of a well-formed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A shortest path from start to end.
    Found(Path),
    /// The frontier ran dry, or the observer cancelled.
    NotFound,
}

impl SearchOutcome {
    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Consume the outcome, returning the path if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// Run A* from `start` to `end` without an observer.
pub fn search(grid: &mut Grid, start: CellId, end: CellId) -> Result<SearchOutcome> {
    search_with(grid, start, end, &mut Quiet)
}

/// Run A* from `start` to `end`, calling `observer` once per expanded cell
/// and once per reconstructed path cell.
///
/// Both ids must belong to `grid`, must differ, and
/// [`Grid::prepare_for_search`] must have run since the last barrier edit.
/// The engine writes Open, Closed and Path marks into the grid as it goes.
/// When the grid has no End cell the reached goal becomes it; an existing
/// End elsewhere is left alone.
pub fn search_with<O: Observer + ?Sized>(
    grid: &mut Grid,
    start: CellId,
    end: CellId,
    observer: &mut O,
) -> Result<SearchOutcome> {
    let start_idx = grid.check(start)?;
    let end_idx = grid.check(end)?;
    if start_idx == end_idx {
        return Err(Error::SameEndpoints(grid.cell_by_index(start_idx).pos()));
    }
    grid.ensure_prepared()?;

    let goal = grid.cell_by_index(end_idx).pos();
    let len = grid.len();

    let mut g = vec![UNREACHABLE; len];
    let mut f = vec![UNREACHABLE; len];
    let mut came_from = PredecessorMap::new(grid);
    let mut frontier = Frontier::new(len);

    g[start_idx] = 0;
    f[start_idx] = manhattan(grid.cell_by_index(start_idx).pos(), goal);
    frontier.seed(start_idx, f[start_idx]);

    log::debug!(
        "search {} -> {} on {}x{} grid",
        grid.cell_by_index(start_idx).pos(),
        goal,
        grid.rows(),
        grid.rows()
    );

    let mut expanded = 0usize;
    let mut nbuf: Vec<CellId> = Vec::with_capacity(4);

    while let Some(entry) = frontier.pop() {
        let ci = entry.idx;

        if ci == end_idx {
            log::debug!("reached goal after {expanded} expansions");
            return finish(grid, came_from, end, observer);
        }

        expanded += 1;
        let current_g = g[ci];
        log::trace!(
            "expand {} g={} f={} order={} frontier={}",
            grid.cell_by_index(ci).pos(),
            current_g,
            entry.f,
            entry.order,
            frontier.len()
        );

        nbuf.clear();
        nbuf.extend_from_slice(grid.cell_by_index(ci).neighbors());

        for &nid in &nbuf {
            let ni = nid.index();
            let tentative = current_g + 1;
            if tentative >= g[ni] {
                continue;
            }

            came_from.set(ni, ci);
            g[ni] = tentative;
            f[ni] = tentative + manhattan(grid.cell_by_index(ni).pos(), goal);

            if !frontier.contains(ni) {
                frontier.push(ni, f[ni]);
                grid.cell_mut(ni).mark_open();
            }
        }

        if ci != start_idx {
            grid.cell_mut(ci).mark_closed();
        }

        let id = grid.cell_by_index(ci).id();
        if observer.on_step(grid, Step::Expanded(id)).is_break() {
            log::debug!("search cancelled after {expanded} expansions");
            return Ok(SearchOutcome::NotFound);
        }
    }

    log::debug!("no path after {expanded} expansions");
    Ok(SearchOutcome::NotFound)
}

/// Walk the predecessor map, notifying the observer per step, then restore
/// the goal's End mark and assemble the path.
fn finish<O: Observer + ?Sized>(
    grid: &mut Grid,
    came_from: PredecessorMap,
    end: CellId,
    observer: &mut O,
) -> Result<SearchOutcome> {
    let mut ids = Vec::new();
    let start = {
        let mut walk = reconstruct(grid, came_from.clone(), end)?;
        while let Some(id) = walk.next() {
            ids.push(id);
            if observer.on_step(walk.grid(), Step::Traced(id)).is_break() {
                log::debug!("reconstruction cancelled after {} cells", ids.len());
                return Ok(SearchOutcome::NotFound);
            }
        }
        ids.last().and_then(|&id| came_from.get(id))
    };

    if grid.end().is_none() && !grid.cell(end)?.kind().is_endpoint() {
        grid.classify(end, CellKind::End)?;
    }

    let mut cells = Vec::with_capacity(ids.len() + 1);
    if let Some(s) = start {
        cells.push(grid.cell(s)?.pos());
    }
    for id in ids.iter().rev() {
        cells.push(grid.cell(*id)?.pos());
    }
    let path = Path::new(cells);
    log::debug!("path of {} steps", path.len());
    Ok(SearchOutcome::Found(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Coord;

    fn prepared(rows: usize, barriers: &[(i32, i32)]) -> Grid {
        let mut g = Grid::new(rows);
        for &(r, c) in barriers {
            let id = g.id_at(r, c).unwrap();
            g.classify(id, CellKind::Barrier).unwrap();
        }
        g.prepare_for_search();
        g
    }

    fn endpoints(g: &mut Grid, s: (i32, i32), e: (i32, i32)) -> (CellId, CellId) {
        let s = g.id_at(s.0, s.1).unwrap();
        let e = g.id_at(e.0, e.1).unwrap();
        g.classify(s, CellKind::Start).unwrap();
        g.classify(e, CellKind::End).unwrap();
        (s, e)
    }

    #[test]
    fn open_five_by_five_corner_to_corner() {
        let mut g = prepared(5, &[]);
        let (s, e) = endpoints(&mut g, (0, 0), (4, 4));
        let path = search(&mut g, s, e).unwrap().into_path().unwrap();

        assert_eq!(path.len(), 8);
        assert_eq!(path.start(), Some(Coord::new(0, 0)));
        assert_eq!(path.end(), Some(Coord::new(4, 4)));
        for w in path.cells().windows(2) {
            assert_eq!(w[1].row + w[1].col, w[0].row + w[0].col + 1);
        }
        assert_eq!(g.count(CellKind::Path), 7);
        assert!(g.cell(s).unwrap().is_start());
        assert!(g.cell(e).unwrap().is_end());
    }

    #[test]
    fn wall_across_the_middle_blocks() {
        let mut g = prepared(3, &[(1, 0), (1, 1), (1, 2)]);
        let (s, e) = endpoints(&mut g, (0, 0), (2, 2));
        assert_eq!(search(&mut g, s, e).unwrap(), SearchOutcome::NotFound);
        assert_eq!(g.count(CellKind::Path), 0);
        // both reachable cells other than the start were expanded
        assert_eq!(g.count(CellKind::Closed), 2);
    }

    #[test]
    fn detour_around_wall() {
        // . . . .
        // # # # .
        // . . . .
        let mut g = prepared(4, &[(1, 0), (1, 1), (1, 2)]);
        let (s, e) = endpoints(&mut g, (0, 0), (2, 0));
        let path = search(&mut g, s, e).unwrap().into_path().unwrap();
        assert_eq!(path.len(), 8);
        assert!(path.contains(Coord::new(1, 3)));
    }

    #[test]
    fn contract_violations_are_errors() {
        let mut g = Grid::new(3);
        let a = g.id_at(0, 0).unwrap();
        let b = g.id_at(2, 2).unwrap();
        assert_eq!(search(&mut g, a, b), Err(Error::NotPrepared));

        g.prepare_for_search();
        assert_eq!(
            search(&mut g, a, a),
            Err(Error::SameEndpoints(Coord::new(0, 0)))
        );

        let other = Grid::new(3);
        let foreign = other.id_at(2, 2).unwrap();
        assert_eq!(search(&mut g, a, foreign), Err(Error::ForeignCell(foreign)));

        let mid = g.id_at(1, 1).unwrap();
        g.classify(mid, CellKind::Barrier).unwrap();
        assert_eq!(search(&mut g, a, b), Err(Error::StaleAdjacency));
        // rejected calls leave the grid untouched
        assert_eq!(g.count(CellKind::Open), 0);
        assert_eq!(g.count(CellKind::Closed), 0);
    }

    #[test]
    fn observer_sees_every_expansion_and_trace() {
        let mut g = prepared(3, &[]);
        let (s, e) = endpoints(&mut g, (0, 0), (0, 2));
        let mut steps = Vec::new();
        let outcome = search_with(&mut g, s, e, &mut |_: &Grid, step: Step| {
            steps.push(step);
            ControlFlow::Continue(())
        })
        .unwrap();

        let path = outcome.into_path().unwrap();
        assert_eq!(path.len(), 2);
        let expanded = steps
            .iter()
            .filter(|s| matches!(s, Step::Expanded(_)))
            .count();
        let traced: Vec<CellId> = steps
            .iter()
            .filter_map(|s| match s {
                Step::Traced(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(expanded, 2);
        assert_eq!(traced, vec![e, g.id_at(0, 1).unwrap()]);
    }

    #[test]
    fn expansion_order_breaks_ties_by_discovery() {
        // Every cell on an open 3x3 grid has f = 4 towards the far corner,
        // so expansion order is purely discovery order.
        let mut g = prepared(3, &[]);
        let (s, e) = endpoints(&mut g, (0, 0), (2, 2));
        let mut order = Vec::new();
        let outcome = search_with(&mut g, s, e, &mut |grid: &Grid, step: Step| {
            if let Step::Expanded(id) = step {
                order.push(grid.cell(id).unwrap().pos());
            }
            ControlFlow::Continue(())
        })
        .unwrap();

        let expected: Vec<Coord> = [(0, 0), (1, 0), (0, 1), (2, 0), (1, 1), (0, 2), (2, 1), (1, 2)]
            .into_iter()
            .map(Coord::from)
            .collect();
        assert_eq!(order, expected);

        let path: Vec<Coord> = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]
            .into_iter()
            .map(Coord::from)
            .collect();
        assert_eq!(outcome.path().unwrap().cells(), path.as_slice());
    }

    #[test]
    fn cancelling_keeps_trace_and_reports_not_found() {
        let mut g = prepared(6, &[]);
        let (s, e) = endpoints(&mut g, (0, 0), (5, 5));
        let mut seen = 0;
        let outcome = search_with(&mut g, s, e, &mut |_: &Grid, _: Step| {
            seen += 1;
            if seen == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(seen, 3);
        assert_eq!(g.count(CellKind::Closed), 2);
        assert!(g.count(CellKind::Open) > 0);
        assert_eq!(g.count(CellKind::Path), 0);
    }

    #[test]
    fn cancelling_during_reconstruction() {
        let mut g = prepared(3, &[]);
        let (s, e) = endpoints(&mut g, (0, 0), (2, 2));
        let outcome = search_with(&mut g, s, e, &mut |_: &Grid, step: Step| {
            if matches!(step, Step::Traced(_)) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert!(g.count(CellKind::Path) <= 1);
    }

    #[test]
    fn endpoints_need_not_be_classified() {
        let mut g = prepared(3, &[]);
        let a = g.id_at(0, 0).unwrap();
        let b = g.id_at(0, 2).unwrap();
        let path = search(&mut g, a, b).unwrap().into_path().unwrap();
        assert_eq!(path.len(), 2);
        // the goal is marked End once reached
        assert_eq!(g.end(), Some(b));
        assert_eq!(g.cell(a).unwrap().kind(), CellKind::Empty);
    }

    #[test]
    fn existing_end_elsewhere_is_kept() {
        let mut g = prepared(3, &[]);
        let (s, e) = endpoints(&mut g, (0, 0), (2, 2));
        let other = g.id_at(0, 2).unwrap();
        let path = search(&mut g, s, other).unwrap().into_path().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(g.end(), Some(e));
        assert_eq!(g.count(CellKind::End), 1);
        assert_eq!(g.cell(other).unwrap().kind(), CellKind::Path);
    }
}
