//! **gridstar-core**: A* shortest-path search on a square grid.
//!
//! The crate models a `rows × rows` [`Grid`] of [`Cell`]s, each carrying a
//! [`CellKind`] classification, and runs A* between two cells with the
//! Manhattan heuristic and unit step cost. The search writes its progress
//! into the grid (Open, Closed and Path marks) and reports every step to an
//! optional [`Observer`], so a front end can animate it without the core
//! knowing anything about drawing.
//!
//! # Typical use
//!
//! ```
//! use gridstar_core::{CellKind, Grid, SearchOutcome, search};
//!
//! let mut grid = Grid::new(5);
//! let start = grid.id_at(0, 0)?;
//! let end = grid.id_at(4, 4)?;
//! grid.classify(start, CellKind::Start)?;
//! grid.classify(end, CellKind::End)?;
//! grid.classify(grid.id_at(2, 2)?, CellKind::Barrier)?;
//!
//! grid.prepare_for_search();
//! match search(&mut grid, start, end)? {
//!     SearchOutcome::Found(path) => assert_eq!(path.len(), 8),
//!     SearchOutcome::NotFound => unreachable!(),
//! }
//! # Ok::<(), gridstar_core::Error>(())
//! ```
//!
//! Frontier ties on `f` are broken by insertion order, so a fixed grid and
//! edit sequence always produces the same expansion order and path.

mod astar;
mod cell;
mod error;
mod frontier;
mod geom;
mod grid;
mod heuristic;
mod path;

pub use astar::{Observer, Quiet, SearchOutcome, Step, search, search_with};
pub use cell::{Cell, CellId, CellKind};
pub use error::{Error, Result};
pub use frontier::UNREACHABLE;
pub use geom::Coord;
pub use grid::Grid;
pub use heuristic::manhattan;
pub use path::Path;
