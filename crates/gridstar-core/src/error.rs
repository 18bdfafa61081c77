//! Error types for gridstar-core

use crate::cell::CellId;
use crate::geom::Coord;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations and bad lookups.
///
/// A search that finds no path is not an error; see
/// [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Row or column outside `0..rows`
    #[error("cell ({row}, {col}) is outside the {rows}x{rows} grid")]
    OutOfRange {
        /// Requested row
        row: i32,
        /// Requested column
        col: i32,
        /// Grid side length
        rows: usize,
    },

    /// Handle issued by a different (or rebuilt) grid
    #[error("cell {0} does not belong to this grid")]
    ForeignCell(CellId),

    /// Start and end name the same cell
    #[error("start and end are the same cell {0}")]
    SameEndpoints(Coord),

    /// Adjacency was never computed
    #[error("adjacency has not been computed, call prepare_for_search first")]
    NotPrepared,

    /// Barriers changed after adjacency was computed
    #[error("barriers changed since adjacency was last computed")]
    StaleAdjacency,
}
