use crate::geom::Coord;

/// Manhattan (L1) distance between two coordinates.
///
/// Exact on an unobstructed 4-connected unit-cost grid and never an
/// overestimate otherwise, so A* stays optimal with it.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    (a.row - b.row).unsigned_abs() + (a.col - b.col).unsigned_abs()
}
