//! Grid coordinate type.

use std::fmt;

/// A `(row, col)` position on the floor grid.
///
/// Ordering is lexicographic on `(row, col)`, which is also the order of the
/// row-major [`CellId`](crate::CellId)s the floor graph assigns.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: u32,
    pub col: u32,
}

impl Coord {
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for Coord {
    #[inline]
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
