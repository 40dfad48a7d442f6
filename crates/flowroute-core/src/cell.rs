//! The [`Cell`] type, one grid square and its walkability.

use crate::geom::Point;

/// A grid cell: its coordinates and whether a path may pass through it.
///
/// Search bookkeeping (costs, parents, open/closed marks) is deliberately not
/// stored here; each search owns its own state indexed by cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub walkable: bool,
}

impl Cell {
    /// A walkable cell at `pos`.
    #[inline]
    pub const fn open(pos: Point) -> Self {
        Self {
            pos,
            walkable: true,
        }
    }

    /// Set walkability (builder).
    #[inline]
    pub const fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }
}
