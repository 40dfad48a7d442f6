//! **flowroute-core**: geometry and walkability grid for edge routing.
//!
//! This crate provides the foundational types shared across the *flowroute*
//! crates: integer grid coordinates, world-space vectors, the diagonal
//! movement policy, and the [`Grid`] that searches run on.

pub mod cell;
pub mod diagonal;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use diagonal::DiagonalMovement;
pub use error::GridError;
pub use geom::{Point, Range, RangeIter, Vec2};
pub use grid::Grid;
