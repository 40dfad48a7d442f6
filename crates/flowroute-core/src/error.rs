use thiserror::Error;

/// Errors raised while constructing a [`Grid`](crate::Grid) or parsing grid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Matrix rows differ in length from the first row.
    #[error("matrix size does not fit: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Cell storage does not match the grid dimensions, or the grid does
    /// not start at the origin.
    #[error("grid holds {found} cells, dimensions need {expected}")]
    SizeMismatch { expected: usize, found: usize },
    /// A character other than `.` or `#` in a textual grid.
    #[error("grid map contains invalid character {ch:?} at ({x}, {y})")]
    InvalidChar { ch: char, x: usize, y: usize },
    /// A diagonal-movement code or name that names no policy.
    #[error("incorrect value of diagonal movement: {0:?}")]
    InvalidDiagonalMovement(String),
}
