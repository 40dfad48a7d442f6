use flowroute_core::GridError;
use thiserror::Error;

/// Errors raised while configuring a [`Finder`](crate::Finder).
///
/// Failing to find a path is not an error; searches return an empty path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinderError {
    /// Heuristic weight must be finite and strictly positive.
    #[error("heuristic weight must be finite and positive, got {0}")]
    InvalidWeight(f64),
    #[error("unknown heuristic {0:?}")]
    UnknownHeuristic(String),
    #[error("unknown search algorithm {0:?}")]
    UnknownAlgorithm(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}
