use flowroute_paths::FinderError;
use thiserror::Error;

/// Errors raised while configuring an [`EdgeRouter`](crate::EdgeRouter).
///
/// An edge with no obstacle-free route is not an error: the router falls
/// back to a direct [`Arrow`](crate::Arrow).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),
    #[error("invalid arrow options: {0}")]
    InvalidArrowOptions(&'static str),
    #[error("unknown endpoint position {0:?}")]
    UnknownPosition(String),
    #[error(transparent)]
    Finder(#[from] FinderError),
}
