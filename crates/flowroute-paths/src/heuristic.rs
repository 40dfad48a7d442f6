//! Distance heuristics over absolute coordinate differences.

use std::fmt;
use std::str::FromStr;

use flowroute_core::{DiagonalMovement, Point};

use crate::error::FinderError;

/// Manhattan (L1) distance: `dx + dy`.
#[inline]
pub fn manhattan(dx: f64, dy: f64) -> f64 {
    dx + dy
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

/// Octile distance: exact cost on an open 8-connected grid where diagonal
/// steps cost √2.
#[inline]
pub fn octile(dx: f64, dy: f64) -> f64 {
    let f = std::f64::consts::SQRT_2 - 1.0;
    if dx < dy { f * dx + dy } else { f * dy + dx }
}

/// Chebyshev (L∞) distance: `max(dx, dy)`.
#[inline]
pub fn chebyshev(dx: f64, dy: f64) -> f64 {
    dx.max(dy)
}

/// A named heuristic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Octile,
    Chebyshev,
}

impl Heuristic {
    /// Manhattan when diagonal steps are forbidden, octile otherwise.
    pub const fn for_movement(policy: DiagonalMovement) -> Self {
        if policy.allows_diagonal() {
            Self::Octile
        } else {
            Self::Manhattan
        }
    }

    /// Evaluate on absolute differences.
    #[inline]
    pub fn eval(self, dx: f64, dy: f64) -> f64 {
        match self {
            Self::Manhattan => manhattan(dx, dy),
            Self::Euclidean => euclidean(dx, dy),
            Self::Octile => octile(dx, dy),
            Self::Chebyshev => chebyshev(dx, dy),
        }
    }

    /// Evaluate between two grid points.
    #[inline]
    pub fn between(self, a: Point, b: Point) -> f64 {
        let d = (a - b).abs();
        self.eval(f64::from(d.x), f64::from(d.y))
    }
}

impl FromStr for Heuristic {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Self::Manhattan),
            "euclidean" => Ok(Self::Euclidean),
            "octile" => Ok(Self::Octile),
            "chebyshev" => Ok(Self::Chebyshev),
            _ => Err(FinderError::UnknownHeuristic(s.to_string())),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Octile => "octile",
            Self::Chebyshev => "chebyshev",
        };
        f.write_str(name)
    }
}
