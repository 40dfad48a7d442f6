use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use flowroute_core::{DiagonalMovement, Grid, Point};

use crate::error::FinderError;
use crate::heuristic::Heuristic;
use crate::state::SearchState;

/// Inflation applied to the heuristic by the best-first variants, large
/// enough that the cost already paid no longer matters.
const BEST_FIRST_FACTOR: f64 = 1_000_000.0;

/// The search strategy a [`Finder`] runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    /// Weighted A*, `f = g + weight·h`.
    #[default]
    AStar,
    /// A* with the heuristic inflated so the frontier is ordered by `h` alone.
    BestFirst,
    /// Unweighted FIFO expansion.
    BreadthFirst,
    /// Uniform-cost search (A* with a zero heuristic).
    Dijkstra,
    BiAStar,
    BiBestFirst,
    BiBreadthFirst,
    BiDijkstra,
    /// Iterative-deepening A*, optionally bounded by a time limit.
    IdaStar,
    /// Jump Point Search; the variant follows the diagonal policy.
    JumpPoint,
}

impl Algorithm {
    pub const ALL: [Algorithm; 10] = [
        Self::AStar,
        Self::BestFirst,
        Self::BreadthFirst,
        Self::Dijkstra,
        Self::BiAStar,
        Self::BiBestFirst,
        Self::BiBreadthFirst,
        Self::BiDijkstra,
        Self::IdaStar,
        Self::JumpPoint,
    ];

    /// Whether the search grows frontiers from both endpoints.
    pub const fn is_bidirectional(self) -> bool {
        matches!(
            self,
            Self::BiAStar | Self::BiBestFirst | Self::BiBreadthFirst | Self::BiDijkstra
        )
    }

    fn name(self) -> &'static str {
        match self {
            Self::AStar => "a_star",
            Self::BestFirst => "best_first",
            Self::BreadthFirst => "breadth_first",
            Self::Dijkstra => "dijkstra",
            Self::BiAStar => "bi_a_star",
            Self::BiBestFirst => "bi_best_first",
            Self::BiBreadthFirst => "bi_breadth_first",
            Self::BiDijkstra => "bi_dijkstra",
            Self::IdaStar => "ida_star",
            Self::JumpPoint => "jump_point",
        }
    }
}

impl FromStr for Algorithm {
    type Err = FinderError;

    /// Accepts the snake_case name or the finder name, e.g. `a_star`,
    /// `AStarFinder`, `jump-point`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .trim_end_matches("Finder")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let algo = match key.as_str() {
            "astar" => Self::AStar,
            "bestfirst" => Self::BestFirst,
            "breadthfirst" | "bfs" => Self::BreadthFirst,
            "dijkstra" => Self::Dijkstra,
            "biastar" => Self::BiAStar,
            "bibestfirst" => Self::BiBestFirst,
            "bibreadthfirst" => Self::BiBreadthFirst,
            "bidijkstra" => Self::BiDijkstra,
            "idastar" => Self::IdaStar,
            "jumppoint" | "jps" => Self::JumpPoint,
            _ => return Err(FinderError::UnknownAlgorithm(s.to_string())),
        };
        Ok(algo)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a [`Finder`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinderOptions {
    pub algorithm: Algorithm,
    pub diagonal_movement: DiagonalMovement,
    /// `None` picks manhattan without diagonals and octile with them.
    pub heuristic: Option<Heuristic>,
    /// Multiplier on the heuristic. Values above 1 trade optimality for
    /// fewer expansions.
    pub weight: f64,
    /// Wall-clock budget for [`Algorithm::IdaStar`]. Ignored by the others.
    pub time_limit: Option<Duration>,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            diagonal_movement: DiagonalMovement::Never,
            heuristic: None,
            weight: 1.0,
            time_limit: None,
        }
    }
}

impl FinderOptions {
    pub fn new(algorithm: Algorithm, diagonal_movement: DiagonalMovement) -> Self {
        Self {
            algorithm,
            diagonal_movement,
            ..Self::default()
        }
    }

    /// Options from the older `allow_diagonal` / `dont_cross_corners` pair.
    pub fn from_legacy_flags(
        algorithm: Algorithm,
        allow_diagonal: bool,
        dont_cross_corners: bool,
    ) -> Self {
        Self::new(
            algorithm,
            DiagonalMovement::from_flags(allow_diagonal, dont_cross_corners),
        )
    }

    /// Options from a numeric diagonal-movement code (1 always, 2 never,
    /// 3 if at most one obstacle, 4 only when no obstacles).
    pub fn from_code(algorithm: Algorithm, code: u8) -> Result<Self, FinderError> {
        Ok(Self::new(algorithm, DiagonalMovement::try_from(code)?))
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// The outcome of [`Finder::trace_path`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchTrace {
    /// The path found, start to goal, or empty.
    pub path: Vec<Point>,
    /// Every cell the search examined, in first-examined order.
    pub tested: Vec<Point>,
}

/// A configured path search.
///
/// A `Finder` holds no per-search state and can be reused across grids.
#[derive(Clone, Debug, PartialEq)]
pub struct Finder {
    algorithm: Algorithm,
    policy: DiagonalMovement,
    heuristic: Heuristic,
    weight: f64,
    time_limit: Option<Duration>,
}

impl Default for Finder {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            policy: DiagonalMovement::Never,
            heuristic: Heuristic::Manhattan,
            weight: 1.0,
            time_limit: None,
        }
    }
}

impl Finder {
    /// Validate `options` and build a finder.
    pub fn new(options: FinderOptions) -> Result<Self, FinderError> {
        if !options.weight.is_finite() || options.weight <= 0.0 {
            return Err(FinderError::InvalidWeight(options.weight));
        }
        let policy = options.diagonal_movement;
        Ok(Self {
            algorithm: options.algorithm,
            policy,
            heuristic: options
                .heuristic
                .unwrap_or_else(|| Heuristic::for_movement(policy)),
            weight: options.weight,
            time_limit: options.time_limit,
        })
    }

    /// Shorthand for an unweighted finder with the default heuristic.
    pub fn with_algorithm(algorithm: Algorithm, policy: DiagonalMovement) -> Self {
        Self {
            algorithm,
            policy,
            heuristic: Heuristic::for_movement(policy),
            ..Self::default()
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn diagonal_movement(&self) -> DiagonalMovement {
        self.policy
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Find a path from `start` to `goal`.
    ///
    /// The path includes both endpoints and every step in it is a legal
    /// neighbour transition under the finder's diagonal policy (jump point
    /// paths are expanded back into unit steps). An empty path means the
    /// goal is unreachable, an endpoint is blocked or outside the grid, or
    /// IDA* ran out of time.
    pub fn find_path(&self, grid: &Grid, start: Point, goal: Point) -> Vec<Point> {
        self.trace_path(grid, start, goal).path
    }

    /// Like [`find_path`](Finder::find_path), also returning the cells the
    /// search examined.
    pub fn trace_path(&self, grid: &Grid, start: Point, goal: Point) -> SearchTrace {
        if !grid.is_walkable_at(start) || !grid.is_walkable_at(goal) {
            return SearchTrace::default();
        }
        if start == goal {
            return SearchTrace {
                path: vec![start],
                tested: Vec::new(),
            };
        }
        let mut st = SearchState::new(grid, self.policy);
        let path = match self.algorithm {
            Algorithm::AStar | Algorithm::BestFirst | Algorithm::Dijkstra => {
                st.weighted(self, start, goal)
            }
            Algorithm::BiAStar | Algorithm::BiBestFirst | Algorithm::BiDijkstra => {
                st.bi_weighted(self, start, goal)
            }
            Algorithm::BreadthFirst => st.breadth_first(start, goal),
            Algorithm::BiBreadthFirst => st.bi_breadth_first(start, goal),
            Algorithm::IdaStar => st.ida_star(self, start, goal),
            Algorithm::JumpPoint => st.jump_point(self, start, goal),
        };
        let tested = st.tested();
        log::trace!(
            "{} search {start} -> {goal}: {} steps, {} cells tested",
            self.algorithm,
            path.len(),
            tested.len()
        );
        SearchTrace { path, tested }
    }

    /// Heuristic estimate from `from` to `to`, including weight and the
    /// variant's scaling.
    pub(crate) fn estimate(&self, from: Point, to: Point) -> f64 {
        let scale = match self.algorithm {
            Algorithm::Dijkstra | Algorithm::BiDijkstra => return 0.0,
            Algorithm::BestFirst | Algorithm::BiBestFirst => BEST_FIRST_FACTOR,
            _ => 1.0,
        };
        self.weight * scale * self.heuristic.between(from, to)
    }
}
