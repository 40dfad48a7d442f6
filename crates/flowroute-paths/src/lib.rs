//! Path search on walkability grids.
//!
//! This crate provides the search side of *flowroute*:
//!
//! - a comparator-ordered binary [`Heap`] with in-place key updates
//! - distance [`Heuristic`]s (manhattan, euclidean, octile, chebyshev)
//! - one [`Finder`] running any [`Algorithm`]: A*, Best-First, Breadth-First,
//!   Dijkstra, their bidirectional forms, IDA* and Jump Point Search
//! - path post-processing: [`interpolate`], [`expand_path`],
//!   [`smoothen_path`], [`compress_path`] and [`path_length`]
//!
//! Every search allocates its own bookkeeping; a [`Grid`](flowroute_core::Grid)
//! is only ever read, and "no path" is an empty `Vec`, not an error.
//!
//! ```
//! use flowroute_core::{DiagonalMovement, Grid, Point};
//! use flowroute_paths::{Algorithm, Finder, FinderOptions};
//!
//! let grid: Grid = "
//!     ..#..
//!     ..#..
//!     .....
//! "
//! .parse()
//! .unwrap();
//! let finder = Finder::new(FinderOptions::new(Algorithm::AStar, DiagonalMovement::Never)).unwrap();
//! let path = finder.find_path(&grid, Point::new(0, 0), Point::new(4, 0));
//! assert_eq!(path.len(), 9);
//! ```

mod astar;
mod bfs;
mod bidirectional;
mod error;
mod finder;
mod heap;
mod heuristic;
mod ida;
mod jps;
mod path;
mod state;

pub use error::FinderError;
pub use finder::{Algorithm, Finder, FinderOptions, SearchTrace};
pub use heap::Heap;
pub use heuristic::{Heuristic, chebyshev, euclidean, manhattan, octile};
pub use path::{compress_path, expand_path, interpolate, path_length, smoothen_path};

#[cfg(test)]
mod property_tests {
    use flowroute_core::{DiagonalMovement, Grid, Point};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;

    fn random_grid(rng: &mut StdRng, w: i32, h: i32, density: f64) -> Grid {
        let mut grid = Grid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if rng.random_bool(density) {
                    grid.set_walkable_at(Point::new(x, y), false);
                }
            }
        }
        grid
    }

    fn random_open_cell(rng: &mut StdRng, grid: &Grid) -> Option<Point> {
        let open: Vec<Point> = grid.iter().filter(|c| c.walkable).map(|c| c.pos).collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }

    #[test]
    fn every_variant_agrees_and_steps_legally() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..120 {
            let grid = random_grid(&mut rng, 9, 7, 0.3);
            let (Some(a), Some(b)) = (random_open_cell(&mut rng, &grid), random_open_cell(&mut rng, &grid))
            else {
                continue;
            };
            for policy in DiagonalMovement::ALL {
                let optimal = Finder::with_algorithm(Algorithm::Dijkstra, policy).find_path(&grid, a, b);
                let optimal_cost = path_length(&optimal);
                for algo in Algorithm::ALL {
                    let path = Finder::with_algorithm(algo, policy).find_path(&grid, a, b);
                    let ctx = format!("round {round}, {algo}, {policy}, {a} -> {b}\n{grid}");
                    assert_eq!(path.is_empty(), optimal.is_empty(), "{ctx}");
                    if path.is_empty() {
                        continue;
                    }
                    assert_eq!(path.first(), Some(&a), "{ctx}");
                    assert_eq!(path.last(), Some(&b), "{ctx}");
                    for w in path.windows(2) {
                        assert!(grid.is_legal_step(w[0], w[1], policy), "{ctx}: {w:?}");
                    }
                    assert!(optimal_cost <= path_length(&path) + 1e-9, "{ctx}");
                }
                let astar = Finder::with_algorithm(Algorithm::AStar, policy).find_path(&grid, a, b);
                assert!((path_length(&astar) - optimal_cost).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn smoothing_is_idempotent_and_clear() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let grid = random_grid(&mut rng, 12, 12, 0.25);
            let (Some(a), Some(b)) = (random_open_cell(&mut rng, &grid), random_open_cell(&mut rng, &grid))
            else {
                continue;
            };
            let path = Finder::with_algorithm(Algorithm::AStar, DiagonalMovement::Always)
                .find_path(&grid, a, b);
            let smooth = smoothen_path(&grid, &path);
            assert_eq!(smoothen_path(&grid, &smooth), smooth);
            for w in smooth.windows(2) {
                assert!(interpolate(w[0], w[1]).iter().all(|&p| grid.is_walkable_at(p)));
            }
            let compressed = compress_path(&smooth);
            assert_eq!(compress_path(&compressed), compressed);
        }
    }
}
