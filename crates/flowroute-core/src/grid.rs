//! The [`Grid`] type: a fixed-size 2D array of walkable or blocked cells.
//!
//! Unlike a view type, a `Grid` owns its storage: cloning produces an
//! independent copy that can be mutated without affecting the original.

use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::diagonal::DiagonalMovement;
use crate::error::GridError;
use crate::geom::{Point, Range};

const UP: Point = Point::new(0, -1);
const RIGHT: Point = Point::new(1, 0);
const DOWN: Point = Point::new(0, 1);
const LEFT: Point = Point::new(-1, 0);

/// A `width × height` walkability grid.
///
/// Coordinates outside `[0, width) × [0, height)` are never walkable; every
/// accessor bounds-checks instead of panicking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    bounds: Range,
    walkable: Vec<bool>,
}

/// Unchecked serialized form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    bounds: Range,
    walkable: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.bounds.len();
        if raw.bounds.min != Point::ZERO || raw.walkable.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                found: raw.walkable.len(),
            });
        }
        Ok(Self {
            bounds: raw.bounds,
            walkable: raw.walkable,
        })
    }
}

impl Grid {
    /// Create a grid of the given dimensions with every cell walkable.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            bounds,
            walkable: vec![true; bounds.len()],
        }
    }

    /// Build a grid from a row-major matrix where `true` marks a blocked cell.
    ///
    /// Every row must have the same length as the first one.
    pub fn from_matrix<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut grid = Grid::new(width as i32, height as i32);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedMatrix {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &blocked) in row.iter().enumerate() {
                if blocked {
                    grid.walkable[y * width + x] = false;
                }
            }
        }
        Ok(grid)
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn is_inside(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.is_inside(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Inverse of [`index`](Grid::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, or `None` outside the grid.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| Cell {
            pos: p,
            walkable: self.walkable[i],
        })
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable_at(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.walkable[i])
    }

    /// Set walkability of `p`. Returns `false` (and does nothing) if `p` is
    /// outside the grid.
    pub fn set_walkable_at(&mut self, p: Point, walkable: bool) -> bool {
        match self.index(p) {
            Some(i) => {
                self.walkable[i] = walkable;
                true
            }
            None => false,
        }
    }

    /// Append the legal neighbours of `p` under `policy` into `buf`.
    ///
    /// Orthogonal neighbours come first (up, right, down, left), followed by
    /// the diagonals the policy admits (up-left, up-right, down-right,
    /// down-left). The caller clears `buf` before calling.
    pub fn neighbors_into(&self, p: Point, policy: DiagonalMovement, buf: &mut Vec<Point>) {
        let mut open = [false; 4];
        for (i, dir) in [UP, RIGHT, DOWN, LEFT].into_iter().enumerate() {
            let n = p + dir;
            if self.is_walkable_at(n) {
                buf.push(n);
                open[i] = true;
            }
        }
        if !policy.allows_diagonal() {
            return;
        }
        let [up, right, down, left] = open;
        let diagonals = [
            (left, up, LEFT + UP),
            (up, right, UP + RIGHT),
            (right, down, RIGHT + DOWN),
            (down, left, DOWN + LEFT),
        ];
        for (a, b, dir) in diagonals {
            let n = p + dir;
            if policy.permits(a, b) && self.is_walkable_at(n) {
                buf.push(n);
            }
        }
    }

    /// The legal neighbours of `p` under `policy`.
    pub fn neighbors(&self, p: Point, policy: DiagonalMovement) -> Vec<Point> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors_into(p, policy, &mut buf);
        buf
    }

    /// Whether `from → to` is a single legal step under `policy`.
    pub fn is_legal_step(&self, from: Point, to: Point, policy: DiagonalMovement) -> bool {
        let d = to - from;
        if d.x.abs() > 1 || d.y.abs() > 1 || d == Point::ZERO {
            return false;
        }
        self.neighbors(from, policy).contains(&to)
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bounds
            .iter()
            .zip(self.walkable.iter())
            .map(|(pos, &walkable)| Cell { pos, walkable })
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.walkable.iter().filter(|w| !**w).count()
    }
}

impl fmt::Display for Grid {
    /// Renders `.` for walkable and `#` for blocked cells, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let c = if self.is_walkable_at(Point::new(x, y)) { '.' } else { '#' };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse the [`Display`](fmt::Display) form. Blank lines and surrounding
    /// whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (y, line) in s.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    '.' => Ok(false),
                    '#' => Ok(true),
                    _ => Err(GridError::InvalidChar { ch, x, y }),
                })
                .collect::<Result<Vec<bool>, _>>()?;
            rows.push(row);
        }
        Grid::from_matrix(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DiagonalMovement::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn new_grid_is_walkable() {
        let g = Grid::new(4, 3);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.len(), 12);
        assert!(g.iter().all(|c| c.walkable));
    }

    #[test]
    fn out_of_bounds_is_not_walkable() {
        let mut g = Grid::new(2, 2);
        assert!(!g.is_walkable_at(Point::new(-1, 0)));
        assert!(!g.is_walkable_at(Point::new(2, 0)));
        assert!(!g.is_walkable_at(Point::new(0, 2)));
        assert!(g.cell(Point::new(5, 5)).is_none());
        assert!(!g.set_walkable_at(Point::new(5, 5), false));
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid::new(3, 3);
        assert!(g.set_walkable_at(Point::new(1, 2), false));
        assert_eq!(
            g.cell(Point::new(1, 2)),
            Some(Cell::open(Point::new(1, 2)).with_walkable(false))
        );
        assert_eq!(g.blocked_count(), 1);
        assert_eq!(g.point(g.index(Point::new(1, 2)).unwrap()), Point::new(1, 2));
    }

    #[test]
    fn from_matrix_marks_blocked() {
        let g = Grid::from_matrix(&[[false, true], [false, false]]).unwrap();
        assert!(!g.is_walkable_at(Point::new(1, 0)));
        assert!(g.is_walkable_at(Point::new(0, 1)));
    }

    #[test]
    fn from_matrix_rejects_ragged_rows() {
        let rows = vec![vec![false, false], vec![false]];
        assert_eq!(
            Grid::from_matrix(&rows),
            Err(GridError::RaggedMatrix {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn parse_and_display_round_trip() {
        let text = "..#\n#..";
        let g: Grid = text.parse().unwrap();
        assert_eq!(g.to_string(), text);
        assert!(matches!(
            "..x".parse::<Grid>(),
            Err(GridError::InvalidChar { ch: 'x', x: 2, y: 0 })
        ));
    }

    #[test]
    fn clone_is_independent() {
        let g = Grid::new(2, 2);
        let mut c = g.clone();
        c.set_walkable_at(Point::new(0, 0), false);
        assert!(g.is_walkable_at(Point::new(0, 0)));
        assert!(!c.is_walkable_at(Point::new(0, 0)));
    }

    #[test]
    fn neighbors_open_field() {
        let g = Grid::new(3, 3);
        let c = Point::new(1, 1);
        assert_eq!(g.neighbors(c, Never), pts(&[(1, 0), (2, 1), (1, 2), (0, 1)]));
        assert_eq!(
            g.neighbors(c, Always),
            pts(&[(1, 0), (2, 1), (1, 2), (0, 1), (0, 0), (2, 0), (2, 2), (0, 2)])
        );
    }

    #[test]
    fn neighbors_at_corner() {
        let g = Grid::new(3, 3);
        assert_eq!(g.neighbors(Point::ZERO, Always), pts(&[(1, 0), (0, 1), (1, 1)]));
    }

    #[test]
    fn corner_cutting_rules() {
        // Up and left of the centre are blocked.
        let g: Grid = "
            .#.
            #..
            ...
        "
        .parse()
        .unwrap();
        let c = Point::new(1, 1);

        // Always: every walkable diagonal.
        assert_eq!(
            g.neighbors(c, Always),
            pts(&[(2, 1), (1, 2), (0, 0), (2, 0), (2, 2), (0, 2)])
        );
        // At most one obstacle: up-left squeezes between two walls.
        assert_eq!(
            g.neighbors(c, IfAtMostOneObstacle),
            pts(&[(2, 1), (1, 2), (2, 0), (2, 2), (0, 2)])
        );
        // No obstacles: only down-right has both sides open.
        assert_eq!(
            g.neighbors(c, OnlyWhenNoObstacles),
            pts(&[(2, 1), (1, 2), (2, 2)])
        );
        assert_eq!(g.neighbors(c, Never), pts(&[(2, 1), (1, 2)]));
    }

    #[test]
    fn legal_step() {
        let g: Grid = "
            .#
            ..
        "
        .parse()
        .unwrap();
        let a = Point::new(0, 0);
        let b = Point::new(1, 1);
        assert!(g.is_legal_step(a, b, Always));
        assert!(g.is_legal_step(a, b, IfAtMostOneObstacle));
        assert!(!g.is_legal_step(a, b, OnlyWhenNoObstacles));
        assert!(!g.is_legal_step(a, b, Never));
        assert!(!g.is_legal_step(a, Point::new(0, 2), Always));
        assert!(!g.is_legal_step(a, a, Always));
    }
}
