//! Turning obstacle boxes and two ports into a routing grid.

use std::fmt;
use std::str::FromStr;

use flowroute_core::{Grid, Point, Vec2};

use crate::bounds::{Bounds, GraphBounds};
use crate::error::RouteError;

/// The side of its node a connector leaves from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Position {
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    pub const ALL: [Position; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Unit step pointing away from the node.
    pub const fn delta(self) -> Point {
        match self {
            Self::Top => Point::new(0, -1),
            Self::Bottom => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// The cell one step outward from `p`.
    pub fn step(self, p: Point) -> Point {
        p + self.delta()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for Position {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| RouteError::UnknownPosition(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A connector port: world position plus exit direction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    pub pos: Vec2,
    pub position: Position,
}

impl Endpoint {
    pub const fn new(x: f64, y: f64, position: Position) -> Self {
        Self {
            pos: Vec2::new(x, y),
            position,
        }
    }
}

/// Mapping between world coordinates and grid cells.
///
/// Cell `(0, 0)` covers the square whose top-left corner is `origin`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridFrame {
    origin: Vec2,
    cell_size: f64,
}

impl GridFrame {
    pub const fn new(origin: Vec2, cell_size: f64) -> Self {
        Self { origin, cell_size }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Nearest cell corner to `world`.
    pub fn to_cell(&self, world: Vec2) -> Point {
        self.cell_with(world, f64::round)
    }

    /// World position of the top-left corner of `cell`.
    pub fn to_world(&self, cell: Point) -> Vec2 {
        Vec2::new(
            self.origin.x + cell.x as f64 * self.cell_size,
            self.origin.y + cell.y as f64 * self.cell_size,
        )
    }

    fn cell_with(&self, world: Vec2, f: fn(f64) -> f64) -> Point {
        let x = f((world.x - self.origin.x) / self.cell_size);
        let y = f((world.y - self.origin.y) / self.cell_size);
        Point::new(x as i32, y as i32)
    }
}

/// A grid ready for searching, with the cells the search runs between.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutingGrid {
    pub grid: Grid,
    pub frame: GridFrame,
    /// Cell one step outward from the source port.
    pub start: Point,
    /// Cell one step outward from the target port.
    pub end: Point,
}

/// Rasterise `bounds` at `cell_size` and prepare both ports.
///
/// Every cell an obstacle box covers is blocked. Each port is rounded to
/// its nearest cell, freed with [`guarantee_walkable`], and the search
/// endpoint is placed one step outward from it. Returns `None` if a port
/// cannot be freed without leaving the grid.
pub fn build_grid(
    bounds: &Bounds,
    cell_size: f64,
    source: &Endpoint,
    target: &Endpoint,
) -> Option<RoutingGrid> {
    let mut grid = empty_grid(&bounds.graph, cell_size);
    let frame = GridFrame::new(bounds.graph.min, cell_size);

    for bb in &bounds.nodes {
        let from = frame.cell_with(bb.top_left, f64::floor);
        let to = frame.cell_with(bb.bottom_right, f64::ceil);
        for y in from.y..to.y {
            for x in from.x..to.x {
                grid.set_walkable_at(Point::new(x, y), false);
            }
        }
    }

    let source_cell = frame.to_cell(source.pos);
    let target_cell = frame.to_cell(target.pos);
    guarantee_walkable(&mut grid, source_cell, source.position)?;
    guarantee_walkable(&mut grid, target_cell, target.position)?;

    Some(RoutingGrid {
        grid,
        frame,
        start: source.position.step(source_cell),
        end: target.position.step(target_cell),
    })
}

fn empty_grid(graph: &GraphBounds, cell_size: f64) -> Grid {
    let w = (graph.width() / cell_size).ceil() as i32;
    let h = (graph.height() / cell_size).ceil() as i32;
    Grid::new(w, h)
}

/// Walk from `from` in the `exit` direction, unblocking every cell on the
/// way, and return the first cell that was already walkable.
///
/// Returns `None`, leaving the cells already freed walkable, if the walk
/// leaves the grid first.
pub fn guarantee_walkable(grid: &mut Grid, from: Point, exit: Position) -> Option<Point> {
    let mut p = from;
    while grid.is_inside(p) {
        if grid.is_walkable_at(p) {
            return Some(p);
        }
        grid.set_walkable_at(p, true);
        p = exit.step(p);
    }
    log::warn!(
        "port at {from} walked off the {}x{} grid heading {exit}",
        grid.width(),
        grid.height()
    );
    None
}
