use flowroute_core::{DiagonalMovement, Point, Vec2};
use flowroute_paths::{Algorithm, Finder, FinderOptions, compress_path, smoothen_path};

use crate::arrow::{Arrow, ArrowOptions, arrow};
use crate::bounds::{NodeRect, bounding_boxes};
use crate::curve;
use crate::error::RouteError;
use crate::mapper::{Endpoint, build_grid};

/// Router settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// World size of one grid cell; node boxes are snapped to it as well.
    pub cell_size: f64,
    /// Clearance kept around every node.
    pub node_padding: f64,
    /// Free margin around the whole graph.
    pub graph_padding: f64,
    pub finder: FinderOptions,
    /// Shape of the direct arrow used when no routed path is drawn.
    pub arrow: ArrowOptions,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            node_padding: 10.0,
            graph_padding: 20.0,
            finder: FinderOptions::new(Algorithm::AStar, DiagonalMovement::Always),
            arrow: ArrowOptions::edge(),
        }
    }
}

/// How an edge ended up being drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgePath {
    /// Around obstacles: the world-space polyline from source to target and
    /// the smooth curve through it.
    Routed { waypoints: Vec<Vec2>, d: String },
    /// A single bowed curve straight between the ports.
    Direct(Arrow),
}

impl EdgePath {
    /// SVG path data for the edge.
    pub fn d(&self) -> String {
        match self {
            EdgePath::Routed { d, .. } => d.clone(),
            EdgePath::Direct(arrow) => arrow.to_path(),
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, EdgePath::Routed { .. })
    }
}

/// Routes edges between node ports around the other nodes.
///
/// Each call rebuilds the grid from the nodes it is given; nothing is kept
/// between calls.
#[derive(Clone, Debug)]
pub struct EdgeRouter {
    config: RouteConfig,
    finder: Finder,
}

impl EdgeRouter {
    pub fn new(config: RouteConfig) -> Result<Self, RouteError> {
        if !(config.cell_size.is_finite() && config.cell_size > 0.0) {
            return Err(RouteError::InvalidCellSize(config.cell_size));
        }
        config.arrow.validate()?;
        let finder = Finder::new(config.finder.clone())?;
        Ok(Self { config, finder })
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Route one edge.
    ///
    /// Falls back to [`EdgePath::Direct`] when there are no nodes, when a
    /// port cannot be freed, when no path exists, or when the smoothed path
    /// is a single straight leg.
    pub fn route(&self, nodes: &[NodeRect], source: &Endpoint, target: &Endpoint) -> EdgePath {
        let cells = self.cells(nodes, source, target);
        if cells.len() <= 2 {
            log::debug!(
                "edge {} -> {}: {} grid waypoints, drawing direct arrow",
                source.pos,
                target.pos,
                cells.len()
            );
            return EdgePath::Direct(arrow(source.pos, target.pos, &self.config.arrow));
        }

        let mut waypoints = Vec::with_capacity(cells.len() + 2);
        waypoints.push(source.pos);
        waypoints.extend(cells);
        waypoints.push(target.pos);
        let d = curve::through_points(&waypoints);
        EdgePath::Routed { waypoints, d }
    }

    /// Smoothed and compressed waypoints, in world space, between the two
    /// ports. The ports themselves are not included. Empty when no route
    /// exists.
    pub fn cells(&self, nodes: &[NodeRect], source: &Endpoint, target: &Endpoint) -> Vec<Vec2> {
        let cfg = &self.config;
        let Some(bounds) =
            bounding_boxes(nodes, cfg.node_padding, cfg.graph_padding, cfg.cell_size)
        else {
            return Vec::new();
        };
        let Some(rg) = build_grid(&bounds, cfg.cell_size, source, target) else {
            return Vec::new();
        };
        log::debug!(
            "routing on a {}x{} grid ({} blocked) from {} to {}",
            rg.grid.width(),
            rg.grid.height(),
            rg.grid.blocked_count(),
            rg.start,
            rg.end
        );

        let path = self.finder.find_path(&rg.grid, rg.start, rg.end);
        if path.is_empty() {
            log::debug!("no path from {} to {}", rg.start, rg.end);
            return Vec::new();
        }
        let path: Vec<Point> = compress_path(&smoothen_path(&rg.grid, &path));
        path.into_iter().map(|p| rg.frame.to_world(p)).collect()
    }
}
