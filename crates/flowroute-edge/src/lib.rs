//! Obstacle-aware connector routing for node diagrams.
//!
//! Given the boxes of the rendered nodes and two ports, [`EdgeRouter`]
//! builds a walkability grid, searches it with a
//! [`Finder`](flowroute_paths::Finder), smooths the result and renders it
//! as SVG path data. When no detour is needed, or none exists, the edge is
//! drawn as a single bowed [`Arrow`] instead.
//!
//! ```
//! use flowroute_edge::{EdgeRouter, Endpoint, NodeRect, Position, RouteConfig};
//!
//! let router = EdgeRouter::new(RouteConfig::default()).unwrap();
//! let nodes = [
//!     NodeRect::new("a", 0.0, 0.0, 40.0, 40.0),
//!     NodeRect::new("b", 100.0, -40.0, 40.0, 120.0),
//!     NodeRect::new("c", 200.0, 0.0, 40.0, 40.0),
//! ];
//! let edge = router.route(
//!     &nodes,
//!     &Endpoint::new(40.0, 20.0, Position::Right),
//!     &Endpoint::new(200.0, 20.0, Position::Left),
//! );
//! assert!(edge.is_routed());
//! assert!(edge.d().starts_with("M40,20"));
//! ```

mod arrow;
mod bounds;
mod curve;
mod error;
mod mapper;
mod router;

pub use arrow::{Arrow, ArrowOptions, angliness, arrow, modulate, sector};
pub use bounds::{BoundingBox, Bounds, GraphBounds, NodeRect, bounding_boxes, snap_down, snap_up};
pub use curve::{quadratic, through_points};
pub use error::RouteError;
pub use mapper::{Endpoint, GridFrame, Position, RoutingGrid, build_grid, guarantee_walkable};
pub use router::{EdgePath, EdgeRouter, RouteConfig};
