//! Node rectangles and the padded boxes the router treats as obstacles.

use flowroute_core::Vec2;

/// A rendered node as the host editor reports it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRect {
    pub id: String,
    /// Top-left corner in world coordinates.
    pub pos: Vec2,
    pub width: f64,
    pub height: f64,
}

impl NodeRect {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            pos: Vec2::new(x, y),
            width,
            height,
        }
    }
}

/// A node box inflated by the node padding and snapped outward.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub id: String,
    /// Node width, at least 1. Padding is not included.
    pub width: f64,
    /// Node height, at least 1. Padding is not included.
    pub height: f64,
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl BoundingBox {
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.bottom_right.x, self.top_left.y)
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.top_left.x, self.bottom_right.y)
    }
}

/// The extent of every obstacle plus the graph padding.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl GraphBounds {
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).abs()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Obstacle boxes together with the graph they span.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    pub nodes: Vec<BoundingBox>,
    pub graph: GraphBounds,
}

/// Compute obstacle boxes and graph bounds for a set of nodes.
///
/// Both paddings are rounded to non-negative integers (anything not finite
/// counts as 0). Each node is inflated by `node_padding`; when `round_to`
/// is positive its corners are then snapped outward to multiples of
/// `round_to`. The graph bounds enclose every box plus `graph_padding` on
/// each side.
///
/// Returns `None` for an empty node list.
pub fn bounding_boxes(
    nodes: &[NodeRect],
    node_padding: f64,
    graph_padding: f64,
    round_to: f64,
) -> Option<Bounds> {
    if nodes.is_empty() {
        return None;
    }
    let node_padding = whole(node_padding);
    let graph_padding = whole(graph_padding);
    let round_to = whole(round_to);

    let mut min = Vec2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let boxes = nodes
        .iter()
        .map(|node| {
            let width = node.width.max(1.0);
            let height = node.height.max(1.0);
            let origin = Vec2::new(finite_or_zero(node.pos.x), finite_or_zero(node.pos.y));
            let mut top_left = Vec2::new(origin.x - node_padding, origin.y - node_padding);
            let mut bottom_right =
                Vec2::new(origin.x + width + node_padding, origin.y + height + node_padding);
            if round_to > 0.0 {
                top_left = Vec2::new(
                    snap_down(top_left.x, round_to),
                    snap_down(top_left.y, round_to),
                );
                bottom_right = Vec2::new(
                    snap_up(bottom_right.x, round_to),
                    snap_up(bottom_right.y, round_to),
                );
            }
            min = Vec2::new(min.x.min(top_left.x), min.y.min(top_left.y));
            max = Vec2::new(max.x.max(bottom_right.x), max.y.max(bottom_right.y));
            BoundingBox {
                id: node.id.clone(),
                width,
                height,
                top_left,
                bottom_right,
            }
        })
        .collect();

    let graph = GraphBounds {
        min: Vec2::new(min.x - graph_padding, min.y - graph_padding),
        max: Vec2::new(max.x + graph_padding, max.y + graph_padding),
    };
    Some(Bounds {
        nodes: boxes,
        graph,
    })
}

pub fn snap_down(v: f64, step: f64) -> f64 {
    (v / step).floor() * step
}

pub fn snap_up(v: f64, step: f64) -> f64 {
    (v / step).ceil() * step
}

fn whole(v: f64) -> f64 {
    let r = v.round().max(0.0);
    if r.is_finite() { r } else { 0.0 }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_and_snapped() {
        let nodes = [NodeRect::new("a", 13.0, 27.0, 50.0, 31.0)];
        let b = bounding_boxes(&nodes, 10.0, 20.0, 10.0).unwrap();
        let bb = &b.nodes[0];
        // (3, 17)..(73, 68) before snapping
        assert_eq!(bb.top_left, Vec2::new(0.0, 10.0));
        assert_eq!(bb.bottom_right, Vec2::new(80.0, 70.0));
        assert_eq!(bb.top_right(), Vec2::new(80.0, 10.0));
        assert_eq!(bb.bottom_left(), Vec2::new(0.0, 70.0));
        assert_eq!((bb.width, bb.height), (50.0, 31.0));
        assert_eq!(b.graph.min, Vec2::new(-20.0, -10.0));
        assert_eq!(b.graph.max, Vec2::new(100.0, 90.0));
        assert_eq!((b.graph.width(), b.graph.height()), (120.0, 100.0));
    }

    #[test]
    fn graph_is_union_of_boxes() {
        let nodes = [
            NodeRect::new("a", 0.0, 0.0, 40.0, 20.0),
            NodeRect::new("b", 100.0, -50.0, 20.0, 20.0),
        ];
        let b = bounding_boxes(&nodes, 0.0, 5.0, 0.0).unwrap();
        assert_eq!(b.graph.min, Vec2::new(-5.0, -55.0));
        assert_eq!(b.graph.max, Vec2::new(125.0, 25.0));
        for bb in &b.nodes {
            assert!(b.graph.contains(bb.top_left));
            assert!(b.graph.contains(bb.bottom_right));
        }
    }

    #[test]
    fn paddings_are_whole_and_non_negative() {
        let nodes = [NodeRect::new("a", 0.0, 0.0, 10.0, 10.0)];
        let b = bounding_boxes(&nodes, -4.0, f64::NAN, 0.0).unwrap();
        assert_eq!(b.nodes[0].top_left, Vec2::ZERO);
        assert_eq!(b.graph.max, Vec2::new(10.0, 10.0));
        let b = bounding_boxes(&nodes, 2.6, 0.0, 0.0).unwrap();
        assert_eq!(b.nodes[0].top_left, Vec2::new(-3.0, -3.0));
    }

    #[test]
    fn degenerate_nodes_get_unit_size() {
        let nodes = [NodeRect::new("a", f64::NAN, 5.0, 0.0, -3.0)];
        let b = bounding_boxes(&nodes, 0.0, 0.0, 0.0).unwrap();
        let bb = &b.nodes[0];
        assert_eq!((bb.width, bb.height), (1.0, 1.0));
        assert_eq!(bb.top_left, Vec2::new(0.0, 5.0));
        assert_eq!(bb.bottom_right, Vec2::new(1.0, 6.0));
    }

    #[test]
    fn no_nodes_no_bounds() {
        assert!(bounding_boxes(&[], 10.0, 20.0, 10.0).is_none());
    }
}
