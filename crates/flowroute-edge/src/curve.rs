//! SVG path strings for routed polylines and single quadratic curves.

use std::fmt::{self, Write};

use flowroute_core::Vec2;

/// Writes a point as `x,y`, with negative zero printed as `0`.
struct Coord(Vec2);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.x + 0.0, self.0.y + 0.0)
    }
}

/// A smooth curve through `points`.
///
/// Each waypoint becomes the control point of a quadratic segment running
/// between the midpoints of its two adjacent legs, so the curve leaves the
/// first point and reaches the last along straight lines and rounds every
/// corner in between. Fewer than two points yield at most a bare move.
pub fn through_points(points: &[Vec2]) -> String {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut d = format!("M{}", Coord(first));
    if points.len() < 2 {
        return d;
    }
    for w in points.windows(2) {
        let _ = write!(d, " Q{} {}", Coord(w[0]), Coord(w[0].midpoint(w[1])));
    }
    let _ = write!(d, " Q{} {}", Coord(last), Coord(last));
    d
}

/// `M start Q control end`.
pub fn quadratic(start: Vec2, control: Vec2, end: Vec2) -> String {
    format!("M{} Q{} {}", Coord(start), Coord(control), Coord(end))
}
