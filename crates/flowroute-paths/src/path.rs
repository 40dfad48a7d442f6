//! Post-processing of grid paths: rasterised lines, expansion of sparse
//! paths, line-of-sight smoothing and collinear compression.

use flowroute_core::{Grid, Point};

/// Euclidean length of a polyline.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|w| w[0].to_vec2().distance(w[1].to_vec2()))
        .sum()
}

/// Cells on the Bresenham line from `from` to `to`, both included.
pub fn interpolate(from: Point, to: Point) -> Vec<Point> {
    let d = (to - from).abs();
    let (sx, sy) = (if from.x < to.x { 1 } else { -1 }, if from.y < to.y { 1 } else { -1 });
    let mut err = d.x - d.y;
    let mut p = from;
    let mut line = Vec::with_capacity(d.x.max(d.y) as usize + 1);
    loop {
        line.push(p);
        if p == to {
            break;
        }
        let e2 = 2 * err;
        if e2 > -d.y {
            err -= d.y;
            p.x += sx;
        }
        if e2 < d.x {
            err += d.x;
            p.y += sy;
        }
    }
    line
}

/// Expand a sparse path (e.g. jump points) into unit steps by rasterising
/// each segment. Paths shorter than two points are returned unchanged.
pub fn expand_path(path: &[Point]) -> Vec<Point> {
    let Some(&last) = path.last() else {
        return Vec::new();
    };
    if path.len() < 2 {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    for w in path.windows(2) {
        let line = interpolate(w[0], w[1]);
        out.extend_from_slice(&line[..line.len() - 1]);
    }
    out.push(last);
    out
}

/// Remove waypoints that a straight line of walkable cells can skip.
///
/// Keeps the first and last points. The anchor advances greedily: while
/// the rasterised line from the anchor to the next waypoint stays on
/// walkable cells, intermediate waypoints are dropped; once it would cross
/// a blocked cell, the preceding waypoint is kept and becomes the anchor.
/// The pass is repeated until nothing changes, so smoothing an already
/// smoothed path returns it unchanged.
pub fn smoothen_path(grid: &Grid, path: &[Point]) -> Vec<Point> {
    let mut current = path.to_vec();
    loop {
        let next = smoothen_once(grid, &current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn smoothen_once(grid: &Grid, path: &[Point]) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Vec::new();
    };
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut anchor = first;
    let mut out = vec![first];
    for i in 2..path.len() {
        let blocked = interpolate(anchor, path[i])
            .into_iter()
            .skip(1)
            .any(|p| !grid.is_walkable_at(p));
        if blocked {
            anchor = path[i - 1];
            out.push(anchor);
        }
    }
    out.push(last);
    out
}

/// Drop every waypoint lying on a straight run, keeping only the points
/// where the direction changes.
pub fn compress_path(path: &[Point]) -> Vec<Point> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let mut out = vec![path[0]];
    let mut dir = direction(path[0], path[1]);
    for w in path[1..].windows(2) {
        let d = direction(w[0], w[1]);
        if d != dir {
            out.push(w[0]);
            dir = d;
        }
    }
    out.extend(path.last());
    out
}

/// `to - from` reduced by the gcd of its components, so parallel segments
/// of any length compare equal.
fn direction(from: Point, to: Point) -> Point {
    let d = to - from;
    let g = gcd(d.x.unsigned_abs(), d.y.unsigned_abs()).max(1) as i32;
    Point::new(d.x / g, d.y / g)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn bresenham_lines() {
        assert_eq!(
            interpolate(Point::new(0, 0), Point::new(3, 0)),
            pts(&[(0, 0), (1, 0), (2, 0), (3, 0)])
        );
        assert_eq!(
            interpolate(Point::new(0, 0), Point::new(-2, -2)),
            pts(&[(0, 0), (-1, -1), (-2, -2)])
        );
        assert_eq!(
            interpolate(Point::new(0, 0), Point::new(4, 2)),
            pts(&[(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)])
        );
        assert_eq!(interpolate(Point::new(1, 1), Point::new(1, 1)), pts(&[(1, 1)]));
    }

    #[test]
    fn expand_sparse_path() {
        let sparse = pts(&[(0, 0), (2, 2), (2, 4)]);
        assert_eq!(
            expand_path(&sparse),
            pts(&[(0, 0), (1, 1), (2, 2), (2, 3), (2, 4)])
        );
        assert_eq!(expand_path(&pts(&[(5, 5)])), pts(&[(5, 5)]));
        assert!(expand_path(&[]).is_empty());
    }

    #[test]
    fn straight_path_smooths_to_endpoints() {
        let grid = Grid::new(4, 1);
        let path = pts(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(smoothen_path(&grid, &path), pts(&[(0, 0), (3, 0)]));
        assert_eq!(compress_path(&path), pts(&[(0, 0), (3, 0)]));
    }

    #[test]
    fn smoothing_keeps_corner_around_obstacle() {
        let grid: Grid = "
            ...
            ##.
            ...
        "
        .parse()
        .unwrap();
        let path = pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]);
        let smooth = smoothen_path(&grid, &path);
        assert_eq!(smooth.first(), Some(&Point::new(0, 0)));
        assert_eq!(smooth.last(), Some(&Point::new(0, 2)));
        for w in smooth.windows(2) {
            assert!(interpolate(w[0], w[1]).iter().all(|&p| grid.is_walkable_at(p)));
        }
        assert!(smooth.len() < path.len());
        assert_eq!(smoothen_path(&grid, &smooth), smooth);
    }

    #[test]
    fn first_candidate_blocked_keeps_preceding_waypoint() {
        // The line from the start straight to the third waypoint is blocked
        // at once.
        let grid: Grid = "
            .#.
            ...
        "
        .parse()
        .unwrap();
        let path = pts(&[(0, 0), (1, 1), (2, 1)]);
        let smooth = smoothen_path(&grid, &path);
        assert_eq!(smooth, path);
    }

    #[test]
    fn short_paths_are_untouched() {
        let grid = Grid::new(2, 2);
        assert!(smoothen_path(&grid, &[]).is_empty());
        let one = pts(&[(1, 1)]);
        assert_eq!(smoothen_path(&grid, &one), one);
        let two = pts(&[(0, 0), (1, 1)]);
        assert_eq!(smoothen_path(&grid, &two), two);
    }

    #[test]
    fn compress_keeps_turns() {
        let path = pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(
            compress_path(&path),
            pts(&[(0, 0), (2, 0), (2, 2), (4, 4)])
        );
        // Segments of different lengths along the same heading merge.
        let sparse = pts(&[(0, 0), (2, 1), (6, 3)]);
        assert_eq!(compress_path(&sparse), pts(&[(0, 0), (6, 3)]));
        let compressed = compress_path(&path);
        assert_eq!(compress_path(&compressed), compressed);
    }

    #[test]
    fn length_of_path() {
        let path = pts(&[(0, 0), (3, 4), (3, 6)]);
        assert_eq!(path_length(&path), 7.0);
        assert_eq!(path_length(&pts(&[(1, 1)])), 0.0);
    }
}
