use std::time::Instant;

use flowroute_core::Point;

use crate::Finder;
use crate::state::{SearchState, step_cost};

/// One level of the depth-first descent.
struct Frame {
    idx: usize,
    g: f64,
    neighbors: Vec<usize>,
    next: usize,
}

enum Descent {
    Found(Vec<Point>),
    /// Smallest `f` seen above the cutoff; infinite when nothing was cut.
    Exceeded(f64),
    TimedOut,
}

impl SearchState<'_> {
    /// Iterative-deepening A*.
    ///
    /// Each iteration is a depth-first descent bounded by `f <= cutoff`; the
    /// next cutoff is the smallest `f` that exceeded the current one. Within
    /// an iteration a cell is only re-entered with a strictly smaller `g`,
    /// which keeps every iteration finite and lets an unreachable goal end
    /// the search.
    pub(crate) fn ida_star(&mut self, finder: &Finder, start: Point, goal: Point) -> Vec<Point> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Vec::new();
        };
        let deadline = finder.time_limit().map(|limit| (Instant::now() + limit, limit));
        let mut best_g = vec![f64::INFINITY; self.nodes.len()];
        let mut cutoff = finder.heuristic().between(start, goal);
        self.mark_tested(start_idx);

        for iteration in 0.. {
            best_g.fill(f64::INFINITY);
            match self.ida_descend(finder, start_idx, goal_idx, cutoff, &mut best_g, deadline) {
                Descent::Found(path) => return path,
                Descent::Exceeded(next) if next.is_finite() => cutoff = next,
                Descent::Exceeded(_) => return Vec::new(),
                Descent::TimedOut => {
                    if let Some((_, limit)) = deadline {
                        log::debug!(
                            "IDA* gave up after {limit:?} at iteration {iteration} (cutoff {cutoff})"
                        );
                    }
                    return Vec::new();
                }
            }
        }
        Vec::new()
    }

    fn ida_descend(
        &mut self,
        finder: &Finder,
        start_idx: usize,
        goal_idx: usize,
        cutoff: f64,
        best_g: &mut [f64],
        deadline: Option<(Instant, std::time::Duration)>,
    ) -> Descent {
        let goal = self.point(goal_idx);
        let mut min_exceeded = f64::INFINITY;
        let mut stack: Vec<Frame> = Vec::new();
        let mut pending = Some((start_idx, 0.0));

        loop {
            if let Some((idx, g)) = pending.take() {
                if deadline.is_some_and(|(at, _)| Instant::now() >= at) {
                    return Descent::TimedOut;
                }
                let p = self.point(idx);
                let f = g + finder.weight() * finder.heuristic().between(p, goal);
                if f > cutoff {
                    min_exceeded = min_exceeded.min(f);
                } else if idx == goal_idx {
                    let mut path: Vec<Point> = stack.iter().map(|fr| self.point(fr.idx)).collect();
                    path.push(p);
                    return Descent::Found(path);
                } else if g < best_g[idx] {
                    best_g[idx] = g;
                    self.load_neighbors(idx);
                    let neighbors = self.nbuf.iter().filter_map(|&n| self.idx(n)).collect();
                    stack.push(Frame {
                        idx,
                        g,
                        neighbors,
                        next: 0,
                    });
                }
            }

            let Some(top) = stack.last_mut() else {
                return Descent::Exceeded(min_exceeded);
            };
            if top.next < top.neighbors.len() {
                let ni = top.neighbors[top.next];
                top.next += 1;
                let (from, g) = (top.idx, top.g);
                pending = Some((ni, g + step_cost(self.point(from), self.point(ni))));
            } else {
                stack.pop();
            }
        }
    }
}
