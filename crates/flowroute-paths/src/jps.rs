//! Jump Point Search (JPS) on uniform-cost grids.
//!
//! JPS is an A* variant that "jumps" along straight lines and only adds
//! *jump points* (cells with forced neighbours, or the goal) to the open
//! list. Which neighbours count as forced depends on the diagonal policy, so
//! each policy has its own jump and pruning rules; the four rule sets below
//! are deliberately kept separate.

use flowroute_core::{DiagonalMovement, Point};

use crate::Finder;
use crate::heap::Heap;
use crate::heuristic::octile;
use crate::path::expand_path;
use crate::state::{NodeRef, SearchState, Side, by_f};

impl SearchState<'_> {
    /// Run Jump Point Search and expand the resulting jump points back into
    /// unit steps.
    pub(crate) fn jump_point(&mut self, finder: &Finder, start: Point, goal: Point) -> Vec<Point> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Vec::new();
        };

        let mut open = Heap::with_comparator(by_f);
        {
            let n = &mut self.nodes[start_idx];
            n.g = 0.0;
            n.f = 0.0;
            n.opened = Some(Side::Start);
        }
        self.mark_tested(start_idx);
        open.push(NodeRef {
            idx: start_idx,
            f: 0.0,
        });

        while let Some(cur) = open.pop() {
            let ci = cur.idx;
            self.nodes[ci].closed = true;
            if ci == goal_idx {
                return expand_path(&self.backtrace(goal_idx));
            }

            let cp = self.point(ci);
            let cur_g = self.nodes[ci].g;
            for nb in self.jps_neighbors(ci) {
                let Some(jp) = self.jump(nb, nb - cp, goal) else {
                    continue;
                };
                let Some(ji) = self.idx(jp) else {
                    continue;
                };
                if self.nodes[ji].closed {
                    continue;
                }
                let d = (jp - cp).abs();
                let tentative_g = cur_g + octile(f64::from(d.x), f64::from(d.y));
                let was_open = self.nodes[ji].opened.is_some();
                if was_open && tentative_g >= self.nodes[ji].g {
                    continue;
                }
                let h = match self.nodes[ji].h {
                    Some(h) => h,
                    None => finder.estimate(jp, goal),
                };
                let jn = &mut self.nodes[ji];
                jn.g = tentative_g;
                jn.h = Some(h);
                jn.f = tentative_g + h;
                jn.parent = Some(ci);
                let f = jn.f;
                if was_open {
                    open.update_item(|r| r.idx == ji, |r| r.f = f);
                } else {
                    jn.opened = Some(Side::Start);
                    open.push(NodeRef { idx: ji, f });
                }
            }
        }

        Vec::new()
    }

    // -----------------------------------------------------------------------
    // Pruned neighbours
    // -----------------------------------------------------------------------

    /// Neighbours worth jumping towards from `idx`, given the direction it
    /// was entered from. The start node (no parent) considers every legal
    /// neighbour.
    fn jps_neighbors(&self, idx: usize) -> Vec<Point> {
        let p = self.point(idx);
        let Some(parent) = self.nodes[idx].parent else {
            return self.grid.neighbors(p, self.policy);
        };
        let d = (p - self.point(parent)).signum();
        let w = |dx: i32, dy: i32| self.walkable(p.shift(dx, dy));
        let mut out = Vec::with_capacity(5);
        let mut push = |dx: i32, dy: i32| out.push(p.shift(dx, dy));
        let (dx, dy) = (d.x, d.y);

        match self.policy {
            DiagonalMovement::Never => {
                if dx != 0 {
                    if w(0, -1) {
                        push(0, -1);
                    }
                    if w(0, 1) {
                        push(0, 1);
                    }
                    if w(dx, 0) {
                        push(dx, 0);
                    }
                } else if dy != 0 {
                    if w(-1, 0) {
                        push(-1, 0);
                    }
                    if w(1, 0) {
                        push(1, 0);
                    }
                    if w(0, dy) {
                        push(0, dy);
                    }
                }
            }
            DiagonalMovement::Always => {
                if dx != 0 && dy != 0 {
                    if w(0, dy) {
                        push(0, dy);
                    }
                    if w(dx, 0) {
                        push(dx, 0);
                    }
                    if w(dx, dy) {
                        push(dx, dy);
                    }
                    if !w(-dx, 0) {
                        push(-dx, dy);
                    }
                    if !w(0, -dy) {
                        push(dx, -dy);
                    }
                } else if dx == 0 {
                    if w(0, dy) {
                        push(0, dy);
                    }
                    if !w(1, 0) {
                        push(1, dy);
                    }
                    if !w(-1, 0) {
                        push(-1, dy);
                    }
                } else {
                    if w(dx, 0) {
                        push(dx, 0);
                    }
                    if !w(0, 1) {
                        push(dx, 1);
                    }
                    if !w(0, -1) {
                        push(dx, -1);
                    }
                }
            }
            DiagonalMovement::OnlyWhenNoObstacles => {
                if dx != 0 && dy != 0 {
                    let (vert, horiz) = (w(0, dy), w(dx, 0));
                    if vert {
                        push(0, dy);
                    }
                    if horiz {
                        push(dx, 0);
                    }
                    if vert && horiz {
                        push(dx, dy);
                    }
                } else if dx != 0 {
                    let (ahead, below, above) = (w(dx, 0), w(0, 1), w(0, -1));
                    if ahead {
                        push(dx, 0);
                        if below {
                            push(dx, 1);
                        }
                        if above {
                            push(dx, -1);
                        }
                    }
                    if below {
                        push(0, 1);
                    }
                    if above {
                        push(0, -1);
                    }
                } else if dy != 0 {
                    let (ahead, right, left) = (w(0, dy), w(1, 0), w(-1, 0));
                    if ahead {
                        push(0, dy);
                        if right {
                            push(1, dy);
                        }
                        if left {
                            push(-1, dy);
                        }
                    }
                    if right {
                        push(1, 0);
                    }
                    if left {
                        push(-1, 0);
                    }
                }
            }
            DiagonalMovement::IfAtMostOneObstacle => {
                if dx != 0 && dy != 0 {
                    let (vert, horiz) = (w(0, dy), w(dx, 0));
                    if vert {
                        push(0, dy);
                    }
                    if horiz {
                        push(dx, 0);
                    }
                    if vert || horiz {
                        push(dx, dy);
                    }
                    if !w(-dx, 0) && vert {
                        push(-dx, dy);
                    }
                    if !w(0, -dy) && horiz {
                        push(dx, -dy);
                    }
                } else if dx == 0 {
                    if w(0, dy) {
                        push(0, dy);
                        if !w(1, 0) {
                            push(1, dy);
                        }
                        if !w(-1, 0) {
                            push(-1, dy);
                        }
                    }
                } else if w(dx, 0) {
                    push(dx, 0);
                    if !w(0, 1) {
                        push(dx, 1);
                    }
                    if !w(0, -1) {
                        push(dx, -1);
                    }
                }
            }
        }
        out
    }

    // -----------------------------------------------------------------------
    // Jumping
    // -----------------------------------------------------------------------

    /// Walk from `p` along `dir` until reaching the goal, a cell with a
    /// forced neighbour, or a dead end. Returns the jump point, if any.
    fn jump(&mut self, mut p: Point, dir: Point, goal: Point) -> Option<Point> {
        let (dx, dy) = (dir.x, dir.y);
        loop {
            let idx = self.idx(p).filter(|_| self.walkable(p))?;
            self.mark_tested(idx);
            if p == goal {
                return Some(p);
            }

            let policy = self.policy;
            match policy {
                DiagonalMovement::Never => {
                    if dx != 0 {
                        if self.forced_behind_horizontal(p, dx) {
                            return Some(p);
                        }
                    } else {
                        if self.forced_behind_vertical(p, dy) {
                            return Some(p);
                        }
                        if self.sub_jumps(p, Point::new(1, 0), Point::new(-1, 0), goal) {
                            return Some(p);
                        }
                    }
                }
                DiagonalMovement::OnlyWhenNoObstacles => {
                    if dx != 0 && dy != 0 {
                        if self.sub_jumps(p, Point::new(dx, 0), Point::new(0, dy), goal) {
                            return Some(p);
                        }
                    } else if dx != 0 {
                        if self.forced_behind_horizontal(p, dx) {
                            return Some(p);
                        }
                    } else if self.forced_behind_vertical(p, dy) {
                        return Some(p);
                    }
                    let w = |x: i32, y: i32| self.walkable(p.shift(x, y));
                    if !(w(dx, 0) && w(0, dy)) {
                        return None;
                    }
                }
                DiagonalMovement::Always | DiagonalMovement::IfAtMostOneObstacle => {
                    if dx != 0 && dy != 0 {
                        if self.forced_diagonal(p, dx, dy) {
                            return Some(p);
                        }
                        if self.sub_jumps(p, Point::new(dx, 0), Point::new(0, dy), goal) {
                            return Some(p);
                        }
                    } else if self.forced_ahead(p, dx, dy) {
                        return Some(p);
                    }
                    if policy == DiagonalMovement::IfAtMostOneObstacle {
                        let w = |x: i32, y: i32| self.walkable(p.shift(x, y));
                        if !(w(dx, 0) || w(0, dy)) {
                            return None;
                        }
                    }
                }
            }

            p = p + dir;
        }
    }

    /// Jump from `p` along `a` and then along `b`; true if either finds a
    /// jump point.
    fn sub_jumps(&mut self, p: Point, a: Point, b: Point, goal: Point) -> bool {
        self.jump(p + a, a, goal).is_some() || self.jump(p + b, b, goal).is_some()
    }

    /// Moving horizontally: a side cell is open while the one behind it is
    /// blocked.
    fn forced_behind_horizontal(&self, p: Point, dx: i32) -> bool {
        let w = |x: i32, y: i32| self.walkable(p.shift(x, y));
        (w(0, -1) && !w(-dx, -1)) || (w(0, 1) && !w(-dx, 1))
    }

    fn forced_behind_vertical(&self, p: Point, dy: i32) -> bool {
        let w = |x: i32, y: i32| self.walkable(p.shift(x, y));
        (w(-1, 0) && !w(-1, -dy)) || (w(1, 0) && !w(1, -dy))
    }

    /// Moving straight: the cell diagonally ahead is open while the side cell
    /// next to us is blocked.
    fn forced_ahead(&self, p: Point, dx: i32, dy: i32) -> bool {
        let w = |x: i32, y: i32| self.walkable(p.shift(x, y));
        if dx != 0 {
            (w(dx, 1) && !w(0, 1)) || (w(dx, -1) && !w(0, -1))
        } else {
            (w(1, dy) && !w(1, 0)) || (w(-1, dy) && !w(-1, 0))
        }
    }

    fn forced_diagonal(&self, p: Point, dx: i32, dy: i32) -> bool {
        let w = |x: i32, y: i32| self.walkable(p.shift(x, y));
        (w(-dx, dy) && !w(-dx, 0)) || (w(dx, -dy) && !w(0, -dy))
    }
}
