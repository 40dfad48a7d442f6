use flowroute_core::Point;

use crate::Finder;
use crate::heap::Heap;
use crate::state::{NodeRef, SearchState, Side, by_f, step_cost};

impl SearchState<'_> {
    /// Weighted search grown from both endpoints at once, one expansion per
    /// side per round. Stops as soon as a frontier touches a node the other
    /// side opened.
    pub(crate) fn bi_weighted(&mut self, finder: &Finder, start: Point, goal: Point) -> Vec<Point> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Vec::new();
        };

        let mut open_start = Heap::with_comparator(by_f);
        let mut open_goal = Heap::with_comparator(by_f);
        for (idx, side) in [(start_idx, Side::Start), (goal_idx, Side::Goal)] {
            let node = &mut self.nodes[idx];
            node.g = 0.0;
            node.f = 0.0;
            node.opened = Some(side);
            self.mark_tested(idx);
        }
        open_start.push(NodeRef {
            idx: start_idx,
            f: 0.0,
        });
        open_goal.push(NodeRef {
            idx: goal_idx,
            f: 0.0,
        });

        while !open_start.is_empty() && !open_goal.is_empty() {
            if let Some(path) = self.bi_expand(finder, &mut open_start, Side::Start, goal) {
                return path;
            }
            if let Some(path) = self.bi_expand(finder, &mut open_goal, Side::Goal, start) {
                return path;
            }
        }

        Vec::new()
    }

    /// Pop one node from `side`'s frontier and relax its neighbours towards
    /// `target`. Returns the joined path when the frontiers meet.
    fn bi_expand<F>(
        &mut self,
        finder: &Finder,
        open: &mut Heap<NodeRef, F>,
        side: Side,
        target: Point,
    ) -> Option<Vec<Point>>
    where
        F: Fn(&NodeRef, &NodeRef) -> std::cmp::Ordering,
    {
        let current = open.pop()?;
        let ci = current.idx;
        self.nodes[ci].closed = true;

        let cp = self.point(ci);
        let current_g = self.nodes[ci].g;
        self.load_neighbors(ci);
        let nbuf = std::mem::take(&mut self.nbuf);

        let mut met = None;
        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            if self.nodes[ni].closed {
                continue;
            }
            if self.nodes[ni].opened == Some(side.other()) {
                met = Some(ni);
                break;
            }

            let tentative_g = current_g + step_cost(cp, np);
            let was_open = self.nodes[ni].opened.is_some();
            if was_open && tentative_g >= self.nodes[ni].g {
                continue;
            }
            let h = match self.nodes[ni].h {
                Some(h) => h,
                None => finder.estimate(np, target),
            };
            let n = &mut self.nodes[ni];
            n.g = tentative_g;
            n.h = Some(h);
            n.f = tentative_g + h;
            n.parent = Some(ci);
            let f = n.f;
            if was_open {
                open.update_item(|r| r.idx == ni, |r| r.f = f);
            } else {
                n.opened = Some(side);
                open.push(NodeRef { idx: ni, f });
            }
        }
        self.nbuf = nbuf;

        let ni = met?;
        Some(match side {
            Side::Start => self.bi_backtrace(ci, ni),
            Side::Goal => self.bi_backtrace(ni, ci),
        })
    }
}
