use flowroute_core::Point;

use crate::Finder;
use crate::heap::Heap;
use crate::state::{NodeRef, SearchState, Side, by_f, step_cost};

impl SearchState<'_> {
    /// Best-first expansion ordered by `f = g + estimate`, shared by A*,
    /// Best-First and Dijkstra. The estimate comes from `finder`.
    pub(crate) fn weighted(&mut self, finder: &Finder, start: Point, goal: Point) -> Vec<Point> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Vec::new();
        };

        let mut open = Heap::with_comparator(by_f);
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0.0;
            node.f = 0.0;
            node.opened = Some(Side::Start);
        }
        self.mark_tested(start_idx);
        open.push(NodeRef {
            idx: start_idx,
            f: 0.0,
        });

        while let Some(current) = open.pop() {
            let ci = current.idx;
            self.nodes[ci].closed = true;
            if ci == goal_idx {
                return self.backtrace(goal_idx);
            }

            let cp = self.point(ci);
            let current_g = self.nodes[ci].g;
            self.load_neighbors(ci);
            let nbuf = std::mem::take(&mut self.nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.nodes[ni].closed {
                    continue;
                }
                let tentative_g = current_g + step_cost(cp, np);
                let was_open = self.nodes[ni].opened.is_some();
                if was_open && tentative_g >= self.nodes[ni].g {
                    continue;
                }

                let h = match self.nodes[ni].h {
                    Some(h) => h,
                    None => finder.estimate(np, goal),
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
                    n.opened = Some(Side::Start);
                    open.push(NodeRef { idx: ni, f });
                }
            }

            self.nbuf = nbuf;
        }

        Vec::new()
    }
}
