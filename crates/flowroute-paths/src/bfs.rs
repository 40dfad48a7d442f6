use std::collections::VecDeque;

use flowroute_core::Point;

use crate::state::{SearchState, Side};

impl SearchState<'_> {
    /// Breadth-first search: cells are expanded in FIFO order and each cell
    /// is opened at most once.
    pub(crate) fn breadth_first(&mut self, start: Point, goal: Point) -> Vec<Point> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Vec::new();
        };

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(start_idx);
        self.nodes[start_idx].opened = Some(Side::Start);
        self.mark_tested(start_idx);

        while let Some(ci) = queue.pop_front() {
            self.nodes[ci].closed = true;
            if ci == goal_idx {
                return self.backtrace(goal_idx);
            }

            self.load_neighbors(ci);
            let nbuf = std::mem::take(&mut self.nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.closed || n.opened.is_some() {
                    continue;
                }
                n.opened = Some(Side::Start);
                n.parent = Some(ci);
                queue.push_back(ni);
            }
            self.nbuf = nbuf;
        }

        Vec::new()
    }

    /// Two breadth-first frontiers, one from each endpoint, advanced one
    /// cell each per round until they touch.
    pub(crate) fn bi_breadth_first(&mut self, start: Point, goal: Point) -> Vec<Point> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Vec::new();
        };

        let mut queue_start: VecDeque<usize> = VecDeque::from([start_idx]);
        let mut queue_goal: VecDeque<usize> = VecDeque::from([goal_idx]);
        self.nodes[start_idx].opened = Some(Side::Start);
        self.nodes[goal_idx].opened = Some(Side::Goal);
        self.mark_tested(start_idx);
        self.mark_tested(goal_idx);

        while !queue_start.is_empty() && !queue_goal.is_empty() {
            if let Some(path) = self.bi_bfs_expand(&mut queue_start, Side::Start) {
                return path;
            }
            if let Some(path) = self.bi_bfs_expand(&mut queue_goal, Side::Goal) {
                return path;
            }
        }

        Vec::new()
    }

    fn bi_bfs_expand(&mut self, queue: &mut VecDeque<usize>, side: Side) -> Option<Vec<Point>> {
        let ci = queue.pop_front()?;
        self.nodes[ci].closed = true;

        self.load_neighbors(ci);
        let nbuf = std::mem::take(&mut self.nbuf);
        let mut met = None;
        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let n = &mut self.nodes[ni];
            if n.closed {
                continue;
            }
            match n.opened {
                Some(by) if by == side.other() => {
                    met = Some(ni);
                    break;
                }
                Some(_) => continue,
                None => {
                    n.opened = Some(side);
                    n.parent = Some(ci);
                    queue.push_back(ni);
                }
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
