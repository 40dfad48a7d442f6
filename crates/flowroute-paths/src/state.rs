use std::cmp::Ordering;

use flowroute_core::{DiagonalMovement, Grid, Point};

/// Which frontier of a bidirectional search opened a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Start,
    Goal,
}

impl Side {
    pub(crate) fn other(self) -> Side {
        match self {
            Side::Start => Side::Goal,
            Side::Goal => Side::Start,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-cell search bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    pub(crate) g: f64,
    /// Heuristic estimate, computed once on first contact.
    pub(crate) h: Option<f64>,
    pub(crate) f: f64,
    pub(crate) parent: Option<usize>,
    pub(crate) opened: Option<Side>,
    pub(crate) closed: bool,
    tested: bool,
}

/// Heap entry: a node index with the `f` it was queued under.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
}

pub(crate) fn by_f(a: &NodeRef, b: &NodeRef) -> Ordering {
    a.f.total_cmp(&b.f)
}

/// Search state for one invocation of a finder.
///
/// Owns a node per grid cell so nothing is written back to the [`Grid`],
/// and two searches over the same grid never observe each other.
pub(crate) struct SearchState<'g> {
    pub(crate) grid: &'g Grid,
    pub(crate) policy: DiagonalMovement,
    pub(crate) nodes: Vec<Node>,
    tested: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl<'g> SearchState<'g> {
    pub(crate) fn new(grid: &'g Grid, policy: DiagonalMovement) -> Self {
        Self {
            grid,
            policy,
            nodes: vec![Node::default(); grid.len()],
            tested: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.grid.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.grid.point(idx)
    }

    #[inline]
    pub(crate) fn walkable(&self, p: Point) -> bool {
        self.grid.is_walkable_at(p)
    }

    /// Record that the search examined cell `idx`. Each cell is reported
    /// once, in the order it was first examined.
    pub(crate) fn mark_tested(&mut self, idx: usize) {
        let node = &mut self.nodes[idx];
        if !node.tested {
            node.tested = true;
            self.tested.push(idx);
        }
    }

    /// Fill `nbuf` with the legal neighbours of `idx`, marking them tested.
    pub(crate) fn load_neighbors(&mut self, idx: usize) {
        let p = self.point(idx);
        self.nbuf.clear();
        self.grid.neighbors_into(p, self.policy, &mut self.nbuf);
        for i in 0..self.nbuf.len() {
            if let Some(ni) = self.idx(self.nbuf[i]) {
                self.mark_tested(ni);
            }
        }
    }

    /// Follow parent links from `idx` back to the root, returning the
    /// cells root first.
    pub(crate) fn backtrace(&self, idx: usize) -> Vec<Point> {
        let mut path = vec![self.point(idx)];
        let mut cur = idx;
        while let Some(parent) = self.nodes[cur].parent {
            path.push(self.point(parent));
            cur = parent;
        }
        path.reverse();
        path
    }

    /// Join the two halves of a bidirectional search: `from_start` was
    /// reached by the start frontier, `from_goal` by the goal frontier, and
    /// the two are adjacent.
    pub(crate) fn bi_backtrace(&self, from_start: usize, from_goal: usize) -> Vec<Point> {
        let mut path = self.backtrace(from_start);
        let mut tail = self.backtrace(from_goal);
        tail.reverse();
        path.extend(tail);
        path
    }

    /// Cells examined so far, in first-examined order.
    pub(crate) fn tested(&self) -> Vec<Point> {
        self.tested.iter().map(|&i| self.point(i)).collect()
    }
}

/// Cost of a single step: 1 orthogonally, √2 diagonally.
#[inline]
pub(crate) fn step_cost(a: Point, b: Point) -> f64 {
    if a.x == b.x || a.y == b.y {
        1.0
    } else {
        std::f64::consts::SQRT_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtrace_follows_parents() {
        let grid = Grid::new(3, 1);
        let mut st = SearchState::new(&grid, DiagonalMovement::Never);
        st.nodes[1].parent = Some(0);
        st.nodes[2].parent = Some(1);
        assert_eq!(
            st.backtrace(2),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
        assert_eq!(st.backtrace(0), vec![Point::new(0, 0)]);
    }

    #[test]
    fn bi_backtrace_joins_halves() {
        let grid = Grid::new(4, 1);
        let mut st = SearchState::new(&grid, DiagonalMovement::Never);
        // start side: 0 -> 1, goal side: 3 -> 2
        st.nodes[1].parent = Some(0);
        st.nodes[2].parent = Some(3);
        let path = st.bi_backtrace(1, 2);
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0)
            ]
        );
    }

    #[test]
    fn tested_cells_are_unique_and_ordered() {
        let grid = Grid::new(3, 3);
        let mut st = SearchState::new(&grid, DiagonalMovement::Never);
        st.mark_tested(4);
        st.load_neighbors(4);
        st.mark_tested(1);
        assert_eq!(
            st.tested(),
            vec![
                Point::new(1, 1),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn step_costs() {
        assert_eq!(step_cost(Point::new(0, 0), Point::new(1, 0)), 1.0);
        assert_eq!(
            step_cost(Point::new(0, 0), Point::new(1, 1)),
            std::f64::consts::SQRT_2
        );
    }
}
