//! Edge records and the balanced insertion tree
//!
//! Edges live in an arena and refer to each other by index; index 0 is
//! a reserved sentinel that doubles as nil for every link, so reading
//! the parent of the root or the child of a leaf never needs a null
//! check. An edge moves through two strictly sequential phases: tree
//! node while the path is inserted, then singly linked list node during
//! the sweep. The two groups of links are never live at the same time.

use crate::arena::Arena;
use crate::raster::FillRule;

/// Nil value for every edge link; also the sentinel's own index
pub(crate) const NIL: u32 = 0;

/// A directed edge in supersampled units
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Edge {
    // tree phase
    pub(crate) left: u32,
    pub(crate) right: u32,
    pub(crate) parent: u32,
    pub(crate) red: bool,
    // sweep phase
    pub(crate) next: u32,
    pub(crate) isect_edge: u32,
    pub(crate) isect_y: i32,
    pub(crate) next_top_x: i32,
    // geometry
    pub(crate) top_y: i32,
    pub(crate) top_x: i32,
    pub(crate) bottom_y: i32,
    pub(crate) bottom_x: i32,
    /// Unclipped top point, for X-at-Y interpolation
    pub(crate) start_x: f32,
    pub(crate) start_y: f32,
    pub(crate) slope: f32,
    /// Signed winding contribution; accumulates when edges coincide
    pub(crate) dir: i32,
}

/// Red-black tree of edges keyed by (top Y, top X, slope)
#[derive(Debug)]
pub(crate) struct EdgeTree {
    pub(crate) edges: Arena<Edge>,
    root: u32,
}

impl EdgeTree {
    pub(crate) fn new() -> Self {
        let mut edges = Arena::new();
        // sentinel: black, self-linked through the zero defaults
        edges.push(Edge::default());
        Self { edges, root: NIL }
    }

    /// Insert a clipped edge; an exact top and bottom match accumulates
    /// into the existing node instead of adding one
    pub(crate) fn insert(&mut self, new: Edge) {
        let mut parent = NIL;
        let mut current = self.root;
        let mut left = true;

        while current != NIL {
            parent = current;
            let node = self.edges[current];

            if new.top_y == node.top_y {
                if new.top_x == node.top_x {
                    if new.bottom_y == node.bottom_y && new.bottom_x == node.bottom_x {
                        self.edges[current].dir += new.dir;
                        return;
                    }
                    left = new.slope < node.slope;
                } else {
                    left = new.top_x < node.top_x;
                }
            } else {
                left = new.top_y < node.top_y;
            }

            current = if left { node.left } else { node.right };
        }

        let id = self.edges.push(Edge {
            left: NIL,
            right: NIL,
            parent,
            red: true,
            next: NIL,
            isect_edge: NIL,
            isect_y: 0,
            next_top_x: 0,
            ..new
        });

        if parent == NIL {
            self.root = id;
            self.edges[id].red = false;
            return;
        }
        if left {
            self.edges[parent].left = id;
        } else {
            self.edges[parent].right = id;
        }

        self.fix_after_insert(id);
    }

    fn fix_after_insert(&mut self, mut line: u32) {
        while line != self.root && self.edges[self.edges[line].parent].red {
            let parent = self.edges[line].parent;
            let grandparent = self.edges[parent].parent;

            if parent == self.edges[grandparent].left {
                let uncle = self.edges[grandparent].right;
                if self.edges[uncle].red {
                    self.edges[parent].red = false;
                    self.edges[uncle].red = false;
                    self.edges[grandparent].red = true;
                    line = grandparent;
                } else {
                    if line == self.edges[parent].right {
                        line = parent;
                        self.rotate_left(line);
                    }
                    let parent = self.edges[line].parent;
                    let grandparent = self.edges[parent].parent;
                    self.edges[parent].red = false;
                    self.edges[grandparent].red = true;
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.edges[grandparent].left;
                if self.edges[uncle].red {
                    self.edges[parent].red = false;
                    self.edges[uncle].red = false;
                    self.edges[grandparent].red = true;
                    line = grandparent;
                } else {
                    if line == self.edges[parent].left {
                        line = parent;
                        self.rotate_right(line);
                    }
                    let parent = self.edges[line].parent;
                    let grandparent = self.edges[parent].parent;
                    self.edges[parent].red = false;
                    self.edges[grandparent].red = true;
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.edges[root].red = false;
    }

    fn rotate_left(&mut self, line: u32) {
        let right = self.edges[line].right;

        let right_left = self.edges[right].left;
        self.edges[line].right = right_left;
        if right_left != NIL {
            self.edges[right_left].parent = line;
        }

        let line_parent = self.edges[line].parent;
        if right != NIL {
            self.edges[right].parent = line_parent;
        }

        if line_parent != NIL {
            if line == self.edges[line_parent].left {
                self.edges[line_parent].left = right;
            } else {
                self.edges[line_parent].right = right;
            }
        } else {
            self.root = right;
        }

        self.edges[right].left = line;
        self.edges[line].parent = right;
    }

    fn rotate_right(&mut self, line: u32) {
        let left = self.edges[line].left;

        let left_right = self.edges[left].right;
        self.edges[line].left = left_right;
        if left_right != NIL {
            self.edges[left_right].parent = line;
        }

        let line_parent = self.edges[line].parent;
        if left != NIL {
            self.edges[left].parent = line_parent;
        }

        if line_parent != NIL {
            if line == self.edges[line_parent].right {
                self.edges[line_parent].right = left;
            } else {
                self.edges[line_parent].left = left;
            }
        } else {
            self.root = left;
        }

        self.edges[left].right = line;
        self.edges[line].parent = left;
    }

    /// Walk the tree once in key order, linking surviving edges through
    /// `next` and clearing every cached intersection on the way
    ///
    /// The resulting list is the lexical order of (top Y, top X, slope).
    /// Edges whose accumulated direction cancels under `rule` are left
    /// out. Returns the head, or nil when nothing survives.
    pub(crate) fn sorted_list(&mut self, rule: FillRule) -> u32 {
        let mut current = self.root;
        while self.edges[current].left != NIL {
            current = self.edges[current].left;
        }

        let first = current;
        // seeding previous with current removes a check inside the loop
        let mut previous = current;

        loop {
            if self.keep(current, rule) {
                self.edges[previous].next = current;
                previous = current;
            }

            if self.edges[current].right != NIL {
                current = self.edges[current].right;
                while self.edges[current].left != NIL {
                    current = self.edges[current].left;
                }
                continue;
            }

            self.edges[current].isect_edge = NIL;
            let mut parent = self.edges[current].parent;
            while parent != NIL && self.edges[parent].right == current {
                current = parent;
                self.edges[parent].isect_edge = NIL;
                parent = self.edges[current].parent;
            }

            current = parent;
            if current == NIL {
                break;
            }
        }

        self.edges[previous].next = NIL;

        // the head itself is filtered last, outside the loop
        if self.keep(first, rule) {
            first
        } else {
            self.edges[first].next
        }
    }

    fn keep(&self, edge: u32, rule: FillRule) -> bool {
        match rule {
            FillRule::NonZero => self.edges[edge].dir != 0,
            FillRule::EvenOdd => self.edges[edge].dir & 1 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(tree: &mut EdgeTree, rule: FillRule) -> Vec<(i32, i32, f32)> {
        let mut out = Vec::new();
        let mut current = tree.sorted_list(rule);
        while current != NIL {
            let e = tree.edges[current];
            out.push((e.top_y, e.top_x, e.slope));
            current = e.next;
        }
        out
    }

    fn insert_simple(tree: &mut EdgeTree, top_y: i32, top_x: i32, slope: f32, dir: i32) {
        tree.insert(Edge {
            top_y,
            top_x,
            bottom_y: top_y + 16,
            bottom_x: top_x,
            start_x: top_x as f32,
            start_y: top_y as f32,
            slope,
            dir,
            ..Edge::default()
        });
    }

    #[test]
    fn empty_tree_yields_no_list() {
        let mut tree = EdgeTree::new();
        assert_eq!(tree.sorted_list(FillRule::NonZero), NIL);
    }

    #[test]
    fn in_order_walk_is_sorted() {
        let mut tree = EdgeTree::new();
        // ascending then descending runs force rotations both ways
        for y in 0..40 {
            insert_simple(&mut tree, y, 100 - y, 0.0, 1);
        }
        for y in (40..80).rev() {
            insert_simple(&mut tree, y, 100 - y, 0.0, 1);
        }
        let list = collect(&mut tree, FillRule::NonZero);
        assert_eq!(list.len(), 80);
        for pair in list.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn ties_are_broken_by_top_x_then_slope() {
        let mut tree = EdgeTree::new();
        insert_simple(&mut tree, 0, 7, 2.0, 1);
        insert_simple(&mut tree, 0, 3, 0.0, 1);
        tree.insert(Edge {
            top_y: 0,
            top_x: 7,
            bottom_y: 32,
            bottom_x: 7,
            start_x: 7.0,
            start_y: 0.0,
            slope: -1.0,
            dir: 1,
            ..Edge::default()
        });
        let list = collect(&mut tree, FillRule::NonZero);
        assert_eq!(list, vec![(0, 3, 0.0), (0, 7, -1.0), (0, 7, 2.0)]);
    }

    #[test]
    fn coincident_edges_accumulate_and_cancel() {
        let mut tree = EdgeTree::new();
        insert_simple(&mut tree, 0, 5, 0.0, 1);
        insert_simple(&mut tree, 0, 5, 0.0, -1);
        assert_eq!(collect(&mut tree, FillRule::NonZero), vec![]);
    }

    #[test]
    fn even_direction_drops_under_even_odd() {
        let mut tree = EdgeTree::new();
        insert_simple(&mut tree, 0, 5, 0.0, 1);
        insert_simple(&mut tree, 0, 5, 0.0, 1);
        insert_simple(&mut tree, 16, 5, 0.0, 1);
        assert_eq!(collect(&mut tree, FillRule::EvenOdd), vec![(16, 5, 0.0)]);
        // the doubled edge still counts twice under nonzero
        let mut tree = EdgeTree::new();
        insert_simple(&mut tree, 0, 5, 0.0, 1);
        insert_simple(&mut tree, 0, 5, 0.0, 1);
        assert_eq!(collect(&mut tree, FillRule::NonZero).len(), 1);
        assert_eq!(tree.edges[1].dir, 2);
    }
}
