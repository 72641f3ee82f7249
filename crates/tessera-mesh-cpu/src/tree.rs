//! Binary triangle tree over one power-of-two-plus-one square.
//!
//! Nodes live in a flat arena and refer to each other by `NodeId`. Children
//! are owned by their parent slot; the three neighbour links are plain lookups
//! and may form cycles.

use tessera_geom::Position;

use crate::tiling::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

/// A leaf face, as grid indices. `(apex, left, right)` is wound the same way
/// as the full-mesh triangles `(k, k+1, k+width)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub apex: usize,
    pub left: usize,
    pub right: usize,
}

impl Triangle {
    #[inline]
    pub fn corners(&self) -> [usize; 3] {
        [self.apex, self.left, self.right]
    }
}

#[derive(Clone, Copy, Debug)]
struct TriNode {
    apex: usize,
    left: usize,
    right: usize,
    children: Option<(NodeId, NodeId)>,
    left_neighbour: Option<NodeId>,
    right_neighbour: Option<NodeId>,
    bottom_neighbour: Option<NodeId>,
}

impl TriNode {
    fn new(apex: usize, left: usize, right: usize) -> Self {
        Self {
            apex,
            left,
            right,
            children: None,
            left_neighbour: None,
            right_neighbour: None,
            bottom_neighbour: None,
        }
    }
}

pub(crate) struct TriTree<'a> {
    positions: &'a [Position],
    width: usize,
    square: Square,
    max_variance: f64,
    nodes: Vec<TriNode>,
    roots: [NodeId; 2],
}

impl<'a> TriTree<'a> {
    /// Seeds the two root faces sharing the top-right/bottom-left diagonal.
    /// `square` must already be validated against the grid.
    pub(crate) fn new(
        positions: &'a [Position],
        width: usize,
        square: Square,
        max_variance: f64,
    ) -> Self {
        let x1 = square.x + square.size - 1;
        let y1 = square.y + square.size - 1;
        let tl = square.x + square.y * width;
        let tr = x1 + square.y * width;
        let bl = square.x + y1 * width;
        let br = x1 + y1 * width;

        let mut nodes = Vec::with_capacity(8 * square.size);
        nodes.push(TriNode::new(tl, tr, bl));
        nodes.push(TriNode::new(br, bl, tr));
        let roots = [NodeId(0), NodeId(1)];
        nodes[0].bottom_neighbour = Some(roots[1]);
        nodes[1].bottom_neighbour = Some(roots[0]);
        Self {
            positions,
            width,
            square,
            max_variance,
            nodes,
            roots,
        }
    }

    /// Subdivides both roots and appends the resulting leaves to `out`.
    pub(crate) fn build(mut self, out: &mut Vec<Triangle>) {
        let [a, b] = self.roots;
        self.build_face(a);
        self.build_face(b);
        self.collect_leaves(a, out);
        self.collect_leaves(b, out);
    }

    #[inline]
    fn node(&self, id: NodeId) -> &TriNode {
        &self.nodes[id.slot()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut TriNode {
        &mut self.nodes[id.slot()]
    }

    fn push(&mut self, node: TriNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Grid index halfway between `a` and `b`, if it falls on a sample.
    fn midpoint(&self, a: usize, b: usize) -> Option<usize> {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        if (ax + bx) % 2 != 0 || (ay + by) % 2 != 0 {
            return None;
        }
        Some((ax + bx) / 2 + (ay + by) / 2 * self.width)
    }

    #[inline]
    fn elevation(&self, index: usize) -> f64 {
        self.positions[index].elevation
    }

    /// Worst interpolation error over the whole subtree below `(apex, left,
    /// right)`. Stops descending once `limit` is exceeded, so the result is
    /// exact only while it stays at or below `limit`.
    pub(crate) fn variance(&self, apex: usize, left: usize, right: usize, limit: f64) -> f64 {
        let Some(mid) = self.midpoint(left, right) else {
            return 0.0;
        };
        let interpolated = (self.elevation(left) + self.elevation(right)) * 0.5;
        let mut v = (self.elevation(mid) - interpolated).abs();
        if v > limit {
            return v;
        }
        v = v.max(self.variance(mid, apex, left, limit));
        if v > limit {
            return v;
        }
        v.max(self.variance(mid, right, apex, limit))
    }

    fn on_seam(&self, index: usize) -> bool {
        let (x, y) = self.coords(index);
        let sq = &self.square;
        let last = sq.size - 1;
        (sq.seams.left && x == sq.x)
            || (sq.seams.right && x == sq.x + last)
            || (sq.seams.top && y == sq.y)
            || (sq.seams.bottom && y == sq.y + last)
    }

    fn build_face(&mut self, id: NodeId) {
        if let Some((l, r)) = self.node(id).children {
            self.build_face(l);
            self.build_face(r);
            return;
        }
        let TriNode {
            apex, left, right, ..
        } = *self.node(id);
        if self.midpoint(left, right).is_none() {
            return;
        }
        let seam = self.on_seam(apex) || self.on_seam(left) || self.on_seam(right);
        if seam || self.variance(apex, left, right, self.max_variance) > self.max_variance {
            self.split(id);
            if let Some((l, r)) = self.node(id).children {
                self.build_face(l);
                self.build_face(r);
            }
        }
    }

    /// Bisects `id` at its hypotenuse midpoint. The bottom neighbour is
    /// split too (first bringing it to the same level) so the shared edge
    /// keeps matching vertices on both sides.
    fn split(&mut self, id: NodeId) {
        if self.node(id).children.is_some() {
            return;
        }
        if let Some(bottom) = self.node(id).bottom_neighbour {
            if self.node(bottom).bottom_neighbour != Some(id) {
                self.split(bottom);
            }
        }

        // Re-read: splitting the bottom neighbour may have relinked us.
        let t = *self.node(id);
        let Some(mid) = self.midpoint(t.left, t.right) else {
            panic!(
                "btt: split of finest-resolution triangle ({}, {}, {})",
                t.apex, t.left, t.right
            );
        };

        let lc = self.push(TriNode::new(mid, t.apex, t.left));
        let rc = self.push(TriNode::new(mid, t.right, t.apex));
        self.node_mut(id).children = Some((lc, rc));

        self.node_mut(lc).bottom_neighbour = t.left_neighbour;
        self.node_mut(lc).left_neighbour = Some(rc);
        self.node_mut(rc).bottom_neighbour = t.right_neighbour;
        self.node_mut(rc).right_neighbour = Some(lc);

        if let Some(n) = t.left_neighbour {
            self.relink(n, id, lc);
        }
        if let Some(n) = t.right_neighbour {
            self.relink(n, id, rc);
        }

        if let Some(bottom) = t.bottom_neighbour {
            if let Some((bl, br)) = self.node(bottom).children {
                self.node_mut(bl).right_neighbour = Some(rc);
                self.node_mut(br).left_neighbour = Some(lc);
                self.node_mut(lc).right_neighbour = Some(br);
                self.node_mut(rc).left_neighbour = Some(bl);
            } else {
                self.split(bottom);
            }
        }
    }

    /// Points whichever link of `node` referred to `old` at `new`.
    fn relink(&mut self, node: NodeId, old: NodeId, new: NodeId) {
        let n = self.node_mut(node);
        if n.bottom_neighbour == Some(old) {
            n.bottom_neighbour = Some(new);
        } else if n.left_neighbour == Some(old) {
            n.left_neighbour = Some(new);
        } else if n.right_neighbour == Some(old) {
            n.right_neighbour = Some(new);
        }
    }

    fn collect_leaves(&self, id: NodeId, out: &mut Vec<Triangle>) {
        let n = self.node(id);
        match n.children {
            Some((l, r)) => {
                self.collect_leaves(l, out);
                self.collect_leaves(r, out);
            }
            None => out.push(Triangle {
                apex: n.apex,
                left: n.left,
                right: n.right,
            }),
        }
    }
}
