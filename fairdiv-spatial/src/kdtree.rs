//! A static, array-backed k-d tree over a fixed point set.
//!
//! Built once per solve (§4.A/§9 of the design notes: "the weighted index is
//! built once by the driver and threaded into every MWU call"). Leaves store
//! point indices rather than coordinates to keep the tree itself small; the
//! caller's point array is the single source of truth for coordinates.

use ndarray::{Array2, ArrayView1};

/// Below this many points a subtree becomes a leaf scanned by brute force.
const LEAF_SIZE: usize = 16;

#[derive(Debug)]
pub(crate) enum Node {
    Leaf(Vec<u32>),
    Split {
        axis: usize,
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug)]
pub(crate) struct KdTree {
    pub(crate) root: Node,
    pub(crate) dim: usize,
}

impl KdTree {
    /// Build a k-d tree over `points` (N x d). `points` must have at least
    /// one row; dimension is read from its column count.
    pub(crate) fn build(points: &Array2<f64>) -> Self {
        let dim = points.ncols();
        let mut indices: Vec<u32> = (0..points.nrows() as u32).collect();
        let root = build_node(points, &mut indices, 0, dim);
        KdTree { root, dim }
    }

    /// Visit every point within Euclidean `radius` of `query`, invoking
    /// `visit(point_index)` for each. Traversal order is the tree's natural
    /// left-to-right order, which is stable given a fixed point set.
    pub(crate) fn for_each_within<F: FnMut(u32)>(
        &self,
        points: &Array2<f64>,
        query: ArrayView1<f64>,
        radius: f64,
        visit: &mut F,
    ) {
        visit_node(&self.root, points, query, radius, visit);
    }
}

fn build_node(points: &Array2<f64>, indices: &mut [u32], depth: usize, dim: usize) -> Node {
    if indices.len() <= LEAF_SIZE {
        return Node::Leaf(indices.to_vec());
    }
    let axis = depth % dim;
    indices.sort_unstable_by(|&a, &b| {
        points[[a as usize, axis]]
            .partial_cmp(&points[[b as usize, axis]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mid = indices.len() / 2;
    let value = points[[indices[mid] as usize, axis]];
    let (left_idx, right_idx) = indices.split_at_mut(mid);
    let left = build_node(points, left_idx, depth + 1, dim);
    let right = build_node(points, right_idx, depth + 1, dim);
    Node::Split {
        axis,
        value,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn visit_node<F: FnMut(u32)>(
    node: &Node,
    points: &Array2<f64>,
    query: ArrayView1<f64>,
    radius: f64,
    visit: &mut F,
) {
    match node {
        Node::Leaf(idxs) => {
            let rsq = radius * radius;
            for &i in idxs {
                if sqdist(query, points.row(i as usize)) <= rsq {
                    visit(i);
                }
            }
        }
        Node::Split {
            axis,
            value,
            left,
            right,
        } => {
            let diff = query[*axis] - value;
            if diff <= 0.0 {
                visit_node(left, points, query, radius, visit);
                if diff.abs() <= radius {
                    visit_node(right, points, query, radius, visit);
                }
            } else {
                visit_node(right, points, query, radius, visit);
                if diff.abs() <= radius {
                    visit_node(left, points, query, radius, visit);
                }
            }
        }
    }
}

pub(crate) fn sqdist(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}
