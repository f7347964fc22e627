use log::debug;

use super::{check_depth, Comparable, Evaluation, Layer, SearchError};
use crate::tree::{GameTree, NodeId};

/// Plain minimax without pruning.
///
/// Visits every leaf and leaves the tree untouched.
/// Uses the same layer parity as [`super::AlphaBeta`], so both always agree on the root value.
pub struct Minimax;

impl Minimax {
    pub fn evaluate<T: Comparable>(
        tree: &GameTree<T>,
        depth: u32,
    ) -> Result<Evaluation<T>, SearchError> {
        check_depth(tree, depth)?;

        let mut visited = if tree.root().is_terminal { 1 } else { 0 };
        let (line, value) = minimax_rec(tree, NodeId::ROOT, depth, &mut visited);

        debug!("minimax depth={} value={:?} visited={}", depth, value, visited);
        Ok(Evaluation {
            value,
            visited,
            leaves: tree.shape().leaves(),
            cutoffs: 0,
            best: line.first().copied(),
            line,
        })
    }
}

fn minimax_rec<T: Comparable>(
    tree: &GameTree<T>,
    id: NodeId,
    depth: u32,
    visited: &mut usize,
) -> (Vec<usize>, T) {
    let node = &tree[id];
    if depth == 0 {
        return (Vec::new(), node.value.unwrap_or_else(T::min));
    }

    let layer = Layer::of(depth);
    let mut value = (Vec::new(), layer.worst::<T>());
    for (i, &child) in node.children.iter().enumerate() {
        if tree[child].is_terminal {
            *visited += 1;
        }
        let (line, newval) = minimax_rec(tree, child, depth - 1, visited);
        if value.0.is_empty() || layer.improves(newval, value.1) {
            let mut path = Vec::with_capacity(line.len() + 1);
            path.push(i);
            path.extend(line);
            value = (path, newval);
        }
    }
    value
}
