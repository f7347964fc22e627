use log::{debug, trace};

use super::{check_depth, Comparable, Evaluation, Layer, SearchError};
use crate::tree::{GameTree, NodeId};

/// Alpha-Beta tree search.
///
/// @see https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning
/// - Layers alternate by the parity of the remaining depth, see [`Layer::of`]
/// - Every visited inner node stores its resolved value and final bounds
pub struct AlphaBeta;

/// Counters of a single evaluation.
#[derive(Debug, Default)]
struct Stats {
    visited: usize,
    cutoffs: usize,
}

impl AlphaBeta {
    pub fn evaluate<T: Comparable>(
        tree: &mut GameTree<T>,
        depth: u32,
    ) -> Result<Evaluation<T>, SearchError> {
        check_depth(tree, depth)?;
        tree.reset();

        let mut stats = Stats::default();
        if tree.root().is_terminal {
            // the root is visited from here
            stats.visited += 1;
        }
        let value = alphabeta_rec(tree, NodeId::ROOT, depth, T::min(), T::max(), &mut stats);

        let root = tree.root();
        let best = root
            .best
            .and_then(|b| root.children.iter().position(|&c| c == b));

        debug!(
            "alphabeta depth={} value={:?} visited={}/{} cutoffs={}",
            depth,
            value,
            stats.visited,
            tree.shape().leaves(),
            stats.cutoffs
        );
        Ok(Evaluation {
            value,
            visited: stats.visited,
            leaves: tree.shape().leaves(),
            cutoffs: stats.cutoffs,
            best,
            line: tree.principal_variation(),
        })
    }
}

fn alphabeta_rec<T: Comparable>(
    tree: &mut GameTree<T>,
    id: NodeId,
    depth: u32,
    mut alpha: T,
    mut beta: T,
    stats: &mut Stats,
) -> T {
    if depth == 0 {
        // assigned when the tree was built
        return tree[id].value.unwrap_or_else(T::min);
    }

    let layer = Layer::of(depth);
    let mut value = layer.worst::<T>();
    let mut best = None;

    let count = tree[id].children.len();
    for i in 0..count {
        let child = tree[id].children[i];
        if tree[child].is_terminal {
            stats.visited += 1;
        }

        let newval = alphabeta_rec(tree, child, depth - 1, alpha, beta, stats);
        if best.is_none() || layer.improves(newval, value) {
            value = newval;
            best = Some(child);
        }
        match layer {
            Layer::Max if value > alpha => alpha = value,
            Layer::Min if value < beta => beta = value,
            _ => {}
        }

        if alpha >= beta {
            if i + 1 < count {
                trace!("cutoff at {:?} depth={} skipping {}", id, depth, count - i - 1);
                stats.cutoffs += 1;
            }
            break;
        }
    }

    let node = &mut tree[id];
    node.value = Some(value);
    node.alpha = alpha;
    node.beta = beta;
    node.best = best;
    value
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::logging;
    use crate::search::Minimax;

    fn random_tree(rng: &mut SmallRng, depth: u32, branches: usize) -> GameTree<i64> {
        let leaves = branches.pow(depth);
        let terminals: Vec<i64> = (0..leaves).map(|_| rng.gen_range(-20..=20)).collect();
        GameTree::new(depth as _, branches as _, &terminals).unwrap()
    }

    #[test]
    fn two_by_two() {
        logging();
        let mut tree = GameTree::new(2, 2, &[3, 5, 2, 9]).unwrap();
        let result = AlphaBeta::evaluate(&mut tree, 2).unwrap();
        println!("{:?}", tree);

        assert_eq!(result.value, 3);
        assert_eq!(result.best, Some(0));
        assert_eq!(result.leaves, 4);
        // 9 is never looked at: 2 <= alpha of 3
        assert_eq!(result.visited, 3);
        assert_eq!(result.cutoffs, 1);
        assert_eq!(result.pruned(), 1);

        let root = tree.root();
        assert_eq!(root.value, Some(3));
        assert_eq!(root.alpha, 3);
        assert_eq!(root.beta, i64::MAX);

        let left = &tree[root.children[0]];
        assert_eq!((left.value, left.alpha, left.beta), (Some(3), i64::MIN, 3));
        // exited early, the crossed bounds are the pruning signal
        let right = &tree[root.children[1]];
        assert_eq!((right.value, right.alpha, right.beta), (Some(2), 3, 2));
        assert!(right.alpha >= right.beta);

        assert_eq!(tree.principal_variation(), vec![0, 0]);
        assert_eq!(result.line, vec![0, 0]);
    }

    #[test]
    fn odd_depth_minimizes_at_root() {
        logging();
        let mut tree = GameTree::new(1, 3, &[4, 7, 1]).unwrap();
        let result = AlphaBeta::evaluate(&mut tree, 1).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.visited, 3);
        assert_eq!(result.cutoffs, 0);
        assert_eq!(result.best, Some(2));
        assert_eq!(tree.root().beta, 1);
        assert_eq!(tree.root().alpha, i64::MIN);
    }

    #[test]
    fn terminal_root() {
        let mut tree = GameTree::new(0, 5, &[17.5]).unwrap();
        let result = AlphaBeta::evaluate(&mut tree, 0).unwrap();
        assert_eq!(result.value, 17.5);
        assert_eq!(result.visited, 1);
        assert_eq!(result.leaves, 1);
        assert_eq!(result.best, None);
        assert!(tree.principal_variation().is_empty());
    }

    #[test]
    fn depth_mismatch() {
        let mut tree = GameTree::new(2, 2, &[3, 5, 2, 9]).unwrap();
        assert_eq!(
            AlphaBeta::evaluate(&mut tree, 3),
            Err(SearchError::DepthMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(tree.root().value, None);
    }

    #[test]
    fn reevaluate() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut tree = random_tree(&mut rng, 4, 3);
        let first = AlphaBeta::evaluate(&mut tree, 4).unwrap();
        let second = AlphaBeta::evaluate(&mut tree, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn matches_minimax() {
        logging();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let depth = rng.gen_range(0..=5);
            let branches = rng.gen_range(1..=4);
            let mut tree = random_tree(&mut rng, depth, branches);

            let full = Minimax::evaluate(&tree, depth).unwrap();
            let pruned = AlphaBeta::evaluate(&mut tree, depth).unwrap();

            assert_eq!(pruned.value, full.value, "{:?}", tree);
            assert_eq!(full.visited, full.leaves);
            assert!(pruned.visited <= pruned.leaves);
            // all leafs are visited iff no sibling was skipped
            assert_eq!(pruned.visited == pruned.leaves, pruned.cutoffs == 0);
            assert_eq!(tree.root().value, Some(pruned.value));
        }
    }

    #[test]
    fn bounds_after_search() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut tree = random_tree(&mut rng, 4, 3);
        AlphaBeta::evaluate(&mut tree, 4).unwrap();

        let mut resolved = 0;
        for (i, node) in tree.nodes().enumerate() {
            let Some(value) = node.value.filter(|_| !node.is_terminal) else {
                continue;
            };
            resolved += 1;
            let remaining = 4 - tree.level(NodeId(i as u32)) as u32;
            match Layer::of(remaining) {
                Layer::Max => assert!(node.alpha >= value),
                Layer::Min => assert!(node.beta <= value),
            }
            assert!(node.best.is_some());
        }
        assert!(resolved > 0);
    }
}
