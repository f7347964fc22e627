//! Complete game trees with a fixed depth and branching factor.
//!
//! Nodes live in an arena and reference each other by [`NodeId`].
//! Ownership flows from the arena, the parent link is only used for lookups.

use std::fmt;

use thiserror::Error;

use crate::search::Comparable;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("depth must not be negative, got {0}")]
    InvalidDepth(i64),
    #[error("branching factor must be positive, got {0}")]
    InvalidBranchingFactor(i64),
    #[error("{branches}^{depth} leafs do not fit into memory")]
    LeafCountOverflow { depth: i64, branches: i64 },
    #[error("expected {expected} terminal values, got {actual}")]
    TerminalCountMismatch { expected: usize, actual: usize },
}

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Validated dimensions of a complete tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
    depth: u32,
    branches: usize,
    leaves: usize,
}

impl TreeShape {
    pub fn new(depth: i64, branches: i64) -> Result<TreeShape, TreeError> {
        if depth < 0 {
            return Err(TreeError::InvalidDepth(depth));
        }
        if branches <= 0 {
            return Err(TreeError::InvalidBranchingFactor(branches));
        }
        let overflow = TreeError::LeafCountOverflow { depth, branches };
        let d = u32::try_from(depth).map_err(|_| overflow.clone())?;
        let b = usize::try_from(branches).map_err(|_| overflow.clone())?;
        let leaves = b.checked_pow(d).ok_or(overflow.clone())?;
        // The arena is addressed with 32 bit ids
        if Self::node_count(b, d, leaves).map_or(true, |n| n > u32::MAX as usize) {
            return Err(overflow);
        }
        Ok(TreeShape {
            depth: d,
            branches: b,
            leaves,
        })
    }

    /// Total number of nodes: `1 + b + b^2 + ... + b^depth`.
    fn node_count(branches: usize, depth: u32, leaves: usize) -> Option<usize> {
        if branches == 1 {
            Some(depth as usize + 1)
        } else {
            (leaves.checked_mul(branches)? - 1).checked_div(branches - 1)
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn branches(&self) -> usize {
        self.branches
    }

    /// `branches^depth`
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn nodes(&self) -> usize {
        Self::node_count(self.branches, self.depth, self.leaves).unwrap_or(self.leaves)
    }
}

/// A single position in the game tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Payoff of a leaf or the resolved value of an inner node.
    pub value: Option<T>,
    pub alpha: T,
    pub beta: T,
    pub is_terminal: bool,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Child that produced `value`.
    pub best: Option<NodeId>,
}

impl<T: Comparable> Node<T> {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            value: None,
            alpha: T::min(),
            beta: T::max(),
            is_terminal: false,
            children: Vec::new(),
            parent,
            best: None,
        }
    }

    fn leaf(parent: Option<NodeId>, value: T) -> Self {
        Self {
            value: Some(value),
            is_terminal: true,
            ..Self::new(parent)
        }
    }

    /// Forget the results of a previous search.
    fn reset(&mut self) {
        if !self.is_terminal {
            self.value = None;
        }
        self.alpha = T::min();
        self.beta = T::max();
        self.best = None;
    }
}

impl<T: fmt::Debug> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value: {:?}, alpha: {:?} beta: {:?}",
            self.value, self.alpha, self.beta
        )
    }
}

/// A complete game tree.
///
/// Leaf values are consumed left to right in pre-order, so the n-th
/// terminal value always lands on the n-th leaf.
#[derive(Clone)]
pub struct GameTree<T> {
    nodes: Vec<Node<T>>,
    shape: TreeShape,
}

impl<T: Comparable> GameTree<T> {
    pub fn new(depth: i64, branches: i64, terminals: &[T]) -> Result<Self, TreeError> {
        Self::build(TreeShape::new(depth, branches)?, terminals)
    }

    pub fn build(shape: TreeShape, terminals: &[T]) -> Result<Self, TreeError> {
        if terminals.len() != shape.leaves {
            return Err(TreeError::TerminalCountMismatch {
                expected: shape.leaves,
                actual: terminals.len(),
            });
        }

        let mut tree = GameTree {
            nodes: Vec::with_capacity(shape.nodes()),
            shape,
        };
        let mut terminals = terminals.iter().copied();
        tree.build_rec(None, shape.depth, &mut terminals);
        debug_assert!(terminals.next().is_none());
        Ok(tree)
    }

    fn build_rec(
        &mut self,
        parent: Option<NodeId>,
        depth: u32,
        terminals: &mut impl Iterator<Item = T>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if depth == 0 {
            // count was checked upfront
            let value = terminals.next().unwrap_or_else(T::min);
            self.nodes.push(Node::leaf(parent, value));
            return id;
        }

        self.nodes.push(Node::new(parent));
        for _ in 0..self.shape.branches {
            let child = self.build_rec(Some(id), depth - 1, terminals);
            self.nodes[id.idx()].children.push(child);
        }
        id
    }

    /// Clear all search results, leafs keep their values.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    /// Follow the best children from the root, returning the child index at each level.
    pub fn principal_variation(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = self.root();
        while let Some(best) = node.best {
            let idx = node.children.iter().position(|&c| c == best);
            path.extend(idx);
            node = &self[best];
        }
        path
    }
}

impl<T> GameTree<T> {
    pub fn root(&self) -> &Node<T> {
        &self.nodes[NodeId::ROOT.idx()]
    }

    pub fn depth(&self) -> u32 {
        self.shape.depth
    }

    pub fn branches(&self) -> usize {
        self.shape.branches
    }

    pub fn shape(&self) -> TreeShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    /// Leaf values from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &T> {
        self.nodes
            .iter()
            .filter(|n| n.is_terminal)
            .filter_map(|n| n.value.as_ref())
    }

    /// Depth of `id` below the root, following parent links.
    pub fn level(&self, mut id: NodeId) -> usize {
        let mut level = 0;
        while let Some(parent) = self[id].parent {
            id = parent;
            level += 1;
        }
        level
    }
}

impl<T> std::ops::Index<NodeId> for GameTree<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.idx()]
    }
}

impl<T> std::ops::IndexMut<NodeId> for GameTree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.idx()]
    }
}

impl<T> fmt::Display for GameTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BRANCHES {}, DEPTH {}, TERMINAL NODES {}",
            self.shape.branches, self.shape.depth, self.shape.leaves
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for GameTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        // Nodes are stored in pre-order
        for (i, node) in self.nodes.iter().enumerate() {
            let indent = self.level(NodeId(i as u32));
            writeln!(f, "{:indent$}{}", "", node, indent = 2 * indent)?;
        }
        Ok(())
    }
}
