mod alphabeta;
pub use alphabeta::*;
mod minimax;
pub use minimax::*;

use std::fmt::Debug;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::tree::GameTree;

/// The payoff stored at the leafs of a game tree.
///
/// `min` and `max` stand in for negative and positive infinity.
pub trait Comparable: Copy + PartialOrd + Debug {
    fn max() -> Self;
    fn min() -> Self;
}

impl Comparable for f64 {
    fn max() -> f64 {
        f64::INFINITY
    }
    fn min() -> f64 {
        f64::NEG_INFINITY
    }
}

impl Comparable for i64 {
    fn max() -> i64 {
        i64::MAX
    }
    fn min() -> i64 {
        i64::MIN
    }
}

impl Comparable for i32 {
    fn max() -> i32 {
        i32::MAX
    }
    fn min() -> i32 {
        i32::MIN
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search depth {actual} does not match the tree depth {expected}")]
    DepthMismatch { expected: u32, actual: u32 },
}

/// Whether a layer picks the largest or the smallest child value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Max,
    Min,
}

impl Layer {
    /// Layers are selected by the parity of the *remaining* depth:
    /// even is maximizing, odd is minimizing.
    /// For trees with an odd depth this makes the root a minimizing layer.
    pub fn of(depth: u32) -> Layer {
        if depth % 2 == 0 {
            Layer::Max
        } else {
            Layer::Min
        }
    }

    /// Returns true if `value` is strictly better than `current` for this layer.
    fn improves<T: Comparable>(self, value: T, current: T) -> bool {
        match self {
            Layer::Max => value > current,
            Layer::Min => value < current,
        }
    }

    fn worst<T: Comparable>(self) -> T {
        match self {
            Layer::Max => T::min(),
            Layer::Min => T::max(),
        }
    }
}

/// Result of evaluating a tree from its root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation<T> {
    /// Optimal value at the root.
    pub value: T,
    /// Number of leafs that were compared.
    pub visited: usize,
    /// Number of leafs in the tree.
    pub leaves: usize,
    /// Number of cutoffs that skipped at least one sibling.
    pub cutoffs: usize,
    /// Index of the root child that produced `value`.
    pub best: Option<usize>,
    /// Child index at each level along the optimal line.
    pub line: Vec<usize>,
}

impl<T> Evaluation<T> {
    /// Leafs that were never looked at.
    pub fn pruned(&self) -> usize {
        self.leaves - self.visited
    }
}

fn check_depth<T>(tree: &GameTree<T>, depth: u32) -> Result<(), SearchError> {
    if depth != tree.depth() {
        return Err(SearchError::DepthMismatch {
            expected: tree.depth(),
            actual: depth,
        });
    }
    Ok(())
}

/// Configurable search algorithm, given as JSON on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Strategy {
    AlphaBeta,
    Minimax,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::AlphaBeta
    }
}

impl Strategy {
    pub fn evaluate<T: Comparable>(
        &self,
        tree: &mut GameTree<T>,
        depth: u32,
    ) -> Result<Evaluation<T>, SearchError> {
        match self {
            Strategy::AlphaBeta => AlphaBeta::evaluate(tree, depth),
            Strategy::Minimax => Minimax::evaluate(tree, depth),
        }
    }
}

impl FromStr for Strategy {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}
